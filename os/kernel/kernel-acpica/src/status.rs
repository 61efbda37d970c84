//! ACPI status codes and the sentinel results returned by stubbed
//! entry points.

use bitfield_struct::bitfield;
use core::fmt;

/// Exception class stored in bits 12–15 of a [`Status`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum ExceptionClass {
    /// Problems with the host environment (`AE_CODE_ENVIRONMENTAL`).
    Environment = 0,
    /// Invalid use of the interface (`AE_CODE_PROGRAMMER`).
    Programmer = 1,
    /// Malformed firmware tables (`AE_CODE_ACPI_TABLES`).
    Tables = 2,
    /// AML execution failures (`AE_CODE_AML`).
    Aml = 3,
    /// Internal control flow (`AE_CODE_CONTROL`).
    Control = 4,
    /// Codes outside the defined classes.
    Unknown = 0xF,
}

impl ExceptionClass {
    const fn into_bits(self) -> u8 {
        self as u8
    }

    const fn from_bits(value: u8) -> Self {
        match value {
            0 => Self::Environment,
            1 => Self::Programmer,
            2 => Self::Tables,
            3 => Self::Aml,
            4 => Self::Control,
            _ => Self::Unknown,
        }
    }
}

/// `ACPI_STATUS`: the 32-bit result of most interpreter calls.
///
/// Zero is success. Everything else carries an exception class and a
/// class-relative exception number.
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct Status {
    /// Exception number within the class.
    #[bits(12)]
    pub exception: u16,

    #[bits(4)]
    pub class: ExceptionClass,

    #[bits(16)]
    __: u16,
}

impl Status {
    /// `AE_OK`
    pub const OK: Self = Self::new();

    /// `AE_NO_MEMORY`
    pub const NO_MEMORY: Self = Self::environmental(0x0004);

    /// `AE_SUPPORT`
    pub const SUPPORT: Self = Self::environmental(0x000B);

    /// `AE_NOT_CONFIGURED`: the subsystem is not built into this kernel.
    pub const NOT_CONFIGURED: Self = Self::environmental(0x001C);

    /// `AE_BAD_PARAMETER`
    pub const BAD_PARAMETER: Self = Self::new()
        .with_class(ExceptionClass::Programmer)
        .with_exception(0x0001);

    const fn environmental(exception: u16) -> Self {
        Self::new()
            .with_class(ExceptionClass::Environment)
            .with_exception(exception)
    }

    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.into_bits() == 0
    }

    #[must_use]
    pub const fn is_err(self) -> bool {
        !self.is_ok()
    }

    /// The `AE_*` name for the codes this layer hands out.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.into_bits() {
            0x0000 => Some("AE_OK"),
            0x0004 => Some("AE_NO_MEMORY"),
            0x000B => Some("AE_SUPPORT"),
            0x001C => Some("AE_NOT_CONFIGURED"),
            0x1001 => Some("AE_BAD_PARAMETER"),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "AE_0x{:04X}", self.into_bits()),
        }
    }
}

/// The fixed set of results a stubbed entry point may return.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sentinel {
    /// [`Status::NOT_CONFIGURED`]
    NotConfigured,
    /// [`Status::OK`]; the call succeeds without doing anything.
    Ok,
    /// Nothing; the function returns unit.
    Void,
    /// The integer `0`.
    ZeroU32,
    /// A null pointer.
    NullPointer,
}

/// The return type shape of an entry point's signature.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReturnShape {
    Status,
    Unit,
    Integer,
    Pointer,
}

impl Sentinel {
    /// The return type this sentinel can stand in for.
    #[must_use]
    pub const fn shape(self) -> ReturnShape {
        match self {
            Self::NotConfigured | Self::Ok => ReturnShape::Status,
            Self::Void => ReturnShape::Unit,
            Self::ZeroU32 => ReturnShape::Integer,
            Self::NullPointer => ReturnShape::Pointer,
        }
    }

    /// The status value for the two status-shaped sentinels.
    #[must_use]
    pub const fn status(self) -> Option<Status> {
        match self {
            Self::NotConfigured => Some(Status::NOT_CONFIGURED),
            Self::Ok => Some(Status::OK),
            Self::Void | Self::ZeroU32 | Self::NullPointer => None,
        }
    }

    /// `0` for [`Sentinel::ZeroU32`].
    #[must_use]
    pub const fn zero(self) -> Option<u32> {
        match self {
            Self::ZeroU32 => Some(0),
            Self::NotConfigured | Self::Ok | Self::Void | Self::NullPointer => None,
        }
    }

    /// A null pointer for [`Sentinel::NullPointer`].
    #[must_use]
    pub const fn null<T>(self) -> Option<*const T> {
        match self {
            Self::NullPointer => Some(core::ptr::null()),
            Self::NotConfigured | Self::Ok | Self::Void | Self::ZeroU32 => None,
        }
    }
}

impl ReturnShape {
    /// `==` usable in const context.
    #[must_use]
    pub const fn same(self, other: Self) -> bool {
        self as u8 == other as u8
    }
}
