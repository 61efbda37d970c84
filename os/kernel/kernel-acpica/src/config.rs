//! Build-time feature switches and the interpreter policy derived from them.
//!
//! Everything here is fixed when the crate is compiled. [`Features::BUILD`]
//! mirrors the Cargo features of this crate; the other constructors exist
//! so both configurations can be examined from a single build.

/// The kernel configuration switches the layer reacts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Features {
    /// ACPI support is compiled into the kernel (`CONFIG_ACPI`).
    pub acpi: bool,
    /// The AML debugger is built (`CONFIG_ACPI_DEBUGGER`).
    pub debugger: bool,
    /// Verbose interpreter debugging (`CONFIG_ACPI_DEBUG`).
    pub debug: bool,
    /// Only hardware-reduced platforms are supported
    /// (`CONFIG_ACPI_REDUCED_HARDWARE_ONLY`).
    pub reduced_hardware: bool,
}

impl Features {
    /// The configuration this crate was built with.
    pub const BUILD: Self = Self {
        acpi: cfg!(feature = "acpi"),
        debugger: cfg!(feature = "debugger"),
        debug: cfg!(feature = "debug"),
        reduced_hardware: cfg!(feature = "reduced-hardware"),
    };

    /// A kernel without ACPI support.
    pub const DISABLED: Self = Self {
        acpi: false,
        debugger: false,
        debug: false,
        reduced_hardware: false,
    };

    /// A kernel with ACPI support on full (fixed) hardware.
    pub const ENABLED: Self = Self {
        acpi: true,
        ..Self::DISABLED
    };

    /// Returns `self` with reduced-hardware-only mode switched on.
    #[must_use]
    pub const fn with_reduced_hardware(self) -> Self {
        Self {
            reduced_hardware: true,
            ..self
        }
    }

    /// The interpreter policy implied by these switches.
    ///
    /// The debugger, debug and reduced-hardware switches only take effect
    /// together with `acpi`, matching how Cargo features imply it.
    #[must_use]
    pub const fn policy(self) -> Policy {
        Policy {
            ignore_package_resolution_errors: true,
            use_gpe_polling: true,
            use_system_inttypes: true,
            use_native_math64: true,
            debugger: self.acpi && self.debugger,
            mutex_debug: self.acpi && self.debug,
            reduced_hardware: self.acpi && self.reduced_hardware,
            globals: self.acpi,
            mem_allocations: self.acpi,
            error_messages: self.acpi,
            debug_output: self.acpi,
        }
    }
}

/// Interpreter-wide policy handed to the portable library.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Policy {
    /// Unresolvable references inside packages are dropped instead of
    /// failing the package (`ACPI_IGNORE_PACKAGE_RESOLUTION_ERRORS`).
    pub ignore_package_resolution_errors: bool,
    /// GPEs are polled rather than waited for (`ACPI_USE_GPE_POLLING`).
    pub use_gpe_polling: bool,
    /// Integer widths come from the host's `core` types.
    pub use_system_inttypes: bool,
    /// 64-bit division is native on every supported target.
    pub use_native_math64: bool,
    /// The AML debugger is built (`ACPI_DEBUGGER`).
    pub debugger: bool,
    /// Mutex ownership is checked (`ACPI_MUTEX_DEBUG`).
    pub mutex_debug: bool,
    /// Fixed hardware is absent (`ACPI_REDUCED_HARDWARE`).
    pub reduced_hardware: bool,
    /// The interpreter's global variables exist.
    pub globals: bool,
    /// The allocation tracking macros are live.
    pub mem_allocations: bool,
    /// Error, warning and info reports reach the log.
    pub error_messages: bool,
    /// Debug print statements are compiled in.
    pub debug_output: bool,
}
