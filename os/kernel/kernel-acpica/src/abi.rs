//! Types owned by the interpreter that appear in host-facing signatures.

use core::ffi::c_void;

/// `ACPI_PHYSICAL_ADDRESS`
pub type PhysicalAddress = u64;

/// `ACPI_SIZE`
pub type AcpiSize = usize;

/// `ACPI_THREAD_ID`
pub type ThreadId = u64;

/// `ACPI_ADR_SPACE_TYPE`
pub type AddressSpaceId = u8;

/// `ACPI_HANDLE`: an opaque namespace node handle.
pub type Handle = *mut c_void;

/// Four-character table signature such as `b"FACP"`.
pub type TableSignature = [u8; 4];

/// Common header of every ACPI system description table.
#[repr(C, packed)]
#[derive(Debug, Copy, Clone)]
pub struct TableHeader {
    pub signature: TableSignature,
    /// Length of the table in bytes, header included.
    pub length: u32,
    pub revision: u8,
    pub checksum: u8,
    pub oem_id: [u8; 6],
    pub oem_table_id: [u8; 8],
    pub oem_revision: u32,
    pub asl_compiler_id: [u8; 4],
    pub asl_compiler_revision: u32,
}

/// `ACPI_TABLE_DESC`: the interpreter's per-table bookkeeping record.
///
/// Hosts only ever pass arrays of these back to the interpreter, so the
/// layout stays private.
#[repr(C)]
pub struct TableDesc {
    _opaque: [u8; 0],
}

/// Actions accepted by `AcpiUpdateInterfaces`.
pub mod interface_action {
    const VENDOR_STRINGS: u8 = 0x01;
    const FEATURE_STRINGS: u8 = 0x02;
    const ENABLE: u8 = 0x00;
    const DISABLE: u8 = 0x04;

    pub const ENABLE_ALL_VENDOR_STRINGS: u8 = ENABLE | VENDOR_STRINGS;
    pub const ENABLE_ALL_FEATURE_STRINGS: u8 = ENABLE | FEATURE_STRINGS;
    pub const ENABLE_ALL_STRINGS: u8 = ENABLE | VENDOR_STRINGS | FEATURE_STRINGS;
    pub const DISABLE_ALL_VENDOR_STRINGS: u8 = DISABLE | VENDOR_STRINGS;
    pub const DISABLE_ALL_FEATURE_STRINGS: u8 = DISABLE | FEATURE_STRINGS;
    pub const DISABLE_ALL_STRINGS: u8 = DISABLE | VENDOR_STRINGS | FEATURE_STRINGS;
}

/// Opaque directory cursor handed out by `AcpiOsOpenDirectory`.
pub type DirectoryHandle = *mut c_void;
