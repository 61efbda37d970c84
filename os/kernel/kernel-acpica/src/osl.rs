//! OS services layer functions the kernel declares itself.
//!
//! The interpreter ships a default declaration for each of these; for the
//! functions below the kernel's own prototype replaces it, whatever the
//! feature switches say. They are grouped the way the interpreter uses
//! them: in-kernel overrides, debugger/disassembler support, and the
//! table and file utilities.

use crate::abi::{AcpiSize, DirectoryHandle, PhysicalAddress, TableHeader, TableSignature, ThreadId};
use crate::entry::{Axis, EntryPoint, OslGroup};
use crate::status::Status;
use crate::types::{Cache, HostPrimitives, Spinlock};
use core::ffi::{CStr, c_char, c_void};

/// The kernel's implementation of the alternate-prototype functions.
pub trait OsServices: HostPrimitives {
    // In-kernel overrides.

    fn initialize() -> Status;
    fn terminate() -> Status;
    fn allocate(size: AcpiSize) -> *mut c_void;
    fn allocate_zeroed(size: AcpiSize) -> *mut c_void;

    /// # Safety
    /// `memory` must come from [`Self::allocate`] or
    /// [`Self::allocate_zeroed`] and not have been freed yet.
    unsafe fn free(memory: *mut c_void);

    /// Takes an object from `cache`, or returns null when it is exhausted.
    fn acquire_object(cache: *mut Cache<Self>) -> *mut c_void;

    fn get_thread_id() -> ThreadId;
    fn create_lock(out_handle: &mut Spinlock<Self>) -> Status;

    // Debugger and disassembler.

    fn readable(pointer: *const c_void, length: AcpiSize) -> bool;
    fn writable(pointer: *mut c_void, length: AcpiSize) -> bool;
    fn initialize_debugger() -> Status;
    fn terminate_debugger();

    // Utilities.

    fn redirect_output(destination: *mut c_void);
    fn get_table_by_name(
        signature: &TableSignature,
        instance: u32,
        table: &mut *mut TableHeader,
        address: &mut PhysicalAddress,
    ) -> Status;
    fn get_table_by_index(
        index: u32,
        table: &mut *mut TableHeader,
        instance: &mut u32,
        address: &mut PhysicalAddress,
    ) -> Status;
    fn get_table_by_address(address: PhysicalAddress, table: &mut *mut TableHeader) -> Status;
    fn open_directory(pathname: &CStr, wildcard: &CStr, requested_type: c_char) -> DirectoryHandle;
    fn get_next_filename(directory: DirectoryHandle) -> *const c_char;
    fn close_directory(directory: DirectoryHandle);
}

/// The entry points whose prototype the kernel supplies.
pub fn alternate_prototypes() -> impl Iterator<Item = EntryPoint> {
    EntryPoint::ALL
        .into_iter()
        .filter(|e| matches!(e.axis(), Axis::Alternate(_)))
}

/// The alternate-prototype entry points of one group.
pub fn group(group: OslGroup) -> impl Iterator<Item = EntryPoint> {
    alternate_prototypes().filter(move |e| e.axis() == Axis::Alternate(group))
}
