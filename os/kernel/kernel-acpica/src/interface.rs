//! The interpreter's external interfaces and their implementations.
//!
//! [`AcpiInterface`] is the contract the rest of the kernel calls. Three
//! implementations exist, all compiled in every build:
//!
//! * [`StubImpl`]: every function returns its entry's [`Sentinel`] and does
//!   nothing else. Used when ACPI is not built into the kernel.
//! * [`HostDelegateImpl`]: forwards to the kernel's [`AcpiHost`]
//!   implementation unchanged.
//! * [`ReducedHardwareImpl`]: forwards like [`HostDelegateImpl`] except for
//!   the fixed-hardware functions, which are stubbed.
//!
//! [`Active`] names the one selected by this crate's features. All
//! functions are associated functions on zero-sized types, so a call through
//! [`Active`] compiles to either the kernel's function or a constant.
//!
//! [`Sentinel`]: crate::status::Sentinel

use crate::abi::{AcpiSize, AddressSpaceId, PhysicalAddress, TableDesc, TableHeader, TableSignature};
use crate::entry::EntryPoint;
use crate::status::{Sentinel, Status};
use core::ffi::{CStr, c_char};
use core::marker::PhantomData;

/// The interpreter's external interface as seen by callers in the kernel.
pub trait AcpiInterface {
    fn initialize_subsystem() -> Status;
    fn enable_subsystem(flags: u32) -> Status;
    fn initialize_objects(flags: u32) -> Status;
    fn terminate() -> Status;
    fn initialize_tables(initial_storage: *mut TableDesc, initial_table_count: u32, allow_resize: bool) -> Status;
    fn reallocate_root_table() -> Status;
    fn load_tables() -> Status;
    fn get_table(signature: &TableSignature, instance: u32, out_table: &mut *mut TableHeader) -> Status;
    fn get_table_by_index(index: u32, out_table: &mut *mut TableHeader) -> Status;
    fn put_table(table: *mut TableHeader);
    fn install_interface(name: &CStr) -> Status;
    fn remove_interface(name: &CStr) -> Status;
    fn update_interfaces(action: u8) -> Status;
    fn check_address_range(space_id: AddressSpaceId, address: PhysicalAddress, length: AcpiSize, warn: bool) -> u32;
    fn format_exception(status: Status) -> *const c_char;

    // Fixed hardware.
    fn enable() -> Status;
    fn disable() -> Status;
    fn enable_event(event: u32, flags: u32) -> Status;
    fn acquire_global_lock(timeout: u16, handle: &mut u32) -> Status;
    fn release_global_lock(handle: u32) -> Status;
    fn any_gpe_status_set() -> u32;
    fn enter_sleep_state_s4bios() -> Status;
}

/// The kernel's implementation of the external interface.
///
/// Signatures are identical to [`AcpiInterface`]; only a kernel built with
/// ACPI support needs to provide this.
pub trait AcpiHost {
    fn initialize_subsystem() -> Status;
    fn enable_subsystem(flags: u32) -> Status;
    fn initialize_objects(flags: u32) -> Status;
    fn terminate() -> Status;
    fn initialize_tables(initial_storage: *mut TableDesc, initial_table_count: u32, allow_resize: bool) -> Status;
    fn reallocate_root_table() -> Status;
    fn load_tables() -> Status;
    fn get_table(signature: &TableSignature, instance: u32, out_table: &mut *mut TableHeader) -> Status;
    fn get_table_by_index(index: u32, out_table: &mut *mut TableHeader) -> Status;
    fn put_table(table: *mut TableHeader);
    fn install_interface(name: &CStr) -> Status;
    fn remove_interface(name: &CStr) -> Status;
    fn update_interfaces(action: u8) -> Status;
    fn check_address_range(space_id: AddressSpaceId, address: PhysicalAddress, length: AcpiSize, warn: bool) -> u32;
    fn format_exception(status: Status) -> *const c_char;
    fn enable() -> Status;
    fn disable() -> Status;
    fn enable_event(event: u32, flags: u32) -> Status;
    fn acquire_global_lock(timeout: u16, handle: &mut u32) -> Status;
    fn release_global_lock(handle: u32) -> Status;
    fn any_gpe_status_set() -> u32;
    fn enter_sleep_state_s4bios() -> Status;
}

#[cfg(not(feature = "acpi"))]
pub type Active<H> = StubImpl<H>;

#[cfg(all(feature = "acpi", not(feature = "reduced-hardware")))]
pub type Active<H> = HostDelegateImpl<H>;

#[cfg(all(feature = "acpi", feature = "reduced-hardware"))]
pub type Active<H> = ReducedHardwareImpl<H>;

// The helpers below are only evaluated inside `const { }` blocks, so a
// stub whose sentinel does not fit its signature fails the build.

const fn stub_status(entry: EntryPoint) -> Status {
    match entry.sentinel() {
        Some(sentinel) => match sentinel.status() {
            Some(status) => status,
            None => panic!("stubbed entry point does not return a status"),
        },
        None => panic!("entry point cannot be stubbed"),
    }
}

const fn stub_integer(entry: EntryPoint) -> u32 {
    match entry.sentinel() {
        Some(sentinel) => match sentinel.zero() {
            Some(value) => value,
            None => panic!("stubbed entry point does not return an integer"),
        },
        None => panic!("entry point cannot be stubbed"),
    }
}

const fn stub_null<T>(entry: EntryPoint) -> *const T {
    match entry.sentinel() {
        Some(sentinel) => match sentinel.null() {
            Some(pointer) => pointer,
            None => panic!("stubbed entry point does not return a pointer"),
        },
        None => panic!("entry point cannot be stubbed"),
    }
}

const fn stub_void(entry: EntryPoint) {
    match entry.sentinel() {
        Some(Sentinel::Void) => {}
        _ => panic!("stubbed entry point does not return unit"),
    }
}

/// Sentinel-returning stand-ins for every external interface.
///
/// No function allocates, locks, blocks or touches its arguments.
pub struct StubImpl<H = ()>(PhantomData<fn() -> H>);

impl<H> AcpiInterface for StubImpl<H> {
    fn initialize_subsystem() -> Status {
        const { stub_status(EntryPoint::InitializeSubsystem) }
    }

    fn enable_subsystem(_flags: u32) -> Status {
        const { stub_status(EntryPoint::EnableSubsystem) }
    }

    fn initialize_objects(_flags: u32) -> Status {
        const { stub_status(EntryPoint::InitializeObjects) }
    }

    fn terminate() -> Status {
        const { stub_status(EntryPoint::Terminate) }
    }

    fn initialize_tables(_initial_storage: *mut TableDesc, _initial_table_count: u32, _allow_resize: bool) -> Status {
        const { stub_status(EntryPoint::InitializeTables) }
    }

    fn reallocate_root_table() -> Status {
        const { stub_status(EntryPoint::ReallocateRootTable) }
    }

    fn load_tables() -> Status {
        const { stub_status(EntryPoint::LoadTables) }
    }

    fn get_table(_signature: &TableSignature, _instance: u32, _out_table: &mut *mut TableHeader) -> Status {
        const { stub_status(EntryPoint::GetTable) }
    }

    fn get_table_by_index(_index: u32, _out_table: &mut *mut TableHeader) -> Status {
        const { stub_status(EntryPoint::GetTableByIndex) }
    }

    fn put_table(_table: *mut TableHeader) {
        const { stub_void(EntryPoint::PutTable) }
    }

    fn install_interface(_name: &CStr) -> Status {
        const { stub_status(EntryPoint::InstallInterface) }
    }

    fn remove_interface(_name: &CStr) -> Status {
        const { stub_status(EntryPoint::RemoveInterface) }
    }

    fn update_interfaces(_action: u8) -> Status {
        const { stub_status(EntryPoint::UpdateInterfaces) }
    }

    fn check_address_range(_space_id: AddressSpaceId, _address: PhysicalAddress, _length: AcpiSize, _warn: bool) -> u32 {
        const { stub_integer(EntryPoint::CheckAddressRange) }
    }

    fn format_exception(_status: Status) -> *const c_char {
        const { stub_null::<c_char>(EntryPoint::FormatException) }
    }

    fn enable() -> Status {
        const { stub_status(EntryPoint::Enable) }
    }

    fn disable() -> Status {
        const { stub_status(EntryPoint::Disable) }
    }

    fn enable_event(_event: u32, _flags: u32) -> Status {
        const { stub_status(EntryPoint::EnableEvent) }
    }

    fn acquire_global_lock(_timeout: u16, _handle: &mut u32) -> Status {
        const { stub_status(EntryPoint::AcquireGlobalLock) }
    }

    fn release_global_lock(_handle: u32) -> Status {
        const { stub_status(EntryPoint::ReleaseGlobalLock) }
    }

    fn any_gpe_status_set() -> u32 {
        const { stub_integer(EntryPoint::AnyGpeStatusSet) }
    }

    fn enter_sleep_state_s4bios() -> Status {
        const { stub_status(EntryPoint::EnterSleepStateS4bios) }
    }
}

/// Direct forwarding to the kernel's implementation.
pub struct HostDelegateImpl<H>(PhantomData<fn() -> H>);

#[allow(clippy::inline_always)]
impl<H: AcpiHost> AcpiInterface for HostDelegateImpl<H> {
    #[inline(always)]
    fn initialize_subsystem() -> Status {
        H::initialize_subsystem()
    }

    #[inline(always)]
    fn enable_subsystem(flags: u32) -> Status {
        H::enable_subsystem(flags)
    }

    #[inline(always)]
    fn initialize_objects(flags: u32) -> Status {
        H::initialize_objects(flags)
    }

    #[inline(always)]
    fn terminate() -> Status {
        H::terminate()
    }

    #[inline(always)]
    fn initialize_tables(initial_storage: *mut TableDesc, initial_table_count: u32, allow_resize: bool) -> Status {
        H::initialize_tables(initial_storage, initial_table_count, allow_resize)
    }

    #[inline(always)]
    fn reallocate_root_table() -> Status {
        H::reallocate_root_table()
    }

    #[inline(always)]
    fn load_tables() -> Status {
        H::load_tables()
    }

    #[inline(always)]
    fn get_table(signature: &TableSignature, instance: u32, out_table: &mut *mut TableHeader) -> Status {
        H::get_table(signature, instance, out_table)
    }

    #[inline(always)]
    fn get_table_by_index(index: u32, out_table: &mut *mut TableHeader) -> Status {
        H::get_table_by_index(index, out_table)
    }

    #[inline(always)]
    fn put_table(table: *mut TableHeader) {
        H::put_table(table);
    }

    #[inline(always)]
    fn install_interface(name: &CStr) -> Status {
        H::install_interface(name)
    }

    #[inline(always)]
    fn remove_interface(name: &CStr) -> Status {
        H::remove_interface(name)
    }

    #[inline(always)]
    fn update_interfaces(action: u8) -> Status {
        H::update_interfaces(action)
    }

    #[inline(always)]
    fn check_address_range(space_id: AddressSpaceId, address: PhysicalAddress, length: AcpiSize, warn: bool) -> u32 {
        H::check_address_range(space_id, address, length, warn)
    }

    #[inline(always)]
    fn format_exception(status: Status) -> *const c_char {
        H::format_exception(status)
    }

    #[inline(always)]
    fn enable() -> Status {
        H::enable()
    }

    #[inline(always)]
    fn disable() -> Status {
        H::disable()
    }

    #[inline(always)]
    fn enable_event(event: u32, flags: u32) -> Status {
        H::enable_event(event, flags)
    }

    #[inline(always)]
    fn acquire_global_lock(timeout: u16, handle: &mut u32) -> Status {
        H::acquire_global_lock(timeout, handle)
    }

    #[inline(always)]
    fn release_global_lock(handle: u32) -> Status {
        H::release_global_lock(handle)
    }

    #[inline(always)]
    fn any_gpe_status_set() -> u32 {
        H::any_gpe_status_set()
    }

    #[inline(always)]
    fn enter_sleep_state_s4bios() -> Status {
        H::enter_sleep_state_s4bios()
    }
}

/// Forwarding for kernels that only run on hardware-reduced platforms.
///
/// There are no fixed hardware registers, so the fixed-hardware functions
/// return their sentinels instead of reaching the kernel.
pub struct ReducedHardwareImpl<H>(PhantomData<fn() -> H>);

#[allow(clippy::inline_always)]
impl<H: AcpiHost> AcpiInterface for ReducedHardwareImpl<H> {
    #[inline(always)]
    fn initialize_subsystem() -> Status {
        H::initialize_subsystem()
    }

    #[inline(always)]
    fn enable_subsystem(flags: u32) -> Status {
        H::enable_subsystem(flags)
    }

    #[inline(always)]
    fn initialize_objects(flags: u32) -> Status {
        H::initialize_objects(flags)
    }

    #[inline(always)]
    fn terminate() -> Status {
        H::terminate()
    }

    #[inline(always)]
    fn initialize_tables(initial_storage: *mut TableDesc, initial_table_count: u32, allow_resize: bool) -> Status {
        H::initialize_tables(initial_storage, initial_table_count, allow_resize)
    }

    #[inline(always)]
    fn reallocate_root_table() -> Status {
        H::reallocate_root_table()
    }

    #[inline(always)]
    fn load_tables() -> Status {
        H::load_tables()
    }

    #[inline(always)]
    fn get_table(signature: &TableSignature, instance: u32, out_table: &mut *mut TableHeader) -> Status {
        H::get_table(signature, instance, out_table)
    }

    #[inline(always)]
    fn get_table_by_index(index: u32, out_table: &mut *mut TableHeader) -> Status {
        H::get_table_by_index(index, out_table)
    }

    #[inline(always)]
    fn put_table(table: *mut TableHeader) {
        H::put_table(table);
    }

    #[inline(always)]
    fn install_interface(name: &CStr) -> Status {
        H::install_interface(name)
    }

    #[inline(always)]
    fn remove_interface(name: &CStr) -> Status {
        H::remove_interface(name)
    }

    #[inline(always)]
    fn update_interfaces(action: u8) -> Status {
        H::update_interfaces(action)
    }

    #[inline(always)]
    fn check_address_range(space_id: AddressSpaceId, address: PhysicalAddress, length: AcpiSize, warn: bool) -> u32 {
        H::check_address_range(space_id, address, length, warn)
    }

    #[inline(always)]
    fn format_exception(status: Status) -> *const c_char {
        H::format_exception(status)
    }

    fn enable() -> Status {
        const { stub_status(EntryPoint::Enable) }
    }

    fn disable() -> Status {
        const { stub_status(EntryPoint::Disable) }
    }

    fn enable_event(_event: u32, _flags: u32) -> Status {
        const { stub_status(EntryPoint::EnableEvent) }
    }

    fn acquire_global_lock(_timeout: u16, _handle: &mut u32) -> Status {
        const { stub_status(EntryPoint::AcquireGlobalLock) }
    }

    fn release_global_lock(_handle: u32) -> Status {
        const { stub_status(EntryPoint::ReleaseGlobalLock) }
    }

    fn any_gpe_status_set() -> u32 {
        const { stub_integer(EntryPoint::AnyGpeStatusSet) }
    }

    fn enter_sleep_state_s4bios() -> Status {
        const { stub_status(EntryPoint::EnterSleepStateS4bios) }
    }
}
