use kernel_acpica::abi::{AcpiSize, AddressSpaceId, PhysicalAddress, TableDesc, TableHeader, TableSignature};
use kernel_acpica::entry::Axis;
use kernel_acpica::status::ReturnShape;
use kernel_acpica::{
    AcpiHost, AcpiInterface, Active, Binding, EntryPoint, Features, HostDelegateImpl, ReducedHardwareImpl,
    ResolutionTable, Sentinel, Status, StubImpl,
};
use std::cell::RefCell;
use std::ffi::{CStr, c_char};
use std::ptr;

type Call = (&'static str, Vec<u64>);

thread_local! {
    static CALLS: RefCell<Vec<Call>> = const { RefCell::new(Vec::new()) };
}

fn record(entry: EntryPoint, args: &[u64]) {
    CALLS.with(|c| c.borrow_mut().push((entry.name(), args.to_vec())));
}

fn take_calls() -> Vec<Call> {
    CALLS.with(|c| c.borrow_mut().drain(..).collect())
}

const HOST_NAME: &CStr = c"recording host";
const HOST_INTEGER: u32 = 0xA5;
const HOST_GLOBAL_LOCK: u32 = 7;
const INTERFACE: &CStr = c"Module Device";

fn host_table() -> *mut TableHeader {
    ptr::without_provenance_mut(0x1000)
}

/// A distinct status per entry so forwarded results can be told apart.
fn host_status(entry: EntryPoint) -> Status {
    Status::from_bits(0x3000 | entry as u32)
}

/// Kernel implementation that records every call and its arguments.
struct RecordingHost;

impl AcpiHost for RecordingHost {
    fn initialize_subsystem() -> Status {
        record(EntryPoint::InitializeSubsystem, &[]);
        host_status(EntryPoint::InitializeSubsystem)
    }

    fn enable_subsystem(flags: u32) -> Status {
        record(EntryPoint::EnableSubsystem, &[flags.into()]);
        host_status(EntryPoint::EnableSubsystem)
    }

    fn initialize_objects(flags: u32) -> Status {
        record(EntryPoint::InitializeObjects, &[flags.into()]);
        host_status(EntryPoint::InitializeObjects)
    }

    fn terminate() -> Status {
        record(EntryPoint::Terminate, &[]);
        host_status(EntryPoint::Terminate)
    }

    fn initialize_tables(initial_storage: *mut TableDesc, initial_table_count: u32, allow_resize: bool) -> Status {
        record(
            EntryPoint::InitializeTables,
            &[initial_storage.addr() as u64, initial_table_count.into(), allow_resize.into()],
        );
        host_status(EntryPoint::InitializeTables)
    }

    fn reallocate_root_table() -> Status {
        record(EntryPoint::ReallocateRootTable, &[]);
        host_status(EntryPoint::ReallocateRootTable)
    }

    fn load_tables() -> Status {
        record(EntryPoint::LoadTables, &[]);
        host_status(EntryPoint::LoadTables)
    }

    fn get_table(signature: &TableSignature, instance: u32, out_table: &mut *mut TableHeader) -> Status {
        record(
            EntryPoint::GetTable,
            &[u32::from_le_bytes(*signature).into(), instance.into()],
        );
        *out_table = host_table();
        host_status(EntryPoint::GetTable)
    }

    fn get_table_by_index(index: u32, out_table: &mut *mut TableHeader) -> Status {
        record(EntryPoint::GetTableByIndex, &[index.into()]);
        *out_table = host_table();
        host_status(EntryPoint::GetTableByIndex)
    }

    fn put_table(table: *mut TableHeader) {
        record(EntryPoint::PutTable, &[table.addr() as u64]);
    }

    fn install_interface(name: &CStr) -> Status {
        record(EntryPoint::InstallInterface, &[name.count_bytes() as u64]);
        host_status(EntryPoint::InstallInterface)
    }

    fn remove_interface(name: &CStr) -> Status {
        record(EntryPoint::RemoveInterface, &[name.count_bytes() as u64]);
        host_status(EntryPoint::RemoveInterface)
    }

    fn update_interfaces(action: u8) -> Status {
        record(EntryPoint::UpdateInterfaces, &[action.into()]);
        host_status(EntryPoint::UpdateInterfaces)
    }

    fn check_address_range(space_id: AddressSpaceId, address: PhysicalAddress, length: AcpiSize, warn: bool) -> u32 {
        record(
            EntryPoint::CheckAddressRange,
            &[space_id.into(), address, length as u64, warn.into()],
        );
        HOST_INTEGER
    }

    fn format_exception(status: Status) -> *const c_char {
        record(EntryPoint::FormatException, &[status.into_bits().into()]);
        HOST_NAME.as_ptr()
    }

    fn enable() -> Status {
        record(EntryPoint::Enable, &[]);
        host_status(EntryPoint::Enable)
    }

    fn disable() -> Status {
        record(EntryPoint::Disable, &[]);
        host_status(EntryPoint::Disable)
    }

    fn enable_event(event: u32, flags: u32) -> Status {
        record(EntryPoint::EnableEvent, &[event.into(), flags.into()]);
        host_status(EntryPoint::EnableEvent)
    }

    fn acquire_global_lock(timeout: u16, handle: &mut u32) -> Status {
        record(EntryPoint::AcquireGlobalLock, &[timeout.into(), (*handle).into()]);
        *handle = HOST_GLOBAL_LOCK;
        host_status(EntryPoint::AcquireGlobalLock)
    }

    fn release_global_lock(handle: u32) -> Status {
        record(EntryPoint::ReleaseGlobalLock, &[handle.into()]);
        host_status(EntryPoint::ReleaseGlobalLock)
    }

    fn any_gpe_status_set() -> u32 {
        record(EntryPoint::AnyGpeStatusSet, &[]);
        HOST_INTEGER
    }

    fn enter_sleep_state_s4bios() -> Status {
        record(EntryPoint::EnterSleepStateS4bios, &[]);
        host_status(EntryPoint::EnterSleepStateS4bios)
    }
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Status(Status),
    Unit,
    Integer(u32),
    Pointer(*const c_char),
}

/// Calls `entry` through `I` with fixed arguments.
fn probe<I: AcpiInterface>(entry: EntryPoint) -> Outcome {
    let mut table = ptr::null_mut();
    let mut handle = 0;
    match entry {
        EntryPoint::InitializeSubsystem => Outcome::Status(I::initialize_subsystem()),
        EntryPoint::EnableSubsystem => Outcome::Status(I::enable_subsystem(0x11)),
        EntryPoint::InitializeObjects => Outcome::Status(I::initialize_objects(0x22)),
        EntryPoint::Terminate => Outcome::Status(I::terminate()),
        EntryPoint::InitializeTables => {
            Outcome::Status(I::initialize_tables(ptr::without_provenance_mut(0x40), 16, true))
        }
        EntryPoint::ReallocateRootTable => Outcome::Status(I::reallocate_root_table()),
        EntryPoint::LoadTables => Outcome::Status(I::load_tables()),
        EntryPoint::GetTable => Outcome::Status(I::get_table(b"FACP", 1, &mut table)),
        EntryPoint::GetTableByIndex => Outcome::Status(I::get_table_by_index(3, &mut table)),
        EntryPoint::PutTable => {
            I::put_table(ptr::without_provenance_mut(0x2000));
            Outcome::Unit
        }
        EntryPoint::InstallInterface => Outcome::Status(I::install_interface(INTERFACE)),
        EntryPoint::RemoveInterface => Outcome::Status(I::remove_interface(INTERFACE)),
        EntryPoint::UpdateInterfaces => Outcome::Status(I::update_interfaces(0x06)),
        EntryPoint::CheckAddressRange => Outcome::Integer(I::check_address_range(1, 0xFED0_0000, 0x400, true)),
        EntryPoint::FormatException => Outcome::Pointer(I::format_exception(Status::NO_MEMORY)),
        EntryPoint::Enable => Outcome::Status(I::enable()),
        EntryPoint::Disable => Outcome::Status(I::disable()),
        EntryPoint::EnableEvent => Outcome::Status(I::enable_event(2, 0)),
        EntryPoint::AcquireGlobalLock => Outcome::Status(I::acquire_global_lock(0xFFFF, &mut handle)),
        EntryPoint::ReleaseGlobalLock => Outcome::Status(I::release_global_lock(9)),
        EntryPoint::AnyGpeStatusSet => Outcome::Integer(I::any_gpe_status_set()),
        EntryPoint::EnterSleepStateS4bios => Outcome::Status(I::enter_sleep_state_s4bios()),
        other => panic!("{} is not an external interface", other.name()),
    }
}

fn probe_args(entry: EntryPoint) -> Vec<u64> {
    match entry {
        EntryPoint::EnableSubsystem => vec![0x11],
        EntryPoint::InitializeObjects => vec![0x22],
        EntryPoint::InitializeTables => vec![0x40, 16, 1],
        EntryPoint::GetTable => vec![u32::from_le_bytes(*b"FACP").into(), 1],
        EntryPoint::GetTableByIndex => vec![3],
        EntryPoint::PutTable => vec![0x2000],
        EntryPoint::InstallInterface | EntryPoint::RemoveInterface => vec![INTERFACE.count_bytes() as u64],
        EntryPoint::UpdateInterfaces => vec![0x06],
        EntryPoint::CheckAddressRange => vec![1, 0xFED0_0000, 0x400, 1],
        EntryPoint::FormatException => vec![Status::NO_MEMORY.into_bits().into()],
        EntryPoint::EnableEvent => vec![2, 0],
        EntryPoint::AcquireGlobalLock => vec![0xFFFF, 0],
        EntryPoint::ReleaseGlobalLock => vec![9],
        _ => vec![],
    }
}

fn host_outcome(entry: EntryPoint) -> Outcome {
    match entry.descriptor().returns {
        ReturnShape::Status => Outcome::Status(host_status(entry)),
        ReturnShape::Unit => Outcome::Unit,
        ReturnShape::Integer => Outcome::Integer(HOST_INTEGER),
        ReturnShape::Pointer => Outcome::Pointer(HOST_NAME.as_ptr()),
    }
}

fn sentinel_outcome(sentinel: Sentinel) -> Outcome {
    match sentinel {
        Sentinel::NotConfigured => Outcome::Status(Status::NOT_CONFIGURED),
        Sentinel::Ok => Outcome::Status(Status::OK),
        Sentinel::Void => Outcome::Unit,
        Sentinel::ZeroU32 => Outcome::Integer(0),
        Sentinel::NullPointer => Outcome::Pointer(ptr::null()),
    }
}

fn external_entries() -> impl Iterator<Item = EntryPoint> {
    EntryPoint::ALL
        .into_iter()
        .filter(|e| matches!(e.axis(), Axis::External { .. }))
}

/// Every external entry of `I` behaves as the resolution table for
/// `features` says it should.
fn assert_implements<I: AcpiInterface>(features: Features) {
    let table = ResolutionTable::resolve(features).unwrap();
    take_calls();

    for entry in external_entries() {
        let outcome = probe::<I>(entry);
        let calls = take_calls();
        match table.binding(entry) {
            Binding::Stub(sentinel) => {
                assert!(calls.is_empty(), "{} reached the host", entry.name());
                assert_eq!(outcome, sentinel_outcome(sentinel), "{}", entry.name());
            }
            Binding::Delegate => {
                assert_eq!(calls, [(entry.name(), probe_args(entry))]);
                assert_eq!(outcome, host_outcome(entry), "{}", entry.name());
            }
            other => panic!("{} resolved to {other:?}", entry.name()),
        }
    }
}

#[test]
fn stub_impl_follows_disabled_resolution() {
    assert_implements::<StubImpl<RecordingHost>>(Features::DISABLED);
}

#[test]
fn delegate_impl_follows_enabled_resolution() {
    assert_implements::<HostDelegateImpl<RecordingHost>>(Features::ENABLED);
}

#[test]
fn reduced_hardware_impl_follows_its_resolution() {
    assert_implements::<ReducedHardwareImpl<RecordingHost>>(Features::ENABLED.with_reduced_hardware());
}

#[test]
fn active_follows_build_features() {
    assert_implements::<Active<RecordingHost>>(Features::BUILD);
}

#[test]
fn every_entry_binds_once_in_each_configuration() {
    let disabled = ResolutionTable::resolve(Features::DISABLED).unwrap();
    let enabled = ResolutionTable::resolve(Features::ENABLED).unwrap();

    assert_eq!(disabled.stubs(), 22);
    assert_eq!(disabled.delegates(), 0);
    assert_eq!(enabled.stubs(), 0);
    assert_eq!(enabled.delegates(), 22);
    for table in [disabled, enabled] {
        assert_eq!(table.alternates(), 19);
        assert_eq!(table.iter().count(), EntryPoint::COUNT);
    }
}

#[test]
fn reduced_hardware_stubs_only_fixed_hardware() {
    let table = ResolutionTable::resolve(Features::ENABLED.with_reduced_hardware()).unwrap();
    let stubbed: Vec<_> = table
        .iter()
        .filter(|(_, b)| matches!(b, Binding::Stub(_)))
        .map(|(e, _)| e.name())
        .collect();
    assert_eq!(
        stubbed,
        [
            "AcpiEnable",
            "AcpiDisable",
            "AcpiEnableEvent",
            "AcpiAcquireGlobalLock",
            "AcpiReleaseGlobalLock",
            "AcpiAnyGpeStatusSet",
            "AcpiEnterSleepStateS4bios",
        ]
    );
}

#[test]
fn initialize_subsystem_without_acpi() {
    take_calls();
    assert_eq!(
        StubImpl::<RecordingHost>::initialize_subsystem(),
        Status::NOT_CONFIGURED
    );
    assert!(take_calls().is_empty());
}

#[test]
fn initialize_subsystem_with_acpi() {
    take_calls();
    assert_eq!(
        HostDelegateImpl::<RecordingHost>::initialize_subsystem(),
        host_status(EntryPoint::InitializeSubsystem)
    );
    assert_eq!(take_calls(), [("AcpiInitializeSubsystem", vec![])]);
}

#[test]
fn delegated_out_parameters_come_from_the_host() {
    let mut table = ptr::null_mut();
    let mut handle = 0;
    HostDelegateImpl::<RecordingHost>::get_table(b"DSDT", 0, &mut table);
    HostDelegateImpl::<RecordingHost>::acquire_global_lock(0, &mut handle);
    assert_eq!(table, host_table());
    assert_eq!(handle, HOST_GLOBAL_LOCK);

    handle = 0;
    ReducedHardwareImpl::<RecordingHost>::acquire_global_lock(0, &mut handle);
    assert_eq!(handle, 0);
    take_calls();
}
