//! Registry of every entry point the interpreter expects from the host,
//! and the per-entry resolution of which implementation backs it.
//!
//! Two independent axes decide a binding:
//!
//! * **External interfaces** ([`Axis::External`]) are the interpreter's
//!   public API as called by the rest of the kernel. With ACPI built in
//!   they delegate to the kernel's implementation; without it each one is
//!   a stub returning its [`Sentinel`]. The hardware-dependent subset is
//!   additionally stubbed on reduced-hardware-only kernels.
//! * **Alternate prototypes** ([`Axis::Alternate`]) are OS services layer
//!   functions the kernel always declares and implements itself,
//!   regardless of any feature switch.
//!
//! ```text
//!              Unresolved
//!            /     |      \
//!  (acpi off or    |       (alternate subset,
//!   reduced hw)  (acpi on)   any features)
//!        |         |            |
//!      Stub     Delegate   AlternateDelegate
//! ```
//!
//! [`ResolutionTable::resolve`] walks the whole registry once and rejects
//! an entry bound twice or left unbound. [`ResolutionTable::BUILD`] does
//! this in a const context for the configuration being compiled.

use crate::config::Features;
use crate::error::ConfigError;
use crate::status::{ReturnShape, Sentinel};

/// Which OS services layer group an alternate-prototype entry belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OslGroup {
    /// Overridden for the in-kernel build.
    Kernel,
    /// Used by the AML debugger and disassembler.
    Debugger,
    /// Used by the table and file utilities.
    Utility,
}

/// The selection axis an entry point lives on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    External {
        /// What the stub returns.
        sentinel: Sentinel,
        /// Touches fixed ACPI hardware, so it is absent on
        /// reduced-hardware-only kernels.
        hardware: bool,
    },
    Alternate(OslGroup),
}

/// Static facts about one entry point.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EntryDescriptor {
    /// The exact symbol name the interpreter links against.
    pub name: &'static str,
    /// Shape of the return type in the entry's signature.
    pub returns: ReturnShape,
    pub axis: Axis,
}

/// The entry points this layer binds.
///
/// Covers the external interfaces the kernel calls (subsystem bring-up,
/// tables, OSI strings, fixed hardware) and the OS services functions the
/// kernel declares itself. Other interpreter functions are not bound here.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum EntryPoint {
    InitializeSubsystem,
    EnableSubsystem,
    InitializeObjects,
    Terminate,
    InitializeTables,
    ReallocateRootTable,
    LoadTables,
    GetTable,
    GetTableByIndex,
    PutTable,
    InstallInterface,
    RemoveInterface,
    UpdateInterfaces,
    CheckAddressRange,
    FormatException,
    Enable,
    Disable,
    EnableEvent,
    AcquireGlobalLock,
    ReleaseGlobalLock,
    AnyGpeStatusSet,
    EnterSleepStateS4bios,
    OsInitialize,
    OsTerminate,
    OsAllocate,
    OsAllocateZeroed,
    OsFree,
    OsAcquireObject,
    OsGetThreadId,
    OsCreateLock,
    OsReadable,
    OsWritable,
    OsInitializeDebugger,
    OsTerminateDebugger,
    OsRedirectOutput,
    OsGetTableByName,
    OsGetTableByIndex,
    OsGetTableByAddress,
    OsOpenDirectory,
    OsGetNextFilename,
    OsCloseDirectory,
}

impl EntryPoint {
    pub const COUNT: usize = Self::OsCloseDirectory as usize + 1;

    pub const ALL: [Self; Self::COUNT] = [
        Self::InitializeSubsystem,
        Self::EnableSubsystem,
        Self::InitializeObjects,
        Self::Terminate,
        Self::InitializeTables,
        Self::ReallocateRootTable,
        Self::LoadTables,
        Self::GetTable,
        Self::GetTableByIndex,
        Self::PutTable,
        Self::InstallInterface,
        Self::RemoveInterface,
        Self::UpdateInterfaces,
        Self::CheckAddressRange,
        Self::FormatException,
        Self::Enable,
        Self::Disable,
        Self::EnableEvent,
        Self::AcquireGlobalLock,
        Self::ReleaseGlobalLock,
        Self::AnyGpeStatusSet,
        Self::EnterSleepStateS4bios,
        Self::OsInitialize,
        Self::OsTerminate,
        Self::OsAllocate,
        Self::OsAllocateZeroed,
        Self::OsFree,
        Self::OsAcquireObject,
        Self::OsGetThreadId,
        Self::OsCreateLock,
        Self::OsReadable,
        Self::OsWritable,
        Self::OsInitializeDebugger,
        Self::OsTerminateDebugger,
        Self::OsRedirectOutput,
        Self::OsGetTableByName,
        Self::OsGetTableByIndex,
        Self::OsGetTableByAddress,
        Self::OsOpenDirectory,
        Self::OsGetNextFilename,
        Self::OsCloseDirectory,
    ];

    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub const fn descriptor(self) -> EntryDescriptor {
        use ReturnShape as R;
        use Sentinel as S;

        const fn external(name: &'static str, returns: ReturnShape, sentinel: Sentinel) -> EntryDescriptor {
            EntryDescriptor {
                name,
                returns,
                axis: Axis::External {
                    sentinel,
                    hardware: false,
                },
            }
        }

        const fn hardware(name: &'static str, returns: ReturnShape, sentinel: Sentinel) -> EntryDescriptor {
            EntryDescriptor {
                name,
                returns,
                axis: Axis::External {
                    sentinel,
                    hardware: true,
                },
            }
        }

        const fn alternate(name: &'static str, returns: ReturnShape, group: OslGroup) -> EntryDescriptor {
            EntryDescriptor {
                name,
                returns,
                axis: Axis::Alternate(group),
            }
        }

        match self {
            Self::InitializeSubsystem => external("AcpiInitializeSubsystem", R::Status, S::NotConfigured),
            Self::EnableSubsystem => external("AcpiEnableSubsystem", R::Status, S::NotConfigured),
            Self::InitializeObjects => external("AcpiInitializeObjects", R::Status, S::NotConfigured),
            Self::Terminate => external("AcpiTerminate", R::Status, S::NotConfigured),
            Self::InitializeTables => external("AcpiInitializeTables", R::Status, S::NotConfigured),
            Self::ReallocateRootTable => external("AcpiReallocateRootTable", R::Status, S::Ok),
            Self::LoadTables => external("AcpiLoadTables", R::Status, S::NotConfigured),
            Self::GetTable => external("AcpiGetTable", R::Status, S::NotConfigured),
            Self::GetTableByIndex => external("AcpiGetTableByIndex", R::Status, S::NotConfigured),
            Self::PutTable => external("AcpiPutTable", R::Unit, S::Void),
            Self::InstallInterface => external("AcpiInstallInterface", R::Status, S::NotConfigured),
            Self::RemoveInterface => external("AcpiRemoveInterface", R::Status, S::NotConfigured),
            Self::UpdateInterfaces => external("AcpiUpdateInterfaces", R::Status, S::NotConfigured),
            Self::CheckAddressRange => external("AcpiCheckAddressRange", R::Integer, S::ZeroU32),
            Self::FormatException => external("AcpiFormatException", R::Pointer, S::NullPointer),

            Self::Enable => hardware("AcpiEnable", R::Status, S::NotConfigured),
            Self::Disable => hardware("AcpiDisable", R::Status, S::NotConfigured),
            Self::EnableEvent => hardware("AcpiEnableEvent", R::Status, S::NotConfigured),
            Self::AcquireGlobalLock => hardware("AcpiAcquireGlobalLock", R::Status, S::NotConfigured),
            Self::ReleaseGlobalLock => hardware("AcpiReleaseGlobalLock", R::Status, S::NotConfigured),
            Self::AnyGpeStatusSet => hardware("AcpiAnyGpeStatusSet", R::Integer, S::ZeroU32),
            Self::EnterSleepStateS4bios => hardware("AcpiEnterSleepStateS4bios", R::Status, S::NotConfigured),

            Self::OsInitialize => alternate("AcpiOsInitialize", R::Status, OslGroup::Kernel),
            Self::OsTerminate => alternate("AcpiOsTerminate", R::Status, OslGroup::Kernel),
            Self::OsAllocate => alternate("AcpiOsAllocate", R::Pointer, OslGroup::Kernel),
            Self::OsAllocateZeroed => alternate("AcpiOsAllocateZeroed", R::Pointer, OslGroup::Kernel),
            Self::OsFree => alternate("AcpiOsFree", R::Unit, OslGroup::Kernel),
            Self::OsAcquireObject => alternate("AcpiOsAcquireObject", R::Pointer, OslGroup::Kernel),
            Self::OsGetThreadId => alternate("AcpiOsGetThreadId", R::Integer, OslGroup::Kernel),
            Self::OsCreateLock => alternate("AcpiOsCreateLock", R::Status, OslGroup::Kernel),

            Self::OsReadable => alternate("AcpiOsReadable", R::Integer, OslGroup::Debugger),
            Self::OsWritable => alternate("AcpiOsWritable", R::Integer, OslGroup::Debugger),
            Self::OsInitializeDebugger => alternate("AcpiOsInitializeDebugger", R::Status, OslGroup::Debugger),
            Self::OsTerminateDebugger => alternate("AcpiOsTerminateDebugger", R::Unit, OslGroup::Debugger),

            Self::OsRedirectOutput => alternate("AcpiOsRedirectOutput", R::Unit, OslGroup::Utility),
            Self::OsGetTableByName => alternate("AcpiOsGetTableByName", R::Status, OslGroup::Utility),
            Self::OsGetTableByIndex => alternate("AcpiOsGetTableByIndex", R::Status, OslGroup::Utility),
            Self::OsGetTableByAddress => alternate("AcpiOsGetTableByAddress", R::Status, OslGroup::Utility),
            Self::OsOpenDirectory => alternate("AcpiOsOpenDirectory", R::Pointer, OslGroup::Utility),
            Self::OsGetNextFilename => alternate("AcpiOsGetNextFilename", R::Pointer, OslGroup::Utility),
            Self::OsCloseDirectory => alternate("AcpiOsCloseDirectory", R::Unit, OslGroup::Utility),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.descriptor().name
    }

    #[must_use]
    pub const fn axis(self) -> Axis {
        self.descriptor().axis
    }

    /// The stub result, for entries on the external axis.
    #[must_use]
    pub const fn sentinel(self) -> Option<Sentinel> {
        match self.axis() {
            Axis::External { sentinel, .. } => Some(sentinel),
            Axis::Alternate(_) => None,
        }
    }

    /// The binding this entry takes under `features`.
    ///
    /// This is the only way out of [`Binding::Unresolved`]; it never
    /// yields `Unresolved` itself.
    #[must_use]
    pub const fn select(self, features: Features) -> Binding {
        match self.axis() {
            Axis::Alternate(_) => Binding::AlternateDelegate,
            Axis::External { sentinel, hardware } => {
                let policy = features.policy();
                if !features.acpi || (hardware && policy.reduced_hardware) {
                    Binding::Stub(sentinel)
                } else {
                    Binding::Delegate
                }
            }
        }
    }
}

/// Which implementation backs an entry point.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Binding {
    Unresolved,
    /// Synthesized body returning the sentinel, nothing else.
    Stub(Sentinel),
    /// The kernel's implementation, called directly.
    Delegate,
    /// The kernel's own prototype replaces the interpreter's declaration.
    AlternateDelegate,
}

impl Binding {
    /// Moves an unresolved entry to its terminal binding.
    ///
    /// # Errors
    /// [`ConfigError::DuplicateBinding`] if the entry is already bound.
    pub const fn resolve(self, entry: EntryPoint, features: Features) -> Result<Self, ConfigError> {
        match self {
            Self::Unresolved => Ok(entry.select(features)),
            Self::Stub(_) | Self::Delegate | Self::AlternateDelegate => {
                Err(ConfigError::DuplicateBinding(entry.name()))
            }
        }
    }

    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

/// The resolved binding of every entry point for one configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResolutionTable {
    features: Features,
    bindings: [Binding; EntryPoint::COUNT],
}

impl ResolutionTable {
    /// The table for the configuration being compiled.
    pub const BUILD: Self = match Self::resolve(Features::BUILD) {
        Ok(table) => table,
        Err(_) => panic!("ACPICA entry points do not resolve to exactly one implementation"),
    };

    /// Resolves every entry in [`EntryPoint::ALL`] under `features`.
    ///
    /// # Errors
    /// * [`ConfigError::SentinelShape`] if a stub result does not fit the
    ///   entry's return type.
    /// * [`ConfigError::DuplicateBinding`] if an entry is listed twice.
    /// * [`ConfigError::UnresolvedEntryPoint`] if an entry is missing.
    pub const fn resolve(features: Features) -> Result<Self, ConfigError> {
        Self::resolve_entries(&EntryPoint::ALL, features)
    }

    const fn resolve_entries(entries: &[EntryPoint], features: Features) -> Result<Self, ConfigError> {
        let mut bindings = [Binding::Unresolved; EntryPoint::COUNT];

        let mut i = 0;
        while i < entries.len() {
            let entry = entries[i];
            let descriptor = entry.descriptor();
            if let Axis::External { sentinel, .. } = descriptor.axis
                && !sentinel.shape().same(descriptor.returns)
            {
                return Err(ConfigError::SentinelShape(descriptor.name));
            }

            let slot = entry as usize;
            match bindings[slot].resolve(entry, features) {
                Ok(binding) => bindings[slot] = binding,
                Err(e) => return Err(e),
            }
            i += 1;
        }

        let mut slot = 0;
        while slot < EntryPoint::COUNT {
            if !bindings[slot].is_resolved() {
                return Err(ConfigError::UnresolvedEntryPoint(EntryPoint::ALL[slot].name()));
            }
            slot += 1;
        }

        Ok(Self { features, bindings })
    }

    #[must_use]
    pub const fn features(&self) -> Features {
        self.features
    }

    #[must_use]
    pub const fn binding(&self, entry: EntryPoint) -> Binding {
        self.bindings[entry as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryPoint, Binding)> + '_ {
        EntryPoint::ALL.iter().map(|&e| (e, self.binding(e)))
    }

    #[must_use]
    pub fn stubs(&self) -> usize {
        self.count(|b| matches!(b, Binding::Stub(_)))
    }

    #[must_use]
    pub fn delegates(&self) -> usize {
        self.count(|b| b == Binding::Delegate)
    }

    #[must_use]
    pub fn alternates(&self) -> usize {
        self.count(|b| b == Binding::AlternateDelegate)
    }

    fn count(&self, pred: impl Fn(Binding) -> bool) -> usize {
        self.bindings.iter().filter(|&&b| pred(b)).count()
    }
}

const _: ResolutionTable = ResolutionTable::BUILD;
