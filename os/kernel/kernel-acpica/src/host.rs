//! The kernel's bindings for the interpreter's primitives.

use crate::config::Features;
use crate::entry::{Binding, ResolutionTable};
use crate::types::{self, Bindings, HostPrimitives};
use kernel_sync::{CpuFlags, RawSpin, RawSpinHandle};
use log::{debug, info};

/// The kernel's object cache, known to the interpreter only by address.
#[repr(C)]
pub struct ObjectCache {
    _opaque: [u8; 0],
}

/// Primitive bindings of this kernel.
pub enum KernelPrimitives {}

impl HostPrimitives for KernelPrimitives {
    type Cache = ObjectCache;
    type Spinlock = RawSpinHandle;
    type CpuFlags = CpuFlags;
    type UintPtr = usize;
    const MACHINE_WIDTH: u32 = usize::BITS;
}

const _: () = Bindings::<KernelPrimitives>::CHECK;

/// `AcpiOsAcquireLock`: disables interrupts and takes the lock behind
/// `handle`.
///
/// # Safety
/// `handle` must come from [`RawSpin::as_handle`] on a lock that outlives
/// the matching [`release_lock`].
pub unsafe fn acquire_lock(handle: types::Spinlock<KernelPrimitives>) -> types::CpuFlags<KernelPrimitives> {
    let lock = unsafe { RawSpin::from_handle(handle) };
    lock.lock_irqsave()
}

/// `AcpiOsReleaseLock`
///
/// # Safety
/// The lock behind `handle` must be held by the caller, and `flags` must
/// be the value [`acquire_lock`] returned for it.
pub unsafe fn release_lock(handle: types::Spinlock<KernelPrimitives>, flags: types::CpuFlags<KernelPrimitives>) {
    let lock = unsafe { RawSpin::from_handle(handle) };
    unsafe { lock.unlock_irqrestore(flags) };
}

/// Logs how the interpreter's entry points were bound for `features`.
pub fn log_configuration(features: Features) {
    let table = match ResolutionTable::resolve(features) {
        Ok(table) => table,
        Err(e) => {
            log::error!("ACPI binding failed: {e}");
            return;
        }
    };

    info!(
        "ACPI {}: {} delegated, {} stubbed, {} host-declared (reduced hardware: {})",
        if features.acpi { "enabled" } else { "disabled" },
        table.delegates(),
        table.stubs(),
        table.alternates(),
        features.policy().reduced_hardware,
    );

    for (entry, binding) in table.iter() {
        if let Binding::Stub(sentinel) = binding {
            debug!("{} stubbed, returns {sentinel:?}", entry.name());
        }
    }
}
