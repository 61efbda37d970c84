//! Local interrupt state.
//!
//! The state is carried around as the raw flags register image, one
//! machine word wide, so it can be stored by code that only knows it as
//! "an unsigned long".
//!
//! # Platform / Privilege
//!
//! Uses `cli/sti` and `pushfq/pop` and therefore targets `x86_64`. The
//! save/restore functions must run where `cli`/`sti` are legal (ring 0).

/// Saved `RFLAGS` image.
pub type CpuFlags = usize;

/// Interrupt Enable Flag (`IF`, bit 9).
const IF_MASK: CpuFlags = 1 << 9;

/// Returns the current `RFLAGS` value.
#[inline]
#[must_use]
pub fn read_flags() -> CpuFlags {
    let r: CpuFlags;
    unsafe { core::arch::asm!("pushfq; pop {}", out(reg) r, options(nostack, preserves_flags)) }
    r
}

/// Whether a saved flags word had interrupts enabled.
#[inline]
#[must_use]
pub const fn irqs_enabled(flags: CpuFlags) -> bool {
    flags & IF_MASK != 0
}

/// Snapshots the flags word and disables interrupts if they were on.
#[inline]
#[must_use]
pub fn local_irq_save() -> CpuFlags {
    let flags = read_flags();
    if irqs_enabled(flags) {
        unsafe { core::arch::asm!("cli", options(nomem, nostack, preserves_flags)) }
    }
    flags
}

/// Re-enables interrupts only if `flags` had them enabled.
#[inline]
pub fn local_irq_restore(flags: CpuFlags) {
    if irqs_enabled(flags) {
        unsafe { core::arch::asm!("sti", options(nomem, nostack, preserves_flags)) }
    }
}
