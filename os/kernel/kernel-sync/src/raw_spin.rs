use crate::irq::{self, CpuFlags};
use core::hint::spin_loop;
use core::sync::atomic::{AtomicBool, Ordering};

/// Opaque handle to a [`RawSpin`] as handed to foreign code.
///
/// The handle is a plain pointer so it can live in C-layout storage.
pub type RawSpinHandle = *const RawSpin;

/// A payload-free spinlock.
///
/// Unlike a guard-based lock the caller pairs `lock`/`unlock` itself,
/// which is what C-style lock interfaces expect.
pub struct RawSpin {
    held: AtomicBool,
}

impl Default for RawSpin {
    fn default() -> Self {
        Self::new()
    }
}

impl RawSpin {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn lock(&self) {
        while self.held.swap(true, Ordering::Acquire) {
            while self.held.load(Ordering::Relaxed) {
                spin_loop();
            }
        }
    }

    #[inline]
    pub fn try_lock(&self) -> bool {
        !self.held.swap(true, Ordering::Acquire)
    }

    /// # Safety
    /// The caller must currently hold the lock.
    #[inline]
    pub unsafe fn unlock(&self) {
        self.held.store(false, Ordering::Release);
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.held.load(Ordering::Relaxed)
    }

    /// Disables local interrupts, then takes the lock.
    ///
    /// Returns the interrupt state to hand back to [`Self::unlock_irqrestore`].
    #[inline]
    pub fn lock_irqsave(&self) -> CpuFlags {
        let flags = irq::local_irq_save();
        self.lock();
        flags
    }

    /// Releases the lock, then restores the interrupt state saved by
    /// [`Self::lock_irqsave`].
    ///
    /// # Safety
    /// The caller must currently hold the lock, and `flags` must come from
    /// the matching `lock_irqsave` call.
    #[inline]
    pub unsafe fn unlock_irqrestore(&self, flags: CpuFlags) {
        unsafe { self.unlock() };
        irq::local_irq_restore(flags);
    }

    /// The handle foreign code stores for this lock.
    #[inline]
    #[must_use]
    pub const fn as_handle(&self) -> RawSpinHandle {
        core::ptr::from_ref(self)
    }

    /// Turns a handle back into a reference.
    ///
    /// # Safety
    /// `handle` must come from [`Self::as_handle`] on a lock that is still
    /// alive for `'a`.
    #[inline]
    #[must_use]
    pub const unsafe fn from_handle<'a>(handle: RawSpinHandle) -> &'a Self {
        unsafe { &*handle }
    }
}
