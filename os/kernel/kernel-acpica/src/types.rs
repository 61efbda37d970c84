//! Binding of the interpreter's abstract primitives to host types.
//!
//! The interpreter stores these values inside its own structures, so a
//! binding has to match the host object bit for bit. A host states its
//! bindings once by implementing [`HostPrimitives`]; everything else in
//! the crate names them through the aliases below.
//!
//! Missing bindings fail to compile (the associated items have no
//! defaults). Bindings of the wrong size fail to compile as soon as
//! [`Bindings::CHECK`] is referenced for the host.

use crate::error::ConfigError;
use core::marker::PhantomData;

pub use core::mem::offset_of;

/// The host's concrete types for the interpreter's primitives.
pub trait HostPrimitives {
    /// `ACPI_CACHE_T`. Only ever handled through `*mut Self::Cache`.
    type Cache;

    /// `ACPI_SPINLOCK`. A lock handle, stored by value.
    type Spinlock: Copy;

    /// `ACPI_CPU_FLAGS`. The interrupt state returned when a spinlock is
    /// taken and handed back when it is released.
    type CpuFlags: Copy;

    /// `ACPI_UINTPTR_T`
    type UintPtr: Copy;

    /// `ACPI_MACHINE_WIDTH`, in bits.
    const MACHINE_WIDTH: u32;
}

pub type Cache<H> = <H as HostPrimitives>::Cache;
pub type Spinlock<H> = <H as HostPrimitives>::Spinlock;
pub type CpuFlags<H> = <H as HostPrimitives>::CpuFlags;
pub type UintPtr<H> = <H as HostPrimitives>::UintPtr;

/// Build-time layout check for a host's bindings.
pub struct Bindings<H>(PhantomData<H>);

impl<H: HostPrimitives> Bindings<H> {
    /// Evaluates [`check`] for `H`; referencing it fails the build when
    /// the bindings do not fit.
    pub const CHECK: () = match check::<H>() {
        Ok(()) => (),
        Err(_) => panic!("host primitive bindings do not match the interpreter's layout"),
    };
}

/// Verifies that `H`'s bindings fit the interpreter's storage.
///
/// The interpreter keeps pointers inside `ACPI_UINTPTR_T` and flags words
/// inside native integers, so every word-like binding must be exactly one
/// machine word, and the machine width must agree with it.
///
/// # Errors
/// The first binding found not to fit.
pub const fn check<H: HostPrimitives>() -> Result<(), ConfigError> {
    const WORD: usize = size_of::<usize>();

    if !matches!(H::MACHINE_WIDTH, 32 | 64) {
        return Err(ConfigError::MachineWidth(H::MACHINE_WIDTH));
    }

    let width = H::MACHINE_WIDTH as usize / 8;
    if width != WORD {
        return Err(ConfigError::LayoutMismatch {
            primitive: "ACPI_MACHINE_WIDTH",
            expected: WORD,
            found: width,
        });
    }

    let words = [
        ("ACPI_UINTPTR_T", size_of::<UintPtr<H>>()),
        ("ACPI_CPU_FLAGS", size_of::<CpuFlags<H>>()),
        ("ACPI_SPINLOCK", size_of::<Spinlock<H>>()),
    ];

    let mut i = 0;
    while i < words.len() {
        let (primitive, found) = words[i];
        if found != WORD {
            return Err(ConfigError::LayoutMismatch {
                primitive,
                expected: WORD,
                found,
            });
        }
        i += 1;
    }

    Ok(())
}

/// A spinlock field as the interpreter keeps it in its globals.
pub struct LockSlot<H: HostPrimitives> {
    handle: Option<Spinlock<H>>,
}

impl<H: HostPrimitives> Default for LockSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HostPrimitives> LockSlot<H> {
    #[must_use]
    pub const fn new() -> Self {
        let () = Bindings::<H>::CHECK;
        Self { handle: None }
    }

    pub fn store(&mut self, handle: Spinlock<H>) {
        self.handle = Some(handle);
    }

    #[must_use]
    pub const fn get(&self) -> Option<Spinlock<H>> {
        self.handle
    }

    pub fn take(&mut self) -> Option<Spinlock<H>> {
        self.handle.take()
    }
}

/// `ACPI_TO_INTEGER`: the address of a pointer as an integer.
#[inline]
#[must_use]
pub fn to_integer<T>(ptr: *const T) -> usize {
    ptr.addr()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Native;

    impl HostPrimitives for Native {
        type Cache = ();
        type Spinlock = *const u8;
        type CpuFlags = usize;
        type UintPtr = usize;
        const MACHINE_WIDTH: u32 = usize::BITS;
    }

    struct NarrowFlags;

    impl HostPrimitives for NarrowFlags {
        type Cache = ();
        type Spinlock = *const u8;
        type CpuFlags = u8;
        type UintPtr = usize;
        const MACHINE_WIDTH: u32 = usize::BITS;
    }

    struct OddWidth;

    impl HostPrimitives for OddWidth {
        type Cache = ();
        type Spinlock = *const u8;
        type CpuFlags = usize;
        type UintPtr = usize;
        const MACHINE_WIDTH: u32 = 48;
    }

    #[test]
    fn native_bindings_pass() {
        assert_eq!(check::<Native>(), Ok(()));
    }

    #[test]
    fn narrow_flags_word_is_rejected() {
        assert_eq!(
            check::<NarrowFlags>(),
            Err(ConfigError::LayoutMismatch {
                primitive: "ACPI_CPU_FLAGS",
                expected: size_of::<usize>(),
                found: 1,
            })
        );
    }

    #[test]
    fn unsupported_width_is_rejected() {
        assert_eq!(check::<OddWidth>(), Err(ConfigError::MachineWidth(48)));
    }

    #[test]
    fn lock_slot_round_trip() {
        let byte = 7u8;
        let handle: *const u8 = &raw const byte;

        let mut slot = LockSlot::<Native>::new();
        assert!(slot.get().is_none());
        slot.store(handle);
        assert_eq!(slot.get(), Some(handle));
        assert_eq!(slot.take(), Some(handle));
        assert!(slot.get().is_none());
    }

    #[test]
    fn to_integer_is_the_address() {
        let v = 0u64;
        let p = &raw const v;
        assert_eq!(to_integer(p), p as usize);
    }
}
