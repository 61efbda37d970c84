//! # ACPICA Host Binding
//!
//! This crate adapts the portable ACPICA interpreter core to the kernel. It
//! does not implement any ACPI semantics itself; it decides, entirely at
//! compile time, which host types and which host functions the interpreter
//! is wired to.
//!
//! ## Overview
//!
//! The interpreter is written against a small set of abstract primitives
//! and a large set of named entry points. For a given kernel configuration
//! each primitive must name exactly one host type, and each entry point
//! must resolve to exactly one implementation: the kernel's own function,
//! or a stub that returns a fixed result.
//!
//! ## Core Components
//!
//! ### Primitive Types ([`types`])
//! * [`HostPrimitives`] names the cache, spinlock, CPU flags and pointer
//!   integer types, plus the machine width
//! * [`Bindings::CHECK`] fails the build if a binding has the wrong size
//! * [`host::KernelPrimitives`] is the kernel's binding, backed by
//!   `kernel-sync`
//!
//! ### Interface Selection ([`interface`], [`entry`], [`osl`])
//! * [`AcpiInterface`] is the external API callers use, through [`Active`]
//! * [`StubImpl`] answers every call with its entry's [`Sentinel`]
//! * [`HostDelegateImpl`] forwards every call to the kernel's [`AcpiHost`]
//! * [`ReducedHardwareImpl`] stubs only the fixed-hardware functions
//! * [`OsServices`] covers the functions whose prototype the kernel always
//!   supplies itself
//! * [`ResolutionTable`] records the binding of every entry point and is
//!   checked in a const context for the configuration being compiled
//!
//! ### Messages ([`messages`], [`debug`])
//! * Each [`MessageClass`] maps to one `log` level and one literal prefix
//! * [`DebugLevel::DEBUG_DEFAULT`] is the kernel's default verbosity
//!
//! ## Feature System
//!
//! | Feature            | Effect                                             |
//! |--------------------|----------------------------------------------------|
//! | `acpi` (default)   | external interfaces delegate to the kernel         |
//! | `reduced-hardware` | fixed-hardware interfaces are stubbed              |
//! | `debugger`         | AML debugger support in the interpreter policy     |
//! | `debug`            | mutex debugging in the interpreter policy          |
//!
//! Without `acpi` every external interface is a stub and the kernel does
//! not have to implement [`AcpiHost`] at all.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kernel_acpica::{AcpiInterface, Active, Status};
//!
//! let status = Active::<Kernel>::initialize_subsystem();
//! if status == Status::NOT_CONFIGURED {
//!     log::info!("booting without ACPI");
//! }
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod abi;
pub mod config;
pub mod debug;
pub mod entry;
mod error;
pub mod host;
pub mod interface;
pub mod messages;
pub mod osl;
pub mod status;
pub mod types;

pub use config::{Features, Policy};
pub use debug::DebugLevel;
pub use entry::{Binding, EntryPoint, ResolutionTable};
pub use error::ConfigError;
pub use interface::{Active, AcpiHost, AcpiInterface, HostDelegateImpl, ReducedHardwareImpl, StubImpl};
pub use messages::{MessageClass, MessagePrefix};
pub use osl::OsServices;
pub use status::{Sentinel, Status};
pub use types::{Bindings, HostPrimitives, LockSlot};

/// Reports an interpreter message at the caller's location.
///
/// ```rust,ignore
/// acpi_report!(BiosError, "invalid _PRT entry {}", index);
/// ```
#[macro_export]
macro_rules! acpi_report {
    ($class:ident, $($arg:tt)*) => {
        $crate::messages::report(
            $crate::Features::BUILD,
            $crate::MessageClass::$class,
            core::module_path!(),
            core::line!(),
            core::format_args!($($arg)*),
        )
    };
}
