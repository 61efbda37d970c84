//! # Kernel synchronization primitives
//!
//! The low-level lock and interrupt-state types the rest of the kernel
//! (and foreign code hosted by it, such as ACPICA) builds on:
//!
//! * [`RawSpin`]: a test-and-test-and-set spinlock without a payload,
//!   addressed by foreign code through a [`RawSpinHandle`].
//! * [`CpuFlags`]: the saved interrupt-state word returned by
//!   [`RawSpin::lock_irqsave`] and [`irq::local_irq_save`].

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod irq;
mod raw_spin;

pub use irq::CpuFlags;
pub use raw_spin::{RawSpin, RawSpinHandle};
