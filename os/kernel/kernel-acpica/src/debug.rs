//! Interpreter debug verbosity (`ACPI_LV_*`).

use crate::config::Features;
use bitfield_struct::bitfield;

/// The interpreter's debug level mask.
///
/// Bits 0–4 select exception reports, the rest enable trace output of
/// increasing verbosity.
#[bitfield(u32, order = Lsb, default = false)]
#[derive(PartialEq, Eq)]
pub struct DebugLevel {
    pub init: bool,         // 0
    pub debug_object: bool, // 1
    pub info: bool,         // 2
    pub repair: bool,       // 3, repairs applied to method return values
    pub trace_point: bool,  // 4

    pub init_names: bool,    // 5
    pub parse: bool,         // 6
    pub load: bool,          // 7
    pub dispatch: bool,      // 8
    pub exec: bool,          // 9
    pub names: bool,         // 10
    pub opregion: bool,      // 11
    pub bfield: bool,        // 12
    pub tables: bool,        // 13
    pub values: bool,        // 14
    pub objects: bool,       // 15
    pub resources: bool,     // 16
    pub user_requests: bool, // 17
    pub package: bool,       // 18
    pub evaluation: bool,    // 19, method evaluation entry and exit

    pub allocations: bool,   // 20
    pub functions: bool,     // 21
    pub optimizations: bool, // 22
    pub parse_trees: bool,   // 23

    pub mutex: bool,      // 24
    pub threads: bool,    // 25
    pub io: bool,         // 26
    pub interrupts: bool, // 27

    pub aml_disassemble: bool, // 28
    pub verbose_info: bool,    // 29
    pub full_tables: bool,     // 30
    pub events: bool,          // 31
}

impl DebugLevel {
    /// `ACPI_LV_ALL_EXCEPTIONS`
    pub const ALL_EXCEPTIONS: Self = Self::from_bits(0x0000_001F);

    /// The portable library's own default: init, debug-object, evaluation
    /// and repair output.
    pub const UPSTREAM_DEBUG_DEFAULT: Self = Self::new()
        .with_init(true)
        .with_debug_object(true)
        .with_evaluation(true)
        .with_repair(true);

    /// The kernel's default: info and repair output only.
    pub const DEBUG_DEFAULT: Self = Self::new().with_info(true).with_repair(true);

    /// Whether any bit of `requested` is enabled in `self`.
    #[must_use]
    pub const fn enables(self, requested: Self) -> bool {
        self.into_bits() & requested.into_bits() != 0
    }
}

impl Default for DebugLevel {
    fn default() -> Self {
        Self::DEBUG_DEFAULT
    }
}

/// Whether a debug print at `requested` level is emitted under `current`.
///
/// Always `false` when debug output is compiled out.
#[must_use]
pub const fn should_print(features: Features, current: DebugLevel, requested: DebugLevel) -> bool {
    features.policy().debug_output && current.enables(requested)
}

/// Emits a debug print through the `log` facade if [`should_print`] allows it.
pub fn trace(features: Features, current: DebugLevel, requested: DebugLevel, args: core::fmt::Arguments<'_>) {
    if should_print(features, current, requested) {
        log::debug!(target: crate::messages::TARGET, "{args}");
    }
}
