//! Mapping of the interpreter's message classes onto kernel log levels.
//!
//! Each class has exactly one level and one literal prefix; the prefix is
//! printed verbatim in front of the message. Reports go through the `log`
//! facade under the [`TARGET`] target, so whatever logger the kernel
//! installed picks them up.

use crate::config::Features;
use crate::status::Status;
use core::fmt;
use log::Level;

/// Log target of every interpreter report.
pub const TARGET: &str = "acpi";

/// Interpreter release reported in message suffixes (`ACPI_CA_VERSION`).
pub const CA_VERSION: u32 = 0x2023_0331;

/// The interpreter's message classes (`ACPI_MSG_*`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MessageClass {
    Error,
    Exception,
    Warning,
    Info,
    /// Firmware bug detected in an ACPI table or AML.
    BiosError,
    /// Questionable firmware behavior that can be worked around.
    BiosWarning,
}

/// How a message class is printed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MessagePrefix {
    pub level: Level,
    pub prefix: &'static str,
}

impl MessageClass {
    pub const ALL: [Self; 6] = [
        Self::Error,
        Self::Exception,
        Self::Warning,
        Self::Info,
        Self::BiosError,
        Self::BiosWarning,
    ];

    #[must_use]
    pub const fn prefix(self) -> MessagePrefix {
        let (level, prefix) = match self {
            Self::Error => (Level::Error, ""),
            Self::Exception => (Level::Error, "@FATAL"),
            Self::Warning => (Level::Warn, ""),
            Self::Info => (Level::Info, ""),
            Self::BiosError => (Level::Error, "ACPI BIOS Error (bug): "),
            Self::BiosWarning => (Level::Warn, "ACPI BIOS Warning (bug): "),
        };
        MessagePrefix { level, prefix }
    }

    /// Whether the class reports a firmware defect.
    #[must_use]
    pub const fn is_bios(self) -> bool {
        matches!(self, Self::BiosError | Self::BiosWarning)
    }
}

/// Emits one interpreter report.
///
/// `module` and `line` identify the interpreter source location and end
/// up in the `(version/module-line)` suffix. Nothing is emitted when the
/// kernel is built without ACPI.
pub fn report(features: Features, class: MessageClass, module: &str, line: u32, args: fmt::Arguments<'_>) {
    if !features.policy().error_messages {
        return;
    }

    let MessagePrefix { level, prefix } = class.prefix();
    log::log!(
        target: TARGET,
        level,
        "{prefix}{args} ({CA_VERSION:08X}/{module}-{line})"
    );
}

/// Emits an [`MessageClass::Exception`] report naming `status`.
pub fn report_exception(features: Features, status: Status, module: &str, line: u32, args: fmt::Arguments<'_>) {
    report(
        features,
        MessageClass::Exception,
        module,
        line,
        format_args!("{status}, {args}"),
    );
}
