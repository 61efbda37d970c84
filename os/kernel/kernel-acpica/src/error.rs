/// A mismatch between the interpreter's host contract and this binding.
///
/// These are fatal: the layer raises them while resolving its tables in a
/// const context, so a build that would hit one does not compile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("entry point {0} has no implementation")]
    UnresolvedEntryPoint(&'static str),
    #[error("entry point {0} is bound more than once")]
    DuplicateBinding(&'static str),
    #[error("stub result of {0} does not fit its return type")]
    SentinelShape(&'static str),
    #[error("{primitive} is {found} bytes, the interpreter expects {expected}")]
    LayoutMismatch {
        primitive: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("machine width of {0} bits is not supported")]
    MachineWidth(u32),
}
