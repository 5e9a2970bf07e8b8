pub use verification::*;

mod verification;

/// The kind of verification a security module performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleType {
    /// Module kind is unknown or unspecified
    Unused,
    /// Accepts every message without inspection
    Null,
    /// Optimistic verification behind a fraud window
    Optimistic,
}
