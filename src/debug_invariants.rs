//! Invariant checking for cached state.
//!
//! Caches in this crate keep buffers whose validity depends on flags set
//! during lookups. Those flags are easy to get subtly wrong, so every cache
//! can validate itself on demand, and lookups re-check after each mutation
//! in debug builds.

use crate::exodus_error::ExodusError;

/// Trait for validating cache invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation encountered.
    fn validate_invariants(&self) -> Result<(), ExodusError>;

    /// Panic on a violation in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "cache state");
    }
}

/// Run a fallible check and panic on error when invariant checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
