//! Database creation options.
//!
//! Model size (normal vs. large) and float word size are fixed when a file
//! is created and recorded as global attributes. When neither size is
//! requested explicitly, the `EXODUS_LARGE_MODEL` environment variable
//! decides.

use serde::{Deserialize, Serialize};

/// Environment variable consulted when no model size is requested.
pub const LARGE_MODEL_ENV: &str = "EXODUS_LARGE_MODEL";

/// Model size used when neither options nor the environment say otherwise.
pub const DEFAULT_LARGE_MODEL: bool = true;

/// Options applied when a database is created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOptions {
    /// Request large-model storage.
    pub large_model: bool,
    /// Request normal (32-bit offset) storage. Wins over `large_model`.
    pub normal_model: bool,
    /// Store floating point data as 8-byte reals.
    pub double_precision: bool,
}

impl CreateOptions {
    /// Decide the model size for a new file.
    pub fn resolve_large_model(&self) -> bool {
        if self.large_model && self.normal_model {
            log::warn!("conflicting model size specification (large and normal); using normal");
        }
        if self.normal_model {
            false
        } else if self.large_model {
            true
        } else {
            large_model_from_env()
        }
    }

    /// Float word size in bytes, as stored in the `floating_point_word_size` attribute.
    pub fn float_word_size(&self) -> i32 {
        if self.double_precision { 8 } else { 4 }
    }
}

/// Model size selected by [`LARGE_MODEL_ENV`], or the default when unset.
pub fn large_model_from_env() -> bool {
    parse_large_model(std::env::var(LARGE_MODEL_ENV).ok().as_deref())
}

/// Interpret a value of [`LARGE_MODEL_ENV`]: a leading `n`/`N` selects the
/// normal model, anything else the large one.
pub fn parse_large_model(value: Option<&str>) -> bool {
    match value {
        Some(v) if v.starts_with(['n', 'N']) => {
            log::info!("small model size selected via {LARGE_MODEL_ENV} environment variable");
            false
        }
        Some(_) => {
            log::info!("large model size selected via {LARGE_MODEL_ENV} environment variable");
            true
        }
        None => DEFAULT_LARGE_MODEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_values() {
        assert!(!parse_large_model(Some("no")));
        assert!(!parse_large_model(Some("N")));
        assert!(parse_large_model(Some("yes")));
        assert!(parse_large_model(Some("")));
        assert_eq!(parse_large_model(None), DEFAULT_LARGE_MODEL);
    }

    #[test]
    fn explicit_options_win() {
        let normal = CreateOptions {
            normal_model: true,
            ..Default::default()
        };
        assert!(!normal.resolve_large_model());
        let large = CreateOptions {
            large_model: true,
            ..Default::default()
        };
        assert!(large.resolve_large_model());
        let both = CreateOptions {
            large_model: true,
            normal_model: true,
            ..Default::default()
        };
        assert!(!both.resolve_large_model());
    }

    #[test]
    fn word_size() {
        assert_eq!(CreateOptions::default().float_word_size(), 4);
        let opts = CreateOptions {
            double_precision: true,
            ..Default::default()
        };
        assert_eq!(opts.float_word_size(), 8);
    }
}
