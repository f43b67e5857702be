//! Converter configuration.

use serde::{Deserialize, Serialize};

/// Default bound on nesting depth during a conversion.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options fixed when a [`Registry`](crate::Registry) is built.
///
/// Deserializable so callers can keep them in a config file:
///
/// ```toml
/// strict_records = true
/// max_depth = 64
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Treat every record as strict, whatever its descriptor says.
    pub strict_records: bool,
    /// Maximum nesting depth; `None` removes the bound.
    pub max_depth: Option<usize>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            strict_records: false,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ConvertOptions {
    pub fn strict_records(mut self, strict: bool) -> Self {
        self.strict_records = strict;
        self
    }

    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_take_defaults() {
        let opts: ConvertOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(opts, ConvertOptions::default());
        assert_eq!(opts.max_depth, Some(DEFAULT_MAX_DEPTH));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let result: Result<ConvertOptions, _> =
            serde_json::from_value(json!({"strict": true}));
        assert!(result.is_err());
    }

    #[test]
    fn test_builders() {
        let opts = ConvertOptions::default()
            .strict_records(true)
            .max_depth(None);
        assert!(opts.strict_records);
        assert_eq!(opts.max_depth, None);
    }
}
