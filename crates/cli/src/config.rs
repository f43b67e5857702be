//! Conversion options file for `jsont convert --config`.
//!
//! ```toml
//! strict_records = true
//! max_depth = 64
//! ```
//!
//! Keys left out keep their defaults. `max_depth = 0` removes the nesting
//! bound, as `--max-depth 0` does. Command-line flags are applied on top.

use std::path::Path;

use jsont_core::ConvertOptions;

/// Read and parse an options TOML file from `path`.
///
/// Returns a human-readable error string on failure.
pub fn read_options(path: &Path) -> Result<ConvertOptions, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    let options: ConvertOptions = toml::from_str(&content)
        .map_err(|e| format!("could not parse '{}': {}", path.display(), e))?;
    Ok(apply_flags(options, false, options.max_depth))
}

/// Layer command-line flags over file (or default) options.
///
/// `--strict` only ever tightens; `--max-depth 0` removes the bound.
pub fn apply_flags(
    mut options: ConvertOptions,
    strict: bool,
    max_depth: Option<usize>,
) -> ConvertOptions {
    if strict {
        options.strict_records = true;
    }
    match max_depth {
        Some(0) => options.max_depth = None,
        Some(n) => options.max_depth = Some(n),
        None => {}
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsont_core::DEFAULT_MAX_DEPTH;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_options_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jsont.toml");
        fs::write(&path, "strict_records = true\n").unwrap();
        let options = read_options(&path).unwrap();
        assert!(options.strict_records);
        assert_eq!(options.max_depth, Some(DEFAULT_MAX_DEPTH));
    }

    #[test]
    fn test_read_options_zero_depth_removes_bound() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jsont.toml");
        fs::write(&path, "max_depth = 0\n").unwrap();
        assert_eq!(read_options(&path).unwrap().max_depth, None);

        fs::write(&path, "max_depth = 5\n").unwrap();
        assert_eq!(read_options(&path).unwrap().max_depth, Some(5));
    }

    #[test]
    fn test_read_options_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jsont.toml");
        fs::write(&path, "strictness = 1\n").unwrap();
        let err = read_options(&path).unwrap_err();
        assert!(err.starts_with("could not parse"), "{}", err);
    }

    #[test]
    fn test_read_options_missing_file() {
        let err = read_options(Path::new("/nonexistent/jsont.toml")).unwrap_err();
        assert!(err.starts_with("could not read"), "{}", err);
    }

    #[test]
    fn test_apply_flags() {
        let base = ConvertOptions::default();
        assert_eq!(apply_flags(base, false, None), base);
        assert!(apply_flags(base, true, None).strict_records);
        assert_eq!(apply_flags(base, false, Some(0)).max_depth, None);
        assert_eq!(apply_flags(base, false, Some(8)).max_depth, Some(8));

        let strict_file = base.strict_records(true);
        assert!(apply_flags(strict_file, false, None).strict_records);
    }
}
