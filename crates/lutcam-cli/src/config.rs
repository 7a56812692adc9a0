//! Optional YAML settings file.
//!
//! ```yaml
//! mode: color          # monochrome | color
//! quantize: round      # truncate | round
//! parallel: true
//! yield_every: 200
//! parse: tolerant      # tolerant | strict
//! threads: 4
//! ```
//!
//! Command-line flags override anything set here.

use anyhow::{Context, Result};
use lutcam_ops::FilterOptions;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings loaded from `--config`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Filter defaults
    #[serde(flatten)]
    pub filter: FilterOptions,
    /// Worker threads (0 = auto)
    pub threads: usize,
}

impl CliConfig {
    /// Reads and parses a YAML settings file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parses YAML settings. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lutcam_lut::ParseMode;
    use lutcam_ops::{OutputMode, Quantize};

    #[test]
    fn test_flat_keys() {
        let cfg = CliConfig::from_yaml("mode: color\nquantize: round\nthreads: 3\nparse: strict\n").unwrap();
        assert_eq!(cfg.filter.mode, OutputMode::Color);
        assert_eq!(cfg.filter.quantize, Quantize::Round);
        assert_eq!(cfg.filter.parse, ParseMode::Strict);
        assert_eq!(cfg.threads, 3);
    }

    #[test]
    fn test_empty_is_default() {
        let cfg = CliConfig::from_yaml("").unwrap();
        assert_eq!(cfg.filter, FilterOptions::default());
        assert_eq!(cfg.threads, 0);
    }

    #[test]
    fn test_missing_file() {
        assert!(CliConfig::from_file(Path::new("/no/such/lutcam.yaml")).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lutcam.yaml");
        fs::write(&path, "parallel: true\nyield_every: 10\n").unwrap();
        let cfg = CliConfig::from_file(&path).unwrap();
        assert!(cfg.filter.parallel);
        assert_eq!(cfg.filter.yield_every, 10);
    }
}
