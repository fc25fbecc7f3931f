//! Engine calibration loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use reckon_core::EngineConfig;

/// Load calibration from a TOML file, falling back to shipped defaults
/// when no path is given. Partial files override only the named knobs.
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_uses_defaults() {
        let cfg = load_engine_config(None).unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let cfg: EngineConfig = toml::from_str("reconcile_tolerance = 1.0").unwrap();
        assert_eq!(cfg.reconcile_tolerance, 1.0);
        assert_eq!(cfg.balance_coverage_min, 0.55);
    }
}
