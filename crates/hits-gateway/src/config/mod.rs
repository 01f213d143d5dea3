//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use hits_core::error::{HitsError, Result};

pub use schema::{GatewaySection, HitsConfig, PreviewSection};

pub fn load_from_file(path: &str) -> Result<HitsConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| HitsError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

/// Like [`load_from_file`], but a missing file yields the built-in defaults.
pub fn load_or_default(path: &str) -> Result<HitsConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(%path, "config file not found, using defaults");
            Ok(HitsConfig::default())
        }
        Err(e) => Err(HitsError::Internal(format!("read config failed: {e}"))),
    }
}

pub fn load_from_str(s: &str) -> Result<HitsConfig> {
    let cfg: HitsConfig = serde_yaml::from_str(s)
        .map_err(|e| HitsError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
