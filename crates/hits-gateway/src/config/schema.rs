use std::time::Duration;

use serde::Deserialize;
use hits_core::error::{HitsError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HitsConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub preview: PreviewSection,
}

impl Default for HitsConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            preview: PreviewSection::default(),
        }
    }
}

impl HitsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HitsError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.preview.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(HitsError::BadRequest(
                "gateway.listen must be a valid SocketAddr".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreviewSection {
    /// How long a caller waits for the worker before getting a timeout badge.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Longest accepted identifier, in characters.
    #[serde(default = "default_max_urn_len")]
    pub max_urn_len: usize,
}

impl Default for PreviewSection {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_urn_len: default_max_urn_len(),
        }
    }
}

impl PreviewSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(HitsError::BadRequest(
                "preview.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if !(1..=2048).contains(&self.max_urn_len) {
            return Err(HitsError::BadRequest(
                "preview.max_urn_len must be between 1 and 2048".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_timeout_ms() -> u64 {
    10000
}
fn default_max_urn_len() -> usize {
    250
}
