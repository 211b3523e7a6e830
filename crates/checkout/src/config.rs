//! Checkout configuration.
//!
//! Loaded from the JSON file named by `FURIMA_CHECKOUT_CONFIG`; every section
//! is optional and falls back to the Japanese defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use furima_core::DomainError;

use crate::messages::{MessageCatalog, MessageOverride};
use crate::prefecture::{PrefectureCatalog, PrefectureTable};
use crate::validation::{AddressValidator, ValidationPolicy};

/// Environment variable holding the configuration file path.
pub const CONFIG_ENV_VAR: &str = "FURIMA_CHECKOUT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub policy: ValidationPolicy,
    /// Replaces the built-in Japanese prefecture table when set.
    pub prefectures: Option<PrefectureTable>,
    pub messages: Vec<MessageOverride>,
}

impl CheckoutConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `FURIMA_CHECKOUT_CONFIG`, or defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                tracing::info!(path = ?path, "loading checkout config");
                Self::from_path(path)
            }
            None => {
                tracing::debug!("{CONFIG_ENV_VAR} not set; using default checkout config");
                Ok(Self::default())
            }
        }
    }

    pub fn prefecture_catalog(&self) -> Result<PrefectureCatalog, ConfigError> {
        match &self.prefectures {
            Some(table) => Ok(PrefectureCatalog::try_from(table.clone())?),
            None => Ok(PrefectureCatalog::japan()),
        }
    }

    pub fn validator(&self) -> Result<AddressValidator, ConfigError> {
        Ok(AddressValidator::new(self.prefecture_catalog()?, self.policy)?)
    }

    pub fn message_catalog(&self) -> MessageCatalog {
        MessageCatalog::with_overrides(self.messages.iter().cloned())
    }
}
