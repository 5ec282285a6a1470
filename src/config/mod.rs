//! Configuration file handling for fedcat
//!
//! `fedcat.yaml` names the federation and lists the catalogs behind it:
//!
//! ```yaml
//! name: plant federation
//! description: All site catalogs
//!
//! catalogs:
//!   - endpoint: ./catalogs/site-a.json
//!   - endpoint: ./catalogs/site-b.json
//!     description: Assembly hall
//! ```
//!
//! Lookup order: an explicit `--config` path, the `FEDCAT_CONFIG`
//! environment variable, `./fedcat.yaml`, then `fedcat/fedcat.yaml` in the
//! user configuration directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FedcatError, Result};

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "FEDCAT_CONFIG";

/// Default configuration file name
pub const CONFIG_FILE: &str = "fedcat.yaml";

/// Federation configuration (fedcat.yaml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Federation name, informational
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The federated catalogs, in federation order
    #[serde(default)]
    pub catalogs: Vec<CatalogEntry>,
}

/// One federated catalog in the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Catalog source: a snapshot file, a directory or a glob pattern
    pub endpoint: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Config {
    /// Parse a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: &PathBuf) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| FedcatError::ConfigReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| FedcatError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for entry in &self.catalogs {
            if entry.endpoint.trim().is_empty() {
                return Err(FedcatError::ConfigInvalid {
                    message: "catalog entries must have an endpoint".to_string(),
                });
            }
        }
        Ok(())
    }

    /// The configured catalog source specs, in federation order
    pub fn endpoints(&self) -> Vec<String> {
        self.catalogs.iter().map(|c| c.endpoint.clone()).collect()
    }
}

/// Find the configuration file to use
///
/// An explicitly given path must exist; the fallbacks are skipped silently
/// when absent.
pub fn discover(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path);
        }
        return Err(FedcatError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(&env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(FedcatError::ConfigNotFound { path: env_path });
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return Ok(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join("fedcat").join(CONFIG_FILE);
        if user.exists() {
            return Ok(user);
        }
    }

    Err(FedcatError::ConfigNotFound {
        path: CONFIG_FILE.to_string(),
    })
}
