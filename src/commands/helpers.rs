//! Shared command plumbing

use std::path::PathBuf;

use crate::config::{self, Config};
use crate::error::{FedcatError, Result};
use crate::federation::{FederatedCatalog, RemoteCatalog};
use crate::source;

/// The catalog source specs to federate: CLI overrides win over the
/// configured entries
pub fn catalog_specs(config_path: Option<PathBuf>, overrides: &[String]) -> Result<Vec<String>> {
    if !overrides.is_empty() {
        return Ok(overrides.to_vec());
    }
    let path = config::discover(config_path)?;
    let config = Config::load(&path)?;
    let endpoints = config.endpoints();
    if endpoints.is_empty() {
        return Err(FedcatError::NoCatalogs);
    }
    Ok(endpoints)
}

/// Resolve the sources into federated snapshot catalogs
pub fn open_remotes(config_path: Option<PathBuf>, overrides: &[String]) -> Result<Vec<RemoteCatalog>> {
    let specs = catalog_specs(config_path, overrides)?;
    source::open_catalogs(&specs)
}

/// Build the federation the query commands run against
pub fn open_federation(
    config_path: Option<PathBuf>,
    overrides: &[String],
) -> Result<FederatedCatalog> {
    FederatedCatalog::new(open_remotes(config_path, overrides)?)
}
