//! Snapshot-file catalog client
//!
//! A snapshot file is one catalog's full device listing as JSON:
//!
//! ```json
//! {
//!   "description": "Site A devices",
//!   "devices": [ { "id": "...", "name": "...", "resources": [ ... ] } ]
//! }
//! ```
//!
//! [`FileCatalog`] serves the federation client contract from such a file.
//! The file is re-read on every call, so a concurrently rewritten snapshot
//! behaves exactly like an independently mutating remote catalog; a blake3
//! content fingerprint skips reparsing while the file is unchanged. Read
//! and parse failures surface as the catalog being unreachable.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::error::{FedcatError, Result};
use crate::federation::CatalogClient;
use crate::filter::FilterOp;
use crate::model::{Device, Resource};
use crate::storage::{CatalogStorage, MemoryCatalog, Page};

/// Wire format of a snapshot file
#[derive(Debug, Deserialize)]
struct CatalogSnapshot {
    #[serde(default)]
    #[allow(dead_code)]
    description: String,
    #[serde(default)]
    devices: Vec<Device>,
}

/// A catalog served from one snapshot file on disk
pub struct FileCatalog {
    path: PathBuf,
    cache: Mutex<Option<(blake3::Hash, Arc<MemoryCatalog>)>>,
}

impl FileCatalog {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    /// The current catalog content, reloaded if the file changed
    fn load(&self) -> Result<Arc<MemoryCatalog>> {
        let bytes = fs::read(&self.path).map_err(|e| FedcatError::CatalogUnreachable {
            endpoint: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        let fingerprint = blake3::hash(&bytes);

        let mut cache = self.cache.lock().unwrap();
        if let Some((cached, catalog)) = cache.as_ref() {
            if *cached == fingerprint {
                return Ok(catalog.clone());
            }
        }

        let snapshot: CatalogSnapshot =
            serde_json::from_slice(&bytes).map_err(|e| FedcatError::SnapshotParseFailed {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        let catalog =
            Arc::new(
                MemoryCatalog::from_devices(snapshot.devices).map_err(|e| {
                    FedcatError::SnapshotParseFailed {
                        path: self.path.display().to_string(),
                        reason: e.to_string(),
                    }
                })?,
            );
        tracing::debug!(path = %self.path.display(), "snapshot loaded");
        *cache = Some((fingerprint, catalog.clone()));
        Ok(catalog)
    }
}

impl CatalogClient for FileCatalog {
    fn get(&self, id: &str) -> Result<Device> {
        self.load()?.get(id)
    }

    fn get_many(&self, page: usize, per_page: usize) -> Result<Page<Device>> {
        self.load()?.get_many(page, per_page)
    }

    fn get_resource(&self, id: &str) -> Result<Resource> {
        self.load()?.get_resource_by_id(id)
    }

    fn find_device(&self, path: &str, op: FilterOp, value: &str) -> Result<Device> {
        self.load()?.path_filter_device(path, op, value)
    }

    fn find_devices(
        &self,
        path: &str,
        op: FilterOp,
        value: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Device>> {
        self.load()?.path_filter_devices(path, op, value, page, per_page)
    }

    fn find_resource(&self, path: &str, op: FilterOp, value: &str) -> Result<Resource> {
        self.load()?.path_filter_resource(path, op, value)
    }

    fn find_resources(
        &self,
        path: &str,
        op: FilterOp,
        value: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Resource>> {
        let devices = self
            .load()?
            .path_filter_resources(path, op, value, page, per_page)?;
        let resources = devices
            .items
            .into_iter()
            .flat_map(|d| d.resources)
            .collect();
        Ok(Page::new(resources, devices.total))
    }
}
