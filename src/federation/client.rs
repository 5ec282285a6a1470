//! Capability contract of a remote catalog
//!
//! The federation layer consumes remote catalogs only through
//! [`CatalogClient`], so any transport can stand behind a descriptor: the
//! snapshot-file client used by the CLI, a network client, or a fake in
//! tests. Implementations own their transport timeouts; the federation
//! layer imposes none of its own.

use crate::error::Result;
use crate::filter::FilterOp;
use crate::model::{Device, Resource};
use crate::storage::Page;

/// The calls the federation layer makes against one remote catalog
///
/// Pages are 1-based and `per_page` 0 yields zero items with whatever
/// total the catalog reports. Lookup misses surface as the not-found error
/// family; anything else is treated as the catalog being unreachable.
pub trait CatalogClient: Send + Sync {
    fn get(&self, id: &str) -> Result<Device>;
    fn get_many(&self, page: usize, per_page: usize) -> Result<Page<Device>>;
    fn get_resource(&self, id: &str) -> Result<Resource>;

    fn find_device(&self, path: &str, op: FilterOp, value: &str) -> Result<Device>;
    fn find_devices(
        &self,
        path: &str,
        op: FilterOp,
        value: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Device>>;
    fn find_resource(&self, path: &str, op: FilterOp, value: &str) -> Result<Resource>;
    fn find_resources(
        &self,
        path: &str,
        op: FilterOp,
        value: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Resource>>;
}

/// One federated catalog: its endpoint identity and the client behind it
pub struct RemoteCatalog {
    pub endpoint: String,
    pub client: Box<dyn CatalogClient>,
}

impl RemoteCatalog {
    pub fn new(endpoint: impl Into<String>, client: Box<dyn CatalogClient>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}
