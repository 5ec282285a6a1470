//! Catalog storage contracts and local backends
//!
//! [`CatalogStorage`] is the contract every device catalog presents: the
//! local in-memory backend implements all of it, and the federation layer
//! implements the same contract over remote catalogs (rejecting writes at
//! runtime). Keeping one contract keeps call sites uniform.
//!
//! ## Module Organization
//!
//! - `memory.rs`: in-memory device catalog backend
//! - `services.rs`: service registry contract and its in-memory backend

pub mod memory;
pub mod services;

pub use memory::MemoryCatalog;
pub use services::{MemoryServiceCatalog, ServiceListener, ServiceStorage};

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::filter::FilterOp;
use crate::model::{Device, Resource};

/// One page of catalog items together with the catalog's total item count
///
/// The total counts all items matching the query, not the page length.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }

    /// A page with nothing in it and nothing behind it
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Bounds of a 1-based page over a collection of `len` items
///
/// Pages past the end come back empty rather than failing; `per_page` 0
/// yields an empty range at the page offset.
pub(crate) fn page_bounds(page: usize, per_page: usize, len: usize) -> (usize, usize) {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(per_page).min(len);
    let end = start.saturating_add(per_page).min(len);
    (start, end)
}

/// The device catalog contract
///
/// Pages are 1-based. A `per_page` of 0 yields zero items with the true
/// total. Lookups return the not-found error family when nothing matches;
/// that is an expected outcome, not a failure.
pub trait CatalogStorage: Send + Sync {
    // CRUD
    fn add(&self, device: Device) -> Result<()>;
    fn update(&self, id: &str, device: Device) -> Result<()>;
    fn delete(&self, id: &str) -> Result<()>;
    fn get(&self, id: &str) -> Result<Device>;

    // Utility functions
    fn get_many(&self, page: usize, per_page: usize) -> Result<Page<Device>>;
    fn get_devices_count(&self) -> Result<usize>;
    fn get_resources_count(&self) -> Result<usize>;
    fn get_resource_by_id(&self, id: &str) -> Result<Resource>;
    fn clean_expired(&self, before: DateTime<Utc>);
    fn close(&self) -> Result<()>;

    // Path filtering
    fn path_filter_device(&self, path: &str, op: FilterOp, value: &str) -> Result<Device>;
    fn path_filter_devices(
        &self,
        path: &str,
        op: FilterOp,
        value: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Device>>;
    fn path_filter_resource(&self, path: &str, op: FilterOp, value: &str) -> Result<Resource>;
    fn path_filter_resources(
        &self,
        path: &str,
        op: FilterOp,
        value: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Device>>;
}

/// Fold a flat resource list into its distinct owning devices
///
/// Owners come back in first-seen order, each carrying only the resources
/// from the input. `lookup` resolves an owner id to its device; a miss
/// drops that resource from the result.
pub(crate) fn group_by_device<F>(resources: &[Resource], mut lookup: F) -> Vec<Device>
where
    F: FnMut(&str) -> Option<Device>,
{
    let mut devices: Vec<Device> = Vec::new();
    for resource in resources {
        if devices.iter().any(|d| d.id == resource.device) {
            continue;
        }
        if let Some(mut device) = lookup(&resource.device) {
            device.resources = resources
                .iter()
                .filter(|r| r.device == device.id)
                .cloned()
                .collect();
            devices.push(device);
        }
    }
    devices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds_basics() {
        assert_eq!(page_bounds(1, 10, 25), (0, 10));
        assert_eq!(page_bounds(3, 10, 25), (20, 25));
        assert_eq!(page_bounds(4, 10, 25), (25, 25));
    }

    #[test]
    fn test_page_bounds_zero_per_page() {
        assert_eq!(page_bounds(1, 0, 25), (0, 0));
        assert_eq!(page_bounds(7, 0, 25), (0, 0));
    }

    #[test]
    fn test_page_zero_treated_as_first() {
        assert_eq!(page_bounds(0, 10, 25), (0, 10));
    }

    #[test]
    fn test_group_by_device_dedupes_and_crops() {
        let mut r1 = Resource::new("res-1", "temperature");
        r1.device = "dev-1".to_string();
        let mut r2 = Resource::new("res-2", "humidity");
        r2.device = "dev-1".to_string();
        let mut r3 = Resource::new("res-3", "switch");
        r3.device = "dev-2".to_string();

        let devices = group_by_device(&[r1, r2, r3], |id| Some(Device::new(id, "thing")));
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].id, "dev-1");
        assert_eq!(devices[0].resources.len(), 2);
        assert_eq!(devices[1].id, "dev-2");
        assert_eq!(devices[1].resources.len(), 1);
    }

    #[test]
    fn test_group_by_device_drops_unresolved_owners() {
        let mut r1 = Resource::new("res-1", "temperature");
        r1.device = "dev-1".to_string();
        let devices = group_by_device(&[r1], |_| None);
        assert!(devices.is_empty());
    }
}
