//! Read-only federation of remote catalogs
//!
//! [`FederatedCatalog`] presents any number of independently-operated
//! catalogs as one paginated, filterable catalog. Each remote catalog owns
//! its data and mutates it at will; the federation layer samples per-catalog
//! item counts, apportions every page across the catalogs proportionally to
//! those counts, and re-converges when a catalog turns out to have changed
//! between sampling and fetching.
//!
//! Failure handling is deliberately soft: an unreachable catalog
//! contributes nothing to the round instead of failing the query. Only
//! cross-round drift that never settles is escalated, as a retryable
//! inconsistency error.
//!
//! ## Module Organization
//!
//! - `apportion.rs`: proportional and even page-share splitting
//! - `client.rs`: the capability contract consumed per remote catalog

pub mod apportion;
pub mod client;

pub use client::{CatalogClient, RemoteCatalog};

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{FedcatError, Result};
use crate::filter::FilterOp;
use crate::model::{Device, Resource};
use crate::storage::{CatalogStorage, Page, group_by_device};
use apportion::{apportion, even_split};

/// Cached item counts, one per catalog plus the global sum
///
/// Outside a listing call, `total` equals the sum of `per_catalog`; a
/// listing call may violate that transiently while it re-converges.
#[derive(Debug)]
struct Counts {
    per_catalog: Vec<usize>,
    total: usize,
}

/// Read-only federated view over remote catalogs
///
/// Implements the same [`CatalogStorage`] contract as a local backend, with
/// all write operations rejected at runtime. The catalog set is fixed at
/// construction.
pub struct FederatedCatalog {
    catalogs: Vec<RemoteCatalog>,
    counts: Mutex<Counts>,
}

impl std::fmt::Debug for FederatedCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FederatedCatalog")
            .field("catalog_count", &self.catalogs.len())
            .field("counts", &self.counts)
            .finish()
    }
}

impl FederatedCatalog {
    /// Federate the given catalogs, in the given order
    ///
    /// The order is permanent: pages concatenate in it and lookups scan in
    /// it. At least one catalog is required.
    pub fn new(catalogs: Vec<RemoteCatalog>) -> Result<Self> {
        if catalogs.is_empty() {
            return Err(FedcatError::NoCatalogs);
        }
        let counts = Counts {
            per_catalog: vec![0; catalogs.len()],
            total: 0,
        };
        Ok(Self {
            catalogs,
            counts: Mutex::new(counts),
        })
    }

    /// Learn every catalog's current item count with a minimal page fetch
    ///
    /// A probe failure leaves that catalog's count at zero for the round.
    fn probe_counts(&self, counts: &mut Counts) {
        for (i, catalog) in self.catalogs.iter().enumerate() {
            match catalog.client.get_many(1, 1) {
                Ok(page) => {
                    counts.per_catalog[i] = page.total;
                    counts.total += page.total;
                }
                Err(err) => {
                    warn!(endpoint = %catalog.endpoint, %err, "catalog probe failed");
                }
            }
        }
    }

    /// Fold a flat filtered resource list into its owning devices, each
    /// carrying only the resources from the input
    ///
    /// Owners resolve through the ordered catalog scan; an owner that
    /// cannot be resolved drops its resources from the result.
    pub fn devices_from_resources(&self, resources: &[Resource]) -> Vec<Device> {
        group_by_device(resources, |id| match self.get(id) {
            Ok(device) => Some(device),
            Err(err) => {
                warn!(device = %id, %err, "cannot resolve resource owner");
                None
            }
        })
    }
}

impl CatalogStorage for FederatedCatalog {
    fn add(&self, _device: Device) -> Result<()> {
        Err(FedcatError::ReadOnly {
            operation: "add".to_string(),
        })
    }

    fn update(&self, _id: &str, _device: Device) -> Result<()> {
        Err(FedcatError::ReadOnly {
            operation: "update".to_string(),
        })
    }

    fn delete(&self, _id: &str) -> Result<()> {
        Err(FedcatError::ReadOnly {
            operation: "delete".to_string(),
        })
    }

    fn get(&self, id: &str) -> Result<Device> {
        for catalog in &self.catalogs {
            match catalog.client.get(id) {
                Ok(device) => return Ok(device),
                Err(err) if err.is_not_found() => {}
                Err(err) => {
                    warn!(endpoint = %catalog.endpoint, %err, "device lookup failed");
                }
            }
        }
        Err(FedcatError::DeviceNotFound { id: id.to_string() })
    }

    /// One merged page across all catalogs, with drift detection
    ///
    /// Holds the count lock for the whole call, so concurrent listings
    /// serialize. Runs at most one round per federated catalog: a round
    /// that observes any catalog's count off its cached value updates the
    /// cache, discards what it fetched and starts over; a drift-free round
    /// returns its concatenation. Exhausting the rounds means the remotes
    /// would not sit still, which surfaces as a retryable error.
    fn get_many(&self, page: usize, per_page: usize) -> Result<Page<Device>> {
        let mut counts = self.counts.lock().unwrap();

        if counts.total == 0 {
            self.probe_counts(&mut counts);
        }

        let rounds = self.catalogs.len();
        'round: for _ in 0..rounds {
            if counts.total == 0 {
                debug!("nothing federated; all catalogs are empty or unreachable");
                return Ok(Page::empty());
            }

            let shares = apportion(&counts.per_catalog, per_page);
            let mut items = Vec::with_capacity(per_page);
            for (i, catalog) in self.catalogs.iter().enumerate() {
                let fetched = match catalog.client.get_many(page, shares[i]) {
                    Ok(fetched) => fetched,
                    Err(err) => {
                        warn!(endpoint = %catalog.endpoint, %err, "catalog fetch failed");
                        Page::empty()
                    }
                };

                if fetched.total != counts.per_catalog[i] {
                    debug!(
                        endpoint = %catalog.endpoint,
                        cached = counts.per_catalog[i],
                        observed = fetched.total,
                        "catalog changed, restarting round"
                    );
                    counts.total = counts.total - counts.per_catalog[i] + fetched.total;
                    counts.per_catalog[i] = fetched.total;
                    continue 'round;
                }

                if fetched.total == 0 {
                    continue;
                }
                items.extend(fetched.items);
            }
            return Ok(Page::new(items, counts.total));
        }

        Err(FedcatError::FederationInconsistent { rounds })
    }

    fn get_devices_count(&self) -> Result<usize> {
        let mut total = 0;
        for catalog in &self.catalogs {
            match catalog.client.get_many(1, 1) {
                Ok(page) => total += page.total,
                Err(err) => {
                    warn!(endpoint = %catalog.endpoint, %err, "catalog count probe failed");
                }
            }
        }
        Ok(total)
    }

    fn get_resources_count(&self) -> Result<usize> {
        Err(FedcatError::NotSupported {
            operation: "get_resources_count".to_string(),
        })
    }

    fn get_resource_by_id(&self, id: &str) -> Result<Resource> {
        for catalog in &self.catalogs {
            match catalog.client.get_resource(id) {
                Ok(resource) => return Ok(resource),
                Err(err) if err.is_not_found() => {}
                Err(err) => {
                    warn!(endpoint = %catalog.endpoint, %err, "resource lookup failed");
                }
            }
        }
        Err(FedcatError::ResourceNotFound { id: id.to_string() })
    }

    fn clean_expired(&self, _before: DateTime<Utc>) {
        // each remote catalog sweeps its own registrations
    }

    fn close(&self) -> Result<()> {
        // clients own their connections; nothing held here
        Ok(())
    }

    fn path_filter_device(&self, path: &str, op: FilterOp, value: &str) -> Result<Device> {
        for catalog in &self.catalogs {
            match catalog.client.find_device(path, op, value) {
                Ok(device) => return Ok(device),
                Err(err) if err.is_not_found() => {}
                Err(err) => {
                    warn!(endpoint = %catalog.endpoint, %err, "device filter failed");
                }
            }
        }
        Err(FedcatError::NoMatch {
            path: path.to_string(),
            op: op.to_string(),
            value: value.to_string(),
        })
    }

    /// Filtered listing fanned out evenly: no counts are sampled for
    /// filters, so every catalog gets an equal slice of the page and the
    /// totals are taken as reported, without drift protection
    fn path_filter_devices(
        &self,
        path: &str,
        op: FilterOp,
        value: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Device>> {
        let shares = even_split(self.catalogs.len(), per_page);
        let mut items = Vec::new();
        let mut total = 0;
        for (i, catalog) in self.catalogs.iter().enumerate() {
            match catalog.client.find_devices(path, op, value, page, shares[i]) {
                Ok(fetched) => {
                    items.extend(fetched.items);
                    total += fetched.total;
                }
                Err(err) => {
                    warn!(endpoint = %catalog.endpoint, %err, "device filter failed");
                }
            }
        }
        Ok(Page::new(items, total))
    }

    fn path_filter_resource(&self, path: &str, op: FilterOp, value: &str) -> Result<Resource> {
        for catalog in &self.catalogs {
            match catalog.client.find_resource(path, op, value) {
                Ok(resource) => return Ok(resource),
                Err(err) if err.is_not_found() => {}
                Err(err) => {
                    warn!(endpoint = %catalog.endpoint, %err, "resource filter failed");
                }
            }
        }
        Err(FedcatError::NoMatch {
            path: path.to_string(),
            op: op.to_string(),
            value: value.to_string(),
        })
    }

    /// Filtered resources fanned out evenly, then folded into their owning
    /// devices so the result has the same shape a local catalog returns
    fn path_filter_resources(
        &self,
        path: &str,
        op: FilterOp,
        value: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Device>> {
        let shares = even_split(self.catalogs.len(), per_page);
        let mut resources = Vec::new();
        let mut total = 0;
        for (i, catalog) in self.catalogs.iter().enumerate() {
            match catalog
                .client
                .find_resources(path, op, value, page, shares[i])
            {
                Ok(fetched) => {
                    resources.extend(fetched.items);
                    total += fetched.total;
                }
                Err(err) => {
                    warn!(endpoint = %catalog.endpoint, %err, "resource filter failed");
                }
            }
        }
        Ok(Page::new(self.devices_from_resources(&resources), total))
    }
}
