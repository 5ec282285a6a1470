//! In-memory device catalog backend
//!
//! Devices are kept in registration order, which is also the pagination
//! order. All reads hand out value copies; the map is never aliased out.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

use super::{CatalogStorage, Page, group_by_device, page_bounds};
use crate::error::{FedcatError, Result};
use crate::filter::{self, FilterOp};
use crate::model::{Device, Resource, device::TTL_FOREVER};

/// In-memory device catalog
#[derive(Default)]
pub struct MemoryCatalog {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    devices: HashMap<String, Device>,
    /// Registration order of the device ids
    order: Vec<String>,
}

impl MemoryState {
    fn ordered(&self) -> impl Iterator<Item = &Device> {
        self.order.iter().filter_map(|id| self.devices.get(id))
    }
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from existing registrations, keeping their
    /// timestamps and order as-is (e.g. when loading a snapshot)
    pub fn from_devices(devices: Vec<Device>) -> Result<Self> {
        let catalog = Self::new();
        {
            let mut state = catalog.state.write().unwrap();
            for mut device in devices {
                device.validate()?;
                for resource in &mut device.resources {
                    resource.device = device.id.clone();
                }
                let id = device.id.clone();
                if state.devices.insert(id.clone(), device).is_none() {
                    state.order.push(id);
                }
            }
        }
        Ok(catalog)
    }

    fn stamp(device: &mut Device, created: Option<DateTime<Utc>>) {
        let now = Utc::now();
        device.created = created.or(Some(now));
        device.updated = Some(now);
        device.expires = if device.ttl == TTL_FOREVER {
            None
        } else {
            Some(now + Duration::seconds(device.ttl))
        };
        for resource in &mut device.resources {
            resource.device = device.id.clone();
        }
    }
}

impl CatalogStorage for MemoryCatalog {
    fn add(&self, mut device: Device) -> Result<()> {
        device.validate()?;
        let mut state = self.state.write().unwrap();
        if state.devices.contains_key(&device.id) {
            return Err(FedcatError::ValidationFailed {
                message: format!("device '{}' is already registered", device.id),
            });
        }
        Self::stamp(&mut device, None);
        state.order.push(device.id.clone());
        state.devices.insert(device.id.clone(), device);
        Ok(())
    }

    fn update(&self, id: &str, mut device: Device) -> Result<()> {
        device.id = id.to_string();
        device.validate()?;
        let mut state = self.state.write().unwrap();
        let created = match state.devices.get(id) {
            Some(existing) => existing.created,
            None => {
                return Err(FedcatError::DeviceNotFound { id: id.to_string() });
            }
        };
        Self::stamp(&mut device, created);
        state.devices.insert(id.to_string(), device);
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.devices.remove(id).is_none() {
            return Err(FedcatError::DeviceNotFound { id: id.to_string() });
        }
        state.order.retain(|d| d != id);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Device> {
        let state = self.state.read().unwrap();
        state
            .devices
            .get(id)
            .cloned()
            .ok_or_else(|| FedcatError::DeviceNotFound { id: id.to_string() })
    }

    fn get_many(&self, page: usize, per_page: usize) -> Result<Page<Device>> {
        let state = self.state.read().unwrap();
        let total = state.order.len();
        let (start, end) = page_bounds(page, per_page, total);
        let items = state
            .order[start..end]
            .iter()
            .filter_map(|id| state.devices.get(id).cloned())
            .collect();
        Ok(Page::new(items, total))
    }

    fn get_devices_count(&self) -> Result<usize> {
        Ok(self.state.read().unwrap().order.len())
    }

    fn get_resources_count(&self) -> Result<usize> {
        let state = self.state.read().unwrap();
        Ok(state.ordered().map(|d| d.resources.len()).sum())
    }

    fn get_resource_by_id(&self, id: &str) -> Result<Resource> {
        let state = self.state.read().unwrap();
        state
            .ordered()
            .flat_map(|d| d.resources.iter())
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| FedcatError::ResourceNotFound { id: id.to_string() })
    }

    fn clean_expired(&self, before: DateTime<Utc>) {
        let mut state = self.state.write().unwrap();
        let expired: Vec<String> = state
            .ordered()
            .filter(|d| d.expired_at(before))
            .map(|d| d.id.clone())
            .collect();
        for id in &expired {
            tracing::debug!(device = %id, "removing expired registration");
            state.devices.remove(id);
        }
        state.order.retain(|id| !expired.contains(id));
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }

    fn path_filter_device(&self, path: &str, op: FilterOp, value: &str) -> Result<Device> {
        let state = self.state.read().unwrap();
        state
            .ordered()
            .find(|d| filter::matches(d, path, op, value))
            .cloned()
            .ok_or_else(|| FedcatError::NoMatch {
                path: path.to_string(),
                op: op.to_string(),
                value: value.to_string(),
            })
    }

    fn path_filter_devices(
        &self,
        path: &str,
        op: FilterOp,
        value: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Device>> {
        let state = self.state.read().unwrap();
        let matched: Vec<&Device> = state
            .ordered()
            .filter(|d| filter::matches(d, path, op, value))
            .collect();
        let total = matched.len();
        let (start, end) = page_bounds(page, per_page, total);
        let items = matched[start..end].iter().map(|d| (*d).clone()).collect();
        Ok(Page::new(items, total))
    }

    fn path_filter_resource(&self, path: &str, op: FilterOp, value: &str) -> Result<Resource> {
        let state = self.state.read().unwrap();
        state
            .ordered()
            .flat_map(|d| d.resources.iter())
            .find(|r| filter::matches(r, path, op, value))
            .cloned()
            .ok_or_else(|| FedcatError::NoMatch {
                path: path.to_string(),
                op: op.to_string(),
                value: value.to_string(),
            })
    }

    fn path_filter_resources(
        &self,
        path: &str,
        op: FilterOp,
        value: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Device>> {
        let state = self.state.read().unwrap();
        let matched: Vec<Resource> = state
            .ordered()
            .flat_map(|d| d.resources.iter())
            .filter(|r| filter::matches(r, path, op, value))
            .cloned()
            .collect();
        let total = matched.len();
        let (start, end) = page_bounds(page, per_page, total);
        let devices = group_by_device(&matched[start..end], |id| state.devices.get(id).cloned());
        Ok(Page::new(devices, total))
    }
}
