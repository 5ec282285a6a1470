//! Service registry contract and its in-memory backend
//!
//! Services register with a TTL and must refresh before it lapses; the
//! owner of the backend runs the expiry sweep. Listeners get notified of
//! every add, update and delete, including deletes performed by the sweep.
//! Listener implementations are expected to be thread safe.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use super::{Page, page_bounds};
use crate::error::{FedcatError, Result};
use crate::filter::{self, FilterOp};
use crate::model::Service;

/// The service registry contract
///
/// Pages are 1-based, `per_page` 0 yields zero items with the true total,
/// same as the device catalog contract.
pub trait ServiceStorage: Send + Sync {
    // CRUD
    fn add(&self, service: Service) -> Result<()>;
    fn update(&self, id: &str, service: Service) -> Result<()>;
    fn delete(&self, id: &str) -> Result<()>;
    fn get(&self, id: &str) -> Result<Service>;

    // Utility functions
    fn get_many(&self, page: usize, per_page: usize) -> Result<Page<Service>>;
    fn get_count(&self) -> Result<usize>;
    fn clean_expired(&self, before: DateTime<Utc>);
    fn close(&self) -> Result<()>;

    // Path filtering
    fn path_filter_one(&self, path: &str, op: FilterOp, value: &str) -> Result<Service>;
    fn path_filter(
        &self,
        path: &str,
        op: FilterOp,
        value: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Service>>;
}

/// Notification hooks for registry changes
pub trait ServiceListener: Send + Sync {
    fn added(&self, service: &Service);
    fn updated(&self, service: &Service);
    fn deleted(&self, id: &str);
}

/// In-memory service registry
#[derive(Default)]
pub struct MemoryServiceCatalog {
    state: RwLock<ServiceState>,
    listeners: Vec<Box<dyn ServiceListener>>,
}

#[derive(Default)]
struct ServiceState {
    services: HashMap<String, Service>,
    /// Registration order of the service ids
    order: Vec<String>,
}

impl ServiceState {
    fn ordered(&self) -> impl Iterator<Item = &Service> {
        self.order.iter().filter_map(|id| self.services.get(id))
    }
}

impl MemoryServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listeners(listeners: Vec<Box<dyn ServiceListener>>) -> Self {
        Self {
            state: RwLock::default(),
            listeners,
        }
    }
}

impl ServiceStorage for MemoryServiceCatalog {
    fn add(&self, mut service: Service) -> Result<()> {
        service.validate()?;
        service.stamp(Utc::now());
        {
            let mut state = self.state.write().unwrap();
            if state.services.contains_key(&service.id) {
                return Err(FedcatError::ValidationFailed {
                    message: format!("service '{}' is already registered", service.id),
                });
            }
            state.order.push(service.id.clone());
            state.services.insert(service.id.clone(), service.clone());
        }
        for listener in &self.listeners {
            listener.added(&service);
        }
        Ok(())
    }

    fn update(&self, id: &str, mut service: Service) -> Result<()> {
        service.id = id.to_string();
        service.validate()?;
        {
            let mut state = self.state.write().unwrap();
            let created = match state.services.get(id) {
                Some(existing) => existing.created,
                None => {
                    return Err(FedcatError::ServiceNotFound { id: id.to_string() });
                }
            };
            service.created = created;
            service.stamp(Utc::now());
            state.services.insert(id.to_string(), service.clone());
        }
        for listener in &self.listeners {
            listener.updated(&service);
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        {
            let mut state = self.state.write().unwrap();
            if state.services.remove(id).is_none() {
                return Err(FedcatError::ServiceNotFound { id: id.to_string() });
            }
            state.order.retain(|s| s != id);
        }
        for listener in &self.listeners {
            listener.deleted(id);
        }
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Service> {
        let state = self.state.read().unwrap();
        state
            .services
            .get(id)
            .cloned()
            .ok_or_else(|| FedcatError::ServiceNotFound { id: id.to_string() })
    }

    fn get_many(&self, page: usize, per_page: usize) -> Result<Page<Service>> {
        let state = self.state.read().unwrap();
        let total = state.order.len();
        let (start, end) = page_bounds(page, per_page, total);
        let items = state.order[start..end]
            .iter()
            .filter_map(|id| state.services.get(id).cloned())
            .collect();
        Ok(Page::new(items, total))
    }

    fn get_count(&self) -> Result<usize> {
        Ok(self.state.read().unwrap().order.len())
    }

    fn clean_expired(&self, before: DateTime<Utc>) {
        let expired: Vec<String> = {
            let mut state = self.state.write().unwrap();
            let expired: Vec<String> = state
                .ordered()
                .filter(|s| s.expired_at(before))
                .map(|s| s.id.clone())
                .collect();
            for id in &expired {
                tracing::debug!(service = %id, "removing expired registration");
                state.services.remove(id);
            }
            state.order.retain(|id| !expired.contains(id));
            expired
        };
        for id in &expired {
            for listener in &self.listeners {
                listener.deleted(id);
            }
        }
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }

    fn path_filter_one(&self, path: &str, op: FilterOp, value: &str) -> Result<Service> {
        let state = self.state.read().unwrap();
        state
            .ordered()
            .find(|s| filter::matches(s, path, op, value))
            .cloned()
            .ok_or_else(|| FedcatError::NoMatch {
                path: path.to_string(),
                op: op.to_string(),
                value: value.to_string(),
            })
    }

    fn path_filter(
        &self,
        path: &str,
        op: FilterOp,
        value: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Service>> {
        let state = self.state.read().unwrap();
        let matched: Vec<&Service> = state
            .ordered()
            .filter(|s| filter::matches(s, path, op, value))
            .collect();
        let total = matched.len();
        let (start, end) = page_bounds(page, per_page, total);
        let items = matched[start..end].iter().map(|s| (*s).clone()).collect();
        Ok(Page::new(items, total))
    }
}
