//! Device, Resource and Protocol models

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FedcatError, Result};

/// A TTL that never expires
pub const TTL_FOREVER: i64 = -1;

fn default_ttl() -> i64 {
    TTL_FOREVER
}

/// A networked device registered in a catalog
///
/// Devices embed their resources; a device fetched from a catalog carries
/// its full resource set unless the query filtered it down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Unique device id
    pub id: String,

    /// Device type, free-form (e.g. "Device", "Gateway")
    #[serde(rename = "type", default)]
    pub kind: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Free-form metadata attached by the registering party
    #[serde(default)]
    pub meta: HashMap<String, Value>,

    /// Registration lifetime in seconds; -1 never expires
    #[serde(default = "default_ttl")]
    pub ttl: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,

    /// Resources owned by this device
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Device {
    /// Create a device with the given id and name, nothing else set
    #[allow(dead_code)] // Used by tests
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: String::new(),
            name: name.into(),
            description: String::new(),
            meta: HashMap::new(),
            ttl: TTL_FOREVER,
            created: None,
            updated: None,
            expires: None,
            resources: Vec::new(),
        }
    }

    /// Validate the registration
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(FedcatError::ValidationFailed {
                message: "device id must not be empty".to_string(),
            });
        }
        if self.name.is_empty() {
            return Err(FedcatError::ValidationFailed {
                message: format!("device '{}' has no name", self.id),
            });
        }
        Ok(())
    }

    /// Whether the registration has lapsed at the given instant
    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires, Some(expires) if expires <= now)
    }
}

/// An individually addressable capability of a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource id
    pub id: String,

    /// Id of the owning device
    #[serde(default)]
    pub device: String,

    pub name: String,

    #[serde(default)]
    pub meta: HashMap<String, Value>,

    /// Protocols the resource is reachable over
    #[serde(default)]
    pub protocols: Vec<Protocol>,

    /// Representation formats per content type
    #[serde(default)]
    pub representation: HashMap<String, Value>,
}

impl Resource {
    /// Create a resource with the given id and name, owned by nobody yet
    #[allow(dead_code)] // Used by tests
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            device: String::new(),
            name: name.into(),
            meta: HashMap::new(),
            protocols: Vec::new(),
            representation: HashMap::new(),
        }
    }
}

/// Protocol describes one API of a resource or service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
    /// Protocol type (e.g. "REST", "MQTT")
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Endpoint details, protocol-specific (e.g. {"url": ...})
    #[serde(default)]
    pub endpoint: HashMap<String, Value>,

    #[serde(default)]
    pub methods: Vec<String>,

    #[serde(rename = "content-types", default)]
    pub content_types: Vec<String>,
}
