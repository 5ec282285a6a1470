//! Service model and its registration-time shape
//!
//! Service ids have the form `host/name`. Registrations carry a TTL in
//! seconds; the catalog stamps `expires` on every add or update and sweeps
//! lapsed entries. A TTL of -1 marks a service that never expires.

#![allow(dead_code)]

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::device::{Protocol, TTL_FOREVER};
use crate::error::{FedcatError, Result};

/// A service entry in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Unique service id, `host/name`
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub meta: HashMap<String, Value>,

    #[serde(default)]
    pub protocols: Vec<Protocol>,

    #[serde(default)]
    pub representation: HashMap<String, Value>,

    /// Registration lifetime in seconds; -1 never expires
    pub ttl: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl Service {
    /// Validate the registration
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() || self.id.split('/').count() != 2 {
            return Err(FedcatError::ValidationFailed {
                message: format!("service id '{}' is not of the form host/name", self.id),
            });
        }
        if self.name.is_empty() {
            return Err(FedcatError::ValidationFailed {
                message: format!("service '{}' has no name", self.id),
            });
        }
        if self.ttl == 0 {
            return Err(FedcatError::ValidationFailed {
                message: format!("service '{}' has no ttl", self.id),
            });
        }
        Ok(())
    }

    /// Stamp the registration timestamps at the given instant
    ///
    /// Sets `created` on first registration, always advances `updated`, and
    /// derives `expires` from the TTL. A TTL of -1 clears the expiry.
    pub fn stamp(&mut self, now: DateTime<Utc>) {
        if self.created.is_none() {
            self.created = Some(now);
        }
        self.updated = Some(now);
        self.expires = if self.ttl == TTL_FOREVER {
            None
        } else {
            Some(now + Duration::seconds(self.ttl))
        };
    }

    /// Whether the registration has lapsed at the given instant
    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires, Some(expires) if expires <= now)
    }
}

/// Registration-time shape of a service: host and name instead of an id
///
/// Registering parties submit this; the catalog derives the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub meta: HashMap<String, Value>,

    #[serde(default)]
    pub protocols: Vec<Protocol>,

    #[serde(default)]
    pub representation: HashMap<String, Value>,

    #[serde(default)]
    pub ttl: i64,
}

impl ServiceConfig {
    /// Build the validated catalog entry for this registration
    pub fn into_service(self) -> Result<Service> {
        let service = Service {
            id: format!("{}/{}", self.host, self.name),
            kind: self.kind,
            name: self.name,
            description: self.description,
            meta: self.meta,
            protocols: self.protocols,
            representation: self.representation,
            ttl: self.ttl,
            created: None,
            updated: None,
            expires: None,
        };
        service.validate()?;
        Ok(service)
    }
}
