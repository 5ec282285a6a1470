//! Test fixtures and utilities for reducing test setup duplication.
//!
//! Builders for the catalog items the unit tests register, look up and
//! filter. Integration tests have their own workspace helper under
//! `tests/common/`.

use std::collections::HashMap;

use serde_json::json;

use crate::model::{Device, Protocol, Resource, Service, ServiceConfig};

/// A device named after its id, no resources
pub fn device(id: &str) -> Device {
    let mut device = Device::new(id, format!("device {id}"));
    device.kind = "Device".to_string();
    device
        .meta
        .insert("manufacturer".to_string(), json!("acme"));
    device
}

/// A device owning one resource per given resource id
pub fn device_with_resources(id: &str, resource_ids: &[&str]) -> Device {
    let mut device = device(id);
    device.resources = resource_ids.iter().map(|rid| resource(rid, id)).collect();
    device
}

/// A REST resource owned by the given device
pub fn resource(id: &str, device_id: &str) -> Resource {
    let mut resource = Resource::new(id, format!("resource {id}"));
    resource.device = device_id.to_string();
    resource.protocols.push(Protocol {
        kind: "REST".to_string(),
        endpoint: HashMap::from([(
            "url".to_string(),
            json!(format!("http://{device_id}.local/{id}")),
        )]),
        methods: vec!["GET".to_string()],
        content_types: vec!["application/json".to_string()],
    });
    resource
}

/// A service registration with the given host, name and ttl
#[allow(clippy::unwrap_used)]
pub fn service(host: &str, name: &str, ttl: i64) -> Service {
    ServiceConfig {
        host: host.to_string(),
        name: name.to_string(),
        kind: "Service".to_string(),
        ttl,
        ..ServiceConfig::default()
    }
    .into_service()
    .unwrap()
}
