//! Catalog item models
//!
//! A **Device** is a networked thing registered in a catalog. It embeds its
//! **Resources** (the individually addressable capabilities of the device,
//! each carrying a back-reference to the owning device id). A **Service** is
//! a standalone registry entry for a network API, registered with a TTL.
//!
//! Items handed out by a catalog are value copies: mutating a returned item
//! never changes what the catalog stores.
//!
//! ## Module Organization
//!
//! - `device.rs`: Device, Resource and Protocol models
//! - `service.rs`: Service model and its registration-time shape

pub mod device;
pub mod service;

pub use device::{Device, Protocol, Resource};
pub use service::{Service, ServiceConfig};
