//! Error types and handling for fedcat
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! The variants fall into a few families with different weights:
//! - not-found (device, resource, filter miss): the expected outcome of a
//!   lookup, matched with [`FedcatError::is_not_found`] and never logged
//!   as an error
//! - catalog-unreachable: one remote catalog failed; callers degrade to
//!   "this catalog contributes nothing" instead of failing the operation
//! - federation-inconsistent: paginated aggregation could not converge
//!   while the remote catalogs kept changing; the caller should retry
//! - read-only / not-supported: static rejections of the federation layer
//! - config, source, snapshot, validation, io: ordinary startup failures

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for fedcat operations
#[derive(Error, Diagnostic, Debug)]
pub enum FedcatError {
    // Lookup outcomes
    #[error("Device '{id}' not found")]
    #[diagnostic(code(fedcat::catalog::device_not_found))]
    DeviceNotFound { id: String },

    #[error("Resource '{id}' not found")]
    #[diagnostic(code(fedcat::catalog::resource_not_found))]
    ResourceNotFound { id: String },

    #[error("Service '{id}' not found")]
    #[diagnostic(code(fedcat::catalog::service_not_found))]
    ServiceNotFound { id: String },

    #[error("No item matches {path} {op} {value}")]
    #[diagnostic(code(fedcat::catalog::no_match))]
    NoMatch {
        path: String,
        op: String,
        value: String,
    },

    // Federation errors
    #[error("Federated catalogs kept changing for {rounds} rounds")]
    #[diagnostic(
        code(fedcat::federation::inconsistent),
        help("The remote catalogs are mutating faster than the page could be assembled. Retry the query.")
    )]
    FederationInconsistent { rounds: usize },

    #[error("Catalog federation is read-only: {operation}")]
    #[diagnostic(
        code(fedcat::federation::read_only),
        help("Write to the remote catalog that owns the item instead")
    )]
    ReadOnly { operation: String },

    #[error("Operation not supported: {operation}")]
    #[diagnostic(code(fedcat::federation::not_supported))]
    NotSupported { operation: String },

    #[error("Catalog '{endpoint}' is unreachable: {reason}")]
    #[diagnostic(code(fedcat::federation::catalog_unreachable))]
    CatalogUnreachable { endpoint: String, reason: String },

    #[error("At least one catalog is required")]
    #[diagnostic(
        code(fedcat::federation::no_catalogs),
        help("List catalogs in fedcat.yaml or pass --catalog")
    )]
    NoCatalogs,

    // Filtering errors
    #[error("Unknown filter operator: {op}")]
    #[diagnostic(
        code(fedcat::filter::unknown_op),
        help("Supported operators: equals, prefix, suffix, contains")
    )]
    UnknownFilterOp { op: String },

    // Model errors
    #[error("Validation failed: {message}")]
    #[diagnostic(code(fedcat::model::validation_failed))]
    ValidationFailed { message: String },

    // Source errors
    #[error("Failed to parse catalog source: {spec}: {reason}")]
    #[diagnostic(
        code(fedcat::source::parse_failed),
        help("Valid sources: a snapshot file, a directory of snapshots, or a glob like catalogs/*.json")
    )]
    SourceParseFailed { spec: String, reason: String },

    #[error("Catalog source matches nothing: {spec}")]
    #[diagnostic(code(fedcat::source::empty))]
    SourceEmpty { spec: String },

    #[error("Failed to parse catalog snapshot: {path}: {reason}")]
    #[diagnostic(code(fedcat::source::snapshot_parse_failed))]
    SnapshotParseFailed { path: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(fedcat::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(fedcat::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(fedcat::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(fedcat::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(fedcat::fs::io_error))]
    IoError { message: String },
}

impl FedcatError {
    /// Whether this error is the expected "nothing matched" outcome of a
    /// lookup, as opposed to an actual failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FedcatError::DeviceNotFound { .. }
                | FedcatError::ResourceNotFound { .. }
                | FedcatError::ServiceNotFound { .. }
                | FedcatError::NoMatch { .. }
        )
    }
}

impl From<std::io::Error> for FedcatError {
    fn from(err: std::io::Error) -> Self {
        FedcatError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for FedcatError {
    fn from(err: serde_yaml::Error) -> Self {
        FedcatError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FedcatError {
    fn from(err: serde_json::Error) -> Self {
        FedcatError::SnapshotParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, FedcatError>;
