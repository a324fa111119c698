//! Error types for TwinScale core operations

use thiserror::Error;

/// Main error type for TwinScale core operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Twin storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Tenant error: {0}")]
    Tenant(String),

    #[error("Ontology error: {0}")]
    Ontology(#[from] OntologyError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors related to twin storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("Instance not found: {0}")]
    InstanceNotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Tenant isolation violation: {0}")]
    TenantIsolationViolation(String),

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Errors related to ontology terms and data URI construction
#[derive(Error, Debug)]
pub enum OntologyError {
    #[error("Invalid IRI {iri:?}: {source}")]
    InvalidIri {
        iri: String,
        #[source]
        source: oxrdf::IriParseError,
    },
}

/// Errors related to presentation adapters
#[derive(Error, Debug)]
pub enum PresentationError {
    #[error("Server startup failed: {0}")]
    StartupFailed(String),

    #[error("Server shutdown failed: {0}")]
    ShutdownFailed(String),

    #[error("Request handling error: {0}")]
    RequestHandling(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
