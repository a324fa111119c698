//! # TwinScale Core
//!
//! Core types, traits, and the RDF ontology for the TwinScale-Lite twin
//! registry. This crate provides the fundamental abstractions that storage
//! adapters and presentation layers build on.

pub mod types;
pub mod traits;
pub mod errors;
pub mod tenant;
pub mod ontology;
pub mod mapping;

// Re-export commonly used types and traits
pub use types::{TenantId, TwinInstance, TwinInterface};
pub use traits::{PresentationAdapter, TwinStore};
pub use errors::{CoreError, OntologyError, StoreError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::traits::*;
    pub use crate::errors::*;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
}
