//! Core traits defining the storage and presentation seams

use crate::errors::{PresentationError, StoreError};
use crate::tenant::TenantManager;
use crate::types::{TenantId, TwinInstance, TwinInterface};
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for twin storage backends
#[async_trait]
pub trait TwinStore: Send + Sync {
    /// Insert or replace an interface definition for the given tenant
    async fn upsert_interface(&self, tenant: &TenantId, interface: TwinInterface) -> Result<(), StoreError>;

    /// Get an interface by name
    async fn get_interface(&self, tenant: &TenantId, name: &str) -> Result<Option<TwinInterface>, StoreError>;

    /// List all interfaces of a tenant
    async fn list_interfaces(&self, tenant: &TenantId) -> Result<Vec<TwinInterface>, StoreError>;

    /// Delete an interface; fails if instances of it still exist
    async fn delete_interface(&self, tenant: &TenantId, name: &str) -> Result<bool, StoreError>;

    /// Insert or replace an instance for the given tenant
    async fn upsert_instance(&self, tenant: &TenantId, instance: TwinInstance) -> Result<(), StoreError>;

    /// Get an instance by name
    async fn get_instance(&self, tenant: &TenantId, name: &str) -> Result<Option<TwinInstance>, StoreError>;

    /// List all instances of a tenant
    async fn list_instances(&self, tenant: &TenantId) -> Result<Vec<TwinInstance>, StoreError>;

    /// Delete an instance
    async fn delete_instance(&self, tenant: &TenantId, name: &str) -> Result<bool, StoreError>;

    /// Test the connection to the storage backend
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Trait for presentation layer adapters (HTTP, gRPC, ...)
#[async_trait]
pub trait PresentationAdapter: Send + Sync {
    /// Start the adapter, serving requests against the given store
    async fn start(
        &self,
        store: Arc<dyn TwinStore>,
        tenants: Arc<dyn TenantManager>,
    ) -> Result<(), PresentationError>;

    /// Stop the adapter
    async fn stop(&self) -> Result<(), PresentationError>;
}
