//! In-memory implementation of TwinStore and TenantManager for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use twinscale_core::prelude::*;
use twinscale_core::tenant::{TenantInfo, TenantManager};

/// Configuration for the in-memory store
#[derive(Debug, Clone)]
pub struct InMemoryConfig {
    /// Maximum number of interfaces per tenant
    pub max_interfaces: Option<usize>,
    /// Maximum number of instances per tenant
    pub max_instances: Option<usize>,
    /// Whether to enable verbose logging
    pub verbose: bool,
}

impl Default for InMemoryConfig {
    fn default() -> Self {
        Self {
            max_interfaces: Some(10_000),
            max_instances: Some(100_000),
            verbose: false,
        }
    }
}

/// In-memory data store
#[derive(Debug, Default)]
struct MemoryStore {
    /// Interfaces indexed by (tenant, name)
    interfaces: HashMap<(TenantId, String), TwinInterface>,
    /// Instances indexed by (tenant, name)
    instances: HashMap<(TenantId, String), TwinInstance>,
    /// Index: (tenant, interface name) -> instance names
    instances_by_interface: HashMap<(TenantId, String), Vec<String>>,
    /// Registered tenants
    tenants: HashMap<TenantId, TenantInfo>,
}

impl MemoryStore {
    fn interface_count(&self, tenant: &TenantId) -> usize {
        self.interfaces.keys().filter(|(t, _)| t == tenant).count()
    }

    fn instance_count(&self, tenant: &TenantId) -> usize {
        self.instances.keys().filter(|(t, _)| t == tenant).count()
    }

    fn insert_instance(&mut self, tenant: &TenantId, instance: TwinInstance) {
        let key = (tenant.clone(), instance.name.clone());
        if let Some(previous) = self.instances.remove(&key) {
            self.unlink_instance(tenant, &previous);
        }
        self.instances_by_interface
            .entry((tenant.clone(), instance.interface.clone()))
            .or_default()
            .push(instance.name.clone());
        self.instances.insert(key, instance);
    }

    fn remove_instance(&mut self, tenant: &TenantId, name: &str) -> bool {
        match self.instances.remove(&(tenant.clone(), name.to_string())) {
            Some(instance) => {
                self.unlink_instance(tenant, &instance);
                true
            }
            None => false,
        }
    }

    fn unlink_instance(&mut self, tenant: &TenantId, instance: &TwinInstance) {
        if let Some(names) = self
            .instances_by_interface
            .get_mut(&(tenant.clone(), instance.interface.clone()))
        {
            names.retain(|name| name != &instance.name);
        }
    }

    fn remove_tenant_data(&mut self, tenant: &TenantId) {
        self.interfaces.retain(|(t, _), _| t != tenant);
        self.instances.retain(|(t, _), _| t != tenant);
        self.instances_by_interface.retain(|(t, _), _| t != tenant);
    }
}

/// In-memory TwinStore and TenantManager implementation
pub struct InMemoryStore {
    store: Arc<RwLock<MemoryStore>>,
    config: InMemoryConfig,
}

impl InMemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::new_with_config(InMemoryConfig::default())
    }

    /// Create a new in-memory store with configuration
    pub fn new_with_config(config: InMemoryConfig) -> Self {
        info!("Creating in-memory store with config: {:?}", config);
        Self {
            store: Arc::new(RwLock::new(MemoryStore::default())),
            config,
        }
    }

    /// Get (interface, instance) counts across all tenants
    pub async fn stats(&self) -> (usize, usize) {
        let store = self.store.read().await;
        (store.interfaces.len(), store.instances.len())
    }

    /// Clear all data from the store
    pub async fn clear(&self) {
        let mut store = self.store.write().await;
        *store = MemoryStore::default();
        info!("Cleared in-memory store");
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TwinStore for InMemoryStore {
    async fn upsert_interface(&self, tenant: &TenantId, interface: TwinInterface) -> Result<(), StoreError> {
        let mut store = self.store.write().await;

        let key = (tenant.clone(), interface.name.clone());
        if !store.interfaces.contains_key(&key) {
            if let Some(max) = self.config.max_interfaces {
                if store.interface_count(tenant) >= max {
                    return Err(StoreError::CapacityExceeded(format!(
                        "tenant {} already holds {} interfaces",
                        tenant, max
                    )));
                }
            }
        }

        if self.config.verbose {
            debug!("Upserting interface {} for tenant {}", interface.name, tenant);
        }
        store.interfaces.insert(key, interface);
        Ok(())
    }

    async fn get_interface(&self, tenant: &TenantId, name: &str) -> Result<Option<TwinInterface>, StoreError> {
        let store = self.store.read().await;
        Ok(store.interfaces.get(&(tenant.clone(), name.to_string())).cloned())
    }

    async fn list_interfaces(&self, tenant: &TenantId) -> Result<Vec<TwinInterface>, StoreError> {
        let store = self.store.read().await;
        let mut interfaces: Vec<TwinInterface> = store
            .interfaces
            .iter()
            .filter(|((t, _), _)| t == tenant)
            .map(|(_, interface)| interface.clone())
            .collect();
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(interfaces)
    }

    async fn delete_interface(&self, tenant: &TenantId, name: &str) -> Result<bool, StoreError> {
        let mut store = self.store.write().await;

        let live_instances = store
            .instances_by_interface
            .get(&(tenant.clone(), name.to_string()))
            .map(|names| names.len())
            .unwrap_or(0);
        if live_instances > 0 {
            return Err(StoreError::ConstraintViolation(format!(
                "interface {} still has {} instances",
                name, live_instances
            )));
        }

        let deleted = store.interfaces.remove(&(tenant.clone(), name.to_string())).is_some();
        if self.config.verbose && deleted {
            debug!("Deleted interface {} for tenant {}", name, tenant);
        }
        Ok(deleted)
    }

    async fn upsert_instance(&self, tenant: &TenantId, instance: TwinInstance) -> Result<(), StoreError> {
        let mut store = self.store.write().await;

        let interface_key = (tenant.clone(), instance.interface.clone());
        if !store.interfaces.contains_key(&interface_key) {
            return Err(StoreError::InterfaceNotFound(instance.interface.clone()));
        }

        let key = (tenant.clone(), instance.name.clone());
        if !store.instances.contains_key(&key) {
            if let Some(max) = self.config.max_instances {
                if store.instance_count(tenant) >= max {
                    return Err(StoreError::CapacityExceeded(format!(
                        "tenant {} already holds {} instances",
                        tenant, max
                    )));
                }
            }
        }

        if self.config.verbose {
            debug!("Upserting instance {} for tenant {}", instance.name, tenant);
        }
        store.insert_instance(tenant, instance);
        Ok(())
    }

    async fn get_instance(&self, tenant: &TenantId, name: &str) -> Result<Option<TwinInstance>, StoreError> {
        let store = self.store.read().await;
        Ok(store.instances.get(&(tenant.clone(), name.to_string())).cloned())
    }

    async fn list_instances(&self, tenant: &TenantId) -> Result<Vec<TwinInstance>, StoreError> {
        let store = self.store.read().await;
        let mut instances: Vec<TwinInstance> = store
            .instances
            .iter()
            .filter(|((t, _), _)| t == tenant)
            .map(|(_, instance)| instance.clone())
            .collect();
        instances.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(instances)
    }

    async fn delete_instance(&self, tenant: &TenantId, name: &str) -> Result<bool, StoreError> {
        let mut store = self.store.write().await;
        let deleted = store.remove_instance(tenant, name);
        if self.config.verbose && deleted {
            debug!("Deleted instance {} for tenant {}", name, tenant);
        }
        Ok(deleted)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let (interface_count, instance_count) = self.stats().await;
        debug!(
            "In-memory store health check: {} interfaces, {} instances",
            interface_count, instance_count
        );
        Ok(())
    }
}

#[async_trait]
impl TenantManager for InMemoryStore {
    async fn create_tenant(&self, tenant: TenantInfo) -> Result<(), CoreError> {
        let mut store = self.store.write().await;
        if store.tenants.contains_key(&tenant.id) {
            return Err(CoreError::Tenant(format!("tenant {} already exists", tenant.id)));
        }
        info!("Created tenant {}", tenant.id);
        store.tenants.insert(tenant.id.clone(), tenant);
        Ok(())
    }

    async fn get_tenant(&self, id: &TenantId) -> Result<Option<TenantInfo>, CoreError> {
        let store = self.store.read().await;
        Ok(store.tenants.get(id).cloned())
    }

    async fn list_tenants(&self) -> Result<Vec<TenantInfo>, CoreError> {
        let store = self.store.read().await;
        let mut tenants: Vec<TenantInfo> = store.tenants.values().cloned().collect();
        tenants.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(tenants)
    }

    async fn update_tenant(&self, tenant: TenantInfo) -> Result<(), CoreError> {
        let mut store = self.store.write().await;
        if !store.tenants.contains_key(&tenant.id) {
            return Err(CoreError::Tenant(format!("tenant {} does not exist", tenant.id)));
        }
        store.tenants.insert(tenant.id.clone(), tenant);
        Ok(())
    }

    async fn delete_tenant(&self, id: &TenantId) -> Result<(), CoreError> {
        let mut store = self.store.write().await;
        if store.tenants.remove(id).is_none() {
            return Err(CoreError::Tenant(format!("tenant {} does not exist", id)));
        }
        // Dropping a tenant drops its twin data with it
        store.remove_tenant_data(id);
        info!("Deleted tenant {}", id);
        Ok(())
    }

    async fn tenant_exists(&self, id: &TenantId) -> Result<bool, CoreError> {
        let store = self.store.read().await;
        Ok(store.tenants.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use twinscale_core::tenant::TenantInfo;
    use twinscale_core::types::PropertyDef;

    #[tokio::test]
    async fn test_interface_upsert_roundtrip() {
        let store = InMemoryStore::new();
        let tenant = TenantId::new("test_tenant");

        let interface = TwinInterface::new("Sensor")
            .with_property(PropertyDef::new("temperature", "double").with_unit("celsius"));

        store.upsert_interface(&tenant, interface.clone()).await.unwrap();
        store.upsert_interface(&tenant, interface).await.unwrap();

        let retrieved = store.get_interface(&tenant, "Sensor").await.unwrap().unwrap();
        assert_eq!(retrieved.name, "Sensor");
        assert_eq!(retrieved.properties[0].unit, Some("celsius".to_string()));

        let listed = store.list_interfaces(&tenant).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_instance_requires_interface() {
        let store = InMemoryStore::new();
        let tenant = TenantId::new("test_tenant");

        let orphan = TwinInstance::new("sensor-1", "Sensor");
        let err = store.upsert_instance(&tenant, orphan).await.unwrap_err();
        assert!(matches!(err, StoreError::InterfaceNotFound(name) if name == "Sensor"));
    }

    #[tokio::test]
    async fn test_interface_delete_blocked_by_instances() {
        let store = InMemoryStore::new();
        let tenant = TenantId::new("test_tenant");

        store.upsert_interface(&tenant, TwinInterface::new("Sensor")).await.unwrap();
        store
            .upsert_instance(&tenant, TwinInstance::new("sensor-1", "Sensor"))
            .await
            .unwrap();

        let err = store.delete_interface(&tenant, "Sensor").await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));

        assert!(store.delete_instance(&tenant, "sensor-1").await.unwrap());
        assert!(store.delete_interface(&tenant, "Sensor").await.unwrap());
    }

    #[tokio::test]
    async fn test_tenant_isolation() {
        let store = InMemoryStore::new();
        let tenant_a = TenantId::new("tenant_a");
        let tenant_b = TenantId::new("tenant_b");

        store.upsert_interface(&tenant_a, TwinInterface::new("Sensor")).await.unwrap();

        assert!(store.get_interface(&tenant_a, "Sensor").await.unwrap().is_some());
        assert!(store.get_interface(&tenant_b, "Sensor").await.unwrap().is_none());
        assert!(store.list_interfaces(&tenant_b).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_instance_property_values() {
        let store = InMemoryStore::new();
        let tenant = TenantId::new("test_tenant");

        store.upsert_interface(&tenant, TwinInterface::new("Sensor")).await.unwrap();
        let instance = TwinInstance::new("sensor-1", "Sensor")
            .with_property("temperature", json!(21.5));
        store.upsert_instance(&tenant, instance).await.unwrap();

        let retrieved = store.get_instance(&tenant, "sensor-1").await.unwrap().unwrap();
        assert_eq!(retrieved.property("temperature"), Some(&json!(21.5)));
    }

    #[tokio::test]
    async fn test_capacity_limits() {
        let config = InMemoryConfig {
            max_interfaces: Some(1),
            max_instances: Some(1),
            verbose: false,
        };
        let store = InMemoryStore::new_with_config(config);
        let tenant = TenantId::new("test_tenant");

        store.upsert_interface(&tenant, TwinInterface::new("Sensor")).await.unwrap();
        // Replacing the existing interface is fine
        store.upsert_interface(&tenant, TwinInterface::new("Sensor")).await.unwrap();

        let err = store
            .upsert_interface(&tenant, TwinInterface::new("Actuator"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded(_)));
    }

    #[tokio::test]
    async fn test_tenant_lifecycle() {
        let store = InMemoryStore::new();
        let id = TenantId::new("factory_a");

        store
            .create_tenant(TenantInfo::new(id.clone()).with_name("Factory A").activate())
            .await
            .unwrap();
        assert!(store.tenant_exists(&id).await.unwrap());

        let err = store.create_tenant(TenantInfo::new(id.clone())).await.unwrap_err();
        assert!(matches!(err, CoreError::Tenant(_)));

        store.upsert_interface(&id, TwinInterface::new("Sensor")).await.unwrap();
        store.delete_tenant(&id).await.unwrap();

        assert!(!store.tenant_exists(&id).await.unwrap());
        assert!(store.list_interfaces(&id).await.unwrap().is_empty());
    }
}
