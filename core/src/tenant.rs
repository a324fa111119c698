//! Tenant management utilities and types

use crate::types::TenantId;
use serde::{Deserialize, Serialize};

/// Tenant metadata and configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantInfo {
    /// Unique tenant identifier
    pub id: TenantId,
    /// Human-readable name
    pub name: Option<String>,
    /// Description of the tenant
    pub description: Option<String>,
    /// Tenant status
    pub status: TenantStatus,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last updated timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Additional metadata
    pub metadata: serde_json::Value,
}

/// Status of a tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenantStatus {
    /// Tenant is active and operational
    Active,
    /// Tenant is suspended (read-only)
    Suspended,
    /// Tenant is being created
    Creating,
    /// Tenant is being deleted
    Deleting,
    /// Tenant has been deleted
    Deleted,
}

impl std::fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenantStatus::Active => write!(f, "Active"),
            TenantStatus::Suspended => write!(f, "Suspended"),
            TenantStatus::Creating => write!(f, "Creating"),
            TenantStatus::Deleting => write!(f, "Deleting"),
            TenantStatus::Deleted => write!(f, "Deleted"),
        }
    }
}

impl std::str::FromStr for TenantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(TenantStatus::Active),
            "suspended" => Ok(TenantStatus::Suspended),
            "creating" => Ok(TenantStatus::Creating),
            "deleting" => Ok(TenantStatus::Deleting),
            "deleted" => Ok(TenantStatus::Deleted),
            _ => Err(format!("Unknown tenant status: {}", s)),
        }
    }
}

/// Trait for tenant management operations
#[async_trait::async_trait]
pub trait TenantManager: Send + Sync {
    /// Create a new tenant
    async fn create_tenant(&self, tenant: TenantInfo) -> Result<(), crate::errors::CoreError>;

    /// Get tenant information
    async fn get_tenant(&self, id: &TenantId) -> Result<Option<TenantInfo>, crate::errors::CoreError>;

    /// List all tenants
    async fn list_tenants(&self) -> Result<Vec<TenantInfo>, crate::errors::CoreError>;

    /// Update tenant information
    async fn update_tenant(&self, tenant: TenantInfo) -> Result<(), crate::errors::CoreError>;

    /// Delete a tenant
    async fn delete_tenant(&self, id: &TenantId) -> Result<(), crate::errors::CoreError>;

    /// Check if a tenant exists
    async fn tenant_exists(&self, id: &TenantId) -> Result<bool, crate::errors::CoreError>;
}

impl TenantInfo {
    /// Create a new TenantInfo with minimal required fields
    pub fn new(id: TenantId) -> Self {
        let now = chrono::Utc::now();
        Self {
            id,
            name: None,
            description: None,
            status: TenantStatus::Creating,
            created_at: now,
            updated_at: now,
            metadata: serde_json::Value::Object(Default::default()),
        }
    }

    /// Set the tenant name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the tenant description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the tenant as active
    pub fn activate(mut self) -> Self {
        self.status = TenantStatus::Active;
        self.updated_at = chrono::Utc::now();
        self
    }

    /// Whether the tenant is currently operational
    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_info_builder() {
        let tenant = TenantInfo::new(TenantId::new("factory_a"))
            .with_name("Factory A")
            .with_description("Pilot deployment")
            .activate();

        assert_eq!(tenant.id.as_str(), "factory_a");
        assert_eq!(tenant.name, Some("Factory A".to_string()));
        assert!(tenant.is_active());
    }

    #[test]
    fn test_tenant_status_from_str() {
        assert_eq!("active".parse::<TenantStatus>(), Ok(TenantStatus::Active));
        assert_eq!("Suspended".parse::<TenantStatus>(), Ok(TenantStatus::Suspended));
        assert!("bogus".parse::<TenantStatus>().is_err());
    }
}
