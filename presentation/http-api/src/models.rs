//! Data models for the HTTP API

use serde::{Deserialize, Serialize};
use twinscale_core::tenant::TenantStatus;

/// Pagination parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PaginationParams {
    /// Requested page, 1-based
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(100).max(1)
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationInfo,
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Slice `items` according to `params`
pub fn paginate<T>(items: Vec<T>, params: &PaginationParams) -> PaginatedResponse<T> {
    let page = params.page();
    let limit = params.limit();
    let total = items.len() as u64;
    let pages = ((total + limit as u64 - 1) / limit as u64) as u32;

    let data: Vec<T> = items
        .into_iter()
        .skip(((page as u64 - 1) * limit as u64) as usize)
        .take(limit as usize)
        .collect();

    PaginatedResponse {
        data,
        pagination: PaginationInfo {
            page,
            limit,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        },
    }
}

/// Query parameters for tenant listing
#[derive(Debug, Default, Deserialize)]
pub struct TenantListParams {
    pub active_only: Option<bool>,
}

/// Request body for creating a tenant
#[derive(Debug, Deserialize)]
pub struct CreateTenantRequest {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Request body for updating a tenant
#[derive(Debug, Deserialize)]
pub struct UpdateTenantRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TenantStatus>,
    pub metadata: Option<serde_json::Value>,
}

/// Result of a tenant validation check
#[derive(Debug, Serialize)]
pub struct TenantValidation {
    pub tenant_id: String,
    pub valid: bool,
}

/// Statistics about a tenant's data
#[derive(Debug, Serialize)]
pub struct TenantStats {
    pub tenant_id: String,
    pub interface_count: usize,
    pub instance_count: usize,
    pub last_updated: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_paginate_slices_and_counts() {
        let params = PaginationParams {
            page: Some(2),
            limit: Some(2),
        };
        let response = paginate(vec![1, 2, 3, 4, 5], &params);

        assert_eq!(response.data, vec![3, 4]);
        assert_eq!(response.pagination.total, 5);
        assert_eq!(response.pagination.pages, 3);
        assert!(response.pagination.has_next);
        assert!(response.pagination.has_prev);
    }

    #[test]
    fn test_paginate_past_the_end() {
        let params = PaginationParams {
            page: Some(9),
            limit: Some(10),
        };
        let response = paginate(vec![1, 2, 3], &params);
        assert!(response.data.is_empty());
        assert!(!response.pagination.has_next);
    }
}
