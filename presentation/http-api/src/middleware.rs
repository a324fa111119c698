//! Middleware and request utilities for the HTTP API

use crate::ApiResponse;
use axum::extract::Request;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{Json, Response};
use std::time::Duration;
use tracing::warn;
use twinscale_core::types::TenantId;

/// Header carrying the tenant context
pub const TENANT_HEADER: &str = "X-Tenant-ID";

/// Extract the tenant ID from request headers
pub fn extract_tenant_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(TENANT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

/// Extract the tenant ID or produce the 400 response the API returns
/// when the header is missing
pub fn require_tenant(headers: &HeaderMap) -> Result<TenantId, (StatusCode, Json<ApiResponse<()>>)> {
    match extract_tenant_id(headers) {
        Some(id) => Ok(TenantId::new(id)),
        None => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Missing {} header", TENANT_HEADER))),
        )),
    }
}

/// Request timeout middleware
pub async fn request_timeout(
    request: Request,
    next: Next,
    timeout: Duration,
) -> Result<Response, StatusCode> {
    match tokio::time::timeout(timeout, next.run(request)).await {
        Ok(response) => Ok(response),
        Err(_) => {
            warn!("Request timed out after {:?}", timeout);
            Err(StatusCode::REQUEST_TIMEOUT)
        }
    }
}
