//! Tenant management handlers

use crate::models::{CreateTenantRequest, TenantListParams, TenantStats, TenantValidation, UpdateTenantRequest};
use crate::{handle_core_error, ApiResponse, AppState};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use tracing::{debug, info};
use twinscale_core::prelude::*;
use twinscale_core::tenant::TenantInfo;

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

/// Routes mounted under `/v2/tenants`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tenants).post(create_tenant))
        .route(
            "/:tenant_id",
            get(get_tenant).put(update_tenant).delete(delete_tenant),
        )
        .route("/:tenant_id/stats", get(tenant_stats))
        .route("/validate/:tenant_id", get(validate_tenant))
}

fn tenant_not_found(tenant_id: &str) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(format!("Tenant not found: {}", tenant_id))),
    )
}

/// List tenants, optionally only the active ones
pub async fn list_tenants(
    State(state): State<AppState>,
    Query(params): Query<TenantListParams>,
) -> Result<Json<ApiResponse<Vec<TenantInfo>>>, HandlerError> {
    debug!("Listing tenants (active_only={:?})", params.active_only);

    let mut tenants = state.tenants.list_tenants().await.map_err(handle_core_error)?;
    if params.active_only.unwrap_or(false) {
        tenants.retain(|tenant| tenant.is_active());
    }

    info!("Listed {} tenants", tenants.len());
    Ok(Json(ApiResponse::success(tenants)))
}

/// Create a new tenant
pub async fn create_tenant(
    State(state): State<AppState>,
    Json(request): Json<CreateTenantRequest>,
) -> Result<Json<ApiResponse<TenantInfo>>, HandlerError> {
    info!("Creating tenant: {}", request.id);

    let mut tenant = TenantInfo::new(TenantId::new(&request.id));
    if let Some(name) = request.name {
        tenant = tenant.with_name(name);
    }
    if let Some(description) = request.description {
        tenant = tenant.with_description(description);
    }
    if let Some(metadata) = request.metadata {
        tenant.metadata = metadata;
    }
    let tenant = tenant.activate();

    state.tenants.create_tenant(tenant.clone()).await.map_err(handle_core_error)?;

    info!("Created tenant: {}", tenant.id);
    Ok(Json(ApiResponse::success(tenant)))
}

/// Get a specific tenant
pub async fn get_tenant(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> Result<Json<ApiResponse<TenantInfo>>, HandlerError> {
    debug!("Getting tenant: {}", tenant_id);

    let id = TenantId::new(&tenant_id);
    match state.tenants.get_tenant(&id).await.map_err(handle_core_error)? {
        Some(tenant) => Ok(Json(ApiResponse::success(tenant))),
        None => Err(tenant_not_found(&tenant_id)),
    }
}

/// Update a tenant
pub async fn update_tenant(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    Json(request): Json<UpdateTenantRequest>,
) -> Result<Json<ApiResponse<TenantInfo>>, HandlerError> {
    info!("Updating tenant: {}", tenant_id);

    let id = TenantId::new(&tenant_id);
    let mut tenant = state
        .tenants
        .get_tenant(&id)
        .await
        .map_err(handle_core_error)?
        .ok_or_else(|| tenant_not_found(&tenant_id))?;

    if let Some(name) = request.name {
        tenant.name = Some(name);
    }
    if let Some(description) = request.description {
        tenant.description = Some(description);
    }
    if let Some(status) = request.status {
        tenant.status = status;
    }
    if let Some(metadata) = request.metadata {
        tenant.metadata = metadata;
    }
    tenant.updated_at = chrono::Utc::now();

    state.tenants.update_tenant(tenant.clone()).await.map_err(handle_core_error)?;

    info!("Updated tenant: {}", tenant.id);
    Ok(Json(ApiResponse::success(tenant)))
}

/// Delete a tenant and all its twin data
pub async fn delete_tenant(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, HandlerError> {
    info!("Deleting tenant: {}", tenant_id);

    let id = TenantId::new(&tenant_id);
    if !state.tenants.tenant_exists(&id).await.map_err(handle_core_error)? {
        return Err(tenant_not_found(&tenant_id));
    }
    state.tenants.delete_tenant(&id).await.map_err(handle_core_error)?;

    info!("Deleted tenant: {}", tenant_id);
    Ok(Json(ApiResponse::success(())))
}

/// Statistics about a tenant's twin data
pub async fn tenant_stats(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> Result<Json<ApiResponse<TenantStats>>, HandlerError> {
    debug!("Computing stats for tenant: {}", tenant_id);

    let id = TenantId::new(&tenant_id);
    if !state.tenants.tenant_exists(&id).await.map_err(handle_core_error)? {
        return Err(tenant_not_found(&tenant_id));
    }

    let interfaces = state
        .store
        .list_interfaces(&id)
        .await
        .map_err(|e| handle_core_error(CoreError::Store(e)))?;
    let instances = state
        .store
        .list_instances(&id)
        .await
        .map_err(|e| handle_core_error(CoreError::Store(e)))?;

    let stats = TenantStats {
        tenant_id,
        interface_count: interfaces.len(),
        instance_count: instances.len(),
        last_updated: chrono::Utc::now().to_rfc3339(),
    };
    Ok(Json(ApiResponse::success(stats)))
}

/// Check whether a tenant exists and is active
pub async fn validate_tenant(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> Result<Json<ApiResponse<TenantValidation>>, HandlerError> {
    debug!("Validating tenant: {}", tenant_id);

    let id = TenantId::new(&tenant_id);
    let valid = state
        .tenants
        .get_tenant(&id)
        .await
        .map_err(handle_core_error)?
        .map(|tenant| tenant.is_active())
        .unwrap_or(false);

    Ok(Json(ApiResponse::success(TenantValidation { tenant_id, valid })))
}
