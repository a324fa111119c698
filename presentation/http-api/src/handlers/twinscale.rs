//! TwinScale resource handlers: interfaces and instances

use crate::models::{paginate, PaginatedResponse, PaginationParams};
use crate::{handle_core_error, middleware, ApiResponse, AppState};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tracing::{debug, info};
use twinscale_core::ontology;
use twinscale_core::prelude::*;

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

/// Routes mounted under `/v2/twinscale`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/interfaces", get(list_interfaces).post(create_interface))
        .route(
            "/interfaces/:name",
            get(get_interface).put(update_interface).delete(delete_interface),
        )
        .route("/instances", get(list_instances).post(create_instance))
        .route(
            "/instances/:name",
            get(get_instance).put(update_instance).delete(delete_instance),
        )
        .route("/instances/:name/properties/:property", get(get_instance_property))
        .route("/ontology/classes", get(ontology_classes))
        .route("/health", get(health_check))
}

fn store_error(error: StoreError) -> HandlerError {
    handle_core_error(CoreError::Store(error))
}

fn not_found(what: &str, name: &str) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(format!("{} not found: {}", what, name))),
    )
}

/// List interfaces of the tenant
pub async fn list_interfaces(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<TwinInterface>>>, HandlerError> {
    let tenant = middleware::require_tenant(&headers)?;
    debug!("Listing interfaces for tenant {}", tenant);

    let interfaces = state.store.list_interfaces(&tenant).await.map_err(store_error)?;
    Ok(Json(ApiResponse::success(paginate(interfaces, &params))))
}

/// Create or replace an interface
pub async fn create_interface(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(interface): Json<TwinInterface>,
) -> Result<Json<ApiResponse<TwinInterface>>, HandlerError> {
    let tenant = middleware::require_tenant(&headers)?;

    // The name must mint a valid data URI
    ontology::create_interface_uri(&interface.name).map_err(|e| handle_core_error(e.into()))?;

    info!("Creating interface {} for tenant {}", interface.name, tenant);
    state
        .store
        .upsert_interface(&tenant, interface.clone())
        .await
        .map_err(store_error)?;
    Ok(Json(ApiResponse::success(interface)))
}

/// Get a specific interface
pub async fn get_interface(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<TwinInterface>>, HandlerError> {
    let tenant = middleware::require_tenant(&headers)?;
    debug!("Getting interface {} for tenant {}", name, tenant);

    match state.store.get_interface(&tenant, &name).await.map_err(store_error)? {
        Some(interface) => Ok(Json(ApiResponse::success(interface))),
        None => Err(not_found("Interface", &name)),
    }
}

/// Update an interface
pub async fn update_interface(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(interface): Json<TwinInterface>,
) -> Result<Json<ApiResponse<TwinInterface>>, HandlerError> {
    let tenant = middleware::require_tenant(&headers)?;

    if interface.name != name {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Interface name in path does not match body")),
        ));
    }
    if state
        .store
        .get_interface(&tenant, &name)
        .await
        .map_err(store_error)?
        .is_none()
    {
        return Err(not_found("Interface", &name));
    }

    info!("Updating interface {} for tenant {}", name, tenant);
    state
        .store
        .upsert_interface(&tenant, interface.clone())
        .await
        .map_err(store_error)?;
    Ok(Json(ApiResponse::success(interface)))
}

/// Delete an interface
pub async fn delete_interface(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<()>>, HandlerError> {
    let tenant = middleware::require_tenant(&headers)?;
    info!("Deleting interface {} for tenant {}", name, tenant);

    if state.store.delete_interface(&tenant, &name).await.map_err(store_error)? {
        Ok(Json(ApiResponse::success(())))
    } else {
        Err(not_found("Interface", &name))
    }
}

/// List instances of the tenant
pub async fn list_instances(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<TwinInstance>>>, HandlerError> {
    let tenant = middleware::require_tenant(&headers)?;
    debug!("Listing instances for tenant {}", tenant);

    let instances = state.store.list_instances(&tenant).await.map_err(store_error)?;
    Ok(Json(ApiResponse::success(paginate(instances, &params))))
}

/// Create or replace an instance
pub async fn create_instance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(instance): Json<TwinInstance>,
) -> Result<Json<ApiResponse<TwinInstance>>, HandlerError> {
    let tenant = middleware::require_tenant(&headers)?;

    ontology::create_instance_uri(&instance.name).map_err(|e| handle_core_error(e.into()))?;

    info!(
        "Creating instance {} of {} for tenant {}",
        instance.name, instance.interface, tenant
    );
    state
        .store
        .upsert_instance(&tenant, instance.clone())
        .await
        .map_err(store_error)?;
    Ok(Json(ApiResponse::success(instance)))
}

/// Get a specific instance
pub async fn get_instance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<TwinInstance>>, HandlerError> {
    let tenant = middleware::require_tenant(&headers)?;
    debug!("Getting instance {} for tenant {}", name, tenant);

    match state.store.get_instance(&tenant, &name).await.map_err(store_error)? {
        Some(instance) => Ok(Json(ApiResponse::success(instance))),
        None => Err(not_found("Instance", &name)),
    }
}

/// Update an instance
pub async fn update_instance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(instance): Json<TwinInstance>,
) -> Result<Json<ApiResponse<TwinInstance>>, HandlerError> {
    let tenant = middleware::require_tenant(&headers)?;

    if instance.name != name {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Instance name in path does not match body")),
        ));
    }
    if state
        .store
        .get_instance(&tenant, &name)
        .await
        .map_err(store_error)?
        .is_none()
    {
        return Err(not_found("Instance", &name));
    }

    info!("Updating instance {} for tenant {}", name, tenant);
    state
        .store
        .upsert_instance(&tenant, instance.clone())
        .await
        .map_err(store_error)?;
    Ok(Json(ApiResponse::success(instance)))
}

/// Delete an instance
pub async fn delete_instance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<()>>, HandlerError> {
    let tenant = middleware::require_tenant(&headers)?;
    info!("Deleting instance {} for tenant {}", name, tenant);

    if state.store.delete_instance(&tenant, &name).await.map_err(store_error)? {
        Ok(Json(ApiResponse::success(())))
    } else {
        Err(not_found("Instance", &name))
    }
}

/// Get a single property value of an instance
pub async fn get_instance_property(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((name, property)): Path<(String, String)>,
) -> Result<Json<ApiResponse<serde_json::Value>>, HandlerError> {
    let tenant = middleware::require_tenant(&headers)?;
    debug!("Getting property {} of instance {} for tenant {}", property, name, tenant);

    let instance = state
        .store
        .get_instance(&tenant, &name)
        .await
        .map_err(store_error)?
        .ok_or_else(|| not_found("Instance", &name))?;

    match instance.property(&property) {
        Some(value) => Ok(Json(ApiResponse::success(value.clone()))),
        None => Err(not_found("Property", &property)),
    }
}

/// The classes the TwinScale ontology declares
pub async fn ontology_classes() -> Json<ApiResponse<Vec<String>>> {
    let classes = ontology::ontology_classes()
        .iter()
        .map(|class| class.as_str().to_string())
        .collect();
    Json(ApiResponse::success(classes))
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Store health check endpoint
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthStatus>>, HandlerError> {
    match state.store.health_check().await {
        Ok(_) => {
            let health = HealthStatus {
                status: "healthy".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
            };
            Ok(Json(ApiResponse::success(health)))
        }
        Err(e) => {
            let error_msg = format!("Twin store unhealthy: {}", e);
            Err((StatusCode::SERVICE_UNAVAILABLE, Json(ApiResponse::error(error_msg))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_creation() {
        let health = HealthStatus {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, "0.1.0");
    }
}
