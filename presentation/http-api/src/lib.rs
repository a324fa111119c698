//! HTTP presentation layer for TwinScale-Lite
//!
//! Aggregates the twinscale and tenant sub-routers under their `/v2`
//! prefixes and exposes the liveness endpoint the frontend probes.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower::ServiceBuilder;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use twinscale_core::prelude::*;
use twinscale_core::tenant::TenantManager;

pub mod config;
mod handlers;
mod middleware;
mod models;

pub use models::*;

/// HTTP API server configuration
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    /// Server bind address
    pub bind_address: SocketAddr,
    /// Enable CORS
    pub enable_cors: bool,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".parse().expect("valid default bind address"),
            enable_cors: true,
            request_timeout: 30,
        }
    }
}

/// HTTP presentation adapter
pub struct HttpApi {
    config: HttpApiConfig,
}

impl HttpApi {
    /// Create a new HTTP API adapter
    pub fn new(config: HttpApiConfig) -> Self {
        Self { config }
    }

    /// Build the Axum router with all routes
    fn build_router(
        &self,
        store: Arc<dyn TwinStore>,
        tenants: Arc<dyn TenantManager>,
    ) -> NormalizePath<Router> {
        let app_state = AppState {
            store,
            tenants,
            config: self.config.clone(),
        };

        let mut router = Router::new()
            // TwinScale resources
            .nest("/v2/twinscale", handlers::twinscale::routes())
            // Tenant management
            .nest("/v2/tenants", handlers::tenants::routes())
            // Liveness probe
            .route("/test", get(test_api))
            .with_state(app_state);

        router = router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

        if self.config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        let timeout = Duration::from_secs(self.config.request_timeout);
        let router = router.layer(axum::middleware::from_fn(
            move |request: axum::extract::Request, next: axum::middleware::Next| {
                middleware::request_timeout(request, next, timeout)
            },
        ));

        // axum 0.7 nesting serves a sub-router's `/` route at the prefix without a
        // trailing slash, so `/v2/tenants/` would 404. Normalize trailing slashes
        // before routing so both `/v2/tenants` and `/v2/tenants/` reach the handler.
        NormalizePathLayer::trim_trailing_slash().layer(router)
    }
}

/// Liveness endpoint for the aggregated API
async fn test_api() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "TwinScale-Lite API is working" }))
}

#[async_trait]
impl PresentationAdapter for HttpApi {
    async fn start(
        &self,
        store: Arc<dyn TwinStore>,
        tenants: Arc<dyn TenantManager>,
    ) -> Result<(), PresentationError> {
        info!("Starting TwinScale-Lite API server on {}", self.config.bind_address);

        let router = self.build_router(store, tenants);

        let listener = tokio::net::TcpListener::bind(&self.config.bind_address)
            .await
            .map_err(|e| {
                PresentationError::StartupFailed(format!(
                    "Failed to bind to {}: {}",
                    self.config.bind_address, e
                ))
            })?;

        info!("TwinScale-Lite API listening on {}", self.config.bind_address);

        let make_service =
            axum::ServiceExt::<axum::extract::Request>::into_make_service(router);
        axum::serve(listener, make_service)
            .await
            .map_err(|e| PresentationError::StartupFailed(format!("Server error: {}", e)))?;

        Ok(())
    }

    async fn stop(&self) -> Result<(), PresentationError> {
        info!("Stopping TwinScale-Lite API server");
        Ok(())
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TwinStore>,
    pub tenants: Arc<dyn TenantManager>,
    pub config: HttpApiConfig,
}

/// Standard API response wrapper
#[derive(Debug, serde::Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Convert core errors to HTTP status codes and responses
pub fn handle_core_error(error: CoreError) -> (StatusCode, Json<ApiResponse<()>>) {
    let (status, message) = match error {
        CoreError::Tenant(msg) => (StatusCode::BAD_REQUEST, format!("Tenant error: {}", msg)),
        CoreError::Store(StoreError::InterfaceNotFound(msg)) => {
            (StatusCode::NOT_FOUND, format!("Interface not found: {}", msg))
        }
        CoreError::Store(StoreError::InstanceNotFound(msg)) => {
            (StatusCode::NOT_FOUND, format!("Instance not found: {}", msg))
        }
        CoreError::Store(StoreError::ConstraintViolation(msg)) => {
            (StatusCode::CONFLICT, format!("Constraint violation: {}", msg))
        }
        CoreError::Store(StoreError::TenantIsolationViolation(msg)) => {
            (StatusCode::FORBIDDEN, format!("Access denied: {}", msg))
        }
        CoreError::Store(StoreError::CapacityExceeded(msg)) => {
            (StatusCode::INSUFFICIENT_STORAGE, format!("Capacity exceeded: {}", msg))
        }
        CoreError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string()),
        CoreError::Ontology(e) => (StatusCode::BAD_REQUEST, format!("Invalid identifier: {}", e)),
        CoreError::Serialization(_) => (StatusCode::BAD_REQUEST, "Invalid request format".to_string()),
        CoreError::Configuration(msg) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Configuration error: {}", msg))
        }
        CoreError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {}", msg)),
    };

    error!("API error: {} - {}", status, message);
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;
    use twinscale_adapter_in_memory::InMemoryStore;

    fn test_router() -> NormalizePath<Router> {
        let store = Arc::new(InMemoryStore::new());
        let api = HttpApi::new(HttpApiConfig::default());
        api.build_router(store.clone() as Arc<dyn TwinStore>, store as Arc<dyn TenantManager>)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = HttpApiConfig::default();
        assert_eq!(config.bind_address.port(), 8000);
        assert!(config.enable_cors);
        assert_eq!(config.request_timeout, 30);
    }

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success("test data");
        assert!(response.success);
        assert_eq!(response.data, Some("test data"));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_api_response_error() {
        let response = ApiResponse::error("test error");
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error, Some("test error".to_string()));
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let response = test_router()
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "TwinScale-Lite API is working" })
        );
    }

    #[tokio::test]
    async fn test_twinscale_requires_tenant_header() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/v2/twinscale/interfaces")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_interface_roundtrip_over_http() {
        let router = test_router();

        let interface = json!({
            "name": "Sensor",
            "description": "A temperature sensor",
            "properties": [
                {"name": "temperature", "property_type": "double", "writable": false,
                 "minimum": null, "maximum": null, "unit": "celsius"}
            ]
        });

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v2/twinscale/interfaces")
                    .header("content-type", "application/json")
                    .header("X-Tenant-ID", "factory_a")
                    .body(Body::from(interface.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/v2/twinscale/interfaces/Sensor")
                    .header("X-Tenant-ID", "factory_a")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["name"], json!("Sensor"));
    }

    #[tokio::test]
    async fn test_tenant_create_validate_and_filter() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v2/tenants/")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"id": "factory_a", "name": "Factory A"}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Suspend it, then make sure active_only filters it out
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/v2/tenants/factory_a")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"status": "Suspended"}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/v2/tenants/?active_only=true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(response).await["data"], json!([]));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/v2/tenants/validate/factory_a")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["valid"], json!(false));
    }

    #[tokio::test]
    async fn test_tenant_listing() {
        let response = test_router()
            .oneshot(Request::builder().uri("/v2/tenants/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"], json!([]));
    }
}
