//! Product catalog HTTP API.
//!
//! JSON endpoints:
//! - `GET  /`                                   service banner
//! - `GET  /api/products`                       list every product
//! - `POST /api/products`                       create a product (201)
//! - `GET  /api/products/{id}`                  fetch one product
//! - `GET  /api/products/category/{category}`   case-insensitive category filter
//! - `POST /api/products/compare`               compare 2 to 5 products
//!
//! The trailing-slash forms of the collection routes are accepted as well.
//! Unknown paths answer with a JSON 404 body.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use catalog_core::catalog::{Catalog, ProductStore};
use catalog_core::comparison::{ComparisonEngine, ComparisonResult};
use catalog_core::domain::product::{Product, ProductFields, ProductId};
use catalog_core::errors::{CatalogError, InterfaceError};
use catalog_db::DbPool;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::health;

#[derive(Clone)]
pub struct ApiState {
    catalog: Catalog<dyn ProductStore>,
    engine: ComparisonEngine<dyn ProductStore>,
}

impl ApiState {
    pub fn new(catalog: Catalog<dyn ProductStore>) -> Self {
        Self { engine: ComparisonEngine::new(catalog.clone()), catalog }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub product_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Banner {
    pub message: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RouteNotFound {
    pub detail: &'static str,
    pub path: String,
    pub method: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    pub correlation_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_ids: Vec<ProductId>,
}

/// Interface error rendered as a JSON response.
#[derive(Debug)]
pub struct ApiError(InterfaceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, missing_ids) = match self.0 {
            InterfaceError::BadRequest { ref message, .. } => {
                (StatusCode::BAD_REQUEST, "bad_request", message.clone(), Vec::new())
            }
            InterfaceError::NotFound { ref message, ref missing, .. } => {
                (StatusCode::NOT_FOUND, "not_found", message.clone(), missing.clone())
            }
            InterfaceError::ServiceUnavailable { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                self.0.user_message().to_string(),
                Vec::new(),
            ),
            InterfaceError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                self.0.user_message().to_string(),
                Vec::new(),
            ),
        };
        let correlation_id = self.0.correlation_id().to_string();

        if status.is_server_error() {
            error!(
                event_name = "api.request.failed",
                correlation_id = %correlation_id,
                status = status.as_u16(),
                error = %self.0,
                "request failed"
            );
        } else {
            warn!(
                event_name = "api.request.rejected",
                correlation_id = %correlation_id,
                status = status.as_u16(),
                error = %self.0,
                "request rejected"
            );
        }

        let body = ErrorBody { error: code, message, correlation_id, missing_ids };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Full HTTP surface: product routes, `/health`, JSON 404 fallback and
/// permissive CORS.
pub fn router(state: ApiState, db_pool: DbPool) -> Router {
    let products = Router::new()
        .route("/", get(banner))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/", get(list_products).post(create_product))
        .route("/api/products/compare", post(compare_products))
        .route("/api/products/category/{category}", get(products_by_category))
        .route("/api/products/{id}", get(get_product))
        .with_state(state);

    Router::new()
        .merge(products)
        .merge(health::router(db_pool))
        .fallback(route_not_found)
        .layer(CorsLayer::permissive())
}

fn correlation_id() -> String {
    Uuid::new_v4().to_string()
}

fn reject(error: CatalogError, correlation_id: String) -> ApiError {
    ApiError(error.into_interface(correlation_id))
}

fn invalid_body(rejection: JsonRejection, correlation_id: String) -> ApiError {
    ApiError(InterfaceError::BadRequest { message: rejection.body_text(), correlation_id })
}

async fn banner() -> Json<Banner> {
    Json(Banner {
        message: "Product catalog API is running",
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_products(State(state): State<ApiState>) -> ApiResult<Json<Vec<Product>>> {
    let correlation_id = correlation_id();
    let products =
        state.catalog.list_products().await.map_err(|e| reject(e, correlation_id))?;
    Ok(Json(products))
}

async fn get_product(
    Path(id): Path<String>,
    State(state): State<ApiState>,
) -> ApiResult<Json<Product>> {
    let correlation_id = correlation_id();
    match state.catalog.get_product(&id).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => {
            Err(reject(CatalogError::not_found(vec![ProductId::new(id.trim())]), correlation_id))
        }
        Err(error) => Err(reject(error, correlation_id)),
    }
}

async fn products_by_category(
    Path(category): Path<String>,
    State(state): State<ApiState>,
) -> ApiResult<Json<Vec<Product>>> {
    let correlation_id = correlation_id();
    let products = state
        .catalog
        .products_by_category(&category)
        .await
        .map_err(|e| reject(e, correlation_id))?;
    Ok(Json(products))
}

async fn create_product(
    State(state): State<ApiState>,
    payload: Result<Json<ProductFields>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let correlation_id = correlation_id();
    let Json(fields) =
        payload.map_err(|rejection| invalid_body(rejection, correlation_id.clone()))?;

    let product = state
        .catalog
        .create_product(fields)
        .await
        .map_err(|e| reject(e, correlation_id.clone()))?;

    info!(
        event_name = "api.product.created",
        correlation_id = %correlation_id,
        product_id = %product.id,
        "product created via api"
    );

    Ok((StatusCode::CREATED, Json(product)))
}

async fn compare_products(
    State(state): State<ApiState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> ApiResult<Json<ComparisonResult>> {
    let correlation_id = correlation_id();
    let Json(request) =
        payload.map_err(|rejection| invalid_body(rejection, correlation_id.clone()))?;

    let ids = request.product_ids.into_iter().map(ProductId::from).collect::<Vec<_>>();
    let result = state.engine.compare(&ids).await.map_err(|e| reject(e, correlation_id))?;
    Ok(Json(result))
}

async fn route_not_found(method: Method, uri: Uri) -> (StatusCode, Json<RouteNotFound>) {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFound {
            detail: "Resource not found",
            path: uri.path().to_string(),
            method: method.to_string(),
        }),
    )
}
