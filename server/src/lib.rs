//! HTTP API for Sitemapper.
//!
//! Public:
//! - `GET /sitemap.xml`
//!
//! Admin (bearer token when one is configured):
//! - `GET /admin/sitemap/preview`
//! - `GET /admin/sitemap/download`
//! - `GET /admin/sitemap/content-types`
//! - `GET|PUT|POST /admin/sitemap/config`

mod error;

use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde::{Deserialize, Serialize};
use sitemapper_generator::{SitemapConfig, SitemapData, SitemapService};
use sitemapper_model::ContentTypeDescriptor;

pub use error::{ApiError, ErrorBody, ErrorDetail};

const XML_CONTENT_TYPE: &str = "application/xml";

#[derive(Clone)]
pub struct AppState {
    service: Arc<SitemapService>,
    admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(service: Arc<SitemapService>) -> Self {
        Self {
            service,
            admin_token: None,
        }
    }

    /// Require `Authorization: Bearer <token>` on admin routes.
    #[must_use]
    pub fn with_admin_token(mut self, token: impl Into<Arc<str>>) -> Self {
        self.admin_token = Some(token.into());
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ContentTypesResponse {
    pub data: Vec<ContentTypeDescriptor>,
}

async fn sitemap_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let xml = state.service.generate_xml().await?;
    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml).into_response())
}

async fn download_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let xml = state.service.generate_xml().await?;
    Ok((
        [
            (header::CONTENT_TYPE, XML_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, "attachment; filename=sitemap.xml"),
        ],
        xml,
    )
        .into_response())
}

async fn preview_handler(State(state): State<AppState>) -> Result<Json<SitemapData>, ApiError> {
    Ok(Json(state.service.get_sitemap_data().await?))
}

async fn content_types_handler(State(state): State<AppState>) -> Json<ContentTypesResponse> {
    let mut data = state.service.discover_content_types();
    data.sort_by(|a, b| a.uid.cmp(&b.uid));
    Json(ContentTypesResponse { data })
}

async fn get_config_handler(
    State(state): State<AppState>,
) -> Result<Json<SitemapConfig>, ApiError> {
    Ok(Json(state.service.get_config().await?))
}

async fn update_config_handler(
    State(state): State<AppState>,
    Json(config): Json<SitemapConfig>,
) -> Result<Json<SitemapConfig>, ApiError> {
    Ok(Json(state.service.update_config(config).await?))
}

async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(expected) = &state.admin_token {
        let provided = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        if !provided.is_some_and(|token| tokens_match(token.as_bytes(), expected.as_bytes())) {
            return Err(ApiError::Unauthorized);
        }
    }
    Ok(next.run(request).await)
}

/// Compares two tokens in time that depends only on their lengths.
fn tokens_match(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

/// Build the HTTP API router.
pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/preview", get(preview_handler))
        .route("/download", get(download_handler))
        .route("/content-types", get(content_types_handler))
        .route(
            "/config",
            get(get_config_handler)
                .put(update_config_handler)
                .post(update_config_handler),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/sitemap.xml", get(sitemap_handler))
        .nest("/admin/sitemap", admin)
        .with_state(state)
}
