//! Wire-level request handlers
//!
//! Each handler binds query/path parameters, validates them, calls the
//! service, and converts the result into the protocol's JSON shape.
//! Validation failures become 400s before any backend call; backend
//! failures are logged and collapsed to a generic 500 so no internal
//! detail reaches the client.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{DEFAULT_PAGE_LIMIT, MAX_REQUEST_LIMIT, MODULES_V1_PATH};
use crate::http::AppState;
use crate::registry::error::RegistryError;
use crate::registry::types::{ListQuery, Module, ModuleDescriptor, PageMeta, SearchQuery};

/// Header carrying the resolved artifact URL on download responses
pub const X_TERRAFORM_GET: HeaderName = HeaderName::from_static("x-terraform-get");

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    #[serde(rename = "modules.v1")]
    pub modules_v1: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub provider: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub provider: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaResponse {
    pub limit: i64,
    pub current_offset: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_offset: Option<i64>,
}

impl From<PageMeta> for MetaResponse {
    fn from(meta: PageMeta) -> Self {
        // Zero-valued offsets are omitted from the wire form; absence
        // signals "no further page".
        Self {
            limit: meta.limit,
            current_offset: meta.current_offset,
            next_offset: (meta.next_offset != 0).then_some(meta.next_offset),
            prev_offset: meta.prev_offset.filter(|offset| *offset != 0),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModulePageResponse {
    pub meta: MetaResponse,
    pub modules: Vec<Module>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VersionsResponse {
    pub modules: Vec<ModuleVersions>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModuleVersions {
    pub versions: Vec<ModuleVersion>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModuleVersion {
    pub version: String,
}

// =============================================================================
// Error mapping
// =============================================================================

pub enum ApiError {
    BadRequest(String),
    Internal,
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Validation(message) => ApiError::BadRequest(message),
            other => {
                warn!("registry backend error: {other}");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "errors": [message] })),
            )
                .into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "errors": ["internal server error"] })),
            )
                .into_response(),
        }
    }
}

fn validate_window(limit: i64, offset: i64) -> Result<(), ApiError> {
    if !(0..=MAX_REQUEST_LIMIT).contains(&limit) {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 0 and {MAX_REQUEST_LIMIT}"
        )));
    }
    if offset < 0 {
        return Err(ApiError::BadRequest("offset must not be negative".to_string()));
    }
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn discovery() -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        modules_v1: MODULES_V1_PATH,
    })
}

pub async fn list_modules(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ModulePageResponse>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    let offset = params.offset.unwrap_or(0);
    validate_window(limit, offset)?;

    // The protocol's namespace filter travels as a path parameter on
    // namespace-scoped routes this server does not register, so list
    // queries carry no namespace predicate regardless of the query string.
    let query = ListQuery {
        limit,
        offset,
        provider: params.provider,
        namespace: None,
    };
    let page = state.service.list(&query).await.map_err(ApiError::from)?;

    Ok(Json(ModulePageResponse {
        meta: page.meta.into(),
        modules: page.modules,
    }))
}

pub async fn search_modules(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ModulePageResponse>, ApiError> {
    let q = match params.q {
        Some(q) if !q.is_empty() => q,
        _ => return Err(ApiError::BadRequest("q parameter is required".to_string())),
    };
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    let offset = params.offset.unwrap_or(0);
    validate_window(limit, offset)?;

    let query = SearchQuery {
        q,
        limit,
        offset,
        provider: params.provider,
        namespace: None,
    };
    let page = state.service.search(&query).await.map_err(ApiError::from)?;

    Ok(Json(ModulePageResponse {
        meta: page.meta.into(),
        modules: page.modules,
    }))
}

pub async fn list_versions(
    State(state): State<AppState>,
    Path((namespace, name, system, _version)): Path<(String, String, String, String)>,
) -> Result<Json<VersionsResponse>, ApiError> {
    let descriptor = ModuleDescriptor::new(namespace, name, system);
    let versions = state
        .service
        .versions(&descriptor)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(VersionsResponse {
        modules: vec![ModuleVersions {
            versions: versions
                .into_iter()
                .map(|version| ModuleVersion { version })
                .collect(),
        }],
    }))
}

pub async fn download_module(
    State(state): State<AppState>,
    Path((namespace, name, system, version)): Path<(String, String, String, String)>,
) -> Result<Response, ApiError> {
    let descriptor = ModuleDescriptor::new(namespace, name, system);
    let url = state
        .service
        .download_url(&descriptor, &version)
        .await
        .map_err(ApiError::from)?;

    let value = HeaderValue::from_str(&url).map_err(|err| {
        warn!("signed URL is not a valid header value: {err}");
        ApiError::Internal
    })?;
    Ok((StatusCode::NO_CONTENT, [(X_TERRAFORM_GET, value)]).into_response())
}

pub async fn upload_module(
    State(state): State<AppState>,
    Path((namespace, name, system, version)): Path<(String, String, String, String)>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let descriptor = ModuleDescriptor::new(namespace, name, system);
    state
        .service
        .upload(&descriptor, &version, body.to_vec())
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::registry::service::MockModuleService;
    use crate::registry::types::CatalogPage;
    use crate::storage::StorageError;

    fn state(service: MockModuleService) -> State<AppState> {
        State(AppState {
            service: Arc::new(service),
        })
    }

    #[tokio::test]
    async fn list_passes_defaults_to_the_service() {
        let mut service = MockModuleService::new();
        service
            .expect_list()
            .withf(|query| query.limit == 10 && query.offset == 0 && query.namespace.is_none())
            .returning(|_| {
                Ok(CatalogPage {
                    meta: PageMeta {
                        limit: 10,
                        current_offset: 0,
                        next_offset: 0,
                        prev_offset: Some(0),
                    },
                    modules: vec![],
                })
            });

        let result = list_modules(
            state(service),
            Query(ListParams {
                limit: None,
                offset: None,
                provider: None,
            }),
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn backend_failures_collapse_to_internal_error() {
        let mut service = MockModuleService::new();
        service.expect_list().returning(|_| {
            Err(RegistryError::StorageUnavailable(StorageError::Backend(
                "listing timed out".to_string(),
            )))
        });

        let result = list_modules(
            state(service),
            Query(ListParams {
                limit: None,
                offset: None,
                provider: None,
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Internal)));
    }

    #[tokio::test]
    async fn search_rejects_missing_q_before_any_service_call() {
        // No expectation is set on the mock: reaching the service would panic.
        let result = search_modules(
            state(MockModuleService::new()),
            Query(SearchParams {
                q: None,
                limit: None,
                offset: None,
                provider: None,
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn meta_response_omits_zero_offsets() {
        let meta = MetaResponse::from(PageMeta {
            limit: 10,
            current_offset: 0,
            next_offset: 0,
            prev_offset: Some(0),
        });

        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("next_offset").is_none());
        assert!(json.get("prev_offset").is_none());
    }

    #[test]
    fn meta_response_keeps_nonzero_offsets() {
        let meta = MetaResponse::from(PageMeta {
            limit: 2,
            current_offset: 2,
            next_offset: 4,
            prev_offset: Some(0),
        });

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["next_offset"], 4);
        // prev_offset of zero is still omitted, matching the wire contract.
        assert!(json.get("prev_offset").is_none());
    }

    #[test]
    fn discovery_document_shape() {
        let json = serde_json::to_value(DiscoveryResponse {
            modules_v1: MODULES_V1_PATH,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "modules.v1": "/v1/modules" }));
    }

    #[test]
    fn validate_window_rejects_oversized_limit_and_negative_offset() {
        assert!(validate_window(101, 0).is_err());
        assert!(validate_window(-1, 0).is_err());
        assert!(validate_window(0, -1).is_err());
        assert!(validate_window(100, 0).is_ok());
    }
}
