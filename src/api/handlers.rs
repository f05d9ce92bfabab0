//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NominaError;
use crate::roster::{generate_template, RosterImporter, TEMPLATE_FILE_NAME};
use crate::rut::{normalize_national_id, validate_national_id};
use crate::types::RosterImportResult;

use super::server::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Standard API response wrapper
#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for a failed roster operation
pub fn error_status(error: &NominaError) -> StatusCode {
    match error {
        NominaError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        NominaError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        NominaError::EmptyFile | NominaError::NoValidStudents | NominaError::Decode(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        NominaError::Validation(_) | NominaError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Root endpoint response
#[derive(Serialize, Deserialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize, Deserialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Nómina API Server".to_string(),
        version: state.version.clone(),
        description: "HTTP API for student roster import and RUT validation".to_string(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new(
                "/api/v1/roster/parse",
                "POST",
                "Parse a roster spreadsheet sent as the request body",
            ),
            EndpointInfo::new("/api/v1/roster/template", "GET", "Download the roster template"),
            EndpointInfo::new("/api/v1/rut/validate", "POST", "Normalize and validate a RUT"),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "roster-parse".to_string(),
            "roster-template".to_string(),
            "rut-validate".to_string(),
        ],
    }))
}

/// Query parameters of a roster upload
#[derive(Debug, Deserialize)]
pub struct ParseParams {
    /// Original file name, checked against the allowed extensions
    pub file_name: Option<String>,
    #[serde(default)]
    pub strict_rut: bool,
}

/// POST /api/v1/roster/parse - Parse the request body as a roster spreadsheet
pub async fn parse_roster(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ParseParams>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<ApiResponse<RosterImportResult>>) {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let status = rejection.status();
            let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                format!(
                    "File exceeds the upload limit of {} bytes",
                    state.policy.max_bytes
                )
            } else {
                rejection.body_text()
            };
            return (status, Json(ApiResponse::err(message)));
        }
    };

    let size = body.len() as u64;
    let checked = match &params.file_name {
        Some(name) => state.policy.check(name, size),
        None => state.policy.check_size(size),
    };
    if let Err(e) = checked {
        return (error_status(&e), Json(ApiResponse::err(e.to_string())));
    }

    let importer = RosterImporter::new().strict_rut(params.strict_rut);
    let parsed = tokio::task::spawn_blocking(move || importer.import_bytes(&body)).await;

    match parsed {
        Ok(Ok(result)) => (StatusCode::OK, Json(ApiResponse::ok(result))),
        Ok(Err(e)) => (error_status(&e), Json(ApiResponse::err(e.to_string()))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::err(format!("Parse task failed: {}", e))),
        ),
    }
}

/// GET /api/v1/roster/template - Download the roster template
pub async fn roster_template() -> Response {
    match generate_template() {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", TEMPLATE_FILE_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => (
            error_status(&e),
            Json(ApiResponse::<()>::err(e.to_string())),
        )
            .into_response(),
    }
}

/// RUT validation request
#[derive(Deserialize, Serialize)]
pub struct RutRequest {
    pub rut: String,
}

/// RUT validation response
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct RutResponse {
    pub rut: String,
    pub normalized: String,
    pub valid: bool,
}

/// POST /api/v1/rut/validate - Normalize and validate a RUT
pub async fn validate_rut(Json(req): Json<RutRequest>) -> impl IntoResponse {
    let normalized = normalize_national_id(&req.rut);
    let valid = validate_national_id(&normalized);
    Json(ApiResponse::ok(RutResponse {
        rut: req.rut,
        normalized,
        valid,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&NominaError::FileTooLarge { size: 2, limit: 1 }),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            error_status(&NominaError::UnsupportedFileType("a.csv".into())),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            error_status(&NominaError::NoValidStudents),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            error_status(&NominaError::Export("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_response_err_has_no_data() {
        let response: ApiResponse<RutResponse> = ApiResponse::err("boom");
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("boom"));
    }
}
