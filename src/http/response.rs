//! Error responses.
//!
//! # Responsibilities
//! - Map repository errors to HTTP status codes
//! - Render failures as `application/problem+json`
//! - Log every failure before it leaves the service
//!
//! # Design Decisions
//! - Not-found carries no body detail beyond the title
//! - Store rejections keep their structured identity errors in the body

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::groups::GroupError;
use crate::identity::{IdentityError, RoleStoreError};

pub const PROBLEM_JSON: &str = "application/problem+json";

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// Opaque server-side failure with whatever detail the store gave.
    #[error("{title}")]
    Problem {
        title: String,
        detail: Option<String>,
        errors: Vec<IdentityError>,
    },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Problem { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert a repository error, titling store failures with `title`.
    pub fn from_group_error(err: GroupError, title: &str) -> Self {
        if err.is_not_found() {
            return ApiError::NotFound(err.to_string());
        }
        let errors = match &err {
            GroupError::Role(RoleStoreError::Rejected(errors)) => errors.clone(),
            _ => Vec::new(),
        };
        ApiError::Problem {
            title: title.to_string(),
            detail: Some(err.to_string()),
            errors,
        }
    }
}

impl From<GroupError> for ApiError {
    fn from(err: GroupError) -> Self {
        Self::from_group_error(err, "Member group operation failed")
    }
}

/// RFC 7807 problem document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<IdentityError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Problem { .. } => tracing::error!(error = ?self, status = %status, "Request failed"),
            _ => tracing::debug!(error = %self, status = %status, "Request rejected"),
        }

        let (title, detail, errors) = match self {
            ApiError::NotFound(_) => ("Not Found".to_string(), None, Vec::new()),
            ApiError::BadRequest(msg) => ("Bad Request".to_string(), Some(msg), Vec::new()),
            ApiError::Problem {
                title,
                detail,
                errors,
            } => (title, detail, errors),
        };

        let body = ProblemDetails {
            kind: "about:blank".to_string(),
            title,
            status: status.as_u16(),
            detail,
            errors,
        };

        let mut response = (status, Json(body)).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        response
    }
}
