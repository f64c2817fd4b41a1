//! HTTP error mapping.
//!
//! # Responsibility
//! - Map core errors onto status codes and the `{message, error}` body.
//!
//! # Invariants
//! - Storage faults are passed through as 500 with the underlying message.
//! - Malformed coordinates and bodies are 400 and never reach storage.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cellgrid_core::{CoordinateError, RepoError};
use log::{error, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const SERVER_ERROR_MESSAGE: &str = "Server Error";
const INVALID_REQUEST_MESSAGE: &str = "Invalid Request";

/// Error body shared by every failing route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: &'static str,
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    InvalidCoordinate(CoordinateError),
    InvalidBody(String),
    Storage(RepoError),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCoordinate(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCoordinate(err) => write!(f, "{err}"),
            Self::InvalidBody(message) => write!(f, "{message}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Internal(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidCoordinate(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::InvalidBody(_) | Self::Internal(_) => None,
        }
    }
}

impl From<CoordinateError> for ApiError {
    fn from(value: CoordinateError) -> Self {
        Self::InvalidCoordinate(value)
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::InvalidBody(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(
                "event=http_error module=api status=error http_status={} error={}",
                status.as_u16(),
                self
            );
            SERVER_ERROR_MESSAGE
        } else {
            warn!(
                "event=http_error module=api status=rejected http_status={} error={}",
                status.as_u16(),
                self
            );
            INVALID_REQUEST_MESSAGE
        };

        let body = ErrorBody {
            message,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
