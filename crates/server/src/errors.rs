use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorDetail;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// HTTP-facing error: a status code and a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
    challenge: bool,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into(), challenge: false }
    }

    /// 401 carrying `WWW-Authenticate: Basic`.
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self { challenge: true, ..Self::new(StatusCode::UNAUTHORIZED, detail) }
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }

    /// Extractor rejection: oversized bodies keep 413, everything else is 422.
    pub fn from_rejection(status: StatusCode, detail: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::new(status, detail)
        } else {
            Self::unprocessable(detail)
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Conflict(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Model(models::errors::ModelError::Validation(msg)) => Self::unprocessable(msg),
            ServiceError::Storage(msg) => {
                error!(error = %msg, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut resp = (self.status, Json(ErrorDetail { detail: self.detail })).into_response();
        if self.challenge {
            resp.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        resp
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::Conflict("dup".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (
                ServiceError::Model(models::errors::ModelError::Validation("bad".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ServiceError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn unauthorized_sets_challenge_header() {
        let resp = ApiError::unauthorized("Unauthorized").into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Basic");

        let resp = ApiError::new(StatusCode::NOT_FOUND, "x").into_response();
        assert!(resp.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[test]
    fn rejections_keep_payload_too_large() {
        assert_eq!(ApiError::from_rejection(StatusCode::PAYLOAD_TOO_LARGE, "big".into()).status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(ApiError::from_rejection(StatusCode::BAD_REQUEST, "bad".into()).status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let e = ApiError::from(ServiceError::Storage("/var/data/projects.json: permission denied".into()));
        assert_eq!(e.detail, "Internal Server Error");
    }
}
