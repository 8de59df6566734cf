//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// API error type
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "code": self.status.as_u16()
            }
        }));
        (self.status, body).into_response()
    }
}

impl From<balado_core::Error> for ApiError {
    fn from(err: balado_core::Error) -> Self {
        match &err {
            balado_core::Error::EmptyStream
            | balado_core::Error::Generation(_)
            | balado_core::Error::ScriptExhausted { .. }
            | balado_core::Error::Http(_) => ApiError::bad_gateway(err.to_string()),
            balado_core::Error::Config(_) => ApiError::bad_request(err.to_string()),
            _ => ApiError::internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_faults_map_to_bad_gateway() {
        let api: ApiError = balado_core::Error::EmptyStream.into();
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);

        let api: ApiError = balado_core::Error::ScriptExhausted {
            attempts: 3,
            reason: "quota".into(),
        }
        .into();
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn write_failures_map_to_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let api: ApiError = balado_core::Error::Io(io).into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
