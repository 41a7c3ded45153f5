use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::error::{AppError, ErrorReport};

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

pub mod codes {
    pub const NOT_FOUND: &str = "not_found";
    pub const VALIDATION: &str = "validation";
    pub const STORE_UNAVAILABLE: &str = "store_unavailable";
    pub const INTERNAL: &str = "internal";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    detail: Option<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        detail: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            detail,
        }
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, None)
    }

    /// The public contract reports every server-side failure of an operation
    /// as 500 with an error body; the code still distinguishes the cause for
    /// API clients and for the logs.
    pub fn operation_failed(message: &'static str, err: &AppError) -> Self {
        let code = if err.is_validation() {
            codes::VALIDATION
        } else if err.is_not_found() {
            codes::NOT_FOUND
        } else {
            codes::STORE_UNAVAILABLE
        };
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            code,
            message,
            Some(err.to_string()),
        )
    }

}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.detail.clone();
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint: self.detail,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        // The shared logging middleware reads this back out for diagnostics.
        ErrorReport::from_message(
            "infra::http",
            self.status,
            format!("{}: {}", self.code, detail.as_deref().unwrap_or(self.message)),
        )
        .attach(&mut response);
        response
    }
}
