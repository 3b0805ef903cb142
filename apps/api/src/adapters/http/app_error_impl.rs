use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        match &self {
            AppError::DependencyUnavailable(_) => tracing::error!(error = ?self, "Request failed"),
            _ => tracing::warn!(error = %self, "Request rejected"),
        }

        let code = self.code();
        match self {
            AppError::MissingToken | AppError::InvalidSignature | AppError::Expired => {
                error_resp(StatusCode::UNAUTHORIZED, code, Some(self.to_string()))
            }
            AppError::IdentityNotFound => {
                error_resp(StatusCode::UNAUTHORIZED, code, Some(self.to_string()))
            }
            AppError::WrongTokenType | AppError::QuotaExceeded | AppError::WrongCode => {
                error_resp(StatusCode::FORBIDDEN, code, Some(self.to_string()))
            }
            AppError::CodeNotFound => error_resp(StatusCode::GONE, code, Some(self.to_string())),
            AppError::InvalidInput(msg) => {
                error_resp(StatusCode::UNPROCESSABLE_ENTITY, code, Some(msg))
            }
            AppError::DependencyUnavailable(_) => {
                error_resp(StatusCode::INTERNAL_SERVER_ERROR, code, None)
            }
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: Option<String>) -> Response {
    let body = match message {
        Some(msg) => serde_json::json!({ "code": code.as_str(), "message": msg }),
        None => serde_json::json!({ "code": code.as_str() }),
    };
    (status, Json(body)).into_response()
}
