use salvo::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use trainsched_core::error::CoreError;
use trainsched_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(
                ServiceError::ValidationError(_)
                | ServiceError::CoreError(CoreError::InvalidInput(_) | CoreError::ValidationError(_)),
            )
            | Self::CoreError(CoreError::InvalidInput(_) | CoreError::ValidationError(_))
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServiceError(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::ServiceError(_) | Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// ## Summary
    /// Message safe to show to the user; server-side failures are not detailed.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::ServiceError(
                ServiceError::ValidationError(message)
                | ServiceError::CoreError(
                    CoreError::InvalidInput(message) | CoreError::ValidationError(message),
                ),
            )
            | Self::CoreError(CoreError::InvalidInput(message) | CoreError::ValidationError(message))
            | Self::BadRequest(message) => message.clone(),
            Self::ServiceError(ServiceError::NotFound(what)) => format!("Not found: {what}"),
            Self::ServiceError(_) | Self::CoreError(_) => "Internal server error".to_string(),
        }
    }

    /// ## Summary
    /// Logs the error and renders it as a JSON error response.
    pub fn render(&self, res: &mut salvo::Response) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        res.status_code(status);
        res.render(salvo::writing::Json(ErrorResponse {
            error: self.public_message(),
        }));
    }
}
