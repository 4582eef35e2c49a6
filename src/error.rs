use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Please provide a URL.")]
    MissingUrl,

    #[error("Please enter a valid URL.")]
    InvalidUrl,

    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("LLM processing error: {0}")]
    LlmError(String),

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingUrl | AppError::InvalidUrl => StatusCode::BAD_REQUEST,
            AppError::FetchError(_) | AppError::LlmError(_) | AppError::ParseError(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::ConfigError(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        response::error::<()>(self.status_code(), self.to_string()).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_carry_the_user_facing_message() {
        assert_eq!(AppError::MissingUrl.to_string(), "Please provide a URL.");
        assert_eq!(AppError::InvalidUrl.to_string(), "Please enter a valid URL.");
    }

    #[test]
    fn pipeline_failures_map_to_bad_gateway() {
        for err in [
            AppError::FetchError("down".into()),
            AppError::ParseError("bad".into()),
            AppError::LlmError("rate limited".into()),
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        }
        assert_eq!(AppError::InvalidUrl.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::ConfigError("missing".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
