use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;

/// Envelope for every JSON answer. The page styles `meta.status`
/// "success" and "error" differently.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub meta: ResponseMeta,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    pub status: &'static str,
    pub status_code: u16,
    pub timestamp: String,
    pub message: Option<String>,
}

impl ResponseMeta {
    fn new(status: &'static str, code: StatusCode, message: Option<String>) -> Self {
        ResponseMeta {
            status,
            status_code: code.as_u16(),
            timestamp: Utc::now().to_rfc3339(),
            message,
        }
    }
}

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: Some(data),
            meta: ResponseMeta::new("success", StatusCode::OK, None),
        }),
    )
}

pub fn error<T>(status: StatusCode, message: String) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        status,
        Json(ApiResponse {
            data: None,
            meta: ResponseMeta::new("error", status, Some(message)),
        }),
    )
}
