use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

/// A success body whose fields sit next to the `success` flag rather than under `data`.
#[derive(Serialize)]
pub struct FlatResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
}

pub fn success<T>(data: T, message: impl Into<String>) -> impl IntoResponse
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        message: Some(message.into()),
    };
    (StatusCode::OK, Json(body))
}

pub fn flat_success<T>(body: T) -> Json<FlatResponse<T>>
where
    T: Serialize,
{
    Json(FlatResponse {
        success: true,
        body,
    })
}

pub fn error(message: impl Into<String>, status: StatusCode) -> Response {
    let body = ApiErrorResponse {
        success: false,
        error: message.into(),
    };

    (status, Json(body)).into_response()
}
