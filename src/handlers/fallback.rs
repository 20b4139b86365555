use axum::{http::StatusCode, Json};

use crate::error::ErrorBody;

pub async fn unknown_endpoint() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "unknown endpoint".to_string(),
        }),
    )
}
