//! Liveness endpoint / 存活探测端点

use axum::http::StatusCode;

/// GET /healthcheck - always 200, no store dependency / 恒定200，不探测存储端
pub async fn healthcheck() -> StatusCode {
    StatusCode::OK
}
