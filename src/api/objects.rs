//! Object handlers: create / fetch / probe / delete / 对象操作处理器
//!
//! Each handler resolves the storage key, probes the store, and maps the
//! outcome to an HTTP status. Per-request errors never propagate further:
//! every failure becomes a response here. / 每个请求错误都在此转换为HTTP响应

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::state::AppState;
use crate::storage::StoreError;
use crate::utils::resolve_key;

/// POST /{path} - create a blob, no overwrite / 创建对象，不允许覆盖
///
/// The exists-then-put pair is not atomic: two concurrent creates can both
/// pass the probe, the store's last write wins. Accepted race.
/// 存在性检查与写入不是原子的，并发创建时以存储端后写为准
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let key = resolve_key(&state.prefix, &path);

    match state.store.head(&key).await {
        Err(StoreError::NotFound) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: calling Head: {}", e),
            )
                .into_response();
        }
        Ok(head) if head.status < 400 => {
            return (StatusCode::BAD_REQUEST, "Error: file already exists").into_response();
        }
        Ok(_) => {}
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if let Err(e) = state.store.put(&key, body, content_type).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: calling Put: {}", e),
        )
            .into_response();
    }

    tracing::debug!("created object: key={}", key);
    StatusCode::CREATED.into_response()
}

/// GET /{path} - fetch a blob / 获取对象
pub async fn download(State(state): State<Arc<AppState>>, Path(path): Path<String>) -> Response {
    let key = resolve_key(&state.prefix, &path);

    match state.store.head(&key).await {
        Err(StoreError::NotFound) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: calling Head: {}", e),
            )
                .into_response();
        }
        Ok(head) if head.status >= 400 => return StatusCode::NOT_FOUND.into_response(),
        Ok(_) => {}
    }

    match state.store.get(&key).await {
        Ok(data) => (StatusCode::OK, data).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: calling Get: {}", e),
        )
            .into_response(),
    }
}

/// HEAD /{path} - existence/metadata probe, no body / 探测对象，不传内容
pub async fn probe(State(state): State<Arc<AppState>>, Path(path): Path<String>) -> Response {
    let key = resolve_key(&state.prefix, &path);

    let head = match state.store.head(&key).await {
        Ok(head) if head.status < 400 => head,
        Ok(_) | Err(StoreError::NotFound) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: calling Head: {}", e),
            )
                .into_response();
        }
    };

    let status = StatusCode::from_u16(head.status).unwrap_or(StatusCode::OK);
    let mut response = status.into_response();
    if state.propagate_head_headers {
        // 存储端头部可能不是合法HTTP头，非法的跳过而不是panic
        for (name, value) in &head.headers {
            let name = match HeaderName::try_from(name.as_str()) {
                Ok(name) => name,
                Err(_) => continue,
            };
            let value = match HeaderValue::try_from(value.as_str()) {
                Ok(value) => value,
                Err(_) => continue,
            };
            response.headers_mut().append(name, value);
        }
    }
    response
}

/// DELETE /{path} - delete a blob / 删除对象
///
/// The probe only decides 404 vs 200; it does not make the delete exclusive.
pub async fn remove(State(state): State<Arc<AppState>>, Path(path): Path<String>) -> Response {
    let key = resolve_key(&state.prefix, &path);

    match state.store.head(&key).await {
        Err(StoreError::NotFound) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: calling Head: {}", e),
            )
                .into_response();
        }
        Ok(head) if head.status >= 400 => return StatusCode::NOT_FOUND.into_response(),
        Ok(_) => {}
    }

    match state.store.delete(&key).await {
        Ok(()) => {
            tracing::debug!("deleted object: key={}", key);
            StatusCode::OK.into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: calling Delete: {}", e),
        )
            .into_response(),
    }
}
