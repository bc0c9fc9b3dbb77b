//! Search handler: list keys by prefix / 按前缀搜索对象键

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::state::AppState;
use crate::utils::listing_prefix;

/// Listing hard cap, no pagination is exposed to the caller / 列举上限，不向调用方暴露分页
const MAX_KEYS: u32 = 1000;

#[derive(Debug, Deserialize)]
pub struct FindQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /find?q=... - list keys under the resolved prefix / 列举前缀下的对象键
pub async fn find(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FindQuery>,
) -> Response {
    let prefix = listing_prefix(&state.prefix, &query.q);

    let entries = match state.store.list(&prefix, "/", "", MAX_KEYS).await {
        Ok(entries) => entries,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: calling List: {}", e),
            )
                .into_response();
        }
    };

    // 按存储端返回顺序保留，不去重
    let matches: Vec<String> = entries.into_iter().map(|e| e.key).collect();

    match serde_json::to_vec(&matches) {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: marshalling json: {}", e),
        )
            .into_response(),
    }
}
