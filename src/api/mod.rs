//! HTTP surface / HTTP接口层
//!
//! Routing table (spec'd verbs only, anything else falls through to axum's
//! default 404/405 handling):
//! - GET  /healthcheck      → liveness
//! - GET  /find?q=...       → search
//! - POST /{path}           → create
//! - HEAD /{path}           → probe
//! - GET  /{path}           → fetch
//! - DELETE /{path}         → delete

pub mod objects;
pub mod search;
pub mod server;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the gateway router / 构建网关路由
pub fn build_router(state: Arc<AppState>) -> Router {
    // 通配路由贪婪匹配一段或多段路径，去掉前导斜杠后原样传给键解析
    let objects = Router::new().route(
        "/*path",
        post(objects::upload)
            .head(objects::probe)
            .get(objects::download)
            .delete(objects::remove),
    );

    // route_prefix非空时对象路由挂载在该命名空间下（历史上的/images变体）
    let objects = if state.route_prefix.is_empty() {
        objects
    } else {
        Router::new().nest(&state.route_prefix, objects)
    };

    Router::new()
        .route("/healthcheck", get(server::healthcheck))
        .route("/find", get(search::find))
        .merge(objects)
        .layer(DefaultBodyLimit::disable()) // 整体缓冲请求体，不设大小限制
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
