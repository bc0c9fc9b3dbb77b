use std::sync::Arc;

use crate::config::GatewaySettings;
use crate::storage::ObjectStore;

/// Shared application state / 共享应用状态
///
/// Built once at startup and read-only afterwards; handlers never mutate it.
/// 启动时构建一次，之后只读
pub struct AppState {
    /// Object store backend / 对象存储后端
    pub store: Arc<dyn ObjectStore>,
    /// Key namespace prefix / 键命名空间前缀
    pub prefix: String,
    /// URL namespace for object routes / 对象路由URL前缀
    pub route_prefix: String,
    /// Propagate head headers on HEAD responses / HEAD响应是否透传头部
    pub propagate_head_headers: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>, settings: &GatewaySettings) -> Self {
        Self {
            store,
            prefix: settings.prefix.clone(),
            route_prefix: settings.route_prefix.clone(),
            propagate_head_headers: settings.propagate_head_headers,
        }
    }
}
