//! Application configuration module / 应用配置模块
//!
//! Manages application configuration loaded from config.json
//! Creates default config file on first run / 首次运行时创建默认配置文件

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration / 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Server configuration / 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// S3 backend configuration / S3后端配置
    #[serde(default)]
    pub s3: S3Config,
    /// Gateway behavior configuration / 网关行为配置
    #[serde(default)]
    pub gateway: GatewaySettings,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
}

/// S3 backend configuration / S3后端配置
///
/// Credentials are intentionally not part of the file: they are read from
/// the process environment (AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY).
/// 凭证不放在配置文件中，从环境变量读取
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// Bucket name, required / 存储桶名称（必填）
    #[serde(default)]
    pub bucket: String,
    /// Region / 区域
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint (MinIO etc.), empty means AWS / 自定义端点地址
    #[serde(default)]
    pub endpoint: String,
    /// Force path-style addressing / 强制使用路径风格
    /// MinIO等需要设置为true
    #[serde(default)]
    pub force_path_style: bool,
}

/// Gateway behavior configuration / 网关行为配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Key namespace prefix prepended to every object key / 键命名空间前缀
    #[serde(default)]
    pub prefix: String,
    /// URL namespace for the object routes, e.g. "/images" / 对象路由的URL前缀
    /// Empty means object routes are mounted at the root / 为空时挂载在根路径
    #[serde(default)]
    pub route_prefix: String,
    /// Propagate the store's head headers on HEAD responses / HEAD响应是否透传存储端头部
    #[serde(default = "default_propagate")]
    pub propagate_head_headers: bool,
}

fn default_region() -> String {
    "eu-west-1".to_string()
}

fn default_propagate() -> bool {
    true
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            s3: S3Config::default(),
            gateway: GatewaySettings::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5253,
        }
    }
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_region(),
            endpoint: String::new(),
            force_path_style: false,
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            route_prefix: String::new(),
            propagate_head_headers: default_propagate(),
        }
    }
}

impl GatewayConfig {
    /// Get the server bind address / 获取服务器绑定地址
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Normalize settings after load / 加载后规范化配置
    /// route_prefix always carries a leading slash and no trailing slash
    fn normalize(&mut self) {
        let rp = self.gateway.route_prefix.trim().trim_end_matches('/');
        self.gateway.route_prefix = if rp.is_empty() || rp == "/" {
            String::new()
        } else if rp.starts_with('/') {
            rp.to_string()
        } else {
            format!("/{}", rp)
        };
        // 键前缀不带斜杠，resolve_key负责拼接
        self.gateway.prefix = self.gateway.prefix.trim_matches('/').to_string();
    }
}

/// Get the config file path / 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Load configuration from file, or create default if not exists / 加载配置文件，不存在则创建默认配置
pub fn load_config() -> Result<GatewayConfig, String> {
    let config_path = get_config_path();

    if config_path.exists() {
        // Load existing config / 加载现有配置
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let mut config: GatewayConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        config.normalize();
        tracing::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    } else {
        // Create default config / 创建默认配置
        let config = GatewayConfig::default();
        save_config(&config)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        Ok(config)
    }
}

/// Save configuration to file / 保存配置到文件
pub fn save_config(config: &GatewayConfig) -> Result<(), String> {
    let config_path = get_config_path();

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(&config_path, content)
        .map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_route_prefix() {
        let mut config = GatewayConfig::default();
        config.gateway.route_prefix = "images".to_string();
        config.normalize();
        assert_eq!(config.gateway.route_prefix, "/images");

        config.gateway.route_prefix = "/images/".to_string();
        config.normalize();
        assert_eq!(config.gateway.route_prefix, "/images");

        config.gateway.route_prefix = "/".to_string();
        config.normalize();
        assert_eq!(config.gateway.route_prefix, "");
    }

    #[test]
    fn test_normalize_key_prefix() {
        let mut config = GatewayConfig::default();
        config.gateway.prefix = "/pics/".to_string();
        config.normalize();
        assert_eq!(config.gateway.prefix, "pics");
    }

    #[test]
    fn test_defaults() {
        let config: GatewayConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.get_bind_address(), "0.0.0.0:5253");
        assert_eq!(config.s3.region, "eu-west-1");
        assert!(config.gateway.propagate_head_headers);
        assert!(config.s3.bucket.is_empty());
    }
}
