//! 配置模块

use crate::cache::CacheConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 应用程序配置
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,

    /// 上游 API 配置
    pub api: ApiConfig,

    /// 缓存配置
    pub cache: CacheConfig,

    /// 日志配置
    pub logging: LoggingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 服务器名称
    pub name: String,

    /// 服务器版本
    pub version: String,

    /// 服务器描述
    pub description: Option<String>,
}

/// 上游 API 配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// 官方 Hacker News API（item-graph）基础 URL
    pub hn_base_url: String,

    /// Algolia 搜索 API 基础 URL
    pub algolia_base_url: String,

    /// 请求超时时间（秒）
    pub request_timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,

    /// 日志文件路径
    pub file_path: Option<String>,

    /// 是否启用控制台日志（写到 stderr）
    pub enable_console: bool,

    /// 是否启用文件日志
    pub enable_file: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: crate::NAME.to_string(),
            version: crate::VERSION.to_string(),
            description: Some("Hacker News MCP 服务器".to_string()),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            hn_base_url: "https://hacker-news.firebaseio.com/v0".to_string(),
            algolia_base_url: "https://hn.algolia.com/api/v1".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            enable_console: true,
            enable_file: false,
        }
    }
}

impl AppConfig {
    /// 从文件加载配置
    ///
    /// # Errors
    ///
    /// 如果文件不存在、无法读取或格式无效，返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, crate::error::Error> {
        let content = fs::read_to_string(path)
            .map_err(|e| crate::error::Error::Config(format!("Failed to read config file: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::Error::Config(format!("Failed to parse config file: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    ///
    /// # Errors
    ///
    /// 如果无法序列化配置、创建目录或写入文件，返回错误
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), crate::error::Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::Error::Config(format!("Failed to serialize config: {e}")))?;

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    crate::error::Error::Config(format!("Failed to create directory: {e}"))
                })?;
            }
        }

        fs::write(path, content)
            .map_err(|e| crate::error::Error::Config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// 验证配置
    ///
    /// # Errors
    ///
    /// 如果配置无效（如非法 URL、TTL 为 0 等），返回错误
    pub fn validate(&self) -> Result<(), crate::error::Error> {
        if self.server.name.is_empty() {
            return Err(crate::error::Error::Config(
                "Server name must not be empty".to_string(),
            ));
        }

        // 验证上游基础 URL
        url::Url::parse(&self.api.hn_base_url)
            .map_err(|e| crate::error::Error::Config(format!("Invalid hn_base_url: {e}")))?;
        url::Url::parse(&self.api.algolia_base_url)
            .map_err(|e| crate::error::Error::Config(format!("Invalid algolia_base_url: {e}")))?;

        if self.api.request_timeout_secs == 0 {
            return Err(crate::error::Error::Config(
                "Request timeout must not be 0".to_string(),
            ));
        }

        if self.cache.item_ttl_secs == 0 || self.cache.search_ttl_secs == 0 {
            return Err(crate::error::Error::Config(
                "Cache TTL must not be 0".to_string(),
            ));
        }

        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(crate::error::Error::Config(format!(
                "Invalid log level: {}, valid values: {:?}",
                self.logging.level, valid_levels
            )));
        }

        if self.logging.enable_file && self.logging.file_path.is_none() {
            return Err(crate::error::Error::Config(
                "File logging is enabled but file_path is not set".to_string(),
            ));
        }

        Ok(())
    }

    /// 从环境变量加载配置
    ///
    /// # Errors
    ///
    /// 如果环境变量格式无效或配置验证失败，返回错误
    pub fn from_env() -> Result<Self, crate::error::Error> {
        let mut config = Self::default();

        if let Ok(level) = std::env::var("HN_MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(url) = std::env::var("HN_MCP_HN_BASE_URL") {
            config.api.hn_base_url = url;
        }

        if let Ok(url) = std::env::var("HN_MCP_ALGOLIA_BASE_URL") {
            config.api.algolia_base_url = url;
        }

        if let Ok(ttl) = std::env::var("HN_MCP_ITEM_TTL_SECS") {
            config.cache.item_ttl_secs = ttl
                .parse()
                .map_err(|e| crate::error::Error::Config(format!("Invalid item TTL: {e}")))?;
        }

        if let Ok(ttl) = std::env::var("HN_MCP_SEARCH_TTL_SECS") {
            config.cache.search_ttl_secs = ttl
                .parse()
                .map_err(|e| crate::error::Error::Config(format!("Invalid search TTL: {e}")))?;
        }

        config.validate()?;
        Ok(config)
    }
}
