//! 服务器模块
//!
//! MCP 服务器实现，通过标准输入输出传输协议消息。
//! 标准输出只承载协议消息，所有诊断日志走标准错误。

pub mod handler;
pub mod transport;

use crate::api::HnService;
use crate::config::AppConfig;
use crate::error::Result;
use crate::tools::ToolRegistry;
use rust_mcp_sdk::schema::{
    Icon, IconTheme, Implementation, InitializeResult, ProtocolVersion, ServerCapabilities,
    ServerCapabilitiesTools,
};
use std::sync::Arc;

/// MCP 服务器
#[derive(Clone)]
pub struct HnMcpServer {
    config: AppConfig,
    tool_registry: Arc<ToolRegistry>,
    service: Arc<HnService>,
}

impl HnMcpServer {
    /// 创建新的服务器实例
    ///
    /// 客户端和缓存在这里显式构造并注入工具注册表，
    /// 没有任何全局单例。
    pub fn new(config: AppConfig) -> Result<Self> {
        let service = Arc::new(HnService::new(&config.api, &config.cache)?);
        let tool_registry = Arc::new(crate::tools::create_default_registry(&service));

        Ok(Self {
            config,
            tool_registry,
            service,
        })
    }

    /// 获取服务器配置
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取工具注册器
    #[must_use]
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// 获取查询服务
    #[must_use]
    pub fn service(&self) -> &Arc<HnService> {
        &self.service
    }

    /// 获取服务器信息
    #[must_use]
    pub fn server_info(&self) -> InitializeResult {
        let icons = vec![
            Icon {
                src: "https://news.ycombinator.com/favicon.ico".to_string(),
                mime_type: Some("image/x-icon".to_string()),
                sizes: vec!["32x32".to_string()],
                theme: Some(IconTheme::Light),
            },
            Icon {
                src: "https://news.ycombinator.com/favicon.ico".to_string(),
                mime_type: Some("image/x-icon".to_string()),
                sizes: vec!["32x32".to_string()],
                theme: Some(IconTheme::Dark),
            },
        ];

        InitializeResult {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                title: Some("Hacker News MCP Server".to_string()),
                description: self.config.server.description.clone(),
                icons,
                website_url: Some("https://news.ycombinator.com".to_string()),
            },
            capabilities: ServerCapabilities {
                tools: Some(ServerCapabilitiesTools { list_changed: None }),
                resources: None,
                prompts: None,
                experimental: None,
                completions: None,
                logging: None,
                tasks: None,
            },
            protocol_version: ProtocolVersion::V2025_11_25.into(),
            instructions: Some(
                "使用此服务器查询 Hacker News。支持搜索、故事、评论树和用户资料查询。"
                    .to_string(),
            ),
            meta: None,
        }
    }

    /// 运行 Stdio 服务器
    pub async fn run_stdio(&self) -> Result<()> {
        transport::run_stdio_server(self).await
    }
}
