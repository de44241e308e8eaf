//! MCP 工具模块
//!
//! 九个只读的 Hacker News 查询工具，每次调用都走
//! 校验、请求、格式化、响应四个阶段。

pub mod comment;
pub mod search;
pub mod story;
pub mod user;

use crate::api::HnService;
use async_trait::async_trait;
use rust_mcp_sdk::schema::{CallToolError, CallToolResult, Tool as McpTool};
use std::sync::Arc;

/// 工具 trait
#[async_trait]
pub trait Tool: Send + Sync {
    /// 获取工具定义
    fn definition(&self) -> McpTool;

    /// 执行工具
    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError>;
}

/// 工具注册表
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// 创建新的工具注册表
    #[must_use]
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// 注册工具
    #[must_use]
    pub fn register<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    /// 获取所有工具定义
    #[must_use]
    pub fn get_tools(&self) -> Vec<McpTool> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// 执行工具
    pub async fn execute_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        for tool in &self.tools {
            if tool.definition().name == name {
                return tool.execute(arguments).await;
            }
        }

        Err(CallToolError::unknown_tool(name.to_string()))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 把结果记录序列化为单个文本内容块的成功响应
pub(crate) fn json_response<T: serde::Serialize>(
    value: &T,
) -> std::result::Result<CallToolResult, CallToolError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CallToolError::from_message(format!("serialize response: {e}")))?;
    Ok(CallToolResult::text_content(vec![text.into()]))
}

/// 创建默认工具注册表
#[must_use]
pub fn create_default_registry(service: &Arc<HnService>) -> ToolRegistry {
    ToolRegistry::new()
        .register(search::SearchToolImpl::new(service.clone()))
        .register(story::GetStoryToolImpl::new(service.clone()))
        .register(story::GetStoryWithCommentsToolImpl::new(service.clone()))
        .register(story::GetStoriesToolImpl::new(service.clone()))
        .register(comment::GetCommentToolImpl::new(service.clone()))
        .register(comment::GetCommentsToolImpl::new(service.clone()))
        .register(comment::GetCommentTreeToolImpl::new(service.clone()))
        .register(user::GetUserToolImpl::new(service.clone()))
        .register(user::GetUserSubmissionsToolImpl::new(service.clone()))
}
