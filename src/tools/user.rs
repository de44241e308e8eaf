//! 用户查询工具
#![allow(missing_docs)]

use crate::api::{HnService, SearchOptions};
use crate::error::Error;
use crate::models::format_user;
use crate::tools::{json_response, Tool};
use crate::utils::validation::ArgsValidator;
use async_trait::async_trait;
use rust_mcp_sdk::schema::{CallToolError, CallToolResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// 获取用户资料工具
#[rust_mcp_sdk::macros::mcp_tool(
    name = "getUser",
    title = "获取用户资料",
    description = "按用户名获取 Hacker News 用户资料",
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true,
    execution(task_support = "optional"),
    icons = [
        (src = "https://news.ycombinator.com/favicon.ico", mime_type = "image/x-icon", sizes = ["32x32"], theme = "light"),
        (src = "https://news.ycombinator.com/favicon.ico", mime_type = "image/x-icon", sizes = ["32x32"], theme = "dark")
    ]
)]
#[derive(Debug, Clone, Deserialize, Serialize, rust_mcp_sdk::macros::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetUserTool {
    /// 用户名
    #[json_schema(title = "用户名", description = "要获取的用户名")]
    pub id: String,
}

/// 获取用户资料工具实现
pub struct GetUserToolImpl {
    service: Arc<HnService>,
}

impl GetUserToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<HnService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetUserToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetUserTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        const TOOL_NAME: &str = "getUser";

        let mut v = ArgsValidator::new(&arguments);
        let id = v.required_non_empty_string("id");
        v.finish().map_err(|e| e.into_call_tool_error(TOOL_NAME))?;
        let id = id.unwrap_or_default();

        let user = self
            .service
            .hn()
            .get_user(&id)
            .await
            .map_err(|e| e.into_call_tool_error(TOOL_NAME))?;

        match user {
            Some(raw) => json_response(&format_user(&raw)),
            None => Err(Error::not_found("User", &id).into_call_tool_error(TOOL_NAME)),
        }
    }
}

/// 用户提交列表响应记录
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsResponse {
    /// 命中结果（上游原始形状，故事和评论混排）
    pub hits: Vec<Value>,
    /// 总命中数
    pub nb_hits: u64,
}

/// 获取用户提交工具
#[rust_mcp_sdk::macros::mcp_tool(
    name = "getUserSubmissions",
    title = "获取用户提交",
    description = "获取某个用户提交过的故事和评论",
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true,
    execution(task_support = "optional"),
    icons = [
        (src = "https://news.ycombinator.com/favicon.ico", mime_type = "image/x-icon", sizes = ["32x32"], theme = "light"),
        (src = "https://news.ycombinator.com/favicon.ico", mime_type = "image/x-icon", sizes = ["32x32"], theme = "dark")
    ]
)]
#[derive(Debug, Clone, Deserialize, Serialize, rust_mcp_sdk::macros::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetUserSubmissionsTool {
    /// 用户名
    #[json_schema(title = "用户名", description = "要查询的用户名")]
    pub id: String,
}

/// 获取用户提交工具实现
pub struct GetUserSubmissionsToolImpl {
    service: Arc<HnService>,
}

impl GetUserSubmissionsToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<HnService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetUserSubmissionsToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetUserSubmissionsTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        const TOOL_NAME: &str = "getUserSubmissions";

        let mut v = ArgsValidator::new(&arguments);
        let id = v.required_non_empty_string("id");
        v.finish().map_err(|e| e.into_call_tool_error(TOOL_NAME))?;
        let id = id.unwrap_or_default();

        let options = SearchOptions {
            tags: Some(format!("author_{id}")),
            numeric_filters: None,
            page: None,
            hits_per_page: Some(50),
        };

        // 提交列表混排故事和评论，保持上游命中形状原样透传
        let raw = self
            .service
            .algolia()
            .search("", &options)
            .await
            .map_err(|e| e.into_call_tool_error(TOOL_NAME))?;

        let response = SubmissionsResponse {
            hits: raw
                .get("hits")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            nb_hits: raw.get("nbHits").and_then(Value::as_u64).unwrap_or(0),
        };

        json_response(&response)
    }
}
