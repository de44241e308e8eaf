//! 故事查询工具
#![allow(missing_docs)]

use crate::api::{HnService, StoryListKind};
use crate::error::Error;
use crate::models::{format_story, format_story_with_comments};
use crate::tools::{json_response, Tool};
use crate::utils::validation::ArgsValidator;
use async_trait::async_trait;
use rust_mcp_sdk::schema::{CallToolError, CallToolResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// 条目是否为故事类型
fn is_story(item: &Value) -> bool {
    item.get("type").and_then(Value::as_str) == Some("story")
}

/// 获取单个故事工具
#[rust_mcp_sdk::macros::mcp_tool(
    name = "getStory",
    title = "获取故事",
    description = "按 ID 获取单个 Hacker News 故事",
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
pub struct GetStoryTool {
    /// 故事 ID
    #[json_schema(title = "故事 ID", description = "要获取的故事 ID（正整数）")]
    pub id: u64,
}

/// 获取单个故事工具实现
pub struct GetStoryToolImpl {
    service: Arc<HnService>,
}

impl GetStoryToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<HnService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetStoryToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetStoryTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        const TOOL_NAME: &str = "getStory";

        let mut v = ArgsValidator::new(&arguments);
        let id = v.required_positive_id("id");
        v.finish().map_err(|e| e.into_call_tool_error(TOOL_NAME))?;
        let id = id.unwrap_or_default();

        let item = self
            .service
            .hn()
            .get_item(id)
            .await
            .map_err(|e| e.into_call_tool_error(TOOL_NAME))?;

        // 不存在的条目和类型不符的条目同样按未找到处理
        match item {
            Some(raw) if is_story(&raw) => json_response(&format_story(&raw)),
            _ => Err(Error::not_found("Story", id).into_call_tool_error(TOOL_NAME)),
        }
    }
}

/// 获取带评论树的故事工具
#[rust_mcp_sdk::macros::mcp_tool(
    name = "getStoryWithComments",
    title = "获取故事及评论树",
    description = "按 ID 获取故事和它的完整嵌套评论树",
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
pub struct GetStoryWithCommentsTool {
    /// 故事 ID
    #[json_schema(title = "故事 ID", description = "要获取的故事 ID（正整数）")]
    pub id: u64,
}

/// 获取带评论树的故事工具实现
pub struct GetStoryWithCommentsToolImpl {
    service: Arc<HnService>,
}

impl GetStoryWithCommentsToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<HnService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetStoryWithCommentsToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetStoryWithCommentsTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        const TOOL_NAME: &str = "getStoryWithComments";

        let mut v = ArgsValidator::new(&arguments);
        let id = v.required_positive_id("id");
        v.finish().map_err(|e| e.into_call_tool_error(TOOL_NAME))?;
        let id = id.unwrap_or_default();

        let raw = self
            .service
            .algolia()
            .get_story_with_comments(id)
            .await
            .map_err(|e| e.into_call_tool_error(TOOL_NAME))?;

        // 缺标题的条目是评论或已删除条目，不按故事返回
        match raw {
            Some(raw) if raw.get("title").and_then(Value::as_str).is_some() => {
                json_response(&format_story_with_comments(&raw))
            }
            _ => Err(Error::not_found("Story", id).into_call_tool_error(TOOL_NAME)),
        }
    }
}

/// 获取故事列表工具
#[rust_mcp_sdk::macros::mcp_tool(
    name = "getStories",
    title = "获取故事列表",
    description = "按列表类型（top/new/best/ask/show/job）批量获取故事",
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
pub struct GetStoriesTool {
    /// 列表类型：top、new、best、ask、show 或 job
    #[json_schema(title = "列表类型", description = "故事列表类型")]
    #[serde(rename = "type")]
    pub list_type: String,

    /// 返回数量上限（1 到 100）
    #[json_schema(title = "数量上限", description = "返回数量上限（1 到 100）", default = 30)]
    pub limit: Option<u32>,
}

/// 获取故事列表工具实现
pub struct GetStoriesToolImpl {
    service: Arc<HnService>,
}

impl GetStoriesToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<HnService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetStoriesToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetStoriesTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        const TOOL_NAME: &str = "getStories";

        let mut v = ArgsValidator::new(&arguments);
        let list_type = v.required_enum("type", &["top", "new", "best", "ask", "show", "job"]);
        let limit = v.optional_int_in_range("limit", 1, 100, 30);
        v.finish().map_err(|e| e.into_call_tool_error(TOOL_NAME))?;

        let kind: StoryListKind = list_type
            .unwrap_or_default()
            .parse()
            .map_err(|e: Error| e.into_call_tool_error(TOOL_NAME))?;

        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let ids = self
            .service
            .hn()
            .get_story_ids(kind, limit as usize)
            .await
            .map_err(|e| e.into_call_tool_error(TOOL_NAME))?;

        // 列表里偶有被删除条目和招聘帖之外的类型，过滤后为空也是合法结果
        let stories: Vec<_> = self
            .service
            .hn()
            .get_items(&ids)
            .await
            .into_iter()
            .flatten()
            .filter(is_story)
            .map(|raw| format_story(&raw))
            .collect();

        json_response(&stories)
    }
}
