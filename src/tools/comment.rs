//! 评论查询工具
#![allow(missing_docs)]

use crate::api::HnService;
use crate::error::Error;
use crate::models::{format_comment, format_comment_tree, CommentTreeNode};
use crate::tools::{json_response, Tool};
use crate::utils::validation::ArgsValidator;
use async_trait::async_trait;
use rust_mcp_sdk::schema::{CallToolError, CallToolResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// 条目是否为评论类型
fn is_comment(item: &Value) -> bool {
    item.get("type").and_then(Value::as_str) == Some("comment")
}

/// 获取单条评论工具
#[rust_mcp_sdk::macros::mcp_tool(
    name = "getComment",
    title = "获取评论",
    description = "按 ID 获取单条 Hacker News 评论",
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
pub struct GetCommentTool {
    /// 评论 ID
    #[json_schema(title = "评论 ID", description = "要获取的评论 ID（正整数）")]
    pub id: u64,
}

/// 获取单条评论工具实现
pub struct GetCommentToolImpl {
    service: Arc<HnService>,
}

impl GetCommentToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<HnService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetCommentToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetCommentTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        const TOOL_NAME: &str = "getComment";

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

        match item {
            Some(raw) if is_comment(&raw) => json_response(&format_comment(&raw)),
            _ => Err(Error::not_found("Comment", id).into_call_tool_error(TOOL_NAME)),
        }
    }
}

/// 获取故事直接评论工具
#[rust_mcp_sdk::macros::mcp_tool(
    name = "getComments",
    title = "获取故事评论",
    description = "获取某个故事的直接（顶层）评论",
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
pub struct GetCommentsTool {
    /// 故事 ID
    #[json_schema(title = "故事 ID", description = "故事 ID（正整数）")]
    pub story_id: u64,

    /// 返回数量上限（1 到 100）
    #[json_schema(title = "数量上限", description = "返回数量上限（1 到 100）", default = 30)]
    pub limit: Option<u32>,
}

/// 获取故事直接评论工具实现
pub struct GetCommentsToolImpl {
    service: Arc<HnService>,
}

impl GetCommentsToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<HnService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetCommentsToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetCommentsTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        const TOOL_NAME: &str = "getComments";

        let mut v = ArgsValidator::new(&arguments);
        let story_id = v.required_positive_id("storyId");
        let limit = v.optional_int_in_range("limit", 1, 100, 30);
        v.finish().map_err(|e| e.into_call_tool_error(TOOL_NAME))?;
        let story_id = story_id.unwrap_or_default();

        let story = self
            .service
            .hn()
            .get_item(story_id)
            .await
            .map_err(|e| e.into_call_tool_error(TOOL_NAME))?
            .ok_or_else(|| Error::not_found("Story", story_id).into_call_tool_error(TOOL_NAME))?;

        // 没有子评论的故事返回空列表，不是错误
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let kid_ids: Vec<u64> = story
            .get("kids")
            .and_then(Value::as_array)
            .map(|kids| {
                kids.iter()
                    .filter_map(Value::as_u64)
                    .take(limit as usize)
                    .collect()
            })
            .unwrap_or_default();

        if kid_ids.is_empty() {
            return json_response(&Vec::<Value>::new());
        }

        let comments: Vec<_> = self
            .service
            .hn()
            .get_items(&kid_ids)
            .await
            .into_iter()
            .flatten()
            .filter(is_comment)
            .map(|raw| format_comment(&raw))
            .collect();

        json_response(&comments)
    }
}

/// 获取完整评论树工具
#[rust_mcp_sdk::macros::mcp_tool(
    name = "getCommentTree",
    title = "获取评论树",
    description = "获取某个故事的完整嵌套评论树",
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
pub struct GetCommentTreeTool {
    /// 故事 ID
    #[json_schema(title = "故事 ID", description = "故事 ID（正整数）")]
    pub story_id: u64,
}

/// 获取完整评论树工具实现
pub struct GetCommentTreeToolImpl {
    service: Arc<HnService>,
}

impl GetCommentTreeToolImpl {
    /// 创建新的工具实例
    #[must_use]
    pub fn new(service: Arc<HnService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetCommentTreeToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GetCommentTreeTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        const TOOL_NAME: &str = "getCommentTree";

        let mut v = ArgsValidator::new(&arguments);
        let story_id = v.required_positive_id("storyId");
        v.finish().map_err(|e| e.into_call_tool_error(TOOL_NAME))?;
        let story_id = story_id.unwrap_or_default();

        let raw = self
            .service
            .algolia()
            .get_story_with_comments(story_id)
            .await
            .map_err(|e| e.into_call_tool_error(TOOL_NAME))?;

        // 条目不存在或没有子评论都返回空树
        let tree: Vec<CommentTreeNode> = raw
            .as_ref()
            .and_then(|value| value.get("children"))
            .and_then(Value::as_array)
            .map(|children| children.iter().map(format_comment_tree).collect())
            .unwrap_or_default();

        json_response(&tree)
    }
}
