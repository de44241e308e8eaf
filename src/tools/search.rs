//! 全文搜索工具
#![allow(missing_docs)]

use crate::api::{HnService, SearchOptions};
use crate::tools::{json_response, Tool};
use crate::utils::validation::ArgsValidator;
use async_trait::async_trait;
use rust_mcp_sdk::schema::{CallToolError, CallToolResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const TOOL_NAME: &str = "search";

/// 搜索 Hacker News 工具
#[rust_mcp_sdk::macros::mcp_tool(
    name = "search",
    title = "搜索 Hacker News",
    description = "全文搜索 Hacker News 的故事和评论",
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
pub struct SearchTool {
    /// 搜索关键词
    #[json_schema(title = "关键词", description = "搜索关键词")]
    pub query: String,

    /// 结果类型：all、story 或 comment
    #[json_schema(title = "结果类型", description = "限定结果类型", default = "all")]
    #[serde(rename = "type")]
    pub result_type: Option<String>,

    /// 页码，从 0 开始
    #[json_schema(title = "页码", description = "页码（从 0 开始）", default = 0)]
    pub page: Option<u32>,

    /// 每页结果数（1 到 100）
    #[json_schema(title = "每页结果数", description = "每页结果数（1 到 100）", default = 20)]
    pub hits_per_page: Option<u32>,
}

/// 搜索响应记录；上游缺失的分页元数据补 0
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// 命中结果（上游原始形状）
    pub hits: Vec<Value>,
    /// 当前页码
    pub page: u64,
    /// 总命中数
    pub nb_hits: u64,
    /// 总页数
    pub nb_pages: u64,
    /// 每页结果数
    pub hits_per_page: u64,
    /// 上游处理耗时（毫秒）
    #[serde(rename = "processingTimeMS")]
    pub processing_time_ms: u64,
}

impl SearchResponse {
    /// 从上游搜索响应中提取记录
    #[must_use]
    pub fn from_raw(raw: &Value) -> Self {
        let meta = |field: &str| raw.get(field).and_then(Value::as_u64).unwrap_or(0);
        Self {
            hits: raw
                .get("hits")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            page: meta("page"),
            nb_hits: meta("nbHits"),
            nb_pages: meta("nbPages"),
            hits_per_page: meta("hitsPerPage"),
            processing_time_ms: meta("processingTimeMS"),
        }
    }
}

/// 搜索工具实现
pub struct SearchToolImpl {
    service: Arc<HnService>,
}

impl SearchToolImpl {
    /// 创建新的搜索工具实例
    #[must_use]
    pub fn new(service: Arc<HnService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for SearchToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        SearchTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        let mut v = ArgsValidator::new(&arguments);
        let query = v.required_string("query");
        let result_type = v.optional_enum("type", &["all", "story", "comment"], "all");
        let page = v.optional_int_in_range("page", 0, i64::from(u32::MAX), 0);
        let hits_per_page = v.optional_int_in_range("hitsPerPage", 1, 100, 20);
        v.finish().map_err(|e| e.into_call_tool_error(TOOL_NAME))?;
        let query = query.unwrap_or_default();

        // "all" 不加标签过滤，其余直接作为 Algolia 标签
        let tags = match result_type.as_str() {
            "all" => None,
            other => Some(other.to_string()),
        };

        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let options = SearchOptions {
            tags,
            numeric_filters: None,
            page: Some(page as u32),
            hits_per_page: Some(hits_per_page as u32),
        };

        let raw = self
            .service
            .algolia()
            .search(&query, &options)
            .await
            .map_err(|e| e.into_call_tool_error(TOOL_NAME))?;

        json_response(&SearchResponse::from_raw(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_defaults_missing_metadata() {
        let raw = json!({ "hits": [{ "objectID": "1" }] });
        let response = SearchResponse::from_raw(&raw);
        assert_eq!(response.hits.len(), 1);
        assert_eq!(response.nb_hits, 0);
        assert_eq!(response.processing_time_ms, 0);
    }

    #[test]
    fn test_search_response_serializes_upstream_field_names() {
        let raw = json!({
            "hits": [],
            "page": 2,
            "nbHits": 40,
            "nbPages": 2,
            "hitsPerPage": 20,
            "processingTimeMS": 3
        });
        let serialized = serde_json::to_value(SearchResponse::from_raw(&raw)).unwrap();
        assert_eq!(serialized["nbHits"], 40);
        assert_eq!(serialized["hitsPerPage"], 20);
        assert_eq!(serialized["processingTimeMS"], 3);
    }
}
