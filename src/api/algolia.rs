//! Algolia HN Search API 客户端

use crate::cache::Cache;
use crate::error::{Error, Result};
use serde_json::Value;
use std::sync::Arc;

/// 客户端名称，用于错误标注
const API_NAME: &str = "Algolia";

/// 搜索请求的可选参数
///
/// 全部字段可选，缺省值由上游决定（page=0、hitsPerPage=20）。
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Algolia 标签过滤，例如 `story`、`comment`、`author_pg`
    pub tags: Option<String>,
    /// 数值过滤表达式，例如 `points>100`
    pub numeric_filters: Option<String>,
    /// 页码，从 0 开始
    pub page: Option<u32>,
    /// 每页结果数
    pub hits_per_page: Option<u32>,
}

/// 搜索缓存键
///
/// 每段单独转义后再用 `:` 拼接，不同参数组合在结构上不可能同键，
/// 即使 query 里带冒号。page 和 per_page 只含数字，不需要转义。
fn search_cache_key(query: &str, tags: &str, filters: &str, page: &str, per_page: &str) -> String {
    format!(
        "search:{}:{}:{}:{page}:{per_page}",
        urlencoding::encode(query),
        urlencoding::encode(tags),
        urlencoding::encode(filters)
    )
}

/// Algolia HN Search API 客户端
///
/// 负责全文搜索和两个官方 API 不提供的物化视图：
/// 服务端组装好的评论树、搜索侧的用户画像。
pub struct AlgoliaClient {
    client: reqwest::Client,
    base_url: String,
    cache: Arc<dyn Cache>,
}

impl AlgoliaClient {
    /// 创建新的客户端
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: String, cache: Arc<dyn Cache>) -> Self {
        Self {
            client,
            base_url,
            cache,
        }
    }

    /// 发送 GET 请求并解析 JSON 响应
    ///
    /// 404 返回 `Ok(None)`，其余非 2xx 状态视为错误。
    async fn fetch_json(&self, path_and_query: &str) -> Result<Option<Value>> {
        let url = format!("{}/{path_and_query}", self.base_url);
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::api(API_NAME, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::api(API_NAME, format!("HTTP {status}")));
        }

        let value = response
            .json()
            .await
            .map_err(|e| Error::api(API_NAME, format!("invalid JSON body: {e}")))?;
        Ok(Some(value))
    }

    /// 缓存透明的请求；上游 404 不写缓存
    async fn cached_fetch(&self, key: &str, path_and_query: &str) -> Result<Option<Value>> {
        if let Some(hit) = self.cache.get(key).await {
            if let Ok(value) = serde_json::from_str(&hit) {
                tracing::debug!("cache hit: {key}");
                return Ok(Some(value));
            }
        }

        let value = self.fetch_json(path_and_query).await?;
        if let Some(ref v) = value {
            self.cache.set(key.to_string(), v.to_string()).await;
        }
        Ok(value)
    }

    /// 全文搜索
    ///
    /// 返回 Algolia 的原始响应对象（含 `hits`、分页元数据）。
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<Value> {
        let tags = options.tags.as_deref().unwrap_or("");
        let filters = options.numeric_filters.as_deref().unwrap_or("");
        let page = options.page.map(|p| p.to_string()).unwrap_or_default();
        let per_page = options
            .hits_per_page
            .map(|n| n.to_string())
            .unwrap_or_default();

        let mut path = format!("search?query={}", urlencoding::encode(query));
        if !tags.is_empty() {
            path.push_str(&format!("&tags={}", urlencoding::encode(tags)));
        }
        if !filters.is_empty() {
            path.push_str(&format!("&numericFilters={}", urlencoding::encode(filters)));
        }
        if !page.is_empty() {
            path.push_str(&format!("&page={page}"));
        }
        if !per_page.is_empty() {
            path.push_str(&format!("&hitsPerPage={per_page}"));
        }

        let key = search_cache_key(query, tags, filters, &page, &per_page);
        self.cached_fetch(&key, &path)
            .await?
            .ok_or_else(|| Error::api(API_NAME, "search endpoint returned 404"))
    }

    /// 限定 `story` 标签的搜索
    pub async fn search_stories(&self, query: &str, options: &SearchOptions) -> Result<Value> {
        let options = SearchOptions {
            tags: Some("story".to_string()),
            ..options.clone()
        };
        self.search(query, &options).await
    }

    /// 获取带完整嵌套评论树的条目；不存在时返回 `None`
    pub async fn get_story_with_comments(&self, id: u64) -> Result<Option<Value>> {
        self.cached_fetch(&format!("story_tree:{id}"), &format!("items/{id}"))
            .await
    }

    /// 获取搜索侧的用户画像；不存在时返回 `None`
    pub async fn get_user(&self, username: &str) -> Result<Option<Value>> {
        self.cached_fetch(
            &format!("search_user:{username}"),
            &format!("users/{}", urlencoding::encode(username)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_options_default_is_all_none() {
        let options = SearchOptions::default();
        assert!(options.tags.is_none());
        assert!(options.numeric_filters.is_none());
        assert!(options.page.is_none());
        assert!(options.hits_per_page.is_none());
    }

    #[test]
    fn test_search_cache_key_segments_do_not_collide() {
        // 带冒号的 query 不能和相邻段合并出相同的键
        let shifted_left = search_cache_key("a:b", "c", "", "0", "20");
        let shifted_right = search_cache_key("a", "b:c", "", "0", "20");
        assert_ne!(shifted_left, shifted_right);

        let empty_tail = search_cache_key("a:", "", "", "0", "20");
        let empty_head = search_cache_key("a", ":", "", "0", "20");
        assert_ne!(empty_tail, empty_head);

        // 相同参数仍然产生相同的键
        assert_eq!(
            search_cache_key("rust", "story", "points>10", "1", "30"),
            search_cache_key("rust", "story", "points>10", "1", "30")
        );
    }
}
