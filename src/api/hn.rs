//! 官方 Hacker News API（item-graph）客户端

use crate::cache::Cache;
use crate::error::{Error, Result};
use futures::future;
use serde_json::Value;
use std::sync::Arc;

/// 客户端名称，用于错误标注
const API_NAME: &str = "HackerNews";

/// 故事列表种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryListKind {
    /// 首页热门
    Top,
    /// 最新提交
    New,
    /// 最佳
    Best,
    /// Ask HN
    Ask,
    /// Show HN
    Show,
    /// 招聘
    Job,
}

impl StoryListKind {
    /// 列表对应的上游端点名
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            StoryListKind::Top => "topstories",
            StoryListKind::New => "newstories",
            StoryListKind::Best => "beststories",
            StoryListKind::Ask => "askstories",
            StoryListKind::Show => "showstories",
            StoryListKind::Job => "jobstories",
        }
    }

    /// 缓存键里使用的短名
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StoryListKind::Top => "top",
            StoryListKind::New => "new",
            StoryListKind::Best => "best",
            StoryListKind::Ask => "ask",
            StoryListKind::Show => "show",
            StoryListKind::Job => "job",
        }
    }
}

impl std::str::FromStr for StoryListKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(StoryListKind::Top),
            "new" => Ok(StoryListKind::New),
            "best" => Ok(StoryListKind::Best),
            "ask" => Ok(StoryListKind::Ask),
            "show" => Ok(StoryListKind::Show),
            "job" => Ok(StoryListKind::Job),
            other => Err(Error::Validation(format!(
                "type: unknown story list kind {other:?}"
            ))),
        }
    }
}

/// 官方 Hacker News API 客户端
///
/// 每个方法都先查缓存再发请求，命中与未命中对调用方透明。
/// 失败的请求不会写入缓存。
pub struct HnClient {
    client: reqwest::Client,
    base_url: String,
    cache: Arc<dyn Cache>,
}

impl HnClient {
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
    async fn fetch_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}/{path}", self.base_url);
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::api(API_NAME, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::api(API_NAME, format!("HTTP {status} for {path}")));
        }

        response
            .json()
            .await
            .map_err(|e| Error::api(API_NAME, format!("invalid JSON body: {e}")))
    }

    /// 缓存透明的请求：命中直接返回，未命中请求后写入缓存
    async fn cached_fetch(&self, key: &str, path: &str) -> Result<Value> {
        if let Some(hit) = self.cache.get(key).await {
            if let Ok(value) = serde_json::from_str(&hit) {
                tracing::debug!("cache hit: {key}");
                return Ok(value);
            }
        }

        let value = self.fetch_json(path).await?;
        // 上游对不存在的条目返回 null，不缓存缺失
        if !value.is_null() {
            self.cache.set(key.to_string(), value.to_string()).await;
        }
        Ok(value)
    }

    /// 按 ID 获取条目；不存在时返回 `None`
    pub async fn get_item(&self, id: u64) -> Result<Option<Value>> {
        let value = self
            .cached_fetch(&format!("item:{id}"), &format!("item/{id}.json"))
            .await?;
        Ok(if value.is_null() { None } else { Some(value) })
    }

    /// 并发获取多个条目，保持输入顺序
    ///
    /// 单个分支失败或条目缺失只影响对应位置（返回 `None`），
    /// 不会中断其它分支。
    pub async fn get_items(&self, ids: &[u64]) -> Vec<Option<Value>> {
        let fetches = ids.iter().map(|&id| self.get_item(id));
        let results = future::join_all(fetches).await;

        results
            .into_iter()
            .zip(ids)
            .map(|(result, id)| match result {
                Ok(item) => item,
                Err(e) => {
                    tracing::warn!("failed to fetch item {id}: {e}");
                    None
                }
            })
            .collect()
    }

    /// 获取某类故事列表的前 `limit` 个 ID
    pub async fn get_story_ids(&self, kind: StoryListKind, limit: usize) -> Result<Vec<u64>> {
        let key = format!("stories:{}:{limit}", kind.as_str());
        let value = self
            .cached_fetch(&key, &format!("{}.json", kind.endpoint()))
            .await?;

        Ok(value
            .as_array()
            .map(|ids| ids.iter().filter_map(Value::as_u64).take(limit).collect())
            .unwrap_or_default())
    }

    /// 按用户名获取用户资料；不存在时返回 `None`
    pub async fn get_user(&self, id: &str) -> Result<Option<Value>> {
        let value = self
            .cached_fetch(
                &format!("user:{id}"),
                &format!("user/{}.json", urlencoding::encode(id)),
            )
            .await?;
        Ok(if value.is_null() { None } else { Some(value) })
    }

    /// 获取当前最大条目 ID
    pub async fn get_max_item_id(&self) -> Result<u64> {
        let value = self.cached_fetch("maxitem", "maxitem.json").await?;
        value
            .as_u64()
            .ok_or_else(|| Error::api(API_NAME, "maxitem is not an integer"))
    }
}
