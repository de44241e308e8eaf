//! 上游 API 客户端模块
//!
//! 两个只读客户端：官方 item-graph API 与 Algolia 搜索 API。
//! 所有网络 I/O 和缓存写入都发生在这一层，工具层看不到缓存的存在。

pub mod algolia;
pub mod hn;

use crate::cache::{memory::MemoryCache, Cache, CacheConfig};
use crate::config::ApiConfig;
use crate::error::Result;
use crate::utils::HttpClientBuilder;
use std::sync::Arc;
use std::time::Duration;

pub use algolia::{AlgoliaClient, SearchOptions};
pub use hn::{HnClient, StoryListKind};

/// Hacker News 查询服务
///
/// 持有两个客户端和它们各自的缓存实例，在启动时构造并注入到
/// 工具注册表，没有全局状态。
pub struct HnService {
    hn: HnClient,
    algolia: AlgoliaClient,
}

impl HnService {
    /// 根据配置创建服务
    pub fn new(api: &ApiConfig, cache: &CacheConfig) -> Result<Self> {
        let client = HttpClientBuilder::new()
            .timeout(Duration::from_secs(api.request_timeout_secs))
            .user_agent(format!("HnMcp/{}", crate::VERSION))
            .build()?;

        // 条目/用户与搜索结果使用各自独立配置 TTL 的缓存实例
        let item_cache: Arc<dyn Cache> = Arc::new(MemoryCache::new(Duration::from_secs(
            cache.item_ttl_secs,
        )));
        let search_cache: Arc<dyn Cache> = Arc::new(MemoryCache::new(Duration::from_secs(
            cache.search_ttl_secs,
        )));

        Ok(Self {
            hn: HnClient::new(client.clone(), api.hn_base_url.clone(), item_cache),
            algolia: AlgoliaClient::new(client, api.algolia_base_url.clone(), search_cache),
        })
    }

    /// 官方 item-graph 客户端
    #[must_use]
    pub fn hn(&self) -> &HnClient {
        &self.hn
    }

    /// Algolia 搜索客户端
    #[must_use]
    pub fn algolia(&self) -> &AlgoliaClient {
        &self.algolia
    }
}
