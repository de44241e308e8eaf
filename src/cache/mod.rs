//! 缓存模块
//!
//! 为上游 HTTP 响应提供带 TTL 的内存缓存。

pub mod memory;

/// 缓存 trait
///
/// 值统一为 JSON 字符串，由调用方负责序列化/反序列化。
/// TTL 在构造缓存实例时固定，对该实例的所有条目统一生效；
/// 不同资源种类使用各自独立配置的实例。
#[async_trait::async_trait]
pub trait Cache: Send + Sync {
    /// 获取缓存值；过期条目视为不存在
    async fn get(&self, key: &str) -> Option<String>;

    /// 设置缓存值，总是覆盖并重置过期时间
    async fn set(&self, key: String, value: String);

    /// 删除缓存值
    async fn delete(&self, key: &str);

    /// 清空缓存
    async fn clear(&self);

    /// 检查键是否存在且未过期
    async fn exists(&self, key: &str) -> bool;
}

/// 缓存配置
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct CacheConfig {
    /// 条目/用户/列表缓存的 TTL（秒）
    pub item_ttl_secs: u64,

    /// 搜索结果缓存的 TTL（秒），搜索结果更新更频繁，默认更短
    pub search_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            item_ttl_secs: 300, // 5 分钟
            search_ttl_secs: 60, // 1 分钟
        }
    }
}
