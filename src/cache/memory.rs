//! 内存缓存实现

use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// 缓存条目
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.expires_at <= Instant::now()
    }
}

/// 内存缓存实现
///
/// 惰性过期：只在读取时检查并剔除过期条目，没有后台清扫线程。
/// 除 TTL 外没有其它淘汰策略，长期运行的部署需要注意条目数增长。
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl MemoryCache {
    /// 创建新的内存缓存，TTL 对所有条目统一生效
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// 当前条目数（含尚未被惰性剔除的过期条目）
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// 缓存是否为空
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait::async_trait]
impl super::Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        // 检查与剔除在同一次写锁内完成，不存在 check-then-act 竞争窗口
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    async fn set(&self, key: String, value: String) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().insert(key, entry);
    }

    async fn delete(&self, key: &str) {
        self.entries.write().remove(key);
    }

    async fn clear(&self) {
        self.entries.write().clear();
    }

    async fn exists(&self, key: &str) -> bool {
        self.entries
            .read()
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_memory_cache_basic() {
        let cache = MemoryCache::new(Duration::from_secs(60));

        // 测试设置和获取
        cache.set("key1".to_string(), "value1".to_string()).await;
        assert_eq!(cache.get("key1").await, Some("value1".to_string()));

        // 测试删除
        cache.delete("key1").await;
        assert_eq!(cache.get("key1").await, None);

        // 测试清空
        cache.set("key2".to_string(), "value2".to_string()).await;
        cache.clear().await;
        assert_eq!(cache.get("key2").await, None);
    }

    #[tokio::test]
    async fn test_memory_cache_ttl_expiry() {
        let cache = MemoryCache::new(Duration::from_millis(50));

        cache.set("key1".to_string(), "value1".to_string()).await;
        assert_eq!(cache.get("key1").await, Some("value1".to_string()));

        // 等待过期
        sleep(Duration::from_millis(80)).await;
        assert_eq!(cache.get("key1").await, None);
        assert!(!cache.exists("key1").await);
    }

    #[tokio::test]
    async fn test_memory_cache_set_refreshes_expiry() {
        let cache = MemoryCache::new(Duration::from_millis(100));

        cache.set("key1".to_string(), "old".to_string()).await;
        sleep(Duration::from_millis(60)).await;

        // 覆盖写入重置过期时间
        cache.set("key1".to_string(), "new".to_string()).await;
        sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.get("key1").await, Some("new".to_string()));
    }

    #[tokio::test]
    async fn test_memory_cache_distinct_keys() {
        let cache = MemoryCache::new(Duration::from_secs(60));

        cache.set("item:1".to_string(), "a".to_string()).await;
        cache.set("user:1".to_string(), "b".to_string()).await;

        assert_eq!(cache.get("item:1").await, Some("a".to_string()));
        assert_eq!(cache.get("user:1").await, Some("b".to_string()));
    }

    #[tokio::test]
    async fn test_memory_cache_lazy_eviction_on_read() {
        let cache = MemoryCache::new(Duration::from_millis(30));

        cache.set("key1".to_string(), "value1".to_string()).await;
        sleep(Duration::from_millis(50)).await;

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("key1").await, None);
        // 过期条目在读取时被剔除
        assert_eq!(cache.len(), 0);
    }
}
