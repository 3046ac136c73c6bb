//! 资源级旁路缓存
//!
//! 键由资源类型与标识哈希得到，TTL 按资源类型固定。任何失败都表现为
//! 未命中或返回 false，由调用方回源数据库。

use std::fmt;
use std::sync::Arc;

use data_encoding::HEXLOWER;
use serde::{Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::{CacheResult, ObjectCache};

/// 可缓存的资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    User,
    Course,
    CourseOutline,
    MentorProfile,
    Certificate,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::User => "user",
            ResourceKind::Course => "course",
            ResourceKind::CourseOutline => "course_outline",
            ResourceKind::MentorProfile => "mentor_profile",
            ResourceKind::Certificate => "certificate",
        }
    }

    /// 默认 TTL（秒）
    pub fn ttl(&self) -> u64 {
        match self {
            ResourceKind::User => 300,
            ResourceKind::Course => 600,
            ResourceKind::CourseOutline => 600,
            ResourceKind::MentorProfile => 900,
            ResourceKind::Certificate => 3600,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct ResourceCache {
    backend: Arc<dyn ObjectCache>,
}

impl ResourceCache {
    pub fn new(backend: Arc<dyn ObjectCache>) -> Self {
        Self { backend }
    }

    /// `{kind}:{sha256("{kind}:{id}") 的前 32 位十六进制}`
    pub fn key(kind: ResourceKind, id: impl fmt::Display) -> String {
        let digest = Sha256::digest(format!("{kind}:{id}").as_bytes());
        let hex = HEXLOWER.encode(&digest);
        format!("{kind}:{}", &hex[..32])
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        id: impl fmt::Display,
    ) -> Option<T> {
        let key = Self::key(kind, id);
        match self.backend.get_raw(&key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Dropping undecodable cache entry {}: {}", key, e);
                    self.backend.remove(&key).await;
                    None
                }
            },
            CacheResult::NotFound => None,
            CacheResult::ExistsButNoValue => {
                debug!("Cache backend unavailable for {}", key);
                None
            }
        }
    }

    pub async fn set<T: Serialize>(
        &self,
        kind: ResourceKind,
        id: impl fmt::Display,
        value: &T,
    ) -> bool {
        let key = Self::key(kind, id);
        match serde_json::to_string(value) {
            Ok(raw) => self.backend.insert_raw(key, raw, kind.ttl()).await,
            Err(e) => {
                warn!("Failed to serialize cache entry {}: {}", key, e);
                false
            }
        }
    }

    pub async fn invalidate(&self, kind: ResourceKind, id: impl fmt::Display) -> bool {
        self.backend.remove(&Self::key(kind, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::sync::Mutex;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
    }

    /// 记录写入 TTL 的假后端
    #[derive(Default)]
    struct RecordingCache {
        inserted: Mutex<Vec<(String, String, u64)>>,
        broken: bool,
    }

    #[async_trait]
    impl ObjectCache for RecordingCache {
        async fn get_raw(&self, key: &str) -> CacheResult<String> {
            if self.broken {
                return CacheResult::ExistsButNoValue;
            }
            let inserted = self.inserted.lock().unwrap();
            match inserted.iter().rev().find(|(k, _, _)| k == key) {
                Some((_, v, _)) => CacheResult::Found(v.clone()),
                None => CacheResult::NotFound,
            }
        }

        async fn insert_raw(&self, key: String, value: String, ttl: u64) -> bool {
            if self.broken {
                return false;
            }
            self.inserted.lock().unwrap().push((key, value, ttl));
            true
        }

        async fn remove(&self, key: &str) -> bool {
            if self.broken {
                return false;
            }
            self.inserted.lock().unwrap().retain(|(k, _, _)| k != key);
            true
        }

        async fn invalidate_all(&self) {}
    }

    fn moka() -> ResourceCache {
        ResourceCache::new(Arc::new(MokaCacheWrapper::with_settings(100, 60)))
    }

    #[test]
    fn test_key_format_is_stable() {
        let key = ResourceCache::key(ResourceKind::Course, 42);
        assert!(key.starts_with("course:"));
        assert_eq!(key.len(), "course:".len() + 32);
        assert_eq!(key, ResourceCache::key(ResourceKind::Course, "42"));
        assert_ne!(key, ResourceCache::key(ResourceKind::CourseOutline, 42));
        assert_ne!(key, ResourceCache::key(ResourceKind::Course, 43));
    }

    #[test]
    fn test_ttl_defaults() {
        assert_eq!(ResourceKind::User.ttl(), 300);
        assert_eq!(ResourceKind::Course.ttl(), 600);
        assert_eq!(ResourceKind::CourseOutline.ttl(), 600);
        assert_eq!(ResourceKind::MentorProfile.ttl(), 900);
        assert_eq!(ResourceKind::Certificate.ttl(), 3600);
    }

    #[tokio::test]
    async fn test_set_get_invalidate() {
        let cache = moka();
        let item = Item { name: "rust".into() };
        assert!(cache.get::<Item>(ResourceKind::Course, 1).await.is_none());
        assert!(cache.set(ResourceKind::Course, 1, &item).await);
        assert_eq!(cache.get::<Item>(ResourceKind::Course, 1).await, Some(item));
        assert!(cache.invalidate(ResourceKind::Course, 1).await);
        assert!(cache.get::<Item>(ResourceKind::Course, 1).await.is_none());
    }

    #[tokio::test]
    async fn test_set_uses_kind_ttl() {
        let backend = Arc::new(RecordingCache::default());
        let cache = ResourceCache::new(backend.clone());
        cache
            .set(ResourceKind::Certificate, "abc", &Item { name: "c".into() })
            .await;
        let inserted = backend.inserted.lock().unwrap();
        assert_eq!(inserted[0].2, 3600);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_removed() {
        let backend = Arc::new(RecordingCache::default());
        let cache = ResourceCache::new(backend.clone());
        let key = ResourceCache::key(ResourceKind::User, 7);
        backend.insert_raw(key.clone(), "not json".into(), 10).await;

        assert!(cache.get::<Item>(ResourceKind::User, 7).await.is_none());
        assert_eq!(backend.get_raw(&key).await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_backend_failure_degrades_to_miss() {
        let backend = Arc::new(RecordingCache {
            broken: true,
            ..Default::default()
        });
        let cache = ResourceCache::new(backend);
        assert!(!cache.set(ResourceKind::User, 1, &Item { name: "x".into() }).await);
        assert!(cache.get::<Item>(ResourceKind::User, 1).await.is_none());
        assert!(!cache.invalidate(ResourceKind::User, 1).await);
    }
}
