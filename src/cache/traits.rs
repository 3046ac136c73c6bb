use async_trait::async_trait;

/// 缓存读取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端出错或值不可用
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// 写入缓存，`ttl` 为秒，0 表示使用默认 TTL；返回是否写入成功
    async fn insert_raw(&self, key: String, value: String, ttl: u64) -> bool;

    /// 删除键；后端出错时返回 false
    async fn remove(&self, key: &str) -> bool;

    async fn invalidate_all(&self);
}
