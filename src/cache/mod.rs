//! 缓存层
//!
//! `ObjectCache` 是键值缓存后端的抽象（Moka 内存缓存或 Redis），
//! 后端通过 `declare_object_cache_plugin!` 在进程启动时注册到插件表。
//! `ResourceCache` 在其上提供按资源类型划分 TTL 的旁路缓存。

pub mod object_cache;
pub mod register;
pub mod resource;
mod traits;

pub use resource::{ResourceCache, ResourceKind};
pub use traits::{CacheResult, ObjectCache};

/// 声明一个缓存后端插件
///
/// 类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::CourseHubError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                }),
            );
        }
    };
}
