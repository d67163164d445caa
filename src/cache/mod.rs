//! 对象缓存层
//!
//! 通过插件注册表选择后端（`moka` 内存缓存或 `redis`），上层只依赖 [`ObjectCache`]。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // 后端出错，无法判断键是否存在
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// `ttl` 以秒为单位，0 表示使用后端默认值
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 声明缓存插件，生成 `register()` 将构造器写入注册表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        pub fn register() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        <$ty>::new()
                            .map(|cache| Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                            .map_err(|e| {
                                $crate::errors::LangLearnError::cache_connection(format!(
                                    "{} cache init failed: {e}",
                                    $name
                                ))
                            })
                    })
                }),
            );
        }
    };
}

/// 注册所有内置缓存后端
pub fn register_builtin_plugins() {
    object_cache::moka::register();
    object_cache::redis::register();
}
