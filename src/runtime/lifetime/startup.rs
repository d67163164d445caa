use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{LangLearnError, Result};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

const FALLBACK_CACHE: &str = "moka";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        LangLearnError::cache_plugin_not_found(format!("Cache backend '{name}' not registered"))
    })?;
    constructor().await.map(Arc::from)
}

/// 创建缓存实例，配置的后端不可用时退回内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = AppConfig::get().cache.cache_type.as_str();
    info!("Creating {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => Ok(cache),
        Err(e) if cache_type != FALLBACK_CACHE => {
            warn!(
                "Cache backend {} unavailable ({}), falling back to {}",
                cache_type, e, FALLBACK_CACHE
            );
            build_cache(FALLBACK_CACHE).await
        }
        Err(e) => Err(e),
    }
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz23456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// 空库时创建默认管理员，密码取 ADMIN_PASSWORD，未设置则随机生成并打印
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(0) => info!("No users found, creating default admin account"),
        Ok(count) => {
            debug!("{} user(s) present, skipping admin seed", count);
            return;
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let generated = generate_random_password(16);
        warn!("ADMIN_PASSWORD not set, generated admin password: {}", generated);
        warn!("Change it after first login or set ADMIN_PASSWORD before startup");
        generated
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = CreateUserRequest {
        username: "admin".to_string(),
        email: "admin@langlearn.local".to_string(),
        password: password_hash,
        role: UserRole::Admin,
        display_name: Some("Administrator".to_string()),
        avatar_url: None,
        bio: None,
    };

    match storage.create_user(admin).await {
        Ok(user) => info!("Default admin created (ID: {}, username: {})", user.id, user.username),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 准备服务器启动的上下文：存储、种子管理员与缓存
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    crate::cache::register_builtin_plugins();
    debug!(
        "Registered cache backends: {:?}",
        crate::cache::register::registered_object_cache_plugins()
    );

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_password() {
        let a = generate_random_password(16);
        let b = generate_random_password(16);
        assert_eq!(a.chars().count(), 16);
        assert!(a.is_ascii());
        assert_ne!(a, b);
    }
}
