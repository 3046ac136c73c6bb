use crate::cache::{ObjectCache, ResourceCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::integrations::{CredentialIssuer, Mailer, build_credential_issuer, build_mailer};
use crate::models::users::entities::{UserProfile, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

type StartupResult<T> = Result<T, Box<dyn std::error::Error>>;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub resource_cache: ResourceCache,
    pub credential_issuer: Arc<dyn CredentialIssuer>,
    pub mailer: Arc<dyn Mailer>,
}

async fn try_cache_plugin(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name)?;
    match constructor().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", name, e);
            None
        }
    }
}

/// 创建缓存实例，配置的后端不可用时回退到 moka
async fn create_cache() -> StartupResult<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;
    warn!("Attempting to create {} cache backend", cache_type);

    if get_object_cache_plugin(cache_type).is_none() {
        warn!("Cache backend '{}' not found in registry", cache_type);
    }
    if let Some(cache) = try_cache_plugin(cache_type).await {
        return Ok(cache);
    }

    if cache_type != "moka" {
        warn!("Falling back to memory cache");
        if let Some(cache) = try_cache_plugin("moka").await {
            return Ok(cache);
        }
    }

    Err(format!("No cache backend available (tried: {cache_type})").into())
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

fn admin_request(password_hash: String) -> CreateUserRequest {
    CreateUserRequest {
        username: "admin".to_string(),
        email: "admin@localhost".to_string(),
        password: password_hash,
        role: UserRole::Admin,
        profile: UserProfile {
            display_name: "Administrator".to_string(),
            avatar_url: None,
            bio: None,
        },
    }
}

/// 用户表为空时创建默认管理员
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    // 优先使用环境变量中的密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    match storage.create_user(admin_request(password_hash)).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和外部集成
pub async fn prepare_server_startup() -> StartupResult<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache().await?;
    let resource_cache = ResourceCache::new(cache);
    warn!("Cache backend initialized");

    let config = AppConfig::get();
    let credential_issuer = build_credential_issuer(&config.credentials)?;
    let mailer = build_mailer(&config.mail)?;
    warn!(
        "Integrations initialized (credential issuer: {})",
        credential_issuer.name()
    );

    Ok(StartupContext {
        storage,
        resource_cache,
        credential_issuer,
        mailer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_uses_charset() {
        let pwd = generate_random_password(24);
        assert_eq!(pwd.chars().count(), 24);
        assert!(pwd.chars().all(|c| c.is_ascii_graphic()));
    }

    #[test]
    fn test_admin_request_shape() {
        let req = admin_request("hash".into());
        assert_eq!(req.role, UserRole::Admin);
        assert_eq!(req.profile.display_name, "Administrator");
        assert_eq!(req.password, "hash");
    }
}
