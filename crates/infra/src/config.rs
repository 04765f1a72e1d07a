//! Configuration loading and representation.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory.

use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_MEDIA_URL: &str = "/media/";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Where product images live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetBackend {
    Local {
        public_base_url: String,
        media_url: String,
    },
    Cloudinary {
        cloud_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Postgres URL; `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub assets: AssetBackend,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from `.env` (if present) and the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::info!(path = %path.display(), "loaded .env file");
        }
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        tracing::info!(
            bind_addr = %config.bind_addr,
            persistent = config.database_url.is_some(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let backend = get("ASSET_BACKEND").unwrap_or_else(|| "local".to_string());
        let assets = match backend.trim().to_lowercase().as_str() {
            "local" => AssetBackend::Local {
                public_base_url: get("PUBLIC_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string()),
                media_url: get("MEDIA_URL").unwrap_or_else(|| DEFAULT_MEDIA_URL.to_string()),
            },
            "cloudinary" => AssetBackend::Cloudinary {
                cloud_name: get("CLOUDINARY_CLOUD_NAME")
                    .ok_or(ConfigError::Missing("CLOUDINARY_CLOUD_NAME"))?,
            },
            other => {
                return Err(ConfigError::Invalid {
                    key: "ASSET_BACKEND",
                    reason: format!("expected 'local' or 'cloudinary', got '{other}'"),
                });
            }
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            db_max_connections,
            assets,
            cors_allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_select_in_memory_store_and_local_media() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_url, None);
        assert_eq!(
            config.assets,
            AssetBackend::Local {
                public_base_url: "http://localhost:8080".to_string(),
                media_url: "/media/".to_string(),
            }
        );
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:5173".to_string()]);
    }

    #[test]
    fn cloudinary_requires_a_cloud_name() {
        assert_eq!(
            load(&[("ASSET_BACKEND", "cloudinary")]).unwrap_err(),
            ConfigError::Missing("CLOUDINARY_CLOUD_NAME")
        );

        let config = load(&[("ASSET_BACKEND", "Cloudinary"), ("CLOUDINARY_CLOUD_NAME", "shop")]).unwrap();
        assert_eq!(
            config.assets,
            AssetBackend::Cloudinary {
                cloud_name: "shop".to_string()
            }
        );
    }

    #[test]
    fn unknown_backend_and_bad_addresses_are_rejected() {
        assert!(matches!(
            load(&[("ASSET_BACKEND", "s3")]),
            Err(ConfigError::Invalid { key: "ASSET_BACKEND", .. })
        ));
        assert!(matches!(
            load(&[("BIND_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { key: "BIND_ADDR", .. })
        ));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[
            ("CORS_ALLOWED_ORIGINS", "https://shop.rw, http://localhost:5173,,"),
            ("DATABASE_URL", "postgres://localhost/shop"),
        ])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://shop.rw".to_string(), "http://localhost:5173".to_string()]
        );
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/shop"));
    }
}
