//! Infrastructure layer: product storage, asset hosting, configuration.

pub mod assets;
pub mod config;
pub mod store;

pub use assets::{build_resolver, CloudinaryResolver, LocalMediaResolver};
pub use config::{AppConfig, AssetBackend, ConfigError};
pub use store::{InMemoryProductStore, PostgresProductStore, ProductStore, StoreError};
