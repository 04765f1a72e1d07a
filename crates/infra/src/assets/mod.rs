//! Asset hosting backends: turn stored image references into public URLs.

pub mod cloudinary;
pub mod local;

use std::sync::Arc;

use shopfront_products::AssetResolver;

use crate::config::AssetBackend;

pub use cloudinary::CloudinaryResolver;
pub use local::LocalMediaResolver;

/// Pick the resolver for the configured backend. Called once at startup.
pub fn build_resolver(backend: &AssetBackend) -> Arc<dyn AssetResolver> {
    match backend {
        AssetBackend::Local {
            public_base_url,
            media_url,
        } => {
            tracing::info!(%public_base_url, %media_url, "serving images from local media");
            Arc::new(LocalMediaResolver::new(public_base_url, media_url))
        }
        AssetBackend::Cloudinary { cloud_name } => {
            tracing::info!(%cloud_name, "serving images from cloudinary");
            Arc::new(CloudinaryResolver::new(cloud_name))
        }
    }
}

/// Absolute URLs are already resolved and pass through untouched.
fn is_absolute_url(reference: &str) -> bool {
    reference.starts_with("https://") || reference.starts_with("http://")
}
