use shopfront_products::{AssetError, AssetRef, AssetResolver};

/// Images stored under a local media directory and served by this host.
///
/// URL shape: `<public_base_url><media_url><reference>`, e.g.
/// `http://localhost:8080/media/products/mug.jpg`.
#[derive(Debug, Clone)]
pub struct LocalMediaResolver {
    public_base_url: String,
    media_url: String,
}

impl LocalMediaResolver {
    pub fn new(public_base_url: &str, media_url: &str) -> Self {
        let media = media_url.trim_matches('/');
        let media_url = if media.is_empty() {
            "/".to_string()
        } else {
            format!("/{media}/")
        };

        Self {
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            media_url,
        }
    }
}

impl AssetResolver for LocalMediaResolver {
    fn resolve(&self, asset: &AssetRef) -> Result<String, AssetError> {
        let reference = asset.as_str();
        if super::is_absolute_url(reference) {
            return Ok(reference.to_string());
        }

        let path = reference.trim_start_matches('/');
        if path.split('/').any(|segment| segment == "..") {
            return Err(AssetError::unresolvable(asset, "path escapes the media root"));
        }
        if path.is_empty() {
            return Err(AssetError::unresolvable(asset, "empty media path"));
        }

        Ok(format!("{}{}{}", self.public_base_url, self.media_url, path))
    }
}
