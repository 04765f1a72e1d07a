use shopfront_products::{AssetError, AssetRef, AssetResolver};

pub const CLOUDINARY_DELIVERY_HOST: &str = "https://res.cloudinary.com";

const UPLOAD_PREFIX: &str = "image/upload/";

/// Images hosted on Cloudinary, referenced by public id.
///
/// URL shape: `https://res.cloudinary.com/<cloud_name>/image/upload/<public_id>`.
/// References that already carry the `image/upload/` prefix are accepted as is.
#[derive(Debug, Clone)]
pub struct CloudinaryResolver {
    cloud_name: String,
}

impl CloudinaryResolver {
    pub fn new(cloud_name: &str) -> Self {
        Self {
            cloud_name: cloud_name.trim().to_string(),
        }
    }
}

impl AssetResolver for CloudinaryResolver {
    fn resolve(&self, asset: &AssetRef) -> Result<String, AssetError> {
        let reference = asset.as_str();
        if super::is_absolute_url(reference) {
            return Ok(reference.to_string());
        }

        if self.cloud_name.is_empty() {
            return Err(AssetError::NotConfigured("cloudinary cloud name is empty".to_string()));
        }

        let reference = reference.trim_start_matches('/');
        let public_id = reference.strip_prefix(UPLOAD_PREFIX).unwrap_or(reference);
        if public_id.is_empty() {
            return Err(AssetError::unresolvable(asset, "empty public id"));
        }

        Ok(format!(
            "{CLOUDINARY_DELIVERY_HOST}/{}/{UPLOAD_PREFIX}{public_id}",
            self.cloud_name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(raw: &str) -> AssetRef {
        AssetRef::parse(raw).unwrap()
    }

    #[test]
    fn builds_delivery_urls() {
        let resolver = CloudinaryResolver::new("nagahire");
        assert_eq!(
            resolver.resolve(&asset("v1712/shop/basket.jpg")).unwrap(),
            "https://res.cloudinary.com/nagahire/image/upload/v1712/shop/basket.jpg"
        );
        assert_eq!(
            resolver.resolve(&asset("image/upload/basket")).unwrap(),
            "https://res.cloudinary.com/nagahire/image/upload/basket"
        );
    }

    #[test]
    fn missing_cloud_name_is_not_configured() {
        let resolver = CloudinaryResolver::new("  ");
        assert!(matches!(
            resolver.resolve(&asset("basket")),
            Err(AssetError::NotConfigured(_))
        ));
    }
}
