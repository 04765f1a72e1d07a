//! External (wire) representation of a catalog product.

use serde::Serialize;

use crate::asset::AssetResolver;
use crate::price::Price;
use crate::product::{Product, ProductId};

/// Read-only payload sent to clients. Recomputed on every request.
///
/// Field order matches the JSON key order: `id`, `title`, `description`,
/// `image`, `price`, `price_rwf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRepresentation {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub price: Price,
    pub price_rwf: String,
}

/// Map a stored product to its wire representation.
///
/// An image that cannot be resolved is reported as absent; mapping itself
/// never fails.
pub fn to_representation(product: &Product, assets: &dyn AssetResolver) -> ProductRepresentation {
    let image = product.image().and_then(|asset| match assets.resolve(asset) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(product_id = %product.id_typed(), error = %e, "image resolution failed; omitting image");
            None
        }
    });

    ProductRepresentation {
        id: product.id_typed(),
        title: product.title().to_string(),
        description: product.description().to_string(),
        image,
        price: product.price(),
        price_rwf: product.price().to_rwf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{AssetError, AssetRef};
    use crate::product::NewProduct;
    use chrono::Utc;
    use core::str::FromStr;
    use rust_decimal::Decimal;

    struct PrefixResolver;

    impl AssetResolver for PrefixResolver {
        fn resolve(&self, asset: &AssetRef) -> Result<String, AssetError> {
            Ok(format!("https://cdn.test/{asset}"))
        }
    }

    struct BrokenResolver;

    impl AssetResolver for BrokenResolver {
        fn resolve(&self, asset: &AssetRef) -> Result<String, AssetError> {
            Err(AssetError::unresolvable(asset, "backend offline"))
        }
    }

    fn product(price: &str, image: Option<&str>) -> Product {
        let fields = NewProduct {
            title: "Imigongo print".to_string(),
            description: "Geometric cow-dung art".to_string(),
            price: Decimal::from_str(price).unwrap(),
            image: image.map(str::to_string),
        }
        .validate()
        .unwrap();
        Product::from_parts(ProductId::try_from(3).unwrap(), fields, Utc::now())
    }

    #[test]
    fn copies_fields_and_derives_price_rwf() {
        let rep = to_representation(&product("12345.67", Some("art/imigongo.png")), &PrefixResolver);

        assert_eq!(rep.id.get(), 3);
        assert_eq!(rep.title, "Imigongo print");
        assert_eq!(rep.description, "Geometric cow-dung art");
        assert_eq!(rep.image.as_deref(), Some("https://cdn.test/art/imigongo.png"));
        assert_eq!(rep.price.to_string(), "12345.67");
        assert_eq!(rep.price_rwf, "RWF 12,345");
    }

    #[test]
    fn missing_image_maps_to_null() {
        let rep = to_representation(&product("999.99", None), &PrefixResolver);
        assert_eq!(rep.image, None);
        assert_eq!(rep.price_rwf, "RWF 999");
    }

    #[test]
    fn unresolvable_image_degrades_to_null() {
        let rep = to_representation(&product("0.50", Some("art/x.png")), &BrokenResolver);
        assert_eq!(rep.image, None);
        assert_eq!(rep.price_rwf, "RWF 0");
    }

    #[test]
    fn mapping_is_idempotent() {
        let p = product("1000000.00", Some("a.png"));
        assert_eq!(to_representation(&p, &PrefixResolver), to_representation(&p, &PrefixResolver));
    }

    #[test]
    fn wire_format_has_expected_keys_and_types() {
        let rep = to_representation(&product("1000000", None), &PrefixResolver);
        let json = serde_json::to_value(&rep).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "title": "Imigongo print",
                "description": "Geometric cow-dung art",
                "image": null,
                "price": "1000000.00",
                "price_rwf": "RWF 1,000,000",
            })
        );
    }
}
