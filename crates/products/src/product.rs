use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopfront_core::{DomainError, DomainResult, Entity, RecordId};

use crate::asset::AssetRef;
use crate::price::Price;

/// Maximum length of a product title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Product identifier (assigned by the storage layer on create).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub RecordId);

impl ProductId {
    pub fn get(&self) -> i64 {
        self.0.get()
    }
}

impl TryFrom<i64> for ProductId {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        RecordId::new(value).map(Self)
    }
}

impl core::str::FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<RecordId>().map(Self)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Unwrap a required input field, reporting it by name when absent.
pub fn require<T>(field: &str, value: Option<T>) -> DomainResult<T> {
    value.ok_or_else(|| DomainError::field(field, "this field is required"))
}

/// Create input for a product, as received from a client or admin tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub image: Option<String>,
}

impl NewProduct {
    /// Check field constraints and normalize the input.
    ///
    /// Surrounding whitespace is stripped from text fields before any check.
    /// Fails with the first violated constraint, in field order.
    pub fn validate(self) -> DomainResult<ValidatedProduct> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::field("title", "may not be blank"));
        }

        let title_len = title.chars().count();
        if title_len > TITLE_MAX_CHARS {
            return Err(DomainError::field(
                "title",
                format!("ensure this field has no more than {TITLE_MAX_CHARS} characters (it has {title_len})"),
            ));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(DomainError::field("description", "may not be blank"));
        }

        let price = Price::new(self.price).map_err(|e| match e {
            DomainError::Validation(msg) => DomainError::field("price", msg),
            other => other,
        })?;

        Ok(ValidatedProduct {
            title: title.to_string(),
            description: description.to_string(),
            image: self.image.and_then(AssetRef::parse),
            price,
        })
    }
}

/// Product fields that passed validation and are ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProduct {
    title: String,
    description: String,
    image: Option<AssetRef>,
    price: Price,
}

impl ValidatedProduct {
    /// Fields read back from storage.
    ///
    /// Text is taken as stored, without the write-time checks.
    pub fn from_stored(title: String, description: String, price: Price, image: Option<String>) -> Self {
        Self {
            title,
            description,
            image: image.and_then(AssetRef::parse),
            price,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> Option<&AssetRef> {
        self.image.as_ref()
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

/// Catalog entity: one sellable product.
///
/// Instances only come out of the storage layer, so `id` and `created_at` are
/// always the values assigned at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    title: String,
    description: String,
    image: Option<AssetRef>,
    price: Price,
    created_at: DateTime<Utc>,
}

impl Product {
    pub fn from_parts(id: ProductId, fields: ValidatedProduct, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            image: fields.image,
            price: fields.price,
            created_at,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> Option<&AssetRef> {
        self.image.as_ref()
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    fn new_product(title: &str, price: &str) -> NewProduct {
        NewProduct {
            title: title.to_string(),
            description: "Hand-woven basket".to_string(),
            price: Decimal::from_str(price).unwrap(),
            image: None,
        }
    }

    fn expect_validation(result: DomainResult<ValidatedProduct>, field: &str) {
        match result {
            Err(DomainError::Validation(msg)) => {
                assert!(msg.starts_with(field), "expected {field} error, got {msg}")
            }
            other => panic!("expected Validation error for {field}, got {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_a_well_formed_product() {
        let valid = new_product("Agaseke basket", "12345.67").validate().unwrap();
        assert_eq!(valid.title(), "Agaseke basket");
        assert_eq!(valid.price().to_string(), "12345.67");
        assert_eq!(valid.image(), None);
    }

    #[test]
    fn validate_rejects_blank_title() {
        expect_validation(new_product("  ", "1.00").validate(), "title");
    }

    #[test]
    fn validate_trims_text_fields_before_checking_and_storing() {
        let mut input = new_product("  Mug  ", "1.00");
        input.description = "\tClay mug\n".to_string();
        let valid = input.validate().unwrap();
        assert_eq!(valid.title(), "Mug");
        assert_eq!(valid.description(), "Clay mug");

        let padded = format!("{}   ", "x".repeat(TITLE_MAX_CHARS));
        assert_eq!(new_product(&padded, "1.00").validate().unwrap().title().chars().count(), TITLE_MAX_CHARS);
    }

    #[test]
    fn stored_fields_are_taken_as_is() {
        let price = Price::new(Decimal::from_str("1.5").unwrap()).unwrap();
        let stored = ValidatedProduct::from_stored(" ".to_string(), String::new(), price, Some("mug.jpg".to_string()));
        assert_eq!(stored.title(), " ");
        assert_eq!(stored.description(), "");
        assert_eq!(stored.image().unwrap().as_str(), "mug.jpg");
    }

    #[test]
    fn validate_rejects_blank_description() {
        let mut input = new_product("Mug", "1.00");
        input.description = String::new();
        expect_validation(input.validate(), "description");
    }

    #[test]
    fn title_bound_counts_characters_not_bytes() {
        let at_limit = "é".repeat(TITLE_MAX_CHARS);
        assert!(new_product(&at_limit, "1.00").validate().is_ok());

        let over = "a".repeat(TITLE_MAX_CHARS + 1);
        expect_validation(new_product(&over, "1.00").validate(), "title");
    }

    #[test]
    fn validate_reports_price_precision_errors_against_price() {
        expect_validation(new_product("Mug", "1.005").validate(), "price");
        expect_validation(new_product("Mug", "1000000000").validate(), "price");
    }

    #[test]
    fn blank_image_reference_is_dropped() {
        let mut input = new_product("Mug", "1.00");
        input.image = Some(" ".to_string());
        assert_eq!(input.validate().unwrap().image(), None);

        let mut input = new_product("Mug", "1.00");
        input.image = Some("products/mug.jpg".to_string());
        assert_eq!(input.validate().unwrap().image().unwrap().as_str(), "products/mug.jpg");
    }

    #[test]
    fn require_names_the_missing_field() {
        assert_eq!(require("title", Some(3)).unwrap(), 3);
        assert_eq!(
            require::<String>("price", None).unwrap_err(),
            DomainError::Validation("price: this field is required".to_string())
        );
    }

    #[test]
    fn product_displays_as_its_title() {
        let fields = new_product("Coffee beans", "8500").validate().unwrap();
        let product = Product::from_parts(ProductId::try_from(1).unwrap(), fields, Utc::now());
        assert_eq!(product.to_string(), "Coffee beans");
        assert_eq!(product.id().get(), 1);

        let renamed = Product::from_parts(
            product.id(),
            new_product("Green coffee", "9000").validate().unwrap(),
            Utc::now(),
        );
        assert!(product.same_record(&renamed));
    }

    #[test]
    fn product_id_parses_from_path_segments() {
        let id: ProductId = "15".parse().unwrap();
        assert_eq!(id.get(), 15);
        assert!(matches!("x".parse::<ProductId>(), Err(DomainError::InvalidId(_))));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: titles over the bound after trimming never validate.
            #[test]
            fn overlong_titles_are_rejected(title in "[A-Za-z0-9 ]{201,300}") {
                prop_assume!(title.trim().chars().count() > TITLE_MAX_CHARS);
                let result = new_product(&title, "10.00").validate();
                prop_assert!(matches!(result, Err(DomainError::Validation(_))));
            }

            /// Property: titles within the bound validate and are kept, minus
            /// surrounding whitespace.
            #[test]
            fn bounded_titles_are_kept(title in "[A-Za-z][A-Za-z0-9 ]{0,199}") {
                let valid = new_product(&title, "10.00").validate().unwrap();
                prop_assert_eq!(valid.title(), title.trim());
            }
        }
    }
}
