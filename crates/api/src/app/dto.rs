use rust_decimal::Decimal;
use serde::Deserialize;

use shopfront_core::DomainResult;
use shopfront_products::{require, NewProduct};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /products`. Every field is optional here so that a missing
/// field is reported as a validation error naming it.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> DomainResult<NewProduct> {
        Ok(NewProduct {
            title: require("title", self.title)?,
            description: require("description", self.description)?,
            price: require("price", self.price)?,
            image: self.image,
        })
    }
}
