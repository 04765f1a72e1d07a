//! Product catalog domain module.
//!
//! This crate contains the catalog entity and its wire representation,
//! implemented as deterministic domain logic (no IO, no HTTP, no storage).
//! Storage and asset hosting are reached through the [`AssetResolver`]
//! capability and the infrastructure crate.

pub mod asset;
pub mod price;
pub mod product;
pub mod representation;

pub use asset::{AssetError, AssetRef, AssetResolver};
pub use price::{format_rwf, Price, RWF_PREFIX};
pub use product::{require, NewProduct, Product, ProductId, ValidatedProduct, TITLE_MAX_CHARS};
pub use representation::{to_representation, ProductRepresentation};
