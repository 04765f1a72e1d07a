//! Product persistence boundary.
//!
//! The storage collaborator owns identity assignment, creation timestamps and
//! field validation at write time. Everything above it only ever sees
//! well-formed [`Product`] values.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use shopfront_core::DomainError;
use shopfront_products::{NewProduct, Product, ProductId};

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Input violated a field constraint (length, precision, required field).
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("product not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence operations for catalog products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Validate and persist a new product, assigning its id and `created_at`.
    async fn create(&self, input: NewProduct) -> Result<Product, StoreError>;

    async fn get(&self, id: ProductId) -> Result<Product, StoreError>;

    /// All products, ordered by ascending id.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn create(&self, input: NewProduct) -> Result<Product, StoreError> {
        (**self).create(input).await
    }

    async fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        (**self).get(id).await
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list().await
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}
