use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shopfront_products::{NewProduct, Product, ProductId};

use super::{ProductStore, StoreError};

/// In-memory product store for tests/dev.
///
/// Ids are handed out from a counter starting at 1 and are never reused, even
/// after a delete.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<State>,
}

#[derive(Debug)]
struct State {
    next_id: i64,
    last_created_at: Option<DateTime<Utc>>,
    rows: BTreeMap<ProductId, Product>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State {
                next_id: 1,
                last_created_at: None,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, input: NewProduct) -> Result<Product, StoreError> {
        let fields = input.validate()?;

        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = ProductId::try_from(state.next_id)?;

        // Creation timestamps never go backwards, even if the wall clock does.
        let now = Utc::now();
        let created_at = match state.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };

        let product = Product::from_parts(id, fields, created_at);
        state.rows.insert(id, product.clone());
        state.next_id += 1;
        state.last_created_at = Some(created_at);

        tracing::debug!(product_id = %id, "product stored in memory");
        Ok(product)
    }

    async fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state.rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.rows.values().cloned().collect())
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        state.rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}
