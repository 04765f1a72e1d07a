use std::sync::Arc;

use anyhow::Context;

use shopfront_infra::{
    build_resolver, AppConfig, InMemoryProductStore, PostgresProductStore, ProductStore, StoreError,
};
use shopfront_products::{to_representation, AssetResolver, NewProduct, ProductId, ProductRepresentation};

/// Catalog use cases over the configured store and asset backend.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn ProductStore>,
    assets: Arc<dyn AssetResolver>,
}

impl AppServices {
    pub fn new(store: Arc<dyn ProductStore>, assets: Arc<dyn AssetResolver>) -> Self {
        Self { store, assets }
    }

    /// In-memory store (dev/test).
    pub fn in_memory(assets: Arc<dyn AssetResolver>) -> Self {
        Self::new(Arc::new(InMemoryProductStore::new()), assets)
    }

    pub async fn create_product(&self, input: NewProduct) -> Result<ProductRepresentation, StoreError> {
        let product = self.store.create(input).await?;
        tracing::info!(product_id = %product.id_typed(), title = %product, "product created");
        Ok(to_representation(&product, self.assets.as_ref()))
    }

    pub async fn get_product(&self, id: ProductId) -> Result<ProductRepresentation, StoreError> {
        let product = self.store.get(id).await?;
        Ok(to_representation(&product, self.assets.as_ref()))
    }

    pub async fn list_products(&self) -> Result<Vec<ProductRepresentation>, StoreError> {
        let products = self.store.list().await?;
        Ok(products
            .iter()
            .map(|p| to_representation(p, self.assets.as_ref()))
            .collect())
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        self.store.delete(id).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}

/// Wire store + asset backend from configuration.
///
/// `DATABASE_URL` selects Postgres; without it everything lives in memory.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let assets = build_resolver(&config.assets);

    let store: Arc<dyn ProductStore> = match &config.database_url {
        Some(url) => {
            let store = PostgresProductStore::connect(url, config.db_max_connections)
                .await
                .context("failed to connect to Postgres")?;
            store
                .ensure_schema()
                .await
                .context("failed to prepare product table")?;
            tracing::info!("using Postgres product store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; products are kept in memory");
            Arc::new(InMemoryProductStore::new())
        }
    };

    Ok(AppServices::new(store, assets))
}
