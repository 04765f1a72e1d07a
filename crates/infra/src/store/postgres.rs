//! Postgres-backed product store.
//!
//! Field constraints are checked in Rust before any insert runs. The column
//! types (`VARCHAR(200)`, `NUMERIC(10,2)`) hold rows written by other tools to
//! the length and precision bounds; reads do not re-apply the write rules.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use shopfront_core::DomainError;
use shopfront_products::{NewProduct, Price, Product, ProductId, ValidatedProduct};

use super::{ProductStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS shop_product (
    id          BIGSERIAL PRIMARY KEY,
    title       VARCHAR(200) NOT NULL,
    description TEXT NOT NULL,
    image       TEXT NULL,
    price       NUMERIC(10, 2) NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    title: String,
    description: String,
    image: Option<String>,
    price: Decimal,
    created_at: DateTime<Utc>,
}

/// Rows are trusted for text fields; only the key and the price are checked.
/// A row that fails those is a decode fault, not a client error.
impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let decode = |e: DomainError| StoreError::Database(sqlx::Error::Decode(Box::new(e)));

        let id = ProductId::try_from(row.id).map_err(decode)?;
        let price = Price::new(row.price).map_err(decode)?;
        let fields = ValidatedProduct::from_stored(row.title, row.description, price, row.image);
        Ok(Product::from_parts(id, fields, row.created_at))
    }
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the product table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::info!("product table ready");
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self, input), err)]
    async fn create(&self, input: NewProduct) -> Result<Product, StoreError> {
        let fields = input.validate()?;

        let row: ProductRow = sqlx::query_as(
            r#"
            INSERT INTO shop_product (title, description, image, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, image, price, created_at
            "#,
        )
        .bind(fields.title())
        .bind(fields.description())
        .bind(fields.image().map(|a| a.as_str()))
        .bind(fields.price().amount())
        .fetch_one(&self.pool)
        .await?;

        Product::try_from(row)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, image, price, created_at
            FROM shop_product
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::NotFound).and_then(Product::try_from)
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, image, price, created_at
            FROM shop_product
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM shop_product WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
