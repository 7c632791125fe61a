use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Product, ProductDocument, ProductUpdate};
use crate::filter::{Filter, FilterError};

/// Errors from a product store. All of them surface as 500 at the HTTP layer;
/// absence is reported through `Option`, not through this type.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Invalid database name: {0}")]
    InvalidDatabaseName(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Data access for the product collection. Every operation is a single store
/// call; there is no transaction spanning several of them (last writer wins).
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All records matching `filter`, in insertion order. An empty filter returns
    /// the whole collection.
    async fn find_many(&self, filter: &Filter) -> Result<Vec<Product>, StoreError>;

    async fn find_by_key(&self, key: Uuid) -> Result<Option<Product>, StoreError>;

    /// Persists a new record under a freshly generated key.
    async fn insert(&self, document: ProductDocument) -> Result<Product, StoreError>;

    /// Returns the record as it is after the update, or `None` if the key is unknown.
    async fn update_by_key(&self, key: Uuid, update: ProductUpdate) -> Result<Option<Product>, StoreError>;

    /// Returns the removed record, or `None` if the key is unknown.
    async fn delete_by_key(&self, key: Uuid) -> Result<Option<Product>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
