use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{Product, ProductDocument, ProductUpdate};
use crate::database::store::{ProductStore, StoreError};
use crate::filter::Filter;

/// In-process product store. Records are kept in insertion order.
#[derive(Clone, Default)]
pub struct MemoryProductStore {
    records: Arc<RwLock<Vec<Product>>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_many(&self, filter: &Filter) -> Result<Vec<Product>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn find_by_key(&self, key: Uuid) -> Result<Option<Product>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|p| p.key == key).cloned())
    }

    async fn insert(&self, document: ProductDocument) -> Result<Product, StoreError> {
        let product = document.into_product(Uuid::new_v4());
        self.records.write().await.push(product.clone());
        Ok(product)
    }

    async fn update_by_key(&self, key: Uuid, update: ProductUpdate) -> Result<Option<Product>, StoreError> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|p| p.key == key).map(|product| {
            product.apply(update);
            product.clone()
        }))
    }

    async fn delete_by_key(&self, key: Uuid) -> Result<Option<Product>, StoreError> {
        let mut records = self.records.write().await;
        Ok(records
            .iter()
            .position(|p| p.key == key)
            .map(|index| records.remove(index)))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
