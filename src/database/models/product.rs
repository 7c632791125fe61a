use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored product. `key` is assigned by the store and never changes; the
/// caller-supplied `identifier` is plain data and carries no uniqueness guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    #[serde(rename = "_id")]
    #[sqlx(rename = "id")]
    pub key: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Full product body, as sent to POST and PUT. Absent fields stay `None`:
/// POST rejects them, PUT stores them cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(default)]
    pub identifier: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Partial update for PATCH. Only the fields present are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub identifier: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductUpdate {
    /// Merge the present fields into the stored record.
    Merge(ProductPatch),
    /// Overwrite the whole body, keeping the key.
    Replace(ProductDocument),
}

impl ProductDocument {
    pub const REQUIRED_FIELDS: [&'static str; 4] = ["identifier", "name", "amount", "category"];

    /// Names of required fields that are absent, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.identifier.is_some(),
            self.name.is_some(),
            self.amount.is_some(),
            self.category.is_some(),
        ];
        Self::REQUIRED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(field, _)| *field)
            .collect()
    }

    pub fn into_product(self, key: Uuid) -> Product {
        Product {
            key,
            identifier: self.identifier,
            name: self.name,
            amount: self.amount,
            category: self.category,
        }
    }
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.identifier.is_none() && self.name.is_none() && self.amount.is_none() && self.category.is_none()
    }
}

impl Product {
    pub fn apply(&mut self, update: ProductUpdate) {
        match update {
            ProductUpdate::Merge(patch) => {
                if let Some(identifier) = patch.identifier {
                    self.identifier = Some(identifier);
                }
                if let Some(name) = patch.name {
                    self.name = Some(name);
                }
                if let Some(amount) = patch.amount {
                    self.amount = Some(amount);
                }
                if let Some(category) = patch.category {
                    self.category = Some(category);
                }
            }
            ProductUpdate::Replace(document) => {
                *self = document.into_product(self.key);
            }
        }
    }
}
