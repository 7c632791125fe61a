use uuid::Uuid;

use crate::database::models::Product;
use crate::error::ApiError;

/// Parses a record key from the path. Keys are UUIDs; anything else is a 400.
pub fn parse_key(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::bad_request(format!("ID de producto inválido: {}", raw)))
}

/// Parses a decimal path parameter. A comma is accepted as decimal separator
/// ("2,5" == 2.5); non-finite values are rejected.
pub fn parse_decimal(raw: &str) -> Result<f64, ApiError> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ApiError::bad_request(format!("Importe inválido: {}", raw)))
}

/// An empty result list is reported as 404 with `message`.
pub fn non_empty(products: Vec<Product>, message: &str) -> Result<Vec<Product>, ApiError> {
    if products.is_empty() {
        Err(ApiError::not_found(message))
    } else {
        Ok(products)
    }
}
