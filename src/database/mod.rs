pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::DatabaseManager;
pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;
pub use store::{ProductStore, StoreError};
