// handlers/mod.rs - one module per resource
//
// root      → GET /, GET /health
// productos → /productos/* (collection, record and search endpoints)

pub mod productos;
pub mod root;
