pub mod product;

pub use product::{Product, ProductDocument, ProductPatch, ProductUpdate};
