// src/extract/mod.rs
mod locate;
mod rows;
mod schema;

pub use locate::{TableHandle, locate};
pub use rows::extract;
pub use schema::{TableSchema, infer};
