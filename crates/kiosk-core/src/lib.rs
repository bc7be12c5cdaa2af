pub mod catalog;
mod catalog_data;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::{Bundle, Catalog, Category, Product};
pub use config::KioskConfig;
pub use error::{KioskError, Result};
pub use types::*;
