//! Categories: the labels each user defines for filing transactions.

mod domain;
mod endpoints;
mod service;
mod store;

pub use domain::{Category, CategoryId, CategoryName, CategoryPayload, DeleteCategoryPayload};
pub use endpoints::{create_category_endpoint, delete_category_endpoint, get_categories_endpoint};
pub use service::{create_category, delete_category, list_categories};
pub use store::{CategoryStore, SQLiteCategoryStore};
