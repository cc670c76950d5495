pub mod aggregate;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod store;
pub mod views;

pub use error::{Error, LookupKind, NotFound, Result};
pub use store::{DataStore, ViewCache};
