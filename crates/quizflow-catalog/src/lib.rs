//! quizflow-catalog — Quiz catalog sources.
//!
//! Implements the `QuizResolver` trait over in-memory, file-backed, and
//! network-backed catalogs, so the exam session never depends on where quiz
//! content comes from.

pub mod config;
pub mod file;
pub mod http;
pub mod mock;
pub mod static_catalog;

pub use config::{create_resolver, load_config, load_config_from, CatalogSource, QuizflowConfig};
pub use file::FileCatalog;
pub use http::HttpCatalog;
pub use mock::MockResolver;
pub use static_catalog::StaticCatalog;
