// Linnaea - taxonomic name indexing for Darwin Core Archives

pub mod config;
pub mod error;
pub mod system;
pub mod types;

pub use config::IndexerConfig;
pub use error::{LinnaeaError, LinnaeaResult};

/// Crate version as declared in Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
