//! Firestore Sampler Library
//!
//! Samples a Firestore database into local JSON files and imports those files
//! into another database. The two command-line tools `firestore-export` and
//! `firestore-import` are thin wrappers over this library.
//!
//! # Modules
//!
//! - `cli`: Argument parsing, prompts and the top-level flows
//! - `codec`: Conversion between native field values and JSON-safe values
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `export`: Read-only sampling exporter
//! - `import`: Importer, credential guard and run reports
//! - `record`: On-disk export records
//! - `store`: Document store traits, Firestore REST client and in-memory store
//! - `ui`: Status lines and summary tables
//!
//! # Example
//!
//! ```no_run
//! use firestore_sampler::{Exporter, MemoryStore};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::new();
//!     let exporter = Exporter::new(&store, "my-project");
//!     let structure = exporter
//!         .export_database(std::path::Path::new("firestore_export"), 5)
//!         .await?;
//!     println!("Exported {} collections", structure.total_collections);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod record;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use codec::{FieldValue, Fields};
pub use config::Config;
pub use error::{Result, SamplerError};
pub use export::Exporter;
pub use import::{ImportReport, Importer};
pub use store::{DocumentReader, DocumentWriter, FirestoreStore, MemoryStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
