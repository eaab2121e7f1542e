//! mongosnap library
//!
//! Core functionality for mongosnap, a point-in-time JSON snapshot exporter
//! for a single MongoDB collection. Authenticate with a service-account key
//! file, fetch every document of one named collection, and write an
//! id-to-document JSON mapping to a local file.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `connection`: Client construction and eager authentication
//! - `credential`: Service-account key loading
//! - `error`: Error types and handling
//! - `exporter`: Snapshot fetch, export-map construction, file writing
//! - `formatter`: BSON to plain-JSON simplification
//!
//! # Example
//!
//! ```no_run
//! use mongosnap::config::Config;
//! use mongosnap::credential::ServiceAccountKey;
//! use mongosnap::exporter::Exporter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let key = ServiceAccountKey::from_file(&config.export.credential_path)?;
//!     let client = mongosnap::connection::establish(&key, &config.connection).await?;
//!
//!     let report = Exporter::new(client, config).run().await?;
//!     println!("{} documents exported", report.documents_exported);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod credential;
pub mod error;
pub mod exporter;
pub mod formatter;

// Re-export commonly used types
pub use config::Config;
pub use credential::ServiceAccountKey;
pub use error::{ExportError, Result};
pub use exporter::{ExportMap, ExportReport, Exporter};

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
