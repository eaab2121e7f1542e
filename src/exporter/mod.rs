//! Exporter: the one linear export sequence
//!
//! A run is a single synchronous pipeline with no branching states:
//!
//! 1. Fetch every document of the configured collection (one snapshot)
//! 2. Build the id → contents mapping
//! 3. Write it as pretty-printed JSON to the output path
//!
//! The client is injected by the entry point; the exporter owns no global
//! state and nothing survives the run besides the output file.

pub mod snapshot;
pub mod writer;

pub use snapshot::{ExportMap, build_export_map, fetch_all};
pub use writer::{render_export, write_export};

use std::path::Path;
use std::time::Instant;

use mongodb::Client;
use mongodb::bson::Document;
use tracing::info;

use crate::config::Config;
use crate::connection;
use crate::credential::ServiceAccountKey;
use crate::error::Result;

/// Run the full export pipeline for a configuration
///
/// Loads the service-account key, establishes a verified client, and runs
/// the export. The key is loaded first, so a missing or malformed
/// credential fails the run without touching the network or the output
/// file.
///
/// # Arguments
/// * `config` - Effective configuration
///
/// # Returns
/// * `Result<ExportReport>` - Export statistics or the first error hit
pub async fn run_with_config(config: Config) -> Result<ExportReport> {
    let key = ServiceAccountKey::from_file(&config.export.credential_path)?;
    let client = connection::establish(&key, &config.connection).await?;

    Exporter::new(client, config).run().await
}

/// Result of an export operation
#[derive(Debug)]
pub struct ExportReport {
    /// Number of documents exported
    pub documents_exported: u64,
    /// Output file size in bytes
    pub file_size_bytes: u64,
    /// Time taken for the export
    pub elapsed_ms: u64,
}

impl ExportReport {
    /// One-line success message for stdout
    pub fn completion_message(&self, collection: &str, output: &Path) -> String {
        format!(
            "Exported {} documents from '{}' to {}",
            self.documents_exported,
            collection,
            output.display()
        )
    }
}

/// Exporter for a single collection snapshot
pub struct Exporter {
    /// Connected client, constructed by the entry point
    client: Client,
    /// Effective configuration
    config: Config,
}

impl Exporter {
    /// Create a new exporter
    ///
    /// # Arguments
    /// * `client` - Connected, authenticated client
    /// * `config` - Effective configuration
    pub fn new(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    /// Execute the export
    ///
    /// # Returns
    /// * `Result<ExportReport>` - Export statistics or the first error hit
    pub async fn run(&self) -> Result<ExportReport> {
        let start_time = Instant::now();
        let export = &self.config.export;

        info!(
            "Starting export of '{}.{}'",
            export.database, export.collection
        );

        let collection = self
            .client
            .database(&export.database)
            .collection::<Document>(&export.collection);

        let docs = snapshot::fetch_all(&collection).await?;
        let map = snapshot::build_export_map(docs)?;
        let file_size_bytes = writer::write_export(&map, &export.output_path)?;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Export completed: {} documents, {} bytes, {} ms",
            map.len(),
            file_size_bytes,
            elapsed_ms
        );

        Ok(ExportReport {
            documents_exported: map.len() as u64,
            file_size_bytes,
            elapsed_ms,
        })
    }
}
