//! mongosnap - point-in-time JSON snapshot of a MongoDB collection
//!
//! Authenticates with a service-account key file, fetches every document of
//! one named collection, and writes an id-to-document JSON mapping to a
//! local file, overwriting any previous export.
//!
//! # Usage
//!
//! ```bash
//! # Export with defaults (./serviceAccountKey.json, app.quizResults)
//! mongosnap
//!
//! # Export another collection to a chosen path
//! mongosnap --collection examResults -o ./exams.json
//! ```

use mongosnap::cli::CliInterface;
use mongosnap::error::Result;
use mongosnap::exporter;

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// Orchestrates the run:
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Run the export pipeline (key load, client, fetch, write)
/// 4. Print the completion line
///
/// # Returns
/// * `Result<()>` - Success or the first error hit
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    let report = exporter::run_with_config(cli.config().clone()).await?;

    if !cli.args().quiet {
        let export = &cli.config().export;
        println!(
            "{}",
            report.completion_message(&export.collection, &export.output_path)
        );
    }

    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// # Arguments
/// * `cli` - CLI interface with verbosity settings
fn initialize_logging(cli: &CliInterface) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
