//! Error handling module for export operations.
//!
//! This module provides error handling for the exporter with:
//! - A single crate-wide error type covering the full failure taxonomy
//!   (credential, configuration, authorization, local I/O, driver)
//! - Structured error information extraction from MongoDB driver errors
//! - Consistent JSON error formatting for operator-facing output
//!
//! Propagation policy: no error is caught or recovered locally. Any failure
//! at any step aborts the run and surfaces the underlying error to the
//! operator unmodified.

pub mod kinds;
pub mod mongo;

// Re-export commonly used types
pub use kinds::{AuthorizationError, ConfigError, CredentialError, ExportError, Result};
pub use mongo::{ErrorInfo, classify_authorization, into_export_error};
