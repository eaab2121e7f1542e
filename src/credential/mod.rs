//! Service-account key loading.
//!
//! The exporter authenticates with a JSON key file rather than an
//! interactively supplied URI. The key carries the connection URI and,
//! optionally, a username/password pair with its authentication database.
//!
//! Loading the key performs no network activity; a missing or malformed
//! file fails the run before any connection is attempted.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CredentialError, Result};

/// A service-account key granting programmatic access to the database.
///
/// Deserialized from a JSON key file of the form:
///
/// ```json
/// {
///     "uri": "mongodb+srv://cluster0.example.mongodb.net",
///     "username": "svc-export",
///     "password": "...",
///     "auth_database": "admin"
/// }
/// ```
///
/// `username`/`password` are optional; credentials embedded in the URI
/// itself are equally valid.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Connection URI (`mongodb://` or `mongodb+srv://`).
    pub uri: String,

    /// Username for authentication, if not embedded in the URI.
    #[serde(default)]
    pub username: Option<String>,

    /// Password for authentication, if not embedded in the URI.
    #[serde(default)]
    pub password: Option<String>,

    /// Database to authenticate against.
    #[serde(default = "default_auth_database")]
    pub auth_database: String,
}

fn default_auth_database() -> String {
    "admin".to_string()
}

impl ServiceAccountKey {
    /// Load and validate a key from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the key file
    ///
    /// # Returns
    /// * `Result<Self>` - Parsed key or a `CredentialError`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CredentialError::FileNotFound(path.display().to_string()),
            _ => CredentialError::Unreadable(format!("{}: {e}", path.display())),
        })?;

        let key: ServiceAccountKey = serde_json::from_str(&contents)
            .map_err(|e| CredentialError::InvalidFormat(e.to_string()))?;

        key.validate()?;
        Ok(key)
    }

    /// Validate the key contents.
    ///
    /// # Returns
    /// * `Result<()>` - Ok if the key is usable, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.uri.is_empty() {
            return Err(CredentialError::InvalidFormat("uri must not be empty".to_string()).into());
        }

        if !self.uri.starts_with("mongodb://") && !self.uri.starts_with("mongodb+srv://") {
            return Err(CredentialError::InvalidUri(self.uri.clone()).into());
        }

        // A username without a password cannot authenticate.
        if self.username.is_some() && self.password.is_none() {
            return Err(
                CredentialError::InvalidFormat("username given without password".to_string())
                    .into(),
            );
        }

        Ok(())
    }

    /// Whether the key carries an explicit username/password pair.
    pub fn has_user_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

// Manual Debug to keep the password out of logs.
impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("auth_database", &self.auth_database)
            .finish()
    }
}
