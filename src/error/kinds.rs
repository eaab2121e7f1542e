use std::{fmt, io};

use crate::error::mongo::format_mongodb_error;

/// Crate-wide `Result` type using [`ExportError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Top-level error type for mongosnap operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate. No variant is
/// caught or recovered internally; every failure aborts the run and
/// surfaces here unmodified.
#[derive(Debug)]
pub enum ExportError {
    /// Service-account key errors (missing or malformed key file).
    Credential(CredentialError),

    /// Configuration errors.
    Config(ConfigError),

    /// Authentication / permission errors reported by the server.
    Authorization(AuthorizationError),

    /// Local I/O errors (output file, key file reads).
    Io(io::Error),

    /// MongoDB driver errors (transport or service side, opaque pass-through).
    MongoDb(mongodb::error::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Service-account key errors.
#[derive(Debug)]
pub enum CredentialError {
    /// Key file does not exist.
    FileNotFound(String),

    /// Key file exists but could not be read.
    Unreadable(String),

    /// Key file is not valid JSON or is missing a required field.
    InvalidFormat(String),

    /// Connection URI in the key file has an unsupported scheme.
    InvalidUri(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Authentication and permission errors.
#[derive(Debug)]
pub enum AuthorizationError {
    /// The server rejected the credential.
    AuthenticationFailed(String),

    /// The identity authenticated but lacks read permission.
    PermissionDenied(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Credential(e) => write!(f, "Credential error: {e}"),
            ExportError::Config(e) => write!(f, "Configuration error: {e}"),
            ExportError::Authorization(e) => write!(f, "Authorization error: {e}"),
            ExportError::Io(e) => write!(f, "I/O error: {e}"),
            ExportError::MongoDb(e) => format_mongodb_error(f, e),
            ExportError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::FileNotFound(path) => {
                write!(f, "Service account key not found: {path}")
            }
            CredentialError::Unreadable(msg) => {
                write!(f, "Failed to read service account key: {msg}")
            }
            CredentialError::InvalidFormat(msg) => {
                write!(f, "Invalid service account key: {msg}")
            }
            CredentialError::InvalidUri(uri) => write!(f, "Invalid connection URI: {uri}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl fmt::Display for AuthorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorizationError::AuthenticationFailed(msg) => {
                write!(f, "Authentication failed: {msg}")
            }
            AuthorizationError::PermissionDenied(msg) => write!(f, "Permission denied: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}
impl std::error::Error for CredentialError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for AuthorizationError {}

/* ========================= Conversions to ExportError ========================= */

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        ExportError::Io(err)
    }
}

impl From<mongodb::error::Error> for ExportError {
    fn from(err: mongodb::error::Error) -> Self {
        ExportError::MongoDb(err)
    }
}

impl From<CredentialError> for ExportError {
    fn from(err: CredentialError) -> Self {
        ExportError::Credential(err)
    }
}

impl From<ConfigError> for ExportError {
    fn from(err: ConfigError) -> Self {
        ExportError::Config(err)
    }
}

impl From<AuthorizationError> for ExportError {
    fn from(err: AuthorizationError) -> Self {
        ExportError::Authorization(err)
    }
}

impl From<String> for ExportError {
    fn from(msg: String) -> Self {
        ExportError::Generic(msg)
    }
}

impl From<&str> for ExportError {
    fn from(msg: &str) -> Self {
        ExportError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_error_display() {
        let err = ExportError::from(CredentialError::FileNotFound(
            "./serviceAccountKey.json".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Credential error: Service account key not found: ./serviceAccountKey.json"
        );
    }

    #[test]
    fn test_authorization_error_display() {
        let err = AuthorizationError::PermissionDenied("not authorized on app".to_string());
        assert_eq!(err.to_string(), "Permission denied: not authorized on app");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err: ExportError = io_err.into();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn test_config_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            field: "collection".to_string(),
            value: "".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value '' for field 'collection'");
    }
}
