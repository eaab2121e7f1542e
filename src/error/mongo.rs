use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::kinds::AuthorizationError;
use crate::error::ExportError;

/// Structured error information extracted from MongoDB errors.
///
/// This is intended to be serialized to JSON and consumed by other
/// components (e.g. logging, operator-facing output).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub(crate) error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
}

impl ErrorInfo {
    /// Convert error info to pretty-printed JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert error info to compact JSON string (single line).
    pub fn to_json_compact(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Format MongoDB error messages as pretty JSON wrapped in an `error` field.
///
/// Intended to be used by the parent module's `Display` implementation for
/// `ExportError::MongoDb`.
pub fn format_mongodb_error(
    f: &mut fmt::Formatter<'_>,
    error: &mongodb::error::Error,
) -> fmt::Result {
    let info = extract_error_info(error);

    let wrapper = serde_json::json!({ "error": info });

    let json_output = serde_json::to_string_pretty(&wrapper).map_err(|_| fmt::Error)?;
    write!(f, "\n{json_output}")
}

/// Extract structured information from a MongoDB error using the driver API.
///
/// This avoids string parsing where possible by using the driver's typed error
/// structures directly.
pub fn extract_error_info(error: &mongodb::error::Error) -> ErrorInfo {
    use mongodb::error::ErrorKind;

    let mut info = ErrorInfo::default();

    match error.kind.as_ref() {
        ErrorKind::Command(command_error) => {
            info.error_type = Some("mongo.command_error".to_string());
            info.code = Some(command_error.code);
            info.message = Some(command_error.message.clone());
            info.name = if command_error.code_name.is_empty() {
                get_error_name(command_error.code)
            } else {
                Some(command_error.code_name.clone())
            };
        }
        ErrorKind::Authentication { message, .. } => {
            info.error_type = Some("mongo.authentication_error".to_string());
            info.message = Some(message.clone());
            info.name = Some("AuthenticationFailed".to_string());
        }
        ErrorKind::ServerSelection { message, .. } => {
            info.error_type = Some("mongo.server_selection_error".to_string());
            info.message = Some(message.clone());
        }
        ErrorKind::Io(io_error) => {
            info.error_type = Some("mongo.io_error".to_string());
            info.message = Some(io_error.to_string());
        }
        other => {
            info.error_type = Some("mongo.driver_error".to_string());
            info.message = Some(format!("{other:?}"));
        }
    }

    info
}

/// Classify a driver error as an authorization failure where possible.
///
/// The driver reports credential rejection as an `Authentication` error kind
/// and insufficient read permission as a command error with code 13
/// (`Unauthorized`). Anything else is not an authorization failure and must
/// pass through unmodified.
pub fn classify_authorization(error: &mongodb::error::Error) -> Option<AuthorizationError> {
    use mongodb::error::ErrorKind;

    match error.kind.as_ref() {
        ErrorKind::Authentication { message, .. } => {
            Some(AuthorizationError::AuthenticationFailed(message.clone()))
        }
        ErrorKind::Command(command_error) => match command_error.code {
            13 => Some(AuthorizationError::PermissionDenied(
                command_error.message.clone(),
            )),
            18 => Some(AuthorizationError::AuthenticationFailed(
                command_error.message.clone(),
            )),
            _ => None,
        },
        _ => None,
    }
}

/// Convert a driver error into the crate error type, promoting recognized
/// authorization failures and passing everything else through unmodified.
pub fn into_export_error(error: mongodb::error::Error) -> ExportError {
    match classify_authorization(&error) {
        Some(auth) => auth.into(),
        None => error.into(),
    }
}

/// Map well-known MongoDB error codes to their symbolic names.
fn get_error_name(code: i32) -> Option<String> {
    let name = match code {
        13 => "Unauthorized",
        18 => "AuthenticationFailed",
        26 => "NamespaceNotFound",
        50 => "MaxTimeMSExpired",
        59 => "CommandNotFound",
        _ => return None,
    };
    Some(name.to_string())
}
