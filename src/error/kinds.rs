use std::{fmt, io};

use crate::error::api::ApiErrorInfo;

/// Crate-wide `Result` type using [`SamplerError`] as the error.
pub type Result<T> = std::result::Result<T, SamplerError>;

/// Top-level error type for the export and import tools.
///
/// Wraps the more specific error kinds so that every fallible operation in the
/// crate can return a single error type.
#[derive(Debug)]
pub enum SamplerError {
    /// Configuration errors (missing variables, missing files, bad values).
    Config(ConfigError),

    /// Credential safety guard tripped.
    Safety(SafetyError),

    /// Document store errors.
    Store(StoreError),

    /// Malformed export or import files.
    Format(FormatError),

    /// Authentication errors.
    Auth(AuthError),

    /// I/O errors.
    Io(io::Error),

    /// JSON (de)serialization errors.
    Json(serde_json::Error),

    /// HTTP transport errors.
    Http(reqwest::Error),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Required environment variable or flag not set.
    MissingField(String),

    /// A referenced file does not exist.
    FileNotFound(String),

    /// A referenced directory does not exist.
    DirectoryNotFound(String),

    /// Invalid config file format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Guards against writing to production.
#[derive(Debug)]
pub enum SafetyError {
    /// The credential file is the production service account.
    ProductionCredentials(String),
}

/// Document store errors.
#[derive(Debug)]
pub enum StoreError {
    /// The backend rejected the request.
    Api(ApiErrorInfo),

    /// A value could not be converted to or from the wire format.
    InvalidValue(String),

    /// Failure injected or reported by a store implementation.
    Backend(String),
}

/// Errors in the shape of export/import files.
#[derive(Debug)]
pub enum FormatError {
    /// Collection file missing from the import directory.
    CollectionNotFound(String),

    /// Collection file lacks a required key.
    MissingKey { file: String, key: String },

    /// Collection file has a key with the wrong shape.
    InvalidRecord { file: String, reason: String },
}

/// Authentication-specific errors.
#[derive(Debug)]
pub enum AuthError {
    /// The service account file could not be used.
    InvalidServiceAccount(String),

    /// Signing the token request failed.
    Signing(String),

    /// The token endpoint refused the grant.
    TokenRequestFailed(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for SamplerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplerError::Config(e) => write!(f, "Configuration error: {e}"),
            SamplerError::Safety(e) => write!(f, "{e}"),
            SamplerError::Store(e) => write!(f, "Store error: {e}"),
            SamplerError::Format(e) => write!(f, "{e}"),
            SamplerError::Auth(e) => write!(f, "Authentication error: {e}"),
            SamplerError::Io(e) => write!(f, "I/O error: {e}"),
            SamplerError::Json(e) => write!(f, "JSON error: {e}"),
            SamplerError::Http(e) => write!(f, "HTTP error: {e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingField(field) => {
                write!(f, "{field} environment variable not set")
            }
            ConfigError::FileNotFound(path) => write!(f, "File not found: {path}"),
            ConfigError::DirectoryNotFound(path) => write!(f, "Directory not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for '{field}'")
            }
        }
    }
}

impl fmt::Display for SafetyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyError::ProductionCredentials(name) => write!(
                f,
                "SAFETY CHECK FAILED: cannot use '{name}' service account for imports. \
                 Use a non-production service account file."
            ),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Api(info) => write!(f, "{info}"),
            StoreError::InvalidValue(msg) => write!(f, "Invalid value: {msg}"),
            StoreError::Backend(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::CollectionNotFound(path) => {
                write!(f, "Collection file not found: {path}")
            }
            FormatError::MissingKey { file, key } => {
                write!(f, "Invalid collection data format in {file}: missing '{key}'")
            }
            FormatError::InvalidRecord { file, reason } => {
                write!(f, "Invalid collection data format in {file}: {reason}")
            }
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidServiceAccount(msg) => {
                write!(f, "Invalid service account: {msg}")
            }
            AuthError::Signing(msg) => write!(f, "Failed to sign token request: {msg}"),
            AuthError::TokenRequestFailed(msg) => write!(f, "Token request failed: {msg}"),
        }
    }
}

impl std::error::Error for SamplerError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for SafetyError {}
impl std::error::Error for StoreError {}
impl std::error::Error for FormatError {}
impl std::error::Error for AuthError {}

/* ========================= Conversions to SamplerError ========================= */

impl From<io::Error> for SamplerError {
    fn from(err: io::Error) -> Self {
        SamplerError::Io(err)
    }
}

impl From<serde_json::Error> for SamplerError {
    fn from(err: serde_json::Error) -> Self {
        SamplerError::Json(err)
    }
}

impl From<reqwest::Error> for SamplerError {
    fn from(err: reqwest::Error) -> Self {
        SamplerError::Http(err)
    }
}

impl From<jsonwebtoken::errors::Error> for SamplerError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        SamplerError::Auth(AuthError::Signing(err.to_string()))
    }
}

impl From<ConfigError> for SamplerError {
    fn from(err: ConfigError) -> Self {
        SamplerError::Config(err)
    }
}

impl From<SafetyError> for SamplerError {
    fn from(err: SafetyError) -> Self {
        SamplerError::Safety(err)
    }
}

impl From<StoreError> for SamplerError {
    fn from(err: StoreError) -> Self {
        SamplerError::Store(err)
    }
}

impl From<FormatError> for SamplerError {
    fn from(err: FormatError) -> Self {
        SamplerError::Format(err)
    }
}

impl From<AuthError> for SamplerError {
    fn from(err: AuthError) -> Self {
        SamplerError::Auth(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_variable() {
        let err: SamplerError = ConfigError::MissingField("FIREBASE_PROJECT_ID".into()).into();
        let msg = err.to_string();
        assert!(msg.starts_with("Configuration error"));
        assert!(msg.contains("FIREBASE_PROJECT_ID"));
    }

    #[test]
    fn test_missing_key_message_names_file() {
        let err = FormatError::MissingKey {
            file: "users.json".into(),
            key: "sample_documents".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid collection data format in users.json: missing 'sample_documents'"
        );
    }

    #[test]
    fn test_safety_error_mentions_file() {
        let err = SafetyError::ProductionCredentials("PROD.json".into());
        assert!(err.to_string().contains("PROD.json"));
    }
}
