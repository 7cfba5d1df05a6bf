//! Credential guard for imports
//!
//! Imports write to the target database, so the production service account
//! key (conventionally named `prod.json`) is refused outright.

use std::path::Path;

use tracing::info;

use crate::error::{ConfigError, Result, SafetyError};

/// File name of the production service account key.
pub const PRODUCTION_CREDENTIALS_FILE: &str = "prod.json";

/// Refuse production credentials and credential paths that do not exist.
///
/// The name check runs first and needs no I/O.
pub fn validate_credentials(path: &Path) -> Result<()> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if name.to_lowercase() == PRODUCTION_CREDENTIALS_FILE {
        return Err(SafetyError::ProductionCredentials(name).into());
    }

    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()).into());
    }

    info!("Service account validated: {}", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SamplerError;

    #[test]
    fn test_rejects_prod_json_in_any_case_and_directory() {
        for path in ["prod.json", "/secrets/PROD.json", "keys/Prod.JSON"] {
            let err = validate_credentials(Path::new(path)).unwrap_err();
            assert!(matches!(err, SamplerError::Safety(_)), "{path} not rejected");
        }
    }

    #[test]
    fn test_rejects_prod_json_even_when_it_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prod.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(
            validate_credentials(&path),
            Err(SamplerError::Safety(_))
        ));
    }

    #[test]
    fn test_rejects_missing_file() {
        let err = validate_credentials(Path::new("/nonexistent/staging.json")).unwrap_err();
        assert!(matches!(err, SamplerError::Config(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_accepts_other_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["staging.json", "prod.json.bak", "preprod.json"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "{}").unwrap();
            assert!(validate_credentials(&path).is_ok(), "{name} rejected");
        }
    }
}
