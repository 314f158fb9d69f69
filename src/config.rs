use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};

/// Settings for the interactive catalog session
///
/// Every field has a default, so a configuration file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Catalog file read at startup and written by the save action
    pub catalog_path: PathBuf,
    /// Write the catalog back when the session exits
    pub save_on_exit: bool,
    /// Filter directive handed to the log subscriber
    pub log_filter: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("library.txt"),
            save_on_exit: false,
            log_filter: "warn".to_string(),
        }
    }
}

impl LibraryConfig {
    /// Read a JSON configuration file
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if the file cannot be read or is not
    /// valid JSON for this structure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            LibraryError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    /// Parse a JSON configuration document
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if the document does not parse.
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| LibraryError::Config(format!("failed to parse JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = LibraryConfig::from_json(r#"{ "save_on_exit": true }"#);
        assert!(matches!(
            config,
            Ok(LibraryConfig { save_on_exit: true, ref log_filter, ref catalog_path })
                if log_filter == "warn" && catalog_path == Path::new("library.txt")
        ));
    }

    #[test]
    fn test_invalid_json_is_a_config_error() {
        assert!(matches!(LibraryConfig::from_json("{ nope"), Err(LibraryError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let result = LibraryConfig::load("/nonexistent/dir/library.json");
        assert!(matches!(
            result,
            Err(LibraryError::Config(ref msg)) if msg.contains("library.json")
        ));
    }
}
