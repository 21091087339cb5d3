//! cli::config
//!
//! Loading of the per-directory config file.
//!
//! The file is a TOML document with one table per command; keys inside a
//! table are long flag names without the leading dashes:
//!
//! ```toml
//! [build]
//! image-name = "rust:alpine"
//! build-configuration = "release"
//!
//! [create-archive]
//! flat-list = true
//! ```
//!
//! A missing file is not an error; resolution simply skips the file source.
//! A file that exists but cannot be read or parsed is reported, since
//! silently ignoring it would make the invocation behave differently than
//! the user intended.

use std::fs;
use std::path::Path;

use toml::Table;

use crate::cli::error::CliError;

/// Load the config document at `path`, if present.
pub fn load_document(path: &Path) -> Result<Option<Table>, CliError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let table = content.parse::<Table>().map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(table))
}
