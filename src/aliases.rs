//! Loading language aliases from a JSON file
//!
//! The alias file maps a canonical language name to the alternative spellings
//! users may type:
//!
//! ```json
//! {
//!     "@metadata": { "note": "ignored" },
//!     "spanish": ["español", "castellano", "castilian"],
//!     "mandarin": ["chinese", "中文"]
//! }
//! ```

use crate::resolver::{AliasMap, AliasTable};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum AliasError {
    #[error("failed to read alias file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse JSON from '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid alias file '{}': root must be an object", .path.display())]
    NotAnObject { path: PathBuf },
}

/// Load an alias map from a JSON file
///
/// Keys starting with `@` are metadata and skipped. Entries whose value is not
/// an array are skipped with a warning, as are non-string array items.
///
/// # Errors
/// - File not found or unreadable
/// - Invalid JSON
/// - Root value is not an object
pub fn load_aliases_from_file(path: &Path) -> Result<AliasMap, AliasError> {
    let content = fs::read_to_string(path).map_err(|source| AliasError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let json: Value = serde_json::from_str(&content).map_err(|source| AliasError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let obj = json.as_object().ok_or_else(|| AliasError::NotAnObject {
        path: path.to_path_buf(),
    })?;

    let mut aliases = AliasMap::new();
    for (canonical, value) in obj {
        if canonical.starts_with('@') {
            continue;
        }

        let Some(list) = value.as_array() else {
            warn!("Alias entry '{}' is not an array, skipping", canonical);
            continue;
        };

        let names = list
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect();
        aliases.insert(canonical.clone(), names);
    }

    Ok(aliases)
}

/// Build the alias table, degrading to the built-in names when the file is
/// missing or broken
pub fn load_alias_table(path: &Path) -> AliasTable {
    match load_aliases_from_file(path) {
        Ok(map) => {
            let table = AliasTable::with_aliases(&map);
            info!(
                "Loaded {} language aliases from {}",
                table.len(),
                path.display()
            );
            table
        }
        Err(AliasError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            info!(
                "No alias file at {}, using built-in language names",
                path.display()
            );
            AliasTable::builtin()
        }
        Err(e) => {
            warn!("{}; using built-in language names", e);
            AliasTable::builtin()
        }
    }
}
