//! Persistence layer for saving/loading document outlines.
//!
//! Supports both JSON (human-readable) and bincode (efficient binary) formats.

use crate::error::{OutlineError, Result};
use crate::tree::DocumentTree;
use std::fs;
use std::path::Path;

/// Where the CLI writes and reads an outline unless told otherwise.
pub const DEFAULT_OUTLINE_PATH: &str = "data/outline.json";

/// Save format for outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    /// JSON format (human-readable, larger).
    Json,
    /// Bincode format (binary, compact).
    Bincode,
}

impl SaveFormat {
    /// Determine format from file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bin") | Some("bincode") => SaveFormat::Bincode,
            _ => SaveFormat::Json,
        }
    }
}

/// Save a DocumentTree, picking the format from the extension.
pub fn save_tree(tree: &DocumentTree, path: &Path) -> Result<()> {
    save_tree_with_format(tree, path, SaveFormat::from_path(path))
}

/// Save a DocumentTree with specific format.
pub fn save_tree_with_format(tree: &DocumentTree, path: &Path, format: SaveFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| OutlineError::io(parent, e))?;
        }
    }

    let data = match format {
        SaveFormat::Json => tree
            .to_json()
            .map_err(|e| OutlineError::Serialization(e.to_string()))?
            .into_bytes(),
        SaveFormat::Bincode => bincode::encode_to_vec(tree, bincode::config::standard())
            .map_err(|e| OutlineError::Serialization(e.to_string()))?,
    };

    fs::write(path, &data).map_err(|e| OutlineError::io(path, e))
}

/// Load a DocumentTree from a file.
pub fn load_tree(path: &Path) -> Result<DocumentTree> {
    if !path.exists() {
        return Err(OutlineError::OutlineNotFound(path.to_path_buf()));
    }

    load_tree_with_format(path, SaveFormat::from_path(path))
}

/// Load a DocumentTree with specific format.
pub fn load_tree_with_format(path: &Path, format: SaveFormat) -> Result<DocumentTree> {
    let data = fs::read(path).map_err(|e| OutlineError::io(path, e))?;

    match format {
        SaveFormat::Json => serde_json::from_slice(&data)
            .map_err(|e| OutlineError::Serialization(e.to_string())),
        SaveFormat::Bincode => {
            let (tree, _): (DocumentTree, usize) =
                bincode::decode_from_slice(&data, bincode::config::standard())
                    .map_err(|e| OutlineError::Serialization(e.to_string()))?;
            Ok(tree)
        }
    }
}

/// Check if an outline file exists at the given path.
pub fn tree_exists(path: &Path) -> bool {
    path.is_file()
}

/// Get the size of an outline file in bytes.
pub fn tree_size(path: &Path) -> Result<u64> {
    let metadata = fs::metadata(path).map_err(|e| OutlineError::io(path, e))?;
    Ok(metadata.len())
}
