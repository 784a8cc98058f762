//! Manifest persistence.
//!
//! The manifest is a pretty-printed JSON document mapping logical names to
//! relative paths, written with 4-space indentation and keys in mapping
//! order. Writing replaces any existing file at the destination entirely.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::AutomapError;
use crate::mapping::UseMapping;
use crate::path::normalize_slashes;
use crate::Result;

/// Default manifest filename, resolved against the project root.
pub const MANIFEST_FILE_NAME: &str = "use.json";

/// Resolve where the manifest should be written.
///
/// An explicit, non-empty output path wins (normalized); otherwise the
/// default location under the root directory is used.
pub fn resolve_destination(
    output_path: Option<&Path>,
    root_dir: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = output_path {
        let path = path.to_string_lossy();
        if !path.is_empty() {
            return Ok(PathBuf::from(normalize_slashes(&path)));
        }
    }
    match root_dir {
        Some(root) => Ok(root.join(MANIFEST_FILE_NAME)),
        None => Err(AutomapError::DestinationRequired),
    }
}

/// Serialize `mapping` and persist it, returning the final path.
///
/// Destination resolution failures surface before anything is written.
pub fn write(
    mapping: &UseMapping,
    output_path: Option<&Path>,
    root_dir: Option<&Path>,
) -> Result<PathBuf> {
    let destination = resolve_destination(output_path, root_dir)?;

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    mapping
        .serialize(&mut serializer)
        .map_err(|source| AutomapError::FileWrite {
            path: destination.clone(),
            source: source.into(),
        })?;

    fs::write(&destination, &buffer).map_err(|source| AutomapError::FileWrite {
        path: destination.clone(),
        source,
    })?;
    Ok(destination)
}

/// Read a previously written manifest back into a [`UseMapping`].
pub fn read(path: impl AsRef<Path>) -> Result<UseMapping> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| AutomapError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| AutomapError::FileRead {
        path: path.to_path_buf(),
        source: source.into(),
    })
}
