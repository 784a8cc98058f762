//! High-level mapping entry points.
//!
//! This module wires the walker, the annotation scan, the name resolver,
//! and the manifest writer together. [`map_path`] walks a directory tree
//! and maps what it finds; [`map_files`] maps an explicit, caller-ordered
//! file list against a required project root. Both return the absolute
//! path of the written manifest.
//!
//! # Example
//!
//! ```rust,ignore
//! use automaplib::{map_path, MapOptions, NamingStrategy};
//!
//! // Map every .js file under a project, path-style names:
//! let manifest = map_path(
//!     "/home/dev/project",
//!     &MapOptions::new().strategy(NamingStrategy::PathQualified),
//! )?;
//! ```

use std::path::{Path, PathBuf};

use crate::annotation::{scan_files, scan_files_pooled};
use crate::error::AutomapError;
use crate::manifest;
use crate::naming::{resolve_mapping, NameOverrideTable};
use crate::options::{ExecutionMode, MapOptions};
use crate::progress::ProgressEvent;
use crate::walk::walk;
use crate::Result;

/// Map every eligible file under `path` and persist the manifest.
///
/// The walk root (after symlink resolution) becomes the project root;
/// `options.root_dir` is not consulted.
pub fn map_path(path: impl AsRef<Path>, options: &MapOptions) -> Result<PathBuf> {
    let path = path.as_ref();
    record(options, ProgressEvent::WalkStarted {
        root: path.to_path_buf(),
    });

    let walked = walk(path, options.include_vendor_dir, options.execution)?;
    record(options, ProgressEvent::WalkCompleted {
        file_count: walked.files.len(),
    });

    map_resolved(&walked.files, &walked.root, options)
}

/// Map an explicit, ordered file list and persist the manifest.
///
/// Requires `options.root_dir`; its absence is a configuration error,
/// raised before any traversal or parsing begins.
pub fn map_files(files: &[PathBuf], options: &MapOptions) -> Result<PathBuf> {
    let root = options
        .root_dir
        .clone()
        .ok_or(AutomapError::RootDirRequired)?;
    map_resolved(files, &root, options)
}

fn map_resolved(files: &[PathBuf], root: &Path, options: &MapOptions) -> Result<PathBuf> {
    let mut names = if options.parse_annotations {
        let table = match options.execution {
            ExecutionMode::Blocking => scan_files(files)?,
            ExecutionMode::Pooled { workers } => scan_files_pooled(files, workers)?,
        };
        record(options, ProgressEvent::AnnotationScanCompleted {
            name_count: table.len(),
        });
        table
    } else {
        NameOverrideTable::new()
    };

    // Caller-supplied names win over annotation-derived ones.
    for (file, name) in &options.additional_names {
        names.insert(file.clone(), name.clone());
    }

    let mapping = resolve_mapping(files, root, &names, options.strategy);
    record(options, ProgressEvent::MappingResolved {
        entry_count: mapping.len(),
    });

    let destination = manifest::write(&mapping, options.output_path.as_deref(), Some(root))?;
    record(options, ProgressEvent::ManifestWritten {
        path: destination.clone(),
    });
    Ok(destination)
}

fn record(options: &MapOptions, event: ProgressEvent) {
    if let Some(sink) = &options.progress {
        sink.record(event);
    }
}
