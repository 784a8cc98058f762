//! Error types for automaplib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while mapping a project
#[derive(Error, Debug)]
pub enum AutomapError {
    /// Root path does not exist or could not be resolved
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    /// Failed to list a directory
    #[error("failed to read directory '{path}': {source}")]
    DirRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to stat a file or directory
    #[error("failed to stat '{path}': {source}")]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the manifest
    #[error("failed to write manifest '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No output path was given and no root directory to derive one from
    #[error("no output path given and no root directory to derive one from")]
    DestinationRequired,

    /// File-list mapping was invoked without a project root
    #[error("mapping an explicit file list requires a project root directory")]
    RootDirRequired,

    /// A pool worker died without reporting a result
    #[error("worker thread panicked during traversal")]
    WorkerPanicked,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
