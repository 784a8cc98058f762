//! # automaplib
//!
//! Discovers the JavaScript files of a project, assigns each one a short
//! logical name, and writes the `use.json` manifest that maps names to
//! relative paths. A module-resolution layer can then let code reference
//! modules by name instead of by relative path.
//!
//! ## Overview
//!
//! A mapping operation runs in four stages:
//!
//! - **Walk**: enumerate eligible `.js` files under a root (the vendor
//!   directory is excluded by default), either blocking or on a bounded
//!   worker pool
//! - **Scan**: optionally read each file for a `/* use-automapper: ... */`
//!   override annotation
//! - **Resolve**: derive each file's logical name (caller overrides win
//!   over annotations, annotations over bare filenames), fold in the
//!   file's location per the configured [`NamingStrategy`], and settle
//!   collisions with deterministic integer suffixes
//! - **Write**: persist the finished mapping as pretty JSON
//!
//! Results are OS-independent: manifest paths always use forward slashes,
//! begin with `./`, and carry no `.js` suffix.
//!
//! ## Example
//!
//! ```rust
//! use automaplib::{map_path, manifest, MapOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // Set up a small project
//! let dir = tempdir().unwrap();
//! fs::create_dir(dir.path().join("lib")).unwrap();
//! fs::write(dir.path().join("lib/widget.js"), "module.exports = {};").unwrap();
//!
//! // Map it and read the manifest back
//! let manifest_path = map_path(dir.path(), &MapOptions::new()).unwrap();
//! let mapping = manifest::read(&manifest_path).unwrap();
//! assert_eq!(mapping.get("widget"), Some("./lib/widget"));
//! ```

pub mod annotation;
pub mod error;
pub mod manifest;
pub mod mapper;
pub mod mapping;
pub mod naming;
pub mod options;
pub mod path;
pub mod progress;
pub mod walk;

pub use annotation::extract_override_name;
pub use error::AutomapError;
pub use mapper::{map_files, map_path};
pub use mapping::UseMapping;
pub use naming::{resolve_mapping, NameOverrideTable};
pub use options::{ExecutionMode, MapOptions, NamingStrategy, DEFAULT_POOL_SIZE};
pub use progress::{ProgressEvent, ProgressSink};
pub use walk::{walk, WalkResult};

/// Result type for automaplib operations
pub type Result<T> = std::result::Result<T, AutomapError>;
