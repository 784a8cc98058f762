//! Configuration for mapping operations.
//!
//! All recognized options live on [`MapOptions`], validated once at the
//! entry points rather than checked piecemeal inside the logic. Defaults
//! match the documented behavior: annotations are parsed, the vendor
//! directory is excluded, names are bare filenames, and execution blocks
//! the caller.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::progress::ProgressSink;

/// Default ceiling on simultaneous in-flight filesystem operations in
/// pooled mode.
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Policy for folding a file's relative location into its logical name.
///
/// Exactly one strategy is active per run. When a caller-facing surface
/// offers both path-style and package-style naming, path-style takes
/// precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NamingStrategy {
    /// The bare base name, verbatim.
    #[default]
    Default,
    /// Directory segments joined with `/`, e.g. `lib/Class1`.
    PathQualified,
    /// Directory segments joined with `.` and a title-cased name,
    /// e.g. `lib.package.MyClass`.
    PackageQualified,
}

/// How filesystem work is scheduled within one mapping operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Single thread of control; every filesystem call blocks the caller.
    #[default]
    Blocking,
    /// A bounded pool of worker threads shares listing, stat, and file-read
    /// work.
    Pooled {
        /// Maximum simultaneous in-flight filesystem operations.
        workers: usize,
    },
}

impl ExecutionMode {
    /// Pooled execution with the default worker ceiling.
    pub fn pooled() -> Self {
        ExecutionMode::Pooled {
            workers: DEFAULT_POOL_SIZE,
        }
    }
}

/// Options for a mapping operation.
#[derive(Clone)]
pub struct MapOptions {
    /// Project root. Required when mapping an explicit file list; ignored
    /// when walking a path (the resolved walk root is used instead).
    pub root_dir: Option<PathBuf>,
    /// Scan file contents for `/* use-automapper: ... */` annotations.
    pub parse_annotations: bool,
    /// Descend into (and collect from) the vendor directory.
    pub include_vendor_dir: bool,
    /// Active naming strategy.
    pub strategy: NamingStrategy,
    /// Caller-supplied names by absolute file path. Highest priority; wins
    /// over annotation-derived names for the same file.
    pub additional_names: HashMap<PathBuf, String>,
    /// Explicit manifest destination. Defaults to `<root>/use.json`.
    pub output_path: Option<PathBuf>,
    /// Scheduling of filesystem work.
    pub execution: ExecutionMode,
    /// Optional sink for structured progress events. Absent means silent.
    pub progress: Option<Arc<dyn ProgressSink>>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            root_dir: None,
            parse_annotations: true,
            include_vendor_dir: false,
            strategy: NamingStrategy::default(),
            additional_names: HashMap::new(),
            output_path: None,
            execution: ExecutionMode::default(),
            progress: None,
        }
    }
}

impl MapOptions {
    /// Create options with the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project root (required for file-list mapping).
    pub fn root_dir(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root.into());
        self
    }

    /// Enable or disable annotation scanning.
    pub fn parse_annotations(mut self, parse: bool) -> Self {
        self.parse_annotations = parse;
        self
    }

    /// Include the vendor directory in traversal.
    pub fn include_vendor_dir(mut self, include: bool) -> Self {
        self.include_vendor_dir = include;
        self
    }

    /// Select the naming strategy.
    pub fn strategy(mut self, strategy: NamingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Register a caller-supplied name for a file.
    pub fn additional_name(mut self, file: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        self.additional_names.insert(file.into(), name.into());
        self
    }

    /// Register caller-supplied names in bulk.
    pub fn additional_names(mut self, names: HashMap<PathBuf, String>) -> Self {
        self.additional_names.extend(names);
        self
    }

    /// Set an explicit manifest destination.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Select the execution mode.
    pub fn execution(mut self, mode: ExecutionMode) -> Self {
        self.execution = mode;
        self
    }

    /// Attach a progress sink.
    pub fn progress(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress = Some(sink);
        self
    }
}

impl fmt::Debug for MapOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapOptions")
            .field("root_dir", &self.root_dir)
            .field("parse_annotations", &self.parse_annotations)
            .field("include_vendor_dir", &self.include_vendor_dir)
            .field("strategy", &self.strategy)
            .field("additional_names", &self.additional_names)
            .field("output_path", &self.output_path)
            .field("execution", &self.execution)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MapOptions::new();
        assert!(options.root_dir.is_none());
        assert!(options.parse_annotations);
        assert!(!options.include_vendor_dir);
        assert_eq!(options.strategy, NamingStrategy::Default);
        assert!(options.additional_names.is_empty());
        assert!(options.output_path.is_none());
        assert_eq!(options.execution, ExecutionMode::Blocking);
        assert!(options.progress.is_none());
    }

    #[test]
    fn test_builder() {
        let options = MapOptions::new()
            .root_dir("/project")
            .parse_annotations(false)
            .include_vendor_dir(true)
            .strategy(NamingStrategy::PathQualified)
            .additional_name("/project/a.js", "Alpha")
            .output_path("/project/out.json")
            .execution(ExecutionMode::pooled());

        assert_eq!(
            options.root_dir.as_deref(),
            Some(std::path::Path::new("/project"))
        );
        assert!(!options.parse_annotations);
        assert!(options.include_vendor_dir);
        assert_eq!(options.strategy, NamingStrategy::PathQualified);
        assert_eq!(
            options.additional_names.get(std::path::Path::new("/project/a.js")),
            Some(&"Alpha".to_string())
        );
        assert_eq!(
            options.execution,
            ExecutionMode::Pooled {
                workers: DEFAULT_POOL_SIZE
            }
        );
    }
}
