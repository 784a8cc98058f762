//! Structured progress reporting.
//!
//! Mapping operations accept an optional sink and record milestone events on
//! it as they go. There is no global logger and no verbosity flag in the
//! library; a caller that wants output injects a sink, a caller that wants
//! silence injects nothing.

use std::path::PathBuf;

/// A milestone reached during a mapping operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Traversal is starting from a resolved root.
    WalkStarted { root: PathBuf },
    /// Traversal finished; `file_count` eligible files were discovered.
    WalkCompleted { file_count: usize },
    /// The annotation scan finished; `name_count` files carried an override.
    AnnotationScanCompleted { name_count: usize },
    /// The resolver produced the final mapping.
    MappingResolved { entry_count: usize },
    /// The manifest was persisted.
    ManifestWritten { path: PathBuf },
}

/// Capability to accept structured progress records.
///
/// Implementations must be callable from worker threads.
pub trait ProgressSink: Send + Sync {
    /// Record one event. Implementations should not block.
    fn record(&self, event: ProgressEvent);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Sink that remembers every event, for assertions.
    #[derive(Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<ProgressEvent>>,
    }

    impl RecordingSink {
        pub fn events(&self) -> Vec<ProgressEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressSink for RecordingSink {
        fn record(&self, event: ProgressEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
