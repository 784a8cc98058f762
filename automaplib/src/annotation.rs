//! Override-name extraction from file comments.
//!
//! A file can pick its own logical name by embedding a block comment of the
//! form `/* use-automapper: MyName */` anywhere in its content. The first
//! match wins. This module provides the single-file extractor plus the
//! blocking and pooled passes that scan a whole file list.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Mutex};
use std::thread;

use regex::Regex;

use crate::error::AutomapError;
use crate::naming::NameOverrideTable;
use crate::Result;

static OVERRIDE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/\*\s*use-automapper:\s*([\w\-$]+)\s*\*/").expect("valid regex literal")
});

/// Extract the override name from a file's contents, if one is present.
///
/// The keyword is matched case-insensitively and whitespace around the name
/// is tolerated. Content without a matching comment yields `None`; this is
/// a pure scan and never fails.
pub fn extract_override_name(contents: &str) -> Option<String> {
    OVERRIDE_PATTERN
        .captures(contents)
        .map(|captures| captures[1].to_string())
}

/// Scan each file's contents for an override name, one file at a time.
///
/// Files without an annotation contribute no entry. A failed read aborts
/// the pass.
pub fn scan_files(files: &[PathBuf]) -> Result<NameOverrideTable> {
    let mut names = HashMap::new();
    for file in files {
        if let Some(name) = scan_file(file)? {
            names.insert(file.clone(), name);
        }
    }
    Ok(names)
}

/// Scan file contents on a bounded pool of worker threads.
///
/// Produces the same table as [`scan_files`]. The first read failure aborts
/// the whole pass and discards any names already collected.
pub fn scan_files_pooled(files: &[PathBuf], workers: usize) -> Result<NameOverrideTable> {
    let worker_count = workers.max(1);
    let (file_tx, file_rx) = crossbeam_channel::bounded::<PathBuf>(worker_count);

    let names = Arc::new(Mutex::new(HashMap::new()));
    let failed = Arc::new(AtomicBool::new(false));
    let failure = Arc::new(Mutex::new(None));

    let mut handles = Vec::with_capacity(worker_count);
    for worker_idx in 0..worker_count {
        let rx = file_rx.clone();
        let worker_names = Arc::clone(&names);
        let worker_failed = Arc::clone(&failed);
        let worker_failure = Arc::clone(&failure);

        let handle = thread::Builder::new()
            .name(format!("annotation-worker-{worker_idx}"))
            .spawn(move || {
                for file in rx.iter() {
                    if worker_failed.load(Ordering::SeqCst) {
                        continue;
                    }
                    match scan_file(&file) {
                        Ok(Some(name)) => {
                            worker_names.lock().unwrap().insert(file, name);
                        }
                        Ok(None) => {}
                        Err(err) => {
                            let mut slot = worker_failure.lock().unwrap();
                            if slot.is_none() {
                                *slot = Some(err);
                            }
                            worker_failed.store(true, Ordering::SeqCst);
                        }
                    }
                }
            })
            .map_err(AutomapError::Io)?;
        handles.push(handle);
    }
    drop(file_rx);

    for file in files {
        if file_tx.send(file.clone()).is_err() {
            break;
        }
    }
    // Workers drain the channel, then exit on disconnect.
    drop(file_tx);

    let mut panicked = false;
    for handle in handles {
        if handle.join().is_err() {
            panicked = true;
        }
    }

    if let Some(err) = failure.lock().unwrap().take() {
        return Err(err);
    }
    if panicked {
        return Err(AutomapError::WorkerPanicked);
    }

    let names = Arc::try_unwrap(names)
        .map_err(|_| AutomapError::WorkerPanicked)?
        .into_inner()
        .unwrap();
    Ok(names)
}

fn scan_file(path: &Path) -> Result<Option<String>> {
    // Lossy decode: a stray non-UTF-8 byte should not fail the scan, only a
    // real read error should.
    let bytes = fs::read(path).map_err(|source| AutomapError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_override_name(&String::from_utf8_lossy(&bytes)))
}
