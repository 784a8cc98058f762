//! File-tree discovery.
//!
//! One traversal algorithm, two schedulers. The blocking walker drives an
//! explicit breadth-first work queue inline; the pooled walker dispatches
//! the same directory-listing and stat tasks onto a bounded pool of worker
//! threads and waits for the queue to fully drain, including tasks that
//! tasks themselves submitted. Classification and vendor-directory
//! exclusion are shared, so both schedulers discover the same file set.
//!
//! The pooled walker sorts its result lexicographically by absolute path
//! before returning, so downstream name resolution sees a reproducible
//! order regardless of scheduling.

use std::collections::VecDeque;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam_channel::Sender;

use crate::error::AutomapError;
use crate::options::ExecutionMode;
use crate::path::is_under_vendor_dir;
use crate::Result;

/// Outcome of a traversal.
#[derive(Debug, Clone)]
pub struct WalkResult {
    /// Absolute paths of every eligible file found.
    pub files: Vec<PathBuf>,
    /// The canonicalized root the traversal started from.
    pub root: PathBuf,
}

enum Entry {
    JsFile(PathBuf),
    Directory(PathBuf),
    Other,
}

enum Task {
    ListDir(PathBuf),
    Stat(PathBuf),
    Shutdown,
}

/// Enumerate eligible files under `start` with the given scheduler.
pub fn walk(start: &Path, include_vendor_dir: bool, execution: ExecutionMode) -> Result<WalkResult> {
    match execution {
        ExecutionMode::Blocking => walk_blocking(start, include_vendor_dir),
        ExecutionMode::Pooled { workers } => walk_pooled(start, include_vendor_dir, workers),
    }
}

/// Breadth-first traversal on the calling thread.
pub fn walk_blocking(start: &Path, include_vendor_dir: bool) -> Result<WalkResult> {
    let root = resolve_root(start)?;

    let mut queue = VecDeque::new();
    queue.push_back(root.clone());
    let mut files = Vec::new();

    while let Some(dir) = queue.pop_front() {
        for child in list_dir(&dir, include_vendor_dir)? {
            match classify(child)? {
                Entry::JsFile(path) => files.push(path),
                Entry::Directory(path) => queue.push_back(path),
                Entry::Other => {}
            }
        }
    }

    Ok(WalkResult { files, root })
}

/// Same traversal with listing and stat work spread over a bounded pool.
///
/// The first filesystem failure aborts the walk and discards anything
/// already collected. Results are sorted by absolute path.
pub fn walk_pooled(start: &Path, include_vendor_dir: bool, workers: usize) -> Result<WalkResult> {
    let root = resolve_root(start)?;
    let worker_count = workers.max(1);

    let (task_tx, task_rx) = crossbeam_channel::unbounded::<Task>();
    let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(1);
    let pending = Arc::new(AtomicUsize::new(0));
    let files = Arc::new(Mutex::new(Vec::new()));
    let failed = Arc::new(AtomicBool::new(false));
    let failure = Arc::new(Mutex::new(None));

    let mut handles = Vec::with_capacity(worker_count);
    for worker_idx in 0..worker_count {
        let rx = task_rx.clone();
        let tx = task_tx.clone();
        let worker_done = done_tx.clone();
        let worker_pending = Arc::clone(&pending);
        let worker_files = Arc::clone(&files);
        let worker_failed = Arc::clone(&failed);
        let worker_failure = Arc::clone(&failure);

        let handle = thread::Builder::new()
            .name(format!("walk-worker-{worker_idx}"))
            .spawn(move || {
                for task in rx.iter() {
                    if matches!(task, Task::Shutdown) {
                        break;
                    }
                    if !worker_failed.load(Ordering::SeqCst) {
                        if let Err(err) = process_task(
                            task,
                            &tx,
                            &worker_pending,
                            include_vendor_dir,
                            &worker_files,
                        ) {
                            let mut slot = worker_failure.lock().unwrap();
                            if slot.is_none() {
                                *slot = Some(err);
                            }
                            worker_failed.store(true, Ordering::SeqCst);
                        }
                    }
                    // Last in-flight task signals the drain barrier.
                    if worker_pending.fetch_sub(1, Ordering::SeqCst) == 1 {
                        let _ = worker_done.try_send(());
                    }
                }
            })
            .map_err(AutomapError::Io)?;
        handles.push(handle);
    }
    drop(task_rx);
    drop(done_tx);

    submit(&task_tx, &pending, Task::ListDir(root.clone()));

    // Block until no queued or in-flight work remains.
    let _ = done_rx.recv();

    for _ in 0..worker_count {
        let _ = task_tx.send(Task::Shutdown);
    }
    drop(task_tx);

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

    let mut files = Arc::try_unwrap(files)
        .map_err(|_| AutomapError::WorkerPanicked)?
        .into_inner()
        .unwrap();
    files.sort();
    Ok(WalkResult { files, root })
}

fn process_task(
    task: Task,
    tx: &Sender<Task>,
    pending: &AtomicUsize,
    include_vendor_dir: bool,
    files: &Mutex<Vec<PathBuf>>,
) -> Result<()> {
    match task {
        Task::ListDir(dir) => {
            for child in list_dir(&dir, include_vendor_dir)? {
                submit(tx, pending, Task::Stat(child));
            }
        }
        Task::Stat(path) => match classify(path)? {
            Entry::JsFile(path) => files.lock().unwrap().push(path),
            Entry::Directory(path) => submit(tx, pending, Task::ListDir(path)),
            Entry::Other => {}
        },
        Task::Shutdown => {}
    }
    Ok(())
}

/// Count the task as in-flight before it can possibly be picked up.
fn submit(tx: &Sender<Task>, pending: &AtomicUsize, task: Task) {
    pending.fetch_add(1, Ordering::SeqCst);
    if tx.send(task).is_err() {
        pending.fetch_sub(1, Ordering::SeqCst);
    }
}

fn resolve_root(start: &Path) -> Result<PathBuf> {
    fs::canonicalize(start).map_err(|_| AutomapError::PathNotFound(start.to_path_buf()))
}

/// List a directory's children, dropping excluded entries by name. Sorted,
/// so traversal order does not depend on filesystem enumeration order.
fn list_dir(dir: &Path, include_vendor_dir: bool) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| AutomapError::DirRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AutomapError::DirRead {
            path: dir.to_path_buf(),
            source,
        })?;
        if is_excluded(&entry.file_name(), include_vendor_dir) {
            continue;
        }
        children.push(entry.path());
    }
    children.sort();
    Ok(children)
}

fn classify(path: PathBuf) -> Result<Entry> {
    let metadata = fs::metadata(&path).map_err(|source| AutomapError::Stat {
        path: path.clone(),
        source,
    })?;
    if metadata.is_file() && is_js_file(&path) {
        Ok(Entry::JsFile(path))
    } else if metadata.is_dir() {
        Ok(Entry::Directory(path))
    } else {
        Ok(Entry::Other)
    }
}

/// Exclusion applies to file and directory entries equally.
fn is_excluded(name: &OsStr, include_vendor_dir: bool) -> bool {
    !include_vendor_dir && is_under_vendor_dir(&name.to_string_lossy())
}

fn is_js_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("js"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    fn create_project(dir: &Path) {
        fs::create_dir_all(dir.join("lib/nested")).unwrap();
        fs::create_dir_all(dir.join("node_modules/dep")).unwrap();
        fs::create_dir_all(dir.join("empty")).unwrap();

        fs::write(dir.join("index.js"), "").unwrap();
        fs::write(dir.join("lib/a.js"), "").unwrap();
        fs::write(dir.join("lib/nested/b.js"), "").unwrap();
        fs::write(dir.join("lib/UPPER.JS"), "").unwrap();
        fs::write(dir.join("lib/readme.md"), "").unwrap();
        fs::write(dir.join("node_modules/dep/dep.js"), "").unwrap();
    }

    fn file_names(result: &WalkResult) -> HashSet<String> {
        result
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_blocking_walk_finds_js_files() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let result = walk_blocking(temp.path(), false).unwrap();
        let names = file_names(&result);

        assert_eq!(
            names,
            HashSet::from([
                "index.js".to_string(),
                "a.js".to_string(),
                "b.js".to_string(),
                "UPPER.JS".to_string(),
            ])
        );
    }

    #[test]
    fn test_blocking_walk_excludes_vendor_dir_by_default() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let result = walk_blocking(temp.path(), false).unwrap();
        assert!(!file_names(&result).contains("dep.js"));
    }

    #[test]
    fn test_blocking_walk_includes_vendor_dir_on_request() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let result = walk_blocking(temp.path(), true).unwrap();
        assert!(file_names(&result).contains("dep.js"));
    }

    #[test]
    fn test_blocking_walk_is_deterministic() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let first = walk_blocking(temp.path(), false).unwrap();
        let second = walk_blocking(temp.path(), false).unwrap();
        assert_eq!(first.files, second.files);
    }

    #[test]
    fn test_blocking_walk_resolves_root() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let result = walk_blocking(temp.path(), false).unwrap();
        assert_eq!(result.root, fs::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn test_walk_path_not_found() {
        let result = walk_blocking(Path::new("/nonexistent/automap-root"), false);
        assert!(matches!(result, Err(AutomapError::PathNotFound(_))));

        let result = walk_pooled(Path::new("/nonexistent/automap-root"), false, 4);
        assert!(matches!(result, Err(AutomapError::PathNotFound(_))));
    }

    #[test]
    fn test_pooled_walk_matches_blocking_set() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let blocking = walk_blocking(temp.path(), false).unwrap();
        let pooled = walk_pooled(temp.path(), false, 4).unwrap();

        let blocking_set: HashSet<_> = blocking.files.iter().cloned().collect();
        let pooled_set: HashSet<_> = pooled.files.iter().cloned().collect();
        assert_eq!(blocking_set, pooled_set);
        assert_eq!(blocking.root, pooled.root);
    }

    #[test]
    fn test_pooled_walk_includes_vendor_dir_on_request() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let result = walk_pooled(temp.path(), true, 4).unwrap();
        assert!(file_names(&result).contains("dep.js"));
    }

    #[test]
    fn test_pooled_walk_result_is_sorted() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let result = walk_pooled(temp.path(), false, 4).unwrap();
        let mut sorted = result.files.clone();
        sorted.sort();
        assert_eq!(result.files, sorted);
    }

    #[test]
    fn test_pooled_walk_single_worker() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let blocking = walk_blocking(temp.path(), false).unwrap();
        let pooled = walk_pooled(temp.path(), false, 1).unwrap();

        let blocking_set: HashSet<_> = blocking.files.iter().cloned().collect();
        let pooled_set: HashSet<_> = pooled.files.iter().cloned().collect();
        assert_eq!(blocking_set, pooled_set);
    }

    #[test]
    fn test_walk_dispatches_on_execution_mode() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let blocking = walk(temp.path(), false, ExecutionMode::Blocking).unwrap();
        let pooled = walk(temp.path(), false, ExecutionMode::pooled()).unwrap();

        let blocking_set: HashSet<_> = blocking.files.iter().cloned().collect();
        let pooled_set: HashSet<_> = pooled.files.iter().cloned().collect();
        assert_eq!(blocking_set, pooled_set);
    }

    #[test]
    fn test_vendor_dir_match_is_case_insensitive() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("NODE_MODULES")).unwrap();
        fs::write(temp.path().join("NODE_MODULES/x.js"), "").unwrap();
        fs::write(temp.path().join("app.js"), "").unwrap();

        let result = walk_blocking(temp.path(), false).unwrap();
        assert_eq!(file_names(&result), HashSet::from(["app.js".to_string()]));
    }
}
