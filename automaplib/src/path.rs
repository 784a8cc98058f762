//! Path normalization rules.
//!
//! Everything here is a pure string transform. Paths are normalized to
//! forward slashes before any other rule applies, so Windows-style and
//! POSIX-style inputs produce identical results regardless of the host OS.

/// Directory name conventionally holding third-party dependencies.
///
/// Excluded from traversal unless explicitly requested.
pub const VENDOR_DIR: &str = "node_modules";

/// Replace every backslash in `path` with a forward slash.
///
/// Idempotent; a path with no backslashes is returned unchanged.
pub fn normalize_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Compute the path of `file_path` relative to `root`, in canonical form.
///
/// The result uses forward slashes only, has a single trailing `.js`
/// extension stripped (case-insensitively), and always begins with `./`.
pub fn relative_file_path(file_path: &str, root: &str) -> String {
    let path = normalize_slashes(file_path);
    let root = normalize_slashes(root);

    let path_segments: Vec<&str> = path.split('/').collect();
    let root_segments: Vec<&str> = if root.is_empty() {
        Vec::new()
    } else {
        root.split('/')
            .enumerate()
            // A trailing slash on the root is not a segment of its own.
            .filter(|(i, s)| *i == 0 || !s.is_empty())
            .map(|(_, s)| s)
            .collect()
    };

    let common = root_segments
        .iter()
        .zip(path_segments.iter())
        .take_while(|(r, p)| r == p)
        .count();

    let mut segments: Vec<&str> = Vec::new();
    for _ in common..root_segments.len() {
        segments.push("..");
    }
    segments.extend(&path_segments[common..]);
    let rel = strip_js_extension(&segments.join("/"));

    if rel.starts_with('/') {
        format!(".{rel}")
    } else if rel.starts_with("./") {
        rel
    } else {
        format!("./{rel}")
    }
}

/// Return the filename without its extension, if and only if the extension
/// is case-insensitively `.js`.
pub fn js_base_name(path: &str) -> Option<String> {
    let normalized = normalize_slashes(path);
    let file_name = normalized.rsplit('/').next().unwrap_or(&normalized);
    if file_name.len() > 3 && file_name[file_name.len() - 3..].eq_ignore_ascii_case(".js") {
        Some(file_name[..file_name.len() - 3].to_string())
    } else {
        None
    }
}

/// True if any segment of `path` is the vendor directory, case-insensitively.
pub fn is_under_vendor_dir(path: &str) -> bool {
    normalize_slashes(path)
        .split('/')
        .any(|segment| segment.eq_ignore_ascii_case(VENDOR_DIR))
}

fn strip_js_extension(path: &str) -> String {
    if path.len() >= 3 && path[path.len() - 3..].eq_ignore_ascii_case(".js") {
        path[..path.len() - 3].to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_slashes() {
        assert_eq!(normalize_slashes(r"C:\Users\dev\lib"), "C:/Users/dev/lib");
        assert_eq!(normalize_slashes("a/b/c"), "a/b/c");
        assert_eq!(normalize_slashes(r"a\b/c\d"), "a/b/c/d");
    }

    #[test]
    fn test_normalize_slashes_idempotent() {
        let once = normalize_slashes(r"a\b\c");
        assert_eq!(normalize_slashes(&once), once);
    }

    #[test]
    fn test_relative_file_path_posix() {
        assert_eq!(
            relative_file_path("/project/lib/index.js", "/project"),
            "./lib/index"
        );
    }

    #[test]
    fn test_relative_file_path_windows() {
        assert_eq!(
            relative_file_path(r"C:\Users\dev\project\lib\index.js", r"C:\Users\dev\project"),
            "./lib/index"
        );
    }

    #[test]
    fn test_relative_file_path_windows_matches_posix() {
        let windows = relative_file_path(r"C:\proj\lib\a.js", r"C:\proj");
        let posix = relative_file_path("/proj/lib/a.js", "/proj");
        assert_eq!(windows, posix);
    }

    #[test]
    fn test_relative_file_path_uppercase_extension() {
        assert_eq!(
            relative_file_path("/project/lib/index.JS", "/project"),
            "./lib/index"
        );
    }

    #[test]
    fn test_relative_file_path_trailing_root_slash() {
        assert_eq!(
            relative_file_path("/project/lib/index.js", "/project/"),
            "./lib/index"
        );
    }

    #[test]
    fn test_relative_file_path_already_canonical() {
        assert_eq!(relative_file_path("./lib/index", ""), "./lib/index");
    }

    #[test]
    fn test_relative_file_path_outside_root() {
        assert_eq!(
            relative_file_path("/other/lib/a.js", "/project"),
            "./../other/lib/a"
        );
    }

    #[test]
    fn test_js_base_name() {
        assert_eq!(js_base_name("/a/b/index.js"), Some("index".to_string()));
        assert_eq!(js_base_name(r"C:\a\b\MyClass.js"), Some("MyClass".to_string()));
        assert_eq!(js_base_name("/a/b/index.JS"), Some("index".to_string()));
        assert_eq!(js_base_name("index.js"), Some("index".to_string()));
    }

    #[test]
    fn test_js_base_name_not_applicable() {
        assert_eq!(js_base_name("/a/b/readme.md"), None);
        assert_eq!(js_base_name("/a/b/Makefile"), None);
        assert_eq!(js_base_name("/a/b/.js"), None);
        assert_eq!(js_base_name("/a/b/index.json"), None);
    }

    #[test]
    fn test_is_under_vendor_dir() {
        assert!(is_under_vendor_dir("/a/node_modules/lib/x.js"));
        assert!(is_under_vendor_dir(r"C:\a\NODE_MODULES\x.js"));
        assert!(is_under_vendor_dir("node_modules"));
        assert!(!is_under_vendor_dir("/a/lib/x.js"));
        assert!(!is_under_vendor_dir("/a/node_modules_backup/x.js"));
    }
}
