//! Logical-name assignment.
//!
//! Turns a list of discovered files into the final [`UseMapping`]. Each file
//! independently yields a candidate base name (override table first, bare
//! filename second), the active strategy folds the file's location into the
//! key, and collisions are settled with an integer-suffix probe. Suffixes
//! depend on processing order, so callers must hand files over in a
//! deterministic order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::mapping::UseMapping;
use crate::options::NamingStrategy;
use crate::path::{js_base_name, relative_file_path};

/// Candidate names by absolute file path. Absence of an entry means the
/// bare filename decides.
pub type NameOverrideTable = HashMap<PathBuf, String>;

/// Build the name → relative-path mapping for `files`, in the given order.
///
/// A file with no base name (no override and a non-`.js` filename) yields
/// no entry; that is not an error.
pub fn resolve_mapping(
    files: &[PathBuf],
    root_dir: &Path,
    overrides: &NameOverrideTable,
    strategy: NamingStrategy,
) -> UseMapping {
    let root = root_dir.to_string_lossy();
    let mut mapping = UseMapping::new();

    for file in files {
        let file_str = file.to_string_lossy();
        let rel_path = relative_file_path(&file_str, &root);

        let base_name = match overrides.get(file) {
            Some(name) => Some(name.clone()),
            None => js_base_name(&file_str),
        };
        let Some(base_name) = base_name else {
            continue;
        };

        let name = match strategy {
            NamingStrategy::Default => base_name,
            NamingStrategy::PathQualified => path_style_name(&base_name, &rel_path),
            NamingStrategy::PackageQualified => package_style_name(&base_name, &rel_path),
        };

        place(&mut mapping, name, rel_path);
    }

    mapping
}

/// Assign `name` in the mapping, probing `name1`, `name2`, ... on collision.
fn place(mapping: &mut UseMapping, name: String, rel_path: String) {
    if !mapping.contains_key(&name) {
        mapping.insert(name, rel_path);
        return;
    }
    let mut suffix = 1usize;
    loop {
        let candidate = format!("{name}{suffix}");
        if !mapping.contains_key(&candidate) {
            mapping.insert(candidate, rel_path);
            return;
        }
        suffix += 1;
    }
}

/// Fold a file's directory into a path-style name, e.g. base `Class1` at
/// `./lib/Class1` becomes `lib/Class1`.
pub fn path_style_name(name: &str, rel_path: &str) -> String {
    let path = strip_dot_slash(rel_path);
    if !path.contains('/') {
        return name.to_string();
    }
    let directory = parent_segments(path).join("/");
    format!("{directory}/{name}")
}

/// Fold a file's directory into a package-style name, e.g. base `MyClass`
/// at `./lib/data/myfile` becomes `lib.data.MyClass`. The base name is
/// title-cased with all whitespace removed.
pub fn package_style_name(name: &str, rel_path: &str) -> String {
    let path = strip_dot_slash(rel_path);
    let class_name = title_case(name);
    if !path.contains('/') {
        return class_name;
    }
    let package = parent_segments(path).join(".");
    format!("{package}.{class_name}")
}

fn strip_dot_slash(rel_path: &str) -> &str {
    match rel_path.strip_prefix('.') {
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => rel_path,
    }
}

/// All segments of `path` except the final one, skipping empty segments
/// so slash runs collapse.
fn parent_segments(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    segments.pop();
    segments
}

/// Title-case a name: each whitespace-delimited word gets an upper-cased
/// first character, then whitespace is removed.
fn title_case(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        value.split_whitespace().map(capitalize_first).collect()
    } else {
        capitalize_first(value)
    }
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
