#![allow(dead_code)]

use lorax::tree::{build_tree, TreeEntry, TreeOptions};
use lorax::PatternMatcher;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    populate(tmp.path(), paths);
    tmp
}

/// Like `create_fixture`, but nests everything under a directory called
/// `root` so the header line is predictable. Returns the guard and the root.
pub fn create_named_fixture(paths: &[&str]) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    fs::create_dir(&root).unwrap();
    populate(&root, paths);
    (tmp, root)
}

fn populate(base: &Path, paths: &[&str]) {
    for p in paths {
        let full = base.join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
}

pub fn default_matcher() -> PatternMatcher {
    PatternMatcher::default_set().unwrap()
}

/// Build with the default matcher and default options.
pub fn default_entries(root: &Path) -> Vec<TreeEntry> {
    build_tree(root, &default_matcher(), &TreeOptions::default()).unwrap()
}

pub fn names(entries: &[TreeEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

/// Names of the direct children of the root, in output order.
pub fn top_level(entries: &[TreeEntry]) -> Vec<&str> {
    entries
        .iter()
        .filter(|e| e.depth == 1)
        .map(|e| e.name.as_str())
        .collect()
}
