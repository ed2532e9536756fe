use anyhow::{bail, Context, Result};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::layout::compute_tree_structure;
use super::{TreeEntry, TreeOptions};
use crate::pattern::PatternMatcher;

/// Entry data collected during traversal, before layout computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RawEntry {
    pub depth: usize,
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub error: Option<String>,
}

/// Walk `root` depth-first and lay out every entry the matcher lets through.
///
/// Matching entries are pruned before they are descended into. Any traversal
/// error aborts the build unless `options.skip_unreadable` is set.
pub fn build_tree(
    root: &Path,
    matcher: &PatternMatcher,
    options: &TreeOptions,
) -> Result<Vec<TreeEntry>> {
    let walker = WalkDir::new(root)
        .follow_links(options.follow_symlinks)
        .sort_by(sort_cmp);

    let mut raw_entries: Vec<RawEntry> = Vec::new();
    let mut pruned = 0usize;

    let iter = walker.into_iter().filter_entry(|entry| {
        if entry.depth() == 0 {
            return true;
        }
        let is_dir = is_directory(entry);
        let key = relative_key(root, entry.path(), is_dir);
        if matcher.matches(&key, is_dir) {
            debug!(path = %key, "pruned");
            pruned += 1;
            return false;
        }
        true
    });

    for entry_result in iter {
        match entry_result {
            Ok(entry) => {
                if entry.depth() == 0 {
                    continue;
                }
                raw_entries.push(RawEntry {
                    depth: entry.depth(),
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path: entry.path().to_path_buf(),
                    is_dir: is_directory(&entry),
                    error: None,
                });
            }
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                // Errors bypass filter_entry, so ignored paths are checked here.
                if err.depth() > 0 && is_ignored(root, &path, matcher) {
                    continue;
                }
                if !options.skip_unreadable {
                    return Err(err).with_context(|| {
                        format!("{}: failed to read directory entry", path.display())
                    });
                }
                annotate_unreadable(&mut raw_entries, err, path)?;
            }
        }
    }

    debug!(
        root = %root.display(),
        entries = raw_entries.len(),
        pruned,
        "walk complete"
    );
    Ok(compute_tree_structure(raw_entries))
}

/// Record a traversal error against the entry it belongs to. An unreadable
/// directory has already been listed by its parent, so the error is attached
/// to that entry; anything else becomes an entry of its own.
fn annotate_unreadable(
    raw_entries: &mut Vec<RawEntry>,
    err: walkdir::Error,
    path: PathBuf,
) -> Result<()> {
    let reason = match err.io_error() {
        Some(io_err) => io_err.to_string(),
        None => err.to_string(),
    };
    warn!(path = %path.display(), %reason, "skipping unreadable entry");

    if let Some(existing) = raw_entries.iter_mut().rev().find(|e| e.path == path) {
        existing.error = Some(reason);
        return Ok(());
    }
    if err.depth() == 0 {
        bail!("{}: failed to read directory: {reason}", path.display());
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    raw_entries.push(RawEntry {
        depth: err.depth(),
        name,
        path,
        is_dir: false,
        error: Some(reason),
    });
    Ok(())
}

fn is_ignored(root: &Path, path: &Path, matcher: &PatternMatcher) -> bool {
    matcher.matches(&relative_key(root, path, false), false)
        || matcher.matches(&relative_key(root, path, true), true)
}

/// Root-relative, `/`-separated path with a trailing `/` for directories.
fn relative_key(root: &Path, path: &Path, is_dir: bool) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut key = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if is_dir {
        key.push('/');
    }
    key
}

/// Unfollowed symlinks count as directories when they point at one, so
/// directory-only patterns prune them. walkdir still never descends into them.
fn is_directory(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir())
}

/// Symlinks that are not followed still sort as files when they point at one.
fn is_plain_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// Comparison function for walkdir sorting.
/// Non-files first, then case-insensitive alpha, then exact name.
fn sort_cmp(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_name = a.file_name().to_string_lossy();
    let b_name = b.file_name().to_string_lossy();

    is_plain_file(a)
        .cmp(&is_plain_file(b))
        .then_with(|| a_name.to_lowercase().cmp(&b_name.to_lowercase()))
        .then_with(|| a_name.cmp(&b_name))
}
