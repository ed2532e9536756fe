//! Tree building: traversal, pruning, sorting, and layout computation.

mod layout;
pub(crate) mod walk;

use crate::pattern::PatternMatcher;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub use walk::build_tree;

/// A single entry in the rendered directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Display name (filename component only).
    pub name: String,
    /// Full filesystem path.
    pub path: PathBuf,
    /// Nesting depth (1 = direct child of root).
    pub depth: usize,
    /// Whether this entry is a directory.
    pub is_dir: bool,
    /// Whether this is the last sibling in its parent group.
    pub is_last: bool,
    /// Ancestor continuation columns followed by this entry's connector.
    pub prefix: String,
    /// Set when the entry's listing could not be read and the build kept going.
    pub error: Option<String>,
}

/// Traversal switches. Everything is off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeOptions {
    /// Descend into directories reached through symbolic links.
    pub follow_symlinks: bool,
    /// Annotate unreadable entries instead of failing the whole build.
    pub skip_unreadable: bool,
}

/// Abstraction over tree construction so it can be swapped or mocked.
pub trait TreeBuilder {
    fn build_tree(
        &self,
        root: &Path,
        matcher: &PatternMatcher,
        options: &TreeOptions,
    ) -> Result<Vec<TreeEntry>>;
}

/// Default `TreeBuilder` that delegates to the walkdir-based implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirTreeBuilder;

impl TreeBuilder for WalkdirTreeBuilder {
    fn build_tree(
        &self,
        root: &Path,
        matcher: &PatternMatcher,
        options: &TreeOptions,
    ) -> Result<Vec<TreeEntry>> {
        build_tree(root, matcher, options)
    }
}
