//! Plain-text rendering of laid-out tree entries.

use crate::tree::TreeEntry;
use std::path::Path;

/// Appended to entries whose contents could not be listed.
pub const UNREADABLE_MARKER: &str = " [unreadable]";

/// Header line: the root directory's name followed by `/`.
///
/// A filesystem root has no name, so its header is just `/`.
pub fn header_line(root: &Path) -> String {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{name}/")
}

/// Format one entry as prefix, name, and directory marker.
pub fn entry_line(entry: &TreeEntry) -> String {
    let mut line = String::with_capacity(entry.prefix.len() + entry.name.len() + 1);
    line.push_str(&entry.prefix);
    line.push_str(&entry.name);
    if entry.is_dir {
        line.push('/');
    }
    if entry.error.is_some() {
        line.push_str(UNREADABLE_MARKER);
    }
    line
}

/// Header followed by one line per entry, in traversal order.
pub fn tree_lines(root: &Path, entries: &[TreeEntry]) -> Vec<String> {
    std::iter::once(header_line(root))
        .chain(entries.iter().map(entry_line))
        .collect()
}

/// Join the tree lines with `\n`. The result has no trailing newline.
pub fn render_tree(root: &Path, entries: &[TreeEntry]) -> String {
    tree_lines(root, entries).join("\n")
}
