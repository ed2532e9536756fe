use super::walk::RawEntry;
use super::TreeEntry;

const TEE: &str = "├── ";
const ELBOW: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Compute is_last flags and prefix strings for pre-ordered entries.
pub(super) fn compute_tree_structure(raw: Vec<RawEntry>) -> Vec<TreeEntry> {
    let last_flags = last_sibling_flags(&raw);

    let mut entries: Vec<TreeEntry> = raw
        .into_iter()
        .zip(last_flags)
        .map(|(r, is_last)| TreeEntry {
            name: r.name,
            path: r.path,
            depth: r.depth,
            is_dir: r.is_dir,
            is_last,
            prefix: String::new(), // computed below
            error: r.error,
        })
        .collect();

    compute_prefixes(&mut entries);
    entries
}

/// An entry is last when no later entry shares its depth before the
/// enclosing directory's scope ends. Scanning backwards, `seen[d]` records
/// that a later sibling at depth `d` exists.
fn last_sibling_flags(raw: &[RawEntry]) -> Vec<bool> {
    let mut seen: Vec<bool> = Vec::new();
    let mut flags = vec![false; raw.len()];

    for (i, entry) in raw.iter().enumerate().rev() {
        let depth = entry.depth;
        if seen.len() <= depth {
            seen.resize(depth + 1, false);
        }
        flags[i] = !seen[depth];
        seen[depth] = true;
        // Deeper entries seen so far belong to a later sibling's subtree.
        seen.truncate(depth + 1);
    }
    flags
}

/// Build each prefix from the is_last flags of the entry's ancestors.
fn compute_prefixes(entries: &mut [TreeEntry]) {
    // ancestor_is_last[d - 1] is the flag of the open ancestor at depth d
    let mut ancestor_is_last: Vec<bool> = Vec::new();

    for entry in entries.iter_mut() {
        ancestor_is_last.resize(entry.depth.saturating_sub(1), false);

        let mut prefix = String::with_capacity(4 * (ancestor_is_last.len() + 1));
        for &last in &ancestor_is_last {
            prefix.push_str(if last { BLANK } else { PIPE });
        }
        prefix.push_str(if entry.is_last { ELBOW } else { TEE });

        entry.prefix = prefix;
        ancestor_is_last.push(entry.is_last);
    }
}
