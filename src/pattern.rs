//! Compilation of gitignore-style ignore patterns into a path matcher.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Patterns excluded when the caller does not supply its own list.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    // VCS
    ".git/",
    ".hg/",
    ".svn/",
    // Python
    ".venv/",
    "venv/",
    "__pycache__/",
    "*.pyc",
    "*.pyo",
    "*.pyd",
    ".mypy_cache/",
    ".pytest_cache/",
    ".ruff_cache/",
    "*.egg-info/",
    // JS / web
    "node_modules/",
    ".next/",
    "dist/",
    "build/",
    ".parcel-cache/",
    // IDE / OS
    ".idea/",
    ".vscode/",
    ".DS_Store",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rule {
    negated: bool,
    dir_only: bool,
}

/// An ignore line after gitignore preprocessing, ready for globset.
#[derive(Debug, PartialEq, Eq)]
struct ParsedLine {
    glob: String,
    rule: Rule,
}

/// Immutable compiled form of an ordered ignore-pattern list.
///
/// Rules are evaluated in order and the last matching rule decides, so a
/// `!pattern` line re-includes what an earlier line excluded. A path is also
/// excluded when any of its ancestor directories is.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    set: GlobSet,
    rules: Vec<Rule>,
    patterns: Vec<String>,
}

impl PatternMatcher {
    /// Compile `patterns`. Fails on the first pattern globset cannot parse.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut rules = Vec::new();
        let mut kept = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            kept.push(pattern.to_string());
            let Some(parsed) = parse_line(pattern) else {
                continue;
            };
            let glob = GlobBuilder::new(&parsed.glob)
                .literal_separator(true)
                .backslash_escape(true)
                .build()
                .with_context(|| format!("invalid ignore pattern {pattern:?}"))?;
            builder.add(glob);
            rules.push(parsed.rule);
        }

        let set = builder
            .build()
            .context("failed to compile ignore patterns")?;
        Ok(Self {
            set,
            rules,
            patterns: kept,
        })
    }

    /// Compile the built-in pattern list.
    pub fn default_set() -> Result<Self> {
        Self::new(DEFAULT_IGNORE_PATTERNS)
    }

    /// Compile the built-in pattern list followed by `extra`.
    pub fn with_defaults<S: AsRef<str>>(extra: &[S]) -> Result<Self> {
        let patterns = DEFAULT_IGNORE_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(|p| p.as_ref()));
        Self::new(patterns)
    }

    /// The source lines this matcher was compiled from.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether `relative_path` (root-relative, `/`-separated) is excluded.
    ///
    /// A trailing `/` on the path marks it as a directory, as does `is_dir`.
    pub fn matches(&self, relative_path: &str, is_dir: bool) -> bool {
        let is_dir = is_dir || relative_path.ends_with('/');
        let path = relative_path.trim_start_matches('/').trim_end_matches('/');
        if path.is_empty() {
            return false;
        }

        // An excluded parent cannot be re-included by a rule on its child.
        let excluded_ancestor = path
            .match_indices('/')
            .any(|(i, _)| self.decide(&path[..i], true));
        excluded_ancestor || self.decide(path, is_dir)
    }

    fn decide(&self, candidate: &str, is_dir: bool) -> bool {
        self.set
            .matches(candidate)
            .into_iter()
            .filter(|&i| is_dir || !self.rules[i].dir_only)
            .max()
            .is_some_and(|i| !self.rules[i].negated)
    }
}

/// Apply gitignore line syntax to `line`, returning `None` for lines that
/// carry no rule (blank lines and comments).
fn parse_line(line: &str) -> Option<ParsedLine> {
    let mut body = trim_trailing_spaces(line.trim_end_matches('\r'));
    if body.is_empty() || body.starts_with('#') {
        return None;
    }

    let mut negated = false;
    if let Some(rest) = body.strip_prefix('!') {
        negated = true;
        body = rest.to_string();
    } else if body.starts_with("\\!") || body.starts_with("\\#") {
        body.remove(0);
    }

    let dir_only = body.ends_with('/');
    let body = body.trim_end_matches('/');
    if body.is_empty() {
        return None;
    }

    // A slash anywhere but the end anchors the pattern to the root.
    let (anchored, body) = match body.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (body.contains('/'), body),
    };
    let body = escape_braces(body);
    let glob = if anchored || body.starts_with("**/") {
        body
    } else {
        format!("**/{body}")
    };

    Some(ParsedLine {
        glob,
        rule: Rule { negated, dir_only },
    })
}

/// Strip unescaped trailing spaces; `\ ` keeps a literal space.
fn trim_trailing_spaces(line: &str) -> String {
    let mut out = line.to_string();
    while out.ends_with(' ') {
        let before = &out[..out.len() - 1];
        let backslashes = before.bytes().rev().take_while(|&b| b == b'\\').count();
        // An odd run means the last backslash escapes the space.
        if backslashes % 2 == 1 {
            out.truncate(out.len() - 2);
            out.push(' ');
            break;
        }
        out.pop();
    }
    out
}

/// Gitignore has no `{a,b}` alternation, so braces outside a character
/// class are escaped before globset sees them.
fn escape_braces(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
                // A leading negation or `]` is part of the class body.
                if let Some(&n) = chars.peek() {
                    if n == '!' || n == '^' {
                        out.push(n);
                        chars.next();
                    }
                }
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '{' | '}' if !in_class => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
