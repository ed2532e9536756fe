#![forbid(unsafe_code)]
//! Lorax prints a directory tree, pruning anything that matches a set of
//! gitignore-style ignore patterns.

pub mod cli;
pub mod lorax;
pub mod pattern;
pub mod render;
pub mod tree;

pub use crate::lorax::Lorax;
pub use crate::pattern::{PatternMatcher, DEFAULT_IGNORE_PATTERNS};
pub use crate::tree::{TreeEntry, TreeOptions};
