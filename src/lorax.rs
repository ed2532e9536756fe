//! Embeddable entry point: resolve a root, build its tree, print it.

use anyhow::{ensure, Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::pattern::PatternMatcher;
use crate::render::render_tree;
use crate::tree::{TreeBuilder, TreeOptions, WalkdirTreeBuilder};

/// A resolved root directory paired with the rules used to render it.
///
/// The matcher is compiled once at construction, so a `Lorax` can render the
/// same root any number of times.
#[derive(Debug, Clone)]
pub struct Lorax<B = WalkdirTreeBuilder> {
    root: PathBuf,
    matcher: PatternMatcher,
    options: TreeOptions,
    builder: B,
}

impl Lorax {
    /// Render `root` with the built-in ignore patterns.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_matcher(root, PatternMatcher::default_set()?)
    }

    /// Render the current working directory with the built-in ignore patterns.
    pub fn current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Self::new(cwd)
    }

    /// Render `root`, excluding `patterns` instead of the built-in list.
    pub fn with_patterns<S: AsRef<str>>(root: impl AsRef<Path>, patterns: &[S]) -> Result<Self> {
        Self::with_matcher(root, PatternMatcher::new(patterns)?)
    }

    /// Render `root` with an already compiled matcher.
    pub fn with_matcher(root: impl AsRef<Path>, matcher: PatternMatcher) -> Result<Self> {
        Ok(Self {
            root: resolve_root(root.as_ref())?,
            matcher,
            options: TreeOptions::default(),
            builder: WalkdirTreeBuilder,
        })
    }
}

impl<B: TreeBuilder> Lorax<B> {
    pub fn with_options(mut self, options: TreeOptions) -> Self {
        self.options = options;
        self
    }

    /// Swap the traversal implementation.
    pub fn with_builder<C: TreeBuilder>(self, builder: C) -> Lorax<C> {
        Lorax {
            root: self.root,
            matcher: self.matcher,
            options: self.options,
            builder,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Return the rendered tree without printing it.
    pub fn build_tree(&self) -> Result<String> {
        let entries = self
            .builder
            .build_tree(&self.root, &self.matcher, &self.options)?;
        Ok(render_tree(&self.root, &entries))
    }

    /// Write the rendered tree and a trailing newline to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let tree = self.build_tree()?;
        writeln!(writer, "{tree}").context("failed to write tree")?;
        writer.flush().context("failed to write tree")?;
        Ok(())
    }

    /// Render the tree to standard output.
    pub fn speak(&self) -> Result<()> {
        self.write_to(std::io::stdout().lock())
    }
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    let path = root
        .canonicalize()
        .with_context(|| format!("{}: failed to resolve path", root.display()))?;
    ensure!(path.is_dir(), "{}: Not a directory", path.display());
    Ok(path)
}
