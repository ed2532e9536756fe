use clap::Parser;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

use crate::tree::TreeOptions;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "lorax",
    version,
    about = "Print a directory tree without the build artifacts, caches and VCS noise",
    after_help = "Examples:\n  lorax\n  lorax path/to/project\n  lorax -I '*.log' -I target/\n  lorax --no-default-ignores -I .git/"
)]
pub struct Args {
    /// Directory to render (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Gitignore-style patterns to exclude (repeatable)
    #[arg(short = 'I', long = "ignore", action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Do not exclude the built-in VCS, tooling and IDE patterns
    #[arg(long = "no-default-ignores")]
    pub no_default_ignores: bool,

    /// Descend into symlinked directories
    #[arg(short = 'f', long = "follow-symlinks")]
    pub follow_symlinks: bool,

    /// Mark unreadable directories instead of aborting
    #[arg(long = "skip-unreadable")]
    pub skip_unreadable: bool,

    /// Increase diagnostic output on stderr (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.quiet {
            self.verbose = 0;
        }
        self
    }

    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            follow_symlinks: self.follow_symlinks,
            skip_unreadable: self.skip_unreadable,
        }
    }

    /// Diagnostic level selected by `--verbose` and `--quiet`.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
