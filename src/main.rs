#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use lorax::cli::Args;
use lorax::{Lorax, PatternMatcher};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("lorax: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    init_logging(args.log_level());

    let matcher = if args.no_default_ignores {
        PatternMatcher::new(&args.ignore)?
    } else {
        PatternMatcher::with_defaults(args.ignore.as_slice())?
    };

    let lorax = Lorax::with_matcher(&args.path, matcher)?.with_options(args.tree_options());
    info!(
        root = %lorax.root().display(),
        patterns = lorax.matcher().patterns().len(),
        "rendering tree"
    );
    lorax.speak()
}

/// Diagnostics go to stderr so stdout carries only the tree.
fn init_logging(level: LevelFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::default().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
