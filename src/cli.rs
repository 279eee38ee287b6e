//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// A tiled text editor.
#[derive(Parser, Debug)]
#[command(name = "muntin", version, about = "A tiled text-editing surface")]
pub struct CliArgs {
    /// Files to open, one sheet each
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Style file (YAML); defaults to the built-in classic style
    #[arg(long, value_name = "PATH")]
    pub style: Option<PathBuf>,
}
