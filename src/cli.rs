use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::select::MIN_CONTRAST;

pub const DEFAULT_TEXT: &str = "I love my country";

/// Upper bound for `--lines`.
pub const MAX_LINES: u64 = 64;

/// Preview sample text over palette colors with legible foregrounds.
#[derive(Parser, Debug)]
#[command(name = "legible", version, about)]
pub struct Args {
    /// Palette JSON file (defaults to the bundled palettes)
    #[arg(short, long)]
    pub palettes: Option<PathBuf>,

    /// Category index to start from
    #[arg(short, long, default_value_t = 0)]
    pub category: usize,

    /// Palette index within the category
    #[arg(long, default_value_t = 0)]
    pub palette: usize,

    /// Index of the background color within the palette
    #[arg(long, default_value_t = 0)]
    pub color: usize,

    /// Number of sample text lines (random 3-5 if omitted)
    #[arg(
        short = 'n',
        long,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_LINES)
    )]
    pub lines: Option<usize>,

    /// Seed for the random line count
    #[arg(long)]
    pub seed: Option<u64>,

    /// Minimum foreground contrast ratio against the background
    #[arg(long, default_value_t = MIN_CONTRAST)]
    pub min_contrast: f32,

    /// Sample text to render
    #[arg(short, long, default_value = DEFAULT_TEXT)]
    pub text: String,

    /// Reject palette files containing malformed hex colors
    #[arg(long)]
    pub strict: bool,

    /// Print the preview as JSON
    #[arg(long, conflicts_with = "tui")]
    pub json: bool,

    /// Launch the interactive terminal preview
    #[arg(long)]
    pub tui: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
