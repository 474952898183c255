//! CLI argument definition for codeink.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use codeink::clipboard::ClipboardChoice;
use codeink::controller::BlockConfig;
use codeink::lazy::DEFAULT_LAZY_THRESHOLD_BYTES;
use codeink::palette::Theme;

/// Interactive terminal code blocks.
#[derive(Parser, Debug)]
#[command(
    name = "codeink",
    version,
    about = "Interactive terminal code blocks",
    long_about = "Shows a source file, or every code block of a markdown file, \
                  with syntax coloring, line numbers, a wrap toggle, and copy to \
                  clipboard. Without a file, shows a built-in sample page."
)]
pub struct Cli {
    /// File to show (use "-" for stdin). Omit for the sample page.
    pub file: Option<String>,

    /// Language tag, overriding detection from the file name.
    #[arg(long, value_name = "TAG")]
    pub lang: Option<String>,

    /// Color theme.
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    pub theme: Theme,

    /// Start with line wrapping on.
    #[arg(long)]
    pub wrap: bool,

    /// Size in bytes at which a block waits until it is scrolled into view
    /// before tokenizing.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_LAZY_THRESHOLD_BYTES)]
    pub lazy_threshold: usize,

    /// How long "Copied!" / "Copy failed" stay visible.
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub copy_feedback_ms: u64,

    /// Clipboard backend.
    #[arg(long, value_enum, default_value_t = ClipboardChoice::Auto)]
    pub clipboard: ClipboardChoice,

    /// Write logs to this file (filter with CODEINK_LOG, default "warn").
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn block_config(&self) -> BlockConfig {
        BlockConfig {
            lazy_threshold: self.lazy_threshold,
            copy_feedback: Duration::from_millis(self.copy_feedback_ms),
            wrap_by_default: self.wrap,
        }
    }
}
