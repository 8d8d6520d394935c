use std::path::PathBuf;

use clap::Parser;

use super::config::DEFAULT_CONFIG_FILENAME;

/// Export the report as PDF and upload images into a markdown document.
#[derive(Debug, Parser)]
#[command(name = "scribe", version)]
pub struct Cli {
    /// RON config file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Markdown file edited in this session; image links are inserted into it.
    #[arg(long)]
    pub editor: Option<PathBuf>,

    /// Byte offset of the caret in the editor (defaults to the end).
    #[arg(long, requires = "editor")]
    pub caret: Option<usize>,

    /// Export the render source to `report_<date>.pdf`.
    #[arg(long)]
    pub export: bool,

    /// Images to upload, in order.
    #[arg(long, num_args = 1.., value_name = "FILE")]
    pub upload: Vec<PathBuf>,
}
