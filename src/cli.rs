use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Configuration file to render from; defaults are used if it doesn't exist
    #[clap(short, long, default_value = "verse-book.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a verse-book.toml config file
    Config,
    /// Renders the books according to the contents of the verse-book.toml config file
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
