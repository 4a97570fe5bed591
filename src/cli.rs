use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bangumi-renamer")]
#[command(author, version, about, long_about = None)]
#[command(about = "Rename anime episode files, optionally with episode titles from Bangumi")]
pub struct Args {
    /// Folder to process once; without it, folders are asked for interactively
    pub target_dir: Option<PathBuf>,

    /// Show the rename plan without modifying the filesystem
    #[arg(short, long)]
    pub dry: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file location (default: config.json beside the executable)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Never query Bangumi; use titles embedded in filenames only
    #[arg(long)]
    pub no_metadata: bool,
}
