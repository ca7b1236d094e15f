use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "pbo",
    about = "Create, inspect and extract PBO archives.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(visible_alias = "c", about = "Create a new archive")]
    Create(CreateArgs),

    #[command(visible_alias = "x", about = "Extract files from an archive")]
    Extract(ExtractArgs),

    #[command(visible_aliases = ["l", "ls"], about = "List files in an archive")]
    List(ListArgs),

    #[command(about = "Show archive metadata")]
    Info(InfoArgs),

    #[command(visible_aliases = ["t", "test"], about = "Validate the archive checksum")]
    Validate(ValidateArgs),
}

#[derive(Debug, clap::Args)]
pub struct CreateArgs {
    /// Output archive path
    pub archive: PathBuf,

    /// Files or directories to add
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Header-extension string to record, e.g. `prefix=x\y` (repeatable)
    #[arg(short = 'e', long = "ext")]
    pub extensions: Vec<String>,
}

#[derive(Debug, clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive
    pub archive: PathBuf,

    /// Destination directory
    #[arg(default_value = ".")]
    pub dest: PathBuf,
}

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Path to the archive
    pub archive: PathBuf,

    /// Show every header record with its raw property columns
    #[arg(short, long)]
    pub long: bool,
}

#[derive(Debug, clap::Args)]
pub struct InfoArgs {
    /// Path to the archive
    pub archive: PathBuf,
}

#[derive(Debug, clap::Args)]
pub struct ValidateArgs {
    /// Path to the archive
    pub archive: PathBuf,
}
