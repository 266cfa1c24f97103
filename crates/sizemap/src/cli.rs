//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use sizemap_core::MergePolicy;

/// sizemap - image size catalogs
#[derive(Parser, Debug)]
#[command(name = "sizemap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (command output is still printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the catalog file (default: find sizemap.json / sizemap.yaml)
    #[arg(short, long, global = true, env = "SIZEMAP_CATALOG")]
    pub catalog: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Validate catalog files
    Validate(ValidateArgs),

    /// Show the dimensions of one variant
    Get(GetArgs),

    /// List images and their variants
    List(ListArgs),

    /// Merge catalog files into one
    Merge(MergeArgs),

    /// Derive variant dimensions from an original resolution
    Derive(DeriveArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog files to validate (default: the catalog)
    pub files: Vec<Utf8PathBuf>,

    /// Fail when a variant is larger than its original
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Image identifier
    pub image: String,

    /// Variant name (original, large, medium, small, ...)
    pub variant: String,

    /// Fall back to the original when the variant is missing
    #[arg(long)]
    pub fallback: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list variants of this image
    pub image: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Catalog files, in merge order
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<Utf8PathBuf>,

    /// Output file (.json or .yaml)
    #[arg(short, long)]
    pub output: Utf8PathBuf,

    /// Duplicate image handling (default: from settings)
    #[arg(long, value_parser = parse_merge_policy)]
    pub policy: Option<MergePolicy>,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Image identifier
    pub image: String,

    /// Original width in pixels
    #[arg(long)]
    pub width: u32,

    /// Original height in pixels
    #[arg(long)]
    pub height: u32,

    /// Scale percentages for small, medium and large (default: from settings)
    #[arg(short, long)]
    pub scale: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

fn parse_merge_policy(s: &str) -> Result<MergePolicy, String> {
    s.parse()
}
