use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "gallery",
    version,
    about = "Thumbnail gallery for electron-microscopy image stacks"
)]
pub(super) struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub(super) verbose: bool,

    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Prints the gallery geometry of a stack, an image file or a directory.
    Info {
        input: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Renders the gallery grid into one contact sheet image.
    Sheet(SheetArgs),
    /// Writes the selected items to a new TIFF stack.
    Export {
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        select: String,
    },
    /// Re-estimates the CTF of a micrograph from its PSD.
    Ctf(CtfArgs),
}

#[derive(Debug, Args)]
pub(super) struct SheetArgs {
    #[arg(required = true)]
    pub(super) inputs: Vec<PathBuf>,
    #[arg(long)]
    pub(super) output: PathBuf,
    #[arg(long, conflicts_with_all = ["rows", "width"])]
    pub(super) columns: Option<usize>,
    #[arg(long, conflicts_with = "width")]
    pub(super) rows: Option<usize>,
    /// Viewport width in pixels; the column count follows it.
    #[arg(long)]
    pub(super) width: Option<u32>,
    /// Thumbnail zoom in percent.
    #[arg(long)]
    pub(super) zoom: Option<u32>,
    #[arg(long)]
    pub(super) labels: bool,
    #[arg(long)]
    pub(super) normalize: bool,
    /// Items to highlight, e.g. `0-5,7`.
    #[arg(long)]
    pub(super) select: Option<String>,
    /// Settings file (.yaml, .yml, .json or .properties).
    #[arg(long)]
    pub(super) config: Option<PathBuf>,
    /// Where to save the sheet layout (.json or .yaml).
    #[arg(long)]
    pub(super) layout: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(super) struct CtfArgs {
    #[arg(long)]
    pub(super) psd: PathBuf,
    /// Angstrom per pixel.
    #[arg(long)]
    pub(super) sampling_rate: f64,
    #[arg(long)]
    pub(super) kv: f64,
    #[arg(long)]
    pub(super) cs: f64,
    #[arg(long)]
    pub(super) defocus_u: f64,
    #[arg(long)]
    pub(super) defocus_v: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(super) angle: f64,
    /// Micrograph table row reported with the result.
    #[arg(long, default_value_t = 0)]
    pub(super) row: usize,
    /// Print the command line without running it.
    #[arg(long)]
    pub(super) dry_run: bool,
}
