// src/cli/args.rs
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cribsift",
    version,
    about = "Flags suspiciously similar student code submissions"
)]
pub struct Cli {
    /// Submission folders to compare pairwise
    #[arg(long, num_args = 1.., conflicts_with = "submissions_zip")]
    pub folders: Vec<PathBuf>,

    /// Bundle zip containing one archive per student submission
    #[arg(long)]
    pub submissions_zip: Option<PathBuf>,

    /// Type names excluded from every comparison (e.g. provided scaffolding)
    #[arg(long, num_args = 1..)]
    pub excluded_type_names: Vec<String>,

    /// Write the full comparison table to this CSV file
    #[arg(long)]
    pub csv_path: Option<PathBuf>,

    /// Mean-metric threshold below which a matched pair is flagged
    #[arg(long)]
    pub avg_threshold: Option<f64>,

    /// 0 = quiet, 1 = per-pair progress, 2 = metric dumps
    #[arg(long, default_value_t = 0)]
    pub verbosity: u8,

    /// Compare folder pairs serially instead of in parallel
    #[arg(long)]
    pub serial: bool,

    /// Output format: terminal or json
    #[arg(long, default_value = "terminal")]
    pub format: String,
}
