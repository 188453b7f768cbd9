use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Referendum mapping CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "scrutin", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tally a referendum per region and draw the choropleth
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Directory holding referendum.csv, regions.csv, departments.csv
    /// and regions.geojson
    #[arg(value_hint = ValueHint::DirPath)]
    pub data: PathBuf,

    /// Output SVG file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}
