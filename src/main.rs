//! Cost Sankey CLI
//!
//! Generates SankeyMATIC flow data from a cloud cost CSV.

use anyhow::Result;
use clap::Parser;
use cost_sankey::commands::{execute_generate, validate_args, GenerateArgs};
use cost_sankey::utils::config::{DEFAULT_TEMPLATE_FILE, DEFAULT_TOP_CATEGORIES};
use env_logger::Env;
use std::path::PathBuf;

/// Generates SankeyMATIC flow data from a cloud cost CSV
#[derive(Parser, Debug)]
#[command(name = "cost-sankey")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the source cost data CSV file
    #[arg(long)]
    csv_file: PathBuf,

    /// Total number of categories in the middle column (including "Others")
    #[arg(long, default_value_t = DEFAULT_TOP_CATEGORIES)]
    top_categories: usize,

    /// Optional JSON file for custom label remapping
    #[arg(long)]
    overwrite_json_file: Option<PathBuf>,

    /// Inject the output into the template and save it as a new file
    #[arg(long)]
    formatted: bool,

    /// Print the generated flow data to the console
    #[arg(long)]
    screen: bool,

    /// Template used with --formatted
    #[arg(long, default_value = DEFAULT_TEMPLATE_FILE)]
    template: PathBuf,

    /// Directory for files written with --formatted
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --screen output stays clean
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = GenerateArgs {
        csv_file: cli.csv_file,
        top_categories: cli.top_categories,
        overwrite_json_file: cli.overwrite_json_file,
        formatted: cli.formatted,
        screen: cli.screen,
        template: cli.template,
        output_dir: cli.output_dir,
    };

    validate_args(&args)?;
    execute_generate(&args)?;

    Ok(())
}
