//! Generate command implementation.
//!
//! The generate command:
//! 1. Reads cost records from CSV
//! 2. Loads the label overwrite map
//! 3. Selects retained categories and groups records
//! 4. Builds the Sankey flows
//! 5. Prints and/or writes the output

use crate::aggregator::aggregate;
use crate::output::{render_flows, write_formatted};
use crate::parser::load_cost_records;
use crate::sankey::{build_flows, LabelMap};
use crate::utils::config::{DEFAULT_TEMPLATE_FILE, DEFAULT_TOP_CATEGORIES};
use crate::utils::error::OutputError;
use anyhow::{Context, Result};
use chrono::Local;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the generate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Source cost export (CSV)
    pub csv_file: PathBuf,

    /// Total categories in the middle column, including "Others"
    pub top_categories: usize,

    /// Optional JSON file of label overrides
    pub overwrite_json_file: Option<PathBuf>,

    /// Write the flows into the template file
    pub formatted: bool,

    /// Print the flows to stdout
    pub screen: bool,

    /// SankeyMATIC template used with `formatted`
    pub template: PathBuf,

    /// Directory for formatted output files
    pub output_dir: PathBuf,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            csv_file: PathBuf::new(),
            top_categories: DEFAULT_TOP_CATEGORIES,
            overwrite_json_file: None,
            formatted: false,
            screen: false,
            template: PathBuf::from(DEFAULT_TEMPLATE_FILE),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Execute the generate command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The rendered flow text, whether or not it was printed or written
///
/// # Errors
/// * Unreadable or malformed CSV
/// * Invalid cost values
/// * Invalid category cap
pub fn execute_generate(args: &GenerateArgs) -> Result<String> {
    let start_time = Instant::now();

    info!("Step 1/5: Reading cost data...");
    let records = load_cost_records(&args.csv_file)
        .with_context(|| format!("Failed to read cost data from {}", args.csv_file.display()))?;

    info!("Step 2/5: Loading label map...");
    let labels = load_labels(args.overwrite_json_file.as_deref());

    info!("Step 3/5: Selecting top {} categories...", args.top_categories);
    let aggregation = aggregate(&records, args.top_categories).context("Failed to select categories")?;

    debug!("Retained categories: {:?}", aggregation.retained.names());

    info!("Step 4/5: Building flows...");
    let flows = build_flows(&aggregation.grouped, &labels);
    let output = render_flows(&flows);

    info!("Step 5/5: Writing output...");
    if args.screen {
        println!("{}", output);
    }

    if args.formatted {
        write_formatted_output(args, &output);
    }

    info!(
        "Generated {} edges ({} total) in {:.2}s",
        flows.pricing.len() + flows.categories.len() + flows.environments.len(),
        flows.total_weight(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(output)
}

/// Load the label map, falling back to the defaults on any problem
///
/// **Private** - a bad override file should not block generation
fn load_labels(path: Option<&Path>) -> LabelMap {
    let Some(path) = path else {
        return LabelMap::with_defaults();
    };

    if !path.exists() {
        warn!("JSON file '{}' not found. Using defaults.", path.display());
        return LabelMap::with_defaults();
    }

    match LabelMap::load(path) {
        Ok(labels) => labels,
        Err(e) => {
            warn!("Failed to parse JSON file. Using defaults only. Error: {}", e);
            LabelMap::with_defaults()
        }
    }
}

/// Write the formatted file; template problems are reported, not fatal
///
/// **Private** - internal helper for execute_generate
fn write_formatted_output(args: &GenerateArgs, output: &str) {
    if !args.template.exists() {
        warn!(
            "Template file '{}' not found. Skipping file generation.",
            args.template.display()
        );
        return;
    }

    let now = Local::now().naive_local();
    match write_formatted(&args.template, &args.output_dir, output, &now) {
        Ok(path) => info!("✓ Formatted output written to: {}", path.display()),
        Err(OutputError::MissingMarker(marker)) => {
            warn!("Template file found but '{}' section missing. File not saved.", marker)
        }
        Err(e) => warn!("Error processing template file: {}", e),
    }
}

/// Validate generate arguments
///
/// **Public** - can be called before execute_generate for early validation
pub fn validate_args(args: &GenerateArgs) -> Result<()> {
    if args.csv_file.as_os_str().is_empty() {
        anyhow::bail!("CSV file path cannot be empty");
    }

    if args.top_categories < 1 {
        anyhow::bail!("top_categories must be at least 1");
    }

    if !args.screen && !args.formatted {
        warn!("Neither --screen nor --formatted given; output will not be shown");
    }

    Ok(())
}
