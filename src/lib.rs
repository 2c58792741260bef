//! Cost Sankey
//!
//! Turns itemized cloud-cost exports into SankeyMATIC flow diagrams:
//! pricing model → cost category → environment.
//!
//! This crate provides the core implementation for the
//! `cost-sankey` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! cost-sankey --csv-file costs.csv --screen
//! ```
//!
//! ## Library use
//!
//! ```ignore
//! let records = parser::load_cost_records("costs.csv")?;
//! let aggregation = aggregator::aggregate(&records, 9)?;
//! let flows = sankey::build_flows(&aggregation.grouped, &sankey::LabelMap::with_defaults());
//! println!("{}", output::render_flows(&flows));
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod sankey;
pub mod utils;
