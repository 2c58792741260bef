//! Output writers for Sankey flow data.
//!
//! This module handles:
//! - Serializing flows to SankeyMATIC text
//! - Filling a SankeyMATIC template file

pub mod template;
pub mod text;

// Re-export main functions
pub use template::{output_file_name, render_template, write_formatted};
pub use text::render_flows;
