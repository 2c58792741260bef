//! Cost export parsing and record definitions.
//!
//! This module handles:
//! - Reading the CSV cost export
//! - Normalizing cost values (separators, rounding)
//! - Applying the fixed category merge

pub mod cost_csv;
pub mod schema;

// Re-export main types
pub use cost_csv::{load_cost_records, normalize_category, parse_cost, read_cost_records};
pub use schema::{CostRecord, PricingModel, PRICING_ORDER};
