//! CSV loader for itemized cost exports.
//!
//! Reads rows with `PricingModel`, `MeterCategory`, `Environment` and
//! `Monthy Cost` columns and turns them into normalized [`CostRecord`]s.
//! Any other columns in the export are ignored.

use super::schema::CostRecord;
use crate::utils::config::{ETL_SOURCE_CATEGORIES, ETL_TOOLS_LABEL, MAX_COST};
use crate::utils::error::ParseError;
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row as it appears in the export, before normalization
#[derive(Debug, Deserialize)]
struct RawCostRow {
    #[serde(rename = "PricingModel")]
    pricing_model: String,

    #[serde(rename = "MeterCategory")]
    category: String,

    #[serde(rename = "Environment")]
    environment: String,

    #[serde(rename = "Monthy Cost")]
    monthly_cost: String,
}

/// Load cost records from a CSV file on disk
///
/// **Public** - main entry point for ingestion
///
/// # Errors
/// * `ParseError::Io` - file cannot be opened
/// * `ParseError::Csv` - malformed CSV or missing columns
/// * `ParseError::Row` - a cost value could not be parsed
pub fn load_cost_records(path: impl AsRef<Path>) -> Result<Vec<CostRecord>, ParseError> {
    let path = path.as_ref();
    info!("Reading cost records from: {}", path.display());

    let file = File::open(path)?;
    read_cost_records(file)
}

/// Read cost records from any CSV source
///
/// **Public** - used by `load_cost_records` and by tests with in-memory data
pub fn read_cost_records<R: Read>(source: R) -> Result<Vec<CostRecord>, ParseError> {
    let mut reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(source);
    let mut records = Vec::new();

    for (index, result) in reader.deserialize::<RawCostRow>().enumerate() {
        let raw = result?;
        let monthly_cost = parse_cost(&raw.monthly_cost).map_err(|e| ParseError::Row {
            row: index + 1,
            source: Box::new(e),
        })?;

        records.push(CostRecord {
            pricing_model: raw.pricing_model,
            category: normalize_category(&raw.category),
            environment: raw.environment,
            monthly_cost,
        });
    }

    debug!("Read {} cost records", records.len());
    Ok(records)
}

/// Parse a cost cell into whole currency units
///
/// **Public** - exposed for callers that build records themselves
///
/// Thousands separators are stripped before parsing. Halves round to the
/// nearest even unit.
///
/// # Errors
/// * `ParseError::InvalidCost` - empty, non-numeric, non-finite, or above `MAX_COST`
/// * `ParseError::NegativeCost` - value below zero
pub fn parse_cost(raw: &str) -> Result<u64, ParseError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();

    let value: f64 = cleaned.parse().map_err(|_| ParseError::InvalidCost {
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(ParseError::InvalidCost {
            value: raw.to_string(),
        });
    }

    let rounded = value.round_ties_even();
    if rounded < 0.0 {
        return Err(ParseError::NegativeCost {
            value: raw.to_string(),
        });
    }

    if rounded > MAX_COST as f64 {
        return Err(ParseError::InvalidCost {
            value: raw.to_string(),
        });
    }

    // `rounded` may be -0.0 here, which casts to 0
    Ok(rounded as u64)
}

/// Apply the fixed category merge
///
/// **Public** - must run before any grouping by category
pub fn normalize_category(category: &str) -> String {
    if ETL_SOURCE_CATEGORIES.contains(&category) {
        ETL_TOOLS_LABEL.to_string()
    } else {
        category.to_string()
    }
}
