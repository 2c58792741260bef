//! Category aggregation and selection.
//!
//! This module transforms normalized cost records into:
//! - Per-category cost totals (first-encountered order)
//! - The retained category set (everything else becomes "Others")
//! - Grouped records tagged with their reported category

pub mod selection;
pub mod totals;

// Re-export main types and functions
pub use selection::{aggregate, group_records, select_categories, Aggregation, GroupedRecord, RetainedCategories};
pub use totals::{category_totals, reservation_categories, OrderedTotals};
