//! Cost totals per category, in first-encountered order.
//!
//! Encounter order matters: it is the tie-break for every cost-descending
//! sort downstream, which keeps output deterministic.

use crate::parser::schema::{CostRecord, PricingModel};
use log::{debug, warn};
use std::collections::HashMap;

/// Ordered `name -> total` accumulator
///
/// **Public** - used for category totals here and environment totals in the flow builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedTotals {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl OrderedTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `name`, registering it on first sight
    ///
    /// Totals saturate at `u64::MAX` instead of wrapping.
    pub fn add(&mut self, name: &str, amount: u64) {
        match self.index.get(name) {
            Some(&i) => {
                let total = &mut self.entries[i].1;
                *total = total.checked_add(amount).unwrap_or_else(|| {
                    warn!("Cost total for '{}' overflowed; clamping to {}", name, u64::MAX);
                    u64::MAX
                });
            }
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), amount));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-encountered order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, total)| (name.as_str(), *total))
    }

    /// Entries sorted by total, descending
    ///
    /// The sort is stable, so equal totals keep first-encountered order.
    pub fn sorted_desc(&self) -> Vec<(&str, u64)> {
        let mut sorted: Vec<(&str, u64)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// Sum of all totals, saturating at `u64::MAX`
    pub fn sum(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, (_, total)| acc.saturating_add(*total))
    }
}

/// Total cost per category
///
/// **Public** - step 1 of category selection
pub fn category_totals(records: &[CostRecord]) -> OrderedTotals {
    let mut totals = OrderedTotals::new();
    for record in records {
        totals.add(&record.category, record.monthly_cost);
    }

    debug!("{} distinct categories across {} records", totals.len(), records.len());
    totals
}

/// Categories with at least one Reservation record, in first-encountered order
///
/// **Public** - step 2 of category selection; these are always shown individually
pub fn reservation_categories(records: &[CostRecord]) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for record in records {
        if record.is_priced_as(PricingModel::Reservation) && !seen.contains(&record.category) {
            seen.push(record.category.clone());
        }
    }
    seen
}
