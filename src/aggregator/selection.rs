//! Decide which categories are shown individually.
//!
//! Categories that do not make the cut are folded into a single "Others"
//! bucket. Reservation categories are never folded, even when that pushes
//! the category count past the configured cap.

use super::totals::{category_totals, reservation_categories, OrderedTotals};
use crate::parser::schema::CostRecord;
use crate::utils::config::OTHERS_LABEL;
use crate::utils::error::ConfigError;
use log::{debug, info};
use std::collections::HashSet;

/// Categories reported individually
///
/// **Public** - derived once per run by `select_categories`, immutable afterward
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetainedCategories {
    /// Retained names in first-encountered order
    names: Vec<String>,
    lookup: HashSet<String>,
    /// Whether any category was folded into "Others"
    has_others: bool,
}

impl RetainedCategories {
    fn from_names(names: Vec<String>, has_others: bool) -> Self {
        let lookup = names.iter().cloned().collect();
        Self {
            names,
            lookup,
            has_others,
        }
    }

    pub fn contains(&self, category: &str) -> bool {
        self.lookup.contains(category)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn has_others(&self) -> bool {
        self.has_others
    }

    /// The label a record of `category` is reported under
    pub fn group_of<'a>(&self, category: &'a str) -> &'a str {
        if self.contains(category) {
            category
        } else {
            OTHERS_LABEL
        }
    }
}

/// A cost record tagged with the category it is reported under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedRecord {
    pub record: CostRecord,

    /// The record's own category if retained, otherwise "Others"
    pub grouped_category: String,
}

/// Output of the aggregation stage
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub retained: RetainedCategories,
    pub grouped: Vec<GroupedRecord>,
}

/// Select the retained category set
///
/// **Public** - main entry point for category selection
///
/// # Arguments
/// * `records` - Normalized cost records
/// * `top_categories` - Total categories to show, including the "Others" slot
///
/// # Returns
/// The retained set. With at most `top_categories` distinct categories
/// everything is retained and no "Others" bucket exists.
///
/// # Errors
/// * `ConfigError::InvalidTopCategories` - `top_categories` is 0
pub fn select_categories(
    records: &[CostRecord],
    top_categories: usize,
) -> Result<RetainedCategories, ConfigError> {
    if top_categories < 1 {
        return Err(ConfigError::InvalidTopCategories(top_categories));
    }

    let totals = category_totals(records);

    if totals.len() <= top_categories {
        debug!("{} categories fit within cap of {}", totals.len(), top_categories);
        let names = totals.iter().map(|(name, _)| name.to_string()).collect();
        return Ok(RetainedCategories::from_names(names, false));
    }

    // One slot goes to "Others"
    let slots = top_categories - 1;
    let mandatory = reservation_categories(records);

    let keep: HashSet<String> = if mandatory.len() >= slots {
        if mandatory.len() > slots {
            info!(
                "{} reservation categories exceed the {} available slots; keeping all of them",
                mandatory.len(),
                slots
            );
        }
        mandatory.into_iter().collect()
    } else {
        let fillers = top_fillers(&totals, &mandatory, slots - mandatory.len());
        mandatory.into_iter().chain(fillers).collect()
    };

    // Re-walk totals so the retained list is in first-encountered order
    let names: Vec<String> = totals
        .iter()
        .filter(|(name, _)| keep.contains(*name))
        .map(|(name, _)| name.to_string())
        .collect();

    info!(
        "Retained {} of {} categories; {} folded into {}",
        names.len(),
        totals.len(),
        totals.len() - names.len(),
        OTHERS_LABEL
    );

    let has_others = names.len() < totals.len();
    Ok(RetainedCategories::from_names(names, has_others))
}

/// Highest-cost non-mandatory categories
///
/// **Private** - ties resolve to first-encountered order via the stable sort
fn top_fillers(totals: &OrderedTotals, mandatory: &[String], count: usize) -> Vec<String> {
    totals
        .sorted_desc()
        .into_iter()
        .filter(|(name, _)| !mandatory.iter().any(|m| m == name))
        .take(count)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Tag every record with its reported category
///
/// **Public** - records keep their input order
pub fn group_records(records: &[CostRecord], retained: &RetainedCategories) -> Vec<GroupedRecord> {
    records
        .iter()
        .map(|record| GroupedRecord {
            grouped_category: retained.group_of(&record.category).to_string(),
            record: record.clone(),
        })
        .collect()
}

/// Run category selection and grouping in one go
///
/// **Public** - convenience wrapper used by the generate command
pub fn aggregate(records: &[CostRecord], top_categories: usize) -> Result<Aggregation, ConfigError> {
    let retained = select_categories(records, top_categories)?;
    let grouped = group_records(records, &retained);
    Ok(Aggregation { retained, grouped })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(model: &str, category: &str, cost: u64) -> CostRecord {
        CostRecord::new(model, category, "prod", cost)
    }

    #[test]
    fn test_zero_cap_is_rejected() {
        let records = vec![rec("OnDemand", "A", 1)];
        assert!(matches!(
            select_categories(&records, 0),
            Err(ConfigError::InvalidTopCategories(0))
        ));
    }

    #[test]
    fn test_empty_input_is_valid() {
        let agg = aggregate(&[], 9).unwrap();
        assert!(agg.retained.is_empty());
        assert!(!agg.retained.has_others());
        assert!(agg.grouped.is_empty());
    }

    #[test]
    fn test_under_cap_keeps_everything() {
        let records = vec![rec("OnDemand", "A", 1), rec("OnDemand", "B", 2)];
        let retained = select_categories(&records, 2).unwrap();

        assert_eq!(retained.names(), &["A".to_string(), "B".to_string()]);
        assert!(!retained.has_others());
    }

    #[test]
    fn test_fillers_by_cost() {
        let records = vec![
            rec("OnDemand", "A", 10),
            rec("OnDemand", "B", 40),
            rec("OnDemand", "C", 30),
            rec("OnDemand", "D", 20),
        ];
        // 3 total slots: 2 named + Others
        let retained = select_categories(&records, 3).unwrap();

        assert_eq!(retained.names(), &["B".to_string(), "C".to_string()]);
        assert!(retained.has_others());
        assert_eq!(retained.group_of("A"), OTHERS_LABEL);
        assert_eq!(retained.group_of("B"), "B");
    }

    #[test]
    fn test_filler_ties_use_first_seen() {
        let records = vec![
            rec("OnDemand", "A", 10),
            rec("OnDemand", "B", 20),
            rec("OnDemand", "C", 20),
            rec("OnDemand", "D", 5),
        ];
        let retained = select_categories(&records, 2).unwrap();
        assert_eq!(retained.names(), &["B".to_string()]);
    }

    #[test]
    fn test_mandatory_overflow_keeps_only_reservations() {
        let records = vec![
            rec("OnDemand", "Big", 1000),
            rec("Reservation", "R1", 1),
            rec("Reservation", "R2", 2),
            rec("Reservation", "R3", 3),
            rec("OnDemand", "Mid", 500),
        ];
        // slots = 1, mandatory = 3: soft cap overshoot
        let retained = select_categories(&records, 2).unwrap();

        assert_eq!(
            retained.names(),
            &["R1".to_string(), "R2".to_string(), "R3".to_string()]
        );
        assert!(!retained.contains("Big"));
        assert!(retained.has_others());
    }

    #[test]
    fn test_cap_of_one_keeps_mandatory_only() {
        let records = vec![rec("OnDemand", "A", 10), rec("OnDemand", "B", 10)];
        let retained = select_categories(&records, 1).unwrap();

        assert!(retained.is_empty());
        assert!(retained.has_others());
    }

    #[test]
    fn test_group_records_tags_others() {
        let records = vec![
            rec("OnDemand", "A", 10),
            rec("OnDemand", "B", 1),
            rec("OnDemand", "C", 1),
        ];
        let agg = aggregate(&records, 2).unwrap();
        let groups: Vec<&str> = agg.grouped.iter().map(|g| g.grouped_category.as_str()).collect();

        assert_eq!(groups, vec!["A", "Others", "Others"]);
        assert_eq!(agg.grouped[1].record.category, "B");
    }
}
