//! Configuration and constants for the CLI.

/// Default total number of categories in the middle column (including "Others")
pub const DEFAULT_TOP_CATEGORIES: usize = 9;

// Sentinel node labels. These never come from input data.
pub const OTHERS_LABEL: &str = "Others";
pub const TOTAL_MONTHLY_LABEL: &str = "TotalMonthly";

// Fixed category merge applied before any aggregation
pub const ETL_TOOLS_LABEL: &str = "ETL Tools";
pub const ETL_SOURCE_CATEGORIES: &[&str] = &["Azure Data Factory v2", "Azure Synapse Analytics"];

/// Largest accepted cost per record (2^53, the last exactly representable integer in f64)
pub const MAX_COST: u64 = 1 << 53;

/// Built-in label remapping, overlaid by any user-supplied map
pub const DEFAULT_LABEL_OVERRIDES: &[(&str, &str)] = &[
    ("Azure Database for PostgreSQL", "PostgreSQL"),
    ("Azure Cognitive Search", "Azure Search"),
];

// SankeyMATIC template handling
pub const DEFAULT_TEMPLATE_FILE: &str = "sankeymatic_template.txt";
pub const FLOWS_MARKER: &str = "// === Nodes and Flows ===";
pub const TIMESTAMP_PLACEHOLDER: &str = "%GENERATED DATETIME%";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";
pub const OUTPUT_FILE_PREFIX: &str = "sankeymatic_";
