//! SankeyMATIC text serializer.
//!
//! Format: one `"<source> [<weight>] <target>"` line per edge, with a blank
//! line after the pricing stage. Category and environment stages are
//! contiguous.

use crate::sankey::SankeyFlows;

/// Render flows as SankeyMATIC input text
///
/// **Public** - main entry point for text output
///
/// Lines are joined with `\n` and there is no trailing newline. Empty flows
/// render as an empty string.
pub fn render_flows(flows: &SankeyFlows) -> String {
    if flows.is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = flows.pricing.iter().map(ToString::to_string).collect();
    lines.push(String::new());
    lines.extend(flows.categories.iter().map(ToString::to_string));
    lines.extend(flows.environments.iter().map(ToString::to_string));

    lines.join("\n")
}
