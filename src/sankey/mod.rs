//! Sankey flow construction.
//!
//! Turns grouped cost records into three ordered edge lists and resolves
//! node labels through an explicit [`LabelMap`].

pub mod flows;
pub mod labels;

pub use flows::{build_flows, Edge, SankeyFlows};
pub use labels::LabelMap;
