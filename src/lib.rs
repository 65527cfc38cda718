//! Indentation-structured configuration trees and their structural
//! algebra: merge, replace, delete, search, intersection, difference,
//! and three-way compliance comparison, with `{{ NAME }}` line
//! templating and parameter inference.

pub mod compliance;
pub mod error;
pub mod format;
pub mod infer;
pub mod line;
pub mod matcher;
mod ops;
pub mod parser;
pub mod tree;
pub mod writer;

pub use compliance::ComplianceReport;
pub use error::{Error, Result};
pub use format::{format_json, format_summary, format_text};
pub use infer::infer_attributes;
pub use line::{LineTemplate, LineToken};
pub use matcher::{find_match, nodes_equal, MatchPolicy};
pub use parser::{parse, parse_with, ParseOptions};
pub use tree::{Action, ConfigTree, NodeId, DEFAULT_PRIORITY};
pub use writer::{write_text, WriteOptions};
