use serde::Serialize;

use crate::compliance::ComplianceReport;
use crate::tree::{Action, ConfigTree, NodeId};

/// Serializable nested view of a configuration node.
#[derive(Debug, Serialize)]
pub struct NodeView {
    /// Raw line, placeholders unexpanded.
    pub line: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeView>,
    pub priority: i32,
    pub action: Action,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeView>,
}

/// One placeholder binding, in declaration order.
#[derive(Debug, Serialize)]
pub struct AttributeView {
    pub name: String,
    pub value: String,
}

#[derive(Serialize)]
struct ReportView {
    intersection: Vec<NodeView>,
    additions: Vec<NodeView>,
    removals: Vec<NodeView>,
    annotated: Vec<NodeView>,
}

/// Format a compliance report as JSON.
pub fn format_json(report: &ComplianceReport) -> String {
    let view = ReportView {
        intersection: tree_view(&report.intersection),
        additions: tree_view(&report.additions),
        removals: tree_view(&report.removals),
        annotated: tree_view(&report.annotated),
    };
    serde_json::to_string_pretty(&view).unwrap_or_else(|_| "{}".to_string())
}

/// Nested views of a tree's top-level sections.
pub fn tree_view(tree: &ConfigTree) -> Vec<NodeView> {
    tree.children(tree.root())
        .iter()
        .map(|&child| node_view(tree, child))
        .collect()
}

fn node_view(tree: &ConfigTree, id: NodeId) -> NodeView {
    NodeView {
        line: tree.raw_line(id).to_string(),
        attributes: tree
            .attributes(id)
            .iter()
            .map(|(name, value)| AttributeView {
                name: name.clone(),
                value: value.clone(),
            })
            .collect(),
        priority: tree.priority(id),
        action: tree.action(id),
        children: tree
            .children(id)
            .iter()
            .map(|&child| node_view(tree, child))
            .collect(),
    }
}
