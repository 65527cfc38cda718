use serde::Serialize;

use crate::error::Result;
use crate::line::LineTemplate;

/// Default conflict-resolution priority for freshly built nodes.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Stable handle to a node inside a [`ConfigTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Per-node annotation marker used by compliance output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Not annotated.
    #[default]
    None,
    /// Present in the comparison target but not the source.
    Added,
    /// Present in the source but not the comparison target.
    Removed,
}

impl Action {
    /// Single-character marker used when serializing annotated trees.
    pub fn marker(self) -> &'static str {
        match self {
            Action::None => " ",
            Action::Added => "+",
            Action::Removed => "-",
        }
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    line: LineTemplate,
    attrs: Vec<(String, String)>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    priority: i32,
    action: Action,
}

impl NodeData {
    fn new(line: LineTemplate, parent: Option<NodeId>, priority: i32) -> Self {
        let attrs = line
            .placeholder_names()
            .iter()
            .map(|name| (name.to_string(), name.to_string()))
            .collect();
        Self {
            line,
            attrs,
            children: Vec::new(),
            parent,
            priority,
            action: Action::None,
        }
    }
}

/// An arena of configuration nodes rooted at a synthetic empty line.
///
/// Nodes are addressed by [`NodeId`]; a node owns the list of its child
/// ids and keeps a non-owning parent id, so detaching a subtree is a
/// handle removal rather than pointer surgery. Detached slots become
/// unreachable and are dropped by the compacting [`Clone`] impl.
#[derive(Debug)]
pub struct ConfigTree {
    nodes: Vec<NodeData>,
}

impl ConfigTree {
    const ROOT: NodeId = NodeId(0);

    /// Empty tree with the default root priority.
    pub fn new() -> Self {
        Self::with_priority(DEFAULT_PRIORITY)
    }

    /// Empty tree whose root (and therefore every parsed node) carries
    /// the given priority.
    pub fn with_priority(priority: i32) -> Self {
        Self {
            nodes: vec![NodeData::new(LineTemplate::parse(""), None, priority)],
        }
    }

    /// Handle of the synthetic root node.
    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// Child handles of `id`, in declaration order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent handle, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The node's raw line, placeholders unexpanded.
    pub fn raw_line(&self, id: NodeId) -> &str {
        self.nodes[id.0].line.raw()
    }

    /// The node's tokenized line.
    pub fn line(&self, id: NodeId) -> &LineTemplate {
        &self.nodes[id.0].line
    }

    /// Ordered placeholder-name/value pairs; empty for literal nodes.
    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        &self.nodes[id.0].attrs
    }

    /// True if the node carries placeholder attributes.
    pub fn is_templated(&self, id: NodeId) -> bool {
        !self.nodes[id.0].attrs.is_empty()
    }

    pub fn priority(&self, id: NodeId) -> i32 {
        self.nodes[id.0].priority
    }

    pub fn action(&self, id: NodeId) -> Action {
        self.nodes[id.0].action
    }

    /// True if the node has no children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].children.is_empty()
    }

    /// Resolved rendering of the node's line.
    pub fn rendered(&self, id: NodeId) -> Result<String> {
        let node = &self.nodes[id.0];
        node.line.resolved(&node.attrs)
    }

    /// Unanchored matching pattern for the node's line (see
    /// [`LineTemplate::pattern`]).
    pub fn pattern(&self, id: NodeId, wildcard_all: bool) -> String {
        let node = &self.nodes[id.0];
        node.line.pattern(&node.attrs, wildcard_all)
    }

    /// Append a new child built from a raw line. Placeholders found in the
    /// line seed unresolved attributes; priority is inherited from the
    /// parent.
    pub fn add_child(&mut self, parent: NodeId, line: &str) -> NodeId {
        let priority = self.nodes[parent.0].priority;
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(NodeData::new(LineTemplate::parse(line), Some(parent), priority));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Set the node's annotation marker, recursively when `deep`.
    pub fn set_action(&mut self, id: NodeId, action: Action, deep: bool) {
        self.nodes[id.0].action = action;
        if deep {
            let children = self.nodes[id.0].children.clone();
            for child in children {
                self.set_action(child, action, true);
            }
        }
    }

    /// Set the node's priority, recursively when `deep`.
    pub fn set_priority(&mut self, id: NodeId, priority: i32, deep: bool) {
        self.nodes[id.0].priority = priority;
        if deep {
            let children = self.nodes[id.0].children.clone();
            for child in children {
                self.set_priority(child, priority, true);
            }
        }
    }

    /// Number of reachable nodes, the root excluded.
    pub fn len(&self) -> usize {
        self.count_subtree(Self::ROOT) - 1
    }

    /// True if the root has no children.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    fn count_subtree(&self, id: NodeId) -> usize {
        1 + self
            .children(id)
            .iter()
            .map(|&child| self.count_subtree(child))
            .sum::<usize>()
    }

    pub(crate) fn set_line(&mut self, id: NodeId, line: LineTemplate) {
        self.nodes[id.0].line = line;
    }

    pub(crate) fn set_attributes(&mut self, id: NodeId, attrs: Vec<(String, String)>) {
        self.nodes[id.0].attrs = attrs;
    }

    /// Remove `id` from its parent's child list; the subtree below it
    /// stays intact but becomes unreachable from the root.
    pub(crate) fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != id);
        }
    }

    /// Copy one node (no children) from `src` under `parent`.
    pub(crate) fn add_copy(&mut self, parent: NodeId, src: &ConfigTree, node: NodeId) -> NodeId {
        let data = &src.nodes[node.0];
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            line: data.line.clone(),
            attrs: data.attrs.clone(),
            children: Vec::new(),
            parent: Some(parent),
            priority: data.priority,
            action: data.action,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Deep-copy the subtree rooted at `node` from `src` under `parent`.
    pub(crate) fn adopt_subtree(&mut self, parent: NodeId, src: &ConfigTree, node: NodeId) -> NodeId {
        let id = self.add_copy(parent, src, node);
        for &child in src.children(node) {
            self.adopt_subtree(id, src, child);
        }
        id
    }

    /// Deep-copy the subtree rooted at `node` under position `index` of
    /// `parent`'s child list.
    pub(crate) fn adopt_subtree_at(
        &mut self,
        parent: NodeId,
        index: usize,
        src: &ConfigTree,
        node: NodeId,
    ) -> NodeId {
        let id = self.adopt_subtree(parent, src, node);
        let last = self.nodes[parent.0].children.pop().unwrap_or(id);
        self.nodes[parent.0].children.insert(index, last);
        id
    }

    /// Copy `node` together with its ancestor chain into a fresh tree;
    /// ancestors arrive childless apart from the path itself, and the
    /// node's own descendants come along only when `with_children`.
    pub fn copy_path(&self, node: NodeId, with_children: bool) -> ConfigTree {
        let mut out = ConfigTree::with_priority(self.nodes[0].priority);

        let mut chain = Vec::new();
        let mut cursor = self.parent(node);
        while let Some(ancestor) = cursor {
            if ancestor == Self::ROOT {
                break;
            }
            chain.push(ancestor);
            cursor = self.parent(ancestor);
        }
        chain.reverse();

        let mut at = out.root();
        for &ancestor in &chain {
            at = out.add_copy(at, self, ancestor);
        }
        if with_children {
            out.adopt_subtree(at, self, node);
        } else {
            out.add_copy(at, self, node);
        }
        out
    }
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ConfigTree {
    /// Compacting deep copy: only nodes reachable from the root survive,
    /// with attribute order, priority, and action preserved.
    fn clone(&self) -> Self {
        let mut out = ConfigTree::with_priority(self.nodes[0].priority);
        out.nodes[0].action = self.nodes[0].action;
        let root = out.root();
        for &child in self.children(self.root()) {
            out.adopt_subtree(root, self, child);
        }
        out
    }
}
