use regex_lite::Regex;

use crate::tree::{ConfigTree, NodeId};

/// Named structural-equality policies.
///
/// These are the only supported combinations of the underlying matching
/// axes (template matching, resolved-parameter awareness, directionality,
/// subtree depth); ad hoc combinations are deliberately not expressible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Resolved renderings must be identical; no template matching.
    ExactOnly,
    /// One-way template match with every placeholder wildcarded,
    /// regardless of resolution state.
    TemplateDirectional,
    /// Template match in either direction; resolved placeholders stay
    /// literal constraints, unresolved ones wildcard.
    TemplateBidirectional,
    /// Whole-subtree equality: line match per [`TemplateDirectional`]
    /// plus a bijective correspondence between child sets.
    SectionDeep,
}

impl MatchPolicy {
    fn allows_template(self) -> bool {
        !matches!(self, MatchPolicy::ExactOnly)
    }

    fn wildcard_all(self) -> bool {
        matches!(self, MatchPolicy::TemplateDirectional | MatchPolicy::SectionDeep)
    }

    fn bidirectional(self) -> bool {
        matches!(self, MatchPolicy::TemplateBidirectional)
    }
}

/// Structural equality between `a` (pattern side) and `b` under a policy.
pub fn nodes_equal(
    a_tree: &ConfigTree,
    a: NodeId,
    b_tree: &ConfigTree,
    b: NodeId,
    policy: MatchPolicy,
) -> bool {
    if policy == MatchPolicy::SectionDeep {
        section_equal(a_tree, a, b_tree, b)
    } else {
        line_equal(a_tree, a, b_tree, b, policy)
    }
}

/// Index of the first child of `parent` in `haystack` structurally equal
/// to `needle`, scanning in declaration order. The candidate supplies the
/// pattern side of the comparison.
pub fn find_match(
    haystack: &ConfigTree,
    parent: NodeId,
    needle_tree: &ConfigTree,
    needle: NodeId,
    policy: MatchPolicy,
) -> Option<usize> {
    haystack
        .children(parent)
        .iter()
        .position(|&candidate| nodes_equal(haystack, candidate, needle_tree, needle, policy))
}

fn line_equal(
    a_tree: &ConfigTree,
    a: NodeId,
    b_tree: &ConfigTree,
    b: NodeId,
    policy: MatchPolicy,
) -> bool {
    let (Ok(a_resolved), Ok(b_resolved)) = (a_tree.rendered(a), b_tree.rendered(b)) else {
        return false;
    };

    // Two differently-shaped templates can render the same current value;
    // they only count as the same node when their raw lines agree too.
    let same_shape =
        !(a_tree.is_templated(a) && b_tree.is_templated(b)) || a_tree.raw_line(a) == b_tree.raw_line(b);

    if a_resolved == b_resolved {
        return same_shape;
    }
    if !policy.allows_template() {
        return false;
    }

    let wildcard_all = policy.wildcard_all();
    let mut matched = anchored_match(&a_tree.pattern(a, wildcard_all), b_resolved.trim());
    if !matched && policy.bidirectional() {
        matched = anchored_match(&b_tree.pattern(b, wildcard_all), a_resolved.trim());
    }
    matched && same_shape
}

fn section_equal(a_tree: &ConfigTree, a: NodeId, b_tree: &ConfigTree, b: NodeId) -> bool {
    let a_children = a_tree.children(a);
    let b_children = b_tree.children(b);
    if a_children.len() != b_children.len() {
        return false;
    }

    let mut used = vec![false; a_children.len()];
    for &b_child in b_children {
        let claimed = a_children.iter().enumerate().position(|(i, &a_child)| {
            !used[i] && section_equal(a_tree, a_child, b_tree, b_child)
        });
        match claimed {
            Some(i) => used[i] = true,
            None => return false,
        }
    }

    line_equal(a_tree, a, b_tree, b, MatchPolicy::TemplateDirectional)
}

impl ConfigTree {
    /// Whole-tree deep-section equality, root to root.
    pub fn deep_equals(&self, other: &ConfigTree) -> bool {
        nodes_equal(self, self.root(), other, other.root(), MatchPolicy::SectionDeep)
    }
}

fn anchored_match(pattern: &str, text: &str) -> bool {
    // Pattern bodies come from escaped segments, so compilation only
    // fails on pathological inputs; those simply do not match.
    Regex::new(&format!("^{pattern}$"))
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{find_match, nodes_equal, MatchPolicy};
    use crate::tree::ConfigTree;

    fn leaf_tree(line: &str) -> ConfigTree {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        tree.add_child(root, line);
        tree
    }

    fn first(tree: &ConfigTree) -> crate::tree::NodeId {
        tree.children(tree.root())[0]
    }

    #[test]
    fn exact_match_ignores_template_syntax() {
        let a = leaf_tree("no shutdown");
        let b = leaf_tree("no shutdown");
        assert!(nodes_equal(&a, first(&a), &b, first(&b), MatchPolicy::ExactOnly));
    }

    #[test]
    fn template_matches_literal_directionally() {
        let template = leaf_tree("ip address {{ IP }} {{ MASK }}");
        let literal = leaf_tree("ip address 10.0.0.1 255.255.255.0");

        assert!(nodes_equal(
            &template,
            first(&template),
            &literal,
            first(&literal),
            MatchPolicy::TemplateDirectional
        ));
        // Pattern side is the first operand; the literal cannot match the
        // template's rendering one-way.
        assert!(!nodes_equal(
            &literal,
            first(&literal),
            &template,
            first(&template),
            MatchPolicy::TemplateDirectional
        ));
        // Bidirectional accepts either orientation.
        assert!(nodes_equal(
            &literal,
            first(&literal),
            &template,
            first(&template),
            MatchPolicy::TemplateBidirectional
        ));
    }

    #[test]
    fn exact_only_rejects_template_match() {
        let template = leaf_tree("ip address {{ IP }} {{ MASK }}");
        let literal = leaf_tree("ip address 10.0.0.1 255.255.255.0");
        assert!(!nodes_equal(
            &template,
            first(&template),
            &literal,
            first(&literal),
            MatchPolicy::ExactOnly
        ));
    }

    #[test]
    fn same_rendering_different_template_shapes_differ() {
        let mut a = ConfigTree::new();
        let root = a.root();
        let a_node = a.add_child(root, "speed {{ RATE }}");
        a.set_attributes(a_node, vec![("RATE".to_string(), "1000".to_string())]);

        let mut b = ConfigTree::new();
        let root = b.root();
        let b_node = b.add_child(root, "speed {{ SPEED }}");
        b.set_attributes(b_node, vec![("SPEED".to_string(), "1000".to_string())]);

        // Both resolve to "speed 1000" but the raw lines disagree.
        assert!(!nodes_equal(&a, a_node, &b, b_node, MatchPolicy::TemplateBidirectional));
    }

    #[test]
    fn section_deep_requires_bijective_children() {
        let full = crate::parser::parse("interface Vlan10\n ip address 1.1.1.1 255.255.255.0\n no shutdown").unwrap();
        let reordered = crate::parser::parse("interface Vlan10\n no shutdown\n ip address 1.1.1.1 255.255.255.0").unwrap();
        let partial = crate::parser::parse("interface Vlan10\n no shutdown").unwrap();

        assert!(nodes_equal(
            &full,
            first(&full),
            &reordered,
            first(&reordered),
            MatchPolicy::SectionDeep
        ));
        assert!(!nodes_equal(
            &full,
            first(&full),
            &partial,
            first(&partial),
            MatchPolicy::SectionDeep
        ));
    }

    #[test]
    fn find_match_returns_first_structural_hit() {
        let haystack = crate::parser::parse("hostname sw1\nip route 0.0.0.0 0.0.0.0 10.0.0.254").unwrap();
        let needle = leaf_tree("ip route 0.0.0.0 0.0.0.0 10.0.0.254");
        assert_eq!(
            find_match(
                &haystack,
                haystack.root(),
                &needle,
                first(&needle),
                MatchPolicy::TemplateDirectional
            ),
            Some(1)
        );
    }
}
