use crate::error::Result;
use crate::matcher::{find_match, nodes_equal, MatchPolicy};
use crate::tree::{Action, ConfigTree, NodeId};

/// Outcome of a three-way comparison between a configuration and a target.
#[derive(Debug)]
pub struct ComplianceReport {
    /// Content present on both sides (target-side nodes).
    pub intersection: ConfigTree,
    /// Present in the target, missing from the configuration.
    pub additions: ConfigTree,
    /// Present in the configuration, missing from the target.
    pub removals: ConfigTree,
    /// The configuration with removals marked `-` and additions merged
    /// in marked `+`.
    pub annotated: ConfigTree,
}

impl ConfigTree {
    /// Compare `self` (the running configuration) against `obj` (the
    /// target) and report what matches, what is missing, and what is
    /// surplus, plus a unified annotated view. Neither operand is
    /// mutated.
    pub fn compliance(&self, obj: &ConfigTree) -> Result<ComplianceReport> {
        let intersection = obj.intersection(self)?;
        let additions = obj.difference(self)?;
        let removals = self.difference(obj)?;

        let mut annotated = self.clone();
        let annotated_root = annotated.root();
        mark_removals(&mut annotated, annotated_root, &removals, removals.root());

        let mut incoming = additions.clone();
        let incoming_root = incoming.root();
        incoming.set_action(incoming_root, Action::Added, true);
        // Boosted priority makes matching leaves adopt the addition's
        // line and marker on merge.
        incoming.set_priority(incoming_root, self.priority(self.root()) + 1, true);
        annotated.merge(incoming, MatchPolicy::TemplateBidirectional)?;

        Ok(ComplianceReport {
            intersection,
            additions,
            removals,
            annotated,
        })
    }
}

/// Mark every subtree wholly contained in `removals` as removed; a
/// partially-affected section stays unmarked and is recursed into.
fn mark_removals(tree: &mut ConfigTree, at: NodeId, removals: &ConfigTree, from: NodeId) {
    let children: Vec<NodeId> = tree.children(at).to_vec();
    for child in children {
        let found = find_match(removals, from, tree, child, MatchPolicy::TemplateBidirectional);
        if let Some(index) = found {
            let removed = removals.children(from)[index];
            if nodes_equal(tree, child, removals, removed, MatchPolicy::SectionDeep) {
                tree.set_action(child, Action::Removed, true);
            } else {
                mark_removals(tree, child, removals, removed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::tree::Action;

    #[test]
    fn reports_missing_target_lines_as_additions() {
        let config = parse("interface Vlan10\n ip address 1.1.1.1 255.255.255.0").unwrap();
        let target = parse("interface Vlan10\n ip address {{ IP }} {{ MASK }}\n no shutdown").unwrap();

        let report = config.compliance(&target).unwrap();

        let expected_additions = parse("interface Vlan10\n no shutdown").unwrap();
        assert!(report.additions.deep_equals(&expected_additions));
        assert!(report.removals.is_empty());

        // The matched (templated) address line lands in the intersection.
        let iface = report.intersection.children(report.intersection.root())[0];
        let addr = report.intersection.children(iface)[0];
        assert_eq!(
            report.intersection.raw_line(addr),
            "ip address {{ IP }} {{ MASK }}"
        );
    }

    #[test]
    fn annotated_view_marks_additions_and_removals() {
        let config = parse("interface Vlan10\n ip address 1.1.1.1 255.255.255.0\nntp server 10.9.9.9").unwrap();
        let target = parse("interface Vlan10\n ip address {{ IP }} {{ MASK }}\n no shutdown").unwrap();

        let report = config.compliance(&target).unwrap();
        let annotated = &report.annotated;
        let root = annotated.root();

        let iface = annotated.children(root)[0];
        assert_eq!(annotated.action(iface), Action::None);

        let addr = annotated.children(iface)[0];
        assert_eq!(annotated.raw_line(addr), "ip address 1.1.1.1 255.255.255.0");
        assert_eq!(annotated.action(addr), Action::None);

        let shutdown = annotated.children(iface)[1];
        assert_eq!(annotated.rendered(shutdown).unwrap(), "no shutdown");
        assert_eq!(annotated.action(shutdown), Action::Added);

        // The surplus ntp section is wholly absent from the target.
        let ntp = annotated.children(root)[1];
        assert_eq!(annotated.action(ntp), Action::Removed);
    }
}
