use crate::error::Result;
use crate::matcher::{find_match, MatchPolicy};
use crate::tree::{ConfigTree, NodeId};

impl ConfigTree {
    /// Content common to `self` and `obj`, as a fresh tree.
    ///
    /// Matching is bidirectional, so a template line and the literal
    /// line it describes intersect; the collected nodes come from the
    /// `self` side. Neither operand is mutated.
    pub fn intersection(&self, obj: &ConfigTree) -> Result<ConfigTree> {
        let mut scratch = self.clone();
        let scratch_root = scratch.root();
        let mut collected = Vec::new();
        collect_common(&mut scratch, scratch_root, obj, obj.root(), &mut collected);

        let mut out = ConfigTree::with_priority(self.priority(self.root()));
        for path in collected {
            out.merge(path, MatchPolicy::ExactOnly)?;
        }
        Ok(out)
    }

    /// Content of `self` not present in `obj`, as a fresh tree. Neither
    /// operand is mutated.
    pub fn difference(&self, obj: &ConfigTree) -> Result<ConfigTree> {
        let mut remainder = self.clone();
        let common = remainder.intersection(obj)?;
        remainder.delete(common, MatchPolicy::TemplateBidirectional);
        Ok(remainder)
    }
}

/// Walk `obj`'s children, claiming at most one structural counterpart per
/// entry from the scratch copy (claimed nodes are detached so they cannot
/// match twice at the same level). Each claimed node is collected as a
/// childless ancestor-path tree; sections recurse before being claimed.
fn collect_common(
    scratch: &mut ConfigTree,
    at: NodeId,
    obj: &ConfigTree,
    from: NodeId,
    out: &mut Vec<ConfigTree>,
) {
    for &obj_child in obj.children(from) {
        let found = find_match(scratch, at, obj, obj_child, MatchPolicy::TemplateBidirectional);
        if let Some(index) = found {
            let target = scratch.children(at)[index];
            if !obj.is_leaf(obj_child) {
                collect_common(scratch, target, obj, obj_child, out);
            }
            out.push(scratch.copy_path(target, false));
            scratch.detach(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;

    #[test]
    fn intersection_is_commutative_for_literal_trees() {
        let a = parse("interface Vlan10\n no shutdown\n ip address 1.1.1.1 255.255.255.0\nhostname sw1").unwrap();
        let b = parse("interface Vlan10\n no shutdown\nntp server 10.0.0.5").unwrap();

        let ab = a.intersection(&b).unwrap();
        let ba = b.intersection(&a).unwrap();

        let expected = parse("interface Vlan10\n no shutdown").unwrap();
        assert!(ab.deep_equals(&expected));
        assert!(ab.deep_equals(&ba));
    }

    #[test]
    fn difference_and_intersection_cover_the_operand() {
        let a = parse("interface Vlan10\n no shutdown\n ip address 1.1.1.1 255.255.255.0\nhostname sw1").unwrap();
        let b = parse("interface Vlan10\n no shutdown\nntp server 10.0.0.5").unwrap();

        let mut rebuilt = a.difference(&b).unwrap();
        rebuilt
            .merge(a.intersection(&b).unwrap(), crate::matcher::MatchPolicy::TemplateDirectional)
            .unwrap();

        assert!(rebuilt.deep_equals(&a));
    }

    #[test]
    fn repeated_siblings_are_claimed_once_each() {
        let a = parse("ip route 0.0.0.0 0.0.0.0 10.0.0.1\nip route 0.0.0.0 0.0.0.0 10.0.0.1").unwrap();
        let b = parse("ip route 0.0.0.0 0.0.0.0 10.0.0.1").unwrap();

        // One entry in b claims exactly one of a's duplicates.
        let common = a.intersection(&b).unwrap();
        assert_eq!(common.len(), 1);

        let rest = a.difference(&b).unwrap();
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn pure_operations_leave_operands_intact() {
        let a = parse("interface Vlan10\n no shutdown").unwrap();
        let b = parse("interface Vlan10\n no shutdown").unwrap();
        let before = a.clone();

        let _ = a.intersection(&b).unwrap();
        let _ = a.difference(&b).unwrap();

        assert!(a.deep_equals(&before));
        assert!(b.deep_equals(&before));
    }
}
