use crate::matcher::{find_match, MatchPolicy};
use crate::tree::{ConfigTree, NodeId};

impl ConfigTree {
    /// Remove `obj`'s content from `self`, consuming `obj`.
    ///
    /// A matched counterpart is removed when the deletion node is a leaf
    /// (whole-line deletion) or when recursion into a deletion section
    /// leaves the counterpart childless; a partially-deleted section with
    /// surviving children stays in place.
    ///
    /// The conventional policy is [`MatchPolicy::TemplateBidirectional`].
    pub fn delete(&mut self, obj: ConfigTree, policy: MatchPolicy) {
        let root = self.root();
        self.delete_at(root, &obj, obj.root(), policy);
    }

    fn delete_at(&mut self, at: NodeId, obj: &ConfigTree, from: NodeId, policy: MatchPolicy) {
        for &obj_child in obj.children(from) {
            if let Some(index) = find_match(self, at, obj, obj_child, policy) {
                let target = self.children(at)[index];
                if !obj.is_leaf(obj_child) {
                    self.delete_at(target, obj, obj_child, policy);
                }
                if obj.is_leaf(obj_child) || self.is_leaf(target) {
                    self.detach(target);
                }
            }
        }
    }
}
