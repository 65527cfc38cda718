use crate::error::Result;
use crate::infer::infer_attributes;
use crate::matcher::{find_match, nodes_equal, MatchPolicy};
use crate::tree::{ConfigTree, NodeId};

impl ConfigTree {
    /// Merge `obj` into `self`, consuming it.
    ///
    /// Children of `obj` without a structural counterpart are spliced in;
    /// matched sections merge recursively. When two matching leaves
    /// disagree, the higher priority wins: the receiver adopts the other
    /// side's line, attributes, priority, and action. A literal incoming
    /// leaf first has its parameter values inferred against the
    /// receiver's template so resolution is never lost.
    ///
    /// The conventional policy is [`MatchPolicy::TemplateDirectional`].
    pub fn merge(&mut self, obj: ConfigTree, policy: MatchPolicy) -> Result<()> {
        let root = self.root();
        let obj_root = obj.root();
        self.merge_at(root, &obj, obj_root, policy)
    }

    fn merge_at(
        &mut self,
        at: NodeId,
        obj: &ConfigTree,
        from: NodeId,
        policy: MatchPolicy,
    ) -> Result<()> {
        if self.is_leaf(at)
            && obj.is_leaf(from)
            && self.priority(at) < obj.priority(from)
            && nodes_equal(self, at, obj, from, policy)
        {
            if !obj.is_templated(from) && self.is_templated(at) {
                let template = self.line(at).clone();
                let attrs = infer_attributes(obj.raw_line(from), &template)?;
                self.set_attributes(at, attrs);
            } else {
                self.set_line(at, obj.line(from).clone());
                self.set_attributes(at, obj.attributes(from).to_vec());
            }
            self.set_priority(at, obj.priority(from), false);
            self.set_action(at, obj.action(from), false);
        }

        for &obj_child in obj.children(from) {
            match find_match(self, at, obj, obj_child, policy) {
                None => {
                    self.adopt_subtree(at, obj, obj_child);
                }
                Some(index) => {
                    let target = self.children(at)[index];
                    self.merge_at(target, obj, obj_child, policy)?;
                }
            }
        }
        Ok(())
    }

    /// Replace matching top-level sections of `self` with `obj`'s
    /// subtrees, consuming `obj`. No recursive merging: a match discards
    /// the receiver's subtree entirely and takes the replacement at the
    /// same position.
    ///
    /// The conventional policy is [`MatchPolicy::TemplateBidirectional`].
    pub fn replace(&mut self, obj: ConfigTree, policy: MatchPolicy) {
        let root = self.root();
        for &obj_child in obj.children(obj.root()) {
            if let Some(index) = find_match(self, root, &obj, obj_child, policy) {
                let target = self.children(root)[index];
                self.detach(target);
                self.adopt_subtree_at(root, index, &obj, obj_child);
            }
        }
    }

    /// Bind a parameterized template tree to this literal tree,
    /// consuming the template.
    ///
    /// Each matched node takes the template's line, infers its attribute
    /// values from its own raw line, and recurses; a template node binds
    /// at most once per level.
    pub fn assign_template(&mut self, mut template: ConfigTree) -> Result<()> {
        let root = self.root();
        let template_root = template.root();
        self.assign_at(root, &mut template, template_root)
    }

    fn assign_at(
        &mut self,
        at: NodeId,
        template: &mut ConfigTree,
        from: NodeId,
    ) -> Result<()> {
        let children: Vec<NodeId> = self.children(at).to_vec();
        for child in children {
            let found = find_match(
                template,
                from,
                self,
                child,
                MatchPolicy::TemplateBidirectional,
            );
            if let Some(index) = found {
                let template_child = template.children(from)[index];
                let template_line = template.line(template_child).clone();
                let attrs = infer_attributes(self.raw_line(child), &template_line)?;
                self.set_line(child, template_line);
                self.set_attributes(child, attrs);
                self.assign_at(child, template, template_child)?;
                template.detach(template_child);
            }
        }
        Ok(())
    }
}
