use regex_lite::Regex;

use crate::error::Result;
use crate::matcher::MatchPolicy;
use crate::tree::{ConfigTree, NodeId};

impl ConfigTree {
    /// Collect every node whose line matches `pattern` into a fresh tree,
    /// each hit carrying its reconstructed ancestor chain.
    ///
    /// `raw` tests the unresolved line instead of the resolved rendering;
    /// `with_children` captures a hit's whole subtree and keeps descending
    /// below it, so nested hits can surface again as separate results —
    /// the merged output may contain overlapping sections.
    pub fn search(&self, pattern: &str, with_children: bool, raw: bool) -> Result<ConfigTree> {
        let regex = Regex::new(pattern.trim())?;
        let mut hits = Vec::new();
        self.collect_hits(self.root(), &regex, with_children, raw, &mut hits)?;

        let mut out = ConfigTree::with_priority(self.priority(self.root()));
        for hit in hits {
            out.merge(hit, MatchPolicy::TemplateDirectional)?;
        }
        Ok(out)
    }

    fn collect_hits(
        &self,
        at: NodeId,
        regex: &Regex,
        with_children: bool,
        raw: bool,
        hits: &mut Vec<ConfigTree>,
    ) -> Result<()> {
        for &child in self.children(at) {
            let line = if raw {
                self.raw_line(child).trim().to_string()
            } else {
                self.rendered(child)?.trim().to_string()
            };
            let hit = regex.is_match(&line);
            if hit {
                hits.push(self.copy_path(child, with_children));
            }
            if !self.is_leaf(child) && (!hit || with_children) {
                self.collect_hits(child, regex, with_children, raw, hits)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::parser::parse;

    #[test]
    fn search_keeps_ancestor_chain() {
        let config = parse(
            "interface Vlan10\n ip address 1.1.1.1 255.255.255.0\ninterface Vlan20\n no shutdown",
        )
        .unwrap();

        let found = config.search("address", false, false).unwrap();

        let expected = parse("interface Vlan10\n ip address 1.1.1.1 255.255.255.0").unwrap();
        assert!(found.deep_equals(&expected));
    }

    #[test]
    fn raw_search_sees_placeholders() {
        let config = parse("interface Vlan10\n ip address {{ IP }} {{ MASK }}").unwrap();

        assert!(!config.search(r"\{\{ IP \}\}", false, true).unwrap().is_empty());
        assert!(config.search(r"\{\{ IP \}\}", false, false).unwrap().is_empty());
    }

    #[test]
    fn section_match_without_children_still_descends() {
        let config = parse("interface Vlan10\n ip address 1.1.1.1 255.255.255.0").unwrap();

        // The section head matches; with_children=false captures only the
        // head line, and descent continues below it.
        let found = config.search("Vlan10", false, false).unwrap();
        assert_eq!(found.len(), 1);

        let full = config.search("Vlan10", true, false).unwrap();
        assert!(full.deep_equals(&config));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let config = parse("hostname sw1").unwrap();
        assert!(matches!(
            config.search("(unclosed", false, false),
            Err(Error::Pattern(_))
        ));
    }
}
