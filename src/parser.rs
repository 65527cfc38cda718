use crate::error::{Error, Result};
use crate::tree::{ConfigTree, NodeId, DEFAULT_PRIORITY};

/// Configures how indentation text is turned into a tree.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Section heads equal to an entry are dropped with their whole block.
    pub skip_exact: Vec<String>,
    /// Section heads beginning with an entry are dropped with their whole
    /// block (banner/certificate residue the preprocessor missed).
    pub skip_prefixes: Vec<String>,
    /// Priority stamped on every built node.
    pub priority: i32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            skip_exact: vec![
                "!".to_string(),
                "end".to_string(),
                "exit-address-family".to_string(),
            ],
            skip_prefixes: Vec::new(),
            priority: DEFAULT_PRIORITY,
        }
    }
}

impl ParseOptions {
    fn skips(&self, head: &str) -> bool {
        self.skip_exact.iter().any(|entry| head == entry)
            || self.skip_prefixes.iter().any(|p| head.starts_with(p.as_str()))
    }
}

/// Parse sanitized configuration text with default options.
pub fn parse(text: &str) -> Result<ConfigTree> {
    parse_with(text, &ParseOptions::default())
}

/// Parse sanitized configuration text into a [`ConfigTree`].
pub fn parse_with(text: &str, opts: &ParseOptions) -> Result<ConfigTree> {
    let mut tree = ConfigTree::with_priority(opts.priority);
    let root = tree.root();
    build_into(&mut tree, root, text.trim(), opts)?;
    Ok(tree)
}

/// Parse `text` and graft the result under `parent`.
pub fn build_into(
    tree: &mut ConfigTree,
    parent: NodeId,
    text: &str,
    opts: &ParseOptions,
) -> Result<()> {
    for section in split_sections(text) {
        build_section(tree, parent, &section, opts)?;
    }
    Ok(())
}

fn build_section(
    tree: &mut ConfigTree,
    parent: NodeId,
    section: &[&str],
    opts: &ParseOptions,
) -> Result<()> {
    let Some((&head, rest)) = section.split_first() else {
        return Ok(());
    };
    if opts.skips(head) {
        return Ok(());
    }
    let child = tree.add_child(parent, head.trim());
    if rest.is_empty() {
        return Ok(());
    }

    let indent = leading_whitespace(rest[0]);
    if indent.is_empty() {
        return Err(Error::Indentation {
            head: head.trim().to_string(),
        });
    }

    let mut sub_lines = Vec::with_capacity(rest.len());
    for &line in rest {
        // Only a matching prefix is stripped; deeper-indented lines keep
        // their surplus so nested sections survive.
        let stripped = line.strip_prefix(indent).unwrap_or(line);
        if !stripped.trim().is_empty() {
            sub_lines.push(stripped);
        }
    }
    build_into(tree, child, &sub_lines.join("\n"), opts)
}

/// Split text into sections: a new section begins at every line whose
/// first character is non-whitespace.
fn split_sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections: Vec<Vec<&str>> = Vec::new();
    for line in text.lines() {
        let starts_section = line.chars().next().is_some_and(|c| !c.is_whitespace());
        if starts_section || sections.is_empty() {
            sections.push(vec![line]);
        } else if let Some(current) = sections.last_mut() {
            current.push(line);
        }
    }
    sections
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(line.len());
    &line[..end]
}
