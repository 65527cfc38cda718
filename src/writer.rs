use std::fmt::{self, Display, Formatter};

use crate::error::Result;
use crate::tree::{Action, ConfigTree, NodeId};

/// Configures tree-to-text serialization.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Indentation unit repeated per nesting level.
    pub indent: String,
    /// Print raw lines (with their attribute maps) instead of resolved
    /// renderings.
    pub raw: bool,
    /// Prefix every line with its action marker; without this, only
    /// `+`/`-` markers appear.
    pub annotate: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: " ".to_string(),
            raw: false,
            annotate: false,
        }
    }
}

/// Serialize a tree back to indentation-structured text. The root
/// contributes no line of its own.
pub fn write_text(tree: &ConfigTree, opts: &WriteOptions) -> Result<String> {
    let mut lines = Vec::new();
    for &child in tree.children(tree.root()) {
        write_node(tree, child, 0, opts, &mut lines)?;
    }
    Ok(lines.join("\n"))
}

fn write_node(
    tree: &ConfigTree,
    id: NodeId,
    depth: usize,
    opts: &WriteOptions,
    lines: &mut Vec<String>,
) -> Result<()> {
    let marker = match tree.action(id) {
        Action::None if !opts.annotate => "",
        action => action.marker(),
    };
    let body = if opts.raw {
        let mut line = tree.raw_line(id).to_string();
        if tree.is_templated(id) {
            line.push_str(" |> ");
            line.push_str(&format_attributes(tree.attributes(id)));
        }
        line
    } else {
        tree.rendered(id)?
    };
    lines.push(format!("{marker}{}{body}", opts.indent.repeat(depth)));

    for &child in tree.children(id) {
        write_node(tree, child, depth + 1, opts, lines)?;
    }
    Ok(())
}

fn format_attributes(attrs: &[(String, String)]) -> String {
    let pairs: Vec<String> = attrs
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

impl ConfigTree {
    /// Resolved indentation text with default options.
    pub fn to_text(&self) -> Result<String> {
        write_text(self, &WriteOptions::default())
    }

    /// Indentation text with explicit options.
    pub fn to_text_with(&self, opts: &WriteOptions) -> Result<String> {
        write_text(self, opts)
    }
}

impl Display for ConfigTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let opts = WriteOptions {
            raw: true,
            ..WriteOptions::default()
        };
        // Raw mode never consults attribute values, so it cannot fail.
        let text = write_text(self, &opts).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{write_text, WriteOptions};
    use crate::parser::parse;
    use crate::tree::Action;

    #[test]
    fn resolved_text_restores_indentation() {
        let text = "interface Vlan10\n ip address 1.1.1.1 255.255.255.0\nhostname sw1";
        let tree = parse(text).unwrap();
        assert_eq!(tree.to_text().unwrap(), text);
    }

    #[test]
    fn raw_mode_shows_attribute_maps() {
        let mut config = parse("interface Vlan10\n ip address 192.168.1.1 255.255.255.0").unwrap();
        let template = parse("interface Vlan10\n ip address {{ IP }} {{ MASK }}").unwrap();
        config.assign_template(template).unwrap();

        let raw = write_text(
            &config,
            &WriteOptions {
                raw: true,
                ..WriteOptions::default()
            },
        )
        .unwrap();
        assert_eq!(
            raw,
            "interface Vlan10\n ip address {{ IP }} {{ MASK }} |> {IP: 192.168.1.1, MASK: 255.255.255.0}"
        );
    }

    #[test]
    fn annotate_mode_prefixes_every_line() {
        let mut tree = parse("interface Vlan10\n no shutdown").unwrap();
        let iface = tree.children(tree.root())[0];
        let leaf = tree.children(iface)[0];
        tree.set_action(leaf, Action::Added, false);

        let annotated = write_text(
            &tree,
            &WriteOptions {
                annotate: true,
                ..WriteOptions::default()
            },
        )
        .unwrap();
        assert_eq!(annotated, " interface Vlan10\n+ no shutdown");

        // Without annotate, unmarked lines carry no padding.
        assert_eq!(tree.to_text().unwrap(), "interface Vlan10\n+ no shutdown");
    }
}
