use regex_lite::escape;

use crate::error::{Error, Result};

/// Rendering of the synthetic root node's empty line.
pub const ROOT_LINE: &str = "root";

/// One segment of a tokenized configuration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineToken {
    /// Literal text, brackets included.
    Literal(String),
    /// A `{{ NAME }}` placeholder, holding the name.
    Placeholder(String),
}

/// A configuration line parsed once into literal and placeholder segments.
///
/// Rendering and pattern generation are folds over the token list, so
/// literal `{`, `}`, `[`, `]` characters never collide with placeholder
/// delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTemplate {
    raw: String,
    tokens: Vec<LineToken>,
}

impl LineTemplate {
    /// Tokenize a raw line. Placeholders have the exact form `{{ NAME }}`
    /// with single-space padding and a non-empty, whitespace-free name;
    /// everything else is literal text.
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            tokens: tokenize(raw),
        }
    }

    /// The original line, verbatim.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed token list.
    pub fn tokens(&self) -> &[LineToken] {
        &self.tokens
    }

    /// True if the line carries at least one placeholder.
    pub fn has_placeholders(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| matches!(t, LineToken::Placeholder(_)))
    }

    /// Placeholder names in order of first appearance, deduplicated.
    pub fn placeholder_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for token in &self.tokens {
            if let LineToken::Placeholder(name) = token {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Render the line with every placeholder substituted by its attribute
    /// value. An empty line renders as [`ROOT_LINE`].
    pub fn resolved(&self, attrs: &[(String, String)]) -> Result<String> {
        if self.raw.is_empty() {
            return Ok(ROOT_LINE.to_string());
        }
        let mut out = String::with_capacity(self.raw.len());
        for token in &self.tokens {
            match token {
                LineToken::Literal(text) => out.push_str(text),
                LineToken::Placeholder(name) => {
                    let value = attr_value(attrs, name).ok_or_else(|| Error::Formatting {
                        attribute: name.clone(),
                        line: self.raw.clone(),
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Render an unanchored matching pattern. Literal segments are
    /// regex-escaped; a placeholder becomes `\S+` when `wildcard_all` is
    /// set or its attribute is still unresolved, and its escaped value
    /// otherwise.
    pub fn pattern(&self, attrs: &[(String, String)], wildcard_all: bool) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for token in &self.tokens {
            match token {
                LineToken::Literal(text) => out.push_str(&escape(text)),
                LineToken::Placeholder(name) => {
                    match attr_value(attrs, name) {
                        Some(value) if !wildcard_all && value != name => {
                            out.push_str(&escape(value));
                        }
                        _ => out.push_str(r"\S+"),
                    }
                }
            }
        }
        out
    }

    /// Render a start-anchored pattern capturing the first occurrence of
    /// `target` and wildcarding every other placeholder.
    pub fn capture_pattern(&self, target: &str) -> String {
        let mut out = String::with_capacity(self.raw.len() + 4);
        out.push('^');
        let mut captured = false;
        for token in &self.tokens {
            match token {
                LineToken::Literal(text) => out.push_str(&escape(text)),
                LineToken::Placeholder(name) => {
                    if name == target && !captured {
                        out.push_str(r"(\S+)");
                        captured = true;
                    } else {
                        out.push_str(r"\S+");
                    }
                }
            }
        }
        out
    }
}

/// Look up an attribute value in an ordered attribute list.
pub fn attr_value<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn tokenize(raw: &str) -> Vec<LineToken> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = raw;

    while let Some(start) = rest.find("{{ ") {
        let after = &rest[start + 3..];
        let valid = after.find(" }}").and_then(|end| {
            let name = &after[..end];
            if !name.is_empty() && !name.contains(char::is_whitespace) {
                Some((name, end))
            } else {
                None
            }
        });
        match valid {
            Some((name, end)) => {
                literal.push_str(&rest[..start]);
                if !literal.is_empty() {
                    tokens.push(LineToken::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(LineToken::Placeholder(name.to_string()));
                rest = &after[end + 3..];
            }
            None => {
                // Not a placeholder opener; step past one character so an
                // overlapping opener like "{{ {{ X }}" is still found.
                literal.push_str(&rest[..start + 1]);
                rest = &rest[start + 1..];
            }
        }
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        tokens.push(LineToken::Literal(literal));
    }
    tokens
}
