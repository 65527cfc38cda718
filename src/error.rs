use thiserror::Error;

/// Errors produced while building, rendering, or matching configuration trees.
#[derive(Debug, Error)]
pub enum Error {
    /// Resolved rendering hit a placeholder with no attribute entry.
    #[error("line '{line}' references attribute '{attribute}' which has no value")]
    Formatting { attribute: String, line: String },
    /// A template pattern does not anchor-match the line it is claimed to describe.
    #[error("template '{template}' does not match line '{line}'")]
    Inference { template: String, line: String },
    /// A multi-line section has continuation lines without leading whitespace.
    #[error("section '{head}' has continuation lines without detectable indentation")]
    Indentation { head: String },
    /// A caller-supplied search string is not a valid pattern.
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex_lite::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
