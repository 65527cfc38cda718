use regex_lite::Regex;

use crate::error::{Error, Result};
use crate::line::LineTemplate;

/// Extract concrete placeholder values from a raw line using a template.
///
/// For each placeholder name the template is rendered as a start-anchored
/// pattern capturing that one placeholder and wildcarding the others; the
/// first capture from `raw_line` becomes the value. Fails with
/// [`Error::Inference`] when the template does not actually describe the
/// line.
pub fn infer_attributes(raw_line: &str, template: &LineTemplate) -> Result<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    for name in template.placeholder_names() {
        let pattern = Regex::new(&template.capture_pattern(name))?;
        let value = pattern
            .captures(raw_line)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| Error::Inference {
                template: template.raw().to_string(),
                line: raw_line.to_string(),
            })?;
        attrs.push((name.to_string(), value.as_str().to_string()));
    }
    Ok(attrs)
}
