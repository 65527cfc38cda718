use crate::compliance::ComplianceReport;
use crate::error::Result;
use crate::writer::{write_text, WriteOptions};

/// Format a compliance report as plain text, one section per tree,
/// the annotated view carrying `+`/`-` markers.
pub fn format_text(report: &ComplianceReport) -> Result<String> {
    let plain = WriteOptions::default();
    let annotated = WriteOptions {
        annotate: true,
        ..WriteOptions::default()
    };
    let mut out = Vec::new();
    out.push("= intersection".to_string());
    out.push(write_text(&report.intersection, &plain)?);
    out.push("= additions".to_string());
    out.push(write_text(&report.additions, &plain)?);
    out.push("= removals".to_string());
    out.push(write_text(&report.removals, &plain)?);
    out.push("= annotated".to_string());
    out.push(write_text(&report.annotated, &annotated)?);
    Ok(out.join("\n"))
}

/// Format a simple summary of compliance counts.
pub fn format_summary(report: &ComplianceReport) -> String {
    format!(
        "compliant={} additions={} removals={}",
        report.intersection.len(),
        report.additions.len(),
        report.removals.len()
    )
}
