//! # HTML Report
//!
//! A single `<div>` fragment with inline styles and no external resources,
//! so it renders the same when opened from disk, attached to a ticket, or
//! pasted into another page. The chart SVG is embedded inline.
//!
//! Every interpolated string is escaped: control names and values come
//! from user documents.

use std::fmt::Write;

use cisgap_core::{BucketShare, ClassificationResult};
use cisgap_remediation::Recommendation;

use crate::ReportMeta;

const CELL: &str = "border: 1px solid #ddd; padding: 8px;";

/// Render the full report fragment.
pub fn render_html(
    meta: &ReportMeta,
    result: &ClassificationResult,
    recommendations: &[Recommendation],
    chart_svg: &str,
) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str(
        r#"<div style="font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; border: 1px solid #ddd;">"#,
    );
    out.push('\n');
    out.push_str(r#"<h1 style="text-align: center; color: #2c3e50;">Security Compliance Report</h1>"#);
    out.push('\n');

    write_summary(&mut out, meta, result);
    write_findings(&mut out, result);
    write_recommendations(&mut out, recommendations);
    write_breakdown(&mut out, result);

    out.push_str("<h2>5. Charts</h2>\n");
    out.push_str(r#"<div style="overflow-x: auto;">"#);
    out.push_str(chart_svg);
    out.push_str("</div>\n</div>\n");
    out
}

fn write_summary(out: &mut String, meta: &ReportMeta, result: &ClassificationResult) {
    let _ = write!(
        out,
        "<h2>1. Report Summary</h2>\n\
         <p><strong>Baseline Document:</strong> {baseline}</p>\n\
         <p><strong>Compared with CIS Benchmark:</strong> {benchmark}</p>\n\
         <p><strong>Overall Compliance Score:</strong> {score:.2}%</p>\n\
         <p><strong>Generated:</strong> {generated}</p>\n",
        baseline = esc(&meta.baseline_name),
        benchmark = esc(&meta.benchmark_name),
        score = result.score,
        generated = meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
}

fn write_findings(out: &mut String, result: &ClassificationResult) {
    out.push_str("<h2>2. Key Findings</h2>\n<h3>Compliant Controls</h3>\n");
    write_list(out, &result.compliant);

    out.push_str("<h3>Non-Compliant Controls</h3>\n");
    out.push_str(
        r#"<table style="width: 100%; border-collapse: collapse; margin-bottom: 20px;">"#,
    );
    let _ = write!(
        out,
        "\n<tr style=\"background-color: #f2f2f2;\">\
         <th style=\"{CELL} text-align: left;\">Control</th>\
         <th style=\"{CELL} text-align: left;\">Expected Setting</th>\
         <th style=\"{CELL} text-align: left;\">Current Setting</th></tr>\n"
    );
    for item in &result.non_compliant {
        let _ = writeln!(
            out,
            "<tr><td style=\"{CELL}\">{}</td><td style=\"{CELL}\">{}</td><td style=\"{CELL}\">{}</td></tr>",
            esc(&item.control),
            esc(&item.expected),
            esc(&item.current),
        );
    }
    out.push_str("</table>\n");

    out.push_str("<h3>Missing Controls</h3>\n");
    write_list(out, &result.missing);
}

fn write_recommendations(out: &mut String, recommendations: &[Recommendation]) {
    out.push_str("<h2>3. Recommended Fixes</h2>\n<ul>\n");
    for rec in recommendations {
        let _ = writeln!(
            out,
            "<li><strong>{}</strong>: {}</li>",
            esc(&rec.control),
            esc(&rec.recommendation)
        );
    }
    out.push_str("</ul>\n");
}

fn write_breakdown(out: &mut String, result: &ClassificationResult) {
    out.push_str("<h2>4. Compliance Score Breakdown</h2>\n");
    let breakdown = result.breakdown();
    for share in breakdown.shares() {
        write_share(out, &share);
    }
}

fn write_share(out: &mut String, share: &BucketShare) {
    let _ = writeln!(
        out,
        "<p><strong>{label} Controls:</strong> {count} ({percent:.2}%)</p>",
        label = share.status.label(),
        count = share.count,
        percent = share.percent,
    );
}

fn write_list(out: &mut String, items: &[String]) {
    out.push_str("<ul>\n");
    for item in items {
        let _ = writeln!(out, "<li>{}</li>", esc(item));
    }
    out.push_str("</ul>\n");
}

/// Minimal HTML escaping for text and attribute content.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
