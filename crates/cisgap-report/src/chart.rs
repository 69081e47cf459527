//! # Status Charts
//!
//! Two side-by-side panels in one SVG document:
//!
//! - **Compliance Status Distribution**: pie of the three buckets, starting
//!   at twelve o'clock and running counter-clockwise, each slice labelled
//!   with its share to one decimal.
//! - **Control Status Count**: bar per bucket with its count.
//!
//! Empty buckets draw no pie slice but keep their (zero-height) bar slot.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write;

use cisgap_core::{Breakdown, ComplianceStatus};

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;

const PIE_CX: f64 = 250.0;
const PIE_CY: f64 = 320.0;
const PIE_R: f64 = 170.0;

const BAR_LEFT: f64 = 580.0;
const BAR_RIGHT: f64 = 960.0;
const BAR_TOP: f64 = 120.0;
const BAR_BASE: f64 = 520.0;

/// Fill color for a bucket.
pub fn status_color(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Compliant => "#4CAF50",
        ComplianceStatus::NonCompliant => "#FFC107",
        ComplianceStatus::Missing => "#F44336",
    }
}

/// Render the two-panel chart as a standalone SVG document.
pub fn render_svg(breakdown: &Breakdown) -> String {
    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="Arial, sans-serif">"#
    );
    svg.push_str(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);
    title(&mut svg, PIE_CX, "Compliance Status Distribution");
    title(&mut svg, (BAR_LEFT + BAR_RIGHT) / 2.0, "Control Status Count");

    if breakdown.total == 0 {
        let _ = write!(
            svg,
            r##"<text x="{x}" y="{y}" text-anchor="middle" font-size="16" fill="#777777">No controls evaluated</text>"##,
            x = WIDTH / 2.0,
            y = HEIGHT / 2.0,
        );
    } else {
        pie(&mut svg, breakdown);
    }
    bars(&mut svg, breakdown);

    svg.push_str("</svg>");
    svg
}

fn title(svg: &mut String, x: f64, text: &str) {
    let _ = write!(
        svg,
        r##"<text x="{x}" y="60" text-anchor="middle" font-size="20" font-weight="bold" fill="#2c3e50">{text}</text>"##
    );
}

/// Screen coordinates of the point at `angle` (radians, counter-clockwise
/// from three o'clock) on a circle of radius `r` around the pie center.
fn polar(angle: f64, r: f64) -> (f64, f64) {
    (PIE_CX + r * angle.cos(), PIE_CY - r * angle.sin())
}

fn pie(svg: &mut String, breakdown: &Breakdown) {
    let total = breakdown.total as f64;
    let mut start = FRAC_PI_2;

    for share in breakdown.shares() {
        if share.count == 0 {
            continue;
        }
        let sweep = TAU * share.count as f64 / total;
        let end = start + sweep;
        let color = status_color(share.status);

        if share.count == breakdown.total {
            let _ = write!(
                svg,
                r##"<circle cx="{PIE_CX}" cy="{PIE_CY}" r="{PIE_R}" fill="{color}" stroke="#ffffff" stroke-width="2"/>"##
            );
        } else {
            let (x0, y0) = polar(start, PIE_R);
            let (x1, y1) = polar(end, PIE_R);
            let large_arc = u8::from(sweep > PI);
            let _ = write!(
                svg,
                r##"<path d="M {PIE_CX} {PIE_CY} L {x0:.2} {y0:.2} A {PIE_R} {PIE_R} 0 {large_arc} 0 {x1:.2} {y1:.2} Z" fill="{color}" stroke="#ffffff" stroke-width="2"/>"##
            );
        }

        let mid = start + sweep / 2.0;
        let (lx, ly) = polar(mid, PIE_R * 1.18);
        let anchor = if lx < PIE_CX - 1.0 {
            "end"
        } else if lx > PIE_CX + 1.0 {
            "start"
        } else {
            "middle"
        };
        let _ = write!(
            svg,
            r##"<text x="{lx:.2}" y="{ly:.2}" text-anchor="{anchor}" font-size="14" fill="#333333">{label}</text>"##,
            label = share.status.label(),
        );
        let (px, py) = polar(mid, PIE_R * 0.6);
        let _ = write!(
            svg,
            r##"<text x="{px:.2}" y="{py:.2}" text-anchor="middle" font-size="14" fill="#000000">{percent:.1}%</text>"##,
            percent = share.percent,
        );

        start = end;
    }
}

fn bars(svg: &mut String, breakdown: &Breakdown) {
    let shares = breakdown.shares();
    let max = shares.iter().map(|s| s.count).max().unwrap_or(0).max(1) as f64;
    let slot = (BAR_RIGHT - BAR_LEFT) / shares.len() as f64;
    let bar_width = slot * 0.6;

    let _ = write!(
        svg,
        r##"<line x1="{BAR_LEFT}" y1="{BAR_BASE}" x2="{BAR_RIGHT}" y2="{BAR_BASE}" stroke="#333333" stroke-width="1"/>"##
    );
    let _ = write!(
        svg,
        r##"<line x1="{BAR_LEFT}" y1="{BAR_TOP}" x2="{BAR_LEFT}" y2="{BAR_BASE}" stroke="#333333" stroke-width="1"/>"##
    );

    for (i, share) in shares.iter().enumerate() {
        let height = (BAR_BASE - BAR_TOP) * share.count as f64 / max;
        let x = BAR_LEFT + slot * i as f64 + (slot - bar_width) / 2.0;
        let y = BAR_BASE - height;
        let center = x + bar_width / 2.0;
        let _ = write!(
            svg,
            r##"<rect x="{x:.2}" y="{y:.2}" width="{bar_width:.2}" height="{height:.2}" fill="{color}"/>"##,
            color = status_color(share.status),
        );
        let _ = write!(
            svg,
            r##"<text x="{center:.2}" y="{ty:.2}" text-anchor="middle" font-size="14" fill="#333333">{count}</text>"##,
            ty = y - 8.0,
            count = share.count,
        );
        let _ = write!(
            svg,
            r##"<text x="{center:.2}" y="{ly:.2}" text-anchor="middle" font-size="14" fill="#333333">{label}</text>"##,
            ly = BAR_BASE + 24.0,
            label = share.status.label(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cisgap_core::{classify, example_controls, ClassificationResult, ControlSet, MISSING};

    #[test]
    fn example_chart_has_three_slices_and_bars() {
        let svg = render_svg(&classify(&example_controls()).breakdown());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<path ").count(), 3);
        assert!(svg.contains("Compliance Status Distribution"));
        assert!(svg.contains("Control Status Count"));
        assert!(svg.contains("42.9%"));
        assert!(svg.contains("14.3%"));
        for color in ["#4CAF50", "#FFC107", "#F44336"] {
            assert!(svg.contains(color), "missing color {color}");
        }
    }

    #[test]
    fn single_bucket_draws_full_circle() {
        let controls: ControlSet = [("a", "1", MISSING), ("b", "2", MISSING)]
            .into_iter()
            .collect();
        let svg = render_svg(&classify(&controls).breakdown());
        assert_eq!(svg.matches("<path ").count(), 0);
        assert_eq!(svg.matches("<circle ").count(), 1);
        assert!(svg.contains("100.0%"));
    }

    #[test]
    fn empty_result_notes_no_controls() {
        let svg = render_svg(&ClassificationResult::empty().breakdown());
        assert!(svg.contains("No controls evaluated"));
        assert_eq!(svg.matches("<path ").count(), 0);
        // Bars keep their slots even at zero height.
        assert_eq!(svg.matches("height=\"0.00\"").count(), 3);
    }

    #[test]
    fn largest_bucket_fills_plot_height() {
        let svg = render_svg(&classify(&example_controls()).breakdown());
        let full = format!("height=\"{:.2}\"", BAR_BASE - BAR_TOP);
        // Compliant and non-compliant tie at 3.
        assert_eq!(svg.matches(&full).count(), 2);
    }
}
