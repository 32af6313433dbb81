//! SVG box plot generation for per-hop latency statistics.
//!
//! Each hop is drawn from its four summary values [min, avg, med, max]:
//! whiskers span min..max, the box spans avg..med with a solid median
//! line and a dashed mean line, and the four values are drawn as points.

use crate::parser::HopStatistics;
use crate::utils::config::DEFAULT_PLOT_WIDTH;
use crate::utils::error::PlotError;
use log::info;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 90.0;
const Y_TICKS: usize = 5;

const PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

/// Box plot configuration
#[derive(Debug, Clone)]
pub struct BoxPlotConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    /// Appended to the title as " (<target>)" when set
    pub target: Option<String>,
}

impl Default for BoxPlotConfig {
    fn default() -> Self {
        Self {
            title: "Traceroute Latency Distribution per Hop".to_string(),
            width: DEFAULT_PLOT_WIDTH,
            height: 600,
            target: None,
        }
    }
}

impl BoxPlotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_target(mut self, target: Option<String>) -> Self {
        self.target = target;
        self
    }

    fn full_title(&self) -> String {
        match &self.target {
            Some(target) => format!("{} ({})", self.title, target),
            None => self.title.clone(),
        }
    }
}

/// Generate an SVG box plot from hop statistics
///
/// **Public** - main entry point for visualisation
///
/// # Errors
/// * `PlotError::EmptyStatistics` - Nothing to plot
pub fn generate_box_plot(
    stats: &[HopStatistics],
    config: Option<&BoxPlotConfig>,
) -> Result<String, PlotError> {
    if stats.is_empty() {
        return Err(PlotError::EmptyStatistics);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating box plot for {} hops", stats.len());

    let width = config.width as f64;
    let height = config.height as f64;
    let plot_w = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
    let plot_h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);

    let y_max = axis_max(stats);
    let scale = Scale {
        top: MARGIN_TOP,
        height: plot_h,
        max: y_max,
    };

    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    ));
    svg.push_str(
        r#"<style>text { font: 12px sans-serif; } .hop:hover .box { stroke-width: 2; }</style>"#,
    );
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="30" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2.0,
        escape_xml(&config.full_title())
    ));

    render_y_axis(&mut svg, &scale, plot_w);

    let slot = plot_w / stats.len() as f64;
    let box_w = (slot * 0.5).min(60.0);
    for (i, hop) in stats.iter().enumerate() {
        let center = MARGIN_LEFT + slot * (i as f64 + 0.5);
        render_hop(&mut svg, hop, center, box_w, &scale, PALETTE[i % PALETTE.len()]);
    }

    // Axis titles
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14">Hop Number</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        height - 15.0
    ));
    svg.push_str(&format!(
        r#"<text x="20" y="{y:.1}" text-anchor="middle" font-size="14" transform="rotate(-90 20 {y:.1})">Latency (ms)</text>"#,
        y = MARGIN_TOP + plot_h / 2.0
    ));

    svg.push_str("</svg>");

    info!("Box plot generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// Maps latency values to vertical pixel positions
struct Scale {
    top: f64,
    height: f64,
    max: f64,
}

impl Scale {
    fn y(&self, value: f64) -> f64 {
        self.top + self.height - (value / self.max) * self.height
    }
}

/// Upper bound of the latency axis, with headroom above the largest max
fn axis_max(stats: &[HopStatistics]) -> f64 {
    let largest = stats.iter().map(|s| s.max).fold(0.0, f64::max);
    if largest <= 0.0 {
        1.0
    } else {
        largest * 1.1
    }
}

fn render_y_axis(out: &mut String, scale: &Scale, plot_w: f64) {
    for i in 0..=Y_TICKS {
        let value = scale.max * i as f64 / Y_TICKS as f64;
        let y = scale.y(value);
        out.push_str(&format!(
            r##"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="#e5e5e5"/><text x="{tx:.1}" y="{ty:.1}" text-anchor="end">{value:.1}</text>"##,
            x1 = MARGIN_LEFT,
            x2 = MARGIN_LEFT + plot_w,
            tx = MARGIN_LEFT - 6.0,
            ty = y + 4.0,
        ));
    }
}

fn render_hop(
    out: &mut String,
    hop: &HopStatistics,
    center: f64,
    box_w: f64,
    scale: &Scale,
    color: &str,
) {
    let half = box_w / 2.0;
    let low = hop.avg.min(hop.med);
    let high = hop.avg.max(hop.med);
    let box_top = scale.y(high);
    let box_h = (scale.y(low) - box_top).max(1.0);

    let hosts = if hop.hosts.is_empty() {
        "*".to_string()
    } else {
        hop.hosts.join(" ")
    };

    out.push_str(&format!(
        r#"<g class="hop"><title>hop {} {} | min {:.3} | avg {:.3} | med {:.3} | max {:.3} ms</title>"#,
        hop.hop,
        escape_xml(&hosts),
        hop.min,
        hop.avg,
        hop.med,
        hop.max
    ));

    // Whisker and caps
    out.push_str(&format!(
        r#"<line x1="{c:.1}" y1="{top:.1}" x2="{c:.1}" y2="{bottom:.1}" stroke="{color}"/><line x1="{l:.1}" y1="{top:.1}" x2="{r:.1}" y2="{top:.1}" stroke="{color}"/><line x1="{l:.1}" y1="{bottom:.1}" x2="{r:.1}" y2="{bottom:.1}" stroke="{color}"/>"#,
        c = center,
        top = scale.y(hop.max),
        bottom = scale.y(hop.min),
        l = center - half / 2.0,
        r = center + half / 2.0,
    ));

    out.push_str(&format!(
        r#"<rect class="box" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" fill-opacity="0.5" stroke="{}"/>"#,
        center - half,
        box_top,
        box_w,
        box_h,
        color,
        color
    ));

    // Median (solid) and mean (dashed)
    out.push_str(&format!(
        r#"<line x1="{l:.1}" y1="{y:.1}" x2="{r:.1}" y2="{y:.1}" stroke="{color}" stroke-width="2"/>"#,
        l = center - half,
        r = center + half,
        y = scale.y(hop.med),
    ));
    out.push_str(&format!(
        r#"<line x1="{l:.1}" y1="{y:.1}" x2="{r:.1}" y2="{y:.1}" stroke="{color}" stroke-dasharray="4 3"/>"#,
        l = center - half,
        r = center + half,
        y = scale.y(hop.avg),
    ));

    for value in [hop.min, hop.avg, hop.med, hop.max] {
        out.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="2.5" fill="{}"/>"#,
            center - half - 8.0,
            scale.y(value),
            color
        ));
    }

    // Rotated hop label under the axis
    let label_y = scale.top + scale.height + 12.0;
    out.push_str(&format!(
        r#"<text x="{x:.1}" y="{y:.1}" transform="rotate(90 {x:.1} {y:.1})">hop {hop}</text></g>"#,
        x = center,
        y = label_y,
        hop = hop.hop
    ));
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render hop statistics as a terminal table
///
/// **Public** - printed by `capture --summary`
pub fn generate_text_summary(stats: &[HopStatistics]) -> String {
    let mut lines = Vec::new();

    lines.push("  ┏━━━━━┳━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━┳━━━━━━━━━━┳━━━━━━━━━━┳━━━━━━━━━━┓".to_string());
    lines.push(format!(
        "  ┃ {:^3} ┃ {:<34} ┃ {:>8} ┃ {:>8} ┃ {:>8} ┃ {:>8} ┃",
        "HOP", "HOSTS", "MIN", "AVG", "MED", "MAX"
    ));
    lines.push("  ┣━━━━━╋━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━╋━━━━━━━━━━╋━━━━━━━━━━╋━━━━━━━━━━┫".to_string());

    for hop in stats {
        let hosts = if hop.hosts.is_empty() {
            "*".to_string()
        } else {
            hop.hosts.join(" ")
        };
        let hosts = if hosts.chars().count() > 34 {
            let head: String = hosts.chars().take(31).collect();
            format!("{}...", head)
        } else {
            hosts
        };

        lines.push(format!(
            "  ┃ {:>3} ┃ {:<34} ┃ {:>8.3} ┃ {:>8.3} ┃ {:>8.3} ┃ {:>8.3} ┃",
            hop.hop, hosts, hop.min, hop.avg, hop.med, hop.max
        ));
    }

    lines.push("  ┗━━━━━┻━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━┻━━━━━━━━━━┻━━━━━━━━━━┻━━━━━━━━━━┛".to_string());
    lines.push("  Latencies in ms".to_string());

    lines.join("\n")
}
