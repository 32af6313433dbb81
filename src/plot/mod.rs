//! Visualisation of hop statistics.
//!
//! Produces an SVG box plot (one box per hop) and a terminal table.

pub mod boxplot;

// Re-export main types
pub use boxplot::{generate_box_plot, generate_text_summary, BoxPlotConfig};
