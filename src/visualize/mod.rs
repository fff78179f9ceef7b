// Interactive topic visualizations, rendered to standalone HTML with plotly.
//
// Each report is a plotly figure built from a TopicModelFit. `write_reports`
// renders all of them into an output directory using fixed file names, so
// repeated runs overwrite the previous set.

pub mod barchart;
pub mod clusters;
pub mod heatmap;
pub mod hierarchy;
pub mod term_rank;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use plotly::Plot;
use tracing::info;

use crate::topics::model::TopicModelFit;

/// Knobs for the figures that take parameters.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Topics shown in the hierarchy and bar chart
    pub top_n_topics: usize,
    /// Groups the similarity heatmap is ordered into
    pub n_clusters: usize,
    /// Heatmap width and height in pixels
    pub heatmap_size: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n_topics: 5,
            n_clusters: 5,
            heatmap_size: 1000,
        }
    }
}

/// The five HTML reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Clusters,
    Hierarchy,
    BarChart,
    Heatmap,
    TermRank,
}

impl Report {
    pub const ALL: [Report; 5] = [
        Report::Clusters,
        Report::Hierarchy,
        Report::BarChart,
        Report::Heatmap,
        Report::TermRank,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Report::Clusters => "topic_clusters.html",
            Report::Hierarchy => "topic_struct.html",
            Report::BarChart => "topic_bars.html",
            Report::Heatmap => "topic_similarity.html",
            Report::TermRank => "topic_sterm_score_decline.html",
        }
    }

    pub fn render(self, fit: &TopicModelFit, options: &ReportOptions) -> Plot {
        match self {
            Report::Clusters => clusters::topic_clusters(fit),
            Report::Hierarchy => hierarchy::topic_hierarchy(fit, options.top_n_topics),
            Report::BarChart => barchart::topic_barchart(fit, options.top_n_topics),
            Report::Heatmap => {
                heatmap::topic_heatmap(fit, options.n_clusters, options.heatmap_size)
            }
            Report::TermRank => term_rank::topic_term_rank(fit),
        }
    }
}

/// Render every report into `out_dir`, creating it if needed.
///
/// Returns the written paths in `Report::ALL` order.
pub fn write_reports(
    fit: &TopicModelFit,
    out_dir: &Path,
    options: &ReportOptions,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let pb = ProgressBar::new(Report::ALL.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar().template("  Rendering [{bar:30}] {pos}/{len} {msg}")?,
    );

    let mut written = Vec::with_capacity(Report::ALL.len());
    for report in Report::ALL {
        pb.set_message(report.file_name());
        let html = report.render(fit, options).to_html();
        let path = out_dir.join(report.file_name());
        fs::write(&path, &html)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        info!(path = %path.display(), bytes = html.len(), "Wrote report");
        written.push(path);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(written)
}
