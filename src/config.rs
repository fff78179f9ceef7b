use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::topics::tfidf::TfIdfTopicModel;
use crate::visualize::ReportOptions;

/// Which sequence is handed to the topic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Corpus {
    /// Sentences grouped by the positional bucketing rule (default)
    PseudoDocuments,
    /// Every sentence as its own document
    Sentences,
}

impl Corpus {
    fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "pseudo-documents" | "pseudo" => Ok(Corpus::PseudoDocuments),
            "sentences" => Ok(Corpus::Sentences),
            other => anyhow::bail!(
                "TOPICPROBE_CORPUS must be `pseudo-documents` or `sentences`, got {other:?}"
            ),
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// A `.env` file is loaded automatically at startup via dotenvy. Every value
/// has a default, and command-line flags override what is loaded here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the HTML reports are written (TOPICPROBE_OUTPUT_DIR)
    pub output_dir: PathBuf,
    /// Documents fed to the topic model (TOPICPROBE_CORPUS)
    pub corpus: Corpus,
    /// Keywords kept from TF-IDF before clustering (TOPICPROBE_TOP_N_KEYWORDS)
    pub top_n_keywords: usize,
    /// Upper bound on topics (TOPICPROBE_MAX_TOPICS)
    pub max_topics: usize,
    /// Topics in the hierarchy and bar chart (TOPICPROBE_TOP_N_TOPICS)
    pub top_n_topics: usize,
    /// Heatmap groups (TOPICPROBE_N_CLUSTERS)
    pub n_clusters: usize,
    /// Heatmap width and height in pixels (TOPICPROBE_HEATMAP_SIZE)
    pub heatmap_size: usize,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_defaults = TfIdfTopicModel::default();
        let report_defaults = ReportOptions::default();

        let corpus = match lookup("TOPICPROBE_CORPUS") {
            Some(value) => Corpus::parse(&value)?,
            None => Corpus::PseudoDocuments,
        };

        let config = Self {
            output_dir: lookup("TOPICPROBE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            corpus,
            top_n_keywords: parse_count(
                &lookup,
                "TOPICPROBE_TOP_N_KEYWORDS",
                model_defaults.top_n_keywords,
            )?,
            max_topics: parse_count(&lookup, "TOPICPROBE_MAX_TOPICS", model_defaults.max_topics)?,
            top_n_topics: parse_count(
                &lookup,
                "TOPICPROBE_TOP_N_TOPICS",
                report_defaults.top_n_topics,
            )?,
            n_clusters: parse_count(&lookup, "TOPICPROBE_N_CLUSTERS", report_defaults.n_clusters)?,
            heatmap_size: parse_count(
                &lookup,
                "TOPICPROBE_HEATMAP_SIZE",
                report_defaults.heatmap_size,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the values that would make a run meaningless.
    /// Called by `from_lookup`; call again after applying CLI overrides.
    pub fn validate(&self) -> Result<()> {
        if self.top_n_keywords == 0 {
            anyhow::bail!("TOPICPROBE_TOP_N_KEYWORDS must be at least 1");
        }
        if self.max_topics == 0 {
            anyhow::bail!("TOPICPROBE_MAX_TOPICS must be at least 1");
        }
        if self.heatmap_size == 0 {
            anyhow::bail!("TOPICPROBE_HEATMAP_SIZE must be at least 1");
        }
        Ok(())
    }

    /// The topic model these settings describe.
    pub fn model(&self) -> TfIdfTopicModel {
        TfIdfTopicModel {
            top_n_keywords: self.top_n_keywords,
            max_topics: self.max_topics,
            ..TfIdfTopicModel::default()
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            top_n_topics: self.top_n_topics,
            n_clusters: self.n_clusters,
            heatmap_size: self.heatmap_size,
        }
    }
}

fn parse_count<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got {value:?}")),
    }
}
