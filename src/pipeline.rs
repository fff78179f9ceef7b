// End-to-end pipeline: text -> sentences -> pseudo-documents -> topics -> reports.
//
// Every stage is a pure function except reading the input and writing the
// reports, so the CLI subcommands can stop at whichever stage they need.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::Corpus;
use crate::text::{build_pseudo_documents, split_sentences};
use crate::topics::model::{Topic, TopicInfo, TopicModelFit, OUTLIER_TOPIC};
use crate::topics::traits::TopicModel;
use crate::visualize::{write_reports, ReportOptions};

/// Read the input text from a file, or from stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read text from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))
    }
}

/// Sentences and the pseudo-documents built from them.
#[derive(Debug, Clone)]
pub struct PreparedText {
    pub sentences: Vec<String>,
    pub documents: Vec<String>,
}

impl PreparedText {
    /// The sequence the topic model sees for a given corpus choice.
    pub fn model_input(&self, corpus: Corpus) -> &[String] {
        match corpus {
            Corpus::PseudoDocuments => &self.documents,
            Corpus::Sentences => &self.sentences,
        }
    }
}

/// Split the text and build pseudo-documents. Fails when there is no sentence.
pub fn prepare(text: &str) -> Result<PreparedText> {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        anyhow::bail!("No sentences found in the input text");
    }

    let documents = build_pseudo_documents(&sentences);
    info!(
        sentences = sentences.len(),
        documents = documents.len(),
        "Prepared text"
    );

    Ok(PreparedText {
        sentences,
        documents,
    })
}

/// Result of a full run up to (not including) report writing.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub text: PreparedText,
    pub corpus: Corpus,
    pub fit: TopicModelFit,
}

/// Run the pipeline through the topic model fit.
pub fn run(text: &str, corpus: Corpus, model: &dyn TopicModel) -> Result<PipelineOutput> {
    let prepared = prepare(text)?;

    let input = prepared.model_input(corpus);
    if input.is_empty() {
        anyhow::bail!(
            "{} sentences produce no pseudo-documents (at least 3 are needed) — try `--corpus sentences`",
            prepared.sentences.len()
        );
    }

    let fit = model.fit_transform(input)?;

    Ok(PipelineOutput {
        text: prepared,
        corpus,
        fit,
    })
}

/// What a run produced, in a form that serializes cleanly.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub corpus: Corpus,
    pub sentence_count: usize,
    pub document_count: usize,
    pub topic_count: usize,
    pub outlier_count: usize,
    pub topics: Vec<TopicInfo>,
    pub reports: Vec<PathBuf>,
}

impl PipelineOutput {
    /// Write every report into `out_dir` and summarize the run.
    pub fn write_reports(&self, out_dir: &Path, options: &ReportOptions) -> Result<RunSummary> {
        let reports = write_reports(&self.fit, out_dir, options)?;
        Ok(self.summary(reports))
    }

    /// The topic to show in detail: `id` when given, else the most frequent.
    ///
    /// The outlier topic has no keywords, so asking for it is an error that
    /// says so rather than a generic unknown-id error.
    pub fn select_topic(&self, id: Option<i64>) -> Result<Option<&Topic>> {
        let Some(id) = id else {
            return Ok(self.fit.most_frequent_topic());
        };
        if id == OUTLIER_TOPIC {
            anyhow::bail!(
                "Topic {OUTLIER_TOPIC} is the outlier topic ({} documents matched no keywords) and has no keywords to show",
                self.fit.outlier_count()
            );
        }
        match self.fit.topic(id) {
            Some(t) => Ok(Some(t)),
            None => anyhow::bail!(
                "Topic {id} does not exist (valid ids: 0..{})",
                self.fit.topic_count()
            ),
        }
    }

    pub fn summary(&self, reports: Vec<PathBuf>) -> RunSummary {
        RunSummary {
            generated_at: Utc::now(),
            corpus: self.corpus,
            sentence_count: self.text.sentences.len(),
            document_count: self.fit.document_count(),
            topic_count: self.fit.topic_count(),
            outlier_count: self.fit.outlier_count(),
            topics: self.fit.topic_info(),
            reports,
        }
    }
}
