// Topic model trait: swap-ready abstraction.
//
// The pipeline only talks to this trait, so the TF-IDF backend can be replaced
// (embeddings, LDA, a remote service) without touching the rest of the code.

use super::model::TopicModelFit;
use anyhow::Result;

/// Trait for fitting a topic model over a list of documents.
pub trait TopicModel {
    /// Fit the model and return each document's topic and probabilities.
    fn fit_transform(&self, docs: &[String]) -> Result<TopicModelFit>;
}
