// TF-IDF topic model.
//
// Uses the `keyword_extraction` crate to score words across the documents,
// then clusters co-occurring keywords into topics and assigns each document
// to the topic whose keywords it uses most.
//
// Each document is a separate TF-IDF document: words that appear everywhere
// get downweighted, words distinctive to a few documents get boosted.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use stop_words::{get, LANGUAGE};
use tracing::{debug, info};
use unicode_segmentation::UnicodeSegmentation;

use super::model::{topic_name, Topic, TopicModelFit, OUTLIER_TOPIC};
use super::traits::TopicModel;

/// TF-IDF keyword clustering: the default topic model.
///
/// Runs locally and deterministically; the same documents always produce the
/// same topics.
#[derive(Debug, Clone)]
pub struct TfIdfTopicModel {
    /// How many top keywords to extract before clustering
    pub top_n_keywords: usize,
    /// Upper bound on the number of topics
    pub max_topics: usize,
    /// Keywords per topic, including the seed keyword
    pub keywords_per_topic: usize,
}

impl Default for TfIdfTopicModel {
    fn default() -> Self {
        Self {
            top_n_keywords: 60,
            max_topics: 10,
            keywords_per_topic: 6,
        }
    }
}

/// A keyword cluster before documents are assigned and topics renumbered.
struct KeywordCluster {
    keywords: Vec<(String, f64)>,
}

impl TopicModel for TfIdfTopicModel {
    fn fit_transform(&self, docs: &[String]) -> Result<TopicModelFit> {
        if docs.is_empty() {
            anyhow::bail!("No documents to analyze — cannot fit a topic model");
        }
        if docs.iter().all(|d| d.trim().is_empty()) {
            anyhow::bail!(
                "All {} documents are blank — nothing to build topics from",
                docs.len()
            );
        }

        let stop_words: Vec<String> = get(LANGUAGE::English);

        // Blank documents carry no words; they are scored as outliers below.
        // The library handles tokenization, stop word removal, and scoring.
        let scored: Vec<String> = docs
            .iter()
            .filter(|d| !d.trim().is_empty())
            .cloned()
            .collect();
        let params = TfIdfParams::UnprocessedDocuments(&scored, &stop_words, None);
        let tfidf = TfIdf::new(params);

        // Normalizing can fold two library keywords into one; keep the first
        let mut seen = HashSet::new();
        let ranked: Vec<(String, f64)> = tfidf
            .get_ranked_word_scores(self.top_n_keywords)
            .into_iter()
            .map(|(word, score)| (normalize_term(&word), score as f64))
            .filter(|(word, score)| {
                !word.is_empty() && score.is_finite() && seen.insert(word.clone())
            })
            .collect();

        if ranked.is_empty() {
            anyhow::bail!(
                "TF-IDF produced no keywords from {} documents — documents may be too short or uniform",
                docs.len()
            );
        }

        info!(
            documents = docs.len(),
            keywords = ranked.len(),
            top_keyword = &ranked[0].0,
            top_score = ranked[0].1,
            "Extracted TF-IDF keywords"
        );

        let doc_terms: Vec<HashMap<String, usize>> = docs.iter().map(|d| term_counts(d)).collect();

        let clusters = cluster_keywords(
            &ranked,
            &doc_terms,
            self.max_topics,
            self.keywords_per_topic,
        );

        let fit = assign_documents(&clusters, &ranked, &doc_terms);

        info!(
            topics = fit.topic_count(),
            outliers = fit.outlier_count(),
            "Fitted topic model"
        );

        Ok(fit)
    }
}

/// Lowercase and strip everything but letters and digits, so keywords from
/// the library and tokens from the documents compare equal.
pub fn normalize_term(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Count normalized word tokens in a document.
pub fn term_counts(doc: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for word in doc.unicode_words() {
        let term = normalize_term(word);
        if !term.is_empty() {
            *counts.entry(term).or_insert(0) += 1;
        }
    }
    counts
}

/// Group keywords into clusters based on co-occurrence in documents.
///
/// For each pair of keywords, count how many documents contain both. Then
/// greedily build clusters: the highest-scored unassigned keyword seeds a
/// cluster and pulls in its most co-occurring unassigned neighbors.
fn cluster_keywords(
    ranked: &[(String, f64)],
    doc_terms: &[HashMap<String, usize>],
    max_clusters: usize,
    keywords_per_cluster: usize,
) -> Vec<KeywordCluster> {
    let n = ranked.len();

    // For each document, record which keywords appear in it
    let doc_keywords: Vec<Vec<usize>> = doc_terms
        .iter()
        .map(|terms| {
            ranked
                .iter()
                .enumerate()
                .filter(|(_, (kw, _))| terms.contains_key(kw))
                .map(|(i, _)| i)
                .collect()
        })
        .collect();

    let mut cooccurrence = vec![vec![0u32; n]; n];
    for dk in &doc_keywords {
        for &i in dk {
            for &j in dk {
                if i != j {
                    cooccurrence[i][j] += 1;
                }
            }
        }
    }

    let mut assigned = vec![false; n];
    let mut clusters = Vec::new();

    for seed_idx in 0..n {
        if clusters.len() >= max_clusters {
            break;
        }
        if assigned[seed_idx] {
            continue;
        }

        assigned[seed_idx] = true;
        let mut members = vec![seed_idx];

        // Candidates are in rank order, and the sort is stable, so ties keep
        // the higher-scored keyword first
        let mut candidates: Vec<(usize, u32)> = (0..n)
            .filter(|&i| !assigned[i] && cooccurrence[seed_idx][i] > 0)
            .map(|i| (i, cooccurrence[seed_idx][i]))
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1));

        for (idx, _count) in candidates
            .into_iter()
            .take(keywords_per_cluster.saturating_sub(1))
        {
            assigned[idx] = true;
            members.push(idx);
        }

        let mut keywords: Vec<(String, f64)> =
            members.iter().map(|&i| ranked[i].clone()).collect();
        keywords.sort_by(|a, b| b.1.total_cmp(&a.1));

        debug!(
            seed = &ranked[seed_idx].0,
            size = keywords.len(),
            "Built keyword cluster"
        );

        clusters.push(KeywordCluster { keywords });
    }

    clusters
}

/// Score every document against every cluster, pick the best cluster, and
/// renumber clusters by how many documents they won.
fn assign_documents(
    clusters: &[KeywordCluster],
    ranked: &[(String, f64)],
    doc_terms: &[HashMap<String, usize>],
) -> TopicModelFit {
    let k = clusters.len();

    // Raw per-cluster scores for each document
    let scores: Vec<Vec<f64>> = doc_terms
        .iter()
        .map(|terms| {
            clusters
                .iter()
                .map(|c| {
                    c.keywords
                        .iter()
                        .map(|(w, s)| s * terms.get(w).copied().unwrap_or(0) as f64)
                        .sum()
                })
                .collect()
        })
        .collect();

    // Best cluster per document; strict comparison keeps the lower index on ties
    let raw_assignments: Vec<Option<usize>> = scores
        .iter()
        .map(|row| {
            let mut best: Option<(usize, f64)> = None;
            for (i, &s) in row.iter().enumerate() {
                if s > 0.0 && best.map_or(true, |(_, b)| s > b) {
                    best = Some((i, s));
                }
            }
            best.map(|(i, _)| i)
        })
        .collect();

    let mut counts = vec![0usize; k];
    for &i in raw_assignments.iter().flatten() {
        counts[i] += 1;
    }

    let total_score: Vec<f64> = clusters
        .iter()
        .map(|c| c.keywords.iter().map(|(_, s)| s).sum())
        .collect();

    // order[new_id] = old cluster index
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| {
        counts[b]
            .cmp(&counts[a])
            .then(total_score[b].total_cmp(&total_score[a]))
            .then(a.cmp(&b))
    });
    let mut new_id = vec![0usize; k];
    for (id, &old) in order.iter().enumerate() {
        new_id[old] = id;
    }

    let assignments: Vec<i64> = raw_assignments
        .iter()
        .map(|a| a.map_or(OUTLIER_TOPIC, |old| new_id[old] as i64))
        .collect();

    let probabilities: Vec<Vec<f64>> = scores
        .iter()
        .map(|row| {
            let sum: f64 = row.iter().sum();
            order
                .iter()
                .map(|&old| if sum > 0.0 { row[old] / sum } else { 0.0 })
                .collect()
        })
        .collect();

    let topics: Vec<Topic> = order
        .iter()
        .enumerate()
        .map(|(id, &old)| {
            let keywords = clusters[old].keywords.clone();
            Topic {
                id: id as i64,
                name: topic_name(id as i64, &keywords),
                keywords,
                count: counts[old],
            }
        })
        .collect();

    let term_weights = (0..k)
        .map(|t| {
            let mut weights = HashMap::new();
            for (word, _) in ranked {
                let w: f64 = doc_terms
                    .iter()
                    .zip(&probabilities)
                    .map(|(terms, probs)| probs[t] * terms.get(word).copied().unwrap_or(0) as f64)
                    .sum();
                if w > 0.0 {
                    weights.insert(word.clone(), w);
                }
            }
            weights
        })
        .collect();

    TopicModelFit {
        topics,
        assignments,
        probabilities,
        term_weights,
    }
}
