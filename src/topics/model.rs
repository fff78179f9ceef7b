// TopicModelFit: the result of fitting a topic model over a set of documents.
//
// Topics are numbered by descending document count, so topic 0 is always the
// most populated one. Documents that match none of the topic keywords are
// assigned to the outlier topic (-1), which is tracked only as a count.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Topic id given to documents that match no topic.
pub const OUTLIER_TOPIC: i64 = -1;

/// A single topic: a labelled group of keywords with its document count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Position in the frequency ranking (0 = most documents)
    pub id: i64,
    /// Name in the form `{id}_{kw1}_{kw2}_{kw3}_{kw4}`
    pub name: String,
    /// Keywords with their TF-IDF scores, highest first
    pub keywords: Vec<(String, f64)>,
    /// Number of documents assigned to this topic
    pub count: usize,
}

/// One row of the topic summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicInfo {
    pub topic: i64,
    pub count: usize,
    pub name: String,
}

/// Everything a fit produces: topics, per-document assignments and
/// probabilities, and per-topic term weights used for similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicModelFit {
    /// Non-outlier topics, indexed by id
    pub topics: Vec<Topic>,
    /// Topic id per input document (`OUTLIER_TOPIC` when unmatched)
    pub assignments: Vec<i64>,
    /// Per document, one probability per topic (all zero for outliers)
    pub probabilities: Vec<Vec<f64>>,
    /// Per topic, keyword -> weight aggregated over its documents
    pub term_weights: Vec<HashMap<String, f64>>,
}

impl TopicModelFit {
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn assignments(&self) -> &[i64] {
        &self.assignments
    }

    pub fn probabilities(&self) -> &[Vec<f64>] {
        &self.probabilities
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn document_count(&self) -> usize {
        self.assignments.len()
    }

    /// Number of documents that landed in the outlier topic.
    pub fn outlier_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|&&t| t == OUTLIER_TOPIC)
            .count()
    }

    /// Look up a topic by id. The outlier topic has no entry.
    pub fn topic(&self, id: i64) -> Option<&Topic> {
        usize::try_from(id).ok().and_then(|i| self.topics.get(i))
    }

    /// Keywords and scores of one topic, highest score first.
    pub fn get_topic(&self, id: i64) -> Option<&[(String, f64)]> {
        self.topic(id).map(|t| t.keywords.as_slice())
    }

    /// The topic with the most documents, if any topic has documents at all.
    pub fn most_frequent_topic(&self) -> Option<&Topic> {
        // Topics are sorted by count, but ties and empty topics still need a check
        self.topics
            .iter()
            .filter(|t| t.count > 0)
            .max_by(|a, b| a.count.cmp(&b.count).then(b.id.cmp(&a.id)))
    }

    /// The first `n` topics in frequency order.
    pub fn top_topics(&self, n: usize) -> &[Topic] {
        &self.topics[..n.min(self.topics.len())]
    }

    /// Summary table: the outlier row first (when any document is an outlier),
    /// then every topic in id order.
    pub fn topic_info(&self) -> Vec<TopicInfo> {
        let mut rows = Vec::with_capacity(self.topics.len() + 1);

        let outliers = self.outlier_count();
        if outliers > 0 {
            rows.push(TopicInfo {
                topic: OUTLIER_TOPIC,
                count: outliers,
                name: format!("{OUTLIER_TOPIC}_outliers"),
            });
        }

        rows.extend(self.topics.iter().map(|t| TopicInfo {
            topic: t.id,
            count: t.count,
            name: t.name.clone(),
        }));

        rows
    }
}

/// Build a topic name from its id and leading keywords.
pub fn topic_name(id: i64, keywords: &[(String, f64)]) -> String {
    let mut name = id.to_string();
    for (word, _) in keywords.iter().take(4) {
        name.push('_');
        name.push_str(word);
    }
    name
}
