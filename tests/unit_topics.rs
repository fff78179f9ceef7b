// Unit tests for topic modeling and the functions built on top of it.
//
// Tests isolated pure functions: TfIdfTopicModel::fit_transform invariant
// properties, TopicModelFit accessors, the similarity matrix and the topic
// hierarchy.

use std::collections::HashMap;

use topicprobe::topics::hierarchy::Dendrogram;
use topicprobe::topics::model::{TopicModelFit, OUTLIER_TOPIC};
use topicprobe::topics::overlap::{cosine_from_weights, similarity_matrix};
use topicprobe::topics::tfidf::TfIdfTopicModel;
use topicprobe::topics::traits::TopicModel;

fn sample_docs() -> Vec<String> {
    vec![
        "The compiler enforces borrow rules so every Rust reference stays valid".to_string(),
        "Cargo downloads each crate and the Rust compiler builds the workspace".to_string(),
        "Lifetimes tell the Rust compiler how long a borrow lasts".to_string(),
        "Espresso needs finely ground coffee beans and very hot water".to_string(),
        "Roasters sell fresh coffee beans for espresso and pour over brewing".to_string(),
        "A good espresso shot depends on the grind of the coffee beans".to_string(),
        "Tomatoes and basil grow well in a sunny garden bed".to_string(),
        "Water the garden early so the tomatoes survive the summer heat".to_string(),
    ]
}

fn fit_sample() -> TopicModelFit {
    TfIdfTopicModel {
        top_n_keywords: 30,
        max_topics: 6,
        keywords_per_topic: 6,
    }
    .fit_transform(&sample_docs())
    .unwrap()
}

// ============================================================
// TfIdfTopicModel::fit_transform: invariants
// ============================================================

#[test]
fn tfidf_respects_max_topics() {
    let model = TfIdfTopicModel {
        top_n_keywords: 30,
        max_topics: 2,
        keywords_per_topic: 6,
    };
    let fit = model.fit_transform(&sample_docs()).unwrap();
    assert!(fit.topic_count() <= 2);
    assert!(fit.topic_count() >= 1);
}

#[test]
fn tfidf_one_assignment_per_document() {
    let fit = fit_sample();
    assert_eq!(fit.assignments().len(), sample_docs().len());
    assert_eq!(fit.probabilities().len(), sample_docs().len());
    for row in fit.probabilities() {
        assert_eq!(row.len(), fit.topic_count());
    }
}

#[test]
fn tfidf_assignments_reference_existing_topics() {
    let fit = fit_sample();
    for &t in fit.assignments() {
        assert!(t == OUTLIER_TOPIC || fit.topic(t).is_some(), "bad topic {t}");
    }
}

#[test]
fn tfidf_topics_sorted_by_count_descending() {
    let fit = fit_sample();
    for pair in fit.topics().windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
    for (i, topic) in fit.topics().iter().enumerate() {
        assert_eq!(topic.id, i as i64);
        assert!(topic.name.starts_with(&format!("{i}_")));
    }
}

#[test]
fn tfidf_counts_match_assignments() {
    let fit = fit_sample();
    for topic in fit.topics() {
        let assigned = fit.assignments().iter().filter(|&&t| t == topic.id).count();
        assert_eq!(topic.count, assigned, "topic {}", topic.id);
    }
    let total: usize = fit.topic_info().iter().map(|row| row.count).sum();
    assert_eq!(total, fit.document_count());
}

#[test]
fn tfidf_assigned_document_has_highest_probability_for_its_topic() {
    let fit = fit_sample();
    for (probs, &t) in fit.probabilities().iter().zip(fit.assignments()) {
        if t == OUTLIER_TOPIC {
            continue;
        }
        let own = probs[t as usize];
        assert!(probs.iter().all(|&p| p <= own + 1e-12));
    }
}

#[test]
fn tfidf_keywords_sorted_and_nonempty() {
    let fit = fit_sample();
    for topic in fit.topics() {
        assert!(!topic.keywords.is_empty());
        for pair in topic.keywords.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        for (word, _) in &topic.keywords {
            assert!(!word.is_empty());
            assert_eq!(word, &word.to_lowercase());
        }
    }
}

#[test]
fn tfidf_is_deterministic() {
    let a = fit_sample();
    let b = fit_sample();
    assert_eq!(a.assignments(), b.assignments());
    assert_eq!(a.topic_info(), b.topic_info());
}

#[test]
fn tfidf_blank_documents_become_outliers() {
    let mut docs = sample_docs();
    docs.push(String::new());
    let fit = TfIdfTopicModel::default().fit_transform(&docs).unwrap();
    assert_eq!(*fit.assignments().last().unwrap(), OUTLIER_TOPIC);
    assert!(fit.outlier_count() >= 1);
    assert_eq!(fit.topic_info()[0].topic, OUTLIER_TOPIC);
}

#[test]
fn tfidf_empty_documents_error() {
    assert!(TfIdfTopicModel::default().fit_transform(&[]).is_err());
}

// ============================================================
// Similarity and hierarchy over a real fit
// ============================================================

#[test]
fn similarity_matrix_is_symmetric_with_unit_diagonal() {
    let fit = fit_sample();
    let m = similarity_matrix(&fit);
    assert_eq!(m.len(), fit.topic_count());
    for i in 0..m.len() {
        assert_eq!(m[i][i], 1.0);
        for j in 0..m.len() {
            assert!((m[i][j] - m[j][i]).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&m[i][j]));
        }
    }
}

#[test]
fn dendrogram_covers_every_topic() {
    let fit = fit_sample();
    let tree = Dendrogram::build(&similarity_matrix(&fit));
    assert_eq!(tree.merges().len(), fit.topic_count() - 1);

    let mut order = tree.leaf_order();
    order.sort_unstable();
    assert_eq!(order, (0..fit.topic_count()).collect::<Vec<_>>());

    let root = tree.merges().last().unwrap();
    assert_eq!(root.size, fit.topic_count());
}

// ============================================================
// cosine_from_weights: numerical edge cases
// ============================================================

#[test]
fn cosine_negative_weights_clamped_to_zero() {
    let a: HashMap<String, f64> = [("x".to_string(), 1.0)].into();
    let b: HashMap<String, f64> = [("x".to_string(), -1.0)].into();
    assert_eq!(cosine_from_weights(&a, &b), 0.0);
}

#[test]
fn cosine_is_symmetric() {
    let a: HashMap<String, f64> = [("x".to_string(), 1.0), ("y".to_string(), 3.0)].into();
    let b: HashMap<String, f64> = [("y".to_string(), 2.0), ("z".to_string(), 5.0)].into();
    assert!((cosine_from_weights(&a, &b) - cosine_from_weights(&b, &a)).abs() < 1e-12);
}

#[test]
fn cosine_scale_invariant() {
    let a: HashMap<String, f64> = [("x".to_string(), 1.0), ("y".to_string(), 2.0)].into();
    let b: HashMap<String, f64> = [("x".to_string(), 10.0), ("y".to_string(), 20.0)].into();
    assert!((cosine_from_weights(&a, &b) - 1.0).abs() < 1e-10);
}
