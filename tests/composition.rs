// Composition tests: verifying that the pipeline stages chain together.
//
// These exercise the data flow between modules:
//   text -> sentences -> pseudo-documents -> topic fit -> reports
// without touching the process environment. Report writing goes to a
// temporary directory.

use topicprobe::config::{Config, Corpus};
use topicprobe::pipeline::{self, prepare};
use topicprobe::text::pseudo_docs::expected_document_count;
use topicprobe::topics::model::{TopicModelFit, OUTLIER_TOPIC};
use topicprobe::topics::tfidf::TfIdfTopicModel;
use topicprobe::visualize::{write_reports, Report, ReportOptions};

const ESSAY: &str = "
Rust programs are compiled ahead of time. The borrow checker rejects code that
could race on shared memory. Cargo fetches every crate a project depends on.
A crate can expose traits that other crates implement. The compiler reports
lifetime errors with long explanations.

Good espresso starts with freshly roasted coffee beans. The grinder has to be
dialed in every morning. Water temperature changes how bitter the coffee tastes.
Milk is steamed until it forms a fine foam. A flat white uses less foam than a
cappuccino.

Tomatoes need full sun and regular watering. Basil grows well next to tomatoes
in the garden. Slugs eat young lettuce leaves at night. Compost improves the
soil in a vegetable garden. Garden beds should be mulched before the summer heat.

The compiler also checks that every crate builds with the same edition. Coffee
beans lose flavour quickly once the bag is opened. The garden hose leaks near
the tomatoes.
";

fn model() -> TfIdfTopicModel {
    TfIdfTopicModel {
        top_n_keywords: 40,
        max_topics: 6,
        keywords_per_topic: 6,
    }
}

// ============================================================
// Chain: text -> sentences -> pseudo-documents
// ============================================================

#[test]
fn essay_splits_into_sentences_and_documents() {
    let prepared = prepare(ESSAY).unwrap();
    assert_eq!(prepared.sentences.len(), 18);
    assert!(prepared.sentences[0].starts_with("Rust programs"));
    assert_eq!(
        prepared.documents.len(),
        expected_document_count(prepared.sentences.len())
    );
    assert_eq!(
        prepared.documents[0],
        format!(" {} {}", prepared.sentences[0], prepared.sentences[1])
    );
    // nr=12 is a reset-and-emit index
    assert_eq!(prepared.documents[2], "");
}

// ============================================================
// Chain: text -> fit
// ============================================================

#[test]
fn pseudo_document_corpus_fits_one_row_per_document() {
    let output = pipeline::run(ESSAY, Corpus::PseudoDocuments, &model()).unwrap();
    assert_eq!(output.fit.document_count(), output.text.documents.len());
    // The empty document at nr=12 can never match a keyword
    assert!(output.fit.outlier_count() >= 1);
}

#[test]
fn sentence_corpus_fits_one_row_per_sentence() {
    let output = pipeline::run(ESSAY, Corpus::Sentences, &model()).unwrap();
    assert_eq!(output.fit.document_count(), 18);
    assert!(output.fit.topic_count() >= 2);
    assert!(output.fit.most_frequent_topic().is_some());
}

#[test]
fn config_defaults_drive_the_pipeline() {
    let config = Config::from_lookup(|_| None).unwrap();
    let output = pipeline::run(ESSAY, config.corpus, &config.model()).unwrap();
    assert_eq!(output.corpus, Corpus::PseudoDocuments);
    assert!(output.fit.topic_count() <= config.max_topics);
}

// ============================================================
// Chain: fit -> reports on disk
// ============================================================

#[test]
fn write_reports_creates_five_html_files() {
    let output = pipeline::run(ESSAY, Corpus::Sentences, &model()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("reports");

    let summary = output
        .write_reports(&out_dir, &ReportOptions::default())
        .unwrap();

    assert_eq!(summary.reports.len(), 5);
    for report in Report::ALL {
        let path = out_dir.join(report.file_name());
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<html"), "{} is not HTML", path.display());
    }
    assert_eq!(summary.sentence_count, 18);
    assert_eq!(summary.topic_count, output.fit.topic_count());

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["corpus"], "sentences");
    assert!(json["generated_at"].is_string());
}

#[test]
fn reports_render_with_more_requested_topics_than_exist() {
    let output = pipeline::run(ESSAY, Corpus::Sentences, &model()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let options = ReportOptions {
        top_n_topics: 50,
        n_clusters: 50,
        heatmap_size: 400,
    };

    let written = write_reports(&output.fit, dir.path(), &options).unwrap();
    assert_eq!(written.len(), 5);
    assert!(written.iter().all(|p| p.exists()));
}

#[test]
fn reports_render_for_a_fit_without_topics() {
    // Every document is an outlier, so there is nothing to plot
    let fit = TopicModelFit {
        topics: vec![],
        assignments: vec![OUTLIER_TOPIC; 3],
        probabilities: vec![vec![]; 3],
        term_weights: vec![],
    };
    let dir = tempfile::tempdir().unwrap();
    let options = ReportOptions {
        top_n_topics: 0,
        n_clusters: 0,
        heatmap_size: 400,
    };

    let written = write_reports(&fit, dir.path(), &options).unwrap();
    assert_eq!(written.len(), 5);
    for path in &written {
        let html = std::fs::read_to_string(path).unwrap();
        assert!(!html.is_empty(), "{} is empty", path.display());
        assert!(html.contains("<html"), "{} is not HTML", path.display());
    }
}

#[test]
fn report_file_names_are_stable() {
    let names: Vec<&str> = Report::ALL.iter().map(|r| r.file_name()).collect();
    assert_eq!(
        names,
        vec![
            "topic_clusters.html",
            "topic_struct.html",
            "topic_bars.html",
            "topic_similarity.html",
            "topic_sterm_score_decline.html",
        ]
    );
}
