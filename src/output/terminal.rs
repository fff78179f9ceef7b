// Colored terminal output for topic tables, single topics and run summaries.
//
// The main.rs subcommands delegate all formatting here.

use colored::Colorize;

use super::truncate_chars;
use crate::pipeline::RunSummary;
use crate::topics::model::{Topic, TopicInfo, OUTLIER_TOPIC};

/// Longest topic name shown in the summary table.
const NAME_WIDTH: usize = 48;

/// Print sentences or documents, one per line, with their index.
///
/// Documents are debug-quoted so the leading space and empty documents stay
/// visible.
pub fn display_numbered(items: &[String], quoted: bool) {
    for (i, item) in items.iter().enumerate() {
        if quoted {
            println!("{:>4}  {:?}", i.to_string().dimmed(), item);
        } else {
            println!("{:>4}  {}", i.to_string().dimmed(), item);
        }
    }
}

/// Display the topic summary table.
pub fn display_topic_info(rows: &[TopicInfo], document_count: usize) {
    if rows.is_empty() {
        println!("No topics found.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Topics ({} documents, {} rows) ===",
            document_count,
            rows.len()
        )
        .bold()
    );
    println!();
    println!(
        "  {:>5}  {:>6}  {}",
        "Topic".dimmed(),
        "Count".dimmed(),
        "Name".dimmed()
    );
    println!("  {}", "-".repeat(NAME_WIDTH + 16).dimmed());

    for row in rows {
        let name = truncate_chars(&row.name, NAME_WIDTH);
        if row.topic == OUTLIER_TOPIC {
            println!(
                "  {:>5}  {:>6}  {}",
                row.topic,
                row.count,
                name.dimmed()
            );
        } else {
            println!("  {:>5}  {:>6}  {}", row.topic, row.count, name.bold());
        }
    }
    println!();
}

/// Display one topic's keywords as a bar chart.
pub fn display_topic(topic: &Topic) {
    println!(
        "\n{}",
        format!(
            "=== Topic {} ({} documents) ===",
            topic.id, topic.count
        )
        .bold()
    );
    println!();

    let bar_width: usize = 20;
    let max_score = topic
        .keywords
        .iter()
        .map(|(_, s)| *s)
        .fold(0.0_f64, f64::max);

    for (word, score) in &topic.keywords {
        let ratio = if max_score > 0.0 { score / max_score } else { 0.0 };
        let filled = (ratio * bar_width as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled),
            " ".repeat(bar_width.saturating_sub(filled))
        );

        let colored_bar = if ratio >= 0.75 {
            bar.bright_green()
        } else if ratio >= 0.4 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };

        println!("  {:<24} {} {:.4}", word.bold(), colored_bar, score);
    }
    println!();
}

/// Display what a visualize run wrote.
pub fn display_summary(summary: &RunSummary) {
    println!(
        "{} sentences -> {} documents -> {} topics ({} outliers)",
        summary.sentence_count,
        summary.document_count,
        summary.topic_count,
        summary.outlier_count,
    );
    println!();
    for path in &summary.reports {
        println!("  {} {}", "wrote".green(), path.display());
    }
}
