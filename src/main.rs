use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use topicprobe::config::{Config, Corpus};
use topicprobe::output::terminal;
use topicprobe::pipeline;

/// topicprobe: split text into sentences, bucket them into pseudo-documents,
/// and explore the topics they contain.
#[derive(Parser)]
#[command(name = "topicprobe", version, about)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sentences found in the input, one per line
    Sentences {
        /// Input text file, or `-` for stdin
        input: PathBuf,
    },

    /// Print the pseudo-documents built from the input's sentences
    Documents {
        /// Input text file, or `-` for stdin
        input: PathBuf,

        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Fit the topic model and print the topic summary
    Topics {
        /// Input text file, or `-` for stdin
        input: PathBuf,

        /// Documents to model (default: TOPICPROBE_CORPUS or pseudo-documents)
        #[arg(long, value_enum)]
        corpus: Option<Corpus>,

        /// Show the keywords of this topic instead of the most frequent one
        #[arg(long, allow_hyphen_values = true)]
        topic: Option<i64>,

        /// Rows of the summary table to show (default: all)
        #[arg(long)]
        limit: Option<usize>,

        /// Print the full fit as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fit the topic model and write the HTML visualizations
    Visualize {
        /// Input text file, or `-` for stdin
        input: PathBuf,

        /// Documents to model (default: TOPICPROBE_CORPUS or pseudo-documents)
        #[arg(long, value_enum)]
        corpus: Option<Corpus>,

        /// Output directory (default: TOPICPROBE_OUTPUT_DIR or .)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Topics in the hierarchy and bar chart (default: 5)
        #[arg(long)]
        top_n_topics: Option<usize>,

        /// Groups in the similarity heatmap (default: 5)
        #[arg(long)]
        n_clusters: Option<usize>,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up structured logging on stderr so stdout stays pipeable
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("topicprobe=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("topicprobe=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Sentences { input } => {
            let text = pipeline::read_input(&input)?;
            let prepared = pipeline::prepare(&text)?;
            terminal::display_numbered(&prepared.sentences, false);
        }

        Commands::Documents { input, json } => {
            let text = pipeline::read_input(&input)?;
            let prepared = pipeline::prepare(&text)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&prepared.documents)?);
            } else {
                terminal::display_numbered(&prepared.documents, true);
            }
        }

        Commands::Topics {
            input,
            corpus,
            topic,
            limit,
            json,
        } => {
            let mut config = Config::load()?;
            if let Some(corpus) = corpus {
                config.corpus = corpus;
            }

            let text = pipeline::read_input(&input)?;
            let output = pipeline::run(&text, config.corpus, &config.model())?;
            let fit = &output.fit;

            if json {
                println!("{}", serde_json::to_string_pretty(fit)?);
                return Ok(());
            }

            let mut rows = fit.topic_info();
            if let Some(limit) = limit {
                rows.truncate(limit);
            }
            terminal::display_topic_info(&rows, fit.document_count());

            let selected = output.select_topic(topic)?;
            if let Some(t) = selected {
                terminal::display_topic(t);
            }
        }

        Commands::Visualize {
            input,
            corpus,
            out,
            top_n_topics,
            n_clusters,
            json,
        } => {
            let mut config = Config::load()?;
            if let Some(corpus) = corpus {
                config.corpus = corpus;
            }
            if let Some(out) = out {
                config.output_dir = out;
            }
            if let Some(n) = top_n_topics {
                config.top_n_topics = n;
            }
            if let Some(n) = n_clusters {
                config.n_clusters = n;
            }
            config.validate()?;

            let text = pipeline::read_input(&input)?;
            let output = pipeline::run(&text, config.corpus, &config.model())?;

            info!(
                out_dir = %config.output_dir.display(),
                "Writing topic visualizations"
            );
            let summary = output.write_reports(&config.output_dir, &config.report_options())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                terminal::display_summary(&summary);
                println!(
                    "\n{}",
                    "Open the HTML files in a browser to explore the topics.".dimmed()
                );
            }
        }
    }

    Ok(())
}
