// Keyword score bars for the most frequent topics.

use plotly::common::{Orientation, Title};
use plotly::layout::Axis;
use plotly::{Bar, Layout, Plot};

use crate::topics::model::{Topic, TopicModelFit};

/// Keywords shown per topic.
pub const WORDS_PER_TOPIC: usize = 5;

pub fn topic_barchart(fit: &TopicModelFit, top_n_topics: usize) -> Plot {
    let mut plot = Plot::new();
    let topics = fit.top_topics(top_n_topics);

    for topic in topics {
        let (labels, scores) = bar_rows(topic);
        let trace = Bar::new(scores, labels)
            .orientation(Orientation::Horizontal)
            .name(topic.name.as_str());
        plot.add_trace(trace);
    }

    plot.set_layout(
        Layout::new()
            .title(Title::new("Topic Word Scores"))
            .width(800)
            .height(250 + 30 * WORDS_PER_TOPIC * topics.len())
            .x_axis(Axis::new().title(Title::new("TF-IDF score"))),
    );

    plot
}

/// Bar labels and scores for one topic, lowest score first so the strongest
/// keyword ends up on top of a horizontal chart. Labels carry the topic id so
/// the same word in two topics gets two bars.
pub fn bar_rows(topic: &Topic) -> (Vec<String>, Vec<f64>) {
    topic
        .keywords
        .iter()
        .take(WORDS_PER_TOPIC)
        .rev()
        .map(|(word, score)| (format!("{word} (topic {})", topic.id), *score))
        .unzip()
}
