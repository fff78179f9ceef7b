// Term score decline: how fast keyword scores drop off within each topic.

use plotly::common::{Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};

use crate::topics::model::TopicModelFit;

pub fn topic_term_rank(fit: &TopicModelFit) -> Plot {
    let mut plot = Plot::new();

    for topic in fit.topics() {
        let ranks: Vec<usize> = (1..=topic.keywords.len()).collect();
        let scores: Vec<f64> = topic.keywords.iter().map(|(_, s)| *s).collect();
        let trace = Scatter::new(ranks, scores)
            .mode(Mode::LinesMarkers)
            .name(topic.name.as_str());
        plot.add_trace(trace);
    }

    plot.set_layout(
        Layout::new()
            .title(Title::new("Term score decline per Topic"))
            .width(800)
            .height(500)
            .x_axis(Axis::new().title(Title::new("Term Rank")))
            .y_axis(Axis::new().title(Title::new("TF-IDF score"))),
    );

    plot
}
