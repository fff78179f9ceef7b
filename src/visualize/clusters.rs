// Intertopic map: one bubble per topic, sized by document count.
//
// Topics sit on a circle in dendrogram leaf order, so neighbours on the circle
// are the most similar topics.

use std::f64::consts::TAU;

use plotly::common::{Marker, Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};

use crate::topics::hierarchy::Dendrogram;
use crate::topics::model::TopicModelFit;
use crate::topics::overlap::similarity_matrix;

const MIN_BUBBLE: usize = 10;
const MAX_BUBBLE: usize = 60;

pub fn topic_clusters(fit: &TopicModelFit) -> Plot {
    let mut plot = Plot::new();
    let topics = fit.topics();

    if !topics.is_empty() {
        let order = Dendrogram::build(&similarity_matrix(fit)).leaf_order();
        let slots = circle_layout(order.len());

        let mut x = vec![0.0; topics.len()];
        let mut y = vec![0.0; topics.len()];
        for (slot, &topic) in order.iter().enumerate() {
            x[topic] = slots[slot].0;
            y[topic] = slots[slot].1;
        }

        let counts: Vec<usize> = topics.iter().map(|t| t.count).collect();
        let labels: Vec<String> = topics
            .iter()
            .map(|t| format!("{} ({} docs)", t.name, t.count))
            .collect();

        let trace = Scatter::new(x, y)
            .mode(Mode::Markers)
            .name("Topics")
            .text_array(labels)
            .marker(
                Marker::new()
                    .size_array(bubble_sizes(&counts))
                    .opacity(0.6),
            );
        plot.add_trace(trace);
    }

    let hidden = || {
        Axis::new()
            .show_grid(false)
            .zero_line(false)
            .show_tick_labels(false)
    };
    plot.set_layout(
        Layout::new()
            .title(Title::new("Intertopic Distance Map"))
            .width(650)
            .height(650)
            .x_axis(hidden())
            .y_axis(hidden()),
    );

    plot
}

/// Evenly spaced points on the unit circle, starting at 12 o'clock.
pub fn circle_layout(n: usize) -> Vec<(f64, f64)> {
    if n == 1 {
        return vec![(0.0, 0.0)];
    }
    (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            (angle.sin(), angle.cos())
        })
        .collect()
}

/// Marker sizes scaled linearly from `MIN_BUBBLE` to `MAX_BUBBLE` by count.
pub fn bubble_sizes(counts: &[usize]) -> Vec<usize> {
    let max = counts.iter().copied().max().unwrap_or(0).max(1);
    counts
        .iter()
        .map(|&c| MIN_BUBBLE + (c * (MAX_BUBBLE - MIN_BUBBLE)) / max)
        .collect()
}
