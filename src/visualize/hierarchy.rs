// Hierarchical topic structure drawn as a horizontal dendrogram.
//
// Leaves are spaced 10 units apart on the y axis (centre at 5, 15, ...). A
// merge is drawn as a bracket: from each child out to the merge distance on
// the x axis, joined by a vertical segment.

use plotly::common::{Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};

use crate::topics::hierarchy::Dendrogram;
use crate::topics::model::TopicModelFit;
use crate::topics::overlap::{similarity_matrix, submatrix};

/// A bracket segment: x and y coordinates of its four points.
pub type Bracket = ([f64; 4], [f64; 4]);

pub fn topic_hierarchy(fit: &TopicModelFit, top_n_topics: usize) -> Plot {
    let selected: Vec<usize> = (0..fit.top_topics(top_n_topics).len()).collect();
    let tree = Dendrogram::build(&submatrix(&similarity_matrix(fit), &selected));

    let mut plot = Plot::new();
    for (xs, ys) in brackets(&tree) {
        let trace = Scatter::new(xs.to_vec(), ys.to_vec())
            .mode(Mode::Lines)
            .show_legend(false);
        plot.add_trace(trace);
    }

    let order = tree.leaf_order();
    let tick_values: Vec<f64> = (0..order.len()).map(leaf_y).collect();
    let tick_text: Vec<String> = order
        .iter()
        .map(|&leaf| fit.topics()[selected[leaf]].name.clone())
        .collect();

    plot.set_layout(
        Layout::new()
            .title(Title::new("Hierarchical Clustering"))
            .width(1000)
            .height(200 + 50 * order.len())
            .x_axis(Axis::new().title(Title::new("Distance (1 - similarity)")))
            .y_axis(Axis::new().tick_values(tick_values).tick_text(tick_text)),
    );

    plot
}

fn leaf_y(slot: usize) -> f64 {
    slot as f64 * 10.0 + 5.0
}

/// Line coordinates for every merge in the tree, in merge order.
pub fn brackets(tree: &Dendrogram) -> Vec<Bracket> {
    let n = tree.leaves();
    let merges = tree.merges();
    let mut x = vec![0.0; n + merges.len()];
    let mut y = vec![0.0; n + merges.len()];

    for (slot, leaf) in tree.leaf_order().into_iter().enumerate() {
        y[leaf] = leaf_y(slot);
    }

    merges
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let node = n + i;
            x[node] = m.distance;
            y[node] = (y[m.left] + y[m.right]) / 2.0;
            (
                [x[m.left], m.distance, m.distance, x[m.right]],
                [y[m.left], y[m.left], y[m.right], y[m.right]],
            )
        })
        .collect()
}
