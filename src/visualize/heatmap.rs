// Topic similarity matrix, with topics grouped by a flat cut of the hierarchy.

use plotly::common::Title;
use plotly::{HeatMap, Layout, Plot};

use crate::topics::hierarchy::Dendrogram;
use crate::topics::model::TopicModelFit;
use crate::topics::overlap::{similarity_matrix, submatrix};

pub fn topic_heatmap(fit: &TopicModelFit, n_clusters: usize, size: usize) -> Plot {
    let mut plot = Plot::new();
    let similarity = similarity_matrix(fit);

    if !similarity.is_empty() {
        let order = heatmap_order(&similarity, n_clusters);
        let names: Vec<String> = order
            .iter()
            .map(|&i| fit.topics()[i].name.clone())
            .collect();
        let z = submatrix(&similarity, &order);
        plot.add_trace(HeatMap::new(names.clone(), names, z));
    }

    plot.set_layout(
        Layout::new()
            .title(Title::new("Similarity Matrix"))
            .width(size)
            .height(size),
    );

    plot
}

/// Topic order for the heatmap: grouped by cluster label, dendrogram leaf
/// order within each group.
pub fn heatmap_order(similarity: &[Vec<f64>], n_clusters: usize) -> Vec<usize> {
    let tree = Dendrogram::build(similarity);
    let labels = tree.cut(n_clusters);

    let mut position = vec![0usize; similarity.len()];
    for (slot, leaf) in tree.leaf_order().into_iter().enumerate() {
        position[leaf] = slot;
    }

    let mut order: Vec<usize> = (0..similarity.len()).collect();
    order.sort_by_key(|&i| (labels[i], position[i]));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heatmap_order_groups_similar_topics() {
        let sim = vec![
            vec![1.0, 0.1, 0.9, 0.0],
            vec![0.1, 1.0, 0.2, 0.8],
            vec![0.9, 0.2, 1.0, 0.1],
            vec![0.0, 0.8, 0.1, 1.0],
        ];
        assert_eq!(heatmap_order(&sim, 2), vec![0, 2, 1, 3]);
        assert_eq!(heatmap_order(&sim, 4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_heatmap_order_empty() {
        assert!(heatmap_order(&[], 5).is_empty());
    }
}
