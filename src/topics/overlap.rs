// Similarity between topics, computed from their keyword weight vectors.
//
// Cosine over keyword -> weight maps gives 0.0 for no shared keywords and 1.0
// for identical profiles. The similarity matrix behind the heatmap and the
// hierarchy uses it over the per-topic term weights, so topics whose documents
// share vocabulary end up close even though their keyword clusters are
// disjoint.

use std::collections::HashMap;

use super::model::TopicModelFit;

/// Cosine similarity between two keyword weight maps, clamped to [0, 1].
///
/// Empty maps, zero vectors and negative weights all collapse to 0.0.
pub fn cosine_from_weights(
    weights_a: &HashMap<String, f64>,
    weights_b: &HashMap<String, f64>,
) -> f64 {
    let dot: f64 = weights_a
        .iter()
        .filter_map(|(k, a)| weights_b.get(k).map(|b| a * b))
        .sum();
    let mag_a: f64 = weights_a.values().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = weights_b.values().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}

/// Pairwise topic similarity for a fit. Row/column `i` is topic id `i`.
pub fn similarity_matrix(fit: &TopicModelFit) -> Vec<Vec<f64>> {
    let n = fit.topic_count();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let sim = cosine_from_weights(&fit.term_weights[i], &fit.term_weights[j]);
            matrix[i][j] = sim;
            matrix[j][i] = sim;
        }
    }

    matrix
}

/// Extract the rows and columns of `matrix` at `indices`, in that order.
pub fn submatrix(matrix: &[Vec<f64>], indices: &[usize]) -> Vec<Vec<f64>> {
    indices
        .iter()
        .map(|&i| indices.iter().map(|&j| matrix[i][j]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, w)| (k.to_string(), *w)).collect()
    }

    #[test]
    fn test_cosine_identical() {
        let w = weights(&[("rust", 3.0), ("cargo", 1.0)]);
        assert!((cosine_from_weights(&w, &w) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_disjoint() {
        let a = weights(&[("rust", 1.0)]);
        let b = weights(&[("coffee", 1.0)]);
        assert!(cosine_from_weights(&a, &b).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_empty() {
        let a = weights(&[]);
        let b = weights(&[("coffee", 1.0)]);
        assert!(cosine_from_weights(&a, &b).abs() < f64::EPSILON);
        assert!(cosine_from_weights(&a, &a).abs() < f64::EPSILON);
    }

    #[test]
    fn test_submatrix() {
        let m = vec![
            vec![1.0, 0.1, 0.2],
            vec![0.1, 1.0, 0.3],
            vec![0.2, 0.3, 1.0],
        ];
        let sub = submatrix(&m, &[2, 0]);
        assert_eq!(sub, vec![vec![1.0, 0.2], vec![0.2, 1.0]]);
    }
}
