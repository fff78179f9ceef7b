// Topic hierarchy: average-linkage merge tree over the topic similarity matrix.
//
// Numbering follows the usual linkage convention: leaves are `0..n`, and the
// cluster created by merge `i` gets id `n + i`. Distance is `1 - similarity`.
// Ties go to the pair that comes first in the active list, so the same matrix
// always yields the same tree.

use serde::Serialize;

/// One agglomeration step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub distance: f64,
    /// Number of leaves under the new cluster
    pub size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dendrogram {
    leaves: usize,
    merges: Vec<Merge>,
}

impl Dendrogram {
    /// Build the merge tree from a square similarity matrix.
    pub fn build(similarity: &[Vec<f64>]) -> Self {
        let n = similarity.len();
        let distance = |i: usize, j: usize| (1.0 - similarity[i][j]).clamp(0.0, 1.0);

        // (cluster id, member leaves)
        let mut active: Vec<(usize, Vec<usize>)> = (0..n).map(|i| (i, vec![i])).collect();
        let mut merges = Vec::with_capacity(n.saturating_sub(1));

        while active.len() > 1 {
            let mut best: Option<(usize, usize, f64)> = None;
            for a in 0..active.len() {
                for b in (a + 1)..active.len() {
                    let (members_a, members_b) = (&active[a].1, &active[b].1);
                    let total: f64 = members_a
                        .iter()
                        .flat_map(|&i| members_b.iter().map(move |&j| (i, j)))
                        .map(|(i, j)| distance(i, j))
                        .sum();
                    let avg = total / (members_a.len() * members_b.len()) as f64;
                    if best.map_or(true, |(_, _, d)| avg < d) {
                        best = Some((a, b, avg));
                    }
                }
            }

            let Some((a, b, dist)) = best else { break };

            // b > a, so removing b first leaves a in place
            let (right_id, right_members) = active.remove(b);
            let (left_id, mut members) = active.remove(a);
            members.extend(right_members);

            let id = n + merges.len();
            merges.push(Merge {
                left: left_id,
                right: right_id,
                distance: dist,
                size: members.len(),
            });
            active.push((id, members));
        }

        Self { leaves: n, merges }
    }

    pub fn leaves(&self) -> usize {
        self.leaves
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Leaves in left-to-right order of the drawn tree.
    pub fn leaf_order(&self) -> Vec<usize> {
        if self.leaves == 0 {
            return Vec::new();
        }

        let root = self.leaves + self.merges.len() - 1;
        let mut order = Vec::with_capacity(self.leaves);
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            if node < self.leaves {
                order.push(node);
            } else {
                let merge = &self.merges[node - self.leaves];
                stack.push(merge.right);
                stack.push(merge.left);
            }
        }

        order
    }

    /// Flat cluster label per leaf after undoing the last `n_clusters - 1`
    /// merges. Labels are numbered in order of first appearance by leaf index.
    pub fn cut(&self, n_clusters: usize) -> Vec<usize> {
        let n = self.leaves;
        if n == 0 {
            return Vec::new();
        }
        let k = n_clusters.clamp(1, n);

        // members[node] for every leaf and merged node
        let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
        let mut owner: Vec<usize> = (0..n).collect();

        for merge in self.merges.iter().take(n - k) {
            let mut joined = members[merge.left].clone();
            joined.extend(members[merge.right].iter().copied());
            let id = members.len();
            for &leaf in &joined {
                owner[leaf] = id;
            }
            members.push(joined);
        }

        let mut labels = vec![0usize; n];
        let mut seen: Vec<usize> = Vec::new();
        for leaf in 0..n {
            let label = match seen.iter().position(|&o| o == owner[leaf]) {
                Some(pos) => pos,
                None => {
                    seen.push(owner[leaf]);
                    seen.len() - 1
                }
            };
            labels[leaf] = label;
        }

        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Topics 0 and 2 are close, 1 and 3 are close, the two pairs are far apart
    fn two_pairs() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 0.1, 0.9, 0.0],
            vec![0.1, 1.0, 0.2, 0.8],
            vec![0.9, 0.2, 1.0, 0.1],
            vec![0.0, 0.8, 0.1, 1.0],
        ]
    }

    #[test]
    fn test_build_merges_closest_first() {
        let tree = Dendrogram::build(&two_pairs());
        let merges = tree.merges();
        assert_eq!(merges.len(), 3);
        assert_eq!((merges[0].left, merges[0].right), (0, 2));
        assert!((merges[0].distance - 0.1).abs() < 1e-9);
        assert_eq!((merges[1].left, merges[1].right), (1, 3));
        assert_eq!((merges[2].left, merges[2].right), (4, 5));
        assert_eq!(merges[2].size, 4);
        // average of d(0,1)=.9, d(0,3)=1, d(2,1)=.8, d(2,3)=.9
        assert!((merges[2].distance - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_distances_are_monotone() {
        let tree = Dendrogram::build(&two_pairs());
        let d: Vec<f64> = tree.merges().iter().map(|m| m.distance).collect();
        assert!(d.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_leaf_order_keeps_pairs_adjacent() {
        let tree = Dendrogram::build(&two_pairs());
        assert_eq!(tree.leaf_order(), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_cut() {
        let tree = Dendrogram::build(&two_pairs());
        assert_eq!(tree.cut(1), vec![0, 0, 0, 0]);
        assert_eq!(tree.cut(2), vec![0, 1, 0, 1]);
        assert_eq!(tree.cut(4), vec![0, 1, 2, 3]);
        // More clusters than leaves clamps to one per leaf
        assert_eq!(tree.cut(10), vec![0, 1, 2, 3]);
        assert_eq!(tree.cut(0), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_degenerate_sizes() {
        let empty = Dendrogram::build(&[]);
        assert!(empty.merges().is_empty());
        assert!(empty.leaf_order().is_empty());
        assert!(empty.cut(3).is_empty());

        let single = Dendrogram::build(&[vec![1.0]]);
        assert!(single.merges().is_empty());
        assert_eq!(single.leaf_order(), vec![0]);
        assert_eq!(single.cut(5), vec![0]);
    }
}
