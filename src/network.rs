//! Adjacency-set network with an incrementally maintained triangle count.

use std::collections::BTreeSet;

/// Undirected simple graph on nodes `0..n` with a cached triangle count.
///
/// The adjacency sets are stored symmetrically: `j` appears in `links[i]`
/// iff `i` appears in `links[j]`. `triangle_sum` holds 3x the number of
/// triangles in the graph, each triangle counted once from each corner.
#[derive(Debug, Clone)]
pub struct Network {
    links: Vec<BTreeSet<usize>>,
    node_triangles: Vec<u64>,
    triangle_sum: u64,
}

impl Network {
    /// Builds a network from a symmetric adjacency list and runs the one-time
    /// brute-force triangle recount.
    pub fn from_adjacency(links: Vec<BTreeSet<usize>>) -> Self {
        let n = links.len();
        for (i, neighbors) in links.iter().enumerate() {
            for &j in neighbors {
                assert!(j < n, "neighbor {j} out of range for {n} nodes");
                assert!(j != i, "self-link on node {i}");
                assert!(links[j].contains(&i), "asymmetric link {i}-{j}");
            }
        }
        let mut network = Self {
            links,
            node_triangles: vec![0; n],
            triangle_sum: 0,
        };
        network.recount_triangles();
        network
    }

    /// Disjoint union of `blocks` cliques of `degree + 1` nodes each: the
    /// configuration with the most triangles for this degree sequence.
    pub fn fixed_degree(degree: usize, blocks: usize) -> Self {
        let per_block = degree + 1;
        let mut links = vec![BTreeSet::new(); per_block * blocks];
        for block in 0..blocks {
            let base = per_block * block;
            for i in 0..per_block {
                for j in (i + 1)..per_block {
                    links[base + i].insert(base + j);
                    links[base + j].insert(base + i);
                }
            }
        }
        Self::from_adjacency(links)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.links.len()
    }

    /// Number of triangles in the graph. O(1): the accumulator already counts
    /// each triangle once per corner.
    #[inline]
    pub fn triangle_count(&self) -> u64 {
        self.triangle_sum / 3
    }

    pub fn neighbors(&self, node: usize) -> &BTreeSet<usize> {
        &self.links[node]
    }

    pub fn degree(&self, node: usize) -> usize {
        self.links[node].len()
    }

    pub fn has_link(&self, i: usize, j: usize) -> bool {
        self.links[i].contains(&j)
    }

    /// Every undirected edge once, as `(i, j)` with `i < j`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.links.iter().enumerate().flat_map(|(i, neighbors)| {
            neighbors
                .iter()
                .copied()
                .filter(move |&j| i < j)
                .map(move |j| (i, j))
        })
    }

    pub fn add_link(&mut self, i: usize, j: usize) {
        assert!(i != j, "self-link on node {i}");
        assert!(!self.links[i].contains(&j), "link {i}-{j} already present");

        self.update_triangles(i, j, true);

        self.links[i].insert(j);
        self.links[j].insert(i);
    }

    pub fn remove_link(&mut self, i: usize, j: usize) {
        assert!(self.links[i].contains(&j), "link {i}-{j} not present");

        self.update_triangles(i, j, false);

        self.links[i].remove(&j);
        self.links[j].remove(&i);
    }

    /// Common-neighbour update, run *before* the adjacency change. Every
    /// common neighbour of `i` and `j` closes exactly one triangle with the
    /// link `i-j`: the caches of `i` and `j` move by the intersection size,
    /// each common neighbour's cache moves by one, and the accumulator moves
    /// by three per closed triangle.
    fn update_triangles(&mut self, i: usize, j: usize, added: bool) {
        let common: Vec<usize> = self.links[i]
            .intersection(&self.links[j])
            .copied()
            .collect();
        let closed = common.len() as u64;
        if added {
            self.node_triangles[i] += closed;
            self.node_triangles[j] += closed;
            for &k in &common {
                self.node_triangles[k] += 1;
            }
            self.triangle_sum += 3 * closed;
        } else {
            self.node_triangles[i] -= closed;
            self.node_triangles[j] -= closed;
            for &k in &common {
                self.node_triangles[k] -= 1;
            }
            self.triangle_sum -= 3 * closed;
        }
    }

    /// O(n * max_degree^2) recount used only at construction time; sampling
    /// relies exclusively on the incremental update.
    fn recount_triangles(&mut self) {
        self.triangle_sum = 0;
        for i in 0..self.links.len() {
            let mut corners = 0u64;
            for &j in &self.links[i] {
                for &k in &self.links[i] {
                    if k != j && self.links[j].contains(&k) {
                        corners += 1;
                    }
                }
            }
            // each triangle at node i is seen twice, once per corner ordering
            self.node_triangles[i] = corners / 2;
            self.triangle_sum += corners / 2;
        }
    }
}
