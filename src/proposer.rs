//! Degree-preserving double edge swap.

use crate::network::Network;
use crate::rng::SeededRng;

pub type Link = (usize, usize);

/// One reversible rewiring move: two links to remove, two to add.
///
/// Degrees are unchanged because every endpoint loses and gains exactly one
/// link: A loses B and gains C, B loses A and gains D, C loses D and gains A,
/// D loses C and gains B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proposal {
    pub old1: Link,
    pub old2: Link,
    pub new1: Link,
    pub new2: Link,
}

impl Proposal {
    /// Generates a swap: picks an existing link A-B, rejection-samples a new
    /// link A-C, then derives the second removed link C-D so that the closing
    /// link D-B is not already present.
    ///
    /// The two rejection loops have no termination bound; on degenerate
    /// topologies (a single clique, for instance) no valid C or D exists and
    /// they spin forever.
    pub fn generate(network: &Network, rng: &mut SeededRng) -> Self {
        let (a, b) = random_link(network, rng);

        // new link A-C: C distinct from A and not already adjacent to it
        let mut c = rng.index(network.node_count());
        while c == a || network.has_link(a, c) {
            c = rng.index(network.node_count());
        }

        // removed link C-D: D must not be B and must not be adjacent to B,
        // otherwise the closing link D-B would already exist
        let mut d = a; // A is adjacent to B, so the loop always redraws
        while d == b || network.has_link(d, b) {
            d = random_neighbor(network, c, rng);
        }

        Proposal {
            old1: (a, b),
            old2: (c, d),
            new1: (a, c),
            new2: (d, b),
        }
    }

    /// Applies the move. Removals first, so both added links meet the
    /// "link absent" precondition.
    pub fn apply(&self, network: &mut Network) {
        network.remove_link(self.old1.0, self.old1.1);
        network.remove_link(self.old2.0, self.old2.1);
        network.add_link(self.new1.0, self.new1.1);
        network.add_link(self.new2.0, self.new2.1);
    }

    /// Exact inverse of `apply`.
    pub fn undo(&self, network: &mut Network) {
        network.add_link(self.old1.0, self.old1.1);
        network.add_link(self.old2.0, self.old2.1);
        network.remove_link(self.new1.0, self.new1.1);
        network.remove_link(self.new2.0, self.new2.1);
    }
}

/// Uniform existing link: a uniform node, then a uniform neighbor of it.
fn random_link(network: &Network, rng: &mut SeededRng) -> Link {
    let a = rng.index(network.node_count());
    (a, random_neighbor(network, a, rng))
}

fn random_neighbor(network: &Network, node: usize, rng: &mut SeededRng) -> usize {
    let neighbors = network.neighbors(node);
    assert!(!neighbors.is_empty(), "node {node} has no links");
    let pick = rng.index(neighbors.len());
    *neighbors.iter().nth(pick).expect("index within degree")
}

/// Diagnostic: asserts that every node carries the same degree. Not enforced
/// during sampling.
pub fn check_uniform_degree(network: &Network) {
    let expected = network.degree(0);
    for node in 1..network.node_count() {
        assert_eq!(
            network.degree(node),
            expected,
            "degree mismatch on node {node}"
        );
    }
}
