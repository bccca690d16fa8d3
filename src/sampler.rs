//! MCMC samplers over the triangle-count observable.

use crate::histogram::Histogram;
use crate::network::Network;
use crate::proposer::Proposal;
use crate::rng::SeededRng;

/// Acceptance policy selecting one of the three sampling regimes.
#[derive(Debug, Clone)]
pub enum Policy {
    /// Every proposal is accepted. The double edge swap is self-reversible
    /// with matching forward and backward generation probability, so the walk
    /// is uniform over the reachable fixed-degree graph space.
    Uniform,
    /// Metropolis-Hastings on the Boltzmann weight `exp(beta * triangles)`.
    Canonical { beta: f64 },
    /// Adaptive bias from an evolving entropy estimate.
    WangLandau(WangLandau),
}

impl Policy {
    /// Acceptance probability for a move from `old` to `new` triangles.
    fn acceptance(&self, old: f64, new: f64, histogram: &Histogram) -> f64 {
        match self {
            Policy::Uniform => 1.0,
            Policy::Canonical { beta } => (beta * (new - old)).exp().min(1.0),
            Policy::WangLandau(wl) => {
                let s_old = wl.entropy[histogram.bin(old)];
                let s_new = wl.entropy[histogram.bin(new)];
                (s_old - s_new).exp().min(1.0)
            }
        }
    }
}

/// Wang-Landau state: the unnormalized log-density-of-states estimate, one
/// accumulator per histogram bin, and the per-visit increment `f`.
///
/// The entropy table carries forward across stages; only `f` decays.
#[derive(Debug, Clone)]
pub struct WangLandau {
    entropy: Vec<f64>,
    f: f64,
}

impl WangLandau {
    pub fn new(bins: usize) -> Self {
        Self {
            entropy: vec![0.0; bins + 1],
            f: 1.0,
        }
    }

    /// Current flatness increment.
    pub fn increment(&self) -> f64 {
        self.f
    }

    pub fn entropy(&self) -> &[f64] {
        &self.entropy
    }
}

/// Drives proposals against the network under one acceptance policy and
/// accumulates the triangle-count observable.
pub struct Sampler {
    network: Network,
    histogram: Histogram,
    rng: SeededRng,
    policy: Policy,
}

impl Sampler {
    pub fn new(network: Network, histogram: Histogram, rng: SeededRng, policy: Policy) -> Self {
        Self {
            network,
            histogram,
            rng,
            policy,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn histogram_mut(&mut self) -> &mut Histogram {
        &mut self.histogram
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// One proposal, accept-or-undo, and per-policy bookkeeping.
    pub fn markov_step(&mut self) {
        let old = self.network.triangle_count() as f64;
        let proposal = Proposal::generate(&self.network, &mut self.rng);
        proposal.apply(&mut self.network);
        let new = self.network.triangle_count() as f64;

        let acceptance = self.policy.acceptance(old, new, &self.histogram);
        let accepted = acceptance >= 1.0 || self.rng.open01() < acceptance;
        if !accepted {
            proposal.undo(&mut self.network);
        }

        match &mut self.policy {
            Policy::Uniform => self.histogram.add(new),
            // the walk sits in the pre-move state while the step is decided
            Policy::Canonical { .. } => self.histogram.add(old),
            Policy::WangLandau(wl) => {
                let current = if accepted { new } else { old };
                self.histogram.add(current);
                wl.entropy[self.histogram.bin(current)] += wl.f;
            }
        }
    }

    /// Steps until the walk first reaches a triangle-free configuration.
    pub fn burn_in(&mut self) {
        while self.network.triangle_count() != 0 {
            self.markov_step();
        }
    }

    /// Burn-in to the zero-triangle state, reset the histogram, then
    /// `samples` measurement steps.
    pub fn sample(&mut self, samples: usize) {
        self.burn_in();
        self.histogram.reset();
        for _ in 0..samples {
            self.markov_step();
        }
    }

    /// One full excursion: up until the histogram's top bin, then back down
    /// to bin 0. Returns the number of Markov steps the round trip took.
    pub fn perform_round_trip(&mut self) -> u64 {
        let mut going_up = true;
        let mut steps = 0u64;
        loop {
            self.markov_step();
            steps += 1;
            let bin = self
                .histogram
                .bin(self.network.triangle_count() as f64);
            if going_up && bin == self.histogram.bins() {
                going_up = false;
            } else if !going_up && bin == 0 {
                return steps;
            }
        }
    }

    /// Ends a Wang-Landau stage by halving the flatness increment.
    pub fn wang_landau_step(&mut self) {
        match &mut self.policy {
            Policy::WangLandau(wl) => wl.f /= 2.0,
            _ => panic!("wang_landau_step on a non-Wang-Landau sampler"),
        }
    }

    /// Normalized entropy as `(bin, S - C)` rows over occupied bins, with
    /// `C = S_max + ln(sum exp(S - S_max))` so that `sum exp(S - C) == 1`
    /// over the exported rows.
    pub fn normalized_entropy(&self) -> Vec<Vec<f64>> {
        let Policy::WangLandau(wl) = &self.policy else {
            panic!("normalized_entropy on a non-Wang-Landau sampler");
        };
        let occupied: Vec<usize> = (0..=self.histogram.bins())
            .filter(|&b| self.histogram.counts(b) > 0)
            .collect();
        if occupied.is_empty() {
            return Vec::new();
        }
        let s_max = occupied
            .iter()
            .map(|&b| wl.entropy[b])
            .fold(f64::NEG_INFINITY, f64::max);
        let log_sum: f64 = occupied
            .iter()
            .map(|&b| (wl.entropy[b] - s_max).exp())
            .sum();
        let c = s_max + log_sum.ln();
        occupied
            .iter()
            .map(|&b| vec![b as f64, wl.entropy[b] - c])
            .collect()
    }
}
