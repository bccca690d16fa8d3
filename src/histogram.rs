//! Fixed-bin sample accumulators over an observable range.

/// Monotonic coordinate transform applied before binning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binning {
    Linear,
    Log2,
}

impl Binning {
    #[inline]
    fn forward(self, value: f64) -> f64 {
        match self {
            Binning::Linear => value,
            Binning::Log2 => value.log2(),
        }
    }

    #[inline]
    fn inverse(self, value: f64) -> f64 {
        match self {
            Binning::Linear => value,
            Binning::Log2 => value.exp2(),
        }
    }
}

/// Histogram over `[lower, upper)` with `bins` regular bins plus one extra
/// slot: bin `bins` collects values at or above the upper bound, and bin 0
/// also collects values at or below the lower bound.
#[derive(Debug, Clone)]
pub struct Histogram {
    // bounds in transformed coordinates
    lower: f64,
    upper: f64,
    bins: usize,
    binning: Binning,
    counts: Vec<u64>,
    total: u64,
}

impl Histogram {
    pub fn new(lower: f64, upper: f64, bins: usize) -> Self {
        Self::with_binning(lower, upper, bins, Binning::Linear)
    }

    pub fn with_binning(lower: f64, upper: f64, bins: usize, binning: Binning) -> Self {
        assert!(bins > 0, "histogram needs at least one bin");
        let lower = binning.forward(lower);
        let upper = binning.forward(upper);
        assert!(lower < upper, "empty histogram range");
        Self {
            lower,
            upper,
            bins,
            binning,
            counts: vec![0; bins + 1],
            total: 0,
        }
    }

    #[inline]
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Total number of recorded samples.
    #[inline]
    pub fn count(&self) -> u64 {
        self.total
    }

    pub fn counts(&self, bin: usize) -> u64 {
        assert!(bin <= self.bins, "bin {bin} out of range");
        self.counts[bin]
    }

    /// Bin index for a value: 0 at or below the lower bound, `bins` at or
    /// above the upper bound, linear interpolation in between.
    pub fn bin(&self, value: f64) -> usize {
        let v = self.binning.forward(value);
        if v <= self.lower {
            return 0;
        }
        if v >= self.upper {
            return self.bins;
        }
        let bin = ((v - self.lower) * self.bins as f64 / (self.upper - self.lower)) as usize;
        // roundoff at the upper edge must not spill into the overflow slot
        bin.min(self.bins - 1)
    }

    /// Inverse of `bin`: the left edge of the bin, in observable coordinates.
    /// The boundary bins map back to the bounds exactly.
    pub fn value(&self, bin: usize) -> f64 {
        if bin >= self.bins {
            return self.binning.inverse(self.upper);
        }
        if bin == 0 {
            return self.binning.inverse(self.lower);
        }
        let width = (self.upper - self.lower) / self.bins as f64;
        self.binning.inverse(self.lower + width * bin as f64)
    }

    pub fn add(&mut self, value: f64) {
        let bin = self.bin(value);
        self.counts[bin] += 1;
        self.total += 1;
    }

    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.total = 0;
    }

    /// Occupied bins as `(bin index, normalized frequency)` rows.
    pub fn frequencies_by_bin(&self) -> Vec<Vec<f64>> {
        self.occupied().map(|(b, f)| vec![b as f64, f]).collect()
    }

    /// Occupied bins as `(observable value, normalized frequency)` rows.
    pub fn frequencies_by_value(&self) -> Vec<Vec<f64>> {
        self.occupied()
            .map(|(b, f)| vec![self.value(b), f])
            .collect()
    }

    fn occupied(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        let total = self.total as f64;
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(move |(b, &c)| (b, c as f64 / total))
    }
}

/// Histogram that additionally records the joint transitions between
/// consecutive observable values.
#[derive(Debug, Clone)]
pub struct ExcitationHistogram {
    histogram: Histogram,
    matrix: Vec<Vec<u64>>,
}

impl ExcitationHistogram {
    pub fn new(lower: f64, upper: f64, bins: usize) -> Self {
        Self::with_binning(lower, upper, bins, Binning::Linear)
    }

    pub fn with_binning(lower: f64, upper: f64, bins: usize, binning: Binning) -> Self {
        let histogram = Histogram::with_binning(lower, upper, bins, binning);
        let slots = bins + 1;
        Self {
            histogram,
            matrix: vec![vec![0; slots]; slots],
        }
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Records one `value -> next` transition and counts `value` itself.
    pub fn record(&mut self, value: f64, next: f64) {
        let row = self.histogram.bin(value);
        let col = self.histogram.bin(next);
        self.matrix[row][col] += 1;
        self.histogram.add(value);
    }

    pub fn reset(&mut self) {
        self.histogram.reset();
        for row in &mut self.matrix {
            row.iter_mut().for_each(|c| *c = 0);
        }
    }

    /// Full matrix as `(row bin, column bin, conditional frequency)` rows:
    /// how often the observable moved from the row bin to the column bin,
    /// relative to the row bin's occupancy.
    pub fn conditional_rows(&self) -> Vec<Vec<f64>> {
        let mut rows = Vec::new();
        for i in 0..=self.histogram.bins() {
            let occupancy = self.histogram.counts(i);
            for j in 0..=self.histogram.bins() {
                let frequency = if occupancy > 0 {
                    self.matrix[i][j] as f64 / occupancy as f64
                } else {
                    0.0
                };
                rows.push(vec![i as f64, j as f64, frequency]);
            }
        }
        rows
    }
}
