use trinet::histogram::{Binning, ExcitationHistogram, Histogram};

#[test]
fn boundary_bins_for_unit_range() {
    let hist = Histogram::new(0.0, 1.0, 10);
    assert_eq!(hist.bin(0.0), 0);
    assert_eq!(hist.bin(0.0999999), 0);
    assert_eq!(hist.bin(0.5000001), 5);
    assert_eq!(hist.bin(0.9999999), 9);
    assert_eq!(hist.bin(1.0), 10);
    assert_eq!(hist.bin(1.5), 10);
    assert_eq!(hist.bin(-0.5), 0);
}

#[test]
fn value_recovers_left_edges() {
    let hist = Histogram::new(0.0, 1.0, 10);
    assert!((hist.value(hist.bin(0.57)) - 0.5).abs() < 1e-12);
    assert!((hist.value(hist.bin(0.12)) - 0.1).abs() < 1e-12);
    assert_eq!(hist.value(0), 0.0);
    assert_eq!(hist.value(10), 1.0);
}

#[test]
fn add_tracks_counts_and_total() {
    let mut hist = Histogram::new(0.0, 1.0, 11);
    hist.add(0.01);
    assert_eq!(hist.counts(0), 1);
    assert_eq!(hist.counts(1), 0);

    hist.add(0.1001);
    assert_eq!(hist.counts(0), 1);
    assert_eq!(hist.counts(1), 1);
    assert_eq!(hist.count(), 2);

    let binned: u64 = (0..=hist.bins()).map(|b| hist.counts(b)).sum();
    assert_eq!(binned, hist.count());

    hist.reset();
    assert_eq!(hist.count(), 0);
    assert_eq!(hist.counts(0), 0);
    assert_eq!(hist.counts(1), 0);
}

#[test]
fn log2_binning_uses_the_transformed_coordinate() {
    let hist = Histogram::with_binning(1.0, 1024.0, 10, Binning::Log2);
    // one bin per power of two
    assert_eq!(hist.bin(1.0), 0);
    assert_eq!(hist.bin(2.0), 1);
    assert_eq!(hist.bin(500.0), 8); // log2(500) ~ 8.97
    assert_eq!(hist.bin(1024.0), 10);
    assert!((hist.value(3) - 8.0).abs() < 1e-12);
    assert!((hist.value(10) - 1024.0).abs() < 1e-9);
}

#[test]
fn frequency_rows_are_normalized() {
    let mut hist = Histogram::new(0.0, 4.0, 4);
    hist.add(0.5);
    hist.add(0.5);
    hist.add(2.5);
    hist.add(9.0);

    let by_bin = hist.frequencies_by_bin();
    assert_eq!(
        by_bin,
        vec![vec![0.0, 0.5], vec![2.0, 0.25], vec![4.0, 0.25]]
    );

    let by_value = hist.frequencies_by_value();
    assert_eq!(by_value[1], vec![2.0, 0.25]);
    assert_eq!(by_value[2], vec![4.0, 0.25]);

    let total: f64 = by_bin.iter().map(|row| row[1]).sum();
    assert!((total - 1.0).abs() < 1e-12);
}

#[test]
fn excitation_matrix_conditional_frequencies() {
    let mut matrix = ExcitationHistogram::new(0.0, 4.0, 4);
    matrix.record(0.5, 1.5);
    matrix.record(0.5, 1.5);
    matrix.record(0.5, 2.5);
    matrix.record(3.5, 0.5);

    let rows = matrix.conditional_rows();
    assert_eq!(rows.len(), 5 * 5);
    let lookup = |i: usize, j: usize| -> f64 {
        rows.iter()
            .find(|r| r[0] == i as f64 && r[1] == j as f64)
            .unwrap()[2]
    };
    assert!((lookup(0, 1) - 2.0 / 3.0).abs() < 1e-12);
    assert!((lookup(0, 2) - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(lookup(3, 0), 1.0);
    assert_eq!(lookup(1, 1), 0.0);
    assert_eq!(matrix.histogram().count(), 4);

    matrix.reset();
    assert_eq!(matrix.histogram().count(), 0);
    assert_eq!(matrix.conditional_rows()[1][2], 0.0);
}
