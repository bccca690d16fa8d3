//! Round-trip length statistics for staged Wang-Landau runs across several
//! system sizes.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use trinet::histogram::Histogram;
use trinet::io;
use trinet::network::Network;
use trinet::rng::{substream_seed, SeededRng};
use trinet::sampler::{Policy, Sampler, WangLandau};
use trinet::stats::OnlineStats;

#[derive(Parser)]
struct Cli {
    /// Block counts to scan
    #[arg(long, default_value = "4,8,16", value_delimiter = ',')]
    blocks: Vec<usize>,

    /// Degree shared by every node
    #[arg(long, default_value = "3")]
    degree: usize,

    /// Wang-Landau stages per run
    #[arg(long, default_value = "15")]
    stages: usize,

    /// Round trips per stage
    #[arg(long, default_value = "5")]
    round_trips: usize,

    /// Master seed; every block count derives its own substream
    #[arg(long, default_value = "2")]
    seed: u64,

    /// Output file
    #[arg(long, default_value = "round_trips.csv")]
    output: PathBuf,
}

/// One staged Wang-Landau run, returning a five-column row per stage:
/// nodes, mean round-trip length, std, round-trip count, stage index.
fn run_size(
    blocks: usize,
    degree: usize,
    stages: usize,
    round_trips: usize,
    seed: u64,
) -> Vec<Vec<f64>> {
    let network = Network::fixed_degree(degree, blocks);
    let nodes = network.node_count();
    let top = network.triangle_count() as f64;
    let bins = top as usize;
    let histogram = Histogram::new(0.0, top, bins);
    let mut sampler = Sampler::new(
        network,
        histogram,
        SeededRng::new(seed),
        Policy::WangLandau(WangLandau::new(bins)),
    );

    sampler.burn_in();

    let mut rows = Vec::with_capacity(stages);
    for stage in 0..stages {
        sampler.histogram_mut().reset();
        let mut lengths = OnlineStats::default();
        for _ in 0..round_trips {
            lengths.push(sampler.perform_round_trip() as f64);
        }
        sampler.wang_landau_step();
        rows.push(vec![
            nodes as f64,
            lengths.mean(),
            lengths.std(),
            round_trips as f64,
            (stage + 1) as f64,
        ]);
    }
    rows
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    if args.degree < 2 {
        return Err("degree must be at least 2 to form triangles".into());
    }
    if args.blocks.iter().any(|&blocks| blocks < 2) {
        return Err("every block count must be at least 2; a single clique cannot be rewired".into());
    }

    let bar = ProgressBar::new(args.blocks.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);

    // Runs are independent and deterministically seeded per block count, so
    // the scan order does not affect the results.
    let mut results: Vec<(usize, Vec<Vec<f64>>)> = args
        .blocks
        .par_iter()
        .map(|&blocks| {
            let rows = run_size(
                blocks,
                args.degree,
                args.stages,
                args.round_trips,
                substream_seed(args.seed, blocks),
            );
            bar.inc(1);
            (blocks, rows)
        })
        .collect();
    bar.finish();

    results.sort_by_key(|(blocks, _)| *blocks);
    let rows: Vec<Vec<f64>> = results.into_iter().flat_map(|(_, rows)| rows).collect();
    io::write_table(&args.output, &rows)?;
    println!("round-trip statistics -> {}", args.output.display());
    Ok(())
}
