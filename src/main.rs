//! Mode-selecting driver: uniform, canonical or Wang-Landau sampling of the
//! triangle count on a fixed-degree block network.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use trinet::histogram::{ExcitationHistogram, Histogram};
use trinet::io;
use trinet::network::Network;
use trinet::rng::SeededRng;
use trinet::sampler::{Policy, Sampler, WangLandau};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    Uniform,
    Canonical,
    WangLandau,
}

#[derive(Parser)]
struct Cli {
    /// Sampling regime
    #[arg(long, value_enum)]
    method: Method,

    /// Number of cliques in the starting network
    #[arg(long, default_value = "8")]
    blocks: usize,

    /// Degree shared by every node (each clique has degree + 1 nodes)
    #[arg(long, default_value = "3")]
    degree: usize,

    /// Measurement steps for uniform/canonical sampling
    #[arg(long, default_value = "1000000")]
    samples: usize,

    /// Inverse temperature for canonical sampling
    #[arg(long, default_value = "1.0")]
    beta: f64,

    /// Wang-Landau stages (the increment halves after each)
    #[arg(long, default_value = "15")]
    stages: usize,

    /// Round trips per Wang-Landau stage
    #[arg(long, default_value = "5")]
    round_trips: usize,

    /// RNG seed
    #[arg(long, default_value = "2")]
    seed: u64,

    /// Histogram output file
    #[arg(long, default_value = "histogram.csv")]
    output: PathBuf,

    /// Entropy output file (Wang-Landau only)
    #[arg(long, default_value = "entropy.csv")]
    entropy_output: PathBuf,

    /// Optional excitation-matrix output (uniform/canonical only)
    #[arg(long)]
    excitation: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    let network = Network::fixed_degree(args.degree, args.blocks);
    if network.triangle_count() == 0 {
        return Err("starting network has no triangles; use --degree 2 or higher".into());
    }
    println!(
        "{} nodes, {} triangles in the starting state, seed {}",
        network.node_count(),
        network.triangle_count(),
        args.seed
    );

    let rng = SeededRng::new(args.seed);
    match args.method {
        Method::Uniform => run_flat(network, rng, Policy::Uniform, &args),
        Method::Canonical => run_flat(network, rng, Policy::Canonical { beta: args.beta }, &args),
        Method::WangLandau => run_wang_landau(network, rng, &args),
    }
}

fn progress_bar(total: u64) -> Result<ProgressBar, Box<dyn Error>> {
    let bar = ProgressBar::new(total);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);
    Ok(bar)
}

fn run_flat(
    network: Network,
    rng: SeededRng,
    policy: Policy,
    args: &Cli,
) -> Result<(), Box<dyn Error>> {
    let top = network.triangle_count() as f64;
    let histogram = Histogram::new(0.0, top, top as usize + 1);
    let mut sampler = Sampler::new(network, histogram, rng, policy);

    sampler.burn_in();
    sampler.histogram_mut().reset();

    let mut excitation = args
        .excitation
        .as_ref()
        .map(|_| ExcitationHistogram::new(0.0, top, top as usize + 1));

    let bar = progress_bar(args.samples as u64)?;
    for _ in 0..args.samples {
        let before = sampler.network().triangle_count() as f64;
        sampler.markov_step();
        if let Some(matrix) = excitation.as_mut() {
            let after = sampler.network().triangle_count() as f64;
            matrix.record(before, after);
        }
        bar.inc(1);
    }
    bar.finish();

    io::write_table(&args.output, &sampler.histogram().frequencies_by_bin())?;
    println!("histogram -> {}", args.output.display());
    if let (Some(path), Some(matrix)) = (args.excitation.as_ref(), excitation.as_ref()) {
        io::write_table(path, &matrix.conditional_rows())?;
        println!("excitation matrix -> {}", path.display());
    }
    Ok(())
}

fn run_wang_landau(network: Network, rng: SeededRng, args: &Cli) -> Result<(), Box<dyn Error>> {
    let top = network.triangle_count() as f64;
    let bins = top as usize;
    let histogram = Histogram::new(0.0, top, bins);
    let policy = Policy::WangLandau(WangLandau::new(bins));
    let mut sampler = Sampler::new(network, histogram, rng, policy);

    sampler.burn_in();

    let bar = progress_bar(args.stages as u64)?;
    for _ in 0..args.stages {
        sampler.histogram_mut().reset();
        for _ in 0..args.round_trips {
            sampler.perform_round_trip();
        }
        sampler.wang_landau_step();
        bar.inc(1);
    }
    bar.finish();

    io::write_table(&args.output, &sampler.histogram().frequencies_by_bin())?;
    io::write_table(&args.entropy_output, &sampler.normalized_entropy())?;
    println!("histogram -> {}", args.output.display());
    println!("entropy -> {}", args.entropy_output.display());
    Ok(())
}
