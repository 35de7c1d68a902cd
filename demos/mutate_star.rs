//! Place mutations on a star genealogy, then check that the
//! observed transitions conform to the model that produced them.
//!
//! ```text
//! RUST_LOG=mutmodels_markov=debug cargo run --example mutate_star -- --kappa 4
//! ```

use clap::{Parser, ValueEnum};
use mutmodels::*;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Model {
    Binary,
    Jc69,
    K80,
    AminoAcids,
}

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Mutation model
    #[arg(short, long, value_enum, default_value_t = Model::Jc69)]
    model: Model,

    /// Transition/transversion ratio for k80
    #[arg(long, default_value_t = 2.0)]
    kappa: f64,

    /// Number of leaves of the star
    #[arg(short = 'n', long, default_value_t = 20)]
    leaves: usize,

    /// Genome length
    #[arg(short = 'L', long, default_value_t = 100_000)]
    length: i64,

    /// Branch length of every leaf
    #[arg(short, long, default_value_t = 50.0)]
    time: f64,

    /// Mutation rate per site per unit time
    #[arg(short = 'u', long, default_value_t = 1e-4)]
    rate: f64,

    /// Maximum absolute deviation allowed per row
    #[arg(long, default_value_t = 0.05)]
    tolerance: f64,

    /// Random number seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

fn build_model(args: &Args) -> Result<MutationModel> {
    let model = match args.model {
        Model::Binary => presets::binary()?,
        Model::Jc69 => presets::jc69()?,
        Model::K80 => presets::k80(args.kappa)?,
        Model::AminoAcids => presets::amino_acids()?,
    };
    Ok(model)
}

fn run(args: &Args) -> Result<()> {
    let length = Position::try_from(args.length)?;
    let mut genealogy = Genealogy::new(length)?;
    let root = genealogy.add_node(Time::ZERO, None)?;
    let leaf_time = Time::try_from(args.time)?;
    for _ in 0..args.leaves {
        genealogy.add_node(leaf_time, Some(root))?;
    }

    let model = build_model(args)?;
    let rates = RateMap::uniform(length, args.rate)?;
    let overlay = MutationOverlay::new(&model, rates, OverlayConfig::new())?;
    let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);
    let sites = overlay.simulate(&genealogy, &mut rng)?;

    let counts = count_transitions(&sites, &model)?;
    println!("{} sites, {} mutations", sites.len(), counts.total());

    let report = check_conformance(&counts, &model, args.tolerance)?;
    for row in report.rows() {
        match row.statistic {
            Some(stat) => println!(
                "{}\tn = {}\tmax dev = {:.4}\t{:?}",
                row.allele, row.observations, stat, row.status
            ),
            None => println!("{}\tn = 0\t{:?}", row.allele, row.status),
        }
    }
    println!("conforms: {}", report.passed());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
