//! Random skirmish preset generation

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexspear_core::Preset;

#[derive(Args)]
pub struct GenArgs {
    /// Output JSON path
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,

    /// Units per side (capped by the two back rows)
    #[arg(long, default_value = "5")]
    pub per_side: usize,

    /// RNG seed
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Preset name
    #[arg(long, default_value = "skirmish")]
    pub name: String,
}

pub fn run(args: GenArgs) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let preset = Preset::random_skirmish(&mut rng, &args.name, args.per_side);

    preset
        .to_board()
        .context("generated preset must produce a valid board")?;
    preset.save(&args.output)?;

    tracing::info!(
        "saved preset '{}' ({} units per side, seed {}) to {}",
        preset.name,
        preset.units.len() / 2,
        args.seed,
        args.output.display()
    );
    Ok(())
}
