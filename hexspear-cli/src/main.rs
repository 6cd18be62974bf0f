//! HEXSPEAR CLI
//!
//! Commands:
//! - play: interactive hotseat game on the console, with AI hints and undo
//! - auto: AI vs AI autoplay
//! - gen: write a random skirmish preset

mod auto_cmd;
mod gen_cmd;
mod play_cmd;
mod render;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hexspear")]
#[command(about = "Hex-grid spear tactics with an alpha-beta AI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game on the console
    Play(play_cmd::PlayArgs),
    /// Let the AI play both sides
    Auto(auto_cmd::AutoArgs),
    /// Generate a random skirmish preset
    Gen(gen_cmd::GenArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Auto(args) => auto_cmd::run(args),
        Commands::Gen(args) => gen_cmd::run(args),
    }
}
