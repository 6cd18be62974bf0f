//! AI vs AI autoplay

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexspear_core::{Player, Preset, SearchAi};

use crate::render;

#[derive(Args)]
pub struct AutoArgs {
    /// Preset JSON file (defaults to the built-in duel)
    #[arg(long, value_name = "FILE")]
    pub preset: Option<PathBuf>,

    /// Search depth for the elf side
    #[arg(long, default_value = "5")]
    pub elf_depth: u32,

    /// Search depth for the orc side
    #[arg(long, default_value = "5")]
    pub orc_depth: u32,

    /// Stop after this many moves without a result
    #[arg(long, default_value = "80")]
    pub max_moves: u32,
}

pub fn run(args: AutoArgs) -> Result<()> {
    let preset = match &args.preset {
        Some(path) => Preset::load(path)?,
        None => Preset::duel(),
    };
    let mut board = preset.to_board().context("building board from preset")?;

    let elf_ai = SearchAi::new(args.elf_depth);
    let orc_ai = SearchAi::new(args.orc_depth);

    tracing::info!(
        "autoplay: preset '{}', depths elf={} orc={}",
        preset.name,
        args.elf_depth,
        args.orc_depth
    );
    render::print_board(&board);

    let mut current = Player::Elf;
    let mut moves_made = 0u32;
    let mut stalled_turns = 0u8;

    while !board.is_game_over() && moves_made < args.max_moves && stalled_turns < 2 {
        let ai = match current {
            Player::Elf => &elf_ai,
            Player::Orc => &orc_ai,
        };

        match ai.find_best_move(&mut board, current) {
            Some(choice) => {
                let id = board
                    .unit_at(choice.from)
                    .expect("suggestion starts at a unit")
                    .id
                    .clone();
                let moved = board.execute_move(&id, choice.to);
                debug_assert!(moved, "suggested moves always execute");

                moves_made += 1;
                stalled_turns = 0;
                println!(
                    "\nmove {}: {:?} {} ({},{}) -> ({},{})  score {}",
                    moves_made,
                    current,
                    id,
                    choice.from.q,
                    choice.from.r,
                    choice.to.q,
                    choice.to.r,
                    choice.score
                );
                render::print_board(&board);
            }
            None => {
                tracing::info!("{:?} has no moves, skipping turn", current);
                stalled_turns += 1;
            }
        }

        current = current.opponent();
    }

    println!();
    match board.winner() {
        Some(player) => println!("{:?} wins after {} moves.", player, moves_made),
        None => println!("No result after {} moves.", moves_made),
    }
    for player in [Player::Elf, Player::Orc] {
        for unit in board.units_of(player) {
            println!("  survivor: {}", render::describe_unit(&board, &unit.id));
        }
    }
    Ok(())
}
