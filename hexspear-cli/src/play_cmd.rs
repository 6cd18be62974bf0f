//! Interactive console game
//!
//! Hotseat turn loop on stdin: pick a unit by coordinates, pick one of
//! its destinations, and the board resolves the move. Undo rewinds whole
//! turns from a driver-owned snapshot stack.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexspear_core::{Board, Player, Pos, Preset, SearchAi, Side, Snapshot};

use crate::render;

#[derive(Args)]
pub struct PlayArgs {
    /// Preset JSON file (defaults to the built-in duel)
    #[arg(long, value_name = "FILE")]
    pub preset: Option<PathBuf>,

    /// AI search depth used for hints
    #[arg(long, default_value = "5")]
    pub depth: u32,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let preset = match &args.preset {
        Some(path) => Preset::load(path)?,
        None => Preset::duel(),
    };
    let mut board = preset.to_board().context("building board from preset")?;
    let ai = SearchAi::new(args.depth);

    let mut current = Player::Elf;
    // Whole-turn undo; unrelated to the search's own snapshots.
    let mut undo_stack: Vec<Snapshot> = Vec::new();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        render::print_board(&board);

        if board.is_game_over() {
            match board.winner() {
                Some(player) => println!("\n{:?} wins!", player),
                None => println!("\nNobody is left standing."),
            }
            return Ok(());
        }

        println!(
            "\n{:?} to move. Select a unit as 'q,r', or: hint | u (undo) | s (skip) | exit",
            current
        );
        let Some(input) = prompt(&mut lines)? else {
            return Ok(());
        };

        match input.as_str() {
            "exit" => return Ok(()),
            "s" => {
                current = current.opponent();
            }
            "u" => match undo_stack.pop() {
                Some(snapshot) => {
                    board.restore(snapshot);
                    current = current.opponent();
                }
                None => println!("Nothing to undo."),
            },
            "hint" => match ai.find_best_move(&mut board, current) {
                Some(choice) => println!(
                    "AI suggests ({},{}) -> ({},{})  score {}",
                    choice.from.q, choice.from.r, choice.to.q, choice.to.r, choice.score
                ),
                None => println!("No moves available."),
            },
            other => {
                if let Some(moved) = try_turn(&mut board, current, other, &mut lines, &mut undo_stack)? {
                    if moved {
                        current = current.opponent();
                    }
                }
            }
        }
    }
}

/// Handle a coordinate selection; Some(true) when a move was executed.
fn try_turn(
    board: &mut Board,
    current: Player,
    input: &str,
    lines: &mut io::Lines<io::StdinLock<'_>>,
    undo_stack: &mut Vec<Snapshot>,
) -> Result<Option<bool>> {
    let Some(pos) = parse_pos(input) else {
        println!("Invalid coordinates.");
        return Ok(Some(false));
    };

    let Some(id) = board.unit_at(pos).map(|unit| unit.id.clone()) else {
        println!("No unit at that location.");
        return Ok(Some(false));
    };
    if board.unit(&id).map(|unit| unit.player) != Some(current) {
        println!("That unit belongs to the other player.");
        return Ok(Some(false));
    }

    let destinations = board.legal_destinations(&id);
    if destinations.is_empty() {
        println!("No allowed moves for {}.", render::describe_unit(board, &id));
        return Ok(Some(false));
    }

    println!("\nAllowed moves for {}:", render::describe_unit(board, &id));
    let labeled: Vec<(Side, Pos)> = destinations
        .iter()
        .map(|&to| {
            let side = board
                .grid()
                .direction_between(pos, to)
                .expect("destinations are adjacent");
            (side, to)
        })
        .collect();
    for (index, (side, to)) in labeled.iter().enumerate() {
        println!("{}: {:?} -> ({},{})", index, side, to.q, to.r);
    }

    print!("Select move index: ");
    io::stdout().flush()?;
    let Some(index_input) = prompt_raw(lines)? else {
        return Ok(None);
    };
    let Ok(index) = index_input.trim().parse::<usize>() else {
        println!("Invalid move index.");
        return Ok(Some(false));
    };
    let Some(&(_, to)) = labeled.get(index) else {
        println!("Invalid move index.");
        return Ok(Some(false));
    };

    undo_stack.push(board.snapshot());
    if board.execute_move(&id, to) {
        Ok(Some(true))
    } else {
        undo_stack.pop();
        println!("Move failed: that attack cannot land.");
        Ok(Some(false))
    }
}

fn prompt(lines: &mut io::Lines<io::StdinLock<'_>>) -> Result<Option<String>> {
    print!("> ");
    io::stdout().flush()?;
    prompt_raw(lines)
}

fn prompt_raw(lines: &mut io::Lines<io::StdinLock<'_>>) -> Result<Option<String>> {
    match lines.next() {
        Some(line) => Ok(Some(line.context("reading stdin")?.trim().to_string())),
        None => Ok(None),
    }
}

/// Parse "q,r" into a position.
fn parse_pos(input: &str) -> Option<Pos> {
    let (q, r) = input.split_once(',')?;
    Some(Pos::new(q.trim().parse().ok()?, r.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pos() {
        assert_eq!(parse_pos("2,3"), Some(Pos::new(2, 3)));
        assert_eq!(parse_pos(" 0 , 4 "), Some(Pos::new(0, 4)));
        assert_eq!(parse_pos("2;3"), None);
        assert_eq!(parse_pos("x,3"), None);
    }
}
