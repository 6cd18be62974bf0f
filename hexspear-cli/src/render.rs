//! Console board rendering

use hexspear_core::{Board, Player, Pos, Side};

/// Arrow pointing where the unit last moved.
fn facing_marker(side: Side) -> char {
    match side {
        Side::UpRight => '↗',
        Side::Right => '→',
        Side::DownRight => '↘',
        Side::DownLeft => '↙',
        Side::Left => '←',
        Side::UpLeft => '↖',
    }
}

fn player_tag(player: Player) -> char {
    match player {
        Player::Elf => 'e',
        Player::Orc => 'o',
    }
}

/// Print the board as offset rows; odd rows are indented half a cell.
pub fn print_board(board: &Board) {
    let grid = board.grid();

    print!("   ");
    for q in 0..grid.width() {
        print!("  q{}   ", q);
    }
    println!();

    for r in 0..grid.height() {
        print!("r{} ", r);
        if r % 2 == 1 {
            print!("   ");
        }
        for q in 0..grid.row_width(r) {
            match board.unit_at(Pos::new(q, r)) {
                Some(unit) => print!(
                    "[{}{:<3}{}]",
                    player_tag(unit.player),
                    unit.id,
                    facing_marker(unit.facing)
                ),
                None => print!("[  .  ]"),
            }
        }
        println!();
    }
}

/// One-line unit description for prompts and move logs.
pub fn describe_unit(board: &Board, id: &str) -> String {
    match (board.unit(id), board.position_of(id)) {
        (Some(unit), Some(pos)) => format!(
            "{} ({:?}) at ({},{}) facing {:?}",
            unit.id, unit.player, pos.q, pos.r, unit.facing
        ),
        _ => format!("{} (off board)", id),
    }
}
