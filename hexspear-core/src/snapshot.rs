//! Full-state board snapshots

use crate::board::Board;
use crate::grid::Pos;
use crate::units::Unit;
use rustc_hash::FxHashMap;

/// A value copy of everything on the board that can change: the living
/// units (with their facings), both position maps, and the roster order.
/// Restore is all-or-nothing; a snapshot is never partially applied.
#[derive(Clone, Debug)]
pub struct Snapshot {
    units: FxHashMap<String, Unit>,
    by_pos: FxHashMap<Pos, String>,
    positions: FxHashMap<String, Pos>,
    roster: Vec<String>,
}

impl Board {
    /// Capture the entire mutable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            units: self.units.clone(),
            by_pos: self.by_pos.clone(),
            positions: self.positions.clone(),
            roster: self.roster.clone(),
        }
    }

    /// Rewind to exactly the captured state.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.units = snapshot.units;
        self.by_pos = snapshot.by_pos;
        self.positions = snapshot.positions;
        self.roster = snapshot.roster;
    }
}
