//! Board state, move legality and combat resolution

use crate::grid::{Grid, Pos, Side, ALL_SIDES};
use crate::units::{Player, Unit, Weapon};
use rustc_hash::FxHashMap;

/// The game board: single owner of every living unit and its position.
///
/// Invariants: at most one unit per hex; every living unit has exactly one
/// position; the position maps, the living set and the roster only change
/// together (see `kill`).
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    grid: Grid,
    pub(crate) units: FxHashMap<String, Unit>,
    pub(crate) by_pos: FxHashMap<Pos, String>,
    pub(crate) positions: FxHashMap<String, Pos>,
    /// Unit ids in placement order; keeps move enumeration deterministic.
    pub(crate) roster: Vec<String>,
}

impl Board {
    pub fn new(width: i8, height: i8) -> Self {
        Self::with_grid(Grid::new(width, height))
    }

    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            units: FxHashMap::default(),
            by_pos: FxHashMap::default(),
            positions: FxHashMap::default(),
            roster: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn unit_at(&self, pos: Pos) -> Option<&Unit> {
        self.by_pos.get(&pos).and_then(|id| self.units.get(id))
    }

    pub fn position_of(&self, id: &str) -> Option<Pos> {
        self.positions.get(id).copied()
    }

    /// Living units of one player, in placement order.
    pub fn units_of(&self, player: Player) -> Vec<&Unit> {
        self.roster
            .iter()
            .map(|id| &self.units[id.as_str()])
            .filter(|unit| unit.player == player)
            .collect()
    }

    /// Ids of one player's living units, in placement order.
    pub fn unit_ids_of(&self, player: Player) -> Vec<String> {
        self.roster
            .iter()
            .filter(|id| self.units[id.as_str()].player == player)
            .cloned()
            .collect()
    }

    pub fn unit_count(&self, player: Player) -> usize {
        self.units.values().filter(|unit| unit.player == player).count()
    }

    // ========================================================================
    // SETUP
    // ========================================================================

    /// Place a unit during setup, turned toward `facing`. Invalid or
    /// occupied positions and duplicate ids are logged and ignored.
    pub fn place_unit(&mut self, pos: Pos, mut unit: Unit, facing: Side) -> bool {
        if !self.grid.contains(pos) {
            tracing::warn!("hex ({},{}) does not exist", pos.q, pos.r);
            return false;
        }
        if let Some(occupant) = self.unit_at(pos) {
            tracing::warn!("hex ({},{}) is already occupied by {}", pos.q, pos.r, occupant.id);
            return false;
        }
        if self.units.contains_key(&unit.id) {
            tracing::warn!("unit id {} is already in play", unit.id);
            return false;
        }

        unit.facing = facing;
        let id = unit.id.clone();
        self.by_pos.insert(pos, id.clone());
        self.positions.insert(id.clone(), pos);
        self.units.insert(id.clone(), unit);
        self.roster.push(id);
        true
    }

    // ========================================================================
    // MOVE LEGALITY AND EXECUTION
    // ========================================================================

    /// Hexes this unit may step toward: existing neighbors that are empty
    /// or hold an enemy. Whether an attack can actually land is decided at
    /// execution time, so these are necessary but not sufficient.
    pub fn legal_destinations(&self, id: &str) -> Vec<Pos> {
        let mut moves = Vec::new();
        let Some(unit) = self.units.get(id) else {
            return moves;
        };
        let Some(from) = self.position_of(id) else {
            return moves;
        };

        for side in ALL_SIDES {
            if let Some(next) = self.grid.neighbor(from, side) {
                match self.unit_at(next) {
                    Some(other) if other.player == unit.player => {}
                    _ => moves.push(next),
                }
            }
        }
        moves
    }

    /// Execute a move. `false` means the move was rejected and the board
    /// was not touched at all; `true` means the board changed, possibly
    /// including the mover's own death.
    pub fn execute_move(&mut self, id: &str, to: Pos) -> bool {
        if !self.legal_destinations(id).contains(&to) {
            return false;
        }
        let from = self.positions[id];
        let dir = self
            .grid
            .direction_between(from, to)
            .expect("legal destination is adjacent");
        self.resolve_move(id, from, to, dir)
    }

    /// Has either side been wiped out?
    pub fn is_game_over(&self) -> bool {
        self.unit_count(Player::Elf) == 0 || self.unit_count(Player::Orc) == 0
    }

    /// The surviving player once the other is wiped out; None while the
    /// game is ongoing (or if the board is empty).
    pub fn winner(&self) -> Option<Player> {
        let elves = self.unit_count(Player::Elf);
        let orcs = self.unit_count(Player::Orc);
        match (elves, orcs) {
            (0, 0) => None,
            (_, 0) => Some(Player::Elf),
            (0, _) => Some(Player::Orc),
            _ => None,
        }
    }

    // ========================================================================
    // COMBAT RESOLUTION
    // ========================================================================

    /// The full resolution sequence, in fixed order: spear check at the
    /// origin, occupancy, pre-arrival weapon effects, the step itself,
    /// spear check at the destination, then the mover's own spears.
    /// Only the two occupancy rejections leave the board unchanged.
    fn resolve_move(&mut self, id: &str, from: Pos, to: Pos, dir: Side) -> bool {
        let mover = self.units.get_mut(id).expect("mover is alive");
        let player = mover.player;
        let prev_facing = mover.facing;
        // The mover turns toward the move before anything resolves, so the
        // origin spear check already sees the new shield orientation.
        mover.facing = dir;

        if self.spear_threatened(id, from) {
            // Died mid-step; the move still counts as made.
            self.kill(id);
            return true;
        }

        let weapon = self.units[id].weapon_on_side(dir);

        if let Some(defender_id) = self.by_pos.get(&to).cloned() {
            let defender = &self.units[&defender_id];
            if defender.player == player || !self.can_capture(id, &defender_id, dir) {
                // Rejected move: nothing may be left mutated, facing included.
                self.units.get_mut(id).expect("mover is alive").facing = prev_facing;
                return false;
            }
            // Push leaves the defender standing; it gets displaced below.
            if weapon != Weapon::Push {
                self.kill(&defender_id);
            }
        }

        match weapon {
            Weapon::Axe | Weapon::StrongAxe => self.kill_adjacent_enemies(to, player),
            Weapon::Bow => self.fire_bow(from, dir, player),
            Weapon::Push => self.push_defender(to, dir, player),
            _ => {}
        }

        self.by_pos.remove(&from);
        self.by_pos.insert(to, id.to_string());
        self.positions.insert(id.to_string(), to);

        if self.spear_threatened(id, to) {
            self.kill(id);
            return true;
        }

        self.spear_sweep(id, to);
        true
    }

    /// Whether the attacker may enter the defender's hex by force: a
    /// shield toward the attack blocks everything; otherwise only axes
    /// and push break in.
    fn can_capture(&self, attacker_id: &str, defender_id: &str, dir: Side) -> bool {
        let attacker = &self.units[attacker_id];
        let defender = &self.units[defender_id];
        if defender.weapon_on_side(dir.opposite()).is_shield() {
            return false;
        }
        matches!(
            attacker.weapon_on_side(dir),
            Weapon::Axe | Weapon::StrongAxe | Weapon::Push
        )
    }

    /// Spear vulnerability at `pos`: some enemy neighbor aims a spear here
    /// and the unit has no shield toward that enemy. One hit is enough.
    fn spear_threatened(&self, id: &str, pos: Pos) -> bool {
        let unit = &self.units[id];
        for side in ALL_SIDES {
            let Some(neighbor) = self.grid.neighbor(pos, side) else {
                continue;
            };
            let Some(other) = self.unit_at(neighbor) else {
                continue;
            };
            if other.player == unit.player {
                continue;
            }
            if other.weapon_on_side(side.opposite()) == Weapon::Spear
                && !unit.weapon_on_side(side).is_shield()
            {
                return true;
            }
        }
        false
    }

    /// Axe sweep: every enemy adjacent to `center` dies, shields or not.
    fn kill_adjacent_enemies(&mut self, center: Pos, player: Player) {
        let victims: Vec<String> = ALL_SIDES
            .iter()
            .filter_map(|&side| {
                let neighbor = self.grid.neighbor(center, side)?;
                let victim_id = self.by_pos.get(&neighbor)?;
                (self.units[victim_id.as_str()].player != player).then(|| victim_id.clone())
            })
            .collect();
        for victim_id in victims {
            self.kill(&victim_id);
        }
    }

    /// Bow ray from the origin: travels until the first occupied hex or
    /// the board edge. A friendly blocks harmlessly; an enemy dies unless
    /// shielded toward the shot. The arrow stops either way.
    fn fire_bow(&mut self, origin: Pos, dir: Side, player: Player) {
        let mut current = origin;
        while let Some(next) = self.grid.neighbor(current, dir) {
            current = next;
            if let Some(target_id) = self.by_pos.get(&current).cloned() {
                let target = &self.units[&target_id];
                let hit = target.player != player
                    && !target.weapon_on_side(dir.opposite()).is_shield();
                if hit {
                    self.kill(&target_id);
                }
                break;
            }
        }
    }

    /// Push displacement: the enemy at `target_pos` is shoved one hex
    /// onward. Off-board or into an occupied hex is lethal; otherwise it
    /// relocates, and a spear can catch it where it lands.
    fn push_defender(&mut self, target_pos: Pos, dir: Side, player: Player) {
        let Some(target_id) = self.by_pos.get(&target_pos).cloned() else {
            return;
        };
        if self.units[&target_id].player == player {
            return;
        }

        match self.grid.neighbor(target_pos, dir) {
            Some(dest) if self.unit_at(dest).is_none() => {
                self.by_pos.remove(&target_pos);
                self.by_pos.insert(dest, target_id.clone());
                self.positions.insert(target_id.clone(), dest);
                if self.spear_threatened(&target_id, dest) {
                    self.kill(&target_id);
                }
            }
            _ => self.kill(&target_id),
        }
    }

    /// The mover's own spears strike every unshielded adjacent enemy.
    fn spear_sweep(&mut self, id: &str, pos: Pos) {
        let player = self.units[id].player;
        let victims: Vec<String> = ALL_SIDES
            .iter()
            .filter_map(|&side| {
                if self.units[id].weapon_on_side(side) != Weapon::Spear {
                    return None;
                }
                let neighbor = self.grid.neighbor(pos, side)?;
                let victim_id = self.by_pos.get(&neighbor)?;
                let victim = &self.units[victim_id.as_str()];
                (victim.player != player && !victim.weapon_on_side(side.opposite()).is_shield())
                    .then(|| victim_id.clone())
            })
            .collect();
        for victim_id in victims {
            self.kill(&victim_id);
        }
    }

    /// Remove a unit from play. The position maps, the living set and the
    /// roster change in this one place; a unit dies exactly once.
    fn kill(&mut self, id: &str) {
        let pos = self.positions.remove(id).expect("killed unit had a position");
        let mapped = self.by_pos.remove(&pos);
        debug_assert_eq!(mapped.as_deref(), Some(id));
        self.units.remove(id).expect("killed unit was alive");
        self.roster.retain(|other| other != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{loadout_by_id, Loadout};

    fn stock(id: &str) -> Loadout {
        loadout_by_id(id).unwrap().items
    }

    fn place(board: &mut Board, id: &str, player: Player, loadout: &str, pos: Pos, facing: Side) {
        let unit = Unit::new(id, player, stock(loadout));
        assert!(board.place_unit(pos, unit, facing), "placement of {} failed", id);
    }

    fn board5() -> Board {
        Board::new(5, 5)
    }

    #[test]
    fn test_place_unit_rejects_bad_hexes() {
        let mut board = board5();
        let unit = Unit::new("E1", Player::Elf, stock("swordsman"));
        // (4,1) is off the narrow odd row
        assert!(!board.place_unit(Pos::new(4, 1), unit.clone(), Side::UpRight));

        assert!(board.place_unit(Pos::new(2, 2), unit, Side::UpRight));
        let other = Unit::new("E2", Player::Elf, stock("swordsman"));
        assert!(!board.place_unit(Pos::new(2, 2), other, Side::UpRight));
        assert_eq!(board.unit_count(Player::Elf), 1);
    }

    #[test]
    fn test_legal_destinations_exclude_friends() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "swordsman", Pos::new(2, 2), Side::UpRight);
        place(&mut board, "E2", Player::Elf, "swordsman", Pos::new(3, 2), Side::UpRight);
        place(&mut board, "O1", Player::Orc, "swordsman", Pos::new(1, 2), Side::Right);

        let moves = board.legal_destinations("E1");
        assert!(!moves.contains(&Pos::new(3, 2)), "friendly hex is not a destination");
        assert!(moves.contains(&Pos::new(1, 2)), "enemy hex is a destination");
        assert!(moves.contains(&Pos::new(2, 1)));
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_move_to_empty_hex() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "swordsman", Pos::new(2, 2), Side::UpRight);

        assert!(board.execute_move("E1", Pos::new(3, 2)));
        assert_eq!(board.position_of("E1"), Some(Pos::new(3, 2)));
        assert!(board.unit_at(Pos::new(2, 2)).is_none());
        // Facing follows the move direction
        assert_eq!(board.unit("E1").unwrap().facing, Side::Right);
    }

    #[test]
    fn test_unkillable_attack_leaves_board_untouched() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "swordsman", Pos::new(2, 2), Side::UpRight);
        place(&mut board, "O1", Player::Orc, "swordsman", Pos::new(3, 2), Side::Right);

        let before = board.clone();
        assert!(!board.execute_move("E1", Pos::new(3, 2)));
        assert_eq!(board, before, "a failed move must not mutate anything");
    }

    #[test]
    fn test_shield_blocks_frontal_axe() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "axeman", Pos::new(2, 2), Side::UpRight);
        // Shieldguard turned Left presents its strong shield toward E1
        place(&mut board, "O1", Player::Orc, "shieldguard", Pos::new(3, 2), Side::Left);

        let before = board.clone();
        assert!(!board.execute_move("E1", Pos::new(3, 2)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_axe_capture_and_adjacency_sweep() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "axeman", Pos::new(2, 2), Side::UpRight);
        place(&mut board, "O1", Player::Orc, "swordsman", Pos::new(3, 2), Side::Left);
        // Shielded bystanders adjacent to the destination still die to the sweep
        place(&mut board, "O2", Player::Orc, "shieldguard", Pos::new(3, 1), Side::DownLeft);
        place(&mut board, "O3", Player::Orc, "shieldguard", Pos::new(3, 3), Side::UpLeft);

        assert!(board.execute_move("E1", Pos::new(3, 2)));
        assert_eq!(board.position_of("E1"), Some(Pos::new(3, 2)));
        assert_eq!(board.unit_count(Player::Orc), 0, "shields do not stop the sweep");
    }

    #[test]
    fn test_bow_blocked_by_friendly() {
        let mut board = board5();
        // Line along row 2: archer, two empty hexes, friendly, then enemy
        place(&mut board, "E1", Player::Elf, "archer", Pos::new(0, 2), Side::Right);
        place(&mut board, "E2", Player::Elf, "swordsman", Pos::new(3, 2), Side::Right);
        place(&mut board, "O1", Player::Orc, "swordsman", Pos::new(4, 2), Side::Left);

        assert!(board.execute_move("E1", Pos::new(1, 2)));
        assert_eq!(board.unit_count(Player::Elf), 2);
        assert_eq!(board.unit_count(Player::Orc), 1, "the friendly blocked the arrow");
    }

    #[test]
    fn test_bow_kills_first_enemy_on_ray() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "archer", Pos::new(0, 2), Side::Right);
        place(&mut board, "O1", Player::Orc, "swordsman", Pos::new(3, 2), Side::Left);
        place(&mut board, "O2", Player::Orc, "swordsman", Pos::new(4, 2), Side::Left);

        assert!(board.execute_move("E1", Pos::new(1, 2)));
        assert!(board.unit("O1").is_none(), "first enemy on the ray dies");
        assert!(board.unit("O2").is_some(), "the arrow does not pass through");
    }

    #[test]
    fn test_bow_stopped_by_shield() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "archer", Pos::new(0, 2), Side::Right);
        // Strong shield turned toward the shot
        place(&mut board, "O1", Player::Orc, "shieldguard", Pos::new(3, 2), Side::Left);
        place(&mut board, "O2", Player::Orc, "swordsman", Pos::new(4, 2), Side::Left);

        assert!(board.execute_move("E1", Pos::new(1, 2)));
        assert_eq!(board.unit_count(Player::Orc), 2, "shielded target survives, arrow stops");
    }

    #[test]
    fn test_spear_kills_mover_on_arrival() {
        let mut board = board5();
        // Orc spear points Left at (2,2)
        place(&mut board, "O1", Player::Orc, "spearman", Pos::new(3, 2), Side::Left);
        place(&mut board, "E1", Player::Elf, "swordsman", Pos::new(1, 2), Side::Right);

        assert!(board.execute_move("E1", Pos::new(2, 2)), "the move itself succeeds");
        assert!(board.unit("E1").is_none(), "unshielded arrival next to a spear is lethal");
        assert!(board.unit_at(Pos::new(2, 2)).is_none());
    }

    #[test]
    fn test_shield_survives_arrival_next_to_spear() {
        let mut board = board5();
        place(&mut board, "O1", Player::Orc, "spearman", Pos::new(3, 2), Side::Left);
        // Shieldguard moving Right ends with its strong shield forward
        place(&mut board, "E1", Player::Elf, "shieldguard", Pos::new(1, 2), Side::UpRight);

        assert!(board.execute_move("E1", Pos::new(2, 2)));
        assert_eq!(board.position_of("E1"), Some(Pos::new(2, 2)));
    }

    #[test]
    fn test_spear_kills_mover_at_origin() {
        let mut board = board5();
        place(&mut board, "O1", Player::Orc, "spearman", Pos::new(3, 2), Side::Left);
        place(&mut board, "E1", Player::Elf, "swordsman", Pos::new(2, 2), Side::UpRight);

        // Stepping away exposes E1 at its origin before it leaves
        assert!(board.execute_move("E1", Pos::new(2, 3)));
        assert!(board.unit("E1").is_none(), "the mover died mid-step");
        assert!(board.unit_at(Pos::new(2, 3)).is_none(), "it never arrived");
        assert!(board.unit_at(Pos::new(2, 2)).is_none());
    }

    #[test]
    fn test_spear_sweep_after_move() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "swordsman", Pos::new(2, 2), Side::UpRight);
        place(&mut board, "O1", Player::Orc, "spearman", Pos::new(4, 2), Side::Left);

        // Spearman steps Left; its spear now aims at (2,2)
        assert!(board.execute_move("O1", Pos::new(3, 2)));
        assert!(board.unit("E1").is_none(), "the spear sweep caught the swordsman");
        assert_eq!(board.position_of("O1"), Some(Pos::new(3, 2)));
    }

    #[test]
    fn test_push_displaces_defender() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "brawler", Pos::new(2, 2), Side::UpRight);
        place(&mut board, "O1", Player::Orc, "swordsman", Pos::new(3, 2), Side::Left);

        assert!(board.execute_move("E1", Pos::new(3, 2)));
        assert_eq!(board.position_of("E1"), Some(Pos::new(3, 2)));
        assert_eq!(board.position_of("O1"), Some(Pos::new(4, 2)), "defender shoved one hex on");
    }

    #[test]
    fn test_push_into_occupied_hex_kills() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "brawler", Pos::new(2, 2), Side::UpRight);
        place(&mut board, "O1", Player::Orc, "swordsman", Pos::new(3, 2), Side::Left);
        place(&mut board, "O2", Player::Orc, "swordsman", Pos::new(4, 2), Side::Left);

        assert!(board.execute_move("E1", Pos::new(3, 2)));
        assert!(board.unit("O1").is_none(), "nowhere to go");
        assert_eq!(board.position_of("O2"), Some(Pos::new(4, 2)));
    }

    #[test]
    fn test_push_off_board_kills() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "brawler", Pos::new(3, 2), Side::UpRight);
        place(&mut board, "O1", Player::Orc, "swordsman", Pos::new(4, 2), Side::Left);

        assert!(board.execute_move("E1", Pos::new(4, 2)));
        assert!(board.unit("O1").is_none());
        assert_eq!(board.position_of("E1"), Some(Pos::new(4, 2)));
    }

    #[test]
    fn test_pushed_unit_lands_on_a_spear() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "brawler", Pos::new(2, 2), Side::UpRight);
        place(&mut board, "O1", Player::Orc, "swordsman", Pos::new(3, 2), Side::Left);
        // Elf spear aims UpRight at (4,2), where O1 will land
        place(&mut board, "E2", Player::Elf, "spearman", Pos::new(3, 3), Side::UpRight);

        assert!(board.execute_move("E1", Pos::new(3, 2)));
        assert!(board.unit("O1").is_none(), "displaced onto a waiting spear");
        assert!(board.unit_at(Pos::new(4, 2)).is_none());
    }

    #[test]
    fn test_push_blocked_by_shield() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "brawler", Pos::new(2, 2), Side::UpRight);
        place(&mut board, "O1", Player::Orc, "shieldguard", Pos::new(3, 2), Side::Left);

        let before = board.clone();
        assert!(!board.execute_move("E1", Pos::new(3, 2)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_winner_and_game_over() {
        let mut board = board5();
        place(&mut board, "E1", Player::Elf, "swordsman", Pos::new(2, 2), Side::UpRight);
        assert!(board.is_game_over());
        assert_eq!(board.winner(), Some(Player::Elf));

        place(&mut board, "O1", Player::Orc, "swordsman", Pos::new(0, 0), Side::Right);
        assert!(!board.is_game_over());
        assert_eq!(board.winner(), None);
    }
}
