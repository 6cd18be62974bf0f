//! Game presets: unit rosters, placements and generators
//!
//! A preset is the JSON boundary between the core and whatever loads or
//! edits setups. Loadouts are either named table entries or explicit
//! six-weapon arrays:
//!
//! ```json
//! {
//!   "name": "duel",
//!   "width": 5,
//!   "height": 5,
//!   "units": [
//!     { "id": "E1", "player": "Elf", "loadout": "hoplite",
//!       "pos": { "q": 1, "r": 1 }, "facing": "DownRight" }
//!   ]
//! }
//! ```

use crate::board::Board;
use crate::grid::{Pos, Side};
use crate::units::{loadout_by_id, Loadout, Player, Unit, LOADOUTS};
use anyhow::Context;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Why a preset could not be turned into a board.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("unknown loadout id: {0}")]
    UnknownLoadout(String),
    #[error("duplicate unit id: {0}")]
    DuplicateUnit(String),
    #[error("invalid or occupied placement at ({q},{r}) for unit {id}")]
    BadPlacement { id: String, q: i8, r: i8 },
}

/// A named entry from the loadout table, or an explicit six-slot array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoadoutSpec {
    Named(String),
    Explicit(Loadout),
}

impl LoadoutSpec {
    fn resolve(&self) -> Result<Loadout, PresetError> {
        match self {
            LoadoutSpec::Named(id) => loadout_by_id(id)
                .map(|def| def.items)
                .ok_or_else(|| PresetError::UnknownLoadout(id.clone())),
            LoadoutSpec::Explicit(items) => Ok(*items),
        }
    }
}

/// One unit's identity, kit and starting placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub id: String,
    pub player: Player,
    pub loadout: LoadoutSpec,
    pub pos: Pos,
    pub facing: Side,
}

/// A complete game setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub width: i8,
    pub height: i8,
    pub units: Vec<UnitSpec>,
}

impl Preset {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading preset {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("parsing preset {}", path.display()))
    }

    /// Save to a JSON file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("writing preset {}", path.display()))?;
        Ok(())
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the starting board.
    pub fn to_board(&self) -> Result<Board, PresetError> {
        let mut board = Board::new(self.width, self.height);
        for spec in &self.units {
            let items = spec.loadout.resolve()?;
            if board.unit(&spec.id).is_some() {
                return Err(PresetError::DuplicateUnit(spec.id.clone()));
            }
            let unit = Unit::new(spec.id.clone(), spec.player, items);
            if !board.place_unit(spec.pos, unit, spec.facing) {
                return Err(PresetError::BadPlacement {
                    id: spec.id.clone(),
                    q: spec.pos.q,
                    r: spec.pos.r,
                });
            }
        }
        Ok(board)
    }

    /// Random symmetric skirmish on the default 5x5 board: both armies
    /// draw the same loadout sequence, elves on the top rows facing down,
    /// orcs mirrored on the bottom rows facing up.
    pub fn random_skirmish<R: Rng>(rng: &mut R, name: &str, per_side: usize) -> Self {
        // Two rows per side: 5 + 4 slots
        let per_side = per_side.min(9);
        let mut units = Vec::with_capacity(per_side * 2);

        for i in 0..per_side {
            let def = &LOADOUTS[rng.gen_range(0..LOADOUTS.len())];
            let (elf_pos, orc_pos) = if i < 5 {
                (Pos::new(i as i8, 0), Pos::new(i as i8, 4))
            } else {
                (Pos::new((i - 5) as i8, 1), Pos::new((i - 5) as i8, 3))
            };

            units.push(UnitSpec {
                id: format!("E{}", i + 1),
                player: Player::Elf,
                loadout: LoadoutSpec::Named(def.id.to_string()),
                pos: elf_pos,
                facing: Side::DownRight,
            });
            units.push(UnitSpec {
                id: format!("O{}", i + 1),
                player: Player::Orc,
                loadout: LoadoutSpec::Named(def.id.to_string()),
                pos: orc_pos,
                facing: Side::UpLeft,
            });
        }

        Self {
            name: name.to_string(),
            width: 5,
            height: 5,
            units,
        }
    }

    /// Small fixed setup: two pairs squaring off across the middle row.
    pub fn duel() -> Self {
        let spec = |id: &str, player, loadout: &str, pos, facing| UnitSpec {
            id: id.to_string(),
            player,
            loadout: LoadoutSpec::Named(loadout.to_string()),
            pos,
            facing,
        };

        Self {
            name: "duel".to_string(),
            width: 5,
            height: 5,
            units: vec![
                spec("E1", Player::Elf, "hoplite", Pos::new(1, 1), Side::DownRight),
                spec("E2", Player::Elf, "archer", Pos::new(2, 1), Side::DownLeft),
                spec("O1", Player::Orc, "spearman", Pos::new(1, 3), Side::UpRight),
                spec("O2", Player::Orc, "brawler", Pos::new(2, 3), Side::UpLeft),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Weapon;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_parse_named_and_explicit_loadouts() {
        let json = r#"{
            "name": "mixed",
            "width": 5,
            "height": 5,
            "units": [
                { "id": "E1", "player": "Elf", "loadout": "spearman",
                  "pos": { "q": 0, "r": 0 }, "facing": "DownRight" },
                { "id": "O1", "player": "Orc",
                  "loadout": ["Axe", "Empty", "Empty", "Shield", "Empty", "Empty"],
                  "pos": { "q": 0, "r": 4 }, "facing": "UpRight" }
            ]
        }"#;

        let preset = Preset::from_json(json).unwrap();
        let board = preset.to_board().unwrap();

        assert_eq!(board.unit("E1").unwrap().items[0], Weapon::Spear);
        assert_eq!(board.unit("O1").unwrap().items[0], Weapon::Axe);
        assert_eq!(board.unit("O1").unwrap().facing, Side::UpRight);
    }

    #[test]
    fn test_unknown_loadout_is_an_error() {
        let preset = Preset {
            name: "bad".to_string(),
            width: 5,
            height: 5,
            units: vec![UnitSpec {
                id: "E1".to_string(),
                player: Player::Elf,
                loadout: LoadoutSpec::Named("ballista".to_string()),
                pos: Pos::new(0, 0),
                facing: Side::Right,
            }],
        };

        assert!(matches!(preset.to_board(), Err(PresetError::UnknownLoadout(_))));
    }

    #[test]
    fn test_colliding_placement_is_an_error() {
        let mut preset = Preset::duel();
        preset.units[1].pos = preset.units[0].pos;
        assert!(matches!(preset.to_board(), Err(PresetError::BadPlacement { .. })));
    }

    #[test]
    fn test_duel_builds() {
        let board = Preset::duel().to_board().unwrap();
        assert_eq!(board.unit_count(Player::Elf), 2);
        assert_eq!(board.unit_count(Player::Orc), 2);
    }

    #[test]
    fn test_random_skirmish_is_seeded() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        let first = Preset::random_skirmish(&mut a, "s", 6);
        let second = Preset::random_skirmish(&mut b, "s", 6);
        assert_eq!(first, second);
        assert_eq!(first.units.len(), 12);
        first.to_board().unwrap();
    }
}
