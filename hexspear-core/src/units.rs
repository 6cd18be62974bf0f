//! Players, weapons and unit loadouts

use crate::grid::Side;
use serde::{Deserialize, Serialize};

/// Owning player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Elf,
    Orc,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Elf => Player::Orc,
            Player::Orc => Player::Elf,
        }
    }
}

/// Weapon slot contents. Only Axe/StrongAxe, Bow, Push, Spear and
/// Shield/StrongShield carry resolution behavior; the rest are inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weapon {
    Empty,
    AttackShield,
    Axe,
    Bow,
    Fist,
    Mace,
    Push,
    StrongAxe,
    StrongShield,
    Shield,
    Spear,
    Staff,
    Sword,
}

impl Weapon {
    /// Blocks frontal captures, bow shots and spears.
    pub fn is_shield(self) -> bool {
        matches!(self, Weapon::Shield | Weapon::StrongShield)
    }

    pub fn is_axe(self) -> bool {
        matches!(self, Weapon::Axe | Weapon::StrongAxe)
    }
}

/// Weapon slots in the unrotated reference frame, one per side.
pub type Loadout = [Weapon; 6];

/// A unit in play. Its position is owned by the board, never stored here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    pub id: String,
    pub player: Player,
    pub items: Loadout,
    /// The side this unit last moved toward; slot 0 lines up with it.
    pub facing: Side,
}

impl Unit {
    pub fn new(id: impl Into<String>, player: Player, items: Loadout) -> Self {
        Self {
            id: id.into(),
            player,
            items,
            facing: Side::UpRight,
        }
    }

    /// Weapon lined up with board side `side` under the current facing.
    /// The loadout rotates rigidly with the unit.
    pub fn weapon_on_side(&self, side: Side) -> Weapon {
        let slot = (side.index() + 6 - self.facing.index()) % 6;
        self.items[slot as usize]
    }
}

/// A named loadout archetype.
#[derive(Clone, Debug)]
pub struct LoadoutDef {
    pub id: &'static str,
    pub name: &'static str,
    pub items: Loadout,
}

impl LoadoutDef {
    const fn new(id: &'static str, name: &'static str, items: Loadout) -> Self {
        Self { id, name, items }
    }
}

/// Stock loadouts, slot 0 forward. Preset files refer to these by id.
pub static LOADOUTS: [LoadoutDef; 8] = [
    LoadoutDef::new(
        "spearman",
        "Spearman",
        [Weapon::Spear, Weapon::Empty, Weapon::Empty, Weapon::Empty, Weapon::Empty, Weapon::Empty],
    ),
    LoadoutDef::new(
        "hoplite",
        "Hoplite",
        [Weapon::Spear, Weapon::Shield, Weapon::Empty, Weapon::Empty, Weapon::Empty, Weapon::Shield],
    ),
    LoadoutDef::new(
        "axeman",
        "Axeman",
        [Weapon::Axe, Weapon::Empty, Weapon::Empty, Weapon::Fist, Weapon::Empty, Weapon::Empty],
    ),
    LoadoutDef::new(
        "berserker",
        "Berserker",
        [Weapon::StrongAxe, Weapon::Axe, Weapon::Empty, Weapon::Empty, Weapon::Empty, Weapon::Axe],
    ),
    LoadoutDef::new(
        "archer",
        "Archer",
        [Weapon::Bow, Weapon::Empty, Weapon::Empty, Weapon::Sword, Weapon::Empty, Weapon::Empty],
    ),
    LoadoutDef::new(
        "shieldguard",
        "Shieldguard",
        [Weapon::StrongShield, Weapon::Shield, Weapon::Empty, Weapon::Empty, Weapon::Empty, Weapon::Shield],
    ),
    LoadoutDef::new(
        "brawler",
        "Brawler",
        [Weapon::Push, Weapon::Fist, Weapon::Empty, Weapon::Empty, Weapon::Empty, Weapon::Fist],
    ),
    LoadoutDef::new(
        "swordsman",
        "Swordsman",
        [Weapon::Sword, Weapon::Sword, Weapon::Empty, Weapon::Empty, Weapon::Empty, Weapon::Sword],
    ),
];

/// Look up a stock loadout by id.
pub fn loadout_by_id(id: &str) -> Option<&'static LoadoutDef> {
    LOADOUTS.iter().find(|def| def.id == id)
}
