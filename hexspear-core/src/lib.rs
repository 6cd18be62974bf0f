//! HEXSPEAR Core - rules engine and AI
//!
//! This crate provides the core game logic for HEXSPEAR:
//! - Offset hex grid geometry (odd-r rows, odd rows one cell narrower)
//! - Units with rotating six-slot weapon loadouts
//! - Board state and the ordered combat resolution sequence
//! - Full-state snapshots for search undo
//! - Negamax alpha-beta move search
//! - JSON setup presets

pub mod ai;
pub mod board;
pub mod eval;
pub mod grid;
pub mod preset;
pub mod snapshot;
pub mod units;

// Re-exports for convenient access
pub use ai::{SearchAi, Suggestion};
pub use board::Board;
pub use eval::{evaluate, UNIT_VALUE, WIN_VALUE};
pub use grid::{Grid, Pos, Side, ALL_SIDES};
pub use preset::{LoadoutSpec, Preset, PresetError, UnitSpec};
pub use snapshot::Snapshot;
pub use units::{loadout_by_id, Loadout, LoadoutDef, Player, Unit, Weapon, LOADOUTS};
