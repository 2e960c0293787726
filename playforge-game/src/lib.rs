//! Playforge Simulation Engine
//!
//! Platform-agnostic core for playtesting externally generated educational
//! board-game designs. This crate provides the board layout, turn state
//! machine, and card draw logic without UI or platform-specific dependencies.

pub mod board;
pub mod design;
pub mod rng;
pub mod sim;

// Re-export commonly used types
pub use board::{
    BoardSpace, COORD_MAX, COORD_MIN, GRID_COLS, GRID_ROWS, SpaceKind, TOTAL_SPACES, board_layout,
    space_position,
};
pub use design::{CardType, DesignError, GameDesign, TileType};
pub use rng::{DIE_SIDES, RandomSource, UniformSource};
pub use sim::{
    CARD_DRAW_CHANCE, CARD_DRAW_DELAY_MS, Cue, DrawnCard, Phase, ROLL_DELAY_MS, RollOutcome,
    Simulation,
};
