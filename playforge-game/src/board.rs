//! Board path layout
//!
//! Maps the fixed space count onto a zig-zag grid: row 0 at the bottom,
//! even rows read left-to-right, odd rows right-to-left, so the path snakes
//! from the start corner to the finish corner without crossing itself.

use crate::design::TileType;
use serde::{Deserialize, Serialize};

/// Number of spaces on every generated board, start and finish included.
pub const TOTAL_SPACES: usize = 24;
/// Grid shape the path snakes through.
pub const GRID_ROWS: usize = 4;
pub const GRID_COLS: usize = 6;

/// Normalized coordinate bounds, in percent of the board area.
pub const COORD_MIN: f32 = 10.0;
pub const COORD_MAX: f32 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceKind {
    Start,
    Finish,
    Normal,
}

/// A single space on the generated path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSpace {
    pub x: f32,
    pub y: f32,
    pub kind: SpaceKind,
    pub tile: Option<TileType>,
}

/// Compute the full path layout for a design's tile catalog.
///
/// Pure function of the tile list: two designs with the same tile-type count
/// get identical coordinates. Index 0 is the start, the final index the
/// finish; every other space is assigned a tile by `index % tile_types.len()`
/// (or none when the catalog is empty). Callers should compute this once per
/// design and cache it.
#[must_use]
pub fn board_layout(tile_types: &[TileType]) -> Vec<BoardSpace> {
    (0..TOTAL_SPACES)
        .map(|index| {
            let (x, y) = space_position(index);
            let kind = match index {
                0 => SpaceKind::Start,
                i if i == TOTAL_SPACES - 1 => SpaceKind::Finish,
                _ => SpaceKind::Normal,
            };
            let tile = if kind == SpaceKind::Normal && !tile_types.is_empty() {
                Some(tile_types[index % tile_types.len()].clone())
            } else {
                None
            };
            BoardSpace { x, y, kind, tile }
        })
        .collect()
}

/// Normalized `(x, y)` for a path index, both in `[COORD_MIN, COORD_MAX]`.
#[must_use]
pub fn space_position(index: usize) -> (f32, f32) {
    let row = index / GRID_COLS;
    let col_in_row = index % GRID_COLS;
    // Odd rows run right-to-left so consecutive indices stay adjacent.
    let col = if row % 2 == 0 {
        col_in_row
    } else {
        GRID_COLS - 1 - col_in_row
    };

    let span = COORD_MAX - COORD_MIN;
    #[allow(clippy::cast_precision_loss)]
    let x = COORD_MIN + (col as f32 / (GRID_COLS - 1) as f32) * span;
    // Row 0 sits at the bottom of the board.
    #[allow(clippy::cast_precision_loss)]
    let y = COORD_MAX - (row as f32 / (GRID_ROWS - 1) as f32) * span;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tile(name: &str, effect: &str) -> TileType {
        TileType {
            name: name.to_string(),
            effect: effect.to_string(),
            color: "#123456".to_string(),
            draws_card: None,
        }
    }

    #[test]
    fn layout_has_exactly_total_spaces() {
        let layout = board_layout(&[make_tile("A", "a"), make_tile("B", "b")]);
        assert_eq!(layout.len(), TOTAL_SPACES);
        assert_eq!(layout[0].kind, SpaceKind::Start);
        assert_eq!(layout[TOTAL_SPACES - 1].kind, SpaceKind::Finish);
        assert!(
            layout[1..TOTAL_SPACES - 1]
                .iter()
                .all(|space| space.kind == SpaceKind::Normal)
        );
    }

    #[test]
    fn layout_is_deterministic_for_fixed_tile_count() {
        let tiles_a = vec![make_tile("A", "a"), make_tile("B", "b")];
        let tiles_b = vec![make_tile("X", "x"), make_tile("Y", "y")];
        let layout_a = board_layout(&tiles_a);
        let layout_b = board_layout(&tiles_b);
        for (a, b) in layout_a.iter().zip(layout_b.iter()) {
            assert!((a.x - b.x).abs() < f32::EPSILON);
            assert!((a.y - b.y).abs() < f32::EPSILON);
        }
        // Repeated calls on the same input are identical too.
        assert_eq!(layout_a, board_layout(&tiles_a));
    }

    #[test]
    fn coordinates_stay_in_bounds() {
        for index in 0..TOTAL_SPACES {
            let (x, y) = space_position(index);
            assert!((COORD_MIN..=COORD_MAX).contains(&x), "x out of range at {index}");
            assert!((COORD_MIN..=COORD_MAX).contains(&y), "y out of range at {index}");
        }
    }

    #[test]
    fn rows_alternate_direction() {
        // Row 0 (indices 0..6) runs left-to-right.
        let (x0, _) = space_position(0);
        let (x5, _) = space_position(5);
        assert!(x0 < x5);
        // Row 1 (indices 6..12) runs right-to-left, starting under index 5.
        let (x6, _) = space_position(6);
        let (x11, _) = space_position(11);
        assert!(x6 > x11);
        assert!((x5 - x6).abs() < f32::EPSILON);
        // Row 0 sits below row 1.
        let (_, y0) = space_position(0);
        let (_, y6) = space_position(6);
        assert!(y0 > y6);
    }

    #[test]
    fn tiles_assigned_by_index_modulo() {
        let tiles = vec![make_tile("Recycle", "Draw a card"), make_tile("Litter", "Lose a turn")];
        let layout = board_layout(&tiles);
        assert_eq!(layout[4].tile.as_ref().unwrap().name, "Recycle");
        assert_eq!(layout[5].tile.as_ref().unwrap().name, "Litter");
        assert!(layout[0].tile.is_none());
        assert!(layout[TOTAL_SPACES - 1].tile.is_none());
    }

    #[test]
    fn empty_catalog_yields_tileless_spaces() {
        let layout = board_layout(&[]);
        assert!(layout.iter().all(|space| space.tile.is_none()));
    }
}
