//! Grids derived from a `Map` for the pathfinder and the field-of-view solver.
//!
//! Nothing here is cached: dynamic occupants move every turn, so each call rebuilds its
//! grid from the map and the occupant list it is given. Grids are indexed `[x][y]`.

use crate::{map::Map, terrain::TerrainKind, Position};

use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

/// Something standing on the map that may block movement beyond the terrain itself.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Occupant {
    pub position: Position,
    /// Pass-through things like decorations set this to false.
    pub blocks_movement: bool,
}

impl Occupant {
    pub fn new(position: Position, blocks_movement: bool) -> Self {
        Occupant {
            position,
            blocks_movement,
        }
    }

    pub(crate) fn blocking_positions(occupants: &[Occupant]) -> FnvHashSet<Position> {
        occupants
            .iter()
            .filter(|o| o.blocks_movement)
            .map(|o| o.position)
            .collect()
    }
}

impl Map {
    /// Out-of-range positions are blocked.
    pub fn is_blocked(&self, p: Position, occupants: &[Occupant]) -> bool {
        match self.cell_at(p) {
            Some(cell) if !cell.blocks_movement => occupants
                .iter()
                .any(|o| o.blocks_movement && o.position == p),
            _ => true,
        }
    }

    /// `true` where terrain or a blocking occupant stops movement.
    pub fn blocking_mask(&self, occupants: &[Occupant]) -> Vec<Vec<bool>> {
        let blockers = Occupant::blocking_positions(occupants);

        self.column_grid(|p, cell| cell.blocks_movement || blockers.contains(&p))
    }

    /// Light resistance: 1.0 for rock, 0.0 for floor.
    pub fn resistance_mask(&self) -> Vec<Vec<f32>> {
        self.column_grid(|_, cell| if cell.kind.is_solid() { 1.0 } else { 0.0 })
    }

    /// Counts visible walls in the 3x3 square around `(x, y)`. The center itself and any
    /// square past the edge always count, the same way edges count as rock during
    /// generation.
    pub fn wall_neighbor_count(&self, x: i32, y: i32) -> u32 {
        let mut count = 0;
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    count += 1;
                    continue;
                }
                match self.cell(x + dx, y + dy) {
                    Some(cell) if cell.kind == TerrainKind::WallVisible => count += 1,
                    Some(_) => {}
                    None => count += 1,
                }
            }
        }

        count
    }

    /// Cells a thrown object may path through: seen floor only.
    pub fn targeting_mask(&self) -> Vec<Vec<bool>> {
        self.column_grid(|_, cell| cell.kind.is_floor() && !cell.hidden)
    }

    /// Cells the look cursor may move over. With `care_about_walls` the cursor stops at
    /// visible walls; otherwise anything already seen is fair game.
    pub fn looking_mask(&self, care_about_walls: bool) -> Vec<Vec<bool>> {
        self.column_grid(|_, cell| {
            !cell.hidden && !(care_about_walls && cell.kind == TerrainKind::WallVisible)
        })
    }
}
