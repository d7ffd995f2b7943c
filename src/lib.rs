pub mod automaton;
pub mod error;
pub mod graph;
pub mod grid;
pub mod map;
pub mod map_types;
pub mod nav;
pub mod sampling;
pub mod spawn;
pub mod terrain;

pub use error::{CaveError, Result};
pub use grid::OccupancyGrid;
pub use map::Map;
pub use map_types::cave::{generate_cave, Cave, CaveMapSpec};
pub use nav::Occupant;
pub use sampling::RandomSource;
pub use terrain::{TerrainCell, TerrainKind};

use serde::{Deserialize, Serialize};

/// A cell coordinate. Signed so that queries just outside the map are representable.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Position::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}
