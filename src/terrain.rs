use crate::{grid::OccupancyGrid, map::Map, sampling::RandomSource};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TerrainKind {
    FloorCommon,
    FloorRare,
    /// Solid rock with at least one open neighbour; this is the face the player sees.
    WallVisible,
    /// Solid rock buried behind other rock. Never seen, never drawn.
    Void,
}

impl TerrainKind {
    pub fn is_floor(self) -> bool {
        matches!(self, TerrainKind::FloorCommon | TerrainKind::FloorRare)
    }

    pub fn is_solid(self) -> bool {
        !self.is_floor()
    }

    pub fn description(self) -> &'static str {
        match self {
            TerrainKind::FloorCommon => "a cave floor",
            TerrainKind::FloorRare => "a cave floor, strewn with pebbles",
            TerrainKind::WallVisible => "a cave wall",
            TerrainKind::Void => "nothing",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainCell {
    pub kind: TerrainKind,
    /// Picks among sprites of the same kind. Has no effect on gameplay.
    pub variant: u8,
    pub blocks_movement: bool,
    /// Never observed yet.
    pub hidden: bool,
    /// Observed before but out of sight now.
    pub forgotten: bool,
}

impl TerrainCell {
    pub fn new(kind: TerrainKind, variant: u8) -> Self {
        TerrainCell {
            kind,
            variant,
            blocks_movement: kind.is_solid(),
            hidden: true,
            forgotten: false,
        }
    }
}

/// How floor variants are drawn.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FloorPalette {
    pub common_chance: f32,
    /// Inclusive range of variants for common floor.
    pub common_variants: (u8, u8),
    /// Inclusive range of variants for rare floor.
    pub rare_variants: (u8, u8),
}

impl Default for FloorPalette {
    fn default() -> Self {
        FloorPalette {
            common_chance: 0.8,
            common_variants: (10, 16),
            rare_variants: (1, 9),
        }
    }
}

impl FloorPalette {
    fn sample(&self, rng: &mut impl RandomSource) -> TerrainCell {
        let (kind, (low, high)) = if rng.random_f32() <= self.common_chance {
            (TerrainKind::FloorCommon, self.common_variants)
        } else {
            (TerrainKind::FloorRare, self.rare_variants)
        };
        let variant = rng.random_int(i32::from(low), i32::from(high)) as u8;

        TerrainCell::new(kind, variant)
    }
}

/// Turns a finished occupancy grid into typed terrain. Cells are visited x-outer, y-inner,
/// which fixes the order of the floor variant draws.
pub fn classify(
    grid: &OccupancyGrid,
    palette: &FloorPalette,
    rng: &mut impl RandomSource,
) -> Map {
    let mut cells = Vec::with_capacity(grid.width() * grid.height());
    let mut walls = 0;
    let mut voids = 0;
    for p in grid.positions() {
        let cell = if !grid.is_solid(p.x, p.y) {
            palette.sample(rng)
        } else if grid.count_open(p.x, p.y) > 0 {
            walls += 1;
            TerrainCell::new(TerrainKind::WallVisible, 0)
        } else {
            voids += 1;
            TerrainCell::new(TerrainKind::Void, 0)
        };
        cells.push(cell);
    }
    log::debug!(
        "Classified {} floor, {} wall, {} void cells",
        cells.len() - walls - voids,
        walls,
        voids
    );

    Map::from_cells(grid.width(), grid.height(), cells)
}
