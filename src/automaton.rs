use crate::{grid::OccupancyGrid, sampling::RandomSource};

use serde::{Deserialize, Serialize};
use std::mem;

/// One smoothing rule, applied `passes` times.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct SmoothingRule {
    /// A solid cell stays solid iff at least this many of its 8 neighbours are solid.
    pub solid_survive_min: u32,
    /// An open cell fills in iff at least this many of its 8 neighbours are solid.
    pub open_fill_min: u32,
    /// An open cell also fills in when its radius-2 ring holds at most this many solid
    /// cells. This breaks up very large open chambers with pillars.
    pub open_space_max: Option<u32>,
    pub passes: usize,
}

impl SmoothingRule {
    /// Shapes organic caverns.
    pub const CAVERN: SmoothingRule = SmoothingRule {
        solid_survive_min: 4,
        open_fill_min: 5,
        open_space_max: Some(2),
        passes: 4,
    };

    /// Cleans up single-cell noise and thin walls without carving new chambers.
    pub const CLEANUP: SmoothingRule = SmoothingRule {
        solid_survive_min: 4,
        open_fill_min: 5,
        open_space_max: None,
        passes: 3,
    };

    pub fn next_state(&self, grid: &OccupancyGrid, x: i32, y: i32) -> bool {
        let n1 = grid.count_occupied(1, x, y);
        if grid.is_solid(x, y) {
            return n1 >= self.solid_survive_min;
        }
        if n1 >= self.open_fill_min {
            return true;
        }

        match self.open_space_max {
            Some(max) => grid.count_occupied(2, x, y) <= max,
            None => false,
        }
    }
}

/// Runs the cellular automaton over a pair of grids, reading one snapshot and writing
/// the other each pass.
pub struct CaveAutomaton {
    front: OccupancyGrid,
    back: OccupancyGrid,
}

impl CaveAutomaton {
    pub fn new(initial: OccupancyGrid) -> Self {
        let back = initial.clone();

        CaveAutomaton {
            front: initial,
            back,
        }
    }

    /// Every cell starts solid with probability `solid_chance`.
    pub fn seeded(
        width: usize,
        height: usize,
        solid_chance: f32,
        rng: &mut impl RandomSource,
    ) -> Self {
        let mut grid = OccupancyGrid::new(width, height, false);
        for x in 0..width {
            for y in 0..height {
                if rng.random_f32() < solid_chance {
                    grid.set(x, y, true);
                }
            }
        }
        log::debug!(
            "Seeded {}x{} grid with {} open cells",
            width,
            height,
            grid.open_count()
        );

        CaveAutomaton::new(grid)
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.front
    }

    pub fn step(&mut self, rule: &SmoothingRule) {
        for p in self.front.positions() {
            let solid = rule.next_state(&self.front, p.x, p.y);
            self.back.set(p.x as usize, p.y as usize, solid);
        }
        mem::swap(&mut self.front, &mut self.back);
    }

    /// Applies `rule` exactly `rule.passes` times. There is no early exit on a stable grid.
    pub fn run(&mut self, rule: &SmoothingRule) {
        for _ in 0..rule.passes {
            self.step(rule);
        }
        log::debug!(
            "{} smoothing passes done, {} open cells",
            rule.passes,
            self.front.open_count()
        );
    }

    /// Forces the outermost ring solid, whatever the automaton left there.
    pub fn seal_border(&mut self) {
        seal_border(&mut self.front);
    }

    pub fn into_grid(self) -> OccupancyGrid {
        self.front
    }
}

pub fn seal_border(grid: &mut OccupancyGrid) {
    let (width, height) = (grid.width(), grid.height());
    for x in 0..width {
        for y in 0..height {
            if grid.is_border(x, y) {
                grid.set(x, y, true);
            }
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
