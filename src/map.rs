use crate::{
    terrain::{TerrainCell, TerrainKind},
    Position,
};

/// A classified cave level. Terrain is fixed once generated; only the visibility memory
/// of each cell changes while the level is played.
#[derive(Clone, Debug)]
pub struct Map {
    width: usize,
    height: usize,
    cells: Vec<TerrainCell>,
}

impl Map {
    /// `cells` must be in x-outer, y-inner order.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<TerrainCell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);

        Map {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, p: Position) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&TerrainCell> {
        if !self.contains(Position::new(x, y)) {
            return None;
        }

        Some(&self.cells[self.index(x as usize, y as usize)])
    }

    pub fn cell_at(&self, p: Position) -> Option<&TerrainCell> {
        self.cell(p.x, p.y)
    }

    /// Every cell with its position, x-outer, y-inner.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &TerrainCell)> + '_ {
        let height = self.height;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            (
                Position::new((i / height) as i32, (i % height) as i32),
                cell,
            )
        })
    }

    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.blocks_movement).count()
    }

    /// Builds an `[x][y]` grid from a per-cell function.
    pub(crate) fn column_grid<T>(
        &self,
        mut f: impl FnMut(Position, &TerrainCell) -> T,
    ) -> Vec<Vec<T>> {
        let mut grid = Vec::with_capacity(self.width);
        for x in 0..self.width {
            let mut column = Vec::with_capacity(self.height);
            for y in 0..self.height {
                let cell = &self.cells[self.index(x, y)];
                column.push(f(Position::new(x as i32, y as i32), cell));
            }
            grid.push(column);
        }

        grid
    }

    /// Folds a light map (indexed `[x][y]`) into the visibility memory. Lit cells are
    /// revealed; every revealed cell is marked forgotten while it sits in the dark.
    /// Entries outside the map, and cells the light map doesn't cover, are left alone.
    pub fn update_visibility(&mut self, light: &[Vec<f32>]) {
        for (x, column) in light.iter().enumerate().take(self.width) {
            for (y, level) in column.iter().enumerate().take(self.height) {
                let i = self.index(x, y);
                let cell = &mut self.cells[i];
                if *level > 0.0 {
                    cell.hidden = false;
                }
                if !cell.hidden {
                    cell.forgotten = *level <= 0.0;
                }
            }
        }
    }

    /// Renders `#` wall, blank void, `.` common floor and `,` rare floor.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(match self.cells[self.index(x, y)].kind {
                    TerrainKind::FloorCommon => '.',
                    TerrainKind::FloorRare => ',',
                    TerrainKind::WallVisible => '#',
                    TerrainKind::Void => ' ',
                });
            }
            out.push('\n');
        }

        out
    }
}
