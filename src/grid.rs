use crate::Position;

/// Boolean occupancy used while a cave is being shaped. `true` is solid rock, `false` is
/// open ground.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(width: usize, height: usize, solid: bool) -> Self {
        OccupancyGrid {
            width,
            height,
            cells: vec![solid; width * height],
        }
    }

    /// Builds a grid from rows of ASCII art, `#` solid and anything else open. Row `y` is
    /// the `y`th line.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = OccupancyGrid::new(width, height, true);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                grid.set(x, y, c == '#');
            }
        }

        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Out-of-range coordinates read as solid.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }

        self.cells[self.index(x as usize, y as usize)]
    }

    pub fn set(&mut self, x: usize, y: usize, solid: bool) {
        let i = self.index(x, y);
        self.cells[i] = solid;
    }

    /// Counts solid cells in the `(2 * radius + 1)^2 - 1` square around `(x, y)`, with
    /// cells past the edge counted as solid so that caves grow walls at the border.
    pub fn count_occupied(&self, radius: i32, x: i32, y: i32) -> u32 {
        let mut count = 0;
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.is_solid(x + dx, y + dy) {
                    count += 1;
                }
            }
        }

        count
    }

    /// Counts open cells among the 8 neighbours of `(x, y)`. Cells past the edge don't
    /// count.
    pub fn count_open(&self, x: i32, y: i32) -> u32 {
        let mut count = 0;
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x + dx, y + dy);
                if self.in_bounds(nx, ny) && !self.is_solid(nx, ny) {
                    count += 1;
                }
            }
        }

        count
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|solid| !**solid).count()
    }

    /// All positions in x-outer, y-inner order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let height = self.height as i32;
        (0..self.width as i32).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
    }

    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Renders `#` for solid and `.` for open, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.cells[self.index(x, y)] { '#' } else { '.' });
            }
            out.push('\n');
        }

        out
    }
}
