use crate::{map::Map, Position};

use fnv::FnvHashMap;
use petgraph::unionfind::UnionFind;

/// Open cells partitioned into 8-connected regions.
pub struct Regions {
    height: usize,
    /// Region id per cell, x-outer, y-inner. `None` for rock.
    labels: Vec<Option<usize>>,
    sizes: Vec<usize>,
}

impl Regions {
    /// Number of distinct regions.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn region_of(&self, p: Position) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.y as usize >= self.height {
            return None;
        }

        self.labels
            .get(p.x as usize * self.height + p.y as usize)
            .copied()
            .flatten()
    }

    pub fn size(&self, region: usize) -> usize {
        self.sizes.get(region).copied().unwrap_or(0)
    }

    /// The region with the most cells, ties going to the lowest id.
    pub fn largest(&self) -> Option<usize> {
        (0..self.sizes.len()).rev().max_by_key(|r| self.sizes[*r])
    }
}

pub fn open_regions(map: &Map) -> Regions {
    let height = map.height();
    let index = |p: Position| p.x as usize * height + p.y as usize;
    let open = |p: Position| map.cell_at(p).map_or(false, |c| !c.blocks_movement);

    let mut sets = UnionFind::new(map.width() * height);
    for (p, cell) in map.cells() {
        if cell.blocks_movement {
            continue;
        }
        // Half of the neighbourhood is enough, the other half links back to us.
        for (dx, dy) in [(1, -1), (1, 0), (1, 1), (0, 1)].iter() {
            let n = p.offset(*dx, *dy);
            if open(n) {
                sets.union(index(p), index(n));
            }
        }
    }

    let roots = sets.into_labeling();
    let mut ids = FnvHashMap::default();
    let mut sizes = Vec::new();
    let labels = map
        .cells()
        .map(|(p, cell)| {
            if cell.blocks_movement {
                return None;
            }
            let id = *ids.entry(roots[index(p)]).or_insert_with(|| {
                sizes.push(0);
                sizes.len() - 1
            });
            sizes[id] += 1;

            Some(id)
        })
        .collect();
    log::debug!("{} open regions", sizes.len());

    Regions {
        height,
        labels,
        sizes,
    }
}

/// Share of all open cells that sit in the same region as `from`. Zero when `from` is not
/// open.
pub fn reachable_fraction(map: &Map, from: Position) -> f32 {
    let regions = open_regions(map);
    let total = map.open_cell_count();
    match regions.region_of(from) {
        Some(region) if total > 0 => regions.size(region) as f32 / total as f32,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::OccupancyGrid,
        sampling::FixedSource,
        terrain::{classify, FloorPalette},
    };

    fn map_from(rows: &[&str]) -> Map {
        classify(
            &OccupancyGrid::from_rows(rows),
            &FloorPalette::default(),
            &mut FixedSource(0.5),
        )
    }

    #[test]
    fn test_separate_chambers() {
        let map = map_from(&[
            "########", //
            "#..#...#", //
            "#..#...#", //
            "########",
        ]);
        let regions = open_regions(&map);

        assert_eq!(regions.len(), 2);
        let left = regions.region_of(Position::new(1, 1)).unwrap();
        let right = regions.region_of(Position::new(5, 2)).unwrap();
        assert_ne!(left, right);
        assert_eq!(regions.size(left), 4);
        assert_eq!(regions.size(right), 6);
        assert_eq!(regions.largest(), Some(right));
        assert_eq!(regions.region_of(Position::new(3, 1)), None);
        assert_eq!(regions.region_of(Position::new(-1, 1)), None);
        assert_eq!(regions.region_of(Position::new(8, 1)), None);

        assert!((reachable_fraction(&map, Position::new(1, 1)) - 0.4).abs() < 1e-6);
        assert_eq!(reachable_fraction(&map, Position::new(0, 0)), 0.0);
    }

    #[test]
    fn test_diagonal_gap_connects() {
        let map = map_from(&[
            "#####", //
            "#.###", //
            "##.##", //
            "###.#", //
            "#####",
        ]);
        let regions = open_regions(&map);

        assert_eq!(regions.len(), 1);
        assert_eq!(reachable_fraction(&map, Position::new(3, 3)), 1.0);
    }

    #[test]
    fn test_no_open_cells() {
        let map = map_from(&["###", "###"]);
        let regions = open_regions(&map);

        assert!(regions.is_empty());
        assert_eq!(regions.largest(), None);
    }
}
