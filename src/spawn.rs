use crate::{
    error::{CaveError, Result},
    map::Map,
    nav::Occupant,
    sampling::RandomSource,
    Position,
};

/// Random draws before `find_random_open_cell` gives up on rejection sampling and scans.
pub const MAX_SPAWN_SAMPLES: usize = 1000;

impl Map {
    /// First walkable cell in x-outer, y-inner order. Deterministic, so it makes a
    /// reproducible player start.
    pub fn find_first_open_cell(&self) -> Result<Position> {
        self.cells()
            .find(|(_, cell)| !cell.blocks_movement)
            .map(|(p, _)| p)
            .ok_or(CaveError::NoOpenCell)
    }

    /// A uniformly drawn walkable cell, for placing monsters and items.
    pub fn find_random_open_cell(&self, rng: &mut impl RandomSource) -> Result<Position> {
        self.find_random_unblocked_cell(rng, &[])
    }

    /// Like `find_random_open_cell`, but also skips cells held by blocking occupants.
    pub fn find_random_unblocked_cell(
        &self,
        rng: &mut impl RandomSource,
        occupants: &[Occupant],
    ) -> Result<Position> {
        let blockers = Occupant::blocking_positions(occupants);
        let free = |p: Position| {
            self.cell_at(p).map_or(false, |c| !c.blocks_movement) && !blockers.contains(&p)
        };

        let (max_x, max_y) = (self.width() as i32 - 1, self.height() as i32 - 1);
        for _ in 0..MAX_SPAWN_SAMPLES {
            let p = Position::new(rng.random_int(0, max_x), rng.random_int(0, max_y));
            if free(p) {
                return Ok(p);
            }
        }

        // Sampling keeps missing; walk the whole map once from a random start instead.
        let total = self.width() * self.height();
        let start = rng.random_int(0, total as i32 - 1).max(0) as usize;
        log::warn!(
            "No open cell after {} samples, scanning from offset {}",
            MAX_SPAWN_SAMPLES,
            start
        );
        (0..total)
            .map(|i| {
                let i = (start + i) % total;
                Position::new((i / self.height()) as i32, (i % self.height()) as i32)
            })
            .find(|p| free(*p))
            .ok_or(CaveError::NoOpenCell)
    }

    /// First unblocked orthogonal neighbour of `p`, trying east, west, south, north.
    pub fn open_space_near(&self, p: Position, occupants: &[Occupant]) -> Option<Position> {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .iter()
            .map(|(dx, dy)| p.offset(*dx, *dy))
            .find(|n| !self.is_blocked(*n, occupants))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::OccupancyGrid,
        sampling::{small_rng, FixedSource, ScriptedSource},
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
    fn test_first_open_cell_is_column_major() {
        let map = map_from(&[
            "#####", //
            "###.#", //
            "#.###", //
            "#####",
        ]);

        assert_eq!(map.find_first_open_cell().unwrap(), Position::new(1, 2));
    }

    #[test]
    fn test_no_open_cell() {
        let map = map_from(&["###", "###", "###"]);

        assert!(matches!(
            map.find_first_open_cell(),
            Err(CaveError::NoOpenCell)
        ));
        assert!(matches!(
            map.find_random_open_cell(&mut small_rng(3)),
            Err(CaveError::NoOpenCell)
        ));
    }

    #[test]
    fn test_random_open_cell_is_walkable() {
        let map = map_from(&[
            "######", //
            "#..#.#", //
            "#.##.#", //
            "######",
        ]);
        let mut rng = small_rng(11);
        for _ in 0..200 {
            let p = map.find_random_open_cell(&mut rng).unwrap();
            assert!(!map.cell_at(p).unwrap().blocks_movement);
        }
    }

    #[test]
    fn test_rejection_sampling_takes_first_hit() {
        let map = map_from(&[
            "####", //
            "#..#", //
            "####",
        ]);
        // x draws then y draws: (0, 0) is rock, (2, 1) is floor.
        let mut rng = ScriptedSource::new(0.5, vec![0, 0, 2, 1]);

        assert_eq!(
            map.find_random_open_cell(&mut rng).unwrap(),
            Position::new(2, 1)
        );
    }

    #[test]
    fn test_falls_back_to_scan_when_sampling_never_hits() {
        let map = map_from(&[
            "####", //
            "#..#", //
            "####",
        ]);
        // Every integer draw is the low end, so sampling only ever probes (0, 0) and the
        // scan starts at offset 0.
        let p = map.find_random_open_cell(&mut FixedSource(0.5)).unwrap();

        assert_eq!(p, Position::new(1, 1));
    }

    #[test]
    fn test_scan_wraps_around() {
        let map = map_from(&[
            "####", //
            "#..#", //
            "####",
        ]);
        // 2000 misses at (3, 2), then a scan offset of 11 (the last cell) wraps to the
        // start of the map.
        let mut ints = vec![3; 2 * MAX_SPAWN_SAMPLES];
        ints.push(11);
        let mut rng = ScriptedSource::new(0.5, ints);

        assert_eq!(
            map.find_random_open_cell(&mut rng).unwrap(),
            Position::new(1, 1)
        );
    }

    #[test]
    fn test_random_unblocked_skips_occupants() {
        let map = map_from(&[
            "####", //
            "#..#", //
            "####",
        ]);
        let occupants = [Occupant::new(Position::new(1, 1), true)];
        let mut rng = small_rng(5);
        for _ in 0..50 {
            assert_eq!(
                map.find_random_unblocked_cell(&mut rng, &occupants).unwrap(),
                Position::new(2, 1)
            );
        }

        let occupants = [
            Occupant::new(Position::new(1, 1), true),
            Occupant::new(Position::new(2, 1), true),
        ];
        assert!(matches!(
            map.find_random_unblocked_cell(&mut rng, &occupants),
            Err(CaveError::NoOpenCell)
        ));
    }

    #[test]
    fn test_open_space_near_order() {
        let map = map_from(&[
            "#####", //
            "#...#", //
            "#...#", //
            "#####",
        ]);
        let center = Position::new(2, 1);

        assert_eq!(map.open_space_near(center, &[]), Some(Position::new(3, 1)));

        let east = [Occupant::new(Position::new(3, 1), true)];
        assert_eq!(map.open_space_near(center, &east), Some(Position::new(1, 1)));

        let decoration = [Occupant::new(Position::new(3, 1), false)];
        assert_eq!(
            map.open_space_near(center, &decoration),
            Some(Position::new(3, 1))
        );

        let boxed_in = [
            Occupant::new(Position::new(3, 1), true),
            Occupant::new(Position::new(1, 1), true),
            Occupant::new(Position::new(2, 2), true),
        ];
        assert_eq!(map.open_space_near(center, &boxed_in), None);
    }
}
