use ndarray::Array3;

use super::*;

/// Purely random placement by rejection sampling, keeping a zone around the
/// first click free when the grid has room for it.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    start_zone: StartZone,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, start_zone: StartZone) -> Self {
        Self { seed, start_zone }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GridConfig, start: Coord3) -> MineLayout {
        use StartZone::*;
        use rand::prelude::*;

        let size = config.size();
        let total_cells = config.total_cells();
        let mines = config.mines();

        let free_after = |zone: StartZone| total_cells - zone.excluded_cells(start, size);
        let start_zone = match self.start_zone {
            Random => Random,
            SimpleSafe | Clear if free_after(SimpleSafe) < mines => {
                log::warn!("Cannot keep start cell safe, fallback to random");
                Random
            }
            SimpleSafe => SimpleSafe,
            Clear if free_after(Clear) < mines => {
                log::warn!("Cannot clear area around start cell, fallback to simple safe");
                SimpleSafe
            }
            Clear => Clear,
        };

        let mut mine_mask: Array3<bool> = Array3::default(size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;
        let mut rejected: u32 = 0;

        while placed < mines {
            let coords = (
                rng.random_range(0..size.0),
                rng.random_range(0..size.1),
                rng.random_range(0..size.2),
            );

            if start_zone.excludes(start, coords) || mine_mask[coords.to_nd_index()] {
                rejected += 1;
                continue;
            }

            mine_mask[coords.to_nd_index()] = true;
            placed += 1;
        }

        log::debug!(
            "Placed {} mines around start {:?} ({} rejected draws)",
            placed,
            start,
            rejected
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}
