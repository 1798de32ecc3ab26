use crate::*;
pub use random::*;

mod random;

pub trait MineGenerator {
    /// Lays out `config.mines()` mines, `start` being the player's first click.
    fn generate(self, config: GridConfig, start: Coord3) -> MineLayout;
}

/// How much of the area around the first click is kept free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartZone {
    Random,
    SimpleSafe,
    /// Everything within squared distance 4, which is the whole 3x3x3 cube.
    Clear,
}

impl StartZone {
    pub const MIN_DISTANCE_SQUARED: u32 = 4;

    pub fn excludes(self, start: Coord3, coords: Coord3) -> bool {
        match self {
            Self::Random => false,
            Self::SimpleSafe => start == coords,
            Self::Clear => distance_squared(start, coords) < Self::MIN_DISTANCE_SQUARED,
        }
    }

    /// Number of in-bounds cells the zone takes out of the candidate pool.
    pub fn excluded_cells(self, start: Coord3, size: Coord3) -> CellCount {
        fn span(center: Coord, len: Coord) -> CellCount {
            let lo = center.saturating_sub(1);
            let hi = center.saturating_add(1).min(len.saturating_sub(1));
            CellCount::from(hi - lo + 1)
        }

        match self {
            Self::Random => 0,
            Self::SimpleSafe => 1,
            Self::Clear => span(start.0, size.0) * span(start.1, size.1) * span(start.2, size.2),
        }
    }
}

/// A fixed layout ignores the start position. The engine rejects it when its
/// size or mine count differs from the configuration.
impl MineGenerator for MineLayout {
    fn generate(self, _config: GridConfig, _start: Coord3) -> MineLayout {
        self
    }
}
