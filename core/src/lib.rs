#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array3;
use serde::{Deserialize, Serialize};

pub use animation::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use palette::*;
pub use snapshot::*;
pub use types::*;

mod animation;
mod cell;
mod engine;
mod error;
mod generator;
mod palette;
mod snapshot;
mod types;

/// Largest allowed extent on any axis.
pub const MAX_AXIS: Coord = 25;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedGridConfig")]
pub struct GridConfig {
    size: Coord3,
    mines: CellCount,
}

/// Wire form of [`GridConfig`], checked by [`GridConfig::new`] on the way in.
#[derive(Deserialize)]
struct UncheckedGridConfig {
    size: Coord3,
    mines: CellCount,
}

impl TryFrom<UncheckedGridConfig> for GridConfig {
    type Error = GridError;

    fn try_from(raw: UncheckedGridConfig) -> Result<Self> {
        Self::new(raw.size, raw.mines)
    }
}

impl GridConfig {
    pub const DEFAULT_SIZE: Coord3 = (7, 7, 7);
    pub const DEFAULT_MINES: CellCount = 34;

    pub fn new(size: Coord3, mines: CellCount) -> Result<Self> {
        let (x, y, z) = size;
        if [x, y, z].iter().any(|&axis| !(1..=MAX_AXIS).contains(&axis)) {
            return Err(ConfigIssue::SizeOutOfRange(size).into());
        }

        let max = Self::max_mines_for(size);
        if mines == 0 || mines > max {
            return Err(ConfigIssue::MineCountOutOfRange { mines, max }.into());
        }

        Ok(Self { size, mines })
    }

    /// New size with the mine count reset to a tenth of the volume.
    pub fn with_size(self, size: Coord3) -> Result<Self> {
        let mines = (volume(size) / 10).max(1);
        Self::new(size, mines)
    }

    pub fn with_mines(self, mines: CellCount) -> Result<Self> {
        Self::new(self.size, mines)
    }

    pub const fn size(&self) -> Coord3 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        volume(self.size)
    }

    pub const fn max_mines(&self) -> CellCount {
        Self::max_mines_for(self.size)
    }

    /// At most half of the grid may be mined.
    pub const fn max_mines_for(size: Coord3) -> CellCount {
        volume(size) / 2
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            mines: Self::DEFAULT_MINES,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array3<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array3<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord3, mine_coords: &[Coord3]) -> Result<Self> {
        let mut mine_mask: Array3<bool> = Array3::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 || coords.2 >= size.2 {
                return Err(GridError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord3 {
        self.mine_mask.bounds()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord3) -> bool {
        self[coords]
    }
}

impl Index<Coord3> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord3) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_out_of_range_axes() {
        assert_eq!(
            GridConfig::new((0, 5, 5), 3),
            Err(GridError::InvalidConfiguration(ConfigIssue::SizeOutOfRange((0, 5, 5))))
        );
        assert!(GridConfig::new((26, 5, 5), 3).is_err());
        assert!(GridConfig::new((25, 25, 25), 7812).is_ok());
    }

    #[test]
    fn config_rejects_mine_counts_outside_half_volume() {
        assert_eq!(
            GridConfig::new((1, 1, 1), 1),
            Err(GridError::InvalidConfiguration(ConfigIssue::MineCountOutOfRange {
                mines: 1,
                max: 0
            }))
        );
        assert!(GridConfig::new((3, 3, 3), 0).is_err());
        assert!(GridConfig::new((3, 3, 3), 14).is_err());
        assert_eq!(GridConfig::new((3, 3, 3), 13).unwrap().max_mines(), 13);
    }

    #[test]
    fn resizing_resets_mine_count_to_tenth() {
        let config = GridConfig::default().with_size((10, 10, 10)).unwrap();
        assert_eq!(config.mines(), 100);
        let config = config.with_size((2, 2, 1)).unwrap();
        assert_eq!(config.mines(), 1);
    }

    #[test]
    fn deserialized_config_is_validated() {
        let config: GridConfig = serde_json::from_str(r#"{"size":[4,4,4],"mines":6}"#).unwrap();
        assert_eq!(config, GridConfig::new((4, 4, 4), 6).unwrap());

        assert!(serde_json::from_str::<GridConfig>(r#"{"size":[1,1,1],"mines":1}"#).is_err());
        assert!(serde_json::from_str::<GridConfig>(r#"{"size":[30,2,2],"mines":3}"#).is_err());
    }

    #[test]
    fn outcomes_report_updates() {
        assert!(!MarkOutcome::NoChange.has_update());
        assert!(MarkOutcome::Changed.has_update());
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::HitMine.has_update());
    }

    #[test]
    fn layout_from_coords_validates_bounds() {
        let layout = MineLayout::from_mine_coords((3, 3, 3), &[(2, 2, 2), (0, 1, 2)]).unwrap();
        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine((0, 1, 2)));
        assert_eq!(layout.size(), (3, 3, 3));
        assert_eq!(
            MineLayout::from_mine_coords((3, 3, 3), &[(3, 0, 0)]),
            Err(GridError::InvalidCoords)
        );
    }

    #[test]
    fn hit_mine_dominates_merged_outcomes() {
        use RevealOutcome::*;
        assert_eq!(Revealed | HitMine, HitMine);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
