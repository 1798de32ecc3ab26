use thiserror::Error;

use crate::{CellCount, Coord3};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("grid size {0:?} must be within 1..=25 on every axis")]
    SizeOutOfRange(Coord3),
    #[error("{mines} mines requested, allowed range is 1..={max}")]
    MineCountOutOfRange { mines: CellCount, max: CellCount },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine layout {size:?} with {mines} mines does not match the grid")]
    LayoutMismatch { size: Coord3, mines: CellCount },
}

pub type Result<T> = core::result::Result<T, GridError>;
