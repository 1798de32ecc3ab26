use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the renderer needs for one instanced block.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub position: Coord3,
    /// Slot in the instance buffer, `z * sx * sy + y * sx + x`.
    pub instance: usize,
    pub color: Rgb,
    pub scale: f32,
}

/// Per-frame pull of everything visible, ordered by instance slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub size: Coord3,
    pub state: EngineState,
    pub center: [f32; 3],
    pub cells: Vec<CellView>,
}

impl FrameSnapshot {
    pub fn from_engine(engine: &GridEngine) -> Self {
        let size = engine.size();
        let (x_end, y_end, z_end) = size;
        let mut cells = Vec::with_capacity(usize::from(volume(size)));

        for z in 0..z_end {
            for y in 0..y_end {
                for x in 0..x_end {
                    let coords = (x, y, z);
                    if let Some(cell) = engine.cell(coords) {
                        cells.push(CellView {
                            position: coords,
                            instance: instance_index(coords, size),
                            color: hover_color(cell, engine.hovered() == Some(coords)),
                            scale: cell.animation().current_scale,
                        });
                    }
                }
            }
        }

        Self {
            size,
            state: engine.state(),
            center: engine.center(),
            cells,
        }
    }

    pub fn get(&self, coords: Coord3) -> Option<&CellView> {
        let (x_end, y_end, z_end) = self.size;
        if coords.0 < x_end && coords.1 < y_end && coords.2 < z_end {
            self.cells.get(instance_index(coords, self.size))
        } else {
            None
        }
    }
}

pub fn instance_index((x, y, z): Coord3, (size_x, size_y, _): Coord3) -> usize {
    let (x, y, z) = (usize::from(x), usize::from(y), usize::from(z));
    let (size_x, size_y) = (usize::from(size_x), usize::from(size_y));
    z * size_x * size_y + y * size_x + x
}

fn hover_color(cell: &Cell, hovered: bool) -> Rgb {
    match cell.state() {
        CellState::Hidden if hovered => HOVER_HIDDEN,
        CellState::Flagged if hovered => HOVER_FLAGGED,
        _ => cell.color(),
    }
}

impl GridEngine {
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::from_engine(self)
    }
}
