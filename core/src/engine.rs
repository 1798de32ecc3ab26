use alloc::vec;
use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Spreads consecutive generations of one seed over unrelated layouts.
const GENERATION_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Game logic for one voxel minefield. Rendering and input live elsewhere:
/// they call the click/hover operations with grid coordinates and read
/// [`FrameSnapshot`]s back out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridEngine {
    config: GridConfig,
    cells: Array3<Cell>,
    mines_placed: bool,
    state: EngineState,
    center: [f32; 3],
    hovered: Option<Coord3>,
    seed: u64,
    generation: u64,
}

impl GridEngine {
    /// Fresh grid, mines get placed on the first reveal.
    pub fn new(config: GridConfig, seed: u64) -> Self {
        log::debug!(
            "Generated {:?} grid with {} mines",
            config.size(),
            config.mines()
        );
        Self {
            config,
            cells: build_cells(config.size()),
            mines_placed: false,
            state: EngineState::Ready,
            center: center_of(config.size()),
            hovered: None,
            seed,
            generation: 0,
        }
    }

    /// Grid with a predetermined layout, ready to play.
    pub fn with_layout(layout: MineLayout, seed: u64) -> Result<Self> {
        let config = GridConfig::new(layout.size(), layout.mine_count())?;
        let mut engine = Self::new(config, seed);
        engine.place_mines_with(layout, (0, 0, 0))?;
        Ok(engine)
    }

    /// Throws the current grid away and builds a new one.
    pub fn generate(&mut self, size: Coord3, mines: CellCount) -> Result<()> {
        let config = GridConfig::new(size, mines)?;
        self.configure(config);
        Ok(())
    }

    pub fn configure(&mut self, config: GridConfig) {
        let generation = self.generation.wrapping_add(1);
        *self = Self {
            generation,
            ..Self::new(config, self.seed)
        };
    }

    pub fn regenerate(&mut self) {
        self.configure(self.config);
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn size(&self) -> Coord3 {
        self.config.size()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_lost(&self) -> bool {
        matches!(self.state, EngineState::Lost)
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    /// Centroid of all cell positions, where a camera should orbit.
    pub fn center(&self) -> [f32; 3] {
        self.center
    }

    pub fn hovered(&self) -> Option<Coord3> {
        self.hovered
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn cell(&self, coords: Coord3) -> Option<&Cell> {
        self.validate_coords(coords)
            .map(|coords| &self.cells[coords.to_nd_index()])
    }

    /// Cells in `(x, y, z)` lexicographic order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    pub fn mines_left(&self) -> isize {
        self.config.mines() as isize - self.flagged_count() as isize
    }

    /// Randomly lays out the mines, keeping `exclude` and the cube around it
    /// clear. Only the first call of a generation has any effect.
    pub fn place_mines(&mut self, exclude: Coord3) -> Result<()> {
        let seed = self.seed ^ self.generation.wrapping_mul(GENERATION_GAMMA);
        self.place_mines_with(RandomMineGenerator::new(seed, StartZone::Clear), exclude)
    }

    /// Applies whatever layout `generator` produces. The layout must match the
    /// configured size and mine count, otherwise the grid stays unmined.
    pub fn place_mines_with(
        &mut self,
        generator: impl MineGenerator,
        exclude: Coord3,
    ) -> Result<()> {
        if self.mines_placed {
            log::debug!("Mines already placed for this grid");
            return Ok(());
        }

        let layout = generator.generate(self.config, exclude);
        if layout.size() != self.size() || layout.mine_count() != self.config.mines() {
            log::warn!(
                "Rejecting mine layout {:?} with {} mines, grid is {:?} with {}",
                layout.size(),
                layout.mine_count(),
                self.size(),
                self.config.mines()
            );
            return Err(GridError::LayoutMismatch {
                size: layout.size(),
                mines: layout.mine_count(),
            });
        }

        for cell in self.cells.iter_mut() {
            cell.mine = layout.contains_mine(cell.position());
        }
        self.mines_placed = true;
        Ok(())
    }

    pub fn toggle_flag(&mut self, coords: Coord3) -> MarkOutcome {
        if self.is_finished() {
            return MarkOutcome::NoChange;
        }
        let Some(coords) = self.validate_coords(coords) else {
            return MarkOutcome::NoChange;
        };

        self.cells[coords.to_nd_index()].toggle_flag()
    }

    /// Reveals a single cell. A mine only goes off when the player clicked it
    /// directly, a flood fill never sets one off.
    pub fn reveal(&mut self, coords: Coord3, direct_click: bool) -> RevealOutcome {
        if self.is_finished() {
            return RevealOutcome::NoChange;
        }
        let Some(coords) = self.validate_coords(coords) else {
            return RevealOutcome::NoChange;
        };
        if self.cells[coords.to_nd_index()].state() != CellState::Hidden {
            return RevealOutcome::NoChange;
        }

        let count = self.count_neighbor_mines(coords);
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.neighbor_mines = Some(count);

        if cell.mine {
            if !direct_click {
                return RevealOutcome::NoChange;
            }
            cell.state = CellState::Detonated;
            self.state = EngineState::Lost;
            log::debug!("Mine hit at {:?}", coords);
            return RevealOutcome::HitMine;
        }

        cell.state = CellState::Revealed(count);
        cell.animation
            .shrink_to(if count > 0 { NUMBERED_SCALE } else { 0.0 });
        log::debug!("Revealed {:?}, neighbor mines: {}", coords, count);
        self.mark_started();
        RevealOutcome::Revealed
    }

    /// Reveals `coords` and keeps spreading through cells without neighbouring
    /// mines, along [`FLOOD_OFFSETS`].
    pub fn flood_fill(&mut self, coords: Coord3, direct_click: bool) -> RevealOutcome {
        let Some(start) = self.validate_coords(coords) else {
            return RevealOutcome::NoChange;
        };

        let mut outcome = RevealOutcome::NoChange;
        let mut pending = vec![start];
        let mut direct_click = direct_click;

        while let Some(visit_coords) = pending.pop() {
            let cell = &self.cells[visit_coords.to_nd_index()];
            if cell.is_revealed() || cell.is_flagged() {
                log::trace!("Skipping cell at {:?}", visit_coords);
                continue;
            }

            outcome = outcome | self.reveal(visit_coords, direct_click);
            direct_click = false;
            if self.is_lost() {
                break;
            }

            let cell = &self.cells[visit_coords.to_nd_index()];
            if cell.is_mine() || cell.neighbor_mines != Some(0) {
                continue;
            }

            pending.extend(
                self.cells
                    .iter_flood_neighbors(visit_coords)
                    .filter(|&pos| self.cells[pos.to_nd_index()].state() == CellState::Hidden),
            );
            log::trace!("Flood spreading from {:?}, pending: {}", visit_coords, pending.len());
        }

        outcome
    }

    /// Whether every safe cell has been revealed.
    pub fn check_win(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_mine() || cell.is_revealed())
    }

    /// Steps all running block animations, frozen once the game is lost.
    /// Returns whether any block changed scale.
    pub fn advance_animations(&mut self, delta_secs: f32) -> bool {
        if self.is_lost() {
            return false;
        }

        let mut changed = false;
        for cell in self.cells.iter_mut() {
            changed |= cell.animation.step(delta_secs);
        }
        changed
    }

    /// Left click: places the mines on the first click, then reveals.
    pub fn primary_click(&mut self, coords: Coord3) -> RevealOutcome {
        if self.is_finished() {
            return RevealOutcome::NoChange;
        }
        let Some(cell) = self.cell(coords) else {
            return RevealOutcome::NoChange;
        };
        if cell.is_revealed() {
            return RevealOutcome::NoChange;
        }

        if !self.mines_placed {
            if let Err(err) = self.place_mines(coords) {
                log::error!("Could not place mines: {}", err);
                return RevealOutcome::NoChange;
            }
        }

        let outcome = self.flood_fill(coords, true);
        if outcome == RevealOutcome::HitMine {
            return outcome;
        }

        if self.check_win() {
            self.state = EngineState::Won;
            log::debug!("All safe cells revealed");
            RevealOutcome::Won
        } else {
            outcome
        }
    }

    /// Right click: flags are only available once the mines exist.
    pub fn secondary_click(&mut self, coords: Coord3) -> MarkOutcome {
        if !self.mines_placed {
            return MarkOutcome::NoChange;
        }
        self.toggle_flag(coords)
    }

    /// Pointer moved over a cell, or off the grid with `None`.
    pub fn hover(&mut self, coords: Option<Coord3>) {
        self.hovered = coords.and_then(|coords| self.validate_coords(coords));
    }

    pub fn validate_coords(&self, coords: Coord3) -> Option<Coord3> {
        let (size_x, size_y, size_z) = self.size();
        (coords.0 < size_x && coords.1 < size_y && coords.2 < size_z).then_some(coords)
    }

    fn count_neighbor_mines(&self, coords: Coord3) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].mine)
            .count() as u8
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = EngineState::Active;
        }
    }
}

fn build_cells(size: Coord3) -> Array3<Cell> {
    Array3::from_shape_fn(size.to_nd_index(), |(x, y, z)| {
        Cell::new((x as Coord, y as Coord, z as Coord))
    })
}

fn center_of((size_x, size_y, size_z): Coord3) -> [f32; 3] {
    [
        (f32::from(size_x) - 1.0) / 2.0,
        (f32::from(size_y) - 1.0) / 2.0,
        (f32::from(size_z) - 1.0) / 2.0,
    ]
}
