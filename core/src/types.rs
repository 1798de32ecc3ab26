use ndarray::Array3;

/// Single coordinate axis used for grid sizes and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Three-dimensional coordinates `(x, y, z)`.
pub type Coord3 = (Coord, Coord, Coord);

/// Signed step between two cells.
pub type Offset3 = (i8, i8, i8);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord3 {
    type Output = [usize; 3];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into(), self.2.into()]
    }
}

pub const fn volume((x, y, z): Coord3) -> CellCount {
    let x = x as CellCount;
    let y = y as CellCount;
    let z = z as CellCount;
    x.saturating_mul(y).saturating_mul(z)
}

pub const fn distance_squared(a: Coord3, b: Coord3) -> u32 {
    let dx = a.0.abs_diff(b.0) as u32;
    let dy = a.1.abs_diff(b.1) as u32;
    let dz = a.2.abs_diff(b.2) as u32;
    dx * dx + dy * dy + dz * dz
}

/// Every cell of the surrounding 3x3x3 cube except the centre.
pub const NEIGHBOR_OFFSETS: [Offset3; 26] = {
    let mut offsets = [(0, 0, 0); 26];
    let mut i = 0;
    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                if dx != 0 || dy != 0 || dz != 0 {
                    offsets[i] = (dx, dy, dz);
                    i += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    offsets
};

/// Directions a zero-count reveal spreads into. This is deliberately not the
/// full cube: only x-steps (optionally with a y-step), y-steps (optionally with
/// a z-step) and plain z-steps.
pub const FLOOD_OFFSETS: [Offset3; 14] = [
    (-1, 0, 0),
    (-1, 1, 0),
    (-1, -1, 0),
    (1, 0, 0),
    (1, 1, 0),
    (1, -1, 0),
    (0, -1, 0),
    (0, -1, 1),
    (0, -1, -1),
    (0, 1, 0),
    (0, 1, 1),
    (0, 1, -1),
    (0, 0, -1),
    (0, 0, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub fn apply_delta(coords: Coord3, delta: Offset3, bounds: Coord3) -> Option<Coord3> {
    let (x, y, z) = coords;
    let (dx, dy, dz) = delta;
    let (max_x, max_y, max_z) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    let next_z = z.checked_add_signed(dz)?;
    if next_z >= max_z {
        return None;
    }

    Some((next_x, next_y, next_z))
}

pub trait NeighborIterExt {
    fn bounds(&self) -> Coord3;

    /// In-bounds cells of the surrounding cube.
    fn iter_neighbors(&self, index: Coord3) -> NeighborIter {
        NeighborIter::new(index, self.bounds(), &NEIGHBOR_OFFSETS)
    }

    /// In-bounds cells a flood fill may spread into.
    fn iter_flood_neighbors(&self, index: Coord3) -> NeighborIter {
        NeighborIter::new(index, self.bounds(), &FLOOD_OFFSETS)
    }
}

impl<T> NeighborIterExt for Array3<T> {
    fn bounds(&self) -> Coord3 {
        let dim = self.dim();
        (
            dim.0.try_into().unwrap(),
            dim.1.try_into().unwrap(),
            dim.2.try_into().unwrap(),
        )
    }
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord3,
    bounds: Coord3,
    offsets: &'static [Offset3],
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord3, bounds: Coord3, offsets: &'static [Offset3]) -> Self {
        Self {
            center,
            bounds,
            offsets,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord3;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *self.offsets.get(usize::from(self.index))?;
            self.index += 1;

            let next_item = apply_delta(self.center, delta, self.bounds);
            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighbor_offsets_cover_cube_without_center() {
        let mut offsets = NEIGHBOR_OFFSETS.to_vec();
        offsets.sort();
        offsets.dedup();
        assert_eq!(offsets.len(), 26);
        assert!(!offsets.contains(&(0, 0, 0)));
    }

    #[test]
    fn corner_has_seven_neighbors() {
        let grid: Array3<u8> = Array3::zeros([3, 3, 3]);
        assert_eq!(grid.iter_neighbors((0, 0, 0)).count(), 7);
        assert_eq!(grid.iter_neighbors((1, 1, 1)).count(), 26);
    }

    #[test]
    fn flood_neighbors_stay_in_bounds() {
        let grid: Array3<u8> = Array3::zeros([2, 2, 2]);
        let neighbors: Vec<_> = grid.iter_flood_neighbors((0, 0, 0)).collect();
        assert_eq!(neighbors, [(1, 0, 0), (1, 1, 0), (0, 1, 0), (0, 1, 1), (0, 0, 1)]);
    }

    #[test]
    fn flood_offsets_skip_xz_diagonals() {
        assert!(!FLOOD_OFFSETS.contains(&(1, 0, 1)));
        assert!(!FLOOD_OFFSETS.contains(&(1, 1, 1)));
        assert_eq!(FLOOD_OFFSETS.len(), 14);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(distance_squared((0, 0, 0), (1, 1, 1)), 3);
        assert_eq!(distance_squared((2, 0, 0), (0, 0, 0)), 4);
    }
}
