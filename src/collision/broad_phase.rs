use std::collections::HashMap;

use crate::math::Vec3;

/// Integer cell coordinate of the uniform grid
pub type CellCoord = (i32, i32, i32);

/// The forward half of the 3x3x3 neighbourhood: every offset that is
/// lexicographically greater than (0, 0, 0). Pairing each occupied cell with
/// its forward neighbours (plus its own members) emits every unordered cell
/// pair exactly once.
const FORWARD_NEIGHBOURS: [(i32, i32, i32); 13] = [
    (0, 0, 1),
    (0, 1, -1),
    (0, 1, 0),
    (0, 1, 1),
    (1, -1, -1),
    (1, -1, 0),
    (1, -1, 1),
    (1, 0, -1),
    (1, 0, 0),
    (1, 0, 1),
    (1, 1, -1),
    (1, 1, 0),
    (1, 1, 1),
];

/// Uniform spatial hash grid broad phase.
///
/// Bodies are bucketed by the cell containing their centre; candidate pairs
/// are all bodies sharing a cell or sitting in adjacent cells (diagonals
/// included). The grid holds no state across substeps: the world clears and
/// refills it every step.
#[derive(Debug)]
pub struct UniformGrid {
    cell_size: f32,
    cells: HashMap<CellCoord, Vec<usize>>,
}

impl UniformGrid {
    /// Creates a grid with the given cell size (must be positive)
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// The configured cell size
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Computes the cell containing a world position. `floor` resolves
    /// boundary positions: with cell size 2.0, a body at exactly 2.0 lands
    /// in cell 1.
    #[inline]
    pub fn cell_coord(&self, position: Vec3) -> CellCoord {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
            (position.z / self.cell_size).floor() as i32,
        )
    }

    /// Removes all bodies from the grid
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Inserts a body (by arena index) at its current position
    pub fn insert(&mut self, body: usize, position: Vec3) {
        let coord = self.cell_coord(position);
        self.cells.entry(coord).or_default().push(body);
    }

    /// Number of occupied cells
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Collects candidate pairs: all intra-cell pairs plus the cross product
    /// of each occupied cell with its forward neighbours. Each unordered
    /// pair appears at most once.
    ///
    /// Occupied cells are visited in sorted coordinate order so the emission
    /// order is a pure function of body state (deterministic replay).
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();

        let mut coords: Vec<CellCoord> = self.cells.keys().copied().collect();
        coords.sort_unstable();

        for coord in &coords {
            let members = &self.cells[coord];

            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    pairs.push((members[i], members[j]));
                }
            }

            for (dx, dy, dz) in FORWARD_NEIGHBOURS {
                let neighbour = (coord.0 + dx, coord.1 + dy, coord.2 + dz);
                if let Some(others) = self.cells.get(&neighbour) {
                    for &a in members {
                        for &b in others {
                            pairs.push((a, b));
                        }
                    }
                }
            }
        }

        pairs
    }
}
