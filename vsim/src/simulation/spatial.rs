//! # Uniform-grid spatial index (2D)
//!
//! Broad phase for the circle solver. Space is cut into square cells of edge
//! `cell_size`; a body belongs to the cell containing its center:
//!
//! ```text
//! cell = (floor(x / cell_size), floor(y / cell_size))
//! ```
//!
//! The index is rebuilt from scratch every sub-step and never updated
//! incrementally. All storage lives in the struct and is cleared, not
//! dropped, between rebuilds, so after warm-up a rebuild does not allocate.
//!
//! ## Layout
//!
//! - `slots`    cell coordinate -> bucket number
//! - `buckets`  one entry per populated cell, in first-populated order,
//!              each a `start..start+len` window into `entries`
//! - `entries`  body indices grouped by bucket
//!
//! Building is a two-pass counting sort: pass one assigns every body a bucket
//! and counts bucket sizes, a prefix sum turns counts into windows, and pass
//! two writes body indices into their windows. Within a cell the body order
//! equals creation order.
//!
//! ## Pair enumeration
//!
//! Candidate pairs are produced with a half-neighborhood stencil: each cell
//! is paired with itself (`i < j` by list position) and with the four
//! neighbors in `HALF_STENCIL`. The other four neighbors see this cell through
//! their own stencil, so every unordered pair of adjacent cells is visited
//! exactly once without comparing body indices.

use std::collections::HashMap;

use crate::simulation::states::{Body, NVec2};

/// Integer grid coordinate of a cell
pub type Cell = (i64, i64);

/// Offsets of the neighbors a cell is responsible for
pub const HALF_STENCIL: [(i64, i64); 4] = [(1, -1), (1, 0), (1, 1), (0, 1)];

/// Full 3x3 neighborhood, home cell first
pub const FULL_STENCIL: [(i64, i64); 9] = [
    (0, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug, Clone, Copy)]
struct Bucket {
    cell: Cell,
    start: usize,
    len: usize,
}

#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cell_size: f64,
    slots: HashMap<Cell, usize>,
    buckets: Vec<Bucket>,
    body_slot: Vec<usize>, // bucket of body i, filled in pass one
    entries: Vec<usize>,
}

impl SpatialIndex {
    /// Empty index. `cell_size` must be > 0; the solver validates it.
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            slots: HashMap::new(),
            buckets: Vec::new(),
            body_slot: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Takes effect at the next `rebuild`
    pub fn set_cell_size(&mut self, cell_size: f64) {
        self.cell_size = cell_size;
    }

    pub fn cell_of(&self, p: NVec2) -> Cell {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.buckets.clear();
        self.body_slot.clear();
        self.entries.clear();
    }

    /// Bucket every body by its current position
    pub fn rebuild(&mut self, bodies: &[Body]) {
        self.clear();

        // Pass one: bucket assignment + counts
        for body in bodies {
            let cell = self.cell_of(body.position);
            let next = self.buckets.len();
            let slot = *self.slots.entry(cell).or_insert(next);
            if slot == next {
                self.buckets.push(Bucket { cell, start: 0, len: 0 });
            }
            self.buckets[slot].len += 1;
            self.body_slot.push(slot);
        }

        // Counts -> windows; len is reused as the write cursor
        let mut start = 0;
        for bucket in self.buckets.iter_mut() {
            bucket.start = start;
            start += bucket.len;
            bucket.len = 0;
        }

        // Pass two: scatter body indices
        self.entries.resize(bodies.len(), 0);
        for (i, &slot) in self.body_slot.iter().enumerate() {
            let bucket = &mut self.buckets[slot];
            self.entries[bucket.start + bucket.len] = i;
            bucket.len += 1;
        }
    }

    pub fn populated_cells(&self) -> usize {
        self.buckets.len()
    }

    /// Populated cells in first-populated order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.buckets.iter().map(|b| b.cell)
    }

    /// Body indices in `cell`, in creation order. Empty if the cell is vacant.
    pub fn bodies_in(&self, cell: Cell) -> &[usize] {
        match self.slots.get(&cell) {
            Some(&slot) => self.bucket(slot),
            None => &[],
        }
    }

    /// Body lists of the populated cells in the 3x3 block around `cell`
    pub fn neighborhood(&self, cell: Cell) -> impl Iterator<Item = &[usize]> + '_ {
        FULL_STENCIL
            .iter()
            .filter_map(move |&d| offset(cell, d))
            .map(move |c| self.bodies_in(c))
            .filter(|list| !list.is_empty())
    }

    /// Visit every candidate pair once: same-cell pairs, then the cell
    /// against its half stencil. Cells are walked in first-populated order.
    pub fn for_each_pair<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize),
    {
        for slot in 0..self.buckets.len() {
            let home_cell = self.buckets[slot].cell;
            let home = self.bucket(slot);

            for (k, &i) in home.iter().enumerate() {
                for &j in &home[k + 1..] {
                    f(i, j);
                }
            }

            for &d in HALF_STENCIL.iter() {
                let Some(cell) = offset(home_cell, d) else {
                    continue;
                };
                let other = self.bodies_in(cell);
                for &i in home {
                    for &j in other {
                        f(i, j);
                    }
                }
            }
        }
    }

    fn bucket(&self, slot: usize) -> &[usize] {
        let b = self.buckets[slot];
        &self.entries[b.start..b.start + b.len]
    }
}

fn offset(cell: Cell, d: (i64, i64)) -> Option<Cell> {
    Some((cell.0.checked_add(d.0)?, cell.1.checked_add(d.1)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn bodies_at(points: &[(f64, f64)]) -> Vec<Body> {
        points
            .iter()
            .map(|&(x, y)| Body::new(NVec2::new(x, y), 1.0))
            .collect()
    }

    fn pairs(index: &SpatialIndex) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        index.for_each_pair(|i, j| out.push((i.min(j), i.max(j))));
        out
    }

    #[test]
    fn cell_of_floors_negative_coordinates() {
        let index = SpatialIndex::new(50.0);
        assert_eq!(index.cell_of(NVec2::new(0.0, 0.0)), (0, 0));
        assert_eq!(index.cell_of(NVec2::new(49.9, 50.0)), (0, 1));
        assert_eq!(index.cell_of(NVec2::new(-0.1, -50.0)), (-1, -1));
        assert_eq!(index.cell_of(NVec2::new(-50.1, 120.0)), (-2, 2));
    }

    #[test]
    fn rebuild_keeps_creation_order_within_cell() {
        let bodies = bodies_at(&[(10.0, 10.0), (60.0, 10.0), (20.0, 20.0), (30.0, 5.0)]);
        let mut index = SpatialIndex::new(50.0);
        index.rebuild(&bodies);

        assert_eq!(index.populated_cells(), 2);
        assert_eq!(index.bodies_in((0, 0)), &[0, 2, 3]);
        assert_eq!(index.bodies_in((1, 0)), &[1]);
        assert!(index.bodies_in((5, 5)).is_empty());
        assert_eq!(index.cells().collect::<Vec<_>>(), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn rebuild_discards_previous_state() {
        let mut index = SpatialIndex::new(50.0);
        index.rebuild(&bodies_at(&[(10.0, 10.0), (200.0, 200.0)]));
        index.rebuild(&bodies_at(&[(-10.0, -10.0)]));

        assert_eq!(index.populated_cells(), 1);
        assert!(index.bodies_in((0, 0)).is_empty());
        assert_eq!(index.bodies_in((-1, -1)), &[0]);
    }

    #[test]
    fn neighborhood_collects_3x3_block() {
        let bodies = bodies_at(&[(25.0, 25.0), (75.0, 75.0), (-25.0, 25.0), (125.0, 25.0)]);
        let mut index = SpatialIndex::new(50.0);
        index.rebuild(&bodies);

        let mut seen: Vec<usize> = index.neighborhood((0, 0)).flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn half_stencil_visits_each_adjacent_pair_once() {
        // One body in each cell of a 3x3 block plus a far-away body
        let mut points = Vec::new();
        for cy in -1..=1 {
            for cx in -1..=1 {
                points.push((cx as f64 * 50.0 + 25.0, cy as f64 * 50.0 + 25.0));
            }
        }
        points.push((1000.0, 1000.0));
        let bodies = bodies_at(&points);

        let mut index = SpatialIndex::new(50.0);
        index.rebuild(&bodies);
        let got = pairs(&index);

        let unique: HashSet<_> = got.iter().copied().collect();
        assert_eq!(unique.len(), got.len(), "a pair was visited twice");

        // Expected: all pairs whose cells differ by at most one in each axis
        let mut expected = HashSet::new();
        for i in 0..9 {
            for j in (i + 1)..9 {
                let ci = index.cell_of(bodies[i].position);
                let cj = index.cell_of(bodies[j].position);
                if (ci.0 - cj.0).abs() <= 1 && (ci.1 - cj.1).abs() <= 1 {
                    expected.insert((i, j));
                }
            }
        }
        assert_eq!(unique, expected);
        assert!(!unique.iter().any(|&(i, j)| i == 9 || j == 9));
    }

    #[test]
    fn same_cell_pairs_are_enumerated() {
        let bodies = bodies_at(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let mut index = SpatialIndex::new(50.0);
        index.rebuild(&bodies);
        assert_eq!(pairs(&index), vec![(0, 1), (0, 2), (1, 2)]);
    }
}
