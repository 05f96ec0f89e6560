//! `CoverageGrid` — spatial histogram of recorded positions.
//!
//! A position `(x, y)` falls into cell `(⌊x / w⌋, ⌊y / h⌋)`; the z coordinate
//! is ignored.  Cells are kept in a `BTreeMap` so iteration order, and every
//! report built from it, depends only on the samples and the cell size.

use std::collections::BTreeMap;

use uav_core::Position;
use uav_motion::TrajectorySample;

use crate::{OutputError, OutputResult};

/// Integer cell coordinates `(column, row)`.  Negative for positions left of
/// or below the origin.
pub type Cell = (i64, i64);

#[derive(Clone, Debug, PartialEq)]
pub struct CoverageGrid {
    cell_width:    f64,
    cell_height:   f64,
    cells:         BTreeMap<Cell, u64>,
    total_samples: u64,
}

impl CoverageGrid {
    /// An empty grid.  Both cell dimensions must be finite and > 0.
    pub fn new(cell_width: f64, cell_height: f64) -> OutputResult<Self> {
        for (name, v) in [("cell_width", cell_width), ("cell_height", cell_height)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(OutputError::InvalidCellSize(format!(
                    "{name} must be a finite number > 0, got {v}"
                )));
            }
        }
        Ok(Self { cell_width, cell_height, cells: BTreeMap::new(), total_samples: 0 })
    }

    /// Bin every sample.  Pure: the same inputs always give an equal grid.
    pub fn analyze(samples: &[TrajectorySample], cell_width: f64, cell_height: f64) -> OutputResult<Self> {
        let mut grid = Self::new(cell_width, cell_height)?;
        for s in samples {
            grid.record(s.position);
        }
        Ok(grid)
    }

    /// Count one more visit to the cell containing `position`.
    pub fn record(&mut self, position: Position) {
        let cell = self.cell_of(position);
        *self.cells.entry(cell).or_insert(0) += 1;
        self.total_samples += 1;
    }

    pub fn cell_of(&self, position: Position) -> Cell {
        (
            (position.x / self.cell_width).floor() as i64,
            (position.y / self.cell_height).floor() as i64,
        )
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    pub fn distinct_cells(&self) -> usize {
        self.cells.len()
    }

    /// Visit count for `cell`; zero if never visited.
    pub fn visits(&self, cell: Cell) -> u64 {
        self.cells.get(&cell).copied().unwrap_or(0)
    }

    pub fn max_visits(&self) -> u64 {
        self.cells.values().copied().max().unwrap_or(0)
    }

    /// Number of cells per visit count: `{visits → cells}`.
    pub fn visit_histogram(&self) -> BTreeMap<u64, usize> {
        let mut hist = BTreeMap::new();
        for &count in self.cells.values() {
            *hist.entry(count).or_insert(0) += 1;
        }
        hist
    }

    /// Visited cells in `(column, row)` order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, u64)> + '_ {
        self.cells.iter().map(|(&cell, &count)| (cell, count))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
