//! Human-readable report backend.
//!
//! ```text
//! # summary
//! final time        : 5.000s
//! ...
//!
//! # trajectory: 6 samples
//! 0.000s  0 0 0
//! 1.000s  10 0 0
//!
//! # coverage: cell 10 x 10, 2 distinct cells, 6 samples
//! 0 0  3
//! 1 0  3
//! # histogram (visits: cells)
//! 3: 2
//! ```
//!
//! Coordinates use `f64`'s `Display`, which prints the shortest string that
//! parses back to the same value, so no precision is lost.

use std::io::Write;

use uav_motion::TrajectorySample;
use uav_sim::SimSummary;

use crate::writer::OutputWriter;
use crate::{CoverageGrid, OutputResult};

pub struct TextReportWriter<W: Write> {
    out:      W,
    finished: bool,
}

impl<W: Write> TextReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, finished: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputWriter for TextReportWriter<W> {
    fn write_trajectory(&mut self, samples: &[TrajectorySample]) -> OutputResult<()> {
        writeln!(self.out, "# trajectory: {} samples", samples.len())?;
        for s in samples {
            let p = s.position;
            writeln!(self.out, "{}  {} {} {}", s.time, p.x, p.y, p.z)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn write_coverage(&mut self, grid: &CoverageGrid) -> OutputResult<()> {
        writeln!(
            self.out,
            "# coverage: cell {} x {}, {} distinct cells, {} samples",
            grid.cell_width(),
            grid.cell_height(),
            grid.distinct_cells(),
            grid.total_samples()
        )?;
        for ((cx, cy), visits) in grid.iter() {
            writeln!(self.out, "{cx} {cy}  {visits}")?;
        }
        writeln!(self.out, "# histogram (visits: cells)")?;
        for (visits, cells) in grid.visit_histogram() {
            writeln!(self.out, "{visits}: {cells}")?;
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &SimSummary) -> OutputResult<()> {
        writeln!(self.out, "# summary")?;
        writeln!(self.out, "{summary}")?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
