//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trajectory.csv` — `time_ms, x, y, z`
//! - `coverage.csv`   — `cell_x, cell_y, visits`

use std::fs::File;
use std::path::Path;

use ::csv::Writer;

use uav_motion::TrajectorySample;

use crate::writer::OutputWriter;
use crate::{CoverageGrid, OutputResult};

/// Writes trajectory and coverage reports to two CSV files.
pub struct CsvReportWriter {
    trajectory: Writer<File>,
    coverage:   Writer<File>,
    finished:   bool,
}

impl CsvReportWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trajectory = Writer::from_path(dir.join("trajectory.csv"))?;
        trajectory.write_record(["time_ms", "x", "y", "z"])?;

        let mut coverage = Writer::from_path(dir.join("coverage.csv"))?;
        coverage.write_record(["cell_x", "cell_y", "visits"])?;

        Ok(Self { trajectory, coverage, finished: false })
    }
}

impl OutputWriter for CsvReportWriter {
    fn write_trajectory(&mut self, samples: &[TrajectorySample]) -> OutputResult<()> {
        for s in samples {
            self.trajectory.write_record(&[
                s.time.as_millis().to_string(),
                s.position.x.to_string(),
                s.position.y.to_string(),
                s.position.z.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_coverage(&mut self, grid: &CoverageGrid) -> OutputResult<()> {
        for ((cx, cy), visits) in grid.iter() {
            self.coverage.write_record(&[cx.to_string(), cy.to_string(), visits.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trajectory.flush()?;
        self.coverage.flush()?;
        Ok(())
    }
}
