//! `ReportObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::info;

use uav_motion::TrajectoryRecorder;
use uav_sim::{SimObserver, SimSummary};

use crate::writer::OutputWriter;
use crate::{CoverageGrid, OutputError, OutputResult};

/// A [`SimObserver`] that, when the run ends, bins the trajectory into a
/// [`CoverageGrid`] and hands summary, trajectory and coverage to an
/// [`OutputWriter`].
///
/// `SimObserver` methods return nothing, so writer errors are stored.  After
/// `sim.run()` returns, check with [`take_error`][Self::take_error].
pub struct ReportObserver<W: OutputWriter> {
    writer:      W,
    cell_width:  f64,
    cell_height: f64,
    coverage:    Option<CoverageGrid>,
    last_error:  Option<OutputError>,
}

impl<W: OutputWriter> ReportObserver<W> {
    /// Fails on a cell dimension that is not finite and > 0.
    pub fn new(writer: W, cell_width: f64, cell_height: f64) -> OutputResult<Self> {
        CoverageGrid::new(cell_width, cell_height)?;
        Ok(Self { writer, cell_width, cell_height, coverage: None, last_error: None })
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// The grid built at the end of the last run.
    pub fn coverage(&self) -> Option<&CoverageGrid> {
        self.coverage.as_ref()
    }

    /// Unwrap the inner writer (e.g. to inspect output after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn write_all(&mut self, summary: &SimSummary, trajectory: &TrajectoryRecorder) -> OutputResult<()> {
        let grid = CoverageGrid::analyze(trajectory.samples(), self.cell_width, self.cell_height)?;
        self.writer.write_summary(summary)?;
        self.writer.write_trajectory(trajectory.samples())?;
        self.writer.write_coverage(&grid)?;
        info!(
            samples = grid.total_samples(),
            distinct_cells = grid.distinct_cells(),
            "reports written"
        );
        self.coverage = Some(grid);
        Ok(())
    }
}

impl<W: OutputWriter> SimObserver for ReportObserver<W> {
    fn on_sim_end(&mut self, summary: &SimSummary, trajectory: &TrajectoryRecorder) {
        let result = self.write_all(summary, trajectory);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
