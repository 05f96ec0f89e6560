//! The `OutputWriter` trait implemented by all backend writers.

use uav_motion::TrajectorySample;
use uav_sim::SimSummary;

use crate::{CoverageGrid, OutputResult};

/// Trait implemented by the text, CSV, and SQLite writers.
///
/// Errors are stored by [`ReportObserver`][crate::ReportObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write the whole trajectory, in recorded order.
    fn write_trajectory(&mut self, samples: &[TrajectorySample]) -> OutputResult<()>;

    /// Write one row per visited cell.
    fn write_coverage(&mut self, grid: &CoverageGrid) -> OutputResult<()>;

    /// Write the end-of-run summary.  Backends without a place for it skip it.
    fn write_summary(&mut self, _summary: &SimSummary) -> OutputResult<()> {
        Ok(())
    }

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
