//! `uav-output` — coverage analysis and report writers.
//!
//! Three backends are provided:
//!
//! | Feature   | Backend   | Output                                         |
//! |-----------|-----------|------------------------------------------------|
//! | *(none)*  | Text      | any `io::Write` (stdout, a file, a `Vec<u8>`)  |
//! | *(none)*  | CSV       | `trajectory.csv`, `coverage.csv`               |
//! | `sqlite`  | SQLite    | `output.db`                                    |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`ReportObserver`], which implements `uav_sim::SimObserver` and writes
//! everything once the run has ended.
//!
//! # Usage
//!
//! ```rust,ignore
//! use uav_output::{CsvReportWriter, ReportObserver};
//!
//! let writer = CsvReportWriter::new(Path::new("./output"))?;
//! let mut obs = ReportObserver::new(writer, config.cell_width, config.cell_height)?;
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod coverage;
pub mod csv;
pub mod error;
pub mod observer;
pub mod text;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use coverage::{Cell, CoverageGrid};
pub use crate::csv::CsvReportWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ReportObserver;
pub use text::TextReportWriter;
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteReportWriter;
