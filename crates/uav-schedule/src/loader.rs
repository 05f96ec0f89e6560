//! CSV control-script loader.
//!
//! # CSV format
//!
//! One row per command.  `at_secs` is virtual seconds from simulation start.
//!
//! ```csv
//! at_secs,command
//! 12.5,pause
//! 20,resume
//! 90,halt
//! ```
//!
//! Rows are returned sorted by time; rows sharing a time keep file order.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use uav_core::SimTime;

use crate::{ControlCommand, ScheduleError, ScheduledControl};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ControlRecord {
    at_secs: f64,
    command: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a control script from a CSV file.
pub fn load_controls_csv(path: &Path) -> Result<Vec<ScheduledControl>, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_controls_reader(file)
}

/// Like [`load_controls_csv`] but accepts any `Read` source.
pub fn load_controls_reader<R: Read>(reader: R) -> Result<Vec<ScheduledControl>, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut controls = Vec::new();

    for result in csv_reader.deserialize::<ControlRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        if !row.at_secs.is_finite() || row.at_secs < 0.0 {
            return Err(ScheduleError::Parse(format!(
                "invalid time {}: expected a finite number of seconds >= 0",
                row.at_secs
            )));
        }
        controls.push(ScheduledControl {
            at:      SimTime::from_secs_f64(row.at_secs),
            command: row.command.parse::<ControlCommand>()?,
        });
    }

    controls.sort_by_key(|c| c.at);
    Ok(controls)
}
