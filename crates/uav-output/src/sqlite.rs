//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `trajectory`, `coverage` and `summary`.  Opening a writer
//! on a directory that already holds `output.db` replaces those tables, so
//! the database always describes the latest run, like the CSV files.

use std::path::Path;

use rusqlite::Connection;

use uav_motion::TrajectorySample;
use uav_sim::SimSummary;

use crate::writer::OutputWriter;
use crate::{CoverageGrid, OutputResult};

/// Writes reports to an SQLite database.
pub struct SqliteReportWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteReportWriter {
    /// Open (or create) `output.db` in `dir` and reset the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS trajectory;
             DROP TABLE IF EXISTS coverage;
             DROP TABLE IF EXISTS summary;
             CREATE TABLE trajectory (
                 seq     INTEGER PRIMARY KEY,
                 time_ms INTEGER NOT NULL,
                 x       REAL    NOT NULL,
                 y       REAL    NOT NULL,
                 z       REAL    NOT NULL
             );
             CREATE TABLE coverage (
                 cell_x  INTEGER NOT NULL,
                 cell_y  INTEGER NOT NULL,
                 visits  INTEGER NOT NULL,
                 PRIMARY KEY (cell_x, cell_y)
             );
             CREATE TABLE summary (
                 final_time_ms   INTEGER NOT NULL,
                 state           TEXT    NOT NULL,
                 ticks           INTEGER NOT NULL,
                 samples         INTEGER NOT NULL,
                 consumed_energy REAL    NOT NULL,
                 distance        REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteReportWriter {
    fn write_trajectory(&mut self, samples: &[TrajectorySample]) -> OutputResult<()> {
        if samples.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO trajectory (seq, time_ms, x, y, z) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (seq, s) in samples.iter().enumerate() {
                stmt.execute(rusqlite::params![
                    seq as i64,
                    s.time.as_millis() as i64,
                    s.position.x,
                    s.position.y,
                    s.position.z,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_coverage(&mut self, grid: &CoverageGrid) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO coverage (cell_x, cell_y, visits) VALUES (?1, ?2, ?3)",
            )?;
            for ((cx, cy), visits) in grid.iter() {
                stmt.execute(rusqlite::params![cx, cy, visits as i64])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &SimSummary) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO summary (final_time_ms, state, ticks, samples, consumed_energy, distance) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                summary.final_time.as_millis() as i64,
                summary.lifecycle.to_string(),
                summary.ticks as i64,
                summary.samples as i64,
                summary.consumed_energy,
                summary.distance,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
