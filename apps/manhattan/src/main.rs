//! `manhattan` — fly one UAV over a street graph and print what it covered.
//!
//! ```text
//! manhattan --config apps/manhattan/data/mission.toml
//! manhattan --graph apps/manhattan/data/square.graph \
//!           --speed 10 --voltage 5 --capacity 50 --duration 60 --step 10
//! ```
//!
//! Flags given alongside `--config` override the file.  Log verbosity follows
//! `RUST_LOG` (default `info`; `--verbose` switches the default to `debug`).

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use uav_output::{CoverageGrid, CsvReportWriter, OutputWriter, ReportObserver, TextReportWriter};
use uav_schedule::load_controls_csv;
use uav_sim::{MissionConfig, NoopObserver, SimBuilder};


#[derive(Parser, Debug)]
#[command(
    name = "manhattan",
    about = "Battery-limited UAV roaming a road graph in virtual time",
    version
)]
struct Cli {
    /// Mission file (TOML); individual flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Graph description file.
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Speed, units per virtual second.
    #[arg(long)]
    speed: Option<f64>,

    #[arg(long)]
    voltage: Option<f64>,

    #[arg(long)]
    capacity: Option<f64>,

    /// Horizon, virtual seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// `random` or `least-visited`.
    #[arg(long)]
    strategy: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    /// Distance covered per tick.
    #[arg(long)]
    step: Option<f64>,

    #[arg(long)]
    cell_width: Option<f64>,

    #[arg(long)]
    cell_height: Option<f64>,

    #[arg(long, requires = "start_y")]
    start_x: Option<f64>,

    #[arg(long, requires = "start_x")]
    start_y: Option<f64>,

    /// Start altitude; needs `--start-x` and `--start-y`.
    #[arg(long, requires = "start_x")]
    start_z: Option<f64>,

    /// CSV script of pause / resume / halt commands (`at_secs,command`).
    #[arg(long)]
    controls: Option<PathBuf>,

    /// Also write CSV reports (and `output.db` with the `sqlite` feature) here.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Skip printing the trajectory and coverage tables.
    #[arg(short, long)]
    quiet: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn mission(&self) -> Result<MissionConfig> {
        let mut config = match &self.config {
            Some(path) => MissionConfig::from_toml_file(path)
                .with_context(|| format!("reading mission file {}", path.display()))?,
            None => {
                let (Some(graph), Some(speed), Some(voltage), Some(capacity), Some(duration)) =
                    (&self.graph, self.speed, self.voltage, self.capacity, self.duration)
                else {
                    bail!("without --config, --graph --speed --voltage --capacity --duration are all required");
                };
                MissionConfig::new(graph, speed, voltage, capacity, duration)
            }
        };

        if let Some(g) = &self.graph { config.graph_path = g.clone(); }
        if let Some(v) = self.speed { config.speed = v; }
        if let Some(v) = self.voltage { config.voltage = v; }
        if let Some(v) = self.capacity { config.capacity = v; }
        if let Some(v) = self.duration { config.duration_secs = v; }
        if let Some(s) = &self.strategy { config.strategy = s.clone(); }
        if let Some(v) = self.seed { config.seed = v; }
        if let Some(v) = self.step { config.step_length = v; }
        if let Some(v) = self.cell_width { config.cell_width = v; }
        if let Some(v) = self.cell_height { config.cell_height = v; }
        if let (Some(x), Some(y)) = (self.start_x, self.start_y) {
            config.start = Some(match self.start_z {
                Some(z) => vec![x, y, z],
                None => vec![x, y],
            });
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = cli.mission()?;
    let (cell_w, cell_h) = (config.cell_width, config.cell_height);

    let controls = match &cli.controls {
        Some(path) => load_controls_csv(path)
            .with_context(|| format!("reading control script {}", path.display()))?,
        None => Vec::new(),
    };
    info!(graph = %config.graph_path.display(), controls = controls.len(), "building mission");

    let mut sim = SimBuilder::new(config).controls(controls).build()?;

    // ── Run ───────────────────────────────────────────────────────────────
    let summary = if cli.quiet {
        sim.run(&mut NoopObserver)?
    } else {
        let stdout = io::stdout().lock();
        let mut obs = ReportObserver::new(TextReportWriter::new(stdout), cell_w, cell_h)?;
        let summary = sim.run(&mut obs)?;
        if let Some(e) = obs.take_error() {
            return Err(e).context("writing report to stdout");
        }
        summary
    };

    // ── Files ─────────────────────────────────────────────────────────────
    if let Some(dir) = &cli.out_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let grid = CoverageGrid::analyze(sim.trajectory().samples(), cell_w, cell_h)?;

        let mut csv = CsvReportWriter::new(dir)?;
        csv.write_trajectory(sim.trajectory().samples())?;
        csv.write_coverage(&grid)?;
        csv.finish()?;

        #[cfg(feature = "sqlite")]
        {
            let mut db = uav_output::SqliteReportWriter::new(dir)?;
            db.write_summary(&summary)?;
            db.write_trajectory(sim.trajectory().samples())?;
            db.write_coverage(&grid)?;
            db.finish()?;
        }

        info!(dir = %dir.display(), "reports written");
    }

    if cli.quiet {
        println!("{summary}");
    }
    Ok(())
}
