//! Mission configuration.
//!
//! Loaded from TOML (or built in code) and validated before any virtual
//! time passes.
//!
//! ```toml
//! graph_path    = "data/manhattan.graph"
//! speed         = 10.0      # units / virtual second
//! voltage       = 11.1
//! capacity      = 1000.0
//! duration_secs = 600.0
//! strategy      = "random"  # or "least-visited"
//! seed          = 7
//! step_length   = 1.0
//! start         = [0.0, 0.0]  # or [x, y, z]
//! cell_width    = 10.0
//! cell_height   = 10.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use uav_core::{require_positive, Position, SimTime};
use uav_energy::{ConsumptionModel, EnergyModel};
use uav_motion::MotionConfig;
use uav_select::StrategyKind;

use crate::{SimError, SimResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MissionConfig {
    /// Graph description file.
    pub graph_path: PathBuf,

    /// Agent speed, units per virtual second.
    pub speed: f64,

    /// Nominal battery voltage.
    pub voltage: f64,

    /// Usable battery capacity, in energy units.
    pub capacity: f64,

    /// Next-hop policy name.
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Simulation horizon in virtual seconds.
    pub duration_secs: f64,

    #[serde(default)]
    pub seed: u64,

    /// Target distance per tick before clamping to the coverage cell size.
    #[serde(default = "default_step_length")]
    pub step_length: f64,

    /// Start coordinate `[x, y]` or `[x, y, z]` (z defaults to 0); the
    /// first node of the graph when absent.
    #[serde(default)]
    pub start: Option<Vec<f64>>,

    #[serde(default = "default_cell")]
    pub cell_width: f64,

    #[serde(default = "default_cell")]
    pub cell_height: f64,

    /// Energy per unit distance.
    #[serde(default = "default_energy_per_unit")]
    pub energy_per_unit: f64,

    /// Extra energy per unit distance per unit speed.
    #[serde(default)]
    pub energy_per_unit_speed: f64,
}

fn default_strategy() -> String { StrategyKind::Random.as_str().to_owned() }
fn default_step_length() -> f64 { 1.0 }
fn default_cell() -> f64 { 10.0 }
fn default_energy_per_unit() -> f64 { 1.0 }

impl MissionConfig {
    /// A config with the required fields set and everything else defaulted.
    pub fn new(
        graph_path:    impl Into<PathBuf>,
        speed:         f64,
        voltage:       f64,
        capacity:      f64,
        duration_secs: f64,
    ) -> Self {
        Self {
            graph_path: graph_path.into(),
            speed,
            voltage,
            capacity,
            strategy: default_strategy(),
            duration_secs,
            seed: 0,
            step_length: default_step_length(),
            start: None,
            cell_width: default_cell(),
            cell_height: default_cell(),
            energy_per_unit: default_energy_per_unit(),
            energy_per_unit_speed: 0.0,
        }
    }

    pub fn from_toml_str(s: &str) -> SimResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file(path: &Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject anything that would make the mission meaningless.
    pub fn validate(&self) -> SimResult<()> {
        require_positive("speed", self.speed)?;
        require_positive("voltage", self.voltage)?;
        require_positive("capacity", self.capacity)?;
        require_positive("duration_secs", self.duration_secs)?;
        require_positive("step_length", self.step_length)?;
        require_positive("cell_width", self.cell_width)?;
        require_positive("cell_height", self.cell_height)?;
        self.start_position()?;
        self.strategy_kind()?;
        self.consumption()?;
        self.motion_config()?;
        if self.horizon() == SimTime::ZERO {
            return Err(SimError::InvalidConfiguration(format!(
                "duration_secs {} rounds to zero milliseconds",
                self.duration_secs
            )));
        }
        Ok(())
    }

    // ── Derived values ────────────────────────────────────────────────────

    pub fn strategy_kind(&self) -> SimResult<StrategyKind> {
        Ok(self.strategy.parse::<StrategyKind>()?)
    }

    pub fn consumption(&self) -> SimResult<ConsumptionModel> {
        Ok(ConsumptionModel::new(self.energy_per_unit, self.energy_per_unit_speed)?)
    }

    pub fn energy_model(&self) -> SimResult<EnergyModel> {
        Ok(EnergyModel::new(self.voltage, self.capacity)?.with_consumption(self.consumption()?))
    }

    /// Step length clamped so consecutive samples never skip a coverage cell.
    pub fn effective_step(&self) -> f64 {
        self.step_length.min(self.cell_width).min(self.cell_height)
    }

    pub fn motion_config(&self) -> SimResult<MotionConfig> {
        Ok(MotionConfig::new(self.speed, self.effective_step())?)
    }

    pub fn horizon(&self) -> SimTime {
        SimTime::from_secs_f64(self.duration_secs)
    }

    pub fn start_position(&self) -> SimResult<Option<Position>> {
        let Some(coords) = self.start.as_deref() else {
            return Ok(None);
        };
        if coords.iter().any(|v| !v.is_finite()) {
            return Err(SimError::InvalidConfiguration(format!(
                "start must be finite, got {coords:?}"
            )));
        }
        match *coords {
            [x, y] => Ok(Some(Position::planar(x, y))),
            [x, y, z] => Ok(Some(Position::new(x, y, z))),
            _ => Err(SimError::InvalidConfiguration(format!(
                "start takes 2 or 3 coordinates, got {}",
                coords.len()
            ))),
        }
    }
}
