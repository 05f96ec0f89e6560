//! `uav-energy` — battery model for a single UAV.
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`model`]       | `EnergyModel` — capacity bookkeeping, depletion test  |
//! | [`consumption`] | `ConsumptionModel` — energy cost of a flown distance  |
//! | [`error`]       | `EnergyError`, `EnergyResult<T>`                      |
//!
//! Depletion is one-way: there is no recharge operation, and once
//! [`EnergyModel::is_depleted`] returns `true` it keeps returning `true`.

pub mod consumption;
pub mod error;
pub mod model;


pub use consumption::ConsumptionModel;
pub use error::{EnergyError, EnergyResult};
pub use model::EnergyModel;
