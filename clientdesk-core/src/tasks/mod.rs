// src/tasks/mod.rs

pub mod inactivity_sweep;
pub mod sweep_trigger;

pub use inactivity_sweep::{run_inactivity_sweep, SweepOutcome};
pub use sweep_trigger::{SweepReport, SweepTrigger};
