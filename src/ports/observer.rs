//! Observer port - abstraction for simulation observation
//!
//! Observers receive the per-tick event stream of a running simulation:
//! field snapshots, catches, escape attempts, and the final outcome. They
//! can be composed, so console rendering, progress display, and test
//! recording stay independent of the loop itself.
//!
//! # Event Sequence
//!
//! 1. `on_start(snapshot)` - Once, before the first tick
//! 2. Per tick: `on_catch` / `on_escape` as they happen, then
//!    `on_tick(step, snapshot)` after the reward refresh
//! 3. `on_finish(outcome)` - Once, with the final outcome

use crate::{Result, render::FieldSnapshot, simulation::Outcome};

/// Observer trait for monitoring a simulation run
///
/// Every method has a no-op default, so adapters implement only the events
/// they care about.
pub trait Observer {
    /// Called once before the first tick, with the initial field.
    fn on_start(&mut self, _snapshot: &FieldSnapshot) -> Result<()> {
        Ok(())
    }

    /// Called every tick after the reward refresh.
    ///
    /// `step` is the number of moves the tiger has made so far.
    fn on_tick(&mut self, _step: usize, _snapshot: &FieldSnapshot) -> Result<()> {
        Ok(())
    }

    /// Called when the tiger catches a rabbit.
    fn on_catch(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    /// Called for every escape attempt.
    ///
    /// `escaped` is false when the jump was rejected (target off-grid or
    /// occupied) and the rabbit stayed put.
    fn on_escape(&mut self, _name: &str, _escaped: bool) -> Result<()> {
        Ok(())
    }

    /// Called once with the final outcome.
    fn on_finish(&mut self, _outcome: &Outcome) -> Result<()> {
        Ok(())
    }
}
