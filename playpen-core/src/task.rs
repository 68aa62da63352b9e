//! Tasks: reward rules and episode termination.
mod contact_reward;
pub use contact_reward::{Condition, ContactReward, ContactRewardConfig};

use crate::{record::Record, state::State};
use anyhow::Result;

/// Computes rewards and decides when episodes end.
///
/// The environment loop calls [`Task::reward`] once per tick with the fresh
/// layered state, the environment's auxiliary meta-state and the running step
/// count.
pub trait Task {
    /// Configuration.
    type Config: Clone;

    /// Builds the task.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Called at the start of every episode, before the first reward.
    fn reset(&mut self, state: &State, meta_state: &Record);

    /// Computes the reward for the current state.
    ///
    /// Returns the scalar reward and whether the environment should reset.
    fn reward(&mut self, state: &State, meta_state: &Record, step_count: usize) -> (f32, bool);

    /// Whether the task goal has been reached this episode.
    fn has_finished(&self) -> bool;
}
