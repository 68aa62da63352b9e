//! Action spaces: how agent decisions move sprites.
mod select_move;
pub use select_move::{NoiseScale, SelectMove, SelectMoveConfig};

use crate::{spec::BoundedArraySpec, state::State, Action};
use anyhow::Result;

/// Translates agent actions into sprite mutations, once per tick.
///
/// The environment loop calls [`ActionSpace::step`] with the fresh layered
/// state every tick; implementations mutate sprites in place and return
/// nothing. Randomness (action sampling, noise) comes from a source owned by
/// the implementation and seeded at build time, so behavior is reproducible.
pub trait ActionSpace {
    /// Configuration.
    type Config: Clone;

    /// Builds the action space. `seed` initializes its random number source.
    fn build(config: &Self::Config, seed: u64) -> Result<Self>
    where
        Self: Sized;

    /// Applies one action to the state.
    fn step(&mut self, state: &mut State, action: &Action);

    /// Called at the start of every episode.
    fn reset(&mut self, state: &mut State);

    /// Samples an action uniformly from the action bounds.
    fn random_action(&mut self) -> Action;

    /// The static descriptor of accepted actions.
    fn action_spec(&self) -> &BoundedArraySpec;
}
