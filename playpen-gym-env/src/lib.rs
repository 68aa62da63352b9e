#![warn(missing_docs)]
//! A Gym-flavored wrapper for sprite environments.
//!
//! Environments implementing [`playpen_core::Environment`] speak the
//! stepping-interface dialect: `step`/`reset` return a
//! [`TimeStep`](playpen_core::TimeStep) and specs describe observations and
//! actions. Most RL toolkits instead expect the Gym dialect: an
//! `observation_space`/`action_space` pair and `step` returning
//! `(obs, reward, done, info)`. [`GymWrapper`] translates between the two.
//! Unlike other wrappers it intentionally changes the API of the environment.
//!
//! ## Observation
//!
//! Observations keep the keys of the wrapped environment's observers and are
//! processed on the way out: boolean arrays are coerced to `f32` so success
//! flags can be predicted, and the frame of an `image` entry is cached for
//! [`GymWrapper::render`]. An observation with a single entry (or exactly two
//! entries, one of which is the image) collapses to its first bare array
//! instead of a dictionary, and its space collapses the same way.
//!
//! ## Action
//!
//! The wrapped action spec converts to a [`Space::Box`] with the spec's
//! bounds broadcast over its shape; composite spec lists convert to
//! [`Space::Tuple`].
mod base;
mod space;
pub use base::{GymObs, GymStep, GymWrapper};
pub use space::{spec_to_space, specs_to_space, Space};
