#![warn(missing_docs)]
//! Plugin building blocks for sprite-based reinforcement learning environments.
//!
//! An environment in this framework is a 2D arena of [`Sprite`]s grouped into
//! named layers ([`State`]). The environment loop itself lives elsewhere; this
//! crate provides the pieces that are plugged into it:
//!
//! * [`ActionSpace`] implementations translate agent actions into sprite
//!   mutations. [`SelectMove`] is the built-in click-like action space.
//! * [`Task`] implementations compute rewards and decide when episodes end.
//!   [`ContactReward`] is the built-in proximity/contact rule.
//! * The [`Environment`] trait is the stepping contract between a complete
//!   environment and its wrappers, emitting a [`TimeStep`] per interaction.
//!
//! Plugins are stateless or lightly stateful: they receive the layered state
//! fresh every tick and never own sprite lifecycles.
pub mod error;
pub mod record;

mod action_space;
mod env;
mod spec;
mod sprite;
mod state;
mod task;

pub use action_space::{ActionSpace, NoiseScale, SelectMove, SelectMoveConfig};
pub use env::{Environment, ObsValue, Observation, StepType, TimeStep};
pub use record::{Record, RecordValue};
pub use spec::{BoundedArraySpec, DType};
pub use sprite::{Shape, Sprite};
pub use state::State;
pub use task::{Condition, ContactReward, ContactRewardConfig, Task};

/// Action vector handed to an action space every tick.
pub type Action = ndarray::Array1<f32>;
