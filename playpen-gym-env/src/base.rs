//! Wrapper exposing sprite environments through a Gym-style interface.
use crate::space::{spec_to_space, Space};
use log::trace;
use ndarray::ArrayD;
use playpen_core::{
    Action, DType, Environment, ObsValue, Observation, Record, RecordValue, StepType,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Observation after Gym-side processing.
///
/// Boolean entries have been coerced to `f32`; single-entry observations
/// (optionally alongside an image) collapse to the bare first array.
#[derive(Clone, Debug)]
pub enum GymObs {
    /// A collapsed float array.
    F32(ArrayD<f32>),

    /// A collapsed image array.
    U8(ArrayD<u8>),

    /// The full keyed observation, in observer order.
    Dict(Vec<(String, GymObs)>),
}

/// One Gym-style step result.
#[derive(Clone, Debug)]
pub struct GymStep {
    /// Processed observation.
    pub obs: GymObs,

    /// Scalar reward; zero when the underlying step carried none.
    pub reward: f32,

    /// True on terminal steps.
    pub done: bool,

    /// Extra information: the discount factor and, when the environment
    /// exposes it, the raw sprite info.
    pub info: Record,
}

/// Gym-flavored face of an [`Environment`].
///
/// Rendering is performed upstream by the environment's observers, so
/// [`GymWrapper::render`] just returns the frame cached from the last
/// observation that carried an `image` entry.
pub struct GymWrapper<E: Environment> {
    env: E,

    last_render: Option<ArrayD<u8>>,

    // Frames appended by render() since the last reset.
    rendered_frames: Vec<ArrayD<u8>>,

    observation_space: Option<Space>,

    action_space: Option<Space>,

    rng: SmallRng,
}

impl<E: Environment> GymWrapper<E> {
    /// Wraps `env`, resetting it once so the observation specs are well
    /// defined.
    pub fn new(mut env: E) -> Self {
        env.reset();
        Self {
            env,
            last_render: None,
            rendered_frames: Vec::new(),
            observation_space: None,
            action_space: None,
            rng: SmallRng::seed_from_u64(0),
        }
    }

    /// Reward bounds advertised to callers.
    pub fn reward_range(&self) -> (f32, f32) {
        (f32::NEG_INFINITY, f32::INFINITY)
    }

    /// Gym observation space, built lazily from the wrapped observation
    /// spec.
    ///
    /// Entries whose key mentions an image map to byte boxes over [0, 255];
    /// everything else maps to a box over [0, 1] of the spec dtype. The
    /// collapsing rule matches [`GymWrapper::step`]: a single entry, or two
    /// entries one of which is the image, yield the first entry's space.
    pub fn observation_space(&mut self) -> Space {
        if self.observation_space.is_none() {
            let components: Vec<(String, Space)> = self
                .env
                .observation_spec()
                .into_iter()
                .map(|(key, spec)| {
                    let space = if key.contains("image") {
                        Space::Box {
                            low: 0.0,
                            high: 255.0,
                            shape: spec.shape.clone(),
                            dtype: DType::U8,
                        }
                    } else {
                        Space::Box {
                            low: 0.0,
                            high: 1.0,
                            shape: spec.shape.clone(),
                            dtype: spec.dtype,
                        }
                    };
                    (key, space)
                })
                .collect();

            let space = if collapses(components.len(), components.iter().map(|(k, _)| k.as_str()))
            {
                components[0].1.clone()
            } else {
                Space::Dict(components)
            };
            self.observation_space = Some(space);
        }
        self.observation_space.clone().unwrap()
    }

    /// Gym action space, built lazily from the wrapped action spec.
    pub fn action_space(&mut self) -> Space {
        if self.action_space.is_none() {
            self.action_space = Some(spec_to_space(&self.env.action_spec()));
        }
        self.action_space.clone().unwrap()
    }

    /// Converts and processes an observation.
    fn process_obs(&mut self, obs: Observation) -> GymObs {
        let mut entries: Vec<(String, GymObs)> = Vec::with_capacity(obs.len());
        for (key, value) in obs {
            let processed = match value {
                ObsValue::F32(a) => GymObs::F32(a),
                ObsValue::U8(a) => GymObs::U8(a),
                // Success flags become float targets so they can be
                // predicted.
                ObsValue::Bool(a) => GymObs::F32(a.mapv(|b| b as u8 as f32)),
            };
            if key == "image" {
                if let GymObs::U8(frame) = &processed {
                    self.last_render = Some(frame.clone());
                }
            }
            entries.push((key, processed));
        }

        if collapses(entries.len(), entries.iter().map(|(k, _)| k.as_str())) {
            entries.swap_remove(0).1
        } else {
            GymObs::Dict(entries)
        }
    }

    /// Steps the wrapped environment.
    ///
    /// The returned info record always carries the discount factor, plus the
    /// raw `sprite_info` array when the environment observes one.
    pub fn step(&mut self, action: &Action) -> GymStep {
        trace!("GymWrapper::step()");
        let time_step = self.env.step(action);

        let mut info = Record::empty();
        if let Some(discount) = time_step.discount {
            info.insert("discount", RecordValue::Scalar(discount));
        }
        if let Some(ObsValue::F32(v)) = time_step.observation.get("sprite_info") {
            info.insert("sprite_info", RecordValue::Array1(v.iter().cloned().collect()));
        }

        let reward = time_step.reward.unwrap_or(0.0);
        let done = time_step.step_type == StepType::Last;
        let obs = self.process_obs(time_step.observation);

        GymStep {
            obs,
            reward,
            done,
            info,
        }
    }

    /// Starts a new episode and returns its first processed observation.
    pub fn reset(&mut self) -> GymObs {
        trace!("GymWrapper::reset()");
        let time_step = self.env.reset();
        self.rendered_frames.clear();
        self.process_obs(time_step.observation)
    }

    /// Returns the cached frame of the last image observation, appending it
    /// to the episode frame buffer.
    pub fn render(&mut self) -> Option<ArrayD<u8>> {
        if let Some(frame) = &self.last_render {
            self.rendered_frames.push(frame.clone());
        }
        self.last_render.clone()
    }

    /// Frames collected by [`GymWrapper::render`] since the last reset.
    pub fn frames(&self) -> &[ArrayD<u8>] {
        &self.rendered_frames
    }

    /// Reseeds the wrapper's random number source and returns the seed
    /// used. Absent an explicit seed, one is drawn from the current source.
    pub fn seed(&mut self, seed: Option<u64>) -> u64 {
        let seed = seed.unwrap_or_else(|| self.rng.gen());
        self.rng = SmallRng::seed_from_u64(seed);
        seed
    }

    /// Unused; present for interface parity.
    pub fn close(&mut self) {}
}

/// Whether a keyed observation (or its space) collapses to its first entry:
/// a single entry, or exactly two entries one of which is the image.
fn collapses<'a>(len: usize, mut keys: impl Iterator<Item = &'a str>) -> bool {
    len == 1 || (len == 2 && keys.any(|k| k == "image"))
}
