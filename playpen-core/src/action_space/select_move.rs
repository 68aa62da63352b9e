//! Click-to-move action space.
use super::ActionSpace;
use crate::{
    spec::{BoundedArraySpec, DType},
    state::State,
    Action,
};
use anyhow::Result;
use glam::Vec2;
use log::trace;
use ndarray::Array1;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Standard deviation of the Gaussian noise added to incoming actions.
///
/// A scalar applies to all four components; a vector gives one stddev per
/// component. Both input shapes normalize to four per-component stddevs at
/// build time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum NoiseScale {
    /// One stddev shared by every component.
    Scalar(f32),

    /// One stddev per action component.
    PerComponent([f32; 4]),
}

impl NoiseScale {
    fn stddevs(&self) -> [f32; 4] {
        match *self {
            NoiseScale::Scalar(s) => [s; 4],
            NoiseScale::PerComponent(s) => s,
        }
    }
}

/// Configuration of [`SelectMove`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectMoveConfig {
    /// Layers searched for clickable sprites, in draw order.
    pub action_layers: Vec<String>,

    /// Multiplier by which the motion is scaled down. Should be in [0, 1].
    pub scale: f32,

    /// Factor by which motion incurs cost. Reserved; the current step logic
    /// reads it but applies no cost.
    pub motion_cost: f32,

    /// Optional stddev of Gaussian noise added to incoming actions.
    pub noise_scale: Option<NoiseScale>,

    /// If true, clicks overwrite the sprite velocity instead of adding to it.
    pub instant_move: bool,
}

impl Default for SelectMoveConfig {
    fn default() -> Self {
        Self {
            action_layers: vec!["agent".to_string()],
            scale: 1.0,
            motion_cost: 0.0,
            noise_scale: None,
            instant_move: false,
        }
    }
}

impl SelectMoveConfig {
    /// Sets the layers searched for clickable sprites.
    pub fn action_layers(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.action_layers = names.into_iter().map(|n| n.into()).collect();
        self
    }

    /// Sets the motion scale.
    pub fn scale(mut self, v: f32) -> Self {
        self.scale = v;
        self
    }

    /// Sets the motion cost factor.
    pub fn motion_cost(mut self, v: f32) -> Self {
        self.motion_cost = v;
        self
    }

    /// Sets the action noise stddev.
    pub fn noise_scale(mut self, v: Option<NoiseScale>) -> Self {
        self.noise_scale = v;
        self
    }

    /// Sets whether clicks overwrite the sprite velocity.
    pub fn instant_move(mut self, v: bool) -> Self {
        self.instant_move = v;
        self
    }

    /// Constructs [`SelectMoveConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }

    /// Saves [`SelectMoveConfig`] as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Select-Move action space.
///
/// Interprets the 4-vector action as two consecutive clicks
/// `[first_x, first_y, second_x, second_y]`. The first click selects the
/// topmost sprite containing that point; the second click is a target the
/// selected sprite is pushed toward:
///
/// ```text
/// motion = target - sprite.position
/// velocity += motion / mass * scale      (velocity = ... with instant_move)
/// ```
///
/// If the first click lands on no sprite, the step moves nothing. So to move
/// a sprite you click on it and then click where it should go, like a touch
/// screen.
///
/// Components are expected in [0, 1] but are neither validated nor clamped:
/// out-of-range values, including ones produced by the configured noise, are
/// processed as-is.
pub struct SelectMove {
    action_layers: Vec<String>,
    scale: f32,
    // Reserved for a motion-proportional cost term.
    #[allow(dead_code)]
    motion_cost: f32,
    noise: Option<[Normal<f32>; 4]>,
    instant_move: bool,
    spec: BoundedArraySpec,
    rng: SmallRng,
}

impl SelectMove {
    /// Adds Gaussian noise to the action if noise is configured.
    ///
    /// No clamping afterwards: noise degrades positional precision and may
    /// push components outside [0, 1].
    fn apply_noise(&mut self, action: &Action) -> Action {
        match &self.noise {
            None => action.clone(),
            Some(normals) => {
                let mut noised = action.clone();
                for (x, normal) in noised.iter_mut().zip(normals.iter()) {
                    *x += normal.sample(&mut self.rng);
                }
                noised
            }
        }
    }

    /// The topmost sprite containing `position`, as `(layer name, index)`.
    ///
    /// Layers are scanned in reverse configuration order and sprites in
    /// reverse draw order, so the last-drawn sprite wins.
    fn sprite_at(&self, state: &State, position: Vec2) -> Option<(&str, usize)> {
        self.action_layers.iter().rev().find_map(|name| {
            state
                .layer(name)
                .iter()
                .rposition(|sprite| sprite.contains_point(position))
                .map(|ix| (name.as_str(), ix))
        })
    }
}

impl ActionSpace for SelectMove {
    type Config = SelectMoveConfig;

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        let noise = match config.noise_scale {
            None => None,
            Some(scale) => {
                let sd = scale.stddevs();
                Some([
                    Normal::new(0.0, sd[0])?,
                    Normal::new(0.0, sd[1])?,
                    Normal::new(0.0, sd[2])?,
                    Normal::new(0.0, sd[3])?,
                ])
            }
        };

        Ok(Self {
            action_layers: config.action_layers.clone(),
            scale: config.scale,
            motion_cost: config.motion_cost,
            noise,
            instant_move: config.instant_move,
            spec: BoundedArraySpec::new(vec![4], DType::F32, 0.0, 1.0),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    fn step(&mut self, state: &mut State, action: &Action) {
        let action = self.apply_noise(action);
        let position = Vec2::new(action[0], action[1]);
        let target = Vec2::new(action[2], action[3]);

        let (layer, ix) = match self.sprite_at(state, position) {
            Some(hit) => hit,
            None => return,
        };
        trace!("click at {:?} selects {}[{}]", position, layer, ix);

        let sprite = &mut state.layer_mut(layer)[ix];
        let motion = target - sprite.position;
        let delta = motion / sprite.mass * self.scale;
        if self.instant_move {
            sprite.velocity = delta;
        } else {
            sprite.velocity += delta;
        }
    }

    fn reset(&mut self, _state: &mut State) {
        // Nothing to clear between episodes.
    }

    fn random_action(&mut self) -> Action {
        let rng = &mut self.rng;
        Array1::from_shape_fn(4, |_| rng.gen::<f32>())
    }

    fn action_spec(&self) -> &BoundedArraySpec {
        &self.spec
    }
}
