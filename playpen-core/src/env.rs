//! The stepping contract between an environment and its wrappers.
use crate::spec::BoundedArraySpec;
use crate::Action;
use ndarray::ArrayD;

/// Where a [`TimeStep`] sits within an episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepType {
    /// First step after a reset.
    First,

    /// Any step that neither starts nor ends the episode.
    Mid,

    /// Final step of the episode.
    Last,
}

/// One observation entry, as produced by an environment observer.
#[derive(Clone, Debug)]
pub enum ObsValue {
    /// Float array.
    F32(ArrayD<f32>),

    /// Byte array, used for rendered images.
    U8(ArrayD<u8>),

    /// Boolean array, e.g. success flags.
    Bool(ArrayD<bool>),
}

/// Ordered key-value observation, one entry per configured observer.
///
/// Entry order is the environment's observer order and is significant:
/// wrappers collapse single-entry observations to the bare first value.
#[derive(Clone, Debug, Default)]
pub struct Observation(Vec<(String, ObsValue)>);

impl Observation {
    /// Creates an empty observation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns `self`.
    pub fn with(mut self, key: impl Into<String>, value: ObsValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Appends an entry, replacing an existing one with the same key in
    /// place.
    pub fn insert(&mut self, key: impl Into<String>, value: ObsValue) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// The value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&ObsValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Keys in observer order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over the entries in observer order.
    pub fn iter(&self) -> std::slice::Iter<'_, (String, ObsValue)> {
        self.0.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the observation has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Observation {
    type Item = (String, ObsValue);
    type IntoIter = std::vec::IntoIter<(String, ObsValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Result of one environment step or reset.
#[derive(Clone, Debug)]
pub struct TimeStep {
    /// Position of this step within the episode.
    pub step_type: StepType,

    /// Reward for the transition; `None` on the first step of an episode.
    pub reward: Option<f32>,

    /// Discount factor; `None` on the first step of an episode.
    pub discount: Option<f32>,

    /// Observation after the transition.
    pub observation: Observation,
}

impl TimeStep {
    /// First step of a fresh episode: no reward, no discount.
    pub fn restart(observation: Observation) -> Self {
        Self {
            step_type: StepType::First,
            reward: None,
            discount: None,
            observation,
        }
    }

    /// Intermediate transition with a discount of one.
    pub fn transition(reward: f32, observation: Observation) -> Self {
        Self {
            step_type: StepType::Mid,
            reward: Some(reward),
            discount: Some(1.0),
            observation,
        }
    }

    /// Final transition of the episode with a discount of zero.
    pub fn termination(reward: f32, observation: Observation) -> Self {
        Self {
            step_type: StepType::Last,
            reward: Some(reward),
            discount: Some(0.0),
            observation,
        }
    }

    /// Whether this step starts an episode.
    pub fn is_first(&self) -> bool {
        self.step_type == StepType::First
    }

    /// Whether this step ends an episode.
    pub fn is_last(&self) -> bool {
        self.step_type == StepType::Last
    }
}

/// A sprite environment, stepped once per tick by an external driver.
///
/// This is the surface the Gym-flavored wrapper consumes. Implementations
/// typically own a [`State`](crate::State), an
/// [`ActionSpace`](crate::ActionSpace) and a [`Task`](crate::Task), and wire
/// them together in [`Environment::step`].
pub trait Environment {
    /// Steps the environment with the given action.
    fn step(&mut self, action: &Action) -> TimeStep;

    /// Starts a new episode.
    fn reset(&mut self) -> TimeStep;

    /// Descriptors of every observation entry, in observer order.
    fn observation_spec(&self) -> Vec<(String, BoundedArraySpec)>;

    /// Descriptor of the expected action.
    fn action_spec(&self) -> BoundedArraySpec;
}

#[cfg(test)]
mod tests {
    use super::{ObsValue, Observation, TimeStep};
    use ndarray::{ArrayD, IxDyn};

    fn arr(v: Vec<f32>) -> ObsValue {
        ObsValue::F32(ArrayD::from_shape_vec(IxDyn(&[v.len()]), v).unwrap())
    }

    #[test]
    fn observation_keeps_order_and_replaces_in_place() {
        let mut obs = Observation::new()
            .with("image", arr(vec![0.0]))
            .with("features", arr(vec![1.0]));
        obs.insert("image", arr(vec![2.0]));

        assert_eq!(obs.keys().collect::<Vec<_>>(), ["image", "features"]);
        assert_eq!(obs.len(), 2);
        match obs.get("image").unwrap() {
            ObsValue::F32(a) => assert_eq!(a[[0]], 2.0),
            _ => panic!("wrong dtype"),
        }
    }

    #[test]
    fn time_step_kinds() {
        let restart = TimeStep::restart(Observation::new());
        assert!(restart.is_first());
        assert_eq!(restart.reward, None);
        assert_eq!(restart.discount, None);

        let mid = TimeStep::transition(0.5, Observation::new());
        assert!(!mid.is_last());
        assert_eq!(mid.discount, Some(1.0));

        let last = TimeStep::termination(-1.0, Observation::new());
        assert!(last.is_last());
        assert_eq!(last.discount, Some(0.0));
        assert_eq!(last.reward, Some(-1.0));
    }
}
