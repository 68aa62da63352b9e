//! Distance-shaped reward with contact-triggered termination.
use super::Task;
use crate::{record::Record, sprite::Sprite, state::State};
use anyhow::Result;
use log::trace;
use std::sync::Arc;

/// Predicate deciding whether a pair of touching sprites counts as a contact.
///
/// The record is the environment's auxiliary meta-state; callers that do not
/// need it simply ignore the third argument.
pub type Condition = Arc<dyn Fn(&Sprite, &Sprite, &Record) -> bool + Send + Sync>;

/// Configuration of [`ContactReward`].
///
/// Unlike the plain-data configs this one can carry a code predicate, so it
/// is `Clone` only and not serialized.
#[derive(Clone)]
pub struct ContactRewardConfig {
    /// Layers whose first sprite seeks the goal.
    pub layers_0: Vec<String>,

    /// Layers whose first sprite is the goal.
    pub layers_1: Vec<String>,

    /// Optional gate on contacts; `None` accepts every contact.
    pub condition: Option<Condition>,

    /// How many steps after the first contact to reset the environment.
    /// `None` never resets.
    pub reset_steps_after_contact: Option<usize>,

    /// Distance below which the shaped reward becomes positive.
    pub terminate_distance: f32,

    /// Multiplier on the raw shaped reward.
    pub raw_reward_multiplier: f32,
}

impl Default for ContactRewardConfig {
    fn default() -> Self {
        Self {
            layers_0: vec![],
            layers_1: vec![],
            condition: None,
            reset_steps_after_contact: None,
            terminate_distance: 0.05,
            raw_reward_multiplier: 5.0,
        }
    }
}

impl ContactRewardConfig {
    /// Sets the seeker layers.
    pub fn layers_0(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.layers_0 = names.into_iter().map(|n| n.into()).collect();
        self
    }

    /// Sets the goal layers.
    pub fn layers_1(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.layers_1 = names.into_iter().map(|n| n.into()).collect();
        self
    }

    /// Sets the contact gate.
    pub fn condition(mut self, v: Condition) -> Self {
        self.condition = Some(v);
        self
    }

    /// Sets how many steps after the first contact to reset.
    pub fn reset_steps_after_contact(mut self, v: Option<usize>) -> Self {
        self.reset_steps_after_contact = v;
        self
    }

    /// Sets the distance below which the reward becomes positive.
    pub fn terminate_distance(mut self, v: f32) -> Self {
        self.terminate_distance = v;
        self
    }

    /// Sets the reward multiplier.
    pub fn raw_reward_multiplier(mut self, v: f32) -> Self {
        self.raw_reward_multiplier = v;
        self
    }
}

/// Contact-seeking reward rule.
///
/// Every step, the first sprite of the goal pool defines a goal position and
/// the first sprite of the seeker pool is rewarded by how far inside
/// `terminate_distance` it sits:
///
/// ```text
/// reward = raw_reward_multiplier * (terminate_distance - |seeker - goal|)
/// ```
///
/// When the two sprites overlap and the condition accepts the pair, the
/// contact is latched and a countdown of `reset_steps_after_contact` steps is
/// armed. The countdown arms on the first contact only and keeps running
/// whether or not the contact persists; once it runs out the task asks for a
/// reset and the reward of the reset step is zeroed.
///
/// Usable for any contact-seeking behavior, such as prey-seeking or
/// predator-avoidance with a negative multiplier.
pub struct ContactReward {
    layers_0: Vec<String>,
    layers_1: Vec<String>,
    condition: Condition,
    reset_steps_after_contact: Option<usize>,
    terminate_distance: f32,
    raw_reward_multiplier: f32,
    has_made_contact: bool,
    // None until the first accepted contact arms the countdown.
    steps_until_reset: Option<i64>,
}

/// First sprite of the flattened layer pool.
///
/// Panics if every pooled layer is empty; the rule needs one sprite per pool.
fn first_sprite<'a>(state: &'a State, layers: &[String]) -> &'a Sprite {
    layers
        .iter()
        .flat_map(|name| state.layer(name))
        .next()
        .expect("contact reward needs at least one sprite per pool")
}

impl Task for ContactReward {
    type Config = ContactRewardConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        Ok(Self {
            layers_0: config.layers_0.clone(),
            layers_1: config.layers_1.clone(),
            condition: config
                .condition
                .clone()
                .unwrap_or_else(|| Arc::new(|_, _, _| true)),
            reset_steps_after_contact: config.reset_steps_after_contact,
            terminate_distance: config.terminate_distance,
            raw_reward_multiplier: config.raw_reward_multiplier,
            has_made_contact: false,
            steps_until_reset: None,
        })
    }

    fn reset(&mut self, _state: &State, _meta_state: &Record) {
        self.steps_until_reset = None;
        self.has_made_contact = false;
    }

    fn reward(&mut self, state: &State, meta_state: &Record, _step_count: usize) -> (f32, bool) {
        let seeker = first_sprite(state, &self.layers_0);
        let goal = first_sprite(state, &self.layers_1);

        let goal_distance = seeker.position.distance(goal.position);
        let mut reward = self.raw_reward_multiplier * (self.terminate_distance - goal_distance);

        if seeker.overlaps_sprite(goal) && (self.condition)(seeker, goal, meta_state) {
            if !self.has_made_contact {
                trace!("first contact at distance {}", goal_distance);
            }
            self.has_made_contact = true;
            if self.steps_until_reset.is_none() {
                self.steps_until_reset = self.reset_steps_after_contact.map(|n| n as i64);
            }
        }

        if let Some(n) = self.steps_until_reset.as_mut() {
            *n -= 1;
        }
        let should_reset = matches!(self.steps_until_reset, Some(n) if n < 0);
        if should_reset {
            reward = 0.0;
        }
        (reward, should_reset)
    }

    fn has_finished(&self) -> bool {
        self.has_made_contact
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactReward, ContactRewardConfig, Task};
    use crate::record::Record;
    use crate::sprite::{Shape, Sprite};
    use crate::state::State;
    use glam::Vec2;
    use std::sync::Arc;

    fn ball(x: f32, radius: f32) -> Sprite {
        Sprite::new(Vec2::new(x, 0.5), 1.0, Shape::Circle { radius })
    }

    fn chase_state(seeker_x: f32) -> State {
        State::new()
            .with_layer("agent", vec![ball(seeker_x, 0.05)])
            .with_layer("prey", vec![ball(0.8, 0.05)])
    }

    fn chase_config() -> ContactRewardConfig {
        ContactRewardConfig::default()
            .layers_0(["agent"])
            .layers_1(["prey"])
    }

    #[test]
    fn reward_is_shaped_by_distance() {
        let mut task = ContactReward::build(&chase_config()).unwrap();
        let meta = Record::empty();

        // Far away: negative. Distance 0.5, so 5 * (0.05 - 0.5) = -2.25.
        let (far, reset) = task.reward(&chase_state(0.3), &meta, 0);
        assert!((far + 2.25).abs() < 1e-6);
        assert!(!reset);

        // Within terminate_distance: positive.
        let (near, _) = task.reward(&chase_state(0.78), &meta, 1);
        assert!(near > 0.0);
        assert!(near > far);
    }

    #[test]
    fn contact_latches_has_finished() {
        let mut task = ContactReward::build(&chase_config()).unwrap();
        let meta = Record::empty();

        assert!(!task.has_finished());
        task.reward(&chase_state(0.3), &meta, 0);
        assert!(!task.has_finished());

        // Overlapping radii.
        task.reward(&chase_state(0.75), &meta, 1);
        assert!(task.has_finished());

        // The latch survives separation until reset.
        task.reward(&chase_state(0.3), &meta, 2);
        assert!(task.has_finished());

        task.reset(&chase_state(0.3), &meta);
        assert!(!task.has_finished());
    }

    #[test]
    fn countdown_runs_from_first_contact() {
        let config = chase_config().reset_steps_after_contact(Some(2));
        let mut task = ContactReward::build(&config).unwrap();
        let meta = Record::empty();

        // No contact: the countdown is not armed.
        for i in 0..5 {
            let (_, reset) = task.reward(&chase_state(0.3), &meta, i);
            assert!(!reset);
        }

        // Contact arms the countdown; it keeps running after separation.
        let (_, reset) = task.reward(&chase_state(0.75), &meta, 5);
        assert!(!reset);
        let (_, reset) = task.reward(&chase_state(0.3), &meta, 6);
        assert!(!reset);
        let (reward, reset) = task.reward(&chase_state(0.3), &meta, 7);
        assert!(reset);
        assert_eq!(reward, 0.0);
    }

    #[test]
    fn immediate_reset_zeroes_the_contact_reward() {
        let config = chase_config().reset_steps_after_contact(Some(0));
        let mut task = ContactReward::build(&config).unwrap();
        let meta = Record::empty();

        let (reward, reset) = task.reward(&chase_state(0.75), &meta, 0);
        assert!(reset);
        assert_eq!(reward, 0.0);
    }

    #[test]
    fn never_resets_without_configured_countdown() {
        let mut task = ContactReward::build(&chase_config()).unwrap();
        let meta = Record::empty();

        for i in 0..10 {
            let (_, reset) = task.reward(&chase_state(0.75), &meta, i);
            assert!(!reset);
        }
        assert!(task.has_finished());
    }

    #[test]
    fn condition_gates_the_contact() {
        let config = chase_config()
            .reset_steps_after_contact(Some(0))
            .condition(Arc::new(|_, _, meta| meta.get_scalar("armed").is_ok()));
        let mut task = ContactReward::build(&config).unwrap();

        let (_, reset) = task.reward(&chase_state(0.75), &Record::empty(), 0);
        assert!(!reset);
        assert!(!task.has_finished());

        let armed = Record::from_scalar("armed", 1.0);
        let (_, reset) = task.reward(&chase_state(0.75), &armed, 1);
        assert!(reset);
        assert!(task.has_finished());
    }

    #[test]
    fn reset_disarms_the_countdown() {
        let config = chase_config().reset_steps_after_contact(Some(1));
        let mut task = ContactReward::build(&config).unwrap();
        let meta = Record::empty();

        task.reward(&chase_state(0.75), &meta, 0);
        task.reset(&chase_state(0.3), &meta);

        // A fresh episode starts from scratch.
        for i in 0..3 {
            let (_, reset) = task.reward(&chase_state(0.3), &meta, i);
            assert!(!reset);
        }
    }
}
