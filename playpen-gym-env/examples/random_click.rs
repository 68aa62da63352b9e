//! A toy click arena driven by a random policy through the Gym wrapper.
//!
//! The arena wires the built-in plugins together the way a real environment
//! would: a `SelectMove` action space moves the agent ball, a `ContactReward`
//! task pays for closing in on the prey ball, and the arena itself integrates
//! positions.
use anyhow::Result;
use glam::Vec2;
use ndarray::{Array1, ArrayD, IxDyn};
use playpen_core::{
    ActionSpace, BoundedArraySpec, ContactReward, ContactRewardConfig, DType, Environment,
    ObsValue, Observation, Record, SelectMove, SelectMoveConfig, Shape, Sprite, State, Task,
    TimeStep,
};
use playpen_gym_env::GymWrapper;

const DT: f32 = 0.25;
const MAX_STEPS: usize = 50;

struct ClickArena {
    state: State,
    action_space: SelectMove,
    task: ContactReward,
    meta: Record,
    count: usize,
}

impl ClickArena {
    fn build(seed: u64) -> Result<Self> {
        let action_space = SelectMove::build(
            &SelectMoveConfig::default().action_layers(["agent"]).scale(0.3),
            seed,
        )?;
        let task = ContactReward::build(
            &ContactRewardConfig::default()
                .layers_0(["agent"])
                .layers_1(["prey"])
                .reset_steps_after_contact(Some(5))
                .terminate_distance(0.1),
        )?;
        Ok(Self {
            state: Self::fresh_state(),
            action_space,
            task,
            meta: Record::empty(),
            count: 0,
        })
    }

    fn fresh_state() -> State {
        let ball = |x: f32| {
            Sprite::new(
                Vec2::new(x, 0.5),
                1.0,
                Shape::Circle { radius: 0.07 },
            )
        };
        State::new()
            .with_layer("agent", vec![ball(0.2)])
            .with_layer("prey", vec![ball(0.8)])
    }

    fn integrate(&mut self) {
        for name in ["agent", "prey"] {
            for sprite in self.state.layer_mut(name).iter_mut() {
                sprite.position += sprite.velocity * DT;
                sprite.velocity *= 0.9;
            }
        }
    }

    fn observe(&self) -> Observation {
        let agent = &self.state.layer("agent")[0];
        let prey = &self.state.layer("prey")[0];
        let features = vec![
            agent.position.x,
            agent.position.y,
            prey.position.x,
            prey.position.y,
        ];
        Observation::new().with(
            "features",
            ObsValue::F32(ArrayD::from_shape_vec(IxDyn(&[4]), features).unwrap()),
        )
    }
}

impl Environment for ClickArena {
    fn step(&mut self, action: &Array1<f32>) -> TimeStep {
        self.action_space.step(&mut self.state, action);
        self.integrate();
        self.count += 1;

        let (reward, should_reset) = self.task.reward(&self.state, &self.meta, self.count);
        if should_reset || self.count >= MAX_STEPS {
            TimeStep::termination(reward, self.observe())
        } else {
            TimeStep::transition(reward, self.observe())
        }
    }

    fn reset(&mut self) -> TimeStep {
        self.state = Self::fresh_state();
        self.count = 0;
        self.action_space.reset(&mut self.state);
        self.task.reset(&self.state, &self.meta);
        TimeStep::restart(self.observe())
    }

    fn observation_spec(&self) -> Vec<(String, BoundedArraySpec)> {
        vec![(
            "features".to_string(),
            BoundedArraySpec::new(vec![4], DType::F32, 0.0, 1.0),
        )]
    }

    fn action_spec(&self) -> BoundedArraySpec {
        BoundedArraySpec::new(vec![4], DType::F32, 0.0, 1.0)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    fastrand::seed(42);

    let mut env = GymWrapper::new(ClickArena::build(42)?);
    log::info!("observation space: {:?}", env.observation_space());
    log::info!("action space: {:?}", env.action_space());

    for episode in 0..3 {
        let _obs = env.reset();
        let mut ret = 0.0;
        let mut steps = 0;
        loop {
            let action = Array1::from_shape_fn(4, |_| fastrand::f32());
            let step = env.step(&action);
            ret += step.reward;
            steps += 1;
            if step.done {
                break;
            }
        }
        log::info!("episode {}: return = {:.2} in {} steps", episode, ret, steps);
    }

    env.close();
    Ok(())
}
