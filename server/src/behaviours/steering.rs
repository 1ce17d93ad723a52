use std::time::{Duration, Instant};

use log::debug;

use broadside_shared::{Behaviour, ComponentKind, EntityId, Requirement, ShipControls, World};

const REQUIREMENTS: &[Requirement] = &[Requirement::Write(ComponentKind::ShipControls)];

/// Contains Config properties for the steering worker
#[derive(Clone, Debug)]
pub struct SteeringConfig {
    /// Time between two steering changes of the same ship
    pub interval: Duration,
    /// Upper bound of the randomized target speed
    pub max_speed: f32,
    /// Target steering is drawn from `[-max_steering, max_steering)` so ships
    /// don't suddenly turn around
    pub max_steering: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_speed: 1.0,
            max_steering: 15.0,
        }
    }
}

/// Wanders a ship around by randomizing its speed and steering
pub struct ShipSteering {
    config: SteeringConfig,
    rng: fastrand::Rng,
    last_steered: Option<Instant>,
}

impl ShipSteering {
    pub fn new(config: SteeringConfig) -> Self {
        Self {
            config,
            rng: fastrand::Rng::new(),
            last_steered: None,
        }
    }

    pub fn with_seed(config: SteeringConfig, seed: u64) -> Self {
        Self {
            config,
            rng: fastrand::Rng::with_seed(seed),
            last_steered: None,
        }
    }

    fn is_due(&self, now: Instant) -> bool {
        match self.last_steered {
            None => true,
            Some(last_steered) => {
                now.saturating_duration_since(last_steered) >= self.config.interval
            }
        }
    }
}

impl Behaviour for ShipSteering {
    fn name(&self) -> &'static str {
        "ShipSteering"
    }

    fn requirements(&self) -> &'static [Requirement] {
        REQUIREMENTS
    }

    fn on_attach(&mut self, _entity: &EntityId, _world: &mut World) {
        self.last_steered = None;
    }

    fn on_detach(&mut self, _entity: &EntityId, _world: &mut World) {}

    fn on_tick(&mut self, entity: &EntityId, world: &mut World, now: Instant) {
        if !self.is_due(now) {
            return;
        }
        let Some(writer) = world.writer::<ShipControls>(entity) else {
            return;
        };

        let target_speed = self.rng.f32() * self.config.max_speed;
        let target_steering = (self.rng.f32() * 2.0 - 1.0) * self.config.max_steering;
        debug!(
            "Steering {}: speed {:.2}, steering {:.2}",
            entity, target_speed, target_steering
        );

        world.send_update(
            &writer,
            writer
                .update()
                .set_target_speed(target_speed)
                .set_target_steering(target_steering),
        );
        self.last_steered = Some(now);
    }
}
