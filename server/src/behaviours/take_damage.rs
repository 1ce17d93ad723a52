use std::{cell::Cell, rc::Rc};

use log::{debug, error, info};

use broadside_shared::{
    AwardPoints, AwardPointsRequest, AwardResponse, Behaviour, Collider, CommandError, ComponentKind,
    EntityId, GameplayConfig, Health, HealthUpdate, Liveness, Requirement, World, Writer,
};

const REQUIREMENTS: &[Requirement] = &[Requirement::Write(ComponentKind::Health)];

/// Result of a hit that changed a ship's health
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealthMutation {
    pub update: HealthUpdate,
    pub new_health: i32,
    /// Set when this hit sank the ship
    pub killed_by: Option<EntityId>,
}

/// Decides how a collision changes a ship's health.
///
/// Returns `None` without a writer (this worker only observes the ship),
/// once the ship has sunk, or when the collider is not a projectile.
pub fn try_mutate(
    writer: Option<&Writer<Health>>,
    current: &Health,
    other: &dyn Collider,
    config: &GameplayConfig,
) -> Option<HealthMutation> {
    let writer = writer?;

    if current.is_sunk() {
        debug!("Ignoring hit on {}, already sunk", writer.entity());
        return None;
    }

    let projectile = other.as_projectile()?;

    let new_health = current
        .current_health
        .saturating_sub(config.cannonball_damage);
    let killed_by = if new_health <= 0 {
        Some(projectile.firer())
    } else {
        None
    };

    Some(HealthMutation {
        update: writer.update().set_current_health(new_health),
        new_health,
        killed_by,
    })
}

/// Outcomes of the AwardPoints commands a [`TakeDamage`] sent, as seen while
/// it was still attached
#[derive(Clone, Debug, Default)]
pub struct AwardLedger {
    succeeded: Rc<Cell<u32>>,
    failed: Rc<Cell<u32>>,
}

impl AwardLedger {
    pub fn succeeded(&self) -> u32 {
        self.succeeded.get()
    }

    pub fn failed(&self) -> u32 {
        self.failed.get()
    }
}

/// Applies cannonball damage on the worker authoritative over `Health`, and
/// credits the firer when a hit sinks the ship
pub struct TakeDamage {
    config: GameplayConfig,
    attached: bool,
    liveness: Liveness,
    ledger: AwardLedger,
}

impl TakeDamage {
    pub fn new(config: GameplayConfig) -> Self {
        Self {
            config,
            attached: false,
            liveness: Liveness::new(),
            ledger: AwardLedger::default(),
        }
    }

    pub fn ledger(&self) -> AwardLedger {
        self.ledger.clone()
    }

    fn award_points_for_kill(&self, world: &mut World, writer: &Writer<Health>, firer: &EntityId) {
        let points_to_award = self.config.points_per_kill;

        let succeeded = self.ledger.succeeded.clone();
        let on_success = self.liveness.guard("AwardPoints", move |response: AwardResponse| {
            succeeded.set(succeeded.get() + 1);
            info!(
                "AwardPoints command succeeded. Points awarded: {}",
                response.amount
            );
        });

        let failed = self.ledger.failed.clone();
        let on_failure = self.liveness.guard("AwardPoints", move |command_error: CommandError| {
            failed.set(failed.get() + 1);
            error!(
                "Failed to send AwardPoints command with error: {}",
                command_error.message
            );
        });

        let _ = world
            .send_command::<AwardPoints, Health>(
                writer,
                firer,
                AwardPointsRequest::new(points_to_award),
            )
            .on_success(on_success)
            .on_failure(on_failure);
    }
}

impl Behaviour for TakeDamage {
    fn name(&self) -> &'static str {
        "TakeDamage"
    }

    fn requirements(&self) -> &'static [Requirement] {
        REQUIREMENTS
    }

    fn on_attach(&mut self, _entity: &EntityId, _world: &mut World) {
        self.attached = true;
        self.liveness = Liveness::new();
    }

    fn on_detach(&mut self, _entity: &EntityId, _world: &mut World) {
        self.attached = false;
        self.liveness.kill();
    }

    // contacts arrive on every worker simulating the ship, authoritative or not
    fn on_trigger_enter(&mut self, entity: &EntityId, world: &mut World, other: &dyn Collider) {
        if !self.attached {
            debug!("Ignoring contact on {} while detached", entity);
            return;
        }

        let writer = world.writer::<Health>(entity);
        let mutation = match world.current_value::<Health>(entity) {
            Some(current) => try_mutate(writer.as_ref(), current, other, &self.config),
            None => None,
        };
        let (Some(writer), Some(mutation)) = (writer, mutation) else {
            return;
        };

        world.send_update(&writer, mutation.update);

        if let Some(firer) = mutation.killed_by {
            self.award_points_for_kill(world, &writer, &firer);
        }
    }
}
