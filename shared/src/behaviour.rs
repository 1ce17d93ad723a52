use std::time::Instant;

use log::{debug, warn};

use crate::{
    commands::{
        error::{CommandError, StatusCode},
        incoming::IncomingCommandRequest,
    },
    physics::Collider,
    world::{component::ComponentKind, entity::entity_id::EntityId, local_world::World},
};

/// A precondition for a behaviour to be attached to its entity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// The component must be checked out on this worker
    Read(ComponentKind),
    /// This worker must hold write authority over the component
    Write(ComponentKind),
}

impl Requirement {
    pub fn is_met(&self, world: &World, entity: &EntityId) -> bool {
        match self {
            Requirement::Read(component_kind) => world.has_component(entity, component_kind),
            Requirement::Write(component_kind) => {
                world.has_component(entity, component_kind)
                    && world.authority(entity, component_kind).is_writable()
            }
        }
    }
}

/// Per-entity logic whose lifetime follows its requirements.
///
/// The host attaches a behaviour once every requirement holds and detaches
/// it as soon as one stops holding, when its entity leaves the view, or when
/// the worker tears down. Anything registered in `on_attach` must be released
/// in `on_detach`.
pub trait Behaviour {
    fn name(&self) -> &'static str;
    fn requirements(&self) -> &'static [Requirement];
    fn on_attach(&mut self, entity: &EntityId, world: &mut World);
    fn on_detach(&mut self, entity: &EntityId, world: &mut World);

    /// Physics contact on the behaviour's entity. Delivered whether or not
    /// the behaviour is attached.
    fn on_trigger_enter(&mut self, _entity: &EntityId, _world: &mut World, _other: &dyn Collider) {
    }

    /// Offered every command request targeting the behaviour's entity while
    /// attached. Returns true if the request was answered.
    fn on_command_request(&mut self, _world: &mut World, _request: &IncomingCommandRequest) -> bool {
        false
    }

    /// Called once per worker tick while attached
    fn on_tick(&mut self, _entity: &EntityId, _world: &mut World, _now: Instant) {}
}

struct BehaviourSlot {
    entity: EntityId,
    behaviour: Box<dyn Behaviour>,
    attached: bool,
}

/// Owns every behaviour on a worker and drives their attach/detach lifecycle
pub struct BehaviourHost {
    slots: Vec<BehaviourSlot>,
}

impl BehaviourHost {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn add(&mut self, entity: &EntityId, behaviour: Box<dyn Behaviour>) {
        self.slots.push(BehaviourSlot {
            entity: *entity,
            behaviour,
            attached: false,
        });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_attached(&self, entity: &EntityId, name: &str) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.entity == *entity && slot.behaviour.name() == name && slot.attached)
    }

    pub fn attached_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.attached).count()
    }

    /// Attaches behaviours whose requirements now hold and detaches those
    /// whose requirements no longer do
    pub fn refresh(&mut self, world: &mut World) {
        let connected = world.is_connected();
        for slot in self.slots.iter_mut() {
            let met = connected
                && slot
                    .behaviour
                    .requirements()
                    .iter()
                    .all(|requirement| requirement.is_met(world, &slot.entity));

            if met && !slot.attached {
                debug!("Attaching {} on {}", slot.behaviour.name(), slot.entity);
                slot.behaviour.on_attach(&slot.entity, world);
                slot.attached = true;
            } else if !met && slot.attached {
                debug!("Detaching {} on {}", slot.behaviour.name(), slot.entity);
                slot.behaviour.on_detach(&slot.entity, world);
                slot.attached = false;
            }
        }
    }

    /// Detaches and drops every behaviour on `entity`
    pub fn remove_entity(&mut self, world: &mut World, entity: &EntityId) {
        for slot in self.slots.iter_mut().filter(|slot| slot.entity == *entity) {
            if slot.attached {
                slot.behaviour.on_detach(&slot.entity, world);
                slot.attached = false;
            }
        }
        self.slots.retain(|slot| slot.entity != *entity);
    }

    /// Detaches every behaviour, keeping them for a later refresh
    pub fn teardown(&mut self, world: &mut World) {
        for slot in self.slots.iter_mut().filter(|slot| slot.attached) {
            slot.behaviour.on_detach(&slot.entity, world);
            slot.attached = false;
        }
    }

    pub fn trigger_enter(&mut self, world: &mut World, entity: &EntityId, other: &dyn Collider) {
        for slot in self.slots.iter_mut().filter(|slot| slot.entity == *entity) {
            slot.behaviour.on_trigger_enter(&slot.entity, world, other);
        }
    }

    /// Offers each pending command request to the attached behaviours of its
    /// target entity. Unanswered requests fail back to the caller.
    pub fn dispatch_command_requests(&mut self, world: &mut World) {
        for request in world.take_command_requests() {
            let handled = self
                .slots
                .iter_mut()
                .filter(|slot| slot.attached && slot.entity == request.entity)
                .any(|slot| slot.behaviour.on_command_request(world, &request));

            if !handled {
                warn!(
                    "No behaviour on {} serves {} for {}",
                    world.worker_id(),
                    request.request.name(),
                    request.entity
                );
                world.send_command_failure(
                    request.request_id,
                    CommandError::new(
                        StatusCode::AuthorityLost,
                        format!(
                            "{} is not served on {} by worker {}",
                            request.request.name(),
                            request.entity,
                            world.worker_id()
                        ),
                    ),
                );
            }
        }
    }

    pub fn tick(&mut self, world: &mut World, now: Instant) {
        for slot in self.slots.iter_mut().filter(|slot| slot.attached) {
            slot.behaviour.on_tick(&slot.entity, world, now);
        }
    }
}

impl Default for BehaviourHost {
    fn default() -> Self {
        Self::new()
    }
}
