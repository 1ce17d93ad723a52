//! In-memory deployment routing ops between workers without network I/O.
//! Holds the canonical entity state, assigns write authority and routes
//! commands to whichever worker is authoritative over the target component.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap, HashSet, VecDeque},
    rc::Rc,
};

use log::{debug, warn};

use broadside_shared::{
    Authority, CommandError, CommandRequest, CommandRequestId, CommandResponse, Component,
    ComponentData, ComponentKind, ComponentUpdateData, Connection, EntityId,
    IncomingCommandRequest, OutgoingMessage, StatusCode, WorkerConfig, WorkerId, WorkerOp,
};

struct WorkerSlot {
    connected: bool,
    inbox: VecDeque<WorkerOp>,
    checked_out: HashSet<EntityId>,
}

struct CommandRoute {
    caller: WorkerId,
    caller_request_id: CommandRequestId,
    target: WorkerId,
}

#[derive(Default)]
struct DeploymentState {
    next_entity_id: u64,
    next_request_id: CommandRequestId,
    entities: BTreeMap<EntityId, HashMap<ComponentKind, ComponentData>>,
    workers: HashMap<WorkerId, WorkerSlot>,
    authority: HashMap<(EntityId, ComponentKind), WorkerId>,
    routes: HashMap<CommandRequestId, CommandRoute>,
}

impl DeploymentState {
    fn push(&mut self, worker_id: &WorkerId, op: WorkerOp) {
        match self.workers.get_mut(worker_id) {
            Some(slot) if slot.connected => slot.inbox.push_back(op),
            Some(_) => debug!("Dropping op for disconnected worker {}", worker_id),
            None => warn!("Dropping op for unknown worker {}", worker_id),
        }
    }

    fn is_checked_out(&self, worker_id: &WorkerId, entity: &EntityId) -> bool {
        self.workers
            .get(worker_id)
            .map(|slot| slot.checked_out.contains(entity))
            .unwrap_or(false)
    }

    fn is_connected(&self, worker_id: &WorkerId) -> bool {
        self.workers
            .get(worker_id)
            .map(|slot| slot.connected)
            .unwrap_or(false)
    }

    fn set_authority(
        &mut self,
        worker_id: &WorkerId,
        entity: &EntityId,
        component_kind: ComponentKind,
        authority: Authority,
    ) {
        if self.is_checked_out(worker_id, entity) {
            self.push(
                worker_id,
                WorkerOp::AuthorityChange {
                    entity: *entity,
                    component_kind,
                    authority,
                },
            );
        }
    }

    fn fail_command(&mut self, caller: &WorkerId, request_id: CommandRequestId, error: CommandError) {
        self.push(
            caller,
            WorkerOp::CommandResponse {
                request_id,
                response: Err(error),
            },
        );
    }

    fn route(&mut self, sender: &WorkerId, message: OutgoingMessage) {
        match message {
            OutgoingMessage::ComponentUpdate { entity, update } => {
                self.route_update(sender, entity, update)
            }
            OutgoingMessage::CommandRequest {
                request_id,
                entity,
                request,
            } => self.route_command_request(sender, request_id, entity, request),
            OutgoingMessage::CommandResponse {
                request_id,
                response,
            } => self.route_command_response(sender, request_id, response),
        }
    }

    fn route_update(&mut self, sender: &WorkerId, entity: EntityId, update: ComponentUpdateData) {
        let component_kind = update.kind();
        if self.authority.get(&(entity, component_kind)) != Some(sender) {
            warn!(
                "Dropping update to {} on {} from {}, which is not authoritative",
                component_kind, entity, sender
            );
            return;
        }

        let Some(data) = self
            .entities
            .get_mut(&entity)
            .and_then(|components| components.get_mut(&component_kind))
        else {
            warn!("Dropping update to missing {} on {}", component_kind, entity);
            return;
        };
        if let Err(error) = data.apply_update(&update) {
            warn!("Dropping update from {}: {}", sender, error);
            return;
        }

        // the sender applied the update to its own view already
        let receivers: Vec<WorkerId> = self
            .workers
            .iter()
            .filter(|(worker_id, slot)| *worker_id != sender && slot.checked_out.contains(&entity))
            .map(|(worker_id, _)| worker_id.clone())
            .collect();
        for receiver in receivers {
            self.push(
                &receiver,
                WorkerOp::ComponentUpdate {
                    entity,
                    update: update.clone(),
                },
            );
        }
    }

    fn route_command_request(
        &mut self,
        caller: &WorkerId,
        caller_request_id: CommandRequestId,
        entity: EntityId,
        request: CommandRequest,
    ) {
        let component_kind = request.component_kind();
        if !self
            .entities
            .get(&entity)
            .map(|components| components.contains_key(&component_kind))
            .unwrap_or(false)
        {
            self.fail_command(
                caller,
                caller_request_id,
                CommandError::new(
                    StatusCode::NotFound,
                    format!("{} has no {} component", entity, component_kind),
                ),
            );
            return;
        }

        let target = match self.authority.get(&(entity, component_kind)) {
            Some(target) if self.is_connected(target) => target.clone(),
            _ => {
                self.fail_command(
                    caller,
                    caller_request_id,
                    CommandError::new(
                        StatusCode::AuthorityLost,
                        format!("no worker is authoritative over {} on {}", component_kind, entity),
                    ),
                );
                return;
            }
        };

        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);
        self.routes.insert(
            request_id,
            CommandRoute {
                caller: caller.clone(),
                caller_request_id,
                target: target.clone(),
            },
        );
        self.push(
            &target,
            WorkerOp::CommandRequest(IncomingCommandRequest {
                request_id,
                caller_worker_id: caller.clone(),
                entity,
                request,
            }),
        );
    }

    fn route_command_response(
        &mut self,
        responder: &WorkerId,
        request_id: CommandRequestId,
        response: Result<CommandResponse, CommandError>,
    ) {
        let Some(route) = self.routes.remove(&request_id) else {
            warn!("Response from {} to unknown request {}", responder, request_id);
            return;
        };
        if route.target != *responder {
            warn!(
                "Request {} was routed to {} but answered by {}",
                request_id, route.target, responder
            );
        }
        self.push(
            &route.caller,
            WorkerOp::CommandResponse {
                request_id: route.caller_request_id,
                response,
            },
        );
    }
}

/// Shared handle to an in-memory deployment
#[derive(Clone, Default)]
pub struct LocalDeployment {
    state: Rc<RefCell<DeploymentState>>,
}

impl LocalDeployment {
    pub fn new() -> Self {
        Self::default()
    }

    // Workers

    /// Registers a worker and returns its end of the link
    pub fn connect(&self, config: &WorkerConfig) -> (WorkerConfig, LocalConnection) {
        let worker_id = config.resolve_worker_id();
        self.state.borrow_mut().workers.insert(
            worker_id.clone(),
            WorkerSlot {
                connected: true,
                inbox: VecDeque::new(),
                checked_out: HashSet::new(),
            },
        );
        let config = config.clone().with_worker_id(&worker_id);
        let connection = LocalConnection {
            worker_id,
            state: self.state.clone(),
        };
        (config, connection)
    }

    /// Drops the link to `worker_id`. Requests routed to it fail back to
    /// their callers.
    pub fn disconnect(&self, worker_id: &WorkerId) {
        let mut state = self.state.borrow_mut();
        if let Some(slot) = state.workers.get_mut(worker_id) {
            slot.connected = false;
            slot.inbox.clear();
        }

        let orphaned: Vec<CommandRequestId> = state
            .routes
            .iter()
            .filter(|(_, route)| route.target == *worker_id)
            .map(|(request_id, _)| *request_id)
            .collect();
        for request_id in orphaned {
            if let Some(route) = state.routes.remove(&request_id) {
                state.fail_command(
                    &route.caller,
                    route.caller_request_id,
                    CommandError::new(
                        StatusCode::AuthorityLost,
                        format!("worker {} disconnected", worker_id),
                    ),
                );
            }
        }
    }

    pub fn has_undelivered_ops(&self) -> bool {
        self.state
            .borrow()
            .workers
            .values()
            .any(|slot| slot.connected && !slot.inbox.is_empty())
    }

    /// Sends a log line to `worker_id`
    pub fn log_message(&self, worker_id: &WorkerId, level: log::Level, message: &str) {
        self.state.borrow_mut().push(
            worker_id,
            WorkerOp::LogMessage {
                level,
                message: message.to_string(),
            },
        );
    }

    // Entities

    pub fn spawn_entity(&self, components: Vec<ComponentData>) -> EntityId {
        let mut state = self.state.borrow_mut();
        let entity = EntityId::new(state.next_entity_id);
        state.next_entity_id += 1;
        let components = components
            .into_iter()
            .map(|data| (data.kind(), data))
            .collect();
        state.entities.insert(entity, components);
        entity
    }

    /// Brings `entity` into the view of `worker_id` with its current state
    pub fn check_out(&self, worker_id: &WorkerId, entity: &EntityId) {
        let mut state = self.state.borrow_mut();
        let Some(components) = state.entities.get(entity).cloned() else {
            warn!("Cannot check out unknown entity {}", entity);
            return;
        };
        match state.workers.get_mut(worker_id) {
            Some(slot) => {
                slot.checked_out.insert(*entity);
            }
            None => {
                warn!("Cannot check out {} to unknown worker {}", entity, worker_id);
                return;
            }
        }

        state.push(worker_id, WorkerOp::AddEntity { entity: *entity });
        let mut kinds: Vec<ComponentKind> = components.keys().copied().collect();
        kinds.sort();
        for component_kind in kinds {
            if let Some(data) = components.get(&component_kind) {
                state.push(
                    worker_id,
                    WorkerOp::AddComponent {
                        entity: *entity,
                        data: data.clone(),
                    },
                );
            }
            if state.authority.get(&(*entity, component_kind)) == Some(worker_id) {
                state.set_authority(worker_id, entity, component_kind, Authority::Authoritative);
            }
        }
    }

    /// Takes `entity` out of the view of `worker_id`
    pub fn remove_from_view(&self, worker_id: &WorkerId, entity: &EntityId) {
        let mut state = self.state.borrow_mut();
        let removed = state
            .workers
            .get_mut(worker_id)
            .map(|slot| slot.checked_out.remove(entity))
            .unwrap_or(false);
        if removed {
            state.push(worker_id, WorkerOp::RemoveEntity { entity: *entity });
        }
    }

    // Authority

    /// Makes `worker_id` the only writer of the component, revoking any
    /// previous holder first
    pub fn grant_authority(
        &self,
        entity: &EntityId,
        component_kind: ComponentKind,
        worker_id: &WorkerId,
    ) {
        self.revoke_authority(entity, component_kind);
        let mut state = self.state.borrow_mut();
        state
            .authority
            .insert((*entity, component_kind), worker_id.clone());
        state.set_authority(worker_id, entity, component_kind, Authority::Authoritative);
    }

    pub fn revoke_authority(&self, entity: &EntityId, component_kind: ComponentKind) {
        let mut state = self.state.borrow_mut();
        if let Some(previous) = state.authority.remove(&(*entity, component_kind)) {
            state.set_authority(
                &previous,
                entity,
                component_kind,
                Authority::NotAuthoritative,
            );
        }
    }

    /// Tells the holder its authority is about to be revoked
    pub fn warn_authority_loss(&self, entity: &EntityId, component_kind: ComponentKind) {
        let mut state = self.state.borrow_mut();
        if let Some(holder) = state.authority.get(&(*entity, component_kind)).cloned() {
            state.set_authority(
                &holder,
                entity,
                component_kind,
                Authority::AuthorityLossImminent,
            );
        }
    }

    pub fn authority_holder(
        &self,
        entity: &EntityId,
        component_kind: ComponentKind,
    ) -> Option<WorkerId> {
        self.state
            .borrow()
            .authority
            .get(&(*entity, component_kind))
            .cloned()
    }

    /// Canonical value of `C` on `entity`
    pub fn component<C: Component>(&self, entity: &EntityId) -> Option<C> {
        self.state
            .borrow()
            .entities
            .get(entity)
            .and_then(|components| components.get(&C::kind()))
            .and_then(C::from_data)
            .cloned()
    }

    pub fn routed_command_count(&self) -> usize {
        self.state.borrow().routes.len()
    }
}

/// A worker's end of a [`LocalDeployment`]
pub struct LocalConnection {
    worker_id: WorkerId,
    state: Rc<RefCell<DeploymentState>>,
}

impl LocalConnection {
    pub fn worker_id(&self) -> &WorkerId {
        &self.worker_id
    }
}

impl Connection for LocalConnection {
    fn is_connected(&self) -> bool {
        self.state.borrow().is_connected(&self.worker_id)
    }

    fn get_op_list(&mut self) -> Vec<WorkerOp> {
        self.state
            .borrow_mut()
            .workers
            .get_mut(&self.worker_id)
            .map(|slot| slot.inbox.drain(..).collect())
            .unwrap_or_default()
    }

    fn send(&mut self, message: OutgoingMessage) {
        self.state.borrow_mut().route(&self.worker_id, message);
    }
}
