use std::{cell::RefCell, collections::HashMap, mem, rc::Rc, time::Instant};

use log::{debug, info, log, warn};

use crate::{
    commands::{
        descriptor::{CommandDescriptor, CommandRequestId},
        dispatcher::CommandDispatcher,
        error::{CommandError, StatusCode},
        incoming::IncomingCommandRequest,
        pending::PendingCommand,
    },
    observer::Observer,
    ops::{OutgoingMessage, WorkerOp},
    world::{
        component::{Component, ComponentData, ComponentKind},
        delegation::{authority::Authority, authority_handler::AuthorityHandler, writer::Writer},
        entity::entity_id::EntityId,
        error::WorldError,
        subscription::{Subscription, SubscriptionRegistry},
    },
    WorkerConfig, WorkerId, WorkerType,
};

/// One worker's replica of the simulation.
///
/// Holds the replicated component values this worker checked out, the write
/// authority it currently holds, its update subscriptions and its in-flight
/// commands. All state changes arrive through [`World::process_op`], one op at
/// a time; outbound traffic queues up until [`World::take_outgoing`].
pub struct World {
    worker_id: WorkerId,
    worker_type: WorkerType,
    connected: bool,
    entities: HashMap<EntityId, HashMap<ComponentKind, ComponentData>>,
    auth_handler: AuthorityHandler,
    subscriptions: SubscriptionRegistry,
    dispatcher: CommandDispatcher,
    incoming_requests: Vec<IncomingCommandRequest>,
    outgoing: Vec<OutgoingMessage>,
}

impl World {
    pub fn new(config: &WorkerConfig) -> Self {
        let worker_id = config.resolve_worker_id();
        info!("Worker {} ({}) created", worker_id, config.worker_type);

        Self {
            worker_id,
            worker_type: config.worker_type,
            connected: true,
            entities: HashMap::new(),
            auth_handler: AuthorityHandler::new(),
            subscriptions: SubscriptionRegistry::new(),
            dispatcher: CommandDispatcher::new(&config.command),
            incoming_requests: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    // Worker

    pub fn worker_id(&self) -> &WorkerId {
        &self.worker_id
    }

    pub fn worker_type(&self) -> WorkerType {
        self.worker_type
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    // Entities & Components

    /// Checked out entities, in id order
    pub fn entities(&self) -> Vec<EntityId> {
        let mut entities: Vec<EntityId> = self.entities.keys().copied().collect();
        entities.sort();
        entities
    }

    pub fn has_entity(&self, entity: &EntityId) -> bool {
        self.entities.contains_key(entity)
    }

    pub fn has_component(&self, entity: &EntityId, component_kind: &ComponentKind) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|components| components.contains_key(component_kind))
    }

    /// Latest replicated value of `C` on `entity`
    pub fn current_value<C: Component>(&self, entity: &EntityId) -> Option<&C> {
        self.entities
            .get(entity)
            .and_then(|components| components.get(&C::kind()))
            .and_then(C::from_data)
    }

    // Authority

    pub fn authority(&self, entity: &EntityId, component_kind: &ComponentKind) -> Authority {
        self.auth_handler.authority(entity, component_kind)
    }

    /// Write capability for `C` on `entity`, present only while this worker
    /// holds authority. Absence is a normal state, not an error.
    pub fn writer<C: Component>(&self, entity: &EntityId) -> Option<Writer<C>> {
        if !self.has_component(entity, &C::kind()) {
            return None;
        }
        if !self.authority(entity, &C::kind()).is_writable() {
            return None;
        }
        let accessor = self.auth_handler.try_get_accessor(entity, &C::kind()).ok()?;
        Some(Writer::new(*entity, accessor))
    }

    // Subscriptions

    /// Registers `callback` to run with the new value after every update to
    /// `C` on `entity`
    pub fn subscribe<C: Component, F: FnMut(&C) + 'static>(
        &mut self,
        entity: &EntityId,
        callback: F,
    ) -> Subscription {
        let subscription = self.subscriptions.subscribe::<C, F>(entity, callback);
        debug!("Subscribed to {} on {}", C::kind(), entity);
        subscription
    }

    /// Subscribes a shared [`Observer`] to `C` on `entity`
    pub fn observe<C: Component, O: Observer<C> + 'static>(
        &mut self,
        entity: &EntityId,
        observer: Rc<RefCell<O>>,
    ) -> Subscription {
        self.subscribe::<C, _>(entity, move |value: &C| {
            observer.borrow_mut().on_update(value);
        })
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) {
        let entity = subscription.entity();
        let component_kind = subscription.component_kind();
        if self.subscriptions.unsubscribe(subscription) {
            debug!("Unsubscribed from {} on {}", component_kind, entity);
        } else {
            debug!(
                "Subscription to {} on {} was already released with its entity",
                component_kind, entity
            );
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn subscriptions_for(&self, entity: &EntityId, component_kind: &ComponentKind) -> usize {
        self.subscriptions.count_for(entity, component_kind)
    }

    // Updates

    /// Broadcasts `update`, dropping it with a warning if it cannot be sent
    pub fn send_update<C: Component>(&mut self, writer: &Writer<C>, update: C::Update) {
        if let Err(error) = self.try_send_update(writer, update) {
            warn!("Dropping {} update: {}", C::kind(), error);
        }
    }

    /// Applies `update` to the local replica, notifies local subscribers and
    /// queues it for every other worker
    pub fn try_send_update<C: Component>(
        &mut self,
        writer: &Writer<C>,
        update: C::Update,
    ) -> Result<(), WorldError> {
        let entity = writer.entity();
        if !writer.is_live() || !self.authority(&entity, &C::kind()).is_writable() {
            return Err(WorldError::AuthorityLost {
                entity_id: entity.to_string(),
                component_kind: C::kind().name(),
            });
        }
        if !self.connected {
            return Err(WorldError::NotConnected);
        }

        let update_data = C::update_into_data(update);
        let data = self
            .entities
            .get_mut(&entity)
            .and_then(|components| components.get_mut(&C::kind()))
            .ok_or_else(|| WorldError::ComponentNotFound {
                entity_id: entity.to_string(),
                component_kind: C::kind().name(),
                operation: "send update",
            })?;
        data.apply_update(&update_data)?;
        self.subscriptions.notify(&entity, data);

        self.outgoing.push(OutgoingMessage::ComponentUpdate {
            entity,
            update: update_data,
        });
        Ok(())
    }

    // Commands

    /// Sends command `C` to whichever worker is authoritative over
    /// `C::Component` on `target`, using `writer` as the originating
    /// credential. Never blocks; the result arrives later through the
    /// returned handle.
    pub fn send_command<C: CommandDescriptor, W: Component>(
        &mut self,
        writer: &Writer<W>,
        target: &EntityId,
        request: C::Request,
    ) -> PendingCommand<C> {
        let pending = self.dispatcher.dispatch::<C>(target, Instant::now());
        let request_id = pending.request_id();

        if !writer.is_live() {
            let message = format!(
                "origin writer for {} on {} is no longer authoritative",
                W::kind(),
                writer.entity()
            );
            self.dispatcher.resolve(
                &request_id,
                Err(CommandError::new(StatusCode::PermissionDenied, message)),
            );
            return pending;
        }
        if !self.connected {
            self.dispatcher.resolve(
                &request_id,
                Err(CommandError::new(StatusCode::Disconnected, "worker is not connected")),
            );
            return pending;
        }

        debug!("Sending {} command {} to {}", C::name(), request_id, target);
        self.outgoing.push(OutgoingMessage::CommandRequest {
            request_id,
            entity: *target,
            request: C::wrap_request(request),
        });
        pending
    }

    /// Answers an incoming request. The responder must still be authoritative
    /// over the command's component.
    pub fn send_command_response<C: CommandDescriptor>(
        &mut self,
        writer: &Writer<C::Component>,
        request_id: CommandRequestId,
        response: C::Response,
    ) -> Result<(), WorldError> {
        if !writer.is_live() {
            return Err(WorldError::AuthorityLost {
                entity_id: writer.entity().to_string(),
                component_kind: <C::Component as Component>::kind().name(),
            });
        }
        self.outgoing.push(OutgoingMessage::CommandResponse {
            request_id,
            response: Ok(C::wrap_response(response)),
        });
        Ok(())
    }

    pub fn send_command_failure(&mut self, request_id: CommandRequestId, error: CommandError) {
        self.outgoing.push(OutgoingMessage::CommandResponse {
            request_id,
            response: Err(error),
        });
    }

    /// Drains the command requests received since the last call
    pub fn take_command_requests(&mut self) -> Vec<IncomingCommandRequest> {
        mem::take(&mut self.incoming_requests)
    }

    pub fn pending_command_count(&self) -> usize {
        self.dispatcher.pending_count()
    }

    /// Fails every command whose deadline is at or before `now`
    pub fn expire_commands(&mut self, now: Instant) -> usize {
        self.dispatcher.expire(now)
    }

    // Ops

    pub fn take_outgoing(&mut self) -> Vec<OutgoingMessage> {
        mem::take(&mut self.outgoing)
    }

    pub fn process_ops(&mut self, ops: Vec<WorkerOp>) {
        for op in ops {
            self.process_op(op);
        }
    }

    /// Processes a single op, logging and skipping it if it cannot be applied
    pub fn process_op(&mut self, op: WorkerOp) {
        if let Err(error) = self.try_process_op(op) {
            warn!("Worker {} skipped op: {}", self.worker_id, error);
        }
    }

    pub fn try_process_op(&mut self, op: WorkerOp) -> Result<(), WorldError> {
        match op {
            WorkerOp::AddEntity { entity } => {
                if self.entities.contains_key(&entity) {
                    warn!("Entity {} checked out twice", entity);
                } else {
                    self.entities.insert(entity, HashMap::new());
                }
            }
            WorkerOp::RemoveEntity { entity } => {
                if self.entities.remove(&entity).is_none() {
                    return Err(WorldError::EntityNotFound {
                        entity_id: entity.to_string(),
                        operation: "remove entity",
                    });
                }
                self.auth_handler.deregister_entity(&entity);
                self.subscriptions.remove_entity(&entity);
            }
            WorkerOp::AddComponent { entity, data } => {
                let component_kind = data.kind();
                let components =
                    self.entities
                        .get_mut(&entity)
                        .ok_or_else(|| WorldError::EntityNotFound {
                            entity_id: entity.to_string(),
                            operation: "add component",
                        })?;
                if components.insert(component_kind, data).is_some() {
                    warn!("Component {} on {} added twice, replacing", component_kind, entity);
                } else {
                    self.auth_handler
                        .try_register_component(&entity, &component_kind)?;
                }
            }
            WorkerOp::ComponentUpdate { entity, update } => {
                let data = self
                    .entities
                    .get_mut(&entity)
                    .and_then(|components| components.get_mut(&update.kind()))
                    .ok_or_else(|| WorldError::ComponentNotFound {
                        entity_id: entity.to_string(),
                        component_kind: update.kind().name(),
                        operation: "apply update",
                    })?;
                data.apply_update(&update)?;
                self.subscriptions.notify(&entity, data);
            }
            WorkerOp::AuthorityChange {
                entity,
                component_kind,
                authority,
            } => {
                self.auth_handler
                    .try_set_authority(&entity, &component_kind, authority)?;
                info!(
                    "Worker {} is now {} over {} on {}",
                    self.worker_id,
                    authority.name(),
                    component_kind,
                    entity
                );
            }
            WorkerOp::CommandRequest(request) => {
                self.incoming_requests.push(request);
            }
            WorkerOp::CommandResponse {
                request_id,
                response,
            } => {
                self.dispatcher.resolve(&request_id, response);
            }
            WorkerOp::Disconnect { reason } => {
                info!("Worker {} disconnected: {}", self.worker_id, reason);
                self.connected = false;
                self.dispatcher.fail_all(StatusCode::Disconnected, &reason);
            }
            WorkerOp::LogMessage { level, message } => {
                log!(level, "[remote] {}", message);
            }
        }
        Ok(())
    }
}
