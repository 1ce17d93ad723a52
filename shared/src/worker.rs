use std::time::Instant;

use log::info;

use crate::{
    behaviour::{Behaviour, BehaviourHost},
    connection::Connection,
    ops::WorkerOp,
    physics::Collider,
    world::{entity::entity_id::EntityId, local_world::World},
    WorkerConfig,
};

/// A worker process: its replica, its behaviours and its connection
pub struct Worker<T: Connection> {
    world: World,
    behaviours: BehaviourHost,
    connection: T,
}

impl<T: Connection> Worker<T> {
    pub fn new(config: &WorkerConfig, connection: T) -> Self {
        Self {
            world: World::new(config),
            behaviours: BehaviourHost::new(),
            connection,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn behaviours(&self) -> &BehaviourHost {
        &self.behaviours
    }

    pub fn connection(&self) -> &T {
        &self.connection
    }

    pub fn add_behaviour<B: Behaviour + 'static>(&mut self, entity: &EntityId, behaviour: B) {
        self.behaviours.add(entity, Box::new(behaviour));
        self.behaviours.refresh(&mut self.world);
    }

    /// Runs one iteration of the worker loop. Returns false once disconnected.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut ops = self.connection.get_op_list();
        if !self.connection.is_connected() && self.world.is_connected() {
            ops.push(WorkerOp::Disconnect {
                reason: "connection closed".to_string(),
            });
        }

        for op in ops {
            self.process_op(op);
        }

        self.behaviours.dispatch_command_requests(&mut self.world);
        self.behaviours.tick(&mut self.world, now);
        self.world.expire_commands(now);
        self.flush();

        self.world.is_connected()
    }

    /// Reports a physics contact on `entity`
    pub fn trigger_enter(&mut self, entity: &EntityId, other: &dyn Collider) {
        self.behaviours
            .trigger_enter(&mut self.world, entity, other);
        self.flush();
    }

    /// Detaches every behaviour, leaving no callbacks registered
    pub fn teardown(&mut self) {
        info!("Tearing down worker {}", self.world.worker_id());
        self.behaviours.teardown(&mut self.world);
        self.flush();
    }

    fn process_op(&mut self, op: WorkerOp) {
        match &op {
            WorkerOp::RemoveEntity { entity } => {
                self.behaviours.remove_entity(&mut self.world, entity);
            }
            WorkerOp::Disconnect { .. } => {
                self.behaviours.teardown(&mut self.world);
            }
            _ => {}
        }

        self.world.process_op(op);
        self.behaviours.refresh(&mut self.world);
    }

    fn flush(&mut self) {
        if !self.connection.is_connected() {
            return;
        }
        for message in self.world.take_outgoing() {
            self.connection.send(message);
        }
    }
}
