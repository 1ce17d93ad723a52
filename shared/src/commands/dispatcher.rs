use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use log::{info, warn};

use crate::{
    commands::{
        descriptor::{CommandDescriptor, CommandRequestId, CommandResponse},
        error::{CommandError, StatusCode},
        pending::{PendingCommand, ResolveCommand},
    },
    CommandConfig, EntityId,
};

struct PendingEntry {
    resolver: Box<dyn ResolveCommand>,
    target: EntityId,
    deadline: Instant,
}

/// Owns the continuation slot of every command this worker has in flight.
///
/// An entry is removed the moment it resolves, so each dispatch resolves at
/// most once; timeouts and disconnects make sure it resolves at least once.
pub struct CommandDispatcher {
    next_request_id: CommandRequestId,
    pending: HashMap<CommandRequestId, PendingEntry>,
    timeout: Duration,
}

impl CommandDispatcher {
    pub fn new(config: &CommandConfig) -> Self {
        Self {
            next_request_id: 0,
            pending: HashMap::new(),
            timeout: config.timeout,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, request_id: &CommandRequestId) -> bool {
        self.pending.contains_key(request_id)
    }

    /// Registers a new pending command towards `target`
    pub fn dispatch<C: CommandDescriptor>(
        &mut self,
        target: &EntityId,
        now: Instant,
    ) -> PendingCommand<C> {
        let request_id = self.generate_request_id();
        let (pending, resolver) = PendingCommand::<C>::new(request_id);
        self.pending.insert(
            request_id,
            PendingEntry {
                resolver,
                target: *target,
                deadline: now + self.timeout,
            },
        );
        pending
    }

    /// Resolves a pending command. Returns false when the request id is
    /// unknown, i.e. already resolved or never dispatched.
    pub fn resolve(
        &mut self,
        request_id: &CommandRequestId,
        outcome: Result<CommandResponse, CommandError>,
    ) -> bool {
        let Some(entry) = self.pending.remove(request_id) else {
            warn!(
                "Dropping response for unknown command request {}, it already resolved or was never sent",
                request_id
            );
            return false;
        };
        entry.resolver.resolve(outcome);
        true
    }

    /// Fails every command whose deadline has passed. Returns how many expired.
    pub fn expire(&mut self, now: Instant) -> usize {
        let mut expired: Vec<CommandRequestId> = self
            .pending
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .map(|(request_id, _)| *request_id)
            .collect();
        expired.sort_unstable();

        for request_id in &expired {
            if let Some(entry) = self.pending.remove(request_id) {
                let message = format!(
                    "{} command to {} timed out after {:?}",
                    entry.resolver.command_name(),
                    entry.target,
                    self.timeout
                );
                entry
                    .resolver
                    .resolve(Err(CommandError::new(StatusCode::Timeout, message)));
            }
        }

        expired.len()
    }

    /// Fails every pending command with `code`
    pub fn fail_all(&mut self, code: StatusCode, message: &str) {
        if self.pending.is_empty() {
            return;
        }
        info!("Failing {} pending commands: {}", self.pending.len(), message);

        let mut request_ids: Vec<CommandRequestId> = self.pending.keys().copied().collect();
        request_ids.sort_unstable();
        for request_id in request_ids {
            if let Some(entry) = self.pending.remove(&request_id) {
                entry
                    .resolver
                    .resolve(Err(CommandError::new(code, message)));
            }
        }
    }

    fn generate_request_id(&mut self) -> CommandRequestId {
        loop {
            let request_id = self.next_request_id;
            self.next_request_id = self.next_request_id.wrapping_add(1);
            if !self.pending.contains_key(&request_id) {
                return request_id;
            }
        }
    }
}
