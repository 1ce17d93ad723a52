use crate::{
    commands::descriptor::{CommandDescriptor, CommandRequest, CommandRequestId},
    EntityId, WorkerId,
};

/// A command request delivered to this worker for an entity it may hold
/// authority over
#[derive(Clone, Debug, PartialEq)]
pub struct IncomingCommandRequest {
    pub request_id: CommandRequestId,
    pub caller_worker_id: WorkerId,
    pub entity: EntityId,
    pub request: CommandRequest,
}

impl IncomingCommandRequest {
    pub fn request<C: CommandDescriptor>(&self) -> Option<&C::Request> {
        C::unwrap_request(&self.request)
    }
}
