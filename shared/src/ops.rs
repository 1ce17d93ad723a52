use crate::{
    Authority, CommandError, CommandRequest, CommandRequestId, CommandResponse, ComponentData,
    ComponentKind, ComponentUpdateData, EntityId, IncomingCommandRequest,
};

/// One discrete event delivered by the deployment to a worker's loop
#[derive(Clone, Debug, PartialEq)]
pub enum WorkerOp {
    /// The worker checked out an entity
    AddEntity { entity: EntityId },
    /// The entity left the worker's view
    RemoveEntity { entity: EntityId },
    /// Initial replicated value of a component
    AddComponent {
        entity: EntityId,
        data: ComponentData,
    },
    /// Delta over a component, in stream order
    ComponentUpdate {
        entity: EntityId,
        update: ComponentUpdateData,
    },
    /// The authority assigner changed this worker's write authority
    AuthorityChange {
        entity: EntityId,
        component_kind: ComponentKind,
        authority: Authority,
    },
    /// A command for a component this worker may be authoritative over
    CommandRequest(IncomingCommandRequest),
    /// Resolution of a command this worker sent
    CommandResponse {
        request_id: CommandRequestId,
        response: Result<CommandResponse, CommandError>,
    },
    /// The connection to the deployment is gone
    Disconnect { reason: String },
    /// A log line sent by the deployment
    LogMessage { level: log::Level, message: String },
}

/// Traffic a worker hands to its connection
#[derive(Clone, Debug, PartialEq)]
pub enum OutgoingMessage {
    ComponentUpdate {
        entity: EntityId,
        update: ComponentUpdateData,
    },
    CommandRequest {
        request_id: CommandRequestId,
        entity: EntityId,
        request: CommandRequest,
    },
    CommandResponse {
        request_id: CommandRequestId,
        response: Result<CommandResponse, CommandError>,
    },
}
