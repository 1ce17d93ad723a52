use std::fmt::Debug;

use crate::{
    commands::award_points::{AwardPointsRequest, AwardResponse},
    Component, ComponentKind,
};

pub type CommandRequestId = u32;

/// Describes one command: the component it is defined on, and the shapes of
/// its request and response
pub trait CommandDescriptor: 'static {
    /// Component whose authoritative writer serves this command
    type Component: Component;
    type Request: Clone + Debug + 'static;
    type Response: Clone + Debug + 'static;

    fn name() -> &'static str;
    fn wrap_request(request: Self::Request) -> CommandRequest;
    fn unwrap_request(payload: &CommandRequest) -> Option<&Self::Request>;
    fn wrap_response(response: Self::Response) -> CommandResponse;
    fn unwrap_response(payload: CommandResponse) -> Option<Self::Response>;
}

/// Type-erased command payload, as moved across the transport
#[derive(Clone, Debug, PartialEq)]
pub enum CommandRequest {
    AwardPoints(AwardPointsRequest),
}

impl CommandRequest {
    pub fn name(&self) -> &'static str {
        match self {
            CommandRequest::AwardPoints(_) => "AwardPoints",
        }
    }

    /// Component kind whose authoritative worker must serve this request
    pub fn component_kind(&self) -> ComponentKind {
        match self {
            CommandRequest::AwardPoints(_) => ComponentKind::Score,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CommandResponse {
    AwardPoints(AwardResponse),
}
