use crate::{
    commands::descriptor::{CommandDescriptor, CommandRequest, CommandResponse},
    Score,
};

/// `Score.AwardPoints`: credits points to the target ship's score
pub struct AwardPoints;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AwardPointsRequest {
    pub amount: u32,
}

impl AwardPointsRequest {
    pub fn new(amount: u32) -> Self {
        Self { amount }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AwardResponse {
    pub amount: u32,
}

impl CommandDescriptor for AwardPoints {
    type Component = Score;
    type Request = AwardPointsRequest;
    type Response = AwardResponse;

    fn name() -> &'static str {
        "AwardPoints"
    }

    fn wrap_request(request: Self::Request) -> CommandRequest {
        CommandRequest::AwardPoints(request)
    }

    fn unwrap_request(payload: &CommandRequest) -> Option<&Self::Request> {
        match payload {
            CommandRequest::AwardPoints(request) => Some(request),
        }
    }

    fn wrap_response(response: Self::Response) -> CommandResponse {
        CommandResponse::AwardPoints(response)
    }

    fn unwrap_response(payload: CommandResponse) -> Option<Self::Response> {
        match payload {
            CommandResponse::AwardPoints(response) => Some(response),
        }
    }
}
