use log::{debug, info, warn};

use broadside_shared::{
    AwardPoints, AwardResponse, Behaviour, ComponentKind, EntityId, IncomingCommandRequest,
    Requirement, Score, World,
};

const REQUIREMENTS: &[Requirement] = &[Requirement::Write(ComponentKind::Score)];

/// Serves `AwardPoints` on the worker authoritative over a ship's `Score`
#[derive(Default)]
pub struct AwardPointsHandler;

impl AwardPointsHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Behaviour for AwardPointsHandler {
    fn name(&self) -> &'static str {
        "AwardPointsHandler"
    }

    fn requirements(&self) -> &'static [Requirement] {
        REQUIREMENTS
    }

    fn on_attach(&mut self, entity: &EntityId, _world: &mut World) {
        debug!("Serving AwardPoints for {}", entity);
    }

    fn on_detach(&mut self, entity: &EntityId, _world: &mut World) {
        debug!("No longer serving AwardPoints for {}", entity);
    }

    fn on_command_request(&mut self, world: &mut World, request: &IncomingCommandRequest) -> bool {
        let Some(amount) = request.request::<AwardPoints>().map(|award| award.amount) else {
            return false;
        };
        let Some(writer) = world.writer::<Score>(&request.entity) else {
            return false;
        };

        let current_points = world
            .current_value::<Score>(&request.entity)
            .map_or(0, |score| score.number_of_points);
        let new_points = current_points.saturating_add(i32::try_from(amount).unwrap_or(i32::MAX));
        world.send_update(&writer, writer.update().set_number_of_points(new_points));

        match world.send_command_response::<AwardPoints>(
            &writer,
            request.request_id,
            AwardResponse { amount },
        ) {
            Ok(()) => info!(
                "Awarded {} points to {} (now {}) for {}",
                amount, request.entity, new_points, request.caller_worker_id
            ),
            Err(error) => warn!("Could not respond to AwardPoints: {}", error),
        }
        true
    }
}
