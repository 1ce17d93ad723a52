pub mod award_points;
pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod incoming;
pub mod liveness;
pub mod pending;
