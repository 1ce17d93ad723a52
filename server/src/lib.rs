//! # Broadside Server
//! Behaviours run by server-side workers: authority-gated cannonball damage,
//! the `AwardPoints` command handler, and the ship steering loop.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use broadside_shared::{
        AwardPoints, Cannonball, Collider, EntityId, GameplayConfig, Health, Score, ShipControls,
        World, WorkerConfig, WorkerType,
    };
}

mod behaviours;

pub use behaviours::{
    award_points_handler::AwardPointsHandler,
    steering::{ShipSteering, SteeringConfig},
    take_damage::{try_mutate, AwardLedger, HealthMutation, TakeDamage},
};
