//! # Broadside Shared
//! Common functionality shared between broadside-server & broadside-client
//! workers: replicated components, write authority, update subscriptions and
//! command dispatch.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod behaviour;
mod commands;
mod config;
mod connection;
mod observer;
mod ops;
mod physics;
mod types;
mod worker;
mod world;

pub use behaviour::{Behaviour, BehaviourHost, Requirement};
pub use commands::{
    award_points::{AwardPoints, AwardPointsRequest, AwardResponse},
    descriptor::{CommandDescriptor, CommandRequest, CommandRequestId, CommandResponse},
    dispatcher::CommandDispatcher,
    error::{CommandError, StatusCode},
    incoming::IncomingCommandRequest,
    liveness::Liveness,
    pending::PendingCommand,
};
pub use config::{generate_worker_id, CommandConfig, GameplayConfig, WorkerConfig};
pub use connection::Connection;
pub use observer::Observer;
pub use ops::{OutgoingMessage, WorkerOp};
pub use physics::{Cannonball, Collider, DamagingProjectile};
pub use types::{WorkerId, WorkerType};
pub use worker::Worker;
pub use world::{
    component::{
        client_authority_check::{ClientAuthorityCheck, ClientAuthorityCheckUpdate},
        component_kind::ComponentKind,
        error::ComponentError,
        health::{Health, HealthUpdate},
        score::{Score, ScoreUpdate},
        ship_controls::{ShipControls, ShipControlsUpdate},
        Component, ComponentData, ComponentUpdate, ComponentUpdateData,
    },
    delegation::{
        auth_channel::AuthorityAccessor,
        authority::Authority,
        authority_handler::AuthorityHandler,
        error::AuthorityError,
        writer::{WriteProof, Writer},
    },
    entity::entity_id::EntityId,
    error::WorldError,
    local_world::World,
    subscription::{Subscription, SubscriptionKey},
};
