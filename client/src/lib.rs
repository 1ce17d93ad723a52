//! # Broadside Client
//! Behaviours run by player-facing workers: the sinking animation and the
//! score overlay. Rendering is reached through the traits in
//! [`presentation`].

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use broadside_shared::{
        ClientAuthorityCheck, EntityId, Health, Score, World, WorkerConfig, WorkerType,
    };
}

mod behaviours;
pub mod presentation;

pub use behaviours::{score_gui::ScoreGui, sinking::SinkingBehaviour};
pub use presentation::{Animation, ScoreCanvas, UiRoot};
