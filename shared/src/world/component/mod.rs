use std::fmt::Debug;

pub mod client_authority_check;
pub mod component_kind;
pub mod error;
pub mod health;
pub mod score;
pub mod ship_controls;

use client_authority_check::{ClientAuthorityCheck, ClientAuthorityCheckUpdate};
pub use component_kind::ComponentKind;
use error::ComponentError;
use health::{Health, HealthUpdate};
use score::{Score, ScoreUpdate};
use ship_controls::{ShipControls, ShipControlsUpdate};

use crate::world::delegation::writer::WriteProof;

/// A typed state record replicated to every worker that checked out its entity
pub trait Component: Clone + Debug + PartialEq + 'static {
    type Update: ComponentUpdate;

    fn kind() -> ComponentKind;
    fn apply_update(&mut self, update: &Self::Update);
    fn into_data(self) -> ComponentData;
    fn from_data(data: &ComponentData) -> Option<&Self>;
    fn update_into_data(update: Self::Update) -> ComponentUpdateData;
    fn update_from_data(data: &ComponentUpdateData) -> Option<&Self::Update>;
}

/// A partial delta over a component's fields
pub trait ComponentUpdate: Clone + Debug + 'static {
    /// Creates an empty update. Requires a [`WriteProof`], which only a live
    /// `Writer` hands out.
    fn new(proof: WriteProof) -> Self;
    fn is_empty(&self) -> bool;
}

/// Type-erased component value, as stored in a worker's view and moved
/// across the transport
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentData {
    Health(Health),
    Score(Score),
    ClientAuthorityCheck(ClientAuthorityCheck),
    ShipControls(ShipControls),
}

/// Type-erased component update
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentUpdateData {
    Health(HealthUpdate),
    Score(ScoreUpdate),
    ClientAuthorityCheck(ClientAuthorityCheckUpdate),
    ShipControls(ShipControlsUpdate),
}

macro_rules! replicated_component {
    ($component:ident, $update:ident) => {
        impl Component for $component {
            type Update = $update;

            fn kind() -> ComponentKind {
                ComponentKind::$component
            }

            fn apply_update(&mut self, update: &Self::Update) {
                self.apply(update);
            }

            fn into_data(self) -> ComponentData {
                ComponentData::$component(self)
            }

            fn from_data(data: &ComponentData) -> Option<&Self> {
                match data {
                    ComponentData::$component(inner) => Some(inner),
                    _ => None,
                }
            }

            fn update_into_data(update: Self::Update) -> ComponentUpdateData {
                ComponentUpdateData::$component(update)
            }

            fn update_from_data(data: &ComponentUpdateData) -> Option<&Self::Update> {
                match data {
                    ComponentUpdateData::$component(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

replicated_component!(Health, HealthUpdate);
replicated_component!(Score, ScoreUpdate);
replicated_component!(ClientAuthorityCheck, ClientAuthorityCheckUpdate);
replicated_component!(ShipControls, ShipControlsUpdate);

impl ComponentData {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentData::Health(_) => ComponentKind::Health,
            ComponentData::Score(_) => ComponentKind::Score,
            ComponentData::ClientAuthorityCheck(_) => ComponentKind::ClientAuthorityCheck,
            ComponentData::ShipControls(_) => ComponentKind::ShipControls,
        }
    }

    pub fn apply_update(&mut self, update: &ComponentUpdateData) -> Result<(), ComponentError> {
        match (self, update) {
            (ComponentData::Health(inner), ComponentUpdateData::Health(update)) => {
                inner.apply(update)
            }
            (ComponentData::Score(inner), ComponentUpdateData::Score(update)) => {
                inner.apply(update)
            }
            (
                ComponentData::ClientAuthorityCheck(inner),
                ComponentUpdateData::ClientAuthorityCheck(update),
            ) => inner.apply(update),
            (ComponentData::ShipControls(inner), ComponentUpdateData::ShipControls(update)) => {
                inner.apply(update)
            }
            (data, update) => {
                return Err(ComponentError::KindMismatch {
                    component_kind: data.kind(),
                    update_kind: update.kind(),
                });
            }
        }
        Ok(())
    }
}

impl ComponentUpdateData {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentUpdateData::Health(_) => ComponentKind::Health,
            ComponentUpdateData::Score(_) => ComponentKind::Score,
            ComponentUpdateData::ClientAuthorityCheck(_) => ComponentKind::ClientAuthorityCheck,
            ComponentUpdateData::ShipControls(_) => ComponentKind::ShipControls,
        }
    }
}
