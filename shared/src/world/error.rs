use thiserror::Error;

use crate::world::{component::error::ComponentError, delegation::error::AuthorityError};

/// Errors that can occur while operating on a worker's view of the world
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// Entity is not checked out by this worker
    #[error("Cannot {operation} on entity {entity_id} - entity not checked out")]
    EntityNotFound {
        entity_id: String,
        operation: &'static str,
    },

    /// Entity is checked out but lacks the component
    #[error("Cannot {operation} - component {component_kind} not found on entity {entity_id}")]
    ComponentNotFound {
        entity_id: String,
        component_kind: &'static str,
        operation: &'static str,
    },

    /// The writer used for this operation no longer holds authority
    #[error("Authority over {component_kind} on entity {entity_id} has been lost")]
    AuthorityLost {
        entity_id: String,
        component_kind: &'static str,
    },

    /// The worker is disconnected from the deployment
    #[error("Worker is not connected")]
    NotConnected,

    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error(transparent)]
    Authority(#[from] AuthorityError),
}
