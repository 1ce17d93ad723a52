use thiserror::Error;

use crate::ComponentKind;

/// Errors that can occur while applying replicated component data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// An update for one component kind was applied to another
    #[error("Cannot apply {update_kind} update to {component_kind} component")]
    KindMismatch {
        component_kind: ComponentKind,
        update_kind: ComponentKind,
    },
}
