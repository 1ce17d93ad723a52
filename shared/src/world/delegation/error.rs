use thiserror::Error as ThisError;

/// Errors that can occur while tracking write authority
#[derive(Debug, Clone, ThisError, PartialEq, Eq)]
pub enum AuthorityError {
    /// Component is already registered with the authority handler
    #[error("{component_kind} on {entity_id} is already registered with the authority handler")]
    AlreadyRegistered {
        entity_id: String,
        component_kind: &'static str,
    },

    /// Component is not registered when required
    #[error("{component_kind} on {entity_id} is not registered - operation '{operation}' requires registration")]
    NotRegistered {
        entity_id: String,
        component_kind: &'static str,
        operation: &'static str,
    },

    /// Authority lock is poisoned (internal consistency error)
    #[error("Authority lock is poisoned - this indicates a panic occurred while holding the lock")]
    AuthLockPoisoned,
}
