use std::collections::HashMap;

use log::warn;

use crate::{
    world::delegation::{
        auth_channel::{AuthorityAccessor, AuthorityChannel, AuthorityMutator},
        authority::Authority,
        error::AuthorityError,
    },
    ComponentKind, EntityId,
};

/// Tracks, per replicated component, whether this worker holds write authority
pub struct AuthorityHandler {
    auth_channels: HashMap<(EntityId, ComponentKind), (AuthorityMutator, AuthorityAccessor)>,
}

impl AuthorityHandler {
    pub fn new() -> Self {
        Self {
            auth_channels: HashMap::new(),
        }
    }

    /// Register a component with the authority handler
    ///
    /// Returns an error if the component is already registered.
    pub fn try_register_component(
        &mut self,
        entity: &EntityId,
        component_kind: &ComponentKind,
    ) -> Result<AuthorityAccessor, AuthorityError> {
        let key = (*entity, *component_kind);
        if self.auth_channels.contains_key(&key) {
            return Err(AuthorityError::AlreadyRegistered {
                entity_id: entity.to_string(),
                component_kind: component_kind.name(),
            });
        }

        let (mutator, accessor) = AuthorityChannel::new_channel();
        self.auth_channels.insert(key, (mutator, accessor.clone()));

        Ok(accessor)
    }

    /// Deregisters every component of an entity. Outstanding writers observe
    /// lost authority.
    pub fn deregister_entity(&mut self, entity: &EntityId) {
        self.auth_channels.retain(|(channel_entity, _), (mutator, _)| {
            if channel_entity != entity {
                return true;
            }
            if let Err(error) = mutator.try_set_authority(Authority::NotAuthoritative) {
                warn!("Could not revoke authority on deregister: {}", error);
            }
            false
        });
    }

    /// Get the authority accessor for a component
    ///
    /// Returns an error if the component is not registered.
    pub fn try_get_accessor(
        &self,
        entity: &EntityId,
        component_kind: &ComponentKind,
    ) -> Result<AuthorityAccessor, AuthorityError> {
        let (_, accessor) = self
            .auth_channels
            .get(&(*entity, *component_kind))
            .ok_or_else(|| AuthorityError::NotRegistered {
                entity_id: entity.to_string(),
                component_kind: component_kind.name(),
                operation: "get_accessor",
            })?;

        Ok(accessor.clone())
    }

    /// Authority over a component. Unregistered components are never writable.
    pub fn authority(&self, entity: &EntityId, component_kind: &ComponentKind) -> Authority {
        match self.auth_channels.get(&(*entity, *component_kind)) {
            Some((_, accessor)) => accessor.authority(),
            None => Authority::NotAuthoritative,
        }
    }

    /// Set the authority for a component
    ///
    /// Returns an error if the component is not registered.
    pub fn try_set_authority(
        &self,
        entity: &EntityId,
        component_kind: &ComponentKind,
        authority: Authority,
    ) -> Result<(), AuthorityError> {
        let (mutator, _) = self
            .auth_channels
            .get(&(*entity, *component_kind))
            .ok_or_else(|| AuthorityError::NotRegistered {
                entity_id: entity.to_string(),
                component_kind: component_kind.name(),
                operation: "set_authority",
            })?;

        mutator.try_set_authority(authority)
    }
}

impl Default for AuthorityHandler {
    fn default() -> Self {
        Self::new()
    }
}
