use std::{fmt, marker::PhantomData};

use crate::{
    world::{
        component::{Component, ComponentUpdate},
        delegation::{auth_channel::AuthorityAccessor, authority::Authority},
    },
    EntityId,
};

/// Proof that an update is being built by a holder of write authority.
/// Only [`Writer::update`] can produce one.
pub struct WriteProof {
    _private: (),
}

impl WriteProof {
    fn new() -> Self {
        Self { _private: () }
    }
}

/// Capability to mutate component `C` of one entity.
///
/// Handed out by `World::writer` only while this worker holds write
/// authority. A writer outliving its authority goes stale: `is_live` turns
/// false and updates sent through it are dropped.
pub struct Writer<C: Component> {
    entity: EntityId,
    accessor: AuthorityAccessor,
    phantom_c: PhantomData<C>,
}

impl<C: Component> Writer<C> {
    pub(crate) fn new(entity: EntityId, accessor: AuthorityAccessor) -> Self {
        Self {
            entity,
            accessor,
            phantom_c: PhantomData,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn authority(&self) -> Authority {
        self.accessor.authority()
    }

    pub fn is_live(&self) -> bool {
        self.authority().is_writable()
    }

    /// Starts an empty update for this writer's component
    pub fn update(&self) -> C::Update {
        C::Update::new(WriteProof::new())
    }
}

impl<C: Component> Clone for Writer<C> {
    fn clone(&self) -> Self {
        Self {
            entity: self.entity,
            accessor: self.accessor.clone(),
            phantom_c: PhantomData,
        }
    }
}

impl<C: Component> fmt::Debug for Writer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("component", &C::kind())
            .field("entity", &self.entity)
            .field("authority", &self.authority())
            .finish()
    }
}
