use std::collections::HashMap;

use log::warn;

use crate::{Component, ComponentData, ComponentKind, EntityId};

pub type SubscriptionKey = u64;

type ErasedCallback = Box<dyn FnMut(&ComponentData)>;

/// Registration of one update callback.
///
/// Not `Clone`: the only way to release it is handing it back to
/// `World::unsubscribe`, so every subscribe has exactly one unsubscribe.
#[must_use = "pass the Subscription back to World::unsubscribe when interest ends"]
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    key: SubscriptionKey,
    entity: EntityId,
    component_kind: ComponentKind,
}

impl Subscription {
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn component_kind(&self) -> ComponentKind {
        self.component_kind
    }
}

// SubscriptionRegistry
pub(crate) struct SubscriptionRegistry {
    next_key: SubscriptionKey,
    callbacks: HashMap<(EntityId, ComponentKind), Vec<(SubscriptionKey, ErasedCallback)>>,
}

impl SubscriptionRegistry {
    pub(crate) fn new() -> Self {
        Self {
            next_key: 0,
            callbacks: HashMap::new(),
        }
    }

    pub(crate) fn subscribe<C: Component, F: FnMut(&C) + 'static>(
        &mut self,
        entity: &EntityId,
        mut callback: F,
    ) -> Subscription {
        let key = self.next_key;
        self.next_key += 1;

        let erased: ErasedCallback = Box::new(move |data: &ComponentData| {
            if let Some(value) = C::from_data(data) {
                callback(value);
            }
        });
        self.callbacks
            .entry((*entity, C::kind()))
            .or_default()
            .push((key, erased));

        Subscription {
            key,
            entity: *entity,
            component_kind: C::kind(),
        }
    }

    /// Returns false if the subscription was already dropped with its entity
    pub(crate) fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let stream = (subscription.entity, subscription.component_kind);
        let Some(list) = self.callbacks.get_mut(&stream) else {
            return false;
        };
        let before = list.len();
        list.retain(|(key, _)| *key != subscription.key);
        let removed = list.len() != before;
        if list.is_empty() {
            self.callbacks.remove(&stream);
        }
        removed
    }

    /// Invokes every callback registered for this component, in subscription order
    pub(crate) fn notify(&mut self, entity: &EntityId, data: &ComponentData) {
        if let Some(list) = self.callbacks.get_mut(&(*entity, data.kind())) {
            for (_, callback) in list.iter_mut() {
                callback(data);
            }
        }
    }

    pub(crate) fn remove_entity(&mut self, entity: &EntityId) {
        let mut stale = 0;
        self.callbacks.retain(|(stream_entity, _), list| {
            if stream_entity != entity {
                return true;
            }
            stale += list.len();
            false
        });
        if stale > 0 {
            warn!(
                "Entity {} removed with {} callbacks still registered, dropping them",
                entity, stale
            );
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.values().map(|list| list.len()).sum()
    }

    pub(crate) fn count_for(&self, entity: &EntityId, component_kind: &ComponentKind) -> usize {
        self.callbacks
            .get(&(*entity, *component_kind))
            .map_or(0, |list| list.len())
    }
}
