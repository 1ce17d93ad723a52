use std::sync::{Arc, RwLock};

use crate::world::delegation::{authority::Authority, error::AuthorityError};

// AuthorityChannel
#[derive(Clone)]
pub(crate) struct AuthorityChannel {
    data: Arc<RwLock<Authority>>,
}

impl AuthorityChannel {
    pub(crate) fn new_channel() -> (AuthorityMutator, AuthorityAccessor) {
        let channel = Self {
            data: Arc::new(RwLock::new(Authority::NotAuthoritative)),
        };

        let sender = AuthorityMutator::new(&channel);
        let receiver = AuthorityAccessor::new(&channel);

        (sender, receiver)
    }

    fn try_authority(&self) -> Result<Authority, AuthorityError> {
        let data = self
            .data
            .as_ref()
            .read()
            .map_err(|_| AuthorityError::AuthLockPoisoned)?;
        Ok(*data)
    }

    fn try_set_authority(&self, authority: Authority) -> Result<(), AuthorityError> {
        let mut data = self
            .data
            .as_ref()
            .write()
            .map_err(|_| AuthorityError::AuthLockPoisoned)?;
        *data = authority;
        Ok(())
    }
}

// AuthorityAccessor
#[derive(Clone)]
pub struct AuthorityAccessor {
    channel: AuthorityChannel,
}

impl AuthorityAccessor {
    fn new(channel: &AuthorityChannel) -> Self {
        Self {
            channel: channel.clone(),
        }
    }

    /// Get the authority, treating a poisoned lock as lost authority
    pub fn authority(&self) -> Authority {
        self.try_authority()
            .unwrap_or(Authority::NotAuthoritative)
    }

    /// Get the authority (non-degrading version)
    ///
    /// Returns an error if the lock is poisoned.
    pub fn try_authority(&self) -> Result<Authority, AuthorityError> {
        self.channel.try_authority()
    }
}

// AuthorityMutator
// no Clone necessary
pub(crate) struct AuthorityMutator {
    channel: AuthorityChannel,
}

impl AuthorityMutator {
    fn new(channel: &AuthorityChannel) -> Self {
        Self {
            channel: channel.clone(),
        }
    }

    pub(crate) fn try_set_authority(&self, authority: Authority) -> Result<(), AuthorityError> {
        self.channel.try_set_authority(authority)
    }
}
