/// Write authority this worker holds over one (entity, component) pair.
///
/// Assigned and revoked by the deployment; a worker only ever observes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Authority {
    NotAuthoritative,
    Authoritative,
    /// Still writable, but the deployment is about to move authority elsewhere
    AuthorityLossImminent,
}

impl Authority {
    pub fn is_writable(&self) -> bool {
        match self {
            Authority::NotAuthoritative => false,
            Authority::Authoritative | Authority::AuthorityLossImminent => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Authority::NotAuthoritative => "NotAuthoritative",
            Authority::Authoritative => "Authoritative",
            Authority::AuthorityLossImminent => "AuthorityLossImminent",
        }
    }
}
