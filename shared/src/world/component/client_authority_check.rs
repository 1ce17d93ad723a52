use crate::world::{component::ComponentUpdate, delegation::writer::WriteProof};

/// Fieldless marker. The client worker holding write authority over it is the
/// player controlling that ship.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ClientAuthorityCheck;

impl ClientAuthorityCheck {
    pub(crate) fn apply(&mut self, _update: &ClientAuthorityCheckUpdate) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientAuthorityCheckUpdate {
    _proof: (),
}

impl ComponentUpdate for ClientAuthorityCheckUpdate {
    fn new(_proof: WriteProof) -> Self {
        Self { _proof: () }
    }

    fn is_empty(&self) -> bool {
        true
    }
}
