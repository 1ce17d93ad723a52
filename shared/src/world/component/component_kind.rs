use std::fmt;

/// Identifies one replicated component type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Health,
    Score,
    ClientAuthorityCheck,
    ShipControls,
}

impl ComponentKind {
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Health => "Health",
            ComponentKind::Score => "Score",
            ComponentKind::ClientAuthorityCheck => "ClientAuthorityCheck",
            ComponentKind::ShipControls => "ShipControls",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
