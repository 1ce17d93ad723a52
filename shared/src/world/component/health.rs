use crate::world::{component::ComponentUpdate, delegation::writer::WriteProof};

/// Hull integrity of a ship. A ship at or below zero has sunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Health {
    pub current_health: i32,
}

impl Health {
    pub fn new(current_health: i32) -> Self {
        Self { current_health }
    }

    /// Whether the ship has reached its terminal state
    pub fn is_sunk(&self) -> bool {
        self.current_health <= 0
    }

    pub(crate) fn apply(&mut self, update: &HealthUpdate) {
        if let Some(current_health) = update.current_health {
            self.current_health = current_health;
        }
    }
}

/// Partial delta over [`Health`]. Only obtainable through a `Writer<Health>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealthUpdate {
    current_health: Option<i32>,
}

impl HealthUpdate {
    pub fn set_current_health(mut self, current_health: i32) -> Self {
        self.current_health = Some(current_health);
        self
    }

    pub fn current_health(&self) -> Option<i32> {
        self.current_health
    }
}

impl ComponentUpdate for HealthUpdate {
    fn new(_proof: WriteProof) -> Self {
        Self {
            current_health: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.current_health.is_none()
    }
}
