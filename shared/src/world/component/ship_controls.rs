use crate::world::{component::ComponentUpdate, delegation::writer::WriteProof};

/// Steering targets consumed by the ship's physics on the authoritative worker
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ShipControls {
    /// Fraction of full speed, in `[0, 1]`
    pub target_speed: f32,
    /// Rudder angle in degrees
    pub target_steering: f32,
}

impl ShipControls {
    pub(crate) fn apply(&mut self, update: &ShipControlsUpdate) {
        if let Some(target_speed) = update.target_speed {
            self.target_speed = target_speed;
        }
        if let Some(target_steering) = update.target_steering {
            self.target_steering = target_steering;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShipControlsUpdate {
    target_speed: Option<f32>,
    target_steering: Option<f32>,
}

impl ShipControlsUpdate {
    pub fn set_target_speed(mut self, target_speed: f32) -> Self {
        self.target_speed = Some(target_speed);
        self
    }

    pub fn set_target_steering(mut self, target_steering: f32) -> Self {
        self.target_steering = Some(target_steering);
        self
    }

    pub fn target_speed(&self) -> Option<f32> {
        self.target_speed
    }

    pub fn target_steering(&self) -> Option<f32> {
        self.target_steering
    }
}

impl ComponentUpdate for ShipControlsUpdate {
    fn new(_proof: WriteProof) -> Self {
        Self {
            target_speed: None,
            target_steering: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.target_speed.is_none() && self.target_steering.is_none()
    }
}
