use crate::EntityId;

/// Anything a ship's trigger volume can touch
pub trait Collider {
    /// Returns the projectile capability if touching this collider damages a ship
    fn as_projectile(&self) -> Option<&dyn DamagingProjectile> {
        None
    }
}

/// A collider that damages the ship it hits
pub trait DamagingProjectile {
    /// Entity that fired the projectile, credited with the kill
    fn firer(&self) -> EntityId;
}

// Cannonball
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cannonball {
    firer: EntityId,
}

impl Cannonball {
    pub fn new(firer: EntityId) -> Self {
        Self { firer }
    }
}

impl Collider for Cannonball {
    fn as_projectile(&self) -> Option<&dyn DamagingProjectile> {
        Some(self)
    }
}

impl DamagingProjectile for Cannonball {
    fn firer(&self) -> EntityId {
        self.firer
    }
}
