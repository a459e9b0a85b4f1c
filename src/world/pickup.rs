use crate::geometry::{Billboard, Ray, Vector};
use crate::texture::Texture;
use crate::world::Actor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupType {
    Medkit,
    Shotgun,
}

/// Collectible item. Removed from the world once the player touches it.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub kind: PickupType,
    pub position: Vector,
}

impl Pickup {
    pub const RADIUS: f64 = 0.4;

    pub fn new(kind: PickupType, position: Vector) -> Self {
        Self { kind, position }
    }

    pub fn texture(&self) -> Texture {
        match self.kind {
            PickupType::Medkit => Texture::Medkit,
            PickupType::Shotgun => Texture::ShotgunPickup,
        }
    }

    /// Sprite plane facing back along `ray`.
    pub fn billboard(&self, ray: &Ray) -> Billboard {
        let plane = ray.direction.perp();
        Billboard::new(self.position - plane / 2.0, plane, 1.0, self.texture())
    }
}

impl Actor for Pickup {
    fn radius(&self) -> f64 {
        Self::RADIUS
    }

    fn position(&self) -> Vector {
        self.position
    }

    fn position_mut(&mut self) -> &mut Vector {
        &mut self.position
    }

    fn is_dead(&self) -> bool {
        false
    }
}
