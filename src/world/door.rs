use crate::easing;
use crate::geometry::{Billboard, Ray, Rect, Vector, vector};
use crate::texture::Texture;
use crate::world::{Actor, SoundName, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Sliding door. Opens when the player bumps it, closes on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub position: Vector,
    /// Slide axis. Also the axis the leaf spans when closed.
    pub direction: Vector,
    pub texture: Texture,
    pub state: DoorState,
    pub time: f64,
}

impl Door {
    /// Seconds to slide fully open or closed.
    pub const DURATION: f64 = 0.5;
    /// Seconds spent open before closing again.
    pub const CLOSE_DELAY: f64 = 3.0;

    /// A vertical door sits between walls above and below it and slides
    /// along y.
    pub fn new(position: Vector, is_vertical: bool) -> Self {
        let (direction, texture) = if is_vertical {
            (vector(0.0, 1.0), Texture::Door)
        } else {
            (vector(1.0, 0.0), Texture::Door2)
        };
        Self { position, direction, texture, state: DoorState::Closed, time: 0.0 }
    }

    /// How far open, `0` closed to `1` open.
    pub fn offset(&self) -> f64 {
        let t = (self.time / Self::DURATION).min(1.0);
        match self.state {
            DoorState::Closed => 0.0,
            DoorState::Opening => easing::ease_in_ease_out(t),
            DoorState::Open => 1.0,
            DoorState::Closing => 1.0 - easing::ease_in_ease_out(t),
        }
    }

    fn start(&self) -> Vector {
        self.position + self.direction * (self.offset() - 0.5)
    }

    /// Zero-thickness collision rect covering the leaf.
    pub fn rect(&self) -> Rect {
        let start = self.start();
        Rect::new(start, start + self.direction)
    }

    pub fn billboard(&self) -> Billboard {
        Billboard::new(self.start(), self.direction, 1.0, self.texture)
    }

    pub fn hit_test(&self, ray: &Ray) -> Option<Vector> {
        self.billboard().hit_test(ray)
    }

    pub fn update(&mut self, world: &mut World) {
        match self.state {
            DoorState::Closed => {
                if world.player().intersection_with_door(self).is_some() {
                    self.state = DoorState::Opening;
                    self.time = 0.0;
                    world.play_sound(Some(SoundName::DoorSlide), self.position, None);
                }
            }
            DoorState::Opening => {
                if self.time >= Self::DURATION {
                    self.state = DoorState::Open;
                    self.time = 0.0;
                }
            }
            DoorState::Open => {
                if self.time >= Self::CLOSE_DELAY {
                    self.state = DoorState::Closing;
                    self.time = 0.0;
                    world.play_sound(Some(SoundName::DoorSlide), self.position, None);
                }
            }
            DoorState::Closing => {
                if self.time >= Self::DURATION {
                    self.state = DoorState::Closed;
                    self.time = 0.0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_tracks_state() {
        let mut door = Door::new(vector(2.5, 2.5), true);
        assert_eq!(door.offset(), 0.0);
        door.state = DoorState::Opening;
        door.time = 0.25;
        assert!((door.offset() - 0.5).abs() < 1e-12);
        door.state = DoorState::Open;
        assert_eq!(door.offset(), 1.0);
    }

    #[test]
    fn test_closed_rect_spans_the_tile() {
        let door = Door::new(vector(2.5, 2.5), true);
        assert_eq!(door.rect(), Rect::new(vector(2.5, 2.0), vector(2.5, 3.0)));
        let door = Door::new(vector(2.5, 2.5), false);
        assert_eq!(door.billboard().start, vector(2.0, 2.5));
        assert_eq!(door.texture, Texture::Door2);
    }
}
