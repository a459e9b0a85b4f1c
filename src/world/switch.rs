use crate::animation::Animation;
use crate::geometry::{Rect, Vector};
use crate::world::{Actor, SoundName, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    Off,
    On,
}

/// Wall-mounted level exit. Flips on contact and ends the level when the
/// flip animation finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub position: Vector,
    pub state: SwitchState,
    pub animation: Animation,
}

impl Switch {
    pub fn new(position: Vector) -> Self {
        Self { position, state: SwitchState::Off, animation: Animation::SWITCH_OFF }
    }

    pub fn rect(&self) -> Rect {
        Rect::around(self.position, 0.5)
    }

    pub fn update(&mut self, world: &mut World) {
        match self.state {
            SwitchState::Off => {
                if world.player().rect().intersection(&self.rect()).is_some() {
                    self.state = SwitchState::On;
                    self.animation = Animation::SWITCH_FLIP;
                    world.play_sound(Some(SoundName::SwitchFlip), self.position, None);
                }
            }
            SwitchState::On => {
                if self.animation.is_completed() && !world.is_level_ended() {
                    self.animation = Animation::SWITCH_ON;
                    world.end_level();
                }
            }
        }
    }
}
