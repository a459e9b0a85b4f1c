//! The tile-world simulation: actors, mechanics and the per-tick
//! orchestration in [`World`].

mod actor;
mod door;
mod effect;
mod input;
mod monster;
mod pickup;
mod player;
mod pushwall;
mod sound;
mod switch;
mod weapon;
#[allow(clippy::module_inception)]
mod world;

pub use actor::Actor;
pub use door::{Door, DoorState};
pub use effect::{Effect, EffectType};
pub use input::Input;
pub use monster::{Monster, MonsterState};
pub use pickup::{Pickup, PickupType};
pub use player::{Player, PlayerState};
pub use pushwall::Pushwall;
pub use sound::{Sound, SoundName};
pub use switch::{Switch, SwitchState};
pub use weapon::{Weapon, WeaponAttributes};
pub use world::{World, WorldAction};
