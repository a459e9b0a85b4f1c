use crate::animation::Animation;
use crate::texture::Texture;
use crate::world::SoundName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weapon {
    #[default]
    Pistol,
    Shotgun,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponAttributes {
    pub idle_animation: Animation,
    pub fire_animation: Animation,
    pub fire_sound: SoundName,
    /// Total damage per shot, split evenly across projectiles.
    pub damage: f64,
    /// Seconds before the next shot may interrupt the fire animation.
    pub cooldown: f64,
    pub projectiles: usize,
    /// Sine of the widest deflection angle.
    pub spread: f64,
    pub default_ammo: f64,
    pub hud_icon: Texture,
}

impl Weapon {
    pub fn attributes(self) -> WeaponAttributes {
        match self {
            Weapon::Pistol => WeaponAttributes {
                idle_animation: Animation::PISTOL_IDLE,
                fire_animation: Animation::PISTOL_FIRE,
                fire_sound: SoundName::PistolFire,
                damage: 10.0,
                cooldown: 0.25,
                projectiles: 1,
                spread: 0.0,
                default_ammo: f64::INFINITY,
                hud_icon: Texture::PistolIcon,
            },
            Weapon::Shotgun => WeaponAttributes {
                idle_animation: Animation::SHOTGUN_IDLE,
                fire_animation: Animation::SHOTGUN_FIRE,
                fire_sound: SoundName::ShotgunFire,
                damage: 50.0,
                cooldown: 0.5,
                projectiles: 5,
                spread: 0.4,
                default_ammo: 5.0,
                hud_icon: Texture::ShotgunIcon,
            },
        }
    }
}
