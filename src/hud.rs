use crate::color::Color;
use crate::font::Font;
use crate::texture::Texture;
use crate::world::Player;

/// Everything the heads-up display shows, derived from the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud<'a> {
    pub health_string: String,
    pub health_tint: Color,
    pub ammo_string: String,
    pub player_weapon: Texture,
    pub weapon_icon: Texture,
    pub font: &'a Font,
}

impl<'a> Hud<'a> {
    pub fn new(player: &Player, font: &'a Font) -> Self {
        let health = player.health.max(0.0) as i64;
        let health_tint = match health {
            ..=10 => Color::RED,
            ..=30 => Color::YELLOW,
            _ => Color::GREEN,
        };
        // Infinite ammo clamps to the two-digit maximum.
        let ammo = player.ammo().clamp(0.0, 99.0) as i64;
        Self {
            health_string: health.to_string(),
            health_tint,
            ammo_string: ammo.to_string(),
            player_weapon: player.animation.texture(),
            weapon_icon: player.weapon().attributes().hud_icon,
            font,
        }
    }
}
