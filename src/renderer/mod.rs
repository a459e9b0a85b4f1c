//! Software raycaster. Draws a [`Game`] into a [`Bitmap`] one screen column
//! at a time.

mod bitmap;
mod textures;

pub use bitmap::Bitmap;
pub use textures::Textures;

use std::sync::Arc;

use crate::color::Color;
use crate::config::SafeArea;
use crate::font::Font;
use crate::game::{Game, GameState};
use crate::geometry::{Billboard, Ray, Vector, vector};
use crate::hud::Hud;
use crate::rng::Rng;
use crate::texture::Texture;
use crate::world::{Effect, EffectType, World};

const FOCAL_LENGTH: f64 = 1.0;
const WALL_HEIGHT: f64 = 1.0;

// Dissolve pattern for `FizzleOut`.
const FIZZLE_SIZE: usize = 10_000;
const FIZZLE_SEED: u64 = 0x5eed;
const FIZZLE_GRANULARITY: usize = 4;

/// HUD art is authored for a 64-pixel-tall screen.
const HUD_REFERENCE_HEIGHT: f64 = 64.0;

pub struct Renderer {
    bitmap: Bitmap,
    textures: Arc<Textures>,
    safe_area: SafeArea,
    /// Shuffled `0..FIZZLE_SIZE`, fixed for the renderer's lifetime.
    fizzle: Vec<usize>,
}

impl Renderer {
    pub fn new(width: usize, height: usize, textures: Arc<Textures>) -> Self {
        let mut fizzle: Vec<usize> = (0..FIZZLE_SIZE).collect();
        Rng::new(FIZZLE_SEED).shuffle(&mut fizzle);
        Self {
            bitmap: Bitmap::new(width, height, Color::BLACK),
            textures,
            safe_area: SafeArea::full(width, height),
            fizzle,
        }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn safe_area(&self) -> SafeArea {
        self.safe_area
    }

    pub fn set_safe_area(&mut self, safe_area: SafeArea) {
        self.safe_area = safe_area;
    }

    /// Render a complete frame.
    pub fn draw(&mut self, game: &Game) {
        self.bitmap.fill(Color::BLACK);
        match game.state() {
            GameState::Title | GameState::Starting => self.draw_title(game),
            GameState::Playing => {
                self.draw_world(game.world());
                self.draw_hud(&game.hud());
                for effect in game.world().effects() {
                    self.draw_effect(effect);
                }
            }
        }
        if let Some(effect) = game.transition() {
            self.draw_effect(effect);
        }
    }

    fn draw_title(&mut self, game: &Game) {
        let textures = Arc::clone(&self.textures);
        let size = self.bitmap.size();

        let background = &textures[Texture::TitleBackground];
        let background_size = background.size() * (size.y / background.size().y);
        self.bitmap.draw_image(background, None, (size - background_size) / 2.0, background_size, None);

        let logo = &textures[Texture::TitleLogo];
        let logo_size = logo.size() * (size.y / logo.size().y / 2.0);
        let logo_position = vector((size.x - logo_size.x) / 2.0, size.y * 0.15);
        self.bitmap.draw_image(logo, None, logo_position, logo_size, None);

        let scale = size.y / HUD_REFERENCE_HEIGHT;
        let font = game.font();
        let glyph_width = textures[font.texture].width() / font.characters.len().max(1);
        let text_width = (glyph_width * Game::TITLE_TEXT.chars().count()) as f64 * scale;
        let origin = vector((size.x - text_width) / 2.0, size.y * 0.75);
        self.draw_text(font, Game::TITLE_TEXT, origin, scale, Some(Color::YELLOW));
    }

    /// Walls, floors, ceilings and sprites, from the player's eye.
    pub fn draw_world(&mut self, world: &World) {
        let textures = Arc::clone(&self.textures);
        let width = self.bitmap.width();
        let height = self.bitmap.height() as f64;
        let player = world.player();
        let map = world.map();

        let view_width = width as f64 / height;
        let view_plane = player.direction.perp() * view_width;
        let view_center = player.position + player.direction * FOCAL_LENGTH;
        let view_start = view_center - view_plane / 2.0;
        let step = view_plane / width as f64;
        let sprites = world.sprites();

        let mut column_position = view_start;
        for x in 0..width {
            let ray_direction = column_position - player.position;
            let view_plane_distance = ray_direction.length();
            let ray = Ray::new(player.position, ray_direction / view_plane_distance);
            let end = map.hit_test(&ray);
            let wall_distance = (end - ray.origin).length();

            // Wall
            let distance_ratio = view_plane_distance / FOCAL_LENGTH;
            let perpendicular = wall_distance / distance_ratio;
            let wall_column_height = WALL_HEIGHT * FOCAL_LENGTH / perpendicular * height;
            let (tile_x, tile_y) = map.tile_coords(end, ray.direction);
            let tile = map.get(tile_x, tile_y);
            let (wall_texture, wall_x) = if end.x.floor() == end.x {
                let neighbour_x = tile_x + if ray.direction.x > 0.0 { -1 } else { 1 };
                let texture =
                    if world.is_door(neighbour_x, tile_y) { Texture::DoorJamb } else { tile.textures()[0] };
                (&textures[texture], end.y - end.y.floor())
            } else {
                let neighbour_y = tile_y + if ray.direction.y > 0.0 { -1 } else { 1 };
                let texture =
                    if world.is_door(tile_x, neighbour_y) { Texture::DoorJamb2 } else { tile.textures()[1] };
                (&textures[texture], end.x - end.x.floor())
            };
            let texture_x = ((wall_x * wall_texture.width() as f64) as usize).min(wall_texture.width() - 1);
            let wall_start = vector(x as f64, (height - wall_column_height) / 2.0 - 0.001);
            self.bitmap.draw_column(texture_x, wall_texture, wall_start, wall_column_height, None);

            if let Some(switch) = world.switch_at(tile_x, tile_y) {
                let switch_texture = &textures[switch.animation.texture()];
                self.bitmap.draw_column(texture_x, switch_texture, wall_start, wall_column_height, None);
            }

            // Floor and ceiling
            let floor_start = ((wall_start.y + wall_column_height).max(0.0) as usize + 1).min(self.bitmap.height());
            let mut floor_tile = None;
            let mut floor_texture = &textures[Texture::Floor];
            let mut ceiling_texture = &textures[Texture::Ceiling];
            for y in floor_start..self.bitmap.height() {
                let normalized_y = (y as f64 / height) * 2.0 - 1.0;
                let perpendicular = WALL_HEIGHT * FOCAL_LENGTH / normalized_y;
                let distance = perpendicular * distance_ratio;
                let map_position = ray.origin + ray.direction * distance;
                let (cell_x, cell_y) = (map_position.x.floor(), map_position.y.floor());
                let tile = map.get(cell_x as i32, cell_y as i32);
                if floor_tile != Some(tile) {
                    let [floor, ceiling] = tile.textures();
                    floor_texture = &textures[floor];
                    ceiling_texture = &textures[ceiling];
                    floor_tile = Some(tile);
                }
                let (u, v) = (map_position.x - cell_x, map_position.y - cell_y);
                self.bitmap.set(x, y, floor_texture.sample(u, v));
                self.bitmap.set(x, self.bitmap.height() - 1 - y, ceiling_texture.sample(u, v));
            }

            // Sprites, far to near, only where nearer than the wall
            let mut visible: Vec<(Vector, f64, &Billboard)> = sprites
                .iter()
                .filter_map(|sprite| {
                    let hit = sprite.hit_test(&ray)?;
                    let distance = (hit - ray.origin).length();
                    (distance <= wall_distance).then_some((hit, distance, sprite))
                })
                .collect();
            visible.sort_by(|a, b| b.1.total_cmp(&a.1));

            for (hit, sprite_distance, sprite) in visible {
                let perpendicular = sprite_distance / distance_ratio;
                let sprite_height = WALL_HEIGHT / perpendicular * height;
                let sprite_x = (hit - sprite.start).length() / sprite.length;
                let sprite_texture = &textures[sprite.texture];
                let texture_x =
                    ((sprite_x * sprite_texture.width() as f64) as usize).min(sprite_texture.width() - 1);
                let start = vector(x as f64, (height - sprite_height) / 2.0 + 0.001);
                self.bitmap.draw_column(texture_x, sprite_texture, start, sprite_height, None);
            }

            column_position += step;
        }
    }

    /// Weapon sprite, crosshair, health and ammo readouts.
    pub fn draw_hud(&mut self, hud: &Hud<'_>) {
        let textures = Arc::clone(&self.textures);
        let size = self.bitmap.size();

        let weapon = &textures[hud.player_weapon];
        let aspect_ratio = weapon.width() as f64 / weapon.height() as f64;
        let weapon_width = size.y * aspect_ratio;
        self.bitmap.draw_image(
            weapon,
            None,
            vector(size.x / 2.0 - weapon_width / 2.0, 0.0),
            vector(weapon_width, size.y),
            None,
        );

        let scale = size.y / HUD_REFERENCE_HEIGHT;
        let crosshair = &textures[Texture::Crosshair];
        let crosshair_size = crosshair.size() * scale;
        self.bitmap.draw_image(crosshair, None, (size - crosshair_size) / 2.0, crosshair_size, None);

        let safe_area = self.safe_area.rect();
        let health_icon = &textures[Texture::HealthIcon];
        let mut offset = safe_area.min + vector(1.0, 1.0) * scale;
        self.bitmap.draw_image(health_icon, None, offset, health_icon.size() * scale, None);
        offset.x += health_icon.size().x * scale;
        self.draw_text(hud.font, &hud.health_string, offset, scale, Some(hud.health_tint));

        // Right-aligned ammo, then the weapon icon to its left.
        let font = &textures[hud.font.texture];
        let glyph_width = (font.width() / hud.font.characters.len().max(1)) as f64 * scale;
        offset.x = safe_area.max.x - glyph_width * hud.ammo_string.chars().count() as f64;
        self.draw_text(hud.font, &hud.ammo_string, offset, scale, None);

        let weapon_icon = &textures[hud.weapon_icon];
        offset.x -= weapon_icon.size().x * scale;
        self.bitmap.draw_image(weapon_icon, None, offset, weapon_icon.size() * scale, None);
    }

    /// Full-screen overlay for a transition effect.
    pub fn draw_effect(&mut self, effect: &Effect) {
        match effect.kind {
            EffectType::FadeIn => self.bitmap.tint(effect.color, 1.0 - effect.progress()),
            EffectType::FadeOut => self.bitmap.tint(effect.color, effect.progress()),
            EffectType::FizzleOut => {
                let threshold = (effect.progress() * self.fizzle.len() as f64) as usize;
                let width = self.bitmap.width();
                for y in 0..self.bitmap.height() {
                    for x in 0..width {
                        let index = y / FIZZLE_GRANULARITY * width + x / FIZZLE_GRANULARITY;
                        if self.fizzle[index % self.fizzle.len()] <= threshold {
                            self.bitmap.set(x, y, effect.color);
                        }
                    }
                }
            }
        }
    }

    /// Draw `text` left to right from `origin`.
    fn draw_text(&mut self, font: &Font, text: &str, origin: Vector, scale: f64, tint: Option<Color>) {
        let textures = Arc::clone(&self.textures);
        let bitmap = &textures[font.texture];
        let glyph_size = vector((bitmap.width() / font.characters.len().max(1)) as f64, bitmap.height() as f64);
        let mut offset = origin;
        for ch in text.chars() {
            let columns = font.glyph_columns(font.glyph_index(ch), bitmap.width());
            self.bitmap.draw_image(bitmap, Some(columns), offset, glyph_size * scale, tint);
            offset.x += glyph_size.x * scale;
        }
    }
}
