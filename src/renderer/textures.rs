use std::collections::HashMap;
use std::ops::Index;

use crate::color::Color;
use crate::renderer::Bitmap;
use crate::texture::Texture;

/// Read-only lookup from [`Texture`] id to bitmap. Always complete: every id
/// in [`Texture::ALL`] has an entry.
#[derive(Debug, Clone)]
pub struct Textures {
    textures: HashMap<Texture, Bitmap>,
}

impl Textures {
    pub fn new(mut loader: impl FnMut(Texture) -> Bitmap) -> Self {
        let textures = Texture::ALL.iter().map(|&texture| (texture, loader(texture))).collect();
        Self { textures }
    }

    pub fn try_new<E>(mut loader: impl FnMut(Texture) -> Result<Bitmap, E>) -> Result<Self, E> {
        let textures = Texture::ALL
            .iter()
            .map(|&texture| loader(texture).map(|bitmap| (texture, bitmap)))
            .collect::<Result<_, E>>()?;
        Ok(Self { textures })
    }

    /// Procedurally drawn stand-ins, used when no asset folder is present
    /// and by tests.
    pub fn placeholder() -> Self {
        Self::new(placeholder)
    }
}

impl Index<Texture> for Textures {
    type Output = Bitmap;

    fn index(&self, texture: Texture) -> &Bitmap {
        match self.textures.get(&texture) {
            Some(bitmap) => bitmap,
            None => panic!("missing texture: {}", texture.name()),
        }
    }
}

// ── Placeholders ──────────────────────────────────────────────────────────

const SIZE: usize = 16;

fn placeholder(texture: Texture) -> Bitmap {
    use Texture::*;
    match texture {
        Wall | CrackWall | SlimeWall => bricks(Color::rgb(140, 140, 150), Color::rgb(90, 90, 100)),
        Wall2 | CrackWall2 | SlimeWall2 => bricks(Color::rgb(110, 110, 120), Color::rgb(70, 70, 80)),
        ElevatorSideWall | ElevatorBackWall => bricks(Color::rgb(160, 150, 90), Color::rgb(120, 110, 60)),
        Floor | CrackFloor | ElevatorFloor => checker(Color::rgb(80, 70, 60), Color::rgb(60, 50, 45)),
        Ceiling | ElevatorCeiling => checker(Color::rgb(50, 50, 60), Color::rgb(40, 40, 50)),
        Door | Door2 => solid(Color::rgb(60, 90, 140)),
        DoorJamb | DoorJamb2 => solid(Color::rgb(50, 50, 50)),
        Switch1 => panel(Color::RED),
        Switch2 | Switch3 => panel(Color::YELLOW),
        Switch4 => panel(Color::GREEN),
        Monster | MonsterWalk1 | MonsterWalk2 => blob(Color::rgb(60, 160, 60)),
        MonsterScratch1 | MonsterScratch2 | MonsterScratch3 | MonsterScratch4 | MonsterScratch5
        | MonsterScratch6 | MonsterScratch7 | MonsterScratch8 => blob(Color::rgb(90, 200, 60)),
        MonsterHurt | MonsterDeath1 | MonsterDeath2 => blob(Color::RED),
        MonsterDead => blob(Color::rgb(100, 30, 30)),
        Pistol | PistolFire1 | PistolFire2 | PistolFire3 | PistolFire4 => blob(Color::GRAY),
        Shotgun | ShotgunFire1 | ShotgunFire2 | ShotgunFire3 | ShotgunFire4 => blob(Color::rgb(120, 80, 40)),
        Medkit => blob(Color::WHITE),
        ShotgunPickup => blob(Color::rgb(120, 80, 40)),
        Crosshair | HealthIcon | PistolIcon | ShotgunIcon => small(Color::WHITE),
        Font => glyph_strip(Color::WHITE),
        TitleBackground => checker(Color::rgb(30, 0, 0), Color::rgb(50, 0, 0)),
        TitleLogo => solid(Color::RED),
    }
}

fn solid(color: Color) -> Bitmap {
    Bitmap::new(SIZE, SIZE, color)
}

fn checker(a: Color, b: Color) -> Bitmap {
    let pixels = (0..SIZE * SIZE)
        .map(|i| if ((i % SIZE) / 4 + (i / SIZE) / 4) % 2 == 0 { a } else { b })
        .collect();
    Bitmap::from_pixels(SIZE, pixels)
}

fn bricks(brick: Color, mortar: Color) -> Bitmap {
    let pixels = (0..SIZE * SIZE)
        .map(|i| {
            let (x, y) = (i % SIZE, i / SIZE);
            let shift = if (y / 4) % 2 == 0 { 0 } else { 4 };
            if y % 4 == 3 || (x + shift) % 8 == 7 { mortar } else { brick }
        })
        .collect();
    Bitmap::from_pixels(SIZE, pixels)
}

fn panel(light: Color) -> Bitmap {
    let mut bitmap = Bitmap::new(SIZE, SIZE, Color::CLEAR);
    for y in 6..10 {
        for x in 6..10 {
            bitmap.set(x, y, light);
        }
    }
    bitmap
}

/// Transparent square with a filled circle in the middle.
fn blob(color: Color) -> Bitmap {
    let centre = SIZE as f64 / 2.0 - 0.5;
    let pixels = (0..SIZE * SIZE)
        .map(|i| {
            let dx = (i % SIZE) as f64 - centre;
            let dy = (i / SIZE) as f64 - centre;
            if dx * dx + dy * dy < 36.0 { color } else { Color::CLEAR }
        })
        .collect();
    Bitmap::from_pixels(SIZE, pixels)
}

/// Glyph slots of the bundled `font.json`.
const FONT_GLYPHS: usize = 40;

/// One 3×5 block per glyph slot, separated by clear columns.
fn glyph_strip(color: Color) -> Bitmap {
    let mut bitmap = Bitmap::new(FONT_GLYPHS * 4, 6, Color::CLEAR);
    // Slot 0 is the space.
    for glyph in 1..FONT_GLYPHS {
        for y in 0..5 {
            for x in 0..3 {
                bitmap.set(glyph * 4 + x, y, color);
            }
        }
    }
    bitmap
}

fn small(color: Color) -> Bitmap {
    let mut bitmap = Bitmap::new(8, 8, Color::CLEAR);
    for i in 2..6 {
        bitmap.set(i, 3, color);
        bitmap.set(i, 4, color);
    }
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_complete() {
        let textures = Textures::placeholder();
        for &texture in Texture::ALL {
            assert!(textures[texture].width() > 0, "{texture:?}");
        }
        assert!(textures[Texture::Wall].is_opaque());
        assert!(!textures[Texture::Monster].is_opaque());
    }

    #[test]
    fn test_try_new_propagates() {
        let result = Textures::try_new(|texture| {
            if texture == Texture::Medkit { Err(texture) } else { Ok(Bitmap::new(1, 1, Color::BLACK)) }
        });
        assert_eq!(result.unwrap_err(), Texture::Medkit);
    }
}
