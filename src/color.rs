use bytemuck::{Pod, Zeroable};

/// 8-bit RGBA pixel. Laid out so a `&[Color]` can be handed to the GPU as
/// raw `Rgba8` bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const CLEAR: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(192, 192, 192);
    pub const RED: Self = Self::rgb(217, 87, 99);
    pub const GREEN: Self = Self::rgb(153, 229, 80);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(251, 242, 54);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Multiply every channel by `color`, truncating.
    pub fn tinted(self, color: Color) -> Self {
        let mul = |a: u8, b: u8| ((a as u16 * b as u16) / 255) as u8;
        Self {
            r: mul(self.r, color.r),
            g: mul(self.g, color.g),
            b: mul(self.b, color.b),
            a: mul(self.a, color.a),
        }
    }

    /// `self × (1 - a) + src × a` per channel, where `a` is `src`'s alpha.
    ///
    /// Each term is truncated to 8 bits before the sum so results are
    /// bit-for-bit reproducible.
    pub fn blended(self, src: Color) -> Self {
        match src.a {
            0 => self,
            255 => src,
            a => {
                let alpha = a as f64 / 255.0;
                let inverse = 1.0 - alpha;
                let mix = |dst: u8, src: u8| {
                    ((dst as f64 * inverse) as u8).saturating_add((src as f64 * alpha) as u8)
                };
                Self::rgb(mix(self.r, src.r), mix(self.g, src.g), mix(self.b, src.b))
            }
        }
    }
}
