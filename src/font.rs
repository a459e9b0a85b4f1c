use serde::Deserialize;

use crate::texture::Texture;

/// Bitmap font: one texture sliced into equal-width glyph columns, in the
/// order given by `characters`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Font {
    pub texture: Texture,
    pub characters: Vec<String>,
}

impl Font {
    /// Glyph slot for `ch`. Unknown characters fall back to the first glyph.
    pub fn glyph_index(&self, ch: char) -> usize {
        self.characters
            .iter()
            .position(|glyph| glyph.chars().eq(std::iter::once(ch)))
            .unwrap_or(0)
    }

    /// Column range of glyph `index` in a font texture `width` pixels wide.
    pub fn glyph_columns(&self, index: usize, width: usize) -> std::ops::Range<usize> {
        let step = width / self.characters.len().max(1);
        index * step..(index + 1) * step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> Font {
        serde_json::from_str(r#"{ "texture": "font", "characters": ["0","1","2","3"] }"#).unwrap()
    }

    #[test]
    fn test_glyph_lookup() {
        let font = digits();
        assert_eq!(font.texture, Texture::Font);
        assert_eq!(font.glyph_index('2'), 2);
        assert_eq!(font.glyph_index('x'), 0);
    }

    #[test]
    fn test_glyph_columns() {
        let font = digits();
        assert_eq!(font.glyph_columns(1, 16), 4..8);
    }
}
