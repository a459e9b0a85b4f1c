//! Loading textures, levels and the font from the asset directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::color::Color;
use crate::error::AssetError;
use crate::font::Font;
use crate::map::{MapData, MapGenerator, Tilemap};
use crate::renderer::{Bitmap, Textures};

/// Build the texture table from the PNGs under `folder`, matched to
/// [`Texture`](crate::texture::Texture) ids by file stem.
///
/// A missing folder yields the procedural placeholders. An existing folder
/// must provide every texture.
pub fn load_textures(folder: &Path) -> Result<Textures, AssetError> {
    if !folder.is_dir() {
        warn!(folder = %folder.display(), "texture folder not found, using placeholders");
        return Ok(Textures::placeholder());
    }

    let mut files: HashMap<String, PathBuf> = HashMap::new();
    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("png") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
        // First file with a given stem wins.
        if files.contains_key(stem) {
            warn!(path = %path.display(), "duplicate texture name, skipping");
            continue;
        }
        files.insert(stem.to_string(), path.to_path_buf());
    }

    let textures = Textures::try_new(|texture| {
        let path = files.get(texture.name()).ok_or(AssetError::MissingTexture(texture))?;
        load_bitmap(path)
    })?;
    info!(count = files.len(), folder = %folder.display(), "textures loaded");
    Ok(textures)
}

/// Decode one image file into a bitmap.
pub fn load_bitmap(path: &Path) -> Result<Bitmap, AssetError> {
    let image = image::open(path)
        .map_err(|source| AssetError::Image { path: path.to_path_buf(), source })?
        .to_rgba8();
    to_bitmap(path, &image)
}

fn to_bitmap(path: &Path, image: &RgbaImage) -> Result<Bitmap, AssetError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(AssetError::EmptyImage { path: path.to_path_buf() });
    }
    let pixels = image.pixels().map(|p| Color::rgba(p[0], p[1], p[2], p[3])).collect();
    Ok(Bitmap::from_pixels(image.width() as usize, pixels))
}

/// Read the level list and dress each level with [`MapGenerator`].
pub fn load_levels(path: &Path) -> Result<Vec<Tilemap>, AssetError> {
    let data: Vec<MapData> = load_json(path)?;
    if data.is_empty() {
        return Err(AssetError::NoLevels);
    }
    let levels = data
        .iter()
        .enumerate()
        .map(|(index, level)| MapGenerator::generate(level, index))
        .collect::<Result<Vec<_>, _>>()?;
    info!(count = levels.len(), path = %path.display(), "levels loaded");
    Ok(levels)
}

pub fn load_font(path: &Path) -> Result<Font, AssetError> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AssetError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| AssetError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text).map_err(|source| AssetError::Json { path: path.to_path_buf(), source })
}
