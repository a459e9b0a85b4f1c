use std::path::PathBuf;

use crate::texture::Texture;

/// Invalid level content. Raised once, when a [`Tilemap`](crate::map::Tilemap)
/// is built, so the simulation never sees a malformed map.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level {level}: map width must be non-zero")]
    ZeroWidth { level: usize },
    #[error("level {level}: {tiles} tiles do not fill rows of width {width}")]
    RaggedTiles { level: usize, tiles: usize, width: usize },
    #[error("level {level}: {things} things but {tiles} tiles")]
    SizeMismatch { level: usize, tiles: usize, things: usize },
    #[error("level {level}: door at ({x}, {y}) lies on the map border")]
    DoorOnBorder { level: usize, x: usize, y: usize },
    #[error("level {level}: switch at ({x}, {y}) is not on a wall tile")]
    SwitchNotOnWall { level: usize, x: usize, y: usize },
    #[error("level {level}: pushwall at ({x}, {y}) sits on a wall tile")]
    PushwallOnWall { level: usize, x: usize, y: usize },
    #[error("level {level}: no player spawn and no elevator to derive one from")]
    NoSpawn { level: usize },
    #[error("unknown tile code {0}")]
    UnknownTile(u8),
    #[error("unknown thing marker {0:?}")]
    UnknownThing(char),
}

/// Failures while loading textures, levels, fonts or sounds from disk.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("image error in {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path} has no pixels")]
    EmptyImage { path: PathBuf },
    #[error("missing texture: {}", .0.name())]
    MissingTexture(Texture),
    #[error("no levels defined")]
    NoLevels,
    #[error(transparent)]
    Level(#[from] LevelError),
}

/// GPU setup failures. Fatal to the driver; the simulation never sees them.
#[derive(Debug, thiserror::Error)]
pub enum PresentError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
