//! Level data: tiles, spawn markers, and the procedural dresser that turns
//! authored [`MapData`] into a validated [`Tilemap`].

mod generator;
mod thing;
mod tile;
mod tilemap;

pub use generator::{MapData, MapGenerator};
pub use thing::Thing;
pub use tile::Tile;
pub use tilemap::Tilemap;
