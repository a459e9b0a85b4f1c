//! Grid-based raycasting shooter engine.
//!
//! The core is the tile-world simulation in [`world`] and the software
//! raycaster in [`renderer`]. [`input`], [`audio`], [`assets`] and
//! [`present`] are the thin platform layer the demo binary wires around them.

pub mod animation;
pub mod assets;
pub mod audio;
pub mod color;
pub mod config;
pub mod easing;
pub mod error;
pub mod font;
pub mod game;
pub mod geometry;
pub mod hud;
pub mod input;
pub mod logging;
pub mod map;
pub mod pathfinding;
pub mod present;
pub mod renderer;
pub mod rng;
pub mod texture;
pub mod world;

pub use color::Color;
pub use config::{EngineConfig, SafeArea};
pub use error::{AssetError, LevelError, PresentError};
pub use game::{FrameClock, Game, GameState};
pub use geometry::{Billboard, Ray, Rect, Rotation, Vector, vector};
pub use renderer::{Bitmap, Renderer, Textures};
pub use texture::Texture;
