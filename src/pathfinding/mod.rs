mod astar;

pub use astar::{Graph, find_path};
