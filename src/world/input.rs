use crate::geometry::Rotation;

/// Per-tick player intent, already converted from device events by the
/// platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Input {
    /// Forward (`+`) or backward (`-`) fraction of full speed.
    pub speed: f64,
    /// Turn to apply this tick.
    pub rotation: Rotation,
    /// Edge-triggered trigger pull.
    pub is_firing: bool,
}

impl Input {
    pub fn new(speed: f64, rotation: Rotation, is_firing: bool) -> Self {
        Self { speed, rotation, is_firing }
    }
}
