//! Keyboard capture and the action map that turns it into per-tick [`Input`].

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

use crate::geometry::Rotation;
use crate::world::{Input, Player};

/// A physical source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// What the player can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Fire,
}

/// Raw device state for a single frame.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        if self.mouse_held.insert(button) {
            self.mouse_pressed.insert(button);
        }
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
    }

    /// Forget this frame's edges. Held state carries over.
    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_mouse_held(&self, button: MouseButton) -> bool { self.mouse_held.contains(&button) }
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool { self.mouse_pressed.contains(&button) }
}

/// Maps logical actions to one or more physical inputs.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        self.bindings.entry(action).or_default().push(source);
    }

    /// True if any bound source went down this frame.
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_pressed(*k),
                InputSource::Mouse(b) => input.is_mouse_pressed(*b),
            })
        })
    }

    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_held(*k),
                InputSource::Mouse(b) => input.is_mouse_held(*b),
            })
        })
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

impl ActionMap<Action> {
    /// Arrow keys or WASD to move, space, ctrl or left click to fire.
    pub fn with_default_bindings() -> Self {
        let mut map = Self::new();
        for key in [KeyCode::ArrowUp, KeyCode::KeyW] {
            map.bind(Action::Forward, InputSource::Key(key));
        }
        for key in [KeyCode::ArrowDown, KeyCode::KeyS] {
            map.bind(Action::Backward, InputSource::Key(key));
        }
        for key in [KeyCode::ArrowLeft, KeyCode::KeyA] {
            map.bind(Action::TurnLeft, InputSource::Key(key));
        }
        for key in [KeyCode::ArrowRight, KeyCode::KeyD] {
            map.bind(Action::TurnRight, InputSource::Key(key));
        }
        for key in [KeyCode::Space, KeyCode::ControlLeft] {
            map.bind(Action::Fire, InputSource::Key(key));
        }
        map.bind(Action::Fire, InputSource::Mouse(MouseButton::Left));
        map
    }

    /// Core input for one frame. `time_step` is the simulation sub-step the
    /// turn is spread over; firing is edge-triggered.
    pub fn to_input(&self, state: &InputState, time_step: f64) -> Input {
        let axis = |positive: Action, negative: Action| {
            f64::from(self.is_held(positive, state) as u8) - f64::from(self.is_held(negative, state) as u8)
        };
        let speed = axis(Action::Forward, Action::Backward);
        let angle = axis(Action::TurnRight, Action::TurnLeft) * Player::TURNING_SPEED * time_step;
        let (sine, cosine) = angle.sin_cos();
        Input::new(speed, Rotation::new(sine, cosine), self.is_pressed(Action::Fire, state))
    }
}
