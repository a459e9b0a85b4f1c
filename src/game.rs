//! Top-level state machine: title screen, start transition, and play.

use tracing::info;

use crate::color::Color;
use crate::error::AssetError;
use crate::font::Font;
use crate::hud::Hud;
use crate::map::Tilemap;
use crate::world::{Effect, EffectType, Input, World, WorldAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Title,
    Starting,
    Playing,
}

const TRANSITION_DURATION: f64 = 0.5;

pub struct Game {
    levels: Vec<Tilemap>,
    font: Font,
    world: World,
    state: GameState,
    transition: Option<Effect>,
}

impl Game {
    pub const TITLE_TEXT: &'static str = "PRESS FIRE TO START";

    pub fn new(levels: Vec<Tilemap>, font: Font) -> Result<Self, AssetError> {
        let first = levels.first().cloned().ok_or(AssetError::NoLevels)?;
        Ok(Self {
            levels,
            font,
            world: World::new(first),
            state: GameState::Title,
            transition: None,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn levels(&self) -> &[Tilemap] {
        &self.levels
    }

    /// Screen transition between title and play, if one is running.
    pub fn transition(&self) -> Option<&Effect> {
        self.transition.as_ref()
    }

    pub fn hud(&self) -> Hud<'_> {
        Hud::new(self.world.player(), &self.font)
    }

    /// One fixed simulation step.
    ///
    /// Level loads are applied here; the returned `LoadLevel` carries the
    /// wrapped index so the caller can reset audio.
    pub fn update(&mut self, time_step: f64, input: &Input) -> Option<WorldAction> {
        if let Some(effect) = &mut self.transition {
            effect.time += time_step;
        }

        match self.state {
            GameState::Title => {
                if input.is_firing {
                    self.transition = Some(Effect::new(EffectType::FadeOut, Color::BLACK, TRANSITION_DURATION));
                    self.state = GameState::Starting;
                }
                None
            }
            GameState::Starting => {
                if self.transition.is_some_and(|effect| effect.is_completed()) {
                    self.transition = Some(Effect::new(EffectType::FadeIn, Color::BLACK, TRANSITION_DURATION));
                    self.state = GameState::Playing;
                    info!("game started");
                }
                None
            }
            GameState::Playing => {
                if self.transition.is_some_and(|effect| effect.is_completed()) {
                    self.transition = None;
                }
                match self.world.update(time_step, input)? {
                    WorldAction::LoadLevel(index) => {
                        let index = index % self.levels.len();
                        self.world.set_level(self.levels[index].clone());
                        Some(WorldAction::LoadLevel(index))
                    }
                    sounds => Some(sounds),
                }
            }
        }
    }

    /// Simulate `elapsed` wall-clock seconds in fixed sub-steps. The fire
    /// trigger only counts for the first sub-step.
    pub fn advance(&mut self, clock: &FrameClock, elapsed: f64, input: Input) -> Vec<WorldAction> {
        let (steps, time_step) = clock.steps(elapsed);
        let mut input = input;
        let mut actions = Vec::new();
        for _ in 0..steps {
            actions.extend(self.update(time_step, &input));
            input.is_firing = false;
        }
        actions
    }
}

/// Splits a frame's elapsed time into equal simulation sub-steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    /// Longest slice simulated per frame. Longer stalls are dropped.
    pub max_time_step: f64,
    /// Largest allowed sub-step.
    pub world_time_step: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self { max_time_step: 1.0 / 20.0, world_time_step: 1.0 / 120.0 }
    }
}

impl FrameClock {
    pub fn new(max_time_step: f64, world_time_step: f64) -> Self {
        Self { max_time_step, world_time_step }
    }

    /// `(count, size)` of the sub-steps covering `elapsed`.
    pub fn steps(&self, elapsed: f64) -> (usize, f64) {
        let time_step = elapsed.clamp(0.0, self.max_time_step);
        let steps = (time_step / self.world_time_step).ceil();
        if steps <= 0.0 {
            return (0, 0.0);
        }
        (steps as usize, time_step / steps)
    }
}
