use crate::color::Color;
use crate::easing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectType {
    /// Starts as `color` and clears.
    FadeIn,
    /// Starts clear and fills with `color`.
    FadeOut,
    /// Dissolves to `color` block by block.
    FizzleOut,
}

/// Full-screen transition overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub kind: EffectType,
    pub color: Color,
    pub duration: f64,
    pub time: f64,
}

impl Effect {
    pub const fn new(kind: EffectType, color: Color, duration: f64) -> Self {
        Self { kind, color, duration, time: 0.0 }
    }

    pub fn is_completed(&self) -> bool {
        self.time >= self.duration
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let t = if self.duration > 0.0 { (self.time / self.duration).min(1.0) } else { 1.0 };
        match self.kind {
            EffectType::FadeIn => easing::ease_in(t),
            EffectType::FadeOut => easing::ease_out(t),
            EffectType::FizzleOut => easing::ease_in_ease_out(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_at_duration() {
        for kind in [EffectType::FadeIn, EffectType::FadeOut, EffectType::FizzleOut] {
            let mut effect = Effect::new(kind, Color::RED, 0.5);
            assert_eq!(effect.progress(), 0.0);
            effect.time = 0.5;
            assert!(effect.is_completed());
            assert_eq!(effect.progress(), 1.0);
            effect.time = 3.0;
            assert_eq!(effect.progress(), 1.0);
        }
    }
}
