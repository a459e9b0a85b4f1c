use crate::texture::Texture;

/// A looping or one-shot sequence of frames played over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub frames: &'static [Texture],
    pub duration: f64,
    pub time: f64,
}

impl Animation {
    pub const fn new(frames: &'static [Texture], duration: f64) -> Self {
        Self { frames, duration, time: 0.0 }
    }

    pub fn is_completed(&self) -> bool {
        self.time >= self.duration
    }

    /// Frame for the current time. Zero-length animations show their first
    /// frame forever.
    pub fn texture(&self) -> Texture {
        if self.duration <= 0.0 {
            return self.frames[0];
        }
        let t = (self.time % self.duration) / self.duration;
        let index = (self.frames.len() as f64 * t) as usize;
        self.frames[index.min(self.frames.len() - 1)]
    }
}

// ── Monster ───────────────────────────────────────────────────────────────

impl Animation {
    pub const MONSTER_IDLE: Self = Self::new(&[Texture::Monster], 0.0);
    pub const MONSTER_BLOCKED: Self = Self::new(&[Texture::Monster], 1.0);
    pub const MONSTER_WALK: Self = Self::new(
        &[Texture::MonsterWalk1, Texture::Monster, Texture::MonsterWalk2, Texture::Monster],
        0.5,
    );
    pub const MONSTER_SCRATCH: Self = Self::new(
        &[
            Texture::MonsterScratch1,
            Texture::MonsterScratch2,
            Texture::MonsterScratch3,
            Texture::MonsterScratch4,
            Texture::MonsterScratch5,
            Texture::MonsterScratch6,
            Texture::MonsterScratch7,
            Texture::MonsterScratch8,
        ],
        0.8,
    );
    pub const MONSTER_HURT: Self = Self::new(&[Texture::MonsterHurt], 0.2);
    pub const MONSTER_DEATH: Self = Self::new(
        &[Texture::MonsterHurt, Texture::MonsterDeath1, Texture::MonsterDeath2],
        0.5,
    );
    pub const MONSTER_DEAD: Self = Self::new(&[Texture::MonsterDead], 0.0);
}

// ── Weapons ───────────────────────────────────────────────────────────────

impl Animation {
    pub const PISTOL_IDLE: Self = Self::new(&[Texture::Pistol], 0.0);
    pub const PISTOL_FIRE: Self = Self::new(
        &[
            Texture::PistolFire1,
            Texture::PistolFire2,
            Texture::PistolFire3,
            Texture::PistolFire4,
            Texture::Pistol,
        ],
        0.5,
    );
    pub const SHOTGUN_IDLE: Self = Self::new(&[Texture::Shotgun], 0.0);
    pub const SHOTGUN_FIRE: Self = Self::new(
        &[
            Texture::ShotgunFire1,
            Texture::ShotgunFire2,
            Texture::ShotgunFire3,
            Texture::ShotgunFire4,
            Texture::Shotgun,
        ],
        0.5,
    );
}

// ── Switch ────────────────────────────────────────────────────────────────

impl Animation {
    pub const SWITCH_OFF: Self = Self::new(&[Texture::Switch1], 0.0);
    pub const SWITCH_FLIP: Self = Self::new(
        &[Texture::Switch1, Texture::Switch2, Texture::Switch3, Texture::Switch4],
        0.4,
    );
    pub const SWITCH_ON: Self = Self::new(&[Texture::Switch4], 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration_is_first_frame() {
        let mut a = Animation::MONSTER_DEAD;
        a.time = 12.0;
        assert_eq!(a.texture(), Texture::MonsterDead);
        assert!(a.is_completed());
    }

    #[test]
    fn test_frame_selection() {
        let mut a = Animation::MONSTER_WALK;
        assert_eq!(a.texture(), Texture::MonsterWalk1);
        a.time = 0.13;
        assert_eq!(a.texture(), Texture::Monster);
        a.time = 0.26;
        assert_eq!(a.texture(), Texture::MonsterWalk2);
        assert!(!a.is_completed());
    }

    #[test]
    fn test_loops_after_duration() {
        let mut a = Animation::MONSTER_WALK;
        a.time = 0.5;
        assert!(a.is_completed());
        assert_eq!(a.texture(), Texture::MonsterWalk1);
    }
}
