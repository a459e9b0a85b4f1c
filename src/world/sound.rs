/// Every audio cue the simulation can request. The platform maps each to a
/// file by [`SoundName::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundName {
    PistolFire,
    Ricochet,
    MonsterHit,
    MonsterGroan,
    MonsterDeath,
    MonsterSwipe,
    DoorSlide,
    WallSlide,
    WallThud,
    SwitchFlip,
    PlayerDeath,
    PlayerWalk,
    Squelch,
    Medkit,
    ShotgunFire,
    ShotgunPickup,
}

impl SoundName {
    pub const ALL: &'static [SoundName] = &[
        SoundName::PistolFire,
        SoundName::Ricochet,
        SoundName::MonsterHit,
        SoundName::MonsterGroan,
        SoundName::MonsterDeath,
        SoundName::MonsterSwipe,
        SoundName::DoorSlide,
        SoundName::WallSlide,
        SoundName::WallThud,
        SoundName::SwitchFlip,
        SoundName::PlayerDeath,
        SoundName::PlayerWalk,
        SoundName::Squelch,
        SoundName::Medkit,
        SoundName::ShotgunFire,
        SoundName::ShotgunPickup,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            SoundName::PistolFire => "pistol_fire",
            SoundName::Ricochet => "ricochet",
            SoundName::MonsterHit => "monster_hit",
            SoundName::MonsterGroan => "monster_groan",
            SoundName::MonsterDeath => "monster_death",
            SoundName::MonsterSwipe => "monster_swipe",
            SoundName::DoorSlide => "door_slide",
            SoundName::WallSlide => "wall_slide",
            SoundName::WallThud => "wall_thud",
            SoundName::SwitchFlip => "switch_flip",
            SoundName::PlayerDeath => "player_death",
            SoundName::PlayerWalk => "player_walk",
            SoundName::Squelch => "squelch",
            SoundName::Medkit => "medkit",
            SoundName::ShotgunFire => "shotgun_fire",
            SoundName::ShotgunPickup => "shotgun_pickup",
        }
    }
}

/// A positioned audio request produced during a tick.
///
/// `name: None` stops whatever is playing on `channel`. `channel: None`
/// means fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sound {
    pub name: Option<SoundName>,
    pub channel: Option<usize>,
    /// `0..=1`
    pub volume: f64,
    /// `-1` full left, `1` full right.
    pub pan: f64,
    /// Seconds before playback starts.
    pub delay: f64,
}
