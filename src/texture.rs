//! Texture identifiers.
//!
//! Every bitmap the renderer can draw is named here. The asset loader maps
//! each id to a PNG file stem via [`Texture::name`].

use serde::Deserialize;

macro_rules! textures {
    ($($variant:ident => $name:literal),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Texture {
            $($variant),*
        }

        impl Texture {
            pub const ALL: &'static [Texture] = &[$(Texture::$variant),*];

            /// File stem of the backing image, e.g. `"monster_walk1"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Texture::$variant => $name),*
                }
            }
        }
    };
}

textures! {
    // walls, floors, ceilings
    Wall => "wall",
    Wall2 => "wall2",
    CrackWall => "crack_wall",
    CrackWall2 => "crack_wall2",
    SlimeWall => "slime_wall",
    SlimeWall2 => "slime_wall2",
    Floor => "floor",
    CrackFloor => "crack_floor",
    Ceiling => "ceiling",
    ElevatorFloor => "elevator_floor",
    ElevatorCeiling => "elevator_ceiling",
    ElevatorSideWall => "elevator_side_wall",
    ElevatorBackWall => "elevator_back_wall",

    // doors and switches
    Door => "door",
    Door2 => "door2",
    DoorJamb => "door_jamb",
    DoorJamb2 => "door_jamb2",
    Switch1 => "switch1",
    Switch2 => "switch2",
    Switch3 => "switch3",
    Switch4 => "switch4",

    // monster
    Monster => "monster",
    MonsterWalk1 => "monster_walk1",
    MonsterWalk2 => "monster_walk2",
    MonsterScratch1 => "monster_scratch1",
    MonsterScratch2 => "monster_scratch2",
    MonsterScratch3 => "monster_scratch3",
    MonsterScratch4 => "monster_scratch4",
    MonsterScratch5 => "monster_scratch5",
    MonsterScratch6 => "monster_scratch6",
    MonsterScratch7 => "monster_scratch7",
    MonsterScratch8 => "monster_scratch8",
    MonsterHurt => "monster_hurt",
    MonsterDeath1 => "monster_death1",
    MonsterDeath2 => "monster_death2",
    MonsterDead => "monster_dead",

    // weapons
    Pistol => "pistol",
    PistolFire1 => "pistol_fire1",
    PistolFire2 => "pistol_fire2",
    PistolFire3 => "pistol_fire3",
    PistolFire4 => "pistol_fire4",
    Shotgun => "shotgun",
    ShotgunFire1 => "shotgun_fire1",
    ShotgunFire2 => "shotgun_fire2",
    ShotgunFire3 => "shotgun_fire3",
    ShotgunFire4 => "shotgun_fire4",

    // pickups
    Medkit => "medkit",
    ShotgunPickup => "shotgun_pickup",

    // hud and title
    Crosshair => "crosshair",
    HealthIcon => "health_icon",
    PistolIcon => "pistol_icon",
    ShotgunIcon => "shotgun_icon",
    Font => "font",
    TitleBackground => "title_background",
    TitleLogo => "title_logo",
}
