#![allow(dead_code)]

use rampage::map::{Thing, Tile, Tilemap};
use rampage::world::{Input, Sound, SoundName, World, WorldAction};
use rampage::Rotation;

pub const TIME_STEP: f64 = 1.0 / 120.0;

/// Build a level from ASCII rows.
///
/// `#` wall, `.` floor, `E` elevator floor. Thing markers (`@ * | < + /`)
/// sit on floor; `l` is a switch on a wall.
pub fn level(rows: &[&str]) -> Tilemap {
    level_at(rows, 0)
}

/// [`level`] with an explicit position in the level list.
pub fn level_at(rows: &[&str], index: usize) -> Tilemap {
    let width = rows[0].len();
    let mut tiles = Vec::new();
    let mut things = Vec::new();
    for row in rows {
        assert_eq!(row.len(), width, "ragged row {row:?}");
        for ch in row.chars() {
            let (tile, thing) = match ch {
                '#' => (Tile::Wall, Thing::Nothing),
                '.' => (Tile::Floor, Thing::Nothing),
                'E' => (Tile::ElevatorFloor, Thing::Nothing),
                'l' => (Tile::Wall, Thing::Switch),
                marker => (Tile::Floor, Thing::try_from(marker).expect("thing marker")),
            };
            tiles.push(tile);
            things.push(thing);
        }
    }
    Tilemap::new(tiles, things, width, index, 0).expect("valid test level")
}

pub fn world(rows: &[&str]) -> World {
    World::new(level(rows))
}

pub fn idle() -> Input {
    Input::default()
}

pub fn forward() -> Input {
    Input::new(1.0, Rotation::IDENTITY, false)
}

pub fn backward() -> Input {
    Input::new(-1.0, Rotation::IDENTITY, false)
}

pub fn fire() -> Input {
    Input::new(0.0, Rotation::IDENTITY, true)
}

/// Sounds carried by an action, if it is a `PlaySounds`.
pub fn sounds(action: &Option<WorldAction>) -> &[Sound] {
    match action {
        Some(WorldAction::PlaySounds(sounds)) => sounds,
        _ => &[],
    }
}

pub fn names(sounds: &[Sound]) -> Vec<SoundName> {
    sounds.iter().filter_map(|sound| sound.name).collect()
}

/// Tick until `done` holds or `limit` seconds pass. Returns the elapsed
/// time and every sound queued on the way.
pub fn run_until(
    world: &mut World,
    input: Input,
    limit: f64,
    mut done: impl FnMut(&World) -> bool,
) -> (f64, Vec<Sound>) {
    let mut elapsed = 0.0;
    let mut heard = Vec::new();
    while !done(world) {
        assert!(elapsed < limit, "condition not reached within {limit}s");
        let action = world.update(TIME_STEP, &input);
        heard.extend_from_slice(sounds(&action));
        elapsed += TIME_STEP;
    }
    (elapsed, heard)
}
