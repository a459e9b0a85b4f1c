use serde::Deserialize;
use tracing::{debug, info};

use crate::error::LevelError;
use crate::map::{Thing, Tile, Tilemap};
use crate::pathfinding::Graph;
use crate::rng::Rng;

/// Monsters never spawn closer than this (in tiles, Manhattan) to the
/// player.
const MIN_MONSTER_DISTANCE: f64 = 3.0;

/// Authored level as stored on disk, before procedural dressing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapData {
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub things: Option<Vec<Thing>>,
    pub width: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub monsters: Option<usize>,
    #[serde(default)]
    pub medkits: Option<usize>,
    #[serde(default)]
    pub shotguns: Option<usize>,
    #[serde(default)]
    pub pushwalls: Option<usize>,
    #[serde(default)]
    pub doors: Option<usize>,
}

/// Deterministic dressing of a [`MapData`] skeleton.
///
/// The same data and seed always produce the same [`Tilemap`].
pub struct MapGenerator {
    map: Tilemap,
    rng: Rng,
    /// Open, unoccupied cells in row-major order.
    empty: Vec<(usize, usize)>,
}

impl MapGenerator {
    pub fn generate(data: &MapData, index: usize) -> Result<Tilemap, LevelError> {
        let things = data
            .things
            .clone()
            .unwrap_or_else(|| vec![Thing::Nothing; data.tiles.len()]);
        let seed = data.seed.unwrap_or(0);
        let map = Tilemap::unchecked(data.tiles.clone(), things, data.width, index, seed)?;

        let mut generator = Self { map, rng: Rng::new(seed), empty: Vec::new() };
        generator.collect_empty();

        let spawn = generator.place_spawn()?;
        let doors = generator.place_doors(data.doors.unwrap_or(0));
        let pushwalls = generator.place_pushwalls(data.pushwalls.unwrap_or(0));

        // Everything after this point must be reachable from the spawn.
        generator.retain_reachable(spawn);
        let monsters = generator.place(Thing::Monster, data.monsters.unwrap_or(0), |map, cell| {
            map.estimate_distance(to_node(cell), to_node(spawn)) > MIN_MONSTER_DISTANCE
        });
        let medkits = generator.place(Thing::Medkit, data.medkits.unwrap_or(0), |_, _| true);
        let shotguns = generator.place(Thing::Shotgun, data.shotguns.unwrap_or(0), |_, _| true);

        generator.map.validate()?;
        info!(
            level = index,
            seed, doors, pushwalls, monsters, medkits, shotguns, "generated level"
        );
        Ok(generator.map)
    }

    fn collect_empty(&mut self) {
        let map = &self.map;
        self.empty = (0..map.height())
            .flat_map(|y| (0..map.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                let tile = map.tile(x, y);
                !tile.is_wall() && tile != Tile::ElevatorFloor && map.thing(x, y) == Thing::Nothing
            })
            .collect();
    }

    /// Existing `@` marker, or a random empty cell reachable from the
    /// elevator.
    fn place_spawn(&mut self) -> Result<(usize, usize), LevelError> {
        let map = &self.map;
        let existing = (0..map.height())
            .flat_map(|y| (0..map.width()).map(move |x| (x, y)))
            .find(|&(x, y)| map.thing(x, y) == Thing::Player);
        if let Some(spawn) = existing {
            return Ok(spawn);
        }

        let level = map.index();
        let elevator = (0..map.height())
            .flat_map(|y| (0..map.width()).map(move |x| (x, y)))
            .find(|&(x, y)| map.tile(x, y) == Tile::ElevatorFloor)
            .ok_or(LevelError::NoSpawn { level })?;

        let candidates: Vec<_> = self
            .empty
            .iter()
            .copied()
            .filter(|&cell| self.is_reachable(elevator, cell))
            .collect();
        let spawn = *self.rng.choose(&candidates).ok_or(LevelError::NoSpawn { level })?;
        self.occupy(spawn, Thing::Player);
        debug!(level, x = spawn.0, y = spawn.1, "derived player spawn from elevator");
        Ok(spawn)
    }

    /// Doors go on interior cells flanked by walls on exactly one axis.
    fn place_doors(&mut self, count: usize) -> usize {
        let map = &self.map;
        let candidates: Vec<_> = self
            .empty
            .iter()
            .copied()
            .filter(|&(x, y)| {
                if map.is_border(x, y) {
                    return false;
                }
                let (x, y) = (x as i32, y as i32);
                let wall = |dx: i32, dy: i32| map.get(x + dx, y + dy).is_wall();
                let horizontal = wall(-1, 0) && wall(1, 0) && !wall(0, -1) && !wall(0, 1);
                let vertical = wall(0, -1) && wall(0, 1) && !wall(-1, 0) && !wall(1, 0);
                horizontal || vertical
            })
            .collect();
        self.place_from(candidates, Thing::Door, count)
    }

    /// Pushwalls need walls on both sides of one axis and two open cells in
    /// each direction along the other, so there is room to push and to
    /// slide. No two sliding things end up side by side.
    fn place_pushwalls(&mut self, count: usize) -> usize {
        let map = &self.map;
        let mut candidates: Vec<_> = self
            .empty
            .iter()
            .copied()
            .filter(|&(x, y)| {
                let (x, y) = (x as i32, y as i32);
                let wall = |dx: i32, dy: i32| map.get(x + dx, y + dy).is_wall();
                let clear = |dx: i32, dy: i32| {
                    (1..=2).all(|n| !wall(dx * n, dy * n) && !wall(-dx * n, -dy * n))
                };
                (wall(-1, 0) && wall(1, 0) && clear(0, 1))
                    || (wall(0, -1) && wall(0, 1) && clear(1, 0))
            })
            .filter(|&cell| !has_sliding_neighbour(map, cell))
            .collect();

        let mut placed = 0;
        while placed < count {
            let Some(i) = self.rng.index(candidates.len()) else {
                break;
            };
            let cell = candidates.remove(i);
            self.occupy(cell, Thing::Pushwall);
            placed += 1;
            candidates.retain(|&c| !has_sliding_neighbour(&self.map, c));
        }
        placed
    }

    fn place(
        &mut self,
        thing: Thing,
        count: usize,
        accept: impl Fn(&Tilemap, (usize, usize)) -> bool,
    ) -> usize {
        let candidates: Vec<_> = self.empty.iter().copied().filter(|&c| accept(&self.map, c)).collect();
        self.place_from(candidates, thing, count)
    }

    fn place_from(&mut self, mut candidates: Vec<(usize, usize)>, thing: Thing, count: usize) -> usize {
        let mut placed = 0;
        while placed < count {
            let Some(i) = self.rng.index(candidates.len()) else {
                break;
            };
            let cell = candidates.remove(i);
            self.occupy(cell, thing);
            placed += 1;
        }
        placed
    }

    fn occupy(&mut self, cell: (usize, usize), thing: Thing) {
        self.map.set_thing(cell.0, cell.1, thing);
        self.empty.retain(|&c| c != cell);
    }

    fn retain_reachable(&mut self, from: (usize, usize)) {
        let empty = std::mem::take(&mut self.empty);
        self.empty = empty.into_iter().filter(|&c| self.is_reachable(from, c)).collect();
    }

    fn is_reachable(&self, from: (usize, usize), to: (usize, usize)) -> bool {
        from == to || !self.map.find_path(to_node(from), to_node(to), self.search_limit()).is_empty()
    }

    fn search_limit(&self) -> f64 {
        (self.map.width() * self.map.height()) as f64
    }
}

fn to_node((x, y): (usize, usize)) -> (i32, i32) {
    (x as i32, y as i32)
}

/// A door or pushwall directly above, below, left or right of `(x, y)`.
fn has_sliding_neighbour(map: &Tilemap, (x, y): (usize, usize)) -> bool {
    [(x.wrapping_sub(1), y), (x + 1, y), (x, y.wrapping_sub(1)), (x, y + 1)]
        .into_iter()
        .filter(|&(nx, ny)| nx < map.width() && ny < map.height())
        .any(|(nx, ny)| matches!(map.thing(nx, ny), Thing::Door | Thing::Pushwall))
}
