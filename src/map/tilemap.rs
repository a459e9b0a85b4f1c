use crate::error::LevelError;
use crate::geometry::{Ray, Vector, vector};
use crate::map::{Thing, Tile};
use crate::pathfinding::Graph;

/// Immutable tile grid plus the spawn markers of one level.
///
/// Always valid once constructed: every structural rule is checked in
/// [`Tilemap::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap {
    tiles: Vec<Tile>,
    things: Vec<Thing>,
    width: usize,
    index: usize,
    seed: u64,
}

impl Tilemap {
    pub fn new(
        tiles: Vec<Tile>,
        things: Vec<Thing>,
        width: usize,
        index: usize,
        seed: u64,
    ) -> Result<Self, LevelError> {
        let map = Self::unchecked(tiles, things, width, index, seed)?;
        map.validate()?;
        Ok(map)
    }

    /// Grid-shape checks only. The generator fills in markers before the
    /// full validation runs.
    pub(super) fn unchecked(
        tiles: Vec<Tile>,
        things: Vec<Thing>,
        width: usize,
        index: usize,
        seed: u64,
    ) -> Result<Self, LevelError> {
        if width == 0 || tiles.is_empty() {
            return Err(LevelError::ZeroWidth { level: index });
        }
        if tiles.len() % width != 0 {
            return Err(LevelError::RaggedTiles { level: index, tiles: tiles.len(), width });
        }
        if things.len() != tiles.len() {
            return Err(LevelError::SizeMismatch {
                level: index,
                tiles: tiles.len(),
                things: things.len(),
            });
        }
        Ok(Self { tiles, things, width, index, seed })
    }

    pub(super) fn validate(&self) -> Result<(), LevelError> {
        let level = self.index;
        let mut has_player = false;
        for y in 0..self.height() {
            for x in 0..self.width {
                let tile = self.tile(x, y);
                match self.thing(x, y) {
                    Thing::Player => has_player = true,
                    Thing::Door if self.is_border(x, y) => {
                        return Err(LevelError::DoorOnBorder { level, x, y });
                    }
                    Thing::Switch if !tile.is_wall() => {
                        return Err(LevelError::SwitchNotOnWall { level, x, y });
                    }
                    Thing::Pushwall if tile.is_wall() => {
                        return Err(LevelError::PushwallOnWall { level, x, y });
                    }
                    _ => {}
                }
            }
        }
        if !has_player {
            return Err(LevelError::NoSpawn { level });
        }
        Ok(())
    }

    pub(super) fn set_thing(&mut self, x: usize, y: usize, thing: Thing) {
        self.things[y * self.width + x] = thing;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.tiles.len() / self.width
    }

    pub fn size(&self) -> Vector {
        vector(self.width as f64, self.height() as f64)
    }

    /// Position of this level in the game's level list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tile(&self, x: usize, y: usize) -> Tile {
        self.tiles[y * self.width + x]
    }

    pub fn thing(&self, x: usize, y: usize) -> Thing {
        self.things[y * self.width + x]
    }

    /// Signed lookup. Anything outside the grid reads as solid wall.
    pub fn get(&self, x: i32, y: i32) -> Tile {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height() {
            return Tile::Wall;
        }
        self.tile(x as usize, y as usize)
    }

    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height()
    }

    /// Cell containing `position`. A point lying exactly on a grid line is
    /// attributed to the cell the ray travelling along `direction` is
    /// entering.
    pub fn tile_coords(&self, position: Vector, direction: Vector) -> (i32, i32) {
        let mut offset_x = 0;
        let mut offset_y = 0;
        if position.x.floor() == position.x {
            offset_x = if direction.x > 0.0 { 0 } else { -1 };
        }
        if position.y.floor() == position.y {
            offset_y = if direction.y > 0.0 { 0 } else { -1 };
        }
        (position.x.floor() as i32 + offset_x, position.y.floor() as i32 + offset_y)
    }

    pub fn tile_at(&self, position: Vector, direction: Vector) -> Tile {
        let (x, y) = self.tile_coords(position, direction);
        self.get(x, y)
    }

    /// First non-wall tile in the 3×3 block around `(x, y)`, row by row.
    pub fn closest_floor_tile(&self, x: usize, y: usize) -> Option<Tile> {
        self.neighbourhood(x, y).find(|tile| !tile.is_wall())
    }

    /// First wall tile in the 3×3 block around `(x, y)`, row by row.
    pub fn closest_wall_tile(&self, x: usize, y: usize) -> Option<Tile> {
        self.neighbourhood(x, y).find(|tile| tile.is_wall())
    }

    fn neighbourhood(&self, x: usize, y: usize) -> impl Iterator<Item = Tile> + '_ {
        let (x, y) = (x as i32, y as i32);
        (y - 1..=y + 1).flat_map(move |ny| (x - 1..=x + 1).map(move |nx| (nx, ny))).filter_map(
            move |(nx, ny)| {
                let inside = nx >= 0 && ny >= 0 && (nx as usize) < self.width && (ny as usize) < self.height();
                inside.then(|| self.tile(nx as usize, ny as usize))
            },
        )
    }

    /// Walk the grid along `ray` until a wall cell is entered and return the
    /// boundary point where that happens.
    ///
    /// Leaving the grid counts as hitting a wall. A zero-length direction
    /// returns the origin.
    pub fn hit_test(&self, ray: &Ray) -> Vector {
        let direction = ray.direction;
        let mut position = ray.origin;
        if direction.x == 0.0 && direction.y == 0.0 {
            return position;
        }

        let slope = direction.x / direction.y;
        let max_steps = 2 * (self.width + self.height()) + 4;
        for _ in 0..max_steps {
            let edge_distance_x = if direction.x > 0.0 {
                position.x.floor() + 1.0 - position.x
            } else {
                position.x.ceil() - 1.0 - position.x
            };
            let edge_distance_y = if direction.y > 0.0 {
                position.y.floor() + 1.0 - position.y
            } else {
                position.y.ceil() - 1.0 - position.y
            };

            let step1 = vector(edge_distance_x, edge_distance_x / slope);
            let step2 = vector(edge_distance_y * slope, edge_distance_y);
            position += if step1.length() < step2.length() { step1 } else { step2 };

            if self.tile_at(position, direction).is_wall() {
                break;
            }
        }
        position
    }
}

// ── Pathfinding over open tiles ──────────────────────────────────────────

impl Graph for Tilemap {
    type Node = (i32, i32);

    fn nodes_connected_to(&self, (x, y): (i32, i32)) -> Vec<(i32, i32)> {
        [(x, y - 1), (x + 1, y), (x, y + 1), (x - 1, y)]
            .into_iter()
            .filter(|&(nx, ny)| !self.get(nx, ny).is_wall())
            .collect()
    }

    fn estimate_distance(&self, a: (i32, i32), b: (i32, i32)) -> f64 {
        ((a.0 - b.0).abs() + (a.1 - b.1).abs()) as f64
    }

    fn step_distance(&self, _: (i32, i32), _: (i32, i32)) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4×4 room with a single open interior.
    fn room() -> Tilemap {
        let w = Tile::Wall;
        let f = Tile::Floor;
        let tiles = vec![w, w, w, w, w, f, f, w, w, f, f, w, w, w, w, w];
        let mut things = vec![Thing::Nothing; 16];
        things[5] = Thing::Player;
        Tilemap::new(tiles, things, 4, 0, 0).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let map = room();
        assert_eq!(map.height(), 4);
        assert_eq!(map.size(), vector(4.0, 4.0));
        assert_eq!(map.get(-1, 0), Tile::Wall);
    }

    #[test]
    fn test_tile_coords_on_boundary() {
        let map = room();
        assert_eq!(map.tile_coords(vector(2.0, 1.5), vector(1.0, 0.0)), (2, 1));
        assert_eq!(map.tile_coords(vector(2.0, 1.5), vector(-1.0, 0.0)), (1, 1));
    }

    #[test]
    fn test_hit_test_axis_aligned() {
        let map = room();
        let hit = map.hit_test(&Ray::new(vector(1.5, 1.5), vector(1.0, 0.0)));
        assert_eq!(hit, vector(3.0, 1.5));
        let hit = map.hit_test(&Ray::new(vector(1.5, 1.5), vector(0.0, -1.0)));
        assert_eq!(hit, vector(1.5, 1.0));
    }

    #[test]
    fn test_hit_test_zero_direction() {
        let map = room();
        assert_eq!(map.hit_test(&Ray::new(vector(1.5, 1.5), vector(0.0, 0.0))), vector(1.5, 1.5));
    }

    #[test]
    fn test_closest_tiles() {
        let map = room();
        assert_eq!(map.closest_floor_tile(0, 0), Some(Tile::Floor));
        assert_eq!(map.closest_wall_tile(1, 1), Some(Tile::Wall));
    }

    #[test]
    fn test_graph_neighbours_skip_walls() {
        let map = room();
        let mut n = map.nodes_connected_to((1, 1));
        n.sort();
        assert_eq!(n, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn test_validation_errors() {
        let w = Tile::Wall;
        let f = Tile::Floor;
        let tiles = vec![w, w, w, w, f, w, w, w, w];
        let mut things = vec![Thing::Nothing; 9];
        assert_eq!(
            Tilemap::new(tiles.clone(), things.clone(), 3, 2, 0),
            Err(LevelError::NoSpawn { level: 2 })
        );
        things[4] = Thing::Player;
        things[1] = Thing::Door;
        assert_eq!(
            Tilemap::new(tiles.clone(), things.clone(), 3, 0, 0),
            Err(LevelError::DoorOnBorder { level: 0, x: 1, y: 0 })
        );
        things[1] = Thing::Pushwall;
        assert_eq!(
            Tilemap::new(tiles.clone(), things.clone(), 3, 0, 0),
            Err(LevelError::PushwallOnWall { level: 0, x: 1, y: 0 })
        );
        things[1] = Thing::Nothing;
        assert_eq!(
            Tilemap::new(tiles.clone(), things[..8].to_vec(), 3, 0, 0),
            Err(LevelError::SizeMismatch { level: 0, tiles: 9, things: 8 })
        );
        assert_eq!(
            Tilemap::new(tiles, things, 0, 0, 0),
            Err(LevelError::ZeroWidth { level: 0 })
        );
    }
}
