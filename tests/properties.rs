use std::collections::HashSet;
use std::f64::consts::TAU;

use proptest::prelude::*;

use rampage::easing;
use rampage::map::{Thing, Tile, Tilemap};
use rampage::pathfinding::Graph;
use rampage::rng::Rng;
use rampage::{Ray, Rect, vector};

/// Open 8×8 grid with a set of blocked cells.
struct Grid {
    blocked: HashSet<(i32, i32)>,
}

const GRID: i32 = 8;

impl Graph for Grid {
    type Node = (i32, i32);

    fn nodes_connected_to(&self, (x, y): (i32, i32)) -> Vec<(i32, i32)> {
        [(x, y - 1), (x + 1, y), (x, y + 1), (x - 1, y)]
            .into_iter()
            .filter(|&(nx, ny)| (0..GRID).contains(&nx) && (0..GRID).contains(&ny))
            .filter(|node| !self.blocked.contains(node))
            .collect()
    }

    fn estimate_distance(&self, a: (i32, i32), b: (i32, i32)) -> f64 {
        ((a.0 - b.0).abs() + (a.1 - b.1).abs()) as f64
    }

    fn step_distance(&self, _: (i32, i32), _: (i32, i32)) -> f64 {
        1.0
    }
}

fn open_room(size: usize) -> Tilemap {
    let mut tiles = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let border = x == 0 || y == 0 || x == size - 1 || y == size - 1;
            tiles.push(if border { Tile::Wall } else { Tile::Floor });
        }
    }
    let mut things = vec![Thing::Nothing; size * size];
    things[size + 1] = Thing::Player;
    Tilemap::new(tiles, things, size, 0, 0).expect("valid room")
}

/// 8×8 walled room with extra interior walls. The spawn at (1, 1) stays
/// open.
fn walled_room(walls: &HashSet<(usize, usize)>) -> Tilemap {
    let size = 8;
    let mut tiles = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let border = x == 0 || y == 0 || x == size - 1 || y == size - 1;
            let wall = border || (walls.contains(&(x, y)) && (x, y) != (1, 1));
            tiles.push(if wall { Tile::Wall } else { Tile::Floor });
        }
    }
    let mut things = vec![Thing::Nothing; size * size];
    things[size + 1] = Thing::Player;
    Tilemap::new(tiles, things, size, 0, 0).expect("valid room")
}

/// The four penetration vectors `a.intersection(b)` chooses between.
fn penetrations(a: &Rect, b: &Rect) -> [f64; 4] {
    [a.max.x - b.min.x, a.min.x - b.max.x, a.max.y - b.min.y, a.min.y - b.max.y].map(f64::abs)
}

#[test]
fn tied_overlap_prefers_first_axis() {
    let a = Rect::new(vector(0.0, 0.0), vector(2.0, 10.0));
    let b = Rect::new(vector(0.5, 0.0), vector(1.5, 10.0));
    assert_eq!(a.intersection(&b), Some(vector(1.5, 0.0)));
    assert_eq!(b.intersection(&a), Some(vector(1.5, 0.0)));
}

fn rect() -> impl Strategy<Value = Rect> {
    (-10.0..10.0f64, -10.0..10.0f64, 0.1..5.0f64, 0.1..5.0f64)
        .prop_map(|(x, y, w, h)| Rect::new(vector(x, y), vector(x + w, y + h)))
}

proptest! {
    #[test]
    fn rect_overlap_is_symmetric(a in rect(), b in rect()) {
        let ab = a.intersection(&b);
        let ba = b.intersection(&a);
        prop_assert_eq!(ab.is_some(), ba.is_some());
        if let (Some(ab), Some(ba)) = (ab, ba) {
            prop_assert!((ab.length() - ba.length()).abs() < 1e-9);
            let lengths = penetrations(&a, &b);
            let shortest = lengths.iter().copied().fold(f64::INFINITY, f64::min);
            let unique = lengths.iter().filter(|&&length| length - shortest < 1e-9).count() == 1;
            if unique {
                prop_assert!((ab + ba).length() < 1e-9, "{ab:?} vs {ba:?}");
            }
        }
    }

    #[test]
    fn separating_by_overlap_clears_it(a in rect(), b in rect()) {
        if let Some(hit) = a.intersection(&b) {
            let moved = Rect::new(a.min - hit, a.max - hit);
            let rest = moved.intersection(&b);
            prop_assert!(rest.is_none_or(|r| r.length() < 1e-9));
        }
    }

    #[test]
    fn easing_stays_in_unit_range(t in 0.0..=1.0f64) {
        let curves: [fn(f64) -> f64; 4] =
            [easing::linear, easing::ease_in, easing::ease_out, easing::ease_in_ease_out];
        for curve in curves {
            let value = curve(t);
            prop_assert!((-1e-12..=1.0 + 1e-12).contains(&value), "{value} at {t}");
            prop_assert_eq!(curve(0.0), 0.0);
            prop_assert_eq!(curve(1.0), 1.0);
        }
    }

    #[test]
    fn easing_never_decreases(a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
        let (early, late) = (a.min(b), a.max(b));
        let curves: [fn(f64) -> f64; 3] = [easing::ease_in, easing::ease_out, easing::ease_in_ease_out];
        for curve in curves {
            prop_assert!(curve(early) <= curve(late) + 1e-12, "{early} -> {late}");
        }
    }

    #[test]
    fn rng_range_is_respected(seed in any::<u64>(), min in -100.0..100.0f64, span in 0.0..50.0f64) {
        let mut rng = Rng::new(seed);
        let max = min + span;
        for _ in 0..32 {
            let value = rng.range_f64(min, max);
            prop_assert!(value >= min && value <= max + 1e-9, "{value} outside {min}..={max}");
        }
    }

    #[test]
    fn rng_is_reproducible(seed in any::<u64>()) {
        let mut a = Rng::new(seed);
        let mut b = Rng::new(seed);
        for _ in 0..16 {
            prop_assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn paths_are_connected(
        blocked in proptest::collection::hash_set((0..GRID, 0..GRID), 0..20),
        goal in (0..GRID, 0..GRID),
    ) {
        let start = (0, 0);
        let mut blocked = blocked;
        blocked.remove(&start);
        blocked.remove(&goal);
        let grid = Grid { blocked };

        let path = grid.find_path(start, goal, 1000.0);
        if path.is_empty() {
            return Ok(());
        }
        prop_assert_eq!(path.last().copied(), Some(goal));
        prop_assert!(path.len() as f64 >= grid.estimate_distance(start, goal));

        let mut previous = start;
        for &node in &path {
            prop_assert!(!grid.blocked.contains(&node));
            prop_assert_eq!(grid.estimate_distance(previous, node), 1.0);
            previous = node;
        }
    }

    #[test]
    fn tile_paths_walk_open_neighbours(
        walls in proptest::collection::hash_set((1..7usize, 1..7usize), 0..16),
        goal in (1..7i32, 1..7i32),
    ) {
        let map = walled_room(&walls);
        let start = (1, 1);
        let path = map.find_path(start, goal, 100.0);
        if path.is_empty() {
            return Ok(());
        }
        prop_assert_eq!(path.last().copied(), Some(goal));

        let mut previous = start;
        let mut travelled = 0.0;
        for &node in &path {
            prop_assert!(!map.get(node.0, node.1).is_wall(), "{node:?} is a wall");
            prop_assert_eq!(map.estimate_distance(previous, node), 1.0);
            let step = map.step_distance(previous, node);
            prop_assert!(step >= 0.0);
            prop_assert!(travelled + step >= travelled);
            travelled += step;
            previous = node;
        }
        prop_assert!(travelled <= 100.0);
    }

    #[test]
    fn rays_stop_on_grid_lines(
        x in 1.01..6.99f64,
        y in 1.01..6.99f64,
        angle in 0.0..TAU,
    ) {
        let map = open_room(8);
        let (sine, cosine) = angle.sin_cos();
        let hit = map.hit_test(&Ray::new(vector(x, y), vector(cosine, sine)));

        prop_assert!((0.0..=8.0).contains(&hit.x) && (0.0..=8.0).contains(&hit.y), "{hit:?}");
        let on_line = (hit.x - hit.x.round()).abs() < 1e-6 || (hit.y - hit.y.round()).abs() < 1e-6;
        prop_assert!(on_line, "{hit:?} is not on a cell edge");
        let direction = vector(cosine, sine);
        prop_assert!(map.tile_at(hit, direction).is_wall(), "{hit:?} does not front a wall");
        // The open interior spans 1..7, so the ray always reaches its edge.
        prop_assert!(hit.x <= 1.0 + 1e-6 || hit.x >= 7.0 - 1e-6 || hit.y <= 1.0 + 1e-6 || hit.y >= 7.0 - 1e-6);
    }
}
