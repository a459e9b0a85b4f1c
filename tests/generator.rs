use rampage::LevelError;
use rampage::map::{MapData, MapGenerator, Thing, Tile, Tilemap};

/// Authored level from ASCII rows.
///
/// `#` wall, `.` floor, `E` elevator floor, `l` switch on a wall, `s`
/// switch on floor, `P` pushwall on a wall. Other thing markers sit on
/// floor.
fn data(rows: &[&str]) -> MapData {
    let mut tiles = Vec::new();
    let mut things = Vec::new();
    for row in rows {
        for ch in row.chars() {
            let (tile, thing) = match ch {
                '#' => (Tile::Wall, Thing::Nothing),
                '.' => (Tile::Floor, Thing::Nothing),
                'E' => (Tile::ElevatorFloor, Thing::Nothing),
                'l' => (Tile::Wall, Thing::Switch),
                's' => (Tile::Floor, Thing::Switch),
                'P' => (Tile::Wall, Thing::Pushwall),
                marker => (Tile::Floor, Thing::try_from(marker).expect("thing marker")),
            };
            tiles.push(tile);
            things.push(thing);
        }
    }
    MapData {
        tiles,
        things: Some(things),
        width: rows[0].len(),
        seed: Some(42),
        monsters: None,
        medkits: None,
        shotguns: None,
        pushwalls: None,
        doors: None,
    }
}

fn cells(map: &Tilemap, thing: Thing) -> Vec<(usize, usize)> {
    (0..map.height())
        .flat_map(|y| (0..map.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| map.thing(x, y) == thing)
        .collect()
}

const ROOM: &[&str] = &[
    "############",
    "#@.........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "############",
];

#[test]
fn same_seed_same_level() {
    let mut data = data(ROOM);
    data.monsters = Some(4);
    data.medkits = Some(2);
    data.shotguns = Some(1);

    let a = MapGenerator::generate(&data, 0).expect("valid");
    let b = MapGenerator::generate(&data, 0).expect("valid");
    assert_eq!(a, b);
    assert_eq!(a.seed(), 42);
}

#[test]
fn monsters_keep_their_distance() {
    let mut data = data(ROOM);
    data.monsters = Some(6);
    let map = MapGenerator::generate(&data, 0).expect("valid");

    let monsters = cells(&map, Thing::Monster);
    assert_eq!(monsters.len(), 6);
    for (x, y) in monsters {
        let distance = (x as i64 - 1).abs() + (y as i64 - 1).abs();
        assert!(distance > 3, "monster at ({x}, {y}) too close to spawn");
    }
}

#[test]
fn requested_counts_are_honoured() {
    let mut data = data(ROOM);
    data.medkits = Some(3);
    data.shotguns = Some(2);
    let map = MapGenerator::generate(&data, 0).expect("valid");

    assert_eq!(cells(&map, Thing::Medkit).len(), 3);
    assert_eq!(cells(&map, Thing::Shotgun).len(), 2);
    assert_eq!(cells(&map, Thing::Player), vec![(1, 1)]);
}

#[test]
fn spawn_derived_from_elevator() {
    let data = data(&[
        "#######",
        "#....E#",
        "#.....#",
        "#######",
    ]);
    let map = MapGenerator::generate(&data, 0).expect("valid");

    let spawn = cells(&map, Thing::Player);
    assert_eq!(spawn.len(), 1);
    let (x, y) = spawn[0];
    assert_eq!(map.tile(x, y), Tile::Floor);
}

#[test]
fn no_spawn_and_no_elevator() {
    let data = data(&[
        "#####",
        "#...#",
        "#####",
    ]);
    assert_eq!(MapGenerator::generate(&data, 3), Err(LevelError::NoSpawn { level: 3 }));
}

#[test]
fn doors_go_between_walls() {
    let mut data = data(&[
        "#########",
        "#@..#...#",
        "#.......#",
        "#...#...#",
        "#########",
    ]);
    data.doors = Some(5);
    let map = MapGenerator::generate(&data, 0).expect("valid");

    let doors = cells(&map, Thing::Door);
    assert!(!doors.is_empty());
    for (x, y) in doors {
        assert!(!map.is_border(x, y));
        let (x, y) = (x as i32, y as i32);
        let wall = |dx: i32, dy: i32| map.get(x + dx, y + dy).is_wall();
        let horizontal = wall(-1, 0) && wall(1, 0) && !wall(0, -1) && !wall(0, 1);
        let vertical = wall(0, -1) && wall(0, 1) && !wall(-1, 0) && !wall(1, 0);
        assert!(horizontal != vertical, "door at ({x}, {y}) is not in a gap");
    }
}

#[test]
fn open_room_has_no_door_candidates() {
    let mut data = data(&[
        "######",
        "#@...#",
        "#....#",
        "#....#",
        "######",
    ]);
    data.doors = Some(3);
    let map = MapGenerator::generate(&data, 0).expect("valid");
    assert!(cells(&map, Thing::Door).is_empty());
}

#[test]
fn pushwalls_need_room_to_slide() {
    let mut data = data(&[
        "#########",
        "#@......#",
        "#########",
    ]);
    data.pushwalls = Some(3);
    let map = MapGenerator::generate(&data, 0).expect("valid");

    // Columns 3 to 5 have room, but neighbours would jam each other.
    let pushwalls = cells(&map, Thing::Pushwall);
    assert!((1..=2).contains(&pushwalls.len()), "{pushwalls:?}");
    for &(x, y) in &pushwalls {
        assert_eq!(y, 1);
        assert!((3..=5).contains(&x), "pushwall at column {x} has no room");
    }
    for pair in pushwalls.windows(2) {
        assert!(pair[1].0 - pair[0].0 > 1, "adjacent pushwalls {pair:?}");
    }
}

#[test]
fn pushwalls_keep_clear_of_doors() {
    let mut data = data(&[
        "#########",
        "#@.|....#",
        "#########",
    ]);
    data.pushwalls = Some(3);
    let map = MapGenerator::generate(&data, 0).expect("valid");
    assert_eq!(cells(&map, Thing::Pushwall), vec![(5, 1)]);
}

#[test]
fn pushwalls_never_touch_in_open_rooms() {
    let mut data = data(&[
        "###########",
        "#@........#",
        "#.#.#.#.#.#",
        "#.#.#.#.#.#",
        "#.#.#.#.#.#",
        "#.........#",
        "###########",
    ]);
    data.pushwalls = Some(20);
    let map = MapGenerator::generate(&data, 0).expect("valid");

    let pushwalls = cells(&map, Thing::Pushwall);
    assert!(!pushwalls.is_empty());
    for &(x, y) in &pushwalls {
        for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
            let neighbour = map.thing(nx, ny);
            assert!(
                neighbour != Thing::Pushwall && neighbour != Thing::Door,
                "pushwall at ({x}, {y}) touches {neighbour:?}"
            );
        }
    }
}

#[test]
fn sealed_rooms_stay_empty() {
    let mut data = data(&[
        "#######",
        "#@.#..#",
        "#..#..#",
        "#######",
    ]);
    data.monsters = Some(5);
    data.medkits = Some(10);
    let map = MapGenerator::generate(&data, 0).expect("valid");

    assert!(cells(&map, Thing::Monster).is_empty());
    let medkits = cells(&map, Thing::Medkit);
    assert_eq!(medkits.len(), 3);
    assert!(medkits.iter().all(|&(x, _)| x < 3));
}

#[test]
fn door_on_border_is_rejected() {
    let data = data(&[
        "#|##",
        "#@.#",
        "####",
    ]);
    assert_eq!(
        MapGenerator::generate(&data, 0),
        Err(LevelError::DoorOnBorder { level: 0, x: 1, y: 0 })
    );
}

#[test]
fn switch_must_be_on_a_wall() {
    let data = data(&[
        "#####",
        "#@.s#",
        "#####",
    ]);
    assert_eq!(
        MapGenerator::generate(&data, 1),
        Err(LevelError::SwitchNotOnWall { level: 1, x: 3, y: 1 })
    );
}

#[test]
fn pushwall_must_be_on_floor() {
    let data = data(&[
        "#####",
        "#@..P",
        "#####",
    ]);
    assert_eq!(
        MapGenerator::generate(&data, 0),
        Err(LevelError::PushwallOnWall { level: 0, x: 4, y: 1 })
    );
}

#[test]
fn things_must_match_tiles() {
    let mut data = data(&[
        "####",
        "#@.#",
        "####",
    ]);
    if let Some(things) = &mut data.things {
        things.pop();
    }
    assert_eq!(
        MapGenerator::generate(&data, 0),
        Err(LevelError::SizeMismatch { level: 0, tiles: 12, things: 11 })
    );
}

#[test]
fn things_default_to_nothing() {
    let mut data = data(&[
        "#####",
        "#.E.#",
        "#####",
    ]);
    data.things = None;
    let map = MapGenerator::generate(&data, 0).expect("valid");
    assert_eq!(cells(&map, Thing::Player).len(), 1);
}

#[test]
fn unknown_codes_fail_to_parse() {
    let tiles = serde_json::from_str::<MapData>(r#"{ "width": 2, "tiles": [0, 9] }"#);
    assert!(tiles.is_err());

    let things = serde_json::from_str::<MapData>(r#"{ "width": 2, "tiles": [0, 0], "things": ["@", "x"] }"#);
    assert!(things.is_err());

    let ok = serde_json::from_str::<MapData>(r#"{ "width": 2, "tiles": [0, 5] }"#).expect("valid json");
    assert_eq!(ok.tiles, vec![Tile::Floor, Tile::ElevatorFloor]);
    assert_eq!(ok.seed, None);
}
