use tracing::{debug, info};

use crate::animation::Animation;
use crate::color::Color;
use crate::geometry::{Billboard, Ray, Vector, vector};
use crate::map::{Thing, Tile, Tilemap};
use crate::pathfinding::{self, Graph};
use crate::rng::Rng;
use crate::world::{
    Actor, Door, Effect, EffectType, Input, Monster, MonsterState, Pickup, PickupType, Player,
    Pushwall, Sound, SoundName, Switch, Weapon,
};

/// Requests the caller must act on before the next tick.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldAction {
    /// Replace the current level. The index may exceed the level count and
    /// should be wrapped.
    LoadLevel(usize),
    PlaySounds(Vec<Sound>),
}

// Sound propagation.
const SOUND_DROP_OFF: f64 = 0.5;
const SPEED_OF_SOUND: f64 = 343.0;
/// Sounds travel as if the world were scaled up by this factor.
const WORLD_SCALE: f64 = 2.0;

const MEDKIT_HEALTH: f64 = 25.0;
const STUCK_DAMAGE: f64 = 1.0;

/// Aggregate root of the simulation: one level and everything in it.
#[derive(Debug, Clone)]
pub struct World {
    map: Tilemap,
    player: Player,
    monsters: Vec<Monster>,
    doors: Vec<Door>,
    pushwalls: Vec<Pushwall>,
    switches: Vec<Switch>,
    pickups: Vec<Pickup>,
    effects: Vec<Effect>,
    sounds: Vec<Sound>,
    is_level_ended: bool,
    rng: Rng,
}

impl World {
    /// Default cap on monster path searches.
    pub const MAX_SEARCH_DISTANCE: f64 = 50.0;

    pub fn new(map: Tilemap) -> Self {
        let rng = Rng::new(map.seed());
        let mut world = Self {
            map,
            player: Player::new(Vector::ZERO, 0),
            monsters: Vec::new(),
            doors: Vec::new(),
            pushwalls: Vec::new(),
            switches: Vec::new(),
            pickups: Vec::new(),
            effects: Vec::new(),
            sounds: Vec::new(),
            is_level_ended: false,
            rng,
        };
        world.reset();
        world
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn map(&self) -> &Tilemap {
        &self.map
    }

    pub fn size(&self) -> Vector {
        self.map.size()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn pushwalls(&self) -> &[Pushwall] {
        &self.pushwalls
    }

    pub fn switches(&self) -> &[Switch] {
        &self.switches
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn is_level_ended(&self) -> bool {
        self.is_level_ended
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Rng {
        &mut self.rng
    }

    /// Everything drawn as a textured plane, as seen from the player.
    pub fn sprites(&self) -> Vec<Billboard> {
        let ray = Ray::new(self.player.position, self.player.direction);
        self.monsters
            .iter()
            .map(|monster| monster.billboard(&ray))
            .chain(self.pickups.iter().map(|pickup| pickup.billboard(&ray)))
            .chain(self.doors.iter().map(Door::billboard))
            .chain(self.pushwalls.iter().flat_map(|pushwall| pushwall.billboards(ray.origin)))
            .collect()
    }

    fn thing_at(&self, x: i32, y: i32) -> Thing {
        if x < 0 || y < 0 || x as usize >= self.map.width() || y as usize >= self.map.height() {
            return Thing::Nothing;
        }
        self.map.thing(x as usize, y as usize)
    }

    /// Whether a door was spawned at tile `(x, y)`.
    pub fn is_door(&self, x: i32, y: i32) -> bool {
        self.thing_at(x, y) == Thing::Door
    }

    /// The switch mounted on wall tile `(x, y)`, if any.
    pub fn switch_at(&self, x: i32, y: i32) -> Option<&Switch> {
        if self.thing_at(x, y) != Thing::Switch {
            return None;
        }
        self.switches
            .iter()
            .find(|s| s.position.x.floor() as i32 == x && s.position.y.floor() as i32 == y)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the simulation by `time_step` seconds.
    pub fn update(&mut self, time_step: f64, input: &Input) -> Option<WorldAction> {
        self.effects.retain_mut(|effect| {
            if effect.is_completed() {
                return false;
            }
            effect.time += time_step;
            true
        });

        if self.is_level_ended {
            if self.effects.is_empty() {
                self.effects.push(Effect::new(EffectType::FadeIn, Color::BLACK, 0.5));
                return Some(WorldAction::LoadLevel(self.map.index() + 1));
            }
            return None;
        }

        if !self.player.is_dead() {
            let mut player = self.player.clone();
            player.animation.time += time_step;
            player.update(input, self);
            player.position += player.velocity * time_step;
            self.player = player;
        } else if self.effects.is_empty() {
            info!(level = self.map.index(), "respawning player");
            self.reset();
            self.effects.push(Effect::new(EffectType::FadeIn, Color::RED, 0.5));
            return None;
        }

        for i in 0..self.monsters.len() {
            let mut monster = self.monsters[i].clone();
            monster.animation.time += time_step;
            monster.update(self);
            monster.position += monster.velocity * time_step;
            self.monsters[i] = monster;
        }

        for i in 0..self.doors.len() {
            let mut door = self.doors[i].clone();
            door.time += time_step;
            door.update(self);
            self.doors[i] = door;
        }

        for i in 0..self.pushwalls.len() {
            let mut pushwall = self.pushwalls[i].clone();
            pushwall.update(self);
            pushwall.advance(time_step);
            self.pushwalls[i] = pushwall;
        }

        for i in 0..self.switches.len() {
            let mut switch = self.switches[i].clone();
            switch.animation.time += time_step;
            switch.update(self);
            self.switches[i] = switch;
        }

        self.collect_pickups();
        self.resolve_collisions();

        if self.player.is_stuck(self) {
            self.hurt_player(STUCK_DAMAGE);
        }
        for i in 0..self.monsters.len() {
            if self.monsters[i].is_stuck(self) {
                self.hurt_monster(i, STUCK_DAMAGE);
            }
        }

        Some(WorldAction::PlaySounds(std::mem::take(&mut self.sounds)))
    }

    fn collect_pickups(&mut self) {
        if self.player.is_dead() {
            return;
        }
        let mut i = 0;
        while i < self.pickups.len() {
            if self.player.intersection_with_actor(&self.pickups[i]).is_none() {
                i += 1;
                continue;
            }
            let pickup = self.pickups.remove(i);
            match pickup.kind {
                PickupType::Medkit => {
                    self.player.health = (self.player.health + MEDKIT_HEALTH).min(Player::MAX_HEALTH);
                    self.play_sound(Some(SoundName::Medkit), pickup.position, None);
                    self.effects.push(Effect::new(EffectType::FadeIn, Color::GREEN, 0.5));
                }
                PickupType::Shotgun => {
                    self.player.set_weapon(Weapon::Shotgun);
                    self.play_sound(Some(SoundName::ShotgunPickup), pickup.position, None);
                    self.effects.push(Effect::new(EffectType::FadeIn, Color::WHITE, 0.5));
                }
            }
        }
    }

    /// Split overlaps evenly between the two parties, then push everyone
    /// out of walls.
    fn resolve_collisions(&mut self) {
        for i in 0..self.monsters.len() {
            let mut monster = self.monsters[i].clone();

            if let Some(hit) = self.player.intersection_with_actor(&monster) {
                self.player.position -= hit / 2.0;
                monster.position += hit / 2.0;
            }

            for j in i + 1..self.monsters.len() {
                if let Some(hit) = monster.intersection_with_actor(&self.monsters[j]) {
                    monster.position -= hit / 2.0;
                    self.monsters[j].position += hit / 2.0;
                }
            }

            monster.avoid_walls(self);
            self.monsters[i] = monster;
        }

        let mut player = self.player.clone();
        player.avoid_walls(self);
        self.player = player;
    }

    // ── Damage ────────────────────────────────────────────────────────────

    pub fn hurt_player(&mut self, damage: f64) {
        if self.player.is_dead() {
            return;
        }
        self.player.health -= damage;
        self.player.velocity = Vector::ZERO;
        self.effects.push(Effect::new(EffectType::FadeIn, Color::rgba(255, 0, 0, 191), 0.2));

        if self.player.is_dead() {
            info!(level = self.map.index(), "player died");
            self.effects.push(Effect::new(EffectType::FizzleOut, Color::RED, 2.0));
            let position = self.player.position;
            self.play_sound(Some(SoundName::PlayerDeath), position, None);
            if self.player.is_stuck(self) {
                self.play_sound(Some(SoundName::Squelch), position, None);
            }
        }
    }

    pub fn hurt_monster(&mut self, index: usize, damage: f64) {
        let mut monster = self.monsters[index].clone();
        if monster.is_dead() {
            return;
        }
        monster.health -= damage;
        monster.velocity = Vector::ZERO;

        if monster.is_dead() {
            debug!(index, "monster killed");
            self.play_sound(Some(SoundName::MonsterDeath), monster.position, None);
            if monster.is_stuck(self) {
                self.play_sound(Some(SoundName::Squelch), monster.position, None);
            }
            monster.state = MonsterState::Dead;
            monster.animation = Animation::MONSTER_DEATH;
        } else {
            monster.state = MonsterState::Hurt;
            monster.animation = Animation::MONSTER_HURT;
        }

        self.monsters[index] = monster;
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Nearest solid surface along `ray`: walls, door leaves or pushwall
    /// faces.
    pub fn hit_test(&self, ray: &Ray) -> Vector {
        let mut wall_hit = self.map.hit_test(ray);
        let mut distance = (wall_hit - ray.origin).length();

        let billboards = self
            .doors
            .iter()
            .map(Door::billboard)
            .chain(self.pushwalls.iter().flat_map(|pushwall| pushwall.billboards(ray.origin)));
        for billboard in billboards {
            let Some(hit) = billboard.hit_test(ray) else {
                continue;
            };
            let hit_distance = (hit - ray.origin).length();
            if hit_distance < distance {
                wall_hit = hit;
                distance = hit_distance;
            }
        }
        wall_hit
    }

    /// Index of the nearest live monster struck by `ray` in front of any
    /// wall.
    pub fn pick_monster(&self, ray: &Ray) -> Option<usize> {
        let mut distance = (self.hit_test(ray) - ray.origin).length();
        let mut result = None;
        for (i, monster) in self.monsters.iter().enumerate() {
            let Some(hit) = monster.hit_test(ray) else {
                continue;
            };
            let hit_distance = (hit - ray.origin).length();
            if hit_distance < distance {
                result = Some(i);
                distance = hit_distance;
            }
        }
        result
    }

    /// Route between two world positions as a list of tile centres.
    pub fn find_path(&self, start: Vector, end: Vector, max_distance: f64) -> Vec<Vector> {
        let start = (start.x.floor() as i32, start.y.floor() as i32);
        let end = (end.x.floor() as i32, end.y.floor() as i32);
        pathfinding::find_path(self, start, end, max_distance)
            .into_iter()
            .map(|(x, y)| vector(x as f64 + 0.5, y as f64 + 0.5))
            .collect()
    }

    // ── Events ────────────────────────────────────────────────────────────

    /// Queue a sound heard from the player's position.
    pub fn play_sound(&mut self, name: Option<SoundName>, position: Vector, channel: Option<usize>) {
        let delta = position - self.player.position;
        let distance = delta.length();
        let volume = 1.0 / (distance * distance * SOUND_DROP_OFF + 1.0);
        let delay = distance * WORLD_SCALE / SPEED_OF_SOUND;
        let direction = if distance > 0.0 { delta / distance } else { self.player.direction };
        let pan = self.player.direction.perp().dot(direction);
        self.sounds.push(Sound { name, channel, volume, pan, delay });
    }

    pub fn end_level(&mut self) {
        info!(level = self.map.index(), "level complete");
        self.is_level_ended = true;
        self.effects.push(Effect::new(EffectType::FadeOut, Color::BLACK, 2.0));
    }

    /// Swap in a new level. Only running effects carry over.
    pub fn set_level(&mut self, map: Tilemap) {
        info!(level = map.index(), "loading level");
        let effects = std::mem::take(&mut self.effects);
        *self = World::new(map);
        self.effects = effects;
    }

    /// Rebuild every actor from the map's spawn markers.
    pub fn reset(&mut self) {
        self.monsters.clear();
        self.doors.clear();
        self.switches.clear();
        self.pickups.clear();
        self.sounds.clear();
        self.is_level_ended = false;

        let mut pushwall_count = 0;
        for y in 0..self.map.height() {
            for x in 0..self.map.width() {
                let position = vector(x as f64 + 0.5, y as f64 + 0.5);
                match self.map.thing(x, y) {
                    Thing::Nothing => {}
                    Thing::Player => self.player = Player::new(position, 0),
                    Thing::Monster => self.monsters.push(Monster::new(position)),
                    Thing::Pushwall => {
                        pushwall_count += 1;
                        if let Some(existing) = self.pushwalls.get_mut(pushwall_count - 1) {
                            *existing = Pushwall::new(position, existing.tile, existing.sound_channel);
                        } else {
                            let tile = self.map.closest_wall_tile(x, y).unwrap_or(Tile::Wall);
                            self.pushwalls.push(Pushwall::new(position, tile, pushwall_count));
                        }
                    }
                    Thing::Door => {
                        let is_vertical = self.map.get(x as i32, y as i32 - 1).is_wall()
                            && self.map.get(x as i32, y as i32 + 1).is_wall();
                        self.doors.push(Door::new(position, is_vertical));
                    }
                    Thing::Switch => self.switches.push(Switch::new(position)),
                    Thing::Medkit => self.pickups.push(Pickup::new(PickupType::Medkit, position)),
                    Thing::Shotgun => self.pickups.push(Pickup::new(PickupType::Shotgun, position)),
                }
            }
        }
        debug!(
            level = self.map.index(),
            monsters = self.monsters.len(),
            doors = self.doors.len(),
            pushwalls = self.pushwalls.len(),
            pickups = self.pickups.len(),
            "world reset"
        );
    }
}

// ── Pathfinding over the live level ──────────────────────────────────────

impl World {
    fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.map.get(x, y).is_wall()
            || self.pushwalls.iter().any(|pushwall| {
                pushwall.position.x.floor() as i32 == x && pushwall.position.y.floor() as i32 == y
            })
    }
}

impl Graph for World {
    type Node = (i32, i32);

    fn nodes_connected_to(&self, (x, y): (i32, i32)) -> Vec<(i32, i32)> {
        [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
            .into_iter()
            .filter(|&(nx, ny)| !self.is_blocked(nx, ny))
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
    use crate::geometry::Rotation;
    use crate::world::PlayerState;

    /// Walled corridor with the player at (1.5, 1.5) and a monster one tile
    /// east of it.
    fn corridor() -> World {
        let (w, f) = (Tile::Wall, Tile::Floor);
        #[rustfmt::skip]
        let tiles = vec![
            w, w, w, w, w, w,
            w, f, f, f, f, w,
            w, w, w, w, w, w,
        ];
        let mut things = vec![Thing::Nothing; tiles.len()];
        things[7] = Thing::Player;
        things[8] = Thing::Monster;
        match Tilemap::new(tiles, things, 6, 0, 0) {
            Ok(map) => World::new(map),
            Err(error) => panic!("corridor: {error}"),
        }
    }

    #[test]
    fn test_shotgun_damage_split_across_pellets() {
        let mut world = corridor();
        world.player.set_weapon(Weapon::Shotgun);
        world.monsters[0].health = 1000.0;

        world.update(1.0 / 120.0, &Input::new(0.0, Rotation::IDENTITY, true));

        // Every pellet lands at point blank, each carrying a fifth.
        assert_eq!(world.monsters[0].health, 950.0);
        assert_eq!(world.monsters[0].state, MonsterState::Hurt);
        assert_eq!(world.player.ammo(), Weapon::Shotgun.attributes().default_ammo - 1.0);
    }

    #[test]
    fn test_gunfire_heard_on_same_tile() {
        let mut world = corridor();
        world.monsters[0].position = vector(1.25, 1.75);
        assert!(!world.monsters[0].can_hear_player(&world));

        world.player.state = PlayerState::Firing;
        assert!(world.monsters[0].can_hear_player(&world));
    }
}
