use crate::animation::Animation;
use crate::geometry::{Billboard, Ray, Vector};
use crate::world::{Actor, PlayerState, SoundName, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterState {
    Idle,
    Chasing,
    Scratching,
    Blocked,
    Hurt,
    Dead,
}

/// Sideways offset of each "eye" for the line-of-sight check.
const EYE_OFFSET: f64 = 0.2;
/// Extra gap, and minimum heading alignment, for treating a fellow chaser
/// as in the way.
const BLOCK_THRESHOLD: f64 = 0.5;
/// Gap between footprints within which the player can be clawed.
const REACH: f64 = 0.25;
/// Longest path a gunshot can be heard along.
const HEARING_DISTANCE: f64 = 12.0;
/// Waypoints closer than this count as reached.
const WAYPOINT_TOLERANCE: f64 = 0.1;
const SWIPE_DAMAGE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    pub position: Vector,
    pub velocity: Vector,
    pub state: MonsterState,
    pub animation: Animation,
    pub health: f64,
    pub last_attack_time: f64,
    /// Tile centres still to visit, nearest first.
    pub path: Vec<Vector>,
}

impl Monster {
    pub const SPEED: f64 = 0.5;
    pub const RADIUS: f64 = 0.4375;
    pub const MAX_HEALTH: f64 = 50.0;
    pub const ATTACK_COOLDOWN: f64 = 0.4;

    pub fn new(position: Vector) -> Self {
        Self {
            position,
            velocity: Vector::ZERO,
            state: MonsterState::Idle,
            animation: Animation::MONSTER_IDLE,
            health: Self::MAX_HEALTH,
            last_attack_time: 0.0,
            path: Vec::new(),
        }
    }

    pub fn update(&mut self, world: &mut World) {
        match self.state {
            MonsterState::Idle => {
                if self.can_see_player(world) || self.can_hear_player(world) {
                    self.state = MonsterState::Chasing;
                    self.animation = Animation::MONSTER_WALK;
                    world.play_sound(Some(SoundName::MonsterGroan), self.position, None);
                }
                self.velocity = Vector::ZERO;
            }
            MonsterState::Chasing => self.chase(world),
            MonsterState::Blocked => {
                if self.animation.is_completed() {
                    self.state = MonsterState::Chasing;
                    self.animation = Animation::MONSTER_WALK;
                }
            }
            MonsterState::Scratching => {
                if !self.can_reach_player(world) {
                    self.state = MonsterState::Chasing;
                    self.animation = Animation::MONSTER_WALK;
                    return;
                }
                if self.animation.time - self.last_attack_time >= Self::ATTACK_COOLDOWN {
                    self.last_attack_time = self.animation.time;
                    world.hurt_player(SWIPE_DAMAGE);
                    world.play_sound(Some(SoundName::MonsterSwipe), self.position, None);
                }
            }
            MonsterState::Hurt => {
                if self.animation.is_completed() {
                    self.state = MonsterState::Idle;
                    self.animation = Animation::MONSTER_IDLE;
                }
            }
            MonsterState::Dead => {
                if self.animation.is_completed() {
                    self.animation = Animation::MONSTER_DEAD;
                }
            }
        }
    }

    fn chase(&mut self, world: &mut World) {
        let can_see = self.can_see_player(world);
        if can_see || self.can_hear_player(world) {
            self.path = world.find_path(self.position, world.player().position, World::MAX_SEARCH_DISTANCE);
            if self.can_reach_player(world) {
                self.state = MonsterState::Scratching;
                self.animation = Animation::MONSTER_SCRATCH;
                self.last_attack_time = -Self::ATTACK_COOLDOWN;
                self.velocity = Vector::ZERO;
                return;
            }
        }

        let Some(destination) = self.next_destination(world, can_see) else {
            self.state = MonsterState::Idle;
            self.animation = Animation::MONSTER_IDLE;
            self.velocity = Vector::ZERO;
            return;
        };

        let direction = destination - self.position;
        let distance = direction.length();
        if distance < WAYPOINT_TOLERANCE {
            self.velocity = Vector::ZERO;
            return;
        }
        self.velocity = direction * (Self::SPEED / distance);

        if world.monsters().iter().any(|other| self.is_blocked_by(other)) {
            self.state = MonsterState::Blocked;
            self.animation = Animation::MONSTER_BLOCKED;
            self.velocity = Vector::ZERO;
        }
    }

    /// First waypoint not yet reached, dropping the reached ones. Falls back
    /// to the player once the path runs out, if the player is in sight.
    fn next_destination(&mut self, world: &World, can_see: bool) -> Option<Vector> {
        while let Some(&waypoint) = self.path.first() {
            if (waypoint - self.position).length() >= WAYPOINT_TOLERANCE {
                return Some(waypoint);
            }
            self.path.remove(0);
        }
        can_see.then(|| world.player().position)
    }

    /// Another live chaser close ahead, roughly where this one is heading.
    pub fn is_blocked_by(&self, other: &Monster) -> bool {
        if other.is_dead() || other.state != MonsterState::Chasing {
            return false;
        }
        let offset = other.position - self.position;
        let distance = offset.length();
        let speed = self.velocity.length();
        if distance == 0.0 || speed == 0.0 {
            return false;
        }
        if distance > Self::RADIUS + Self::RADIUS + BLOCK_THRESHOLD {
            return false;
        }
        (offset / distance).dot(self.velocity / speed) > BLOCK_THRESHOLD
    }

    /// Two parallel rays, one from each side of the body. Either reaching
    /// past the player means the player is visible.
    pub fn can_see_player(&self, world: &World) -> bool {
        let offset = world.player().position - self.position;
        let player_distance = offset.length();
        if player_distance == 0.0 {
            return true;
        }
        let direction = offset / player_distance;
        let side = direction.perp();
        [-EYE_OFFSET, EYE_OFFSET].into_iter().any(|eye| {
            let ray = Ray::new(self.position + side * eye, direction);
            let wall_hit = world.hit_test(&ray);
            (wall_hit - self.position).length() > player_distance
        })
    }

    /// Gunfire carries along open paths up to a fixed length. Sharing a
    /// tile with the shooter counts as a path of length zero.
    pub fn can_hear_player(&self, world: &World) -> bool {
        if world.player().state != PlayerState::Firing {
            return false;
        }
        if self.position.floor() == world.player().position.floor() {
            return true;
        }
        !world.find_path(self.position, world.player().position, HEARING_DISTANCE).is_empty()
    }

    pub fn can_reach_player(&self, world: &World) -> bool {
        let player = world.player();
        if player.is_dead() {
            return false;
        }
        let distance = (player.position - self.position).length();
        distance - Self::RADIUS - player.radius() < REACH
    }

    /// Sprite plane facing back along `ray`.
    pub fn billboard(&self, ray: &Ray) -> Billboard {
        let plane = ray.direction.perp();
        Billboard::new(self.position - plane / 2.0, plane, 1.0, self.animation.texture())
    }

    /// Where `ray` strikes the body, if it does. The dead can't be hit.
    pub fn hit_test(&self, ray: &Ray) -> Option<Vector> {
        if self.is_dead() {
            return None;
        }
        let hit = self.billboard(ray).hit_test(ray)?;
        ((hit - self.position).length() < Self::RADIUS).then_some(hit)
    }
}

impl Actor for Monster {
    fn radius(&self) -> f64 {
        Self::RADIUS
    }

    fn position(&self) -> Vector {
        self.position
    }

    fn position_mut(&mut self) -> &mut Vector {
        &mut self.position
    }

    fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}
