use crate::animation::Animation;
use crate::geometry::{Ray, Rotation, Vector, vector};
use crate::world::{Actor, Input, SoundName, Weapon, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Firing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vector,
    pub velocity: Vector,
    /// Unit facing vector.
    pub direction: Vector,
    pub health: f64,
    pub state: PlayerState,
    pub animation: Animation,
    pub sound_channel: usize,
    weapon: Weapon,
    ammo: f64,
}

impl Player {
    /// World units per second at full input.
    pub const SPEED: f64 = 2.0;
    /// Radians per second at full input.
    pub const TURNING_SPEED: f64 = std::f64::consts::PI;
    pub const RADIUS: f64 = 0.25;
    pub const MAX_HEALTH: f64 = 100.0;

    pub fn new(position: Vector, sound_channel: usize) -> Self {
        let weapon = Weapon::default();
        let attributes = weapon.attributes();
        Self {
            position,
            velocity: Vector::ZERO,
            direction: vector(1.0, 0.0),
            health: Self::MAX_HEALTH,
            state: PlayerState::Idle,
            animation: attributes.idle_animation,
            sound_channel,
            weapon,
            ammo: attributes.default_ammo,
        }
    }

    pub fn weapon(&self) -> Weapon {
        self.weapon
    }

    pub fn ammo(&self) -> f64 {
        self.ammo
    }

    pub fn is_moving(&self) -> bool {
        self.velocity.x != 0.0 || self.velocity.y != 0.0
    }

    pub fn can_fire(&self) -> bool {
        if self.ammo <= 0.0 {
            return false;
        }
        match self.state {
            PlayerState::Idle => true,
            PlayerState::Firing => self.animation.time >= self.weapon.attributes().cooldown,
        }
    }

    /// Equip `weapon` with a fresh magazine.
    pub fn set_weapon(&mut self, weapon: Weapon) {
        let attributes = weapon.attributes();
        self.weapon = weapon;
        self.animation = attributes.idle_animation;
        self.ammo = attributes.default_ammo;
    }

    pub fn update(&mut self, input: &Input, world: &mut World) {
        let was_moving = self.is_moving();

        self.direction = input.rotation.apply(self.direction);
        self.velocity = self.direction * input.speed * Self::SPEED;

        if input.is_firing && self.can_fire() {
            self.fire(world);
        }

        match self.state {
            PlayerState::Idle => {
                if self.ammo <= 0.0 {
                    self.set_weapon(Weapon::Pistol);
                }
            }
            PlayerState::Firing => {
                if self.animation.is_completed() {
                    self.state = PlayerState::Idle;
                    self.animation = self.weapon.attributes().idle_animation;
                }
            }
        }

        if self.is_moving() && !was_moving {
            world.play_sound(Some(SoundName::PlayerWalk), self.position, Some(self.sound_channel));
        } else if !self.is_moving() && was_moving {
            world.play_sound(None, self.position, Some(self.sound_channel));
        }
    }

    fn fire(&mut self, world: &mut World) {
        let attributes = self.weapon.attributes();
        self.state = PlayerState::Firing;
        self.ammo -= 1.0;
        self.animation = attributes.fire_animation;
        world.play_sound(Some(attributes.fire_sound), self.position, None);

        let damage = attributes.damage / attributes.projectiles as f64;
        let mut hit_position = None;
        let mut miss_position = None;
        for _ in 0..attributes.projectiles {
            let sine = world.rng_mut().range_f64(-attributes.spread, attributes.spread);
            let cosine = (1.0 - sine * sine).sqrt();
            let direction = Rotation::new(sine, cosine).apply(self.direction);
            let ray = Ray::new(self.position, direction);

            match world.pick_monster(&ray) {
                Some(index) => {
                    world.hurt_monster(index, damage);
                    hit_position = Some(world.monsters()[index].position);
                }
                None => miss_position = Some(world.hit_test(&ray)),
            }
        }

        if let Some(position) = hit_position {
            world.play_sound(Some(SoundName::MonsterHit), position, None);
        }
        if let Some(position) = miss_position {
            world.play_sound(Some(SoundName::Ricochet), position, None);
        }
    }
}

impl Actor for Player {
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
