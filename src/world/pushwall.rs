use crate::geometry::{Billboard, Rect, Vector, vector};
use crate::map::Tile;
use crate::world::{Actor, SoundName, World};

/// Secret wall block that slides one tile away from the player who pushes
/// it, then locks to the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Pushwall {
    pub position: Vector,
    pub velocity: Vector,
    /// Wall kind whose textures cover the faces.
    pub tile: Tile,
    pub sound_channel: usize,
    target: Option<Vector>,
}

impl Pushwall {
    pub const RADIUS: f64 = 0.5;
    pub const SPEED: f64 = 0.25;

    pub fn new(position: Vector, tile: Tile, sound_channel: usize) -> Self {
        Self { position, velocity: Vector::ZERO, tile, sound_channel, target: None }
    }

    pub fn is_moving(&self) -> bool {
        self.target.is_some()
    }

    /// The faces visible from `viewpoint`, wound so each face's outward
    /// normal is `direction.perp()`.
    pub fn billboards(&self, viewpoint: Vector) -> Vec<Billboard> {
        let Rect { min: top_left, max: bottom_right } = self.rect();
        let top_right = vector(bottom_right.x, top_left.y);
        let bottom_left = vector(top_left.x, bottom_right.y);
        let [vertical, horizontal] = self.tile.textures();

        [
            Billboard::new(top_left, vector(0.0, 1.0), 1.0, vertical),
            Billboard::new(top_right, vector(-1.0, 0.0), 1.0, horizontal),
            Billboard::new(bottom_right, vector(0.0, -1.0), 1.0, vertical),
            Billboard::new(bottom_left, vector(1.0, 0.0), 1.0, horizontal),
        ]
        .into_iter()
        .filter(|face| (viewpoint - face.start).dot(face.direction.perp()) > 0.0)
        .collect()
    }

    pub fn update(&mut self, world: &mut World) {
        if let Some(target) = self.target {
            if self.position == target {
                self.halt(world);
            } else if let Some(hit) = self.intersection_with_world(world) {
                if hit.x.abs() > 0.001 || hit.y.abs() > 0.001 {
                    self.position = vector(self.position.x.floor() + 0.5, self.position.y.floor() + 0.5);
                    self.halt(world);
                }
            }
            return;
        }

        let Some(hit) = world.player().intersection_with_pushwall(self) else {
            return;
        };
        let direction = if hit.x.abs() > hit.y.abs() {
            vector(hit.x.signum(), 0.0)
        } else {
            vector(0.0, hit.y.signum())
        };
        let destination = self.position + direction;
        let blocked = world.map().get(destination.x.floor() as i32, destination.y.floor() as i32).is_wall()
            || world.pushwalls().iter().any(|other| other.position == destination);
        if !blocked {
            self.target = Some(destination);
            self.velocity = direction * Self::SPEED;
            world.play_sound(Some(SoundName::WallSlide), self.position, Some(self.sound_channel));
        }
    }

    /// Integrate velocity, never overshooting the target cell.
    pub fn advance(&mut self, time_step: f64) {
        let Some(target) = self.target else {
            return;
        };
        let step = self.velocity * time_step;
        if step.length() >= (target - self.position).length() {
            self.position = target;
        } else {
            self.position += step;
        }
    }

    fn halt(&mut self, world: &mut World) {
        self.velocity = Vector::ZERO;
        self.target = None;
        world.play_sound(Some(SoundName::WallThud), self.position, None);
        world.play_sound(None, self.position, Some(self.sound_channel));
    }
}

impl Actor for Pushwall {
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
        false
    }
}
