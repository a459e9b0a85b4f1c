use crate::geometry::{Rect, Vector, vector};
use crate::map::Tilemap;
use crate::world::{Door, Pushwall, World};

/// Push-out passes per tick before giving up on a wedged actor.
const MAX_AVOID_ATTEMPTS: usize = 10;

/// Anything with a square footprint that collides with the level.
///
/// Implementors provide the three accessors; the collision helpers are shared.
pub trait Actor {
    fn radius(&self) -> f64;
    fn position(&self) -> Vector;
    fn position_mut(&mut self) -> &mut Vector;
    fn is_dead(&self) -> bool;

    fn rect(&self) -> Rect {
        Rect::around(self.position(), self.radius())
    }

    /// Largest overlap with any wall tile under the footprint.
    fn intersection_with_map(&self, map: &Tilemap) -> Option<Vector> {
        let rect = self.rect();
        let (min_x, max_x) = (rect.min.x.floor() as i32, rect.max.x.floor() as i32);
        let (min_y, max_y) = (rect.min.y.floor() as i32, rect.max.y.floor() as i32);

        let mut largest: Option<Vector> = None;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if !map.get(x, y).is_wall() {
                    continue;
                }
                let wall = Rect::new(vector(x as f64, y as f64), vector(x as f64 + 1.0, y as f64 + 1.0));
                if let Some(hit) = rect.intersection(&wall) {
                    if hit.length() > largest.map_or(0.0, |l| l.length()) {
                        largest = Some(hit);
                    }
                }
            }
        }
        largest
    }

    fn intersection_with_door(&self, door: &Door) -> Option<Vector> {
        self.rect().intersection(&door.rect())
    }

    fn intersection_with_pushwall(&self, pushwall: &Pushwall) -> Option<Vector> {
        self.rect().intersection(&pushwall.rect())
    }

    /// First overlap with static geometry: walls, then doors, then any
    /// pushwall other than one sitting exactly where this actor is.
    fn intersection_with_world(&self, world: &World) -> Option<Vector> {
        if let Some(hit) = self.intersection_with_map(world.map()) {
            return Some(hit);
        }
        if let Some(hit) = world.doors().iter().find_map(|door| self.intersection_with_door(door)) {
            return Some(hit);
        }
        world
            .pushwalls()
            .iter()
            .filter(|pushwall| pushwall.position != self.position())
            .find_map(|pushwall| self.intersection_with_pushwall(pushwall))
    }

    /// Overlap with another actor. The dead don't collide.
    fn intersection_with_actor(&self, other: &dyn Actor) -> Option<Vector> {
        if self.is_dead() || other.is_dead() {
            return None;
        }
        self.rect().intersection(&other.rect())
    }

    fn avoid_walls(&mut self, world: &World) {
        for _ in 0..MAX_AVOID_ATTEMPTS {
            let Some(hit) = self.intersection_with_world(world) else {
                break;
            };
            *self.position_mut() -= hit;
        }
    }

    /// Outside the playable interior, inside a wall cell, or inside a
    /// pushwall.
    fn is_stuck(&self, world: &World) -> bool {
        let position = self.position();
        let size = world.map().size();
        if position.x < 1.0 || position.x > size.x - 1.0 || position.y < 1.0 || position.y > size.y - 1.0 {
            return true;
        }
        if world.map().get(position.x.floor() as i32, position.y.floor() as i32).is_wall() {
            return true;
        }
        world.pushwalls().iter().any(|pushwall| {
            (position.x - pushwall.position.x).abs() < 0.6 && (position.y - pushwall.position.y).abs() < 0.6
        })
    }
}
