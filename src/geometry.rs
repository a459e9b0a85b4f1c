// =============================================================================
// GEOMETRY.RS: 2D primitives for the tile world
//
// Everything above this module (map, actors, renderer) is expressed in terms
// of these few types:
// - Vector / Rotation for positions, directions and turning
// - Rect for axis-aligned collision
// - Ray / Billboard for hit-testing walls, doors and sprites
// =============================================================================

use glam::{DMat2, DVec2};

use crate::texture::Texture;

/// World-space vector. One unit is one map tile.
///
/// `perp()` gives the orthogonal `(-y, x)`, which is what the view plane and
/// the sprite billboards are built from.
pub type Vector = DVec2;

/// Shorthand constructor used throughout the engine.
#[inline]
pub const fn vector(x: f64, y: f64) -> Vector {
    DVec2::new(x, y)
}

// =============================================================================
// ROTATION
// =============================================================================

/// A 2×2 rotation matrix built from a precomputed sine and cosine.
///
/// The simulation never calls `sin`/`cos` itself: the platform layer turns
/// its input deltas into a `Rotation` and hands it over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation(DMat2);

impl Rotation {
    pub const IDENTITY: Self = Self(DMat2::IDENTITY);

    pub fn new(sine: f64, cosine: f64) -> Self {
        Self(DMat2::from_cols(DVec2::new(cosine, sine), DVec2::new(-sine, cosine)))
    }

    /// Rotate `v` by this matrix.
    #[inline]
    pub fn apply(&self, v: Vector) -> Vector {
        self.0 * v
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// =============================================================================
// RECT
// =============================================================================

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vector,
    pub max: Vector,
}

impl Rect {
    pub const fn new(min: Vector, max: Vector) -> Self {
        Self { min, max }
    }

    /// Square of half-size `radius` centred on `center`.
    pub fn around(center: Vector, radius: f64) -> Self {
        let half = DVec2::splat(radius);
        Self { min: center - half, max: center + half }
    }

    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    /// Minimum-penetration vector between `self` and `other`.
    ///
    /// Returns the shortest of the four axis overlaps (left, right, up, down).
    /// Subtracting it from `self`'s position separates the two rects. Touching
    /// edges do not count as an overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Vector> {
        let left = DVec2::new(self.max.x - other.min.x, 0.0);
        if left.x <= 0.0 {
            return None;
        }
        let right = DVec2::new(self.min.x - other.max.x, 0.0);
        if right.x >= 0.0 {
            return None;
        }
        let up = DVec2::new(0.0, self.max.y - other.min.y);
        if up.y <= 0.0 {
            return None;
        }
        let down = DVec2::new(0.0, self.min.y - other.max.y);
        if down.y >= 0.0 {
            return None;
        }

        // First shortest wins on ties.
        let mut best = left;
        for candidate in [right, up, down] {
            if candidate.length() < best.length() {
                best = candidate;
            }
        }
        Some(best)
    }
}

// =============================================================================
// RAY
// =============================================================================

/// A half-line from `origin` along a unit-length `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector,
    pub direction: Vector,
}

impl Ray {
    pub const fn new(origin: Vector, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// Slope and y-intercept of the infinite line through this ray.
    fn slope_intercept(&self) -> (f64, f64) {
        let slope = self.direction.y / self.direction.x;
        let intercept = self.origin.y - slope * self.origin.x;
        (slope, intercept)
    }
}

// =============================================================================
// BILLBOARD
// =============================================================================

/// Nudge applied to near-vertical directions so slopes stay finite.
const VERTICAL_EPSILON: f64 = 0.00001;

/// A textured line segment: door leaf, pushwall face or sprite plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Billboard {
    pub start: Vector,
    pub direction: Vector,
    pub length: f64,
    pub texture: Texture,
}

impl Billboard {
    pub const fn new(start: Vector, direction: Vector, length: f64, texture: Texture) -> Self {
        Self { start, direction, length, texture }
    }

    pub fn end(&self) -> Vector {
        self.start + self.direction * self.length
    }

    /// Where `ray` crosses this segment, if it does.
    ///
    /// Hits behind the ray origin, or outside `[0, length]` along the
    /// billboard, are rejected. Parallel lines never hit.
    pub fn hit_test(&self, ray: &Ray) -> Option<Vector> {
        let mut lhs = *ray;
        let mut rhs = Ray::new(self.start, self.direction);

        if lhs.direction.x.abs() < VERTICAL_EPSILON {
            lhs.direction.x = VERTICAL_EPSILON;
        }
        if rhs.direction.x.abs() < VERTICAL_EPSILON {
            rhs.direction.x = VERTICAL_EPSILON;
        }

        let (slope1, intercept1) = lhs.slope_intercept();
        let (slope2, intercept2) = rhs.slope_intercept();
        if slope1 == slope2 {
            return None;
        }

        let x = (intercept1 - intercept2) / (slope2 - slope1);
        let y = slope1 * x + intercept1;

        let distance_along_ray = (x - lhs.origin.x) / lhs.direction.x;
        if distance_along_ray < 0.0 {
            return None;
        }

        let distance_along_billboard = (x - rhs.origin.x) / rhs.direction.x;
        if distance_along_billboard < 0.0 || distance_along_billboard > self.length {
            return None;
        }

        Some(DVec2::new(x, y))
    }
}
