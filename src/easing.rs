//! Easing curves mapping normalised time `t ∈ [0, 1]` to progress.

#[inline]
pub fn linear(t: f64) -> f64 {
    t
}

#[inline]
pub fn ease_in(t: f64) -> f64 {
    t * t
}

#[inline]
pub fn ease_out(t: f64) -> f64 {
    1.0 - ease_in(1.0 - t)
}

/// Quadratic in for the first half, quadratic out for the second.
pub fn ease_in_ease_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * ease_in(t)
    } else {
        4.0 * t - 2.0 * ease_in(t) - 1.0
    }
}
