// Centralized limits for the strict API and config validation

// Scene size cap; the partition is quadratic in the point count
pub const MAX_POINTS: usize = 10_000;

// Numeric bounds
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 =  10_000_000.0;
pub const EXTENT_MAX: f32 = 1_000_000.0;
pub const RADIUS_MAX: f32 = 1_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_extent_bounds(w: f32) -> bool { w.is_finite() && w > 0.0 && w <= EXTENT_MAX }
