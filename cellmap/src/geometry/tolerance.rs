// Centralized tolerances and helpers for robust geometry

pub const EPS_POS: f32 = 1e-4;            // point coincidence threshold (px)
pub const EPS_CELL_AREA: f32 = 1e-6;      // below this a clipped cell is degenerate (px^2)
pub const EPS_AREA_TIE: f32 = 4.0 * f32::EPSILON; // relative rounding spread treated as equal areas
pub const EPS_DENOM: f32 = 1e-12;         // denominator guard for ratios

#[inline] pub fn clamp01(x: f32) -> f32 { x.max(0.0).min(1.0) }
#[inline] pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool { (a - b).abs() <= eps }

#[inline]
pub fn safe_div(num: f32, den: f32, fallback: f32) -> f32 {
    if den.abs() <= EPS_DENOM { fallback } else { num/den }
}
