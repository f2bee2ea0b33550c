//! Area → color encoding.
//!
//! The scale is fit to the areas being colored, so every color depends on
//! the whole set: adding or removing any point can recolor every cell.

use crate::algorithms::partition::Cell;
use crate::geometry::tolerance::{clamp01, safe_div, EPS_AREA_TIE};
use crate::model::{Color, Hsl};

/// Low end of the ramp (smallest area).
pub const RAMP_LOW: Hsl = Hsl { h: 0.0, s: 0.6, l: 0.7 };
/// High end of the ramp (largest area).
pub const RAMP_HIGH: Hsl = Hsl { h: 120.0, s: 0.6, l: 0.7 };

pub fn cell_areas(cells: &[Cell]) -> Vec<f32> {
    cells.iter().map(Cell::area).collect()
}

/// Linear map from the observed area domain onto [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaScale {
    pub min: f32,
    pub max: f32,
    /// All areas equal; the domain was widened to `[min, min + 1]`.
    pub tied: bool,
}

impl AreaScale {
    pub fn fit(areas: &[f32]) -> AreaScale {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &a in areas {
            min = min.min(a);
            max = max.max(a);
        }
        if areas.is_empty() {
            return AreaScale { min: 0.0, max: 1.0, tied: true };
        }
        // Equal up to float rounding of the clipped areas.
        let tied = max - min <= EPS_AREA_TIE * max.abs().max(1.0);
        if tied {
            AreaScale { min, max: min + 1.0, tied }
        } else {
            AreaScale { min, max, tied }
        }
    }

    pub fn domain(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn map(&self, area: f32) -> f32 {
        if self.tied {
            return 1.0;
        }
        safe_div(area - self.min, self.max - self.min, 1.0)
    }
}

/// Interpolates hue, saturation and lightness independently, taking the
/// shorter way around the hue circle.
pub fn interpolate_hsl(a: Hsl, b: Hsl, t: f32) -> Hsl {
    let mut dh = b.h - a.h;
    if dh > 180.0 {
        dh -= 360.0;
    } else if dh < -180.0 {
        dh += 360.0;
    }
    Hsl { h: a.h + dh * t, s: a.s + (b.s - a.s) * t, l: a.l + (b.l - a.l) * t }
}

pub fn hsl_to_rgb(c: Hsl) -> Color {
    let h = c.h.rem_euclid(360.0);
    let s = clamp01(c.s);
    let l = clamp01(c.l);
    let spread = if l < 0.5 { l } else { 1.0 - l };
    let m2 = l + spread * s;
    let m1 = 2.0 * l - m2;
    let channel = |h: f32| -> u8 {
        let v = if h < 60.0 {
            m1 + (m2 - m1) * h / 60.0
        } else if h < 180.0 {
            m2
        } else if h < 240.0 {
            m1 + (m2 - m1) * (240.0 - h) / 60.0
        } else {
            m1
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };
    Color {
        r: channel(if h >= 240.0 { h - 240.0 } else { h + 120.0 }),
        g: channel(h),
        b: channel(if h < 120.0 { h + 240.0 } else { h - 120.0 }),
    }
}

pub fn color_for(t: f32) -> Color {
    let t = if t.is_nan() { 1.0 } else { clamp01(t) };
    hsl_to_rgb(interpolate_hsl(RAMP_LOW, RAMP_HIGH, t))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shade {
    pub area: f32,
    /// Position on the ramp, 0 = smallest, 1 = largest.
    pub t: f32,
    pub color: Color,
}

/// Areas, scale and colors for one recomputation, in cell order.
pub fn shade(cells: &[Cell]) -> (AreaScale, Vec<Shade>) {
    let areas = cell_areas(cells);
    let scale = AreaScale::fit(&areas);
    let shades = areas
        .into_iter()
        .map(|area| {
            let t = scale.map(area);
            Shade { area, t, color: color_for(t) }
        })
        .collect();
    (scale, shades)
}
