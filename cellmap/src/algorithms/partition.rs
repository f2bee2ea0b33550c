//! Bounded proximity partition.
//!
//! Every seed starts with the full bounding rectangle and is clipped by the
//! perpendicular bisector against each other seed. The result is recomputed
//! from scratch on every call and depends only on the input order and bounds.

use crate::geometry::math::{dist_sq, polygon_area};
use crate::geometry::tolerance::{approx_eq, EPS_CELL_AREA, EPS_POS};
use crate::model::{PointId, Rect, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub id: PointId,
    /// `None` when no finite cell exists for this seed.
    pub polygon: Option<Vec<Vec2>>,
}

impl Cell {
    pub fn area(&self) -> f32 {
        self.polygon.as_deref().map_or(0.0, polygon_area)
    }
}

pub fn compute(points: &[(PointId, Vec2)], bounds: Rect) -> Vec<Cell> {
    let owners = cluster_owners(points);
    let mut cells = Vec::with_capacity(points.len());
    for (i, &(id, seed)) in points.iter().enumerate() {
        let polygon = if owners[i] == Some(i) { cell_for(points, &owners, i, bounds) } else { None };
        if polygon.is_none() {
            log::warn!("degenerate cell for point {} at ({}, {})", id, seed.x, seed.y);
        }
        cells.push(Cell { id, polygon });
    }
    cells
}

fn coincident(a: Vec2, b: Vec2) -> bool {
    approx_eq(a.x, b.x, EPS_POS) && approx_eq(a.y, b.y, EPS_POS)
}

/// Index of the earliest seed transitively coincident with each seed, or
/// `None` for non-finite seeds. Only owners take part in clipping.
fn cluster_owners(points: &[(PointId, Vec2)]) -> Vec<Option<usize>> {
    fn root(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }
    let mut parent: Vec<usize> = (0..points.len()).collect();
    for i in 0..points.len() {
        let a = points[i].1;
        if !a.is_finite() {
            continue;
        }
        for j in 0..i {
            let b = points[j].1;
            if b.is_finite() && coincident(a, b) {
                let (ra, rb) = (root(&mut parent, i), root(&mut parent, j));
                // the smaller index stays the root
                let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
                parent[hi] = lo;
            }
        }
    }
    (0..points.len())
        .map(|i| if points[i].1.is_finite() { Some(root(&mut parent, i)) } else { None })
        .collect()
}

fn cell_for(
    points: &[(PointId, Vec2)],
    owners: &[Option<usize>],
    i: usize,
    bounds: Rect,
) -> Option<Vec<Vec2>> {
    let seed = points[i].1;
    let mut poly = bounds.corners();
    for (j, &(_, other)) in points.iter().enumerate() {
        if j == i || owners[j] != Some(j) {
            continue;
        }
        // The bisector cannot reach the polygon when every vertex is closer
        // to the seed than half the seed distance.
        let reach = poly.iter().map(|&v| dist_sq(v, seed)).fold(0.0f32, f32::max);
        if dist_sq(other, seed) * 0.25 > reach {
            continue;
        }
        poly = clip_half_plane(&poly, seed, other);
        if poly.len() < 3 {
            return None;
        }
    }
    if polygon_area(&poly) < EPS_CELL_AREA {
        return None;
    }
    Some(poly)
}

/// Signed distance of `p` past the bisector of `seed` and `other`, positive
/// on `other`'s side.
fn bisector_side(p: Vec2, seed: Vec2, other: Vec2) -> f64 {
    let (sx, sy) = (seed.x as f64, seed.y as f64);
    let (ox, oy) = (other.x as f64, other.y as f64);
    let (mx, my) = ((sx + ox) * 0.5, (sy + oy) * 0.5);
    let (dx, dy) = (ox - sx, oy - sy);
    let len = (dx * dx + dy * dy).sqrt();
    ((p.x as f64 - mx) * dx + (p.y as f64 - my) * dy) / len
}

/// Sutherland–Hodgman against the half-plane closer to `seed` than `other`.
pub(crate) fn clip_half_plane(poly: &[Vec2], seed: Vec2, other: Vec2) -> Vec<Vec2> {
    let n = poly.len();
    let mut out: Vec<Vec2> = Vec::with_capacity(n + 1);
    if n == 0 {
        return out;
    }
    let eps = EPS_POS as f64;
    let mut prev = poly[n - 1];
    let mut prev_d = bisector_side(prev, seed, other);
    for &cur in poly {
        let cur_d = bisector_side(cur, seed, other);
        let cur_in = cur_d <= eps;
        let prev_in = prev_d <= eps;
        if cur_in != prev_in {
            let t = prev_d / (prev_d - cur_d);
            push_dedup(
                &mut out,
                Vec2::new(
                    (prev.x as f64 + (cur.x as f64 - prev.x as f64) * t) as f32,
                    (prev.y as f64 + (cur.y as f64 - prev.y as f64) * t) as f32,
                ),
            );
        }
        if cur_in {
            push_dedup(&mut out, cur);
        }
        prev = cur;
        prev_d = cur_d;
    }
    while out.len() > 1 && coincident(out[0], out[out.len() - 1]) {
        out.pop();
    }
    out
}

fn push_dedup(out: &mut Vec<Vec2>, p: Vec2) {
    if out.last().map_or(true, |&q| !coincident(p, q)) {
        out.push(p);
    }
}
