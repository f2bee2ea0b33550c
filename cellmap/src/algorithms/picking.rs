use crate::algorithms::reconcile::Reconciler;
use crate::geometry::math::{dist_sq, point_in_polygon};
use crate::model::{PointId, Vec2};

// Later markers draw on top, so the newest hit wins a tie in distance.
pub fn pick_marker(r: &Reconciler, x: f32, y: f32, tol: f32) -> Option<(PointId, f32)> {
    let p = Vec2::new(x, y);
    let mut best: Option<(PointId, f32)> = None;
    for m in r.markers() {
        let reach = m.radius + tol;
        let d2 = dist_sq(m.at, p);
        if d2 <= reach*reach && best.map_or(true, |(_, bd)| d2 <= bd) { best = Some((m.id, d2)); }
    }
    best.map(|(id, d2)| (id, d2.sqrt()))
}

pub fn cell_at(r: &Reconciler, x: f32, y: f32) -> Option<PointId> {
    let p = Vec2::new(x, y);
    r.cells().filter(|c| point_in_polygon(p, &c.points)).map(|c| c.id).last()
}
