use crate::model::Vec2;

/// Shoelace sum; sign depends on winding.
pub fn signed_area(poly: &[Vec2]) -> f32 {
    if poly.len() < 3 { return 0.0; }
    let mut a = 0.0f64;
    for i in 0..poly.len() {
        let j = (i + 1) % poly.len();
        a += poly[i].x as f64 * poly[j].y as f64 - poly[j].x as f64 * poly[i].y as f64;
    }
    (0.5 * a) as f32
}

pub fn polygon_area(poly: &[Vec2]) -> f32 { signed_area(poly).abs() }

pub fn dist_sq(a: Vec2, b: Vec2) -> f32 {
    let dx = a.x - b.x; let dy = a.y - b.y;
    dx*dx + dy*dy
}

// Even-odd crossing test; boundary points may land on either side.
pub fn point_in_polygon(p: Vec2, poly: &[Vec2]) -> bool {
    if poly.len() < 3 { return false; }
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let (a, b) = (poly[i], poly[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross { inside = !inside; }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(s: f32) -> Vec<Vec2> {
        vec![Vec2::new(0.0, 0.0), Vec2::new(s, 0.0), Vec2::new(s, s), Vec2::new(0.0, s)]
    }

    #[test]
    fn area_is_winding_independent() {
        let mut sq = square(10.0);
        assert_eq!(polygon_area(&sq), 100.0);
        sq.reverse();
        assert_eq!(polygon_area(&sq), 100.0);
        assert!(signed_area(&sq) < 0.0);
    }

    #[test]
    fn degenerate_area_is_zero() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)]), 0.0);
    }

    #[test]
    fn containment() {
        let sq = square(10.0);
        assert!(point_in_polygon(Vec2::new(5.0, 5.0), &sq));
        assert!(!point_in_polygon(Vec2::new(15.0, 5.0), &sq));
        assert!(!point_in_polygon(Vec2::new(5.0, -1.0), &sq));
    }
}
