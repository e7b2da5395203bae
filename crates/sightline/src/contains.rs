//! Crossing-number (even–odd) point-in-polygon test.
//!
//! An edge `(v_j, v_i)` counts as a crossing when it straddles the horizontal
//! line through the point (`(y_i > p.y) != (y_j > p.y)`) and its x-intercept
//! lies strictly to the right of the point. Odd parity means inside.
//!
//! Points exactly on the boundary may land on either side. Loops with fewer
//! than 3 vertices contain nothing.

use crate::geom::{Point, Polygon};

/// True if `point` lies inside `polygon` under the even–odd rule.
pub fn point_in_polygon(point: Point, polygon: &Polygon) -> bool {
    contains_points(point, &polygon.verts)
}

/// Same test over a raw vertex loop.
pub fn contains_points(point: Point, verts: &[Point]) -> bool {
    let n = verts.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (vi, vj) = (verts[i], verts[j]);
        // Straddling implies vi.y != vj.y, so the divide below is safe.
        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
