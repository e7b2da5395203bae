//! Ray vs. segment intersection.
//!
//! Model
//! - The ray is the infinite half-line from `ray.a` through `ray.b`; the edge
//!   is the closed segment `edge.a → edge.b`.
//! - Solve `ray.a + t1·r = edge.a + t2·s` with `r = ray.b − ray.a`,
//!   `s = edge.b − edge.a`. Accept `t1 >= 0` and `t2 ∈ [0, 1]`.
//! - The parallel test is a relative cross-product check, so nearly parallel
//!   pairs are rejected before the divide instead of producing huge `t1`.
//!   Collinear overlap counts as parallel and yields no hit.

use crate::geom::{cross, GeomCfg, Point, Segment};

/// Accepted intersection: the crossing point and its distance from the ray origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub point: Point,
    pub dist: f64,
}

/// Nearest crossing of the ray `ray` with the finite segment `edge`, if any.
///
/// Zero-length rays or edges (norm `<= cfg.eps_len`, or non-finite) return `None`.
pub fn intersect(ray: &Segment, edge: &Segment, cfg: GeomCfg) -> Option<Hit> {
    let r = ray.dir();
    let s = edge.dir();
    let r_len = r.norm();
    let s_len = s.norm();
    // Negated comparisons also reject NaN lengths.
    if !(r_len > cfg.eps_len) || !(s_len > cfg.eps_len) {
        return None;
    }
    let denom = cross(r, s);
    if !(denom.abs() > cfg.eps_parallel * r_len * s_len) {
        return None;
    }
    let q = edge.a - ray.a;
    let t1 = cross(q, s) / denom;
    let t2 = cross(q, r) / denom;
    if t1 < 0.0 || !(0.0..=1.0).contains(&t2) {
        return None;
    }
    Some(Hit {
        point: ray.point_at(t1),
        dist: t1 * r_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{vector, Matrix2, Vector2};
    use proptest::prelude::*;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(vector![ax, ay], vector![bx, by])
    }

    #[test]
    fn axis_aligned_blocker() {
        let ray = seg(0.0, 0.0, 10.0, 0.0);
        let edge = seg(5.0, -5.0, 5.0, 5.0);
        let hit = intersect(&ray, &edge, GeomCfg::default()).expect("blocked");
        assert!((hit.point - vector![5.0, 0.0]).norm() < 1e-12);
        assert!((hit.dist - 5.0).abs() < 1e-12);
    }

    #[test]
    fn ray_extends_past_its_far_point() {
        // The edge sits beyond b; the ray is a half-line, so this still hits.
        let ray = seg(0.0, 0.0, 1.0, 0.0);
        let edge = seg(5.0, -1.0, 5.0, 1.0);
        let hit = intersect(&ray, &edge, GeomCfg::default()).unwrap();
        assert!((hit.dist - 5.0).abs() < 1e-12);
    }

    #[test]
    fn behind_origin_and_outside_edge_are_rejected() {
        let cfg = GeomCfg::default();
        let ray = seg(0.0, 0.0, 1.0, 0.0);
        assert!(intersect(&ray, &seg(-3.0, -1.0, -3.0, 1.0), cfg).is_none());
        assert!(intersect(&ray, &seg(3.0, 1.0, 3.0, 2.0), cfg).is_none());
        // Endpoint exactly on the ray counts.
        let hit = intersect(&ray, &seg(3.0, 0.0, 3.0, 2.0), cfg).unwrap();
        assert!((hit.point - vector![3.0, 0.0]).norm() < 1e-12);
    }

    #[test]
    fn parallel_antiparallel_and_collinear_are_no_hit() {
        let cfg = GeomCfg::default();
        let ray = seg(0.0, 0.0, 1.0, 1.0);
        assert!(intersect(&ray, &seg(0.0, 1.0, 2.0, 3.0), cfg).is_none());
        assert!(intersect(&ray, &seg(2.0, 3.0, 0.0, 1.0), cfg).is_none());
        // Collinear and overlapping.
        assert!(intersect(&ray, &seg(0.5, 0.5, 3.0, 3.0), cfg).is_none());
        assert!(intersect(&ray, &seg(3.0, 3.0, 0.5, 0.5), cfg).is_none());
        // Nearly parallel: sine of the angle below eps_parallel.
        let nearly = seg(0.0, 1.0, 1e6, 1e6 + 1.0 + 1e-8);
        assert!(intersect(&ray, &nearly, cfg).is_none());
    }

    #[test]
    fn degenerate_inputs_do_not_divide_by_zero() {
        let cfg = GeomCfg::default();
        let point_ray = seg(1.0, 1.0, 1.0, 1.0);
        assert!(intersect(&point_ray, &seg(0.0, 0.0, 2.0, 2.0), cfg).is_none());
        let point_edge = seg(3.0, 0.0, 3.0, 0.0);
        assert!(intersect(&seg(0.0, 0.0, 1.0, 0.0), &point_edge, cfg).is_none());
        let nan_ray = seg(f64::NAN, 0.0, 1.0, 0.0);
        assert!(intersect(&nan_ray, &seg(3.0, -1.0, 3.0, 1.0), cfg).is_none());
    }

    /// Independent reference: solve [r, -s] (t1, t2)^T = q with a 2×2 inverse.
    fn reference_solve(ray: &Segment, edge: &Segment) -> Option<(Vector2<f64>, f64, f64)> {
        let m = Matrix2::from_columns(&[ray.dir(), -edge.dir()]);
        let t = m.try_inverse()? * (edge.a - ray.a);
        Some((ray.a + ray.dir() * t[0], t[0], t[1]))
    }

    fn coord() -> impl Strategy<Value = f64> {
        -100.0f64..100.0
    }

    proptest! {
        #[test]
        fn agrees_with_reference_solve(
            ax in coord(), ay in coord(), bx in coord(), by in coord(),
            cx in coord(), cy in coord(), dx in coord(), dy in coord(),
        ) {
            let ray = seg(ax, ay, bx, by);
            let edge = seg(cx, cy, dx, dy);
            let r = ray.dir();
            let s = edge.dir();
            // Stay clear of degenerate and near-parallel pairs and of the acceptance
            // boundaries, where both solvers may legitimately disagree.
            prop_assume!(r.norm() > 1e-3 && s.norm() > 1e-3);
            prop_assume!(cross(r, s).abs() > 1e-3 * r.norm() * s.norm());
            let (p, t1, t2) = reference_solve(&ray, &edge).unwrap();
            prop_assume!(t1.abs() > 1e-6 && t2.abs() > 1e-6 && (t2 - 1.0).abs() > 1e-6);

            let got = intersect(&ray, &edge, GeomCfg::default());
            if t1 >= 0.0 && (0.0..=1.0).contains(&t2) {
                let hit = got.expect("reference says hit");
                prop_assert!((hit.point - p).norm() < 1e-9 * (1.0 + p.norm()));
                prop_assert!((hit.dist - t1 * r.norm()).abs() < 1e-9 * (1.0 + hit.dist));
                prop_assert!(hit.dist >= 0.0);
            } else {
                prop_assert!(got.is_none());
            }
        }

        // Integer inputs keep every product exact, so "parallel" really is parallel.
        #[test]
        fn parallel_offsets_never_hit(
            ax in -100i32..100, ay in -100i32..100, dx in -20i32..20, dy in -20i32..20,
            off in 1i32..50, shift in -50i32..50, len in 1i32..5, flip in any::<bool>(),
        ) {
            prop_assume!(dx != 0 || dy != 0);
            let (off, shift, len) = (off as f64, shift as f64, len as f64);
            let d = vector![dx as f64, dy as f64];
            let n = vector![-d.y, d.x];
            let origin = vector![ax as f64, ay as f64];
            let ray = Segment::new(origin, origin + d);
            let start = ray.a + n * off + d * shift;
            let end = start + d * len;
            let edge = if flip { Segment::new(end, start) } else { Segment::new(start, end) };
            prop_assert!(intersect(&ray, &edge, GeomCfg::default()).is_none());
            // Collinear copy (zero offset) is also rejected.
            let on_line = Segment::new(ray.a + d * shift, ray.a + d * (shift + len));
            prop_assert!(intersect(&ray, &on_line, GeomCfg::default()).is_none());
        }
    }
}
