use super::*;
use nalgebra::vector;

#[test]
fn polygon_edges_close_the_loop() {
    let sq = Polygon::new(vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![1.0, 1.0],
        vector![0.0, 1.0],
    ]);
    let edges: Vec<Segment> = sq.edges().collect();
    assert_eq!(edges.len(), 4);
    assert_eq!(edges[3].a, vector![0.0, 1.0]);
    assert_eq!(edges[3].b, vector![0.0, 0.0]);
    assert!((sq.signed_area() - 1.0).abs() < 1e-12);
}

#[test]
fn degenerate_polygons_have_few_or_no_edges() {
    assert_eq!(Polygon::default().edges().count(), 0);
    assert_eq!(Polygon::new(vec![vector![1.0, 1.0]]).edges().count(), 0);
    // Two vertices: there and back again.
    assert_eq!(
        Polygon::new(vec![vector![0.0, 0.0], vector![1.0, 0.0]])
            .edges()
            .count(),
        2
    );
    assert!(matches!(
        Polygon::try_new(vec![vector![0.0, 0.0], vector![1.0, 0.0]]),
        Err(crate::GeomError::TooFewVertices { got: 2 })
    ));
}

#[test]
fn rotation_and_reflection_about_a_pivot() {
    let c = vector![2.0, 1.0];
    let p = vector![3.0, 1.0];
    let q = rotate_about(p, c, std::f64::consts::FRAC_PI_2);
    assert!((q - vector![2.0, 2.0]).norm() < 1e-12);
    let m = reflect_through(p, c);
    assert!((m - vector![1.0, 1.0]).norm() < 1e-12);
    // Reflection is an involution.
    assert!((reflect_through(m, c) - p).norm() < 1e-12);
}

#[test]
fn segment_parameterization() {
    let s = Segment::new(vector![1.0, 1.0], vector![4.0, 5.0]);
    assert!((s.length() - 5.0).abs() < 1e-12);
    assert_eq!(s.point_at(0.0), s.a);
    assert!((s.point_at(2.0) - vector![7.0, 9.0]).norm() < 1e-12);
    assert!((cross(vector![1.0, 0.0], vector![0.0, 1.0]) - 1.0).abs() < 1e-12);
    assert!((polar(std::f64::consts::PI) - vector![-1.0, 0.0]).norm() < 1e-12);
}
