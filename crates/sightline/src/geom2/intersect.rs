//! Line/line and segment/segment intersection.
//!
//! Both routines use the same 2×2 determinant. A zero determinant is tested
//! exactly; near-zero values are treated as regular (if ill-conditioned)
//! solves.

use nalgebra::Vector2;

use super::types::{GeomCfg, Line, Point, Segment};

#[inline]
fn det(a1: Point, a2: Point, b1: Point, b2: Point) -> f64 {
    (a1.x - a2.x) * (b1.y - b2.y) - (a1.y - a2.y) * (b1.x - b2.x)
}

/// Intersection of two infinite lines, `None` when they are parallel.
pub fn intersect(l1: &Line, l2: &Line) -> Option<Point> {
    let den = det(l1.a, l1.b, l2.a, l2.b);
    if den == 0.0 || !den.is_finite() {
        return None;
    }
    let c1 = l1.a.x * l1.b.y - l1.a.y * l1.b.x;
    let c2 = l2.a.x * l2.b.y - l2.a.y * l2.b.x;
    let x = (c1 * (l2.a.x - l2.b.x) - (l1.a.x - l1.b.x) * c2) / den;
    let y = (c1 * (l2.a.y - l2.b.y) - (l1.a.y - l1.b.y) * c2) / den;
    Some(Vector2::new(x, y))
}

/// True if the closed segments share at least one point.
///
/// Non-parallel pairs use the parametric test `t, u ∈ [0, 1]`. Pairs whose
/// determinant is within `eps_det` of zero (relative to both lengths) and
/// which are collinear intersect only when one contains an endpoint of the
/// other. Symmetric in its arguments.
pub fn segments_intersect(a: &Segment, b: &Segment, cfg: &GeomCfg) -> bool {
    let den = det(a.start, a.end, b.start, b.end);
    if !den.is_finite() {
        return false;
    }
    // Rounding leaves `den` slightly off zero for collinear pairs that are
    // not axis-aligned; t and u are noise there.
    let scale = a.length() * b.length();
    if den.abs() <= cfg.eps_det * scale && collinear(a, b, cfg) {
        return overlap(a, b);
    }
    if den != 0.0 {
        let t_num = (a.start.x - b.start.x) * (b.start.y - b.end.y)
            - (a.start.y - b.start.y) * (b.start.x - b.end.x);
        let u_num = (a.start.y - a.end.y) * (a.start.x - b.start.x)
            - (a.start.x - a.end.x) * (a.start.y - b.start.y);
        let t = t_num / den;
        let u = u_num / den;
        return (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u);
    }
    if !collinear(a, b, cfg) {
        return false;
    }
    overlap(a, b)
}

#[inline]
fn overlap(a: &Segment, b: &Segment) -> bool {
    a.contains(b.start) || a.contains(b.end) || b.contains(a.start) || b.contains(a.end)
}

fn collinear(a: &Segment, b: &Segment, cfg: &GeomCfg) -> bool {
    let on_a = a.distance_to_line(b.start) <= cfg.eps_det && a.distance_to_line(b.end) <= cfg.eps_det;
    let on_b = b.distance_to_line(a.start) <= cfg.eps_det && b.distance_to_line(a.end) <= cfg.eps_det;
    on_a || on_b
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn crossing_lines_meet() {
        let l1 = Line::new(vector![0.0, 0.0], vector![1.0, 1.0]);
        let l2 = Line::new(vector![0.0, 2.0], vector![2.0, 0.0]);
        let p = intersect(&l1, &l2).unwrap();
        assert!((p - vector![1.0, 1.0]).norm() < 1e-12);
    }

    #[test]
    fn parallel_lines_have_no_intersection() {
        let l1 = Line::new(vector![0.0, 0.0], vector![1.0, 0.0]);
        let l2 = Line::new(vector![0.0, 1.0], vector![3.0, 1.0]);
        assert!(l1.is_parallel(&l2));
        assert!(intersect(&l1, &l2).is_none());
    }

    #[test]
    fn angle_line_hits_vertical_wall() {
        let ray = Line::from_angle(vector![0.0, 0.0], std::f64::consts::FRAC_PI_4);
        let wall = Line::new(vector![3.0, -10.0], vector![3.0, 10.0]);
        let p = ray.intersect(&wall).unwrap();
        assert!((p - vector![3.0, 3.0]).norm() < 1e-9);
    }

    #[test]
    fn crossing_and_disjoint_segments() {
        let cfg = GeomCfg::default();
        let a = Segment::new(vector![0.0, 0.0], vector![2.0, 2.0]);
        let b = Segment::new(vector![0.0, 2.0], vector![2.0, 0.0]);
        assert!(segments_intersect(&a, &b, &cfg));
        // Lines cross at (1, 1) but c stops short of it.
        let c = Segment::new(vector![0.0, 2.0], vector![0.9, 1.1]);
        assert!(!segments_intersect(&a, &c, &cfg));
        assert!(!segments_intersect(&c, &a, &cfg));
    }

    #[test]
    fn touching_endpoint_counts() {
        let cfg = GeomCfg::default();
        let a = Segment::new(vector![0.0, 0.0], vector![1.0, 0.0]);
        let b = Segment::new(vector![1.0, 0.0], vector![1.0, 5.0]);
        assert!(segments_intersect(&a, &b, &cfg));
    }

    #[test]
    fn collinear_overlap_and_gap() {
        let cfg = GeomCfg::default();
        let a = Segment::new(vector![0.0, 0.0], vector![2.0, 0.0]);
        let overlapping = Segment::new(vector![1.0, 0.0], vector![3.0, 0.0]);
        let disjoint = Segment::new(vector![2.5, 0.0], vector![4.0, 0.0]);
        assert!(segments_intersect(&a, &overlapping, &cfg));
        assert!(segments_intersect(&overlapping, &a, &cfg));
        assert!(!segments_intersect(&a, &disjoint, &cfg));
        assert!(!segments_intersect(&disjoint, &a, &cfg));
        // containment of the whole segment
        let inner = Segment::new(vector![0.5, 0.0], vector![1.5, 0.0]);
        assert!(segments_intersect(&a, &inner, &cfg));
    }

    #[test]
    fn skewed_collinear_overlap_survives_rounding() {
        let cfg = GeomCfg::default();
        let p0 = vector![3.7, -12.9];
        for i in 1..200 {
            let d = vector![1.0, 0.1 * f64::from(i) / 7.0];
            let a = Segment::new(p0, p0 + d * 3.0);
            let b = Segment::new(p0 + d * 1.3, p0 + d * 5.1);
            let c = Segment::new(p0 + d * 3.4, p0 + d * 5.1);
            assert!(segments_intersect(&a, &b, &cfg), "i = {i}");
            assert!(segments_intersect(&b, &a, &cfg), "i = {i}");
            assert!(!segments_intersect(&a, &c, &cfg), "i = {i}");
        }
    }

    #[test]
    fn parallel_offset_segments_do_not_intersect() {
        let cfg = GeomCfg::default();
        let a = Segment::new(vector![0.0, 0.0], vector![2.0, 0.0]);
        let b = Segment::new(vector![0.5, 0.1], vector![1.5, 0.1]);
        assert!(!segments_intersect(&a, &b, &cfg));
    }

    #[test]
    fn degenerate_segments_do_not_panic() {
        let cfg = GeomCfg::default();
        let p = Segment::new(vector![1.0, 0.0], vector![1.0, 0.0]);
        let a = Segment::new(vector![0.0, 0.0], vector![2.0, 0.0]);
        assert!(segments_intersect(&a, &p, &cfg));
        let off = Segment::new(vector![1.0, 1.0], vector![1.0, 1.0]);
        assert!(!segments_intersect(&a, &off, &cfg));
        let nan = Segment::new(vector![f64::NAN, 0.0], vector![1.0, 1.0]);
        assert!(!segments_intersect(&a, &nan, &cfg));
    }
}
