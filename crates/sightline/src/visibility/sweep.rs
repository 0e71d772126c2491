//! Angular sweep producing the visibility polygon.
//!
//! Steps
//! 1. Sample both endpoints of every occluder (bearing relative to the
//!    facing direction, distance); occluders straddling the backward ray are
//!    split there so every angular span is a plain interval.
//! 2. Events: the window edges `±α`, occluder endpoints inside the window,
//!    the angles where occluders cross the view circle, and the angles where
//!    two occluders cross each other.
//! 3. Fill the angular z-buffer farthest sample first; each slot keeps the
//!    nearest occluder along its bisector that lies within the view radius.
//! 4. Walk the slots from `θ-α` to `θ+α`, emitting segment faces, arcs of
//!    radius `R` for empty slots, and radial jumps between them; close back
//!    to the viewpoint.

use std::f64::consts::PI;

use super::types::{BoundaryEdge, Piece, VisibilityConfig, VisibilityError, VisibilityPolygon};
use super::zbuffer::{AngularZBuffer, Occluder, Sample};
use crate::geom2::{bearing, segments_intersect, unit, wrap_pi, GeomCfg, Line, Point, Segment};

/// Visible region of `piece` within `[facing - α, facing + α]` and radius
/// `cfg.view_radius`, with `segments` as occluders.
///
/// Segments passing through the viewpoint (within `GeomCfg::eps_dist`) and
/// zero-length segments are ignored: a piece standing on a wall sees past
/// it. `Piece::sees` still treats such segments as blocking.
pub fn compute_visibility_polygon(
    piece: &Piece,
    segments: &[Segment],
    cfg: &VisibilityConfig,
) -> Result<VisibilityPolygon, VisibilityError> {
    cfg.validate()?;
    piece.validate()?;
    let geom = GeomCfg::default();
    let p = piece.position;
    let theta = piece.facing;
    let alpha = cfg.half_aperture;
    let r = cfg.view_radius;

    let occluders: Vec<Occluder> = collect_occluders(p, theta, segments, &geom)
        .into_iter()
        .filter(|o| o.second.angle > -alpha && o.first.angle < alpha)
        .collect();

    let zbuf = resolve(p, theta, alpha, r, &occluders, &geom);

    let mut walk = Walk::new(p, geom.eps_dist);
    for i in 0..zbuf.slot_count() {
        let (a0, a1) = zbuf.slot(i);
        let owner = zbuf.owner(i).map(|k| &occluders[k]);
        walk.line_to(boundary_point(p, theta + a0, r, owner));
        let end = boundary_point(p, theta + a1, r, owner);
        match zbuf.owner(i) {
            Some(k) => walk.along(k, end),
            None => walk.arc_to(theta + a0, theta + a1, end),
        }
    }
    walk.line_to(p);

    Ok(VisibilityPolygon {
        viewpoint: p,
        radius: r,
        start_angle: theta - alpha,
        end_angle: theta + alpha,
        edges: walk.edges,
    })
}

fn collect_occluders(p: Point, theta: f64, segments: &[Segment], geom: &GeomCfg) -> Vec<Occluder> {
    let mut out = Vec::with_capacity(segments.len());
    for (id, s) in segments.iter().enumerate() {
        let finite = s.start.iter().chain(s.end.iter()).all(|v| v.is_finite());
        // Degenerate occluders, and occluders through the viewpoint, subtend
        // no usable angle.
        if !finite || s.is_degenerate() || s.distance_to_point(p) <= geom.eps_dist {
            continue;
        }
        let a = Sample::new(p, theta, s.start);
        let b = Sample::new(p, theta, s.end);
        let (lo, hi) = if a.angle <= b.angle { (a, b) } else { (b, a) };
        if hi.angle - lo.angle <= PI {
            push_span(&mut out, id, lo, hi, geom);
            continue;
        }
        // The span wraps through ±π: split at the backward ray.
        let Some(q) = Line::from_angle(p, theta + PI).intersect(&s.line()) else {
            continue;
        };
        let dq = (q - p).norm();
        let back_neg = Sample {
            angle: -PI,
            distance: dq,
            point: q,
        };
        let back_pos = Sample { angle: PI, ..back_neg };
        push_span(&mut out, id, back_neg, lo, geom);
        push_span(&mut out, id, hi, back_pos, geom);
    }
    out
}

fn push_span(out: &mut Vec<Occluder>, id: usize, first: Sample, second: Sample, geom: &GeomCfg) {
    if second.angle - first.angle <= geom.eps_angle {
        return;
    }
    out.push(Occluder {
        segment_id: id,
        segment: Segment::new(first.point, second.point),
        first,
        second,
    });
}

fn resolve(
    p: Point,
    theta: f64,
    alpha: f64,
    r: f64,
    occluders: &[Occluder],
    geom: &GeomCfg,
) -> AngularZBuffer {
    let inner = |a: f64| a > -alpha + geom.eps_angle && a < alpha - geom.eps_angle;
    let rel = |q: Point| wrap_pi(bearing(p, q) - theta);
    let mut events = vec![-alpha, alpha];
    for (k, o) in occluders.iter().enumerate() {
        events.extend([o.first.angle, o.second.angle].into_iter().filter(|&a| inner(a)));
        events.extend(
            circle_crossings(p, r, &o.segment)
                .into_iter()
                .map(rel)
                .filter(|&a| inner(a)),
        );
        // The nearer of two crossing occluders swaps at their crossing.
        events.extend(
            occluders[k + 1..]
                .iter()
                .filter_map(|other| crossing(&o.segment, &other.segment, geom))
                .map(rel)
                .filter(|&a| inner(a)),
        );
    }
    events.sort_by(f64::total_cmp);
    events.dedup_by(|a, b| (*a - *b).abs() <= geom.eps_angle);
    let mut zbuf = AngularZBuffer::new(events);

    // Farthest sample first; each occluder is offered once per endpoint.
    let mut samples: Vec<(f64, usize)> = occluders
        .iter()
        .enumerate()
        .flat_map(|(k, o)| [(o.first.distance, k), (o.second.distance, k)])
        .collect();
    samples.sort_by(|x, y| y.0.total_cmp(&x.0));
    for (_, k) in samples {
        let o = &occluders[k];
        let slots: Vec<usize> = zbuf.covered(o.first.angle, o.second.angle).collect();
        for i in slots {
            let Some((_, depth)) = o.hit(p, theta + zbuf.mid(i)) else {
                continue;
            };
            if depth <= r {
                zbuf.offer(i, k, depth);
            }
        }
    }
    zbuf
}

fn crossing(a: &Segment, b: &Segment, geom: &GeomCfg) -> Option<Point> {
    if !segments_intersect(a, b, geom) {
        return None;
    }
    a.line().intersect(&b.line())
}

/// Points where `s` crosses the circle of radius `r` around `c`.
fn circle_crossings(c: Point, r: f64, s: &Segment) -> Vec<Point> {
    let d = s.direction();
    let f = s.start - c;
    let a = d.dot(&d);
    let b = 2.0 * f.dot(&d);
    let k = f.dot(&f) - r * r;
    let disc = b * b - 4.0 * a * k;
    if !(a > 0.0) || disc < 0.0 {
        return Vec::new();
    }
    let root = disc.sqrt();
    [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)]
        .into_iter()
        .filter(|t| (0.0..=1.0).contains(t))
        .map(|t| s.point_at(t))
        .collect()
}

fn boundary_point(p: Point, angle: f64, r: f64, owner: Option<&Occluder>) -> Point {
    let sky = p + unit(angle) * r;
    match owner {
        Some(o) => o.hit(p, angle).map_or(sky, |(q, _)| q),
        None => sky,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Run {
    Jump,
    Arc,
    Along(usize),
}

/// Boundary builder merging consecutive arcs and collinear runs.
struct Walk {
    current: Point,
    run: Run,
    eps: f64,
    edges: Vec<BoundaryEdge>,
}

impl Walk {
    fn new(start: Point, eps: f64) -> Self {
        Self {
            current: start,
            run: Run::Jump,
            eps,
            edges: Vec::new(),
        }
    }

    fn line_to(&mut self, to: Point) {
        if (to - self.current).norm() <= self.eps {
            return;
        }
        self.edges.push(BoundaryEdge::Line { to });
        self.current = to;
        self.run = Run::Jump;
    }

    fn along(&mut self, occluder: usize, to: Point) {
        if (to - self.current).norm() <= self.eps {
            return;
        }
        if self.run == Run::Along(occluder) {
            if let Some(BoundaryEdge::Line { to: last }) = self.edges.last_mut() {
                *last = to;
                self.current = to;
                return;
            }
        }
        self.edges.push(BoundaryEdge::Line { to });
        self.current = to;
        self.run = Run::Along(occluder);
    }

    fn arc_to(&mut self, from_angle: f64, to_angle: f64, to: Point) {
        if self.run == Run::Arc {
            if let Some(BoundaryEdge::Arc {
                to_angle: last_angle,
                to: last,
                ..
            }) = self.edges.last_mut()
            {
                *last_angle = to_angle;
                *last = to;
                self.current = to;
                return;
            }
        }
        self.edges.push(BoundaryEdge::Arc {
            from_angle,
            to_angle,
            to,
        });
        self.current = to;
        self.run = Run::Arc;
    }
}
