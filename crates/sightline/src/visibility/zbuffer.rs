//! Angular z-buffer: slot index → nearest occluder.
//!
//! Angles here are relative to the piece's facing direction, in `[-π, π]`.
//! Consecutive event angles bound the slots; inside a slot no occluder
//! starts or ends, crosses the view circle, or crosses another occluder, so
//! a single occluder is the nearest one across the whole slot.

use crate::geom2::{bearing, wrap_pi, Line, Point, Segment};

/// One endpoint of an occluder as seen from the viewpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Sample {
    pub angle: f64,
    pub distance: f64,
    pub point: Point,
}

impl Sample {
    pub fn new(origin: Point, facing: f64, point: Point) -> Self {
        Self {
            angle: wrap_pi(bearing(origin, point) - facing),
            distance: (point - origin).norm(),
            point,
        }
    }
}

/// A segment (or the part of one on either side of the backward ray) with
/// its angular extent; `first.angle < second.angle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Occluder {
    /// Index into the caller's segment list.
    pub segment_id: usize,
    pub segment: Segment,
    pub first: Sample,
    pub second: Sample,
}

impl Occluder {
    /// Point where the ray at absolute angle `angle` meets the supporting
    /// line, with its distance. `None` for rays parallel to the occluder.
    pub fn hit(&self, origin: Point, angle: f64) -> Option<(Point, f64)> {
        let q = Line::from_angle(origin, angle).intersect(&self.segment.line())?;
        let d = (q - origin).norm();
        d.is_finite().then_some((q, d))
    }

    #[inline]
    pub fn covers(&self, rel_angle: f64) -> bool {
        rel_angle >= self.first.angle && rel_angle <= self.second.angle
    }
}

#[derive(Clone, Debug)]
pub(crate) struct AngularZBuffer {
    events: Vec<f64>,
    owners: Vec<Option<usize>>,
    depths: Vec<f64>,
}

impl AngularZBuffer {
    /// `events` must be sorted ascending with at least two entries.
    pub fn new(events: Vec<f64>) -> Self {
        let slots = events.len().saturating_sub(1);
        Self {
            events,
            owners: vec![None; slots],
            depths: vec![f64::INFINITY; slots],
        }
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.owners.len()
    }

    #[inline]
    pub fn slot(&self, i: usize) -> (f64, f64) {
        (self.events[i], self.events[i + 1])
    }

    #[inline]
    pub fn mid(&self, i: usize) -> f64 {
        0.5 * (self.events[i] + self.events[i + 1])
    }

    #[inline]
    pub fn owner(&self, i: usize) -> Option<usize> {
        self.owners[i]
    }

    /// Slots whose bisector lies in `[lo, hi]`.
    pub fn covered(&self, lo: f64, hi: f64) -> impl Iterator<Item = usize> + '_ {
        let first = self.events.partition_point(|&e| e < lo).saturating_sub(1);
        (first..self.slot_count())
            .take_while(move |&i| self.events[i] < hi)
            .filter(move |&i| {
                let m = self.mid(i);
                m >= lo && m <= hi
            })
    }

    /// Claim slot `i` for `id` at `depth` unless a strictly nearer owner holds it.
    pub fn offer(&mut self, i: usize, id: usize, depth: f64) -> bool {
        if depth <= self.depths[i] {
            self.owners[i] = Some(id);
            self.depths[i] = depth;
            true
        } else {
            false
        }
    }
}
