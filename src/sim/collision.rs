//! Collision predicates for straight segments, points and circles
//!
//! Every comparison goes through [`EPSIL_ZERO`] so that coordinate equality,
//! collinearity, intersection and superposition agree with each other.

use glam::DVec2;

use super::segment::Segment;
use crate::consts::EPSIL_ZERO;

/// Turn direction of the path p -> q -> r
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Tolerance-based point equality
#[inline]
pub fn points_coincide(a: DVec2, b: DVec2) -> bool {
    (a.x - b.x).abs() < EPSIL_ZERO && (a.y - b.y).abs() < EPSIL_ZERO
}

/// Sign of the cross product of (q - p) and (r - q), collapsed to
/// `Collinear` within tolerance
pub fn orientation(p: DVec2, q: DVec2, r: DVec2) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val.abs() < EPSIL_ZERO {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Whether q lies inside the bounding box of p and r (only meaningful once
/// p, q, r are known to be collinear)
pub fn on_segment(p: DVec2, q: DVec2, r: DVec2) -> bool {
    q.x <= p.x.max(r.x) + EPSIL_ZERO
        && q.x >= p.x.min(r.x) - EPSIL_ZERO
        && q.y <= p.y.max(r.y) + EPSIL_ZERO
        && q.y >= p.y.min(r.y) - EPSIL_ZERO
}

/// Segment/segment intersection
///
/// Segments sharing an endpoint never intersect: consecutive segments of a
/// coral always share one.
pub fn intersects(a: &Segment, b: &Segment) -> bool {
    let (p1, q1) = (a.base, a.extremity());
    let (p2, q2) = (b.base, b.extremity());

    if points_coincide(p1, p2)
        || points_coincide(p1, q2)
        || points_coincide(q1, p2)
        || points_coincide(q1, q2)
    {
        return false;
    }

    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    // General case
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear cases
    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Superposition: the segments share an endpoint, are collinear, and leave
/// that point along the same ray so that one lies back over the other.
///
/// Two segments touching end-to-end while continuing in the same direction
/// are not superposed.
pub fn are_superposed(a: &Segment, b: &Segment) -> bool {
    let a_ends = [(a.base, a.extremity()), (a.extremity(), a.base)];
    let b_ends = [(b.base, b.extremity()), (b.extremity(), b.base)];

    for &(shared_a, far_a) in &a_ends {
        for &(shared_b, far_b) in &b_ends {
            if !points_coincide(shared_a, shared_b) {
                continue;
            }
            let collinear = orientation(a.base, a.extremity(), far_b) == Orientation::Collinear
                && orientation(b.base, b.extremity(), far_a) == Orientation::Collinear;
            if collinear && (far_a - shared_a).dot(far_b - shared_b) > 0.0 {
                return true;
            }
        }
    }
    false
}

/// Segment/circle overlap: distance from `center` to the closest point of
/// the segment compared against `radius`
pub fn intersects_circle(seg: &Segment, center: DVec2, radius: f64) -> bool {
    let t = (center - seg.base).dot(seg.direction()).clamp(0.0, seg.length);
    let closest = seg.point_at(t);
    closest.distance_squared(center) <= radius * radius
}

/// Point strictly inside the open square (margin, extent - margin)²
#[inline]
pub fn within_world(p: DVec2, margin: f64, extent: f64) -> bool {
    p.x > margin && p.x < extent - margin && p.y > margin && p.y < extent - margin
}

/// Both ends of a segment strictly inside the world, with the shared tolerance
/// as margin
#[inline]
pub fn segment_within_world(seg: &Segment, extent: f64) -> bool {
    within_world(seg.base, EPSIL_ZERO, extent) && within_world(seg.extremity(), EPSIL_ZERO, extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::between(DVec2::new(x0, y0), DVec2::new(x1, y1))
    }

    #[test]
    fn test_orientation() {
        let p = DVec2::new(0.0, 0.0);
        let q = DVec2::new(10.0, 0.0);
        assert_eq!(orientation(p, q, DVec2::new(20.0, 0.0)), Orientation::Collinear);
        assert_eq!(orientation(p, q, DVec2::new(20.0, 10.0)), Orientation::CounterClockwise);
        assert_eq!(orientation(p, q, DVec2::new(20.0, -10.0)), Orientation::Clockwise);
    }

    #[test]
    fn test_crossing_segments_intersect() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 10.0, 10.0, 0.0);
        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn test_disjoint_segments() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(0.0, 5.0, 10.0, 5.0);
        assert!(!intersects(&a, &b));
    }

    #[test]
    fn test_shared_endpoint_is_not_intersection() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(10.0, 0.0, 10.0, 10.0);
        assert!(!intersects(&a, &b));
    }

    #[test]
    fn test_collinear_overlap_intersects() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(5.0, 0.0, 15.0, 0.0);
        assert!(intersects(&a, &b));
    }

    #[test]
    fn test_t_junction_intersects() {
        let a = seg(0.0, 0.0, 20.0, 0.0);
        let b = seg(10.0, 0.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
    }

    #[test]
    fn test_fold_back_is_superposed() {
        // Second segment turns around and runs back over the first
        let first = Segment::new(DVec2::new(50.0, 50.0), 0.0, 20.0);
        let second = Segment::new(first.extremity(), PI, 12.0);
        assert!(are_superposed(&first, &second));
        assert!(are_superposed(&second, &first));
    }

    #[test]
    fn test_straight_continuation_is_not_superposed() {
        let first = Segment::new(DVec2::new(50.0, 50.0), 0.0, 20.0);
        let second = Segment::new(first.extremity(), 0.0, 12.0);
        assert!(!are_superposed(&first, &second));
    }

    #[test]
    fn test_bent_chain_is_not_superposed() {
        let first = Segment::new(DVec2::new(50.0, 50.0), 0.0, 20.0);
        let second = Segment::new(first.extremity(), FRAC_PI_2, 12.0);
        assert!(!are_superposed(&first, &second));
    }

    #[test]
    fn test_segment_circle() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        assert!(intersects_circle(&s, DVec2::new(5.0, 0.5), 0.6));
        assert!(!intersects_circle(&s, DVec2::new(5.0, 1.0), 0.6));
        // Projection clamps to the extremity
        assert!(intersects_circle(&s, DVec2::new(10.5, 0.0), 0.6));
        assert!(!intersects_circle(&s, DVec2::new(11.0, 0.0), 0.6));
    }

    #[test]
    fn test_world_bounds() {
        assert!(within_world(DVec2::new(1.0, 255.0), 0.5, 256.0));
        assert!(!within_world(DVec2::new(0.4, 100.0), 0.5, 256.0));
        assert!(!within_world(DVec2::new(100.0, 255.6), 0.5, 256.0));
    }
}
