//! Sweeping-pass detection
//!
//! A rotation step is discrete: the tip of a segment jumps from one angle to
//! the next. A thin obstacle lying between the two positions is never hit by
//! either of them, so the arc traced by the tip is approximated by a chain of
//! short chords and each chord is tested instead.

use glam::DVec2;

use super::collision::intersects;
use super::segment::Segment;

/// Number of chords used to approximate the arc of a tip at distance
/// `length` from its pivot
pub fn sample_count(length: f64, min_samples: u32, spacing: f64) -> u32 {
    let by_length = if spacing > 0.0 {
        (length / spacing).ceil() as u32
    } else {
        0
    };
    by_length.max(min_samples).max(1)
}

/// Chords approximating the arc traced by the extremity of `seg` while it
/// rotates by `delta` radians around its base
pub fn sweep_arc(seg: &Segment, delta: f64, samples: u32) -> Vec<Segment> {
    let samples = samples.max(1);
    let points: Vec<DVec2> = (0..=samples)
        .map(|i| {
            let theta = seg.angle + delta * i as f64 / samples as f64;
            seg.base + DVec2::new(theta.cos(), theta.sin()) * seg.length
        })
        .collect();

    points
        .windows(2)
        .map(|pair| Segment::between(pair[0], pair[1]))
        .collect()
}

/// Whether the tip of `seg`, rotating by `delta`, passes across `obstacle`
pub fn sweep_crosses(seg: &Segment, delta: f64, obstacle: &Segment, samples: u32) -> bool {
    sweep_arc(seg, delta, samples)
        .iter()
        .any(|chord| intersects(chord, obstacle))
}
