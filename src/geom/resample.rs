//! Arc-length resampling for parametric curves.
//!
//! Uniform-in-parameter sampling bunches points where a curve moves slowly
//! and spreads them where it moves fast. This module instead walks the
//! parameter in variable steps so consecutive output points are
//! approximately equidistant in space.
//!
//! # Algorithm
//!
//! From the current `(t, point)`, probe forward in small parameter
//! increments until the probed point's Euclidean distance from the current
//! point is within [`Tolerance::RESAMPLE`] of the target length, or has
//! already exceeded it. The probe step is proportional
//! (`eps * target / current_distance`, capped at [`MAX_PARAMETER_STEP`]),
//! so it shrinks as the probe closes in on the target distance. There is no
//! backtracking or bisection: acceptance on overshoot is silent.
//!
//! The walk terminates when `t` reaches 1, always emitting the exact `t = 1`
//! endpoint as the final sample if it was not hit by the walk itself. A
//! probe that fails to advance the parameter (`next_t <= t`) ends the walk;
//! this is the classic infinite-loop hazard of the scheme.

use super::core::{Point2, Tolerance};
use super::curve::Curve2;

/// Upper bound on a single probe step in parameter space.
pub const MAX_PARAMETER_STEP: f64 = 0.1;

/// Resamples `curve` so consecutive points are approximately
/// `segment_length` apart, starting at `t = 0` and ending exactly at
/// `t = 1`. The final segment may be shorter than the target when the
/// remaining arc length runs out.
///
/// A non-finite or non-positive `segment_length` is degenerate input and
/// yields an empty result.
#[must_use]
pub fn resample_uniform_length(curve: &impl Curve2, segment_length: f64) -> Vec<Point2> {
    if !segment_length.is_finite() || segment_length <= 0.0 {
        return Vec::new();
    }

    let mut points = Vec::new();
    let mut t = 0.0;
    let mut current = curve.point_at(t);
    points.push(current);

    while t < 1.0 {
        let next_t = find_next_t(curve, t, current, segment_length);
        if next_t <= t {
            // No forward progress is possible; stop rather than spin.
            break;
        }

        t = next_t;
        current = curve.point_at(t);
        points.push(current);
    }

    if t < 1.0 {
        points.push(curve.point_at(1.0));
    }

    points
}

/// Finds the next parameter whose point lies approximately `target_length`
/// away from `current_point`. Falls back to `1.0` when no qualifying
/// parameter exists before the end of the domain.
fn find_next_t(
    curve: &impl Curve2,
    current_t: f64,
    current_point: Point2,
    target_length: f64,
) -> f64 {
    let eps = Tolerance::RESAMPLE.eps;
    let mut t = current_t + eps;

    while t <= 1.0 {
        let probe = curve.point_at(t);
        let distance = probe.distance_to(current_point);

        if (distance - target_length).abs() < eps || distance > target_length {
            return t;
        }

        // Proportional step: small near the target, capped far from it.
        // A zero distance makes the quotient infinite; the cap handles it.
        t += MAX_PARAMETER_STEP.min(eps * target_length / distance);
    }

    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{BezierCurve, de_casteljau};

    struct Segment {
        a: Point2,
        b: Point2,
    }

    impl Curve2 for Segment {
        fn point_at(&self, t: f64) -> Point2 {
            self.a.lerp(self.b, t)
        }
    }

    struct ConstantCurve(Point2);

    impl Curve2 for ConstantCurve {
        fn point_at(&self, _t: f64) -> Point2 {
            self.0
        }
    }

    #[test]
    fn straight_line_spacing_is_near_uniform() {
        let line = Segment {
            a: Point2::new(0.0, 0.0),
            b: Point2::new(10.0, 0.0),
        };
        let target = 1.0;
        let points = resample_uniform_length(&line, target);

        // 10 units at ~1 unit spacing: start + interior samples + endpoint.
        assert_eq!(points.len(), 11);
        assert_eq!(points[0], Point2::new(0.0, 0.0));
        assert_eq!(*points.last().unwrap(), Point2::new(10.0, 0.0));

        // All but the final (possibly degenerate) segment sit close to the
        // target; acceptance-on-overshoot bounds the error by one probe step.
        for pair in points[..points.len() - 1].windows(2) {
            let d = pair[0].distance_to(pair[1]);
            assert!(d > target - Tolerance::RESAMPLE.eps, "spacing {d} too short");
            assert!(d < target * 1.05, "spacing {d} overshot too far");
        }
        let last = points[points.len() - 2].distance_to(points[points.len() - 1]);
        assert!(last <= target * 1.05);
    }

    #[test]
    fn endpoint_is_always_emitted() {
        let line = Segment {
            a: Point2::new(0.0, 0.0),
            b: Point2::new(1.0, 1.0),
        };
        // Target longer than the whole curve: only the two endpoints remain.
        let points = resample_uniform_length(&line, 100.0);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], Point2::new(0.0, 0.0));
        assert_eq!(points[1], Point2::new(1.0, 1.0));
    }

    #[test]
    fn zero_length_curve_terminates() {
        let curve = ConstantCurve(Point2::new(3.0, 3.0));
        let points = resample_uniform_length(&curve, 1.0);
        // The walk can never satisfy the distance criterion; it must still
        // terminate with the start point plus the t = 1 endpoint.
        assert!(points.len() <= 3);
        assert_eq!(points[0], Point2::new(3.0, 3.0));
        assert_eq!(*points.last().unwrap(), Point2::new(3.0, 3.0));
    }

    #[test]
    fn degenerate_segment_length_yields_empty() {
        let line = Segment {
            a: Point2::new(0.0, 0.0),
            b: Point2::new(1.0, 0.0),
        };
        assert!(resample_uniform_length(&line, 0.0).is_empty());
        assert!(resample_uniform_length(&line, -1.0).is_empty());
        assert!(resample_uniform_length(&line, f64::NAN).is_empty());
    }

    #[test]
    fn curved_spacing_tracks_arc_length_not_parameter() {
        // A sharply bent quadratic: uniform-in-parameter samples are far
        // from equidistant, resampled ones should not be.
        let mut curve = BezierCurve::new(100);
        curve.add_control_point(Point2::new(0.0, 0.0));
        curve.add_control_point(Point2::new(5.0, 10.0));
        curve.add_control_point(Point2::new(10.0, 0.0));

        let target = 0.5;
        let points = resample_uniform_length(&curve, target);
        assert!(points.len() > 10);

        for pair in points[..points.len() - 1].windows(2) {
            let d = pair[0].distance_to(pair[1]);
            assert!(d > target * 0.9, "spacing {d} too short");
            assert!(d < target * 1.1, "spacing {d} too long");
        }
    }

    #[test]
    fn resampled_points_lie_on_the_curve() {
        let control = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 4.0),
            Point2::new(6.0, -2.0),
            Point2::new(8.0, 1.0),
        ];
        let mut curve = BezierCurve::new(100);
        for p in control {
            curve.add_control_point(p);
        }

        for p in resample_uniform_length(&curve, 0.75) {
            // Nearest-sample check against a dense evaluation of the curve.
            let mut best = f64::INFINITY;
            for i in 0..=1000 {
                let q = de_casteljau(&control, i as f64 / 1000.0).unwrap();
                best = best.min(p.distance_to(q));
            }
            assert!(best < 0.01, "resampled point {p:?} strayed off the curve");
        }
    }
}
