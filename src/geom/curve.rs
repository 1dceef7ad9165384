use super::core::Point2;

/// A 1D parametric curve over the unit domain `t ∈ [0, 1]`.
pub trait Curve2 {
    fn point_at(&self, t: f64) -> Point2;
}

/// Default number of uniform tessellation segments.
pub const DEFAULT_CURVE_RESOLUTION: usize = 100;

/// Evaluates a Bezier curve by De Casteljau reduction.
///
/// The classical recursion (collapse each adjacent control-point pair with a
/// lerp until one point remains) is run as an in-place loop over a working
/// buffer, so arbitrarily large control-point counts cannot exhaust the
/// stack. Returns `None` for an empty input; a single point returns itself.
#[must_use]
pub fn de_casteljau(points: &[Point2], t: f64) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }

    let mut buf = points.to_vec();
    let mut len = buf.len();
    while len > 1 {
        for i in 0..len - 1 {
            buf[i] = buf[i].lerp(buf[i + 1], t);
        }
        len -= 1;
    }
    Some(buf[0])
}

/// Samples a curve uniformly in parameter: `t = i / steps` for
/// `i ∈ 0..=steps`, producing `steps + 1` points.
#[must_use]
pub fn tessellate_curve_uniform(curve: &impl Curve2, steps: usize) -> Vec<Point2> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| curve.point_at(i as f64 / steps as f64))
        .collect()
}

/// Flattens points into interleaved `[x0, y0, x1, y1, ...]` coordinates for
/// direct upload to a rendering buffer.
#[must_use]
pub fn flatten_points(points: &[Point2]) -> Vec<f64> {
    let mut flat = Vec::with_capacity(points.len() * 2);
    for p in points {
        flat.push(p.x);
        flat.push(p.y);
    }
    flat
}

/// An interactive 2D Bezier curve.
///
/// Owns its ordered control points and a flattened cache of sampled curve
/// coordinates. The cache is rebuilt wholesale on every mutation (control
/// point added, points cleared, resolution changed), never patched
/// incrementally, so it is always consistent with the control points.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve {
    control_points: Vec<Point2>,
    curve_points: Vec<f64>,
    resolution: usize,
}

impl BezierCurve {
    #[must_use]
    pub fn new(resolution: usize) -> Self {
        Self {
            control_points: Vec::new(),
            curve_points: Vec::new(),
            resolution: resolution.max(1),
        }
    }

    /// Appends a control point and regenerates the curve cache.
    pub fn add_control_point(&mut self, point: Point2) {
        self.control_points.push(point);
        self.rebuild();
    }

    /// Removes all control points; the curve cache becomes empty.
    pub fn clear_control_points(&mut self) {
        self.control_points.clear();
        self.curve_points.clear();
    }

    /// Changes the tessellation resolution and regenerates the curve cache.
    pub fn set_resolution(&mut self, resolution: usize) {
        self.resolution = resolution.max(1);
        self.rebuild();
    }

    #[must_use]
    pub const fn resolution(&self) -> usize {
        self.resolution
    }

    #[must_use]
    pub fn control_points(&self) -> &[Point2] {
        &self.control_points
    }

    /// Flattened `[x, y]` coordinates of the sampled curve.
    /// Empty while fewer than 2 control points exist.
    #[must_use]
    pub fn curve_points(&self) -> &[f64] {
        &self.curve_points
    }

    /// Number of sampled curve points in the cache.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.curve_points.len() / 2
    }

    /// Regenerates the flattened cache with arc-length resampling instead
    /// of uniform parameter steps: consecutive cached points end up roughly
    /// `segment_length` apart (see [`crate::geom::resample_uniform_length`]).
    /// The next mutating call reverts the cache to uniform tessellation.
    pub fn resample_uniform_length(&mut self, segment_length: f64) {
        self.curve_points.clear();
        if self.control_points.len() < 2 {
            return;
        }

        let points = super::resample::resample_uniform_length(&*self, segment_length);
        self.curve_points = flatten_points(&points);
    }

    fn rebuild(&mut self) {
        self.curve_points.clear();
        if self.control_points.len() < 2 {
            return;
        }

        for i in 0..=self.resolution {
            let t = i as f64 / self.resolution as f64;
            let p = self.point_at(t);
            self.curve_points.push(p.x);
            self.curve_points.push(p.y);
        }

        log::trace!(
            "bezier curve rebuilt: {} control points, {} samples",
            self.control_points.len(),
            self.point_count()
        );
    }
}

impl Curve2 for BezierCurve {
    /// Evaluates the curve at `t`. With fewer than 2 control points there is
    /// no curve to speak of: a single point returns itself and an empty
    /// curve returns the origin.
    fn point_at(&self, t: f64) -> Point2 {
        de_casteljau(&self.control_points, t).unwrap_or(Point2::ORIGIN)
    }
}

impl Default for BezierCurve {
    fn default() -> Self {
        Self::new(DEFAULT_CURVE_RESOLUTION)
    }
}
