//! Smooth polylines through data points.

use chartkit_core::Point;

/// Samples emitted per span between two data points.
pub const SEGMENTS_PER_SPAN: usize = 8;

/// Catmull-Rom spline through a run of points, kept in input order.
#[derive(Debug, Clone)]
pub struct CatmullRom {
    points: Vec<Point>,
    /// Tension parameter (0.0 to 1.0)
    tension: f32,
}

impl CatmullRom {
    /// Spline with the default tension of 0.5.
    #[must_use]
    pub fn new(points: &[Point]) -> Self {
        Self::with_tension(points, 0.5)
    }

    #[must_use]
    pub fn with_tension(points: &[Point], tension: f32) -> Self {
        Self {
            points: points.to_vec(),
            tension: tension.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Polyline approximating the curve; passes through every input point.
    #[must_use]
    pub fn to_path(&self, segments_per_span: usize) -> Vec<Point> {
        let n = self.points.len();
        if n <= 2 {
            return self.points.clone();
        }
        let segments = segments_per_span.max(1);
        let mut path = Vec::with_capacity((n - 1) * segments + 1);
        for i in 0..n - 1 {
            let p0 = self.points[i.saturating_sub(1)];
            let p1 = self.points[i];
            let p2 = self.points[i + 1];
            let p3 = self.points[(i + 2).min(n - 1)];
            for j in 0..segments {
                let t = j as f32 / segments as f32;
                path.push(self.point_at(p0, p1, p2, p3, t));
            }
        }
        path.push(self.points[n - 1]);
        path
    }

    fn point_at(&self, p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let tau = self.tension;

        let c0 = tau.mul_add(-t, (-tau).mul_add(t3, 2.0 * tau * t2));
        let c1 = (2.0 - tau).mul_add(t3, (tau - 3.0) * t2) + 1.0;
        let c2 = tau.mul_add(t, (tau - 2.0).mul_add(t3, 2.0f32.mul_add(-tau, 3.0) * t2));
        let c3 = tau.mul_add(t3, -(tau * t2));

        Point::new(
            c3.mul_add(p3.x, c0 * p0.x + c1 * p1.x + c2 * p2.x),
            c3.mul_add(p3.y, c0 * p0.y + c1 * p1.y + c2 * p2.y),
        )
    }
}

/// Path through `points`, smoothed when `spline` is set.
#[must_use]
pub fn line_path(points: &[Point], spline: bool) -> Vec<Point> {
    if spline {
        CatmullRom::new(points).to_path(SEGMENTS_PER_SPAN)
    } else {
        points.to_vec()
    }
}
