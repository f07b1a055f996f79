/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing curve.
///
/// The curve runs from `(0, 0)` to `(1, 1)`. `x` is elapsed-time fraction,
/// `y` is eased progress.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Newton-Raphson steps used to invert `x(t)`.
const NEWTON_ITERATIONS: usize = 6;

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub const LINEAR: CubicBezier = CubicBezier::new(0.0, 0.0, 1.0, 1.0);

    /// Symmetric ease-in-out used for camera moves.
    pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.65, 0.0, 0.35, 1.0);

    /// Returns eased progress for elapsed fraction `x`. Input is clamped to `[0, 1]`;
    /// the endpoints are exact.
    pub fn sample(&self, x: f32) -> f32 {
        if !(x > 0.0) {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t(x);
        bezier(t, self.y1, self.y2)
    }

    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = bezier(t, self.x1, self.x2) - x;
            let slope = bezier_slope(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t = (t - err / slope).clamp(0.0, 1.0);
        }
        t
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::EASE_IN_OUT
    }
}

/// One axis of the curve with fixed endpoints 0 and 1.
#[inline]
fn bezier(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

#[inline]
fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn endpoints_are_exact() {
        let c = CubicBezier::EASE_IN_OUT;
        assert_eq!(c.sample(0.0), 0.0);
        assert_eq!(c.sample(1.0), 1.0);
        assert_eq!(c.sample(-3.0), 0.0);
        assert_eq!(c.sample(7.0), 1.0);
        assert_eq!(c.sample(f32::NAN), 0.0);
    }

    #[test]
    fn linear_is_identity() {
        for i in 1..10 {
            let x = i as f32 / 10.0;
            assert!(approx(CubicBezier::LINEAR.sample(x), x, 1e-4), "x = {x}");
        }
    }

    #[test]
    fn symmetric_curve_passes_through_half() {
        assert!(approx(CubicBezier::EASE_IN_OUT.sample(0.5), 0.5, 1e-3));
    }

    #[test]
    fn ease_in_out_is_slow_at_the_ends() {
        let c = CubicBezier::EASE_IN_OUT;
        assert!(c.sample(0.1) < 0.1);
        assert!(c.sample(0.9) > 0.9);
    }

    #[test]
    fn sample_is_monotonic() {
        let c = CubicBezier::EASE_IN_OUT;
        let mut prev = 0.0;
        for i in 0..=100 {
            let y = c.sample(i as f32 / 100.0);
            assert!(y + 1e-4 >= prev, "dip at {i}: {y} < {prev}");
            prev = y;
        }
    }

    #[test]
    fn matches_css_ease_reference() {
        // cubic-bezier(0.25, 0.1, 0.25, 1) at x = 0.5 is ~0.8024.
        let ease = CubicBezier::new(0.25, 0.1, 0.25, 1.0);
        assert!(approx(ease.sample(0.5), 0.8024, 2e-3));
    }
}
