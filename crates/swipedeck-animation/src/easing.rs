//! Easing curves.

/// Easing functions applied to a linear fraction in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Slow start, slow end: the cosine curve of the platform
    /// accelerate/decelerate interpolator used for settle and dismiss.
    AccelerateDecelerate,
    /// Material standard curve, cubic-bezier(0.4, 0, 0.2, 1).
    FastOutSlowIn,
}

impl Easing {
    pub fn transform(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => fraction,
            Easing::AccelerateDecelerate => {
                (((fraction + 1.0) * std::f32::consts::PI).cos() / 2.0) + 0.5
            }
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Evaluates a CSS-style cubic bezier easing at `fraction`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let curve = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    // Solve curve_x(t) = fraction with Newton iterations, falling back to
    // bisection when the derivative flattens out.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let x = curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            solved = true;
            break;
        }
        let dx = slope(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let mut lo = 0.0f32;
        let mut hi = 1.0f32;
        t = fraction;
        for _ in 0..16 {
            let delta = curve(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    curve(ay, by, cy, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for easing in [
            Easing::Linear,
            Easing::AccelerateDecelerate,
            Easing::FastOutSlowIn,
        ] {
            assert!(easing.transform(0.0).abs() < 1e-4, "{easing:?} at 0");
            assert!((easing.transform(1.0) - 1.0).abs() < 1e-4, "{easing:?} at 1");
        }
    }

    #[test]
    fn accelerate_decelerate_is_symmetric() {
        let easing = Easing::AccelerateDecelerate;
        for i in 0..=10 {
            let f = i as f32 / 10.0;
            let a = easing.transform(f);
            let b = 1.0 - easing.transform(1.0 - f);
            assert!((a - b).abs() < 1e-4);
        }
        assert!((easing.transform(0.5) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in [Easing::AccelerateDecelerate, Easing::FastOutSlowIn] {
            let mut prev = 0.0;
            for i in 0..=100 {
                let value = easing.transform(i as f32 / 100.0);
                assert!(value >= prev - 1e-4, "{easing:?} dipped at step {i}");
                prev = value;
            }
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Easing::Linear.transform(-0.5), 0.0);
        assert_eq!(Easing::Linear.transform(1.5), 1.0);
    }
}
