//! Affine transforms and the portable trig helpers used to build them.
//!
//! The teacher doesn't carry this subsystem (no geometry math in
//! `blitz-text` — glyphon/wgpu own the transform pipeline there), so
//! this module is grounded directly in spec.md §4.6 rather than a
//! teacher file; it follows the same plain-struct-with-const-fn-ish
//! constructors texture the rest of this crate uses.

use std::f64::consts::PI;

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A 2x3 affine matrix: `(x, y) -> (a*x + c*y + tx, b*x + d*y + ty)`.
/// `d = -1` expresses a Y-flip (fonts are Y-up, screens are Y-down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx,
            ty,
        }
    }

    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// A rotation by `radians`, using the Taylor-series [`sin`]/[`cos`]
    /// below rather than `f64::sin`/`f64::cos` (spec.md §9: retained
    /// for cross-platform determinism).
    pub fn rotation(radians: f64) -> Self {
        let (s, c) = (sin(radians), cos(radians));
        Self {
            a: c,
            b: s,
            c: -s,
            d: c,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// A Y-flip about `y = 0`.
    pub const fn y_flip() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: -1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Compose two transforms so that `(a.then(b)).apply(p) ==
    /// a.apply(b.apply(p))` — i.e. `self` is applied *after* `rhs`.
    /// This mirrors spec.md §4.6's multiplication order exactly:
    /// `self.compose(rhs)` is the `M = A·B` with `A = self`, `B = rhs`.
    pub fn compose(&self, rhs: &AffineTransform) -> AffineTransform {
        AffineTransform {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            tx: self.a * rhs.tx + self.c * rhs.ty + self.tx,
            ty: self.b * rhs.tx + self.d * rhs.ty + self.ty,
        }
    }
}

/// Reduce `x` into `[-PI, PI]` by repeated subtraction of `2*PI`.
fn reduce_to_pi_range(x: f64) -> f64 {
    let mut r = x % (2.0 * PI);
    if r > PI {
        r -= 2.0 * PI;
    } else if r < -PI {
        r += 2.0 * PI;
    }
    r
}

/// Fold a `[-PI, PI]`-reduced angle further into `[-PI/2, PI/2]`, where
/// the Taylor polynomials below stay within their accuracy target.
/// Returns the folded angle plus the sign `cos` picks up from the
/// reflection (`sin` is invariant under it).
fn fold_to_half_pi(r: f64) -> (f64, f64) {
    if r > PI / 2.0 {
        (PI - r, -1.0)
    } else if r < -PI / 2.0 {
        (-PI - r, -1.0)
    } else {
        (r, 1.0)
    }
}

/// 6-term Taylor-series sine, accurate to < 1e-6 absolute error over
/// `[-PI, PI]` after argument reduction and half-range folding.
pub fn sin(x: f64) -> f64 {
    let (y, _) = fold_to_half_pi(reduce_to_pi_range(x));
    let y2 = y * y;
    // y - y^3/3! + y^5/5! - y^7/7! + y^9/9! - y^11/11!
    y * (1.0 + y2 * (-1.0 / 6.0 + y2 * (1.0 / 120.0 + y2 * (-1.0 / 5040.0 + y2 * (1.0 / 362_880.0 + y2 * (-1.0 / 39_916_800.0))))))
}

/// 6-term Taylor-series cosine, same accuracy target as [`sin`].
pub fn cos(x: f64) -> f64 {
    let (y, sign) = fold_to_half_pi(reduce_to_pi_range(x));
    let y2 = y * y;
    // 1 - y^2/2! + y^4/4! - y^6/6! + y^8/8! - y^10/10!
    sign * (1.0 + y2 * (-1.0 / 2.0 + y2 * (1.0 / 24.0 + y2 * (-1.0 / 720.0 + y2 * (1.0 / 40_320.0 + y2 * (-1.0 / 3_628_800.0))))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{a} vs {b}");
    }

    #[test]
    fn sin_cos_match_std_within_tolerance() {
        let mut x = -PI;
        while x <= PI {
            assert_close(sin(x), x.sin());
            assert_close(cos(x), x.cos());
            x += 0.05;
        }
    }

    #[test]
    fn sin_cos_handle_out_of_range_arguments() {
        assert_close(sin(3.0 * PI), sin(PI));
        assert_close(cos(-5.0 * PI), cos(PI));
    }

    #[test]
    fn translate_round_trip_is_identity() {
        let fwd = AffineTransform::translation(3.0, -4.0);
        let back = AffineTransform::translation(-3.0, 4.0);
        let composed = back.compose(&fwd);
        let p = Point::new(10.0, 20.0);
        let out = composed.apply(p);
        assert!((out.x - p.x).abs() < 1e-9);
        assert!((out.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn compose_order_matches_function_composition() {
        let t = AffineTransform::translation(1.0, 2.0);
        let s = AffineTransform::scaling(2.0, 2.0);
        let composed = t.compose(&s);
        let p = Point::new(3.0, 4.0);
        let direct = t.apply(s.apply(p));
        let via_compose = composed.apply(p);
        assert_close(direct.x, via_compose.x);
        assert_close(direct.y, via_compose.y);
    }
}
