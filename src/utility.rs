use crate::ThisOrThat;

pub(crate) mod dms {
    /// Degrees per quarter turn
    pub const QD: i32 = 90;
    /// Degrees per half turn
    pub const HD: i32 = 2 * QD;
    /// Degrees per turn
    pub const TD: i32 = 2 * HD;
}

/// Error free addition: the rounded sum and the rounding error
fn two_sum(u: f64, v: f64) -> (f64, f64) {
    let sum = u + v;
    let u_rounded = sum - v;
    let v_rounded = sum - u_rounded;
    let err = -((u_rounded - u) + (v_rounded - v));

    (sum, sum.is_zero().ternary(sum, err))
}

/// Evaluate a polynomial
pub(crate) fn polyval(p: &[f64], x: f64) -> f64 {
    p
        .iter()
        .fold(0_f64, |acc, val| acc*x + val)
}

/// Sine and cosine of an angle in degrees, exact at multiples of 90
pub(crate) fn sincosd(x: f64) -> (f64, f64) {
    let r = x % f64::from(dms::TD);
    let q = (r / f64::from(dms::QD)).round();
    let r = (r - q * f64::from(dms::QD)).to_radians();
    let (s, c) = r.sin_cos();

    // q is bounded by [-4, 4] so the cast is safe
    #[allow(clippy::cast_possible_truncation)]
    let (sinx, cosx) = match (q as i32).rem_euclid(4) {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    };

    (sinx + 0.0, cosx + 0.0)
}

pub(crate) trait GeoMath {
    fn is_zero(&self) -> bool;
    fn eps_eq(&self, other: Self) -> bool;
    fn ang_normalize(&self) -> Self;
    fn ang_diff(&self, other: Self) -> Self;
    fn eatanhe(&self, es: Self) -> Self;
    fn remainder(&self, denom: Self) -> Self;
    fn taupf(&self, es: Self) -> Self;
    fn tauf(&self, es: Self) -> Self;
}

impl GeoMath for f64 {
    fn is_zero(&self) -> bool {
        self.abs() < f64::EPSILON
    }

    fn eps_eq(&self, other: f64) -> bool {
        (*self - other).abs() < f64::EPSILON
    }

    fn ang_normalize(&self) -> f64 {
        let value = self.remainder(f64::from(dms::TD));
        let hd = f64::from(dms::HD);

        if value.abs().eps_eq(hd) {
            hd.copysign(*self)
        }
        else {
            value
        }
    }

    fn ang_diff(&self, other: f64) -> f64 {
        let td = f64::from(dms::TD);
        let hd = f64::from(dms::HD);

        let (diff, err) = two_sum((-*self).remainder(td), other % td);
        let (diff, err) = two_sum(diff.remainder(td), err);

        // Signed zero and +/-180 take their sign from the rounding error
        if diff.is_zero() || diff.abs().eps_eq(hd) {
            diff.copysign(err.is_zero().ternary_lazy(|| other - *self, || -err))
        }
        else {
            diff
        }
    }

    fn eatanhe(&self, es: f64) -> f64 {
        es.abs() * (es * *self).atanh()
    }

    fn remainder(&self, denom: Self) -> Self {
        *self - (*self / denom).round() * denom
    }

    fn taupf(&self, es: f64) -> f64 {
        let tau1 = 1.0_f64.hypot(*self);
        let sig = (*self / tau1).eatanhe(es).sinh();

        1.0_f64.hypot(sig) * *self - sig * tau1
    }

    /// Newton's method on [`GeoMath::taupf`]
    #[allow(clippy::similar_names)]
    fn tauf(&self, es: f64) -> f64 {
        const MAX_ITERATIONS: usize = 5;

        let e2m = 1.0 - es.powi(2);
        let tolerance = f64::EPSILON.sqrt() / 10.0 * self.abs().max(1.0);

        let mut tau = (self.abs() > 70.0).ternary_lazy(|| self * 1_f64.eatanhe(es).exp(), || self / e2m);
        for _ in 0..MAX_ITERATIONS {
            let taup = tau.taupf(es);
            let step = (self - taup) * (1.0 + e2m * tau.powi(2)) / (e2m * 1_f64.hypot(tau) * 1_f64.hypot(taup));
            tau += step;

            if step.abs() < tolerance {
                break;
            }
        }

        tau
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_angles() {
        assert!(190_f64.ang_normalize().eps_eq(-170.0));
        assert!((-180_f64).ang_normalize().eps_eq(-180.0));
        assert!(180_f64.ang_normalize().eps_eq(180.0));
        assert!(45_f64.ang_normalize().eps_eq(45.0));
    }

    #[test]
    fn angle_difference_wraps() {
        assert!((-75_f64).ang_diff(-77.0).eps_eq(-2.0));
        assert!(179_f64.ang_diff(-179.0).eps_eq(2.0));

        // Half turns keep the sign of the difference
        assert_eq!(0_f64.ang_diff(180.0), 180.0);
        assert_eq!(0_f64.ang_diff(-180.0), -180.0);
        assert!(0_f64.ang_diff(0.0).is_sign_positive());
    }

    #[test]
    fn two_sum_keeps_rounding_error() {
        assert_eq!(two_sum(1.0, 1e-20), (1.0, 1e-20));
        assert_eq!(two_sum(0.5, 0.25), (0.75, 0.0));
    }

    #[test]
    fn sincosd_is_exact_on_quadrants() {
        assert_eq!(sincosd(90.0), (1.0, 0.0));
        assert_eq!(sincosd(-90.0), (-1.0, 0.0));
        assert_eq!(sincosd(180.0), (0.0, -1.0));
        let (s, c) = sincosd(30.0);
        assert!((s - 0.5).abs() < 1e-15);
        assert!((c - 3_f64.sqrt() / 2.0).abs() < 1e-15);
    }

    #[test]
    fn tauf_inverts_taupf() {
        let es = 0.081_819_190_842_622;
        for tau in [-3.0, -0.5, 0.0, 0.25, 1.0, 7.5] {
            let taup = f64::taupf(&tau, es);
            assert!((taup.tauf(es) - tau).abs() < 1e-12);
        }
    }
}
