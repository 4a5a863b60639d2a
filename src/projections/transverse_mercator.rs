use std::f64::consts::PI;

use lazy_static::lazy_static;
use num::Complex;

use crate::{
    constants::{UTM_K0, WGS84_A, WGS84_F},
    latlon::LatLon,
    utility::{dms, polyval, sincosd, GeoMath},
    ThisOrThat,
};

// ================================
// Transverse Mercator Constants
// ================================

// Assuming GEOGRAPHICLIB_TRANSVERSEMERCATOR_ORDER == 6
const B1_COEFF: [f64; 5] = [
    // b1*(n+1), polynomial in n2 of order 3
    1., 4., 64., 256., 256.,
];  // count = 5

#[allow(clippy::unreadable_literal)]
const ALP_COEFF: [f64; 27] = [
    // alp[1]/n^1, polynomial in n of order 5
    31564., -66675., 34440., 47250., -100800., 75600., 151200.,
    // alp[2]/n^2, polynomial in n of order 4
    -1983433., 863232., 748608., -1161216., 524160., 1935360.,
    // alp[3]/n^3, polynomial in n of order 3
    670412., 406647., -533952., 184464., 725760.,
    // alp[4]/n^4, polynomial in n of order 2
    6601661., -7732800., 2230245., 7257600.,
    // alp[5]/n^5, polynomial in n of order 1
    -13675556., 3438171., 7983360.,
    // alp[6]/n^6, polynomial in n of order 0
    212378941., 319334400.,
];  // count = 27

#[allow(clippy::unreadable_literal)]
const BET_COEFF: [f64; 27] = [
    // bet[1]/n^1, polynomial in n of order 5
    384796., -382725., -6720., 932400., -1612800., 1209600., 2419200.,
    // bet[2]/n^2, polynomial in n of order 4
    -1118711., 1695744., -1174656., 258048., 80640., 3870720.,
    // bet[3]/n^3, polynomial in n of order 3
    22276., -16929., -15984., 12852., 362880.,
    // bet[4]/n^4, polynomial in n of order 2
    -830251., -158400., 197865., 7257600.,
    // bet[5]/n^5, polynomial in n of order 1
    -435388., 453717., 15966720.,
    // bet[6]/n^6, polynomial in n of order 0
    20648693., 638668800.,
];  // count = 27

const MAXPOW: usize = 6;

const M: usize = MAXPOW / 2;
const N: f64 = WGS84_F / (2. - WGS84_F);
const E2: f64 = WGS84_F * (2. - WGS84_F);

lazy_static! {
    static ref UTM: TransverseMercator = TransverseMercator::new(WGS84_A, UTM_K0);
}

/// Krüger series Transverse Mercator on the WGS84 ellipsoid. Eastings and
/// northings in and out are relative to the central meridian and the equator;
/// false origins are applied by the caller.
pub(crate) struct TransverseMercator {
    k0: f64,
    es: f64,
    a1: f64,
    alp: [f64; MAXPOW + 1],
    bet: [f64; MAXPOW + 1],
}

/// Clenshaw summation of the trigonometric series over `coeff` at `zeta`.
/// Returns the correction term to add to `zeta`.
fn clenshaw(coeff: &[f64; MAXPOW + 1], sign: f64, xi: f64, eta: f64) -> Complex<f64> {
    let (s0, c0) = (2. * xi).sin_cos();
    let ch0 = (2. * eta).cosh();
    let sh0 = (2. * eta).sinh();

    // 2 * cos(2 * zeta)
    let a = Complex::new(2. * c0 * ch0, -2. * s0 * sh0);
    let mut n = MAXPOW;

    let mut y0 = Complex::new((n % 2 == 1).ternary(sign * coeff[n], 0.), 0.);
    let mut y1 = Complex::default();

    if n % 2 == 1 {
        n -= 1;
    }

    while n > 0 {
        y1 = a * y0 - y1 + sign * coeff[n];
        n -= 1;

        y0 = a * y1 - y0 + sign * coeff[n];
        n -= 1;
    }

    // sin(2 * zeta)
    Complex::new(s0 * ch0, c0 * sh0) * y0
}

impl TransverseMercator {
    fn new(a: f64, k0: f64) -> TransverseMercator {
        let es = (WGS84_F < 0.).ternary(-1., 1.) * E2.abs().sqrt();

        let b1 = polyval(&B1_COEFF[0..=M], N.powi(2)) / (B1_COEFF[M + 1] * (1. + N));
        // a1 is the equivalent radius for computing the circumference of
        // ellipse.
        let a1 = b1 * a;

        let mut alp = [0_f64; MAXPOW + 1];
        let mut bet = [0_f64; MAXPOW + 1];

        let mut o = 0;
        let mut d = N;

        for l in 1..=MAXPOW {
            let m = MAXPOW - l;
            alp[l] = d * polyval(&ALP_COEFF[o..=o+m], N) / ALP_COEFF[o + m + 1];
            bet[l] = d * polyval(&BET_COEFF[o..=o+m], N) / BET_COEFF[o + m + 1];
            o += m + 2;
            d *= N;
        }

        Self {
            k0,
            es,
            a1,
            alp,
            bet,
        }
    }

    /// Shared UTM instance
    pub fn utm() -> &'static TransverseMercator {
        &UTM
    }

    /// Projects `lat`/`lon` relative to the central meridian `lon0`,
    /// returning `(x, y)` in meters without false easting/northing.
    pub fn from_latlon(&self, lon0: f64, lat: f64, lon: f64) -> (f64, f64) {
        let mut lat = lat;
        let mut lon = lon0.ang_diff(lon);

        let mut lat_sign = lat.is_sign_negative().ternary(-1., 1.);
        let lon_sign = lon.is_sign_negative().ternary(-1., 1.);
        lat *= lat_sign;
        lon *= lon_sign;

        let backside = lon > f64::from(dms::QD);
        if backside {
            if lat.is_zero() {
                lat_sign = -1.;
            }
            lon = f64::from(dms::HD) - lon;
        }

        let (sphi, cphi) = sincosd(lat);
        let (slam, clam) = sincosd(lon);

        let (xip, etap) = if lat.eps_eq(f64::from(dms::QD)) {
            (PI / 2., 0.)
        } else {
            let taup = (sphi / cphi).taupf(self.es);
            (taup.atan2(clam), (slam / taup.hypot(clam)).asinh())
        };

        let zeta = Complex::new(xip, etap) + clenshaw(&self.alp, 1., xip, etap);

        let xi = backside.ternary(PI - zeta.re, zeta.re);
        let y = self.a1 * self.k0 * xi * lat_sign;
        let x = self.a1 * self.k0 * zeta.im * lon_sign;

        (x, y)
    }

    /// Inverse of [`TransverseMercator::from_latlon`].
    pub fn to_latlon(&self, lon0: f64, x: f64, y: f64) -> LatLon {
        let mut xi = y / (self.a1 * self.k0);
        let mut eta = x / (self.a1 * self.k0);

        let xi_sign = xi.is_sign_negative().ternary(-1., 1.);
        let eta_sign = eta.is_sign_negative().ternary(-1., 1.);

        xi *= xi_sign;
        eta *= eta_sign;

        let backside = xi > PI/2.;
        if backside {
            xi = PI - xi;
        }

        let zeta = Complex::new(xi, eta) + clenshaw(&self.bet, -1., xi, eta);

        let xip = zeta.re;
        let etap = zeta.im;
        let s = etap.sinh();
        let c = 0_f64.max(xip.cos());
        let r = s.hypot(c);

        let (mut lat, mut lon) = if r.is_zero() {
            (f64::from(dms::QD), 0.)
        } else {
            let lon = s.atan2(c).to_degrees();
            let tau = (xip.sin() / r).tauf(self.es);

            (tau.atan().to_degrees(), lon)
        };

        lat *= xi_sign;
        if backside {
            lon = f64::from(dms::HD) - lon;
        }
        lon *= eta_sign;
        lon = (lon + lon0.ang_normalize()).ang_normalize();

        LatLon::new(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_origin() {
        let (x, y) = TransverseMercator::utm().from_latlon(3., 0., 3.);
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn forward_matches_reference() {
        // Empire State Building, zone 18
        let (x, y) = TransverseMercator::utm().from_latlon(-75., 40.748_333, -73.985_278);
        assert!((x + 500_000. - 585_664.121).abs() < 1e-3);
        assert!((y - 4_511_315.422).abs() < 1e-3);
    }

    #[test]
    fn inverse_undoes_forward() {
        let tm = TransverseMercator::utm();
        for (lat, lon) in [(-79.5, 2.9), (-33.8688, 151.2093), (0.0, -177.0), (61.0, 5.0), (83.9, 40.0)] {
            let lon0 = 6.0 * ((lon + 180.0) / 6.0_f64).floor() - 177.0;
            let (x, y) = tm.from_latlon(lon0, lat, lon);
            let back = tm.to_latlon(lon0, x, y);
            assert!((back.latitude() - lat).abs() < 1e-9, "{lat} -> {}", back.latitude());
            assert!((back.longitude() - lon).abs() < 1e-9, "{lon} -> {}", back.longitude());
        }
    }
}
