//! # Earth orientation: obliquity and nutation
//!
//! Angles describing the orientation of the Earth's equator with respect to the ecliptic,
//! all expressed as functions of `T`, the number of Julian centuries elapsed since J2000.0
//! (see [`TimeOfInterest::julian_centuries`](crate::time::TimeOfInterest::julian_centuries)).
//!
//! ## Overview
//!
//! - [`mean_obliquity`]: IAU 1976 obliquity of the ecliptic, in degrees.
//! - [`nutation`]: IAU 1980 (Wahr) nutation in longitude and obliquity, in arcseconds.
//! - [`true_obliquity`]: mean obliquity corrected by the nutation in obliquity.
//! - [`equation_of_equinoxes`]: difference between apparent and mean sidereal time.
//!
//! ## See also
//! * [`crate::corrections`] – uses Δψ to build apparent ecliptic longitudes.
//! * [`crate::time::apparent_sidereal_time`] – uses the equation of the equinoxes.
use crate::constants::{ArcSec, Degree, ARCSEC_TO_DEG, DPI, RADEG, RADSEC};

/// Mean obliquity of the ecliptic (IAU 1976).
///
/// Arguments
/// ---------
/// * `t`: Julian centuries since J2000.0.
///
/// Return
/// ------
/// * The mean obliquity ε₀ in degrees.
pub fn mean_obliquity(t: f64) -> Degree {
    let ob0 = (23.0 * 3600.0 + 26.0 * 60.0) + 21.448;
    let ob1 = -46.815;
    let ob2 = -0.0006;
    let ob3 = 0.00181;

    (((ob3 * t + ob2) * t + ob1) * t + ob0) * ARCSEC_TO_DEG
}

/// True obliquity of the ecliptic ε = ε₀ + Δε.
pub fn true_obliquity(t: f64) -> Degree {
    let (_, deps) = nutation(t);
    mean_obliquity(t) + deps * ARCSEC_TO_DEG
}

/// Equation of the equinoxes Δψ·cos ε, in degrees.
///
/// This is the quantity added to the mean sidereal time to obtain the apparent sidereal time.
pub fn equation_of_equinoxes(t: f64) -> Degree {
    let (dpsi, deps) = nutation(t);
    let eps = mean_obliquity(t) + deps * ARCSEC_TO_DEG;
    dpsi * ARCSEC_TO_DEG * (eps * RADEG).cos()
}

/// Nutation angles in longitude and obliquity, IAU 1980 (Wahr) theory.
///
/// Arguments
/// ---------
/// * `t`: Julian centuries since J2000.0.
///
/// Return
/// ------
/// * A tuple `(Δψ, Δε)` in arcseconds.
///
/// The five fundamental arguments (mean anomalies of the Moon and Sun, argument of latitude
/// of the Moon, mean elongation of the Moon and longitude of its ascending node) are cubic
/// polynomials in `t`. The periodic terms are then expanded with angle addition identities
/// instead of evaluating one sine per term.
pub fn nutation(t: f64) -> (ArcSec, ArcSec) {
    let t2 = t * t;
    let t3 = t2 * t;

    let dl = (485866.733 + 1717915922.633 * t + 31.310 * t2 + 0.064 * t3) * RADSEC;
    let dp = (1287099.804 + 129596581.224 * t - 0.577 * t2 - 0.012 * t3) * RADSEC;
    let df = (335778.877 + 1739527263.137 * t - 13.257 * t2 + 0.011 * t3) * RADSEC;
    let dd = (1072261.307 + 1602961601.328 * t - 6.891 * t2 + 0.019 * t3) * RADSEC;
    let dn = (450160.280 - 6962890.539 * t + 7.455 * t2 + 0.008 * t3) * RADSEC;

    let l = dl % DPI;
    let p = dp % DPI;
    let x = df % DPI * 2.0;
    let d = dd % DPI;
    let n = dn % DPI;

    let cos_sin = |a: f64| -> (f64, f64) { (a.cos(), a.sin()) };

    let (cl, sl) = cos_sin(l);
    let (cp, sp) = cos_sin(p);
    let (cx, sx) = cos_sin(x);
    let (cd, sd) = cos_sin(d);
    let (cn, sn) = cos_sin(n);

    // products of the fundamental arguments
    let cp2 = 2.0 * cp * cp - 1.0;

    let sp2 = 2.0 * sp * cp;
    let cd2 = 2.0 * cd * cd - 1.0;
    let sd2 = 2.0 * sd * cd;
    let cn2 = 2.0 * cn * cn - 1.0;
    let sn2 = 2.0 * sn * cn;
    let cl2 = 2.0 * cl * cl - 1.0;
    let sl2 = 2.0 * sl * cl;

    let ca = cx * cd2 + sx * sd2;
    let sa = sx * cd2 - cx * sd2;
    let cb = ca * cn - sa * sn;
    let sb = sa * cn + ca * sn;
    let cc = cb * cn - sb * sn;
    let sc = sb * cn + cb * sn;

    let cv = cx * cd2 - sx * sd2;
    let sv = sx * cd2 + cx * sd2;
    let ce = cv * cn - sv * sn;
    let se = sv * cn + cv * sn;
    let cf = ce * cn - se * sn;
    let sf = se * cn + ce * sn;

    let cg = cl * cd2 + sl * sd2;
    let sg = sl * cd2 - cl * sd2;
    let ch = cx * cn2 - sx * sn2;
    let sh = sx * cn2 + cx * sn2;
    let cj = ch * cl - sh * sl;
    let sj = sh * cl + ch * sl;

    let ck = cj * cl - sj * sl;
    let sk = sj * cl + cj * sl;
    let cm = cx * cl2 + sx * sl2;
    let sm = sx * cl2 - cx * sl2;
    let cq = cl * cd + sl * sd;
    let sq = sl * cd - cl * sd;

    let cr = 2.0 * cq * cq - 1.0;
    let sr = 2.0 * sq * cq;
    let cs = cx * cn - sx * sn;
    let ss = sx * cn + cx * sn;
    let ct = cs * cl - ss * sl;
    let st = ss * cl + cs * sl;

    let cu = cf * cl + sf * sl;
    let su = sf * cl - cf * sl;
    let cw = cp * cg - sp * sg;
    let sw = sp * cg + cp * sg;

    // nutation in longitude
    let mut dpsi =
        -(171996.0 + 174.2 * t) * sn + (2062.0 + 0.2 * t) * sn2 + 46.0 * (sm * cn + cm * sn)
            - 11.0 * sm
            - 3.0 * (sm * cn2 + cm * sn2)
            - 3.0 * (sq * cp - cq * sp)
            - 2.0 * (sb * cp2 - cb * sp2)
            + (sn * cm - cn * sm)
            - (13187.0 + 1.6 * t) * sc
            + (1426.0 - 3.4 * t) * sp
            - (517.0 - 1.2 * t) * (sc * cp + cc * sp)
            + (217.0 - 0.5 * t) * (sc * cp - cc * sp)
            + (129.0 + 0.1 * t) * sb
            + 48.0 * sr
            - 22.0 * sa
            + (17.0 - 0.1 * t) * sp2
            - 15.0 * (sp * cn + cp * sn)
            - (16.0 - 0.1 * t) * (sc * cp2 + cc * sp2)
            - 12.0 * (sn * cp - cn * sp);

    dpsi += -6.0 * (sn * cr - cn * sr) - 5.0 * (sb * cp - cb * sp)
        + 4.0 * (sr * cn + cr * sn)
        + 4.0 * (sb * cp + cb * sp)
        - 4.0 * sq
        + (sr * cp + cr * sp)
        + (sn * ca - cn * sa)
        - (sp * ca - cp * sa)
        + (sp * cn2 + cp * sn2)
        + (sn * cq - cn * sq)
        - (sp * ca + cp * sa)
        - (2274.0 + 0.2 * t) * sh
        + (712.0 + 0.1 * t) * sl
        - (386.0 + 0.4 * t) * ss
        - 301.0 * sj
        - 158.0 * sg
        + 123.0 * (sh * cl - ch * sl)
        + 63.0 * sd2
        + (63.0 + 0.1 * t) * (sl * cn + cl * sn)
        - (58.0 + 0.1 * t) * (sn * cl - cn * sl)
        - 59.0 * su
        - 51.0 * st
        - 38.0 * sf
        + 29.0 * sl2;

    dpsi += 29.0 * (sc * cl + cc * sl) - 31.0 * sk
        + 26.0 * sx
        + 21.0 * (ss * cl - cs * sl)
        + 16.0 * (sn * cg - cn * sg)
        - 13.0 * (sn * cg + cn * sg)
        - 10.0 * (se * cl - ce * sl)
        - 7.0 * (sg * cp + cg * sp)
        + 7.0 * (sh * cp + ch * sp)
        - 7.0 * (sh * cp - ch * sp)
        - 8.0 * (sf * cl + cf * sl)
        + 6.0 * (sl * cd2 + cl * sd2)
        + 6.0 * (sc * cl2 + cc * sl2)
        - 6.0 * (sn * cd2 + cn * sd2)
        - 7.0 * se
        + 6.0 * (sb * cl + cb * sl)
        - 5.0 * (sn * cd2 - cn * sd2)
        + 5.0 * (sl * cp - cl * sp)
        - 5.0 * (ss * cl2 + cs * sl2)
        - 4.0 * (sp * cd2 - cp * sd2);

    dpsi += 4.0 * (sl * cx - cl * sx) - 4.0 * sd - 3.0 * (sl * cp + cl * sp)
        + 3.0 * (sl * cx + cl * sx)
        - 3.0 * (sj * cp - cj * sp)
        - 3.0 * (su * cp - cu * sp)
        - 2.0 * (sn * cl2 - cn * sl2)
        - 3.0 * (sk * cl + ck * sl)
        - 3.0 * (sf * cp - cf * sp)
        + 2.0 * (sj * cp + cj * sp)
        - 2.0 * (sb * cl - cb * sl);

    dpsi += 2.0 * (sn * cl2 + cn * sl2) - 2.0 * (sl * cn2 + cl * sn2)
        + 2.0 * (sl * cl2 + cl * sl2)
        + 2.0 * (sh * cd + ch * sd)
        + (sn2 * cl - cn2 * sl)
        - (sg * cd2 - cg * sd2)
        + (sf * cl2 - cf * sl2)
        - 2.0 * (su * cd2 + cu * sd2)
        - (sr * cd2 - cr * sd2)
        + (sw * ch + cw * sh)
        - (sl * ce + cl * se)
        - (sf * cr - cf * sr)
        + (su * ca + cu * sa)
        + (sg * cp - cg * sp)
        + (sb * cl2 + cb * sl2)
        - (sf * cl2 + cf * sl2)
        - (st * ca - ct * sa)
        + (sc * cx + cc * sx)
        + (sj * cr + cj * sr)
        - (sg * cx + cg * sx);

    dpsi += (sp * cs + cp * ss) + (sn * cw - cn * sw)
        - (sn * cx - cn * sx)
        - (sh * cd - ch * sd)
        - (sp * cd2 + cp * sd2)
        - (sl * cv - cl * sv)
        - (ss * cp - cs * sp)
        - (sw * cn + cw * sn)
        - (sl * ca - cl * sa)
        + (sl2 * cd2 + cl2 * sd2)
        - (sf * cd2 + cf * sd2)
        + (sp * cd + cp * sd);

    // nutation in obliquity
    let mut deps = (92025.0 + 8.9 * t) * cn - (895.0 - 0.5 * t) * cn2 - 24.0 * (cm * cn - sm * sn)
        + (cm * cn2 - sm * sn2)
        + (cb * cp2 + sb * sp2)
        + (5736.0 - 3.1 * t) * cc
        + (54.0 - 0.1 * t) * cp
        + (224.0 - 0.6 * t) * (cc * cp - sc * sp)
        - (95.0 - 0.3 * t) * (cc * cp + sc * sp)
        - 70.0 * cb
        + cr
        + 9.0 * (cp * cn - sp * sn)
        + 7.0 * (cc * cp2 - sc * sp2)
        + 6.0 * (cn * cp + sn * sp)
        + 3.0 * (cn * cr + sn * sr)
        + 3.0 * (cb * cp + sb * sp)
        - 2.0 * (cr * cn - sr * sn)
        - 2.0 * (cb * cp - sb * sp);

    deps += (977.0 - 0.5 * t) * ch - 7.0 * cl + 200.0 * cs + (129.0 - 0.1 * t) * cj
        - cg
        - 53.0 * (ch * cl + sh * sl)
        - 2.0 * cd2
        - 33.0 * (cl * cn - sl * sn)
        + 32.0 * (cn * cl + sn * sl)
        + 26.0 * cu
        + 27.0 * ct
        + 16.0 * cf
        - cl2
        - 12.0 * (cc * cl - sc * sl)
        + 13.0 * ck
        - cx
        - 10.0 * (cs * cl + ss * sl)
        - 8.0 * (cn * cg + sn * sg)
        + 7.0 * (cn * cg - sn * sg)
        + 5.0 * (ce * cl + se * sl)
        - 3.0 * (ch * cp - sh * sp)
        + 3.0 * (ch * cp + sh * sp)
        + 3.0 * (cf * cl - sf * sl)
        - 3.0 * (cc * cl2 - sc * sl2)
        + 3.0 * (cn * cd2 - sn * sd2)
        + 3.0 * ce
        - 3.0 * (cb * cl - sb * sl)
        + 3.0 * (cn * cd2 + sn * sd2)
        + 3.0 * (cs * cl2 - ss * sl2)
        + (cj * cp + sj * sp)
        + (cu * cp + su * sp)
        + (cn * cl2 + sn * sl2)
        + (ck * cl - sk * sl)
        + (cf * cp + sf * sp)
        - (cj * cp - sj * sp)
        + (cb * cl + sb * sl)
        - (cn * cl2 - sn * sl2)
        + (cl * cn2 - sl * sn2)
        - (ch * cd - sh * sd)
        - (cn2 * cl + sn2 * sl)
        - (cf * cl2 + sf * sl2)
        + (cu * cd2 - su * sd2)
        - (cw * ch - sw * sh)
        + (cl * ce - sl * se)
        + (cf * cr + sf * sr)
        - (cb * cl2 - sb * sl2);

    // series are in units of 0.0001″
    (dpsi * 1e-4, deps * 1e-4)
}

#[cfg(test)]
mod earth_orientation_test {
    use super::*;
    use approx::assert_relative_eq;

    const T_REFERENCE: f64 = 0.20807010038785795;

    #[test]
    fn test_mean_obliquity_at_j2000() {
        assert_relative_eq!(mean_obliquity(0.0), 23.43929111111111, epsilon = 1e-12);
        assert_relative_eq!(
            mean_obliquity(0.0) * RADEG,
            0.40909280422232897,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_nutation_at_j2000() {
        let (dpsi, deps) = nutation(0.0);
        assert_relative_eq!(dpsi, -13.923385169502602, epsilon = 1e-9);
        assert_relative_eq!(deps, -5.773808263765919, epsilon = 1e-9);
    }

    #[test]
    fn test_nutation_reference_instant() {
        let (dpsi, deps) = nutation(T_REFERENCE);
        assert_relative_eq!(dpsi, -18.136, epsilon = 0.05);
        assert_relative_eq!(deps, 1.44, epsilon = 0.05);
    }

    #[test]
    fn test_true_obliquity_and_equation_of_equinoxes() {
        let (dpsi, deps) = nutation(T_REFERENCE);
        let eps = true_obliquity(T_REFERENCE);
        assert_relative_eq!(
            eps,
            mean_obliquity(T_REFERENCE) + deps / 3600.0,
            epsilon = 1e-12
        );

        let eqeq = equation_of_equinoxes(T_REFERENCE);
        assert_relative_eq!(eqeq, dpsi / 3600.0 * (eps * RADEG).cos(), epsilon = 1e-12);
        // about −1.1 seconds of time
        assert_relative_eq!(eqeq * 240.0, -1.109, epsilon = 0.01);
    }
}
