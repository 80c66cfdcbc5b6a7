mod common;

use approx::assert_abs_diff_eq;
use common::{berlin, reference_sun, reference_time};
use heliograph::coordinates::conversion::{
    earth_to_sun_geocentric, ecliptic_to_equatorial, equatorial_to_ecliptic,
    heliocentric_to_geocentric, rectangular_to_spherical, spherical_to_rectangular,
};
use heliograph::coordinates::{normalize_angle_180, EclipticSphericalCoordinates};
use heliograph::earth_orientation::true_obliquity;
use heliograph::ephemeris::Equinox;
use heliograph::orbital_model::{OrbitalModel, Vsop87Earth};

#[test]
fn test_spherical_rectangular_round_trip() {
    for &(lon, lat, r) in &[
        (0.0, 0.0, 1.0),
        (45.0, 30.0, 0.5),
        (135.0, -60.0, 2.0),
        (225.0, 89.0, 1.0167),
        (359.9999, -0.00014017, 0.99514386),
    ] {
        let coords = EclipticSphericalCoordinates::new(lon, lat, r).unwrap();
        let back = rectangular_to_spherical(&spherical_to_rectangular(&coords).unwrap());
        assert_abs_diff_eq!(normalize_angle_180(back.lon - lon), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(back.lat, lat, epsilon = 1e-9);
        assert_abs_diff_eq!(back.radius_vector, r, epsilon = 1e-9);
    }
}

#[test]
fn test_ecliptic_equatorial_quadrants() {
    let epsilon = true_obliquity(reference_time().julian_centuries());
    for lon in [0.001, 30.0, 89.9, 90.1, 150.0, 179.9, 210.0, 269.9, 330.0, 359.999] {
        let ecliptic = EclipticSphericalCoordinates::new(lon, 0.0, 1.0).unwrap();
        let equatorial = ecliptic_to_equatorial(&ecliptic, epsilon).unwrap();

        // on the ecliptic, right ascension stays in the same quadrant as the longitude
        assert_eq!(
            (equatorial.right_ascension / 90.0).floor(),
            (lon / 90.0_f64).floor(),
            "lon {lon} → ra {}",
            equatorial.right_ascension
        );
        let back = equatorial_to_ecliptic(&equatorial, epsilon).unwrap();
        assert_abs_diff_eq!(normalize_angle_180(back.lon - lon), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(back.lat, 0.0, epsilon = 1e-9);
    }

    for lon in [0.0, 90.0, 180.0, 270.0] {
        let ecliptic = EclipticSphericalCoordinates::new(lon, 5.0, 1.0).unwrap();
        let equatorial = ecliptic_to_equatorial(&ecliptic, epsilon).unwrap();
        let back = equatorial_to_ecliptic(&equatorial, epsilon).unwrap();
        assert_abs_diff_eq!(normalize_angle_180(back.lon - lon), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(back.lat, 5.0, epsilon = 1e-9);
    }
}

#[test]
fn test_sun_is_opposite_to_the_earth() {
    let toi = reference_time();
    let earth = Vsop87Earth.heliocentric_ecliptic_spherical_date(&toi).unwrap();
    let flipped = earth_to_sun_geocentric(&earth).unwrap();
    let subtracted =
        heliocentric_to_geocentric(&EclipticSphericalCoordinates::default(), &earth).unwrap();

    assert_abs_diff_eq!(flipped.lon, subtracted.lon, epsilon = 1e-9);
    assert_abs_diff_eq!(flipped.lat, subtracted.lat, epsilon = 1e-9);
    assert_abs_diff_eq!(flipped.radius_vector, subtracted.radius_vector, epsilon = 1e-12);
}

#[test]
fn test_frames_are_consistent() {
    let sun = reference_sun();

    // aberration and nutation only move the Sun by tens of arcseconds
    let date = sun.geocentric_ecliptic_spherical_date().unwrap();
    let apparent = sun.apparent_geocentric_ecliptic_spherical().unwrap();
    assert!(normalize_angle_180(apparent.lon - date.lon).abs() < 60.0 / 3600.0);
    assert_eq!(apparent.radius_vector, date.radius_vector);

    // two decades of precession between J2000 and 2020
    let j2000 = sun.geocentric_ecliptic_spherical_j2000().unwrap();
    let precession = date.lon - j2000.lon;
    assert!(precession > 0.27 && precession < 0.31, "precession = {precession}");
}

#[test]
fn test_topocentric_variants() {
    let sun = reference_sun();
    let location = berlin();

    for equinox in [Equinox::J2000, Equinox::Date, Equinox::Apparent] {
        let geocentric = sun.geocentric_equatorial_spherical(equinox).unwrap();
        let topocentric = sun
            .topocentric_equatorial_spherical_for(equinox, &location)
            .unwrap();
        // diurnal parallax of the Sun is below 9″
        let d_ra = normalize_angle_180(topocentric.right_ascension - geocentric.right_ascension);
        assert!(d_ra.abs() < 9.0 / 3600.0);
        assert!((topocentric.declination - geocentric.declination).abs() < 9.0 / 3600.0);
        // the Sun is above the horizon, the observer is closer to it
        assert!(topocentric.radius_vector < geocentric.radius_vector);
    }
}
