use criterion::{black_box, criterion_group, criterion_main, Criterion};

use heliograph::body::Sun;
use heliograph::ephemeris::Ephemeris;
use heliograph::location::Location;
use heliograph::time::TimeOfInterest;

fn bench_positions(c: &mut Criterion) {
    let toi = TimeOfInterest::from_time(2020, 10, 22, 6, 15, 0.0).unwrap();
    let berlin = Location::at(52.519, 13.408).unwrap();
    let sun = Ephemeris::new(Sun, toi);

    c.bench_function("sun/geocentric_ecliptic_date", |b| {
        b.iter(|| black_box(sun.geocentric_ecliptic_spherical_date().unwrap()))
    });

    c.bench_function("sun/apparent_geocentric_equatorial", |b| {
        b.iter(|| black_box(sun.apparent_geocentric_equatorial_spherical().unwrap()))
    });

    c.bench_function("sun/apparent_topocentric_horizontal", |b| {
        b.iter(|| black_box(sun.apparent_topocentric_horizontal(black_box(&berlin)).unwrap()))
    });
}

fn bench_one_year(c: &mut Criterion) {
    let berlin = Location::at(52.519, 13.408).unwrap();
    let start = TimeOfInterest::from_time(2020, 1, 1, 12, 0, 0.0).unwrap();

    c.bench_function("sun/altitude_daily_for_one_year", |b| {
        b.iter(|| {
            (0..365)
                .map(|day| {
                    let toi = start.add_days(day as f64).unwrap();
                    Ephemeris::new(Sun, toi)
                        .topocentric_horizontal(&berlin)
                        .unwrap()
                        .altitude
                })
                .fold(f64::MIN, f64::max)
        })
    });
}

criterion_group!(benches, bench_positions, bench_one_year);
criterion_main!(benches);
