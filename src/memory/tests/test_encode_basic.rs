use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::{CurveMetrics, Point3, Transform, Vec3};
use crate::memory::{EncodeOptions, encode, encode_flat, encode_with_metrics};

fn trefoil(samples: usize) -> Vec<Point3> {
    (0..samples)
        .map(|i| {
            let t = std::f64::consts::TAU * i as f64 / (samples - 1) as f64;
            Point3::new(
                t.sin() + 2.0 * (2.0 * t).sin(),
                t.cos() - 2.0 * (2.0 * t).cos(),
                -(3.0 * t).sin(),
            )
        })
        .collect()
}

#[test]
fn arclength_parameter_spans_unit_interval() {
    let pts = trefoil(300);
    let record = encode(&pts, &EncodeOptions::default());

    assert_eq!(record.len(), pts.len());
    assert_eq!(record.kappa.len(), pts.len());
    assert_eq!(record.tau.len(), pts.len());
    assert_eq!(record.u[0], 0.0);
    assert_eq!(*record.u.last().unwrap(), 1.0);
    assert!(record.u.windows(2).all(|w| w[1] >= w[0]));
    assert!(record.kappa.iter().all(|k| *k >= 0.0));
    assert!(record.length > 0.0);
    assert!(record.validate().is_ok());
}

#[test]
fn degenerate_inputs_encode_to_zero_records() {
    let single = encode(&[Point3::new(1.0, 2.0, 3.0)], &EncodeOptions::default());
    assert_eq!(single.length, 0.0);
    assert_eq!(single.u, vec![0.0]);
    assert_eq!(single.kappa, vec![0.0]);
    assert!(single.is_degenerate());

    let p = Point3::new(-4.0, 0.5, 9.0);
    let coincident = encode(&[p, p, p], &EncodeOptions::default());
    assert_eq!(coincident.length, 0.0);
    assert_eq!(coincident.u, vec![0.0; 3]);
    assert_eq!(coincident.tau, vec![0.0; 3]);
    assert_eq!(coincident.pack.levels.len(), 3);
    assert_eq!(coincident.pack.global.kappa_l1, 0.0);
}

#[test]
fn level_option_controls_pack_depth() {
    let pts = trefoil(64);
    let shallow = encode(&pts, &EncodeOptions::default().with_levels(1));
    let deep = encode(&pts, &EncodeOptions::default().with_levels(5));
    assert_eq!(shallow.pack.levels.len(), 1);
    assert_eq!(deep.pack.levels.len(), 5);
    assert_eq!(shallow.kappa, deep.kappa);
    assert_eq!(shallow.pack.global, deep.pack.global);
}

#[test]
fn record_is_invariant_under_rigid_motion() {
    let mut rng = StdRng::seed_from_u64(7);
    let pts = trefoil(250);
    let base = encode(&pts, &EncodeOptions::default());

    for _ in 0..5 {
        let axis = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(0.2..1.0),
        );
        let rotation = Transform::rotation(axis, rng.random_range(-3.0..3.0)).unwrap();
        let offset = Vec3::new(
            rng.random_range(-5.0..5.0),
            rng.random_range(-5.0..5.0),
            rng.random_range(-5.0..5.0),
        );
        let moved = (Transform::translation(offset) * rotation).apply_points(&pts);
        let record = encode(&moved, &EncodeOptions::default());

        assert!((record.length - base.length).abs() < 1e-9 * base.length);
        for (a, b) in record.u.iter().zip(&base.u) {
            assert!((a - b).abs() < 1e-9);
        }
        for (a, b) in record.kappa.iter().zip(&base.kappa) {
            assert!((a - b).abs() < 1e-6);
        }
        for (a, b) in record.tau.iter().zip(&base.tau) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}

#[test]
fn flat_buffer_matches_point_input() {
    let pts = trefoil(40);
    let flat: Vec<f64> = pts.iter().flat_map(|p| p.to_array()).collect();
    let from_flat = encode_flat(&flat, 3, &EncodeOptions::default()).unwrap();
    assert_eq!(from_flat, encode(&pts, &EncodeOptions::default()));
}

#[test]
fn metrics_variant_matches_plain_encode() {
    let pts = trefoil(80);
    let mut metrics = CurveMetrics::default();
    metrics.begin();
    let timed = encode_with_metrics(&pts, &EncodeOptions::default(), &mut metrics);
    assert_eq!(timed, encode(&pts, &EncodeOptions::default()));
}
