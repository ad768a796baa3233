use mandel_core::geometry::Complex;
use mandel_core::region::{Region, Resolution};
use mandel_core::sampler::{linspace, sample};
use mandel_core::CoreError;
use rand::{Rng, SeedableRng};

#[test]
fn test_corners_are_exact() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let x_min = rng.gen_range(-3.0..0.5);
        let x_max = x_min + rng.gen_range(1e-9..4.0);
        let y_min = rng.gen_range(-2.0..0.5);
        let y_max = y_min + rng.gen_range(1e-9..4.0);
        let region = Region::new(x_min, x_max, y_min, y_max).unwrap();
        let width = rng.gen_range(2..40);
        let height = rng.gen_range(2..40);
        let grid = sample(region, Resolution::new(width, height).unwrap()).unwrap();

        assert_eq!(grid.points().dim(), (height, width));
        assert_eq!(grid.get(0, 0), Some(Complex::new(x_min, y_min)));
        assert_eq!(grid.get(width - 1, 0), Some(Complex::new(x_max, y_min)));
        assert_eq!(grid.get(0, height - 1), Some(Complex::new(x_min, y_max)));
        assert_eq!(grid.get(width - 1, height - 1), Some(Complex::new(x_max, y_max)));
    }
}

#[test]
fn test_single_sample_axis_uses_min() {
    let region = Region::new(-2.0, 1.0, -1.0, 1.0).unwrap();
    let grid = sample(region, Resolution::new(1, 3).unwrap()).unwrap();
    assert_eq!(grid.xs(), &[-2.0]);
    assert_eq!(grid.ys(), &[-1.0, 0.0, 1.0]);

    let grid = sample(region, Resolution::new(1, 1).unwrap()).unwrap();
    assert_eq!(grid.get(0, 0), Some(Complex::new(-2.0, -1.0)));
}

#[test]
fn test_spacing_is_even() {
    let v = linspace(-1.0, 1.0, 5);
    assert_eq!(v, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    let v = linspace(0.0, 3.0, 301);
    for pair in v.windows(2) {
        assert!((pair[1] - pair[0] - 0.01).abs() < 1e-12);
    }
}

#[test]
fn test_cells_pair_axis_values() {
    let region = Region::new(-2.0, 1.0, -1.0, 1.0).unwrap();
    let grid = sample(region, Resolution::new(5, 4).unwrap()).unwrap();
    for (j, &y) in grid.ys().iter().enumerate() {
        for (i, &x) in grid.xs().iter().enumerate() {
            assert_eq!(grid.get(i, j), Some(Complex::new(x, y)));
            assert!(region.contains(Complex::new(x, y)));
        }
    }
}

#[test]
fn test_unvalidated_values_are_rejected() {
    // Struct literals skip the checks in `Region::new` and `Resolution::new`.
    let inverted = Region {
        x_min: 1.0,
        x_max: -2.0,
        y_min: -1.0,
        y_max: 1.0,
    };
    let err = sample(inverted, Resolution::new(4, 4).unwrap()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidRegion { .. }));

    let unbounded = Region {
        x_min: -2.0,
        x_max: f64::INFINITY,
        ..Region::default()
    };
    assert!(matches!(
        sample(unbounded, Resolution::default()),
        Err(CoreError::InvalidRegion { .. })
    ));

    let empty = Resolution {
        width: 4,
        height: 0,
    };
    assert!(matches!(
        sample(Region::default(), empty),
        Err(CoreError::InvalidResolution { width: 4, height: 0 })
    ));
}
