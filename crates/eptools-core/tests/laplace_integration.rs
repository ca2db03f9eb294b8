use eptools::core::potentials::laplace::LaplacePotential;
use eptools::core::potentials::moments::MomentComputable;
use eptools::core::potentials::params::{ParamError, ParameterizedPotential};
use eptools::core::potentials::quad::{Endpoint, QuadPotential};
use eptools::validation::config::{ValidationConfig, ValidationConfigBuilder};
use eptools::validation::quadrature::{check_moments, check_proximal};

fn calibrate(pot: &mut dyn ParameterizedPotential, candidate: &[f64]) -> Result<(), ParamError> {
    if pot.is_valid_pars(candidate) {
        pot.set_pars(candidate)
    } else {
        Err(ParamError::InvalidTau(candidate[1]))
    }
}

#[test]
fn closed_form_moments_agree_with_quadrature_over_parameter_grid() {
    let config = ValidationConfig::default();
    for &(y, tau) in &[(0.0, 1.0), (1.5, 0.3), (-2.0, 4.0)] {
        let pot = LaplacePotential::new(y, tau).unwrap();
        for &(cmu, crho) in &[(0.0, 1.0), (2.0, 0.5), (-1.0, 8.0), (y, 2.0)] {
            for &eta in &[1.0, 0.5, 0.1] {
                let report = check_moments(&pot, cmu, crho, eta, &config).unwrap();
                assert!(
                    report.passed,
                    "y={y}, tau={tau}, cmu={cmu}, crho={crho}, eta={eta}: max error {}",
                    report.max_error()
                );
            }
        }
    }
}

#[test]
fn closed_form_moments_agree_with_quadrature_in_extreme_regimes() {
    let config = ValidationConfig::default();
    // Flat cavities, sharp potentials, and cavities far from the kink.
    let cases = [
        (0.0, 1.0, 0.0, 1e-4, 1.0),
        (0.0, 1.0, 3.0, 1e-8, 0.5),
        (0.0, 20.0, 0.0, 1.0, 1.0),
        (0.0, 20.0, 20.0, 1.0, 1.0),
        (0.0, 100.0, 50.0, 1.0, 1.0),
        (2.0, 50.0, -6.0, 0.25, 0.1),
    ];
    for (y, tau, cmu, crho, eta) in cases {
        let pot = LaplacePotential::new(y, tau).unwrap();
        let report = check_moments(&pot, cmu, crho, eta, &config).unwrap();
        assert!(
            report.passed,
            "y={y}, tau={tau}, cmu={cmu}, crho={crho}, eta={eta}: max error {}",
            report.max_error()
        );
    }
}

#[test]
fn proximal_map_is_optimal_across_branches() {
    let config = ValidationConfigBuilder::new().tolerance(1e-9).build().unwrap();
    let pot = LaplacePotential::new(0.25, 1.5).unwrap();
    for &h in &[-10.0, -1.0, 0.0, 0.25, 0.5, 1.0, 10.0] {
        for &rho in &[0.1, 1.0, 3.0] {
            assert!(
                check_proximal(&pot, h, rho, &config).unwrap(),
                "h={h}, rho={rho}"
            );
        }
    }
}

#[test]
fn invalid_moment_arguments_are_parameter_errors_not_numerical_failures() {
    let pot = LaplacePotential::default();
    assert!(matches!(
        pot.comp_moments(0.0, 1e-15),
        Err(ParamError::InvalidCavityPrecision(_))
    ));
    assert!(matches!(
        pot.comp_moments_fractional(0.0, 1.0, 0.0),
        Err(ParamError::InvalidEta(_))
    ));
}

#[test]
fn calibration_harness_works_through_trait_object() {
    let mut pot = LaplacePotential::default();
    calibrate(&mut pot, &[3.0, 0.5]).unwrap();
    assert!(calibrate(&mut pot, &[7.0, -1.0]).is_err());

    let mut buf = vec![0.0; pot.num_pars()];
    pot.get_pars(&mut buf).unwrap();
    assert_eq!(buf, vec![3.0, 0.5]);
}

#[test]
fn read_only_evaluation_is_consistent_across_threads() {
    let pot = LaplacePotential::new(0.5, 2.0).unwrap();
    let reference = pot.comp_moments_fractional(1.0, 2.0, 0.7).unwrap().unwrap();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let pot = &pot;
            scope.spawn(move || {
                let mut way_points = Vec::new();
                for i in 0..100 {
                    let m = pot.comp_moments_fractional(1.0, 2.0, 0.7).unwrap().unwrap();
                    assert_eq!(m, reference);

                    let (lower, upper) = pot.support(&mut way_points);
                    assert_eq!((lower, upper), (Endpoint::Infinite, Endpoint::Infinite));
                    assert_eq!(way_points, vec![0.5]);

                    let s = worker as f64 + i as f64 * 0.01;
                    assert_eq!(pot.eval(s).value, 2.0 * (s - 0.5).abs() - 1.0_f64.ln());
                }
            });
        }
    });
}
