use tracing::{debug, instrument};

use super::config::ValidationConfig;
use super::error::ValidationError;
use crate::core::numeric::gaussian::log_normal_pdf;
use crate::core::potentials::moments::{MomentComputable, Moments, check_moment_args};
use crate::core::potentials::quad::QuadPotential;

/// Outcome of comparing closed-form moments against quadrature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentCheck {
    pub closed_form: Moments,
    pub quadrature: Moments,
    pub mean_error: f64,
    pub variance_error: f64,
    pub log_z_error: f64,
    pub passed: bool,
}

impl MomentCheck {
    pub fn max_error(&self) -> f64 {
        self.mean_error
            .max(self.variance_error)
            .max(self.log_z_error)
    }
}

#[derive(Default)]
struct Accumulator {
    mass: f64,
    first: f64,
    second: f64,
}

/// Composite Simpson over `[lo, hi]` with an even number of panels of width at most `h_max`.
/// `f` returns the density at `s`; moments are taken about `center`.
fn simpson_segment<F>(lo: f64, hi: f64, h_max: f64, center: f64, f: &F, acc: &mut Accumulator)
where
    F: Fn(f64) -> f64,
{
    let panels = ((hi - lo) / h_max).ceil().max(2.0) as usize;
    let panels = panels + panels % 2;
    let h = (hi - lo) / panels as f64;

    for i in 0..=panels {
        let coef = if i == 0 || i == panels {
            1.0
        } else if i % 2 == 1 {
            4.0
        } else {
            2.0
        };
        let s = if i == panels { hi } else { lo + i as f64 * h };
        let w = coef * h / 3.0 * f(s);
        let d = s - center;
        acc.mass += w;
        acc.first += w * d;
        acc.second += w * d * d;
    }
}

/// Region that needs Simpson panels of width at most `h`.
struct Window {
    lo: f64,
    hi: f64,
    h: f64,
}

impl Window {
    fn around(center: f64, half_width: f64, h: f64) -> Self {
        Self {
            lo: center - half_width,
            hi: center + half_width,
            h,
        }
    }

    fn contains(&self, s: f64) -> bool {
        self.lo <= s && s <= self.hi
    }
}

// Relative offset at which the one-sided slopes next to a waypoint are read.
const KINK_OFFSET: f64 = 1e-9;

/// One-sided slopes `(left, right)` of the energy at a waypoint, if the potential has them.
fn kink_slopes<P>(pot: &P, w: f64) -> Option<(f64, f64)>
where
    P: QuadPotential + ?Sized,
{
    if !pot.has_first_derivatives() {
        return None;
    }
    let offset = KINK_OFFSET * (1.0 + w.abs());
    let left = pot.eval(w - offset).first?;
    let right = pot.eval(w + offset).first?;
    (left.is_finite() && right.is_finite()).then_some((left, right))
}

/// Moments of `exp(-eta * energy(s)) N(s; cmu, 1/crho)` by Simpson quadrature.
///
/// The range spans `tail_sigmas` cavity standard deviations beyond the cavity mean and
/// every waypoint, clipped to the support. Panels are `1 / steps_per_sigma` of the local
/// length scale: the cavity standard deviation in general, and next to a waypoint the
/// smaller of that and the decay length `1 / (eta * slope)` of the kink, doubling
/// outwards window by window.
#[instrument(level = "trace", skip(pot, config))]
pub fn quadrature_moments<P>(
    pot: &P,
    cmu: f64,
    crho: f64,
    eta: f64,
    config: &ValidationConfig,
) -> Result<Moments, ValidationError>
where
    P: QuadPotential + ?Sized,
{
    check_moment_args(crho, eta)?;
    config.validate()?;

    let var = crho.recip();
    let sd = var.sqrt();
    let tail = config.tail_sigmas;
    let steps = config.steps_per_sigma as f64;
    let interval = pot.interval();

    let first = interval.way_points.iter().copied().fold(cmu, f64::min);
    let last = interval.way_points.iter().copied().fold(cmu, f64::max);
    let mut lo = first - tail * sd;
    let mut hi = last + tail * sd;
    if let Some(a) = interval.lower.finite() {
        lo = lo.max(a);
    }
    if let Some(b) = interval.upper.finite() {
        hi = hi.min(b);
    }
    if !(lo < hi) {
        return Err(ValidationError::DegenerateMass(0.0));
    }

    let mut windows = vec![Window::around(cmu, tail * sd, sd / steps)];
    for &w in &interval.way_points {
        let mut scale = sd;
        if let Some((left, right)) = kink_slopes(pot, w) {
            let slope = left.abs().max(right.abs());
            if slope > 0.0 {
                scale = sd.min((eta * slope).recip());
            }
            // Each side of the kink tilts the cavity into a Gaussian centred here.
            for d in [left, right] {
                windows.push(Window::around(cmu - eta * d * var, tail * sd, sd / steps));
            }
        }
        // Graded from the decay length of the kink out to the cavity scale.
        loop {
            windows.push(Window::around(w, tail * scale, scale / steps));
            if scale >= sd {
                break;
            }
            scale = (2.0 * scale).min(sd);
        }
    }

    let mut breaks = vec![lo, hi];
    breaks.extend(interval.way_points.iter().copied());
    for window in &windows {
        breaks.push(window.lo);
        breaks.push(window.hi);
    }
    breaks.retain(|&b| lo <= b && b <= hi);
    breaks.sort_by(|a, b| a.total_cmp(b));
    breaks.dedup();

    let log_norm = sd.ln();
    let density = |s: f64| {
        (-eta * pot.eval(s).value + log_normal_pdf((s - cmu) / sd) - log_norm).exp()
    };

    let integrate = |center: f64| {
        let mut acc = Accumulator::default();
        for pair in breaks.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let mid = 0.5 * (a + b);
            // Outside every window the mass is negligible; bound the panel count there.
            let coarse = (sd / steps).max((b - a) / (2.0 * tail * steps));
            let h_max = windows
                .iter()
                .filter(|window| window.contains(mid))
                .map(|window| window.h)
                .fold(coarse, f64::min);
            simpson_segment(a, b, h_max, center, &density, &mut acc);
        }
        acc
    };

    let rough = integrate(cmu);
    if !(rough.mass > 0.0 && rough.mass.is_finite()) {
        return Err(ValidationError::DegenerateMass(rough.mass));
    }
    // Second pass about the mean, so the variance does not cancel against a large shift.
    let mean = cmu + rough.first / rough.mass;
    let centered = integrate(mean);
    let shift = centered.first / centered.mass;
    Ok(Moments {
        mean: mean + shift,
        variance: centered.second / centered.mass - shift * shift,
        log_z: rough.mass.ln(),
    })
}

/// Compares [`MomentComputable::comp_moments_fractional`] with [`quadrature_moments`].
#[instrument(level = "trace", skip(pot, config))]
pub fn check_moments<P>(
    pot: &P,
    cmu: f64,
    crho: f64,
    eta: f64,
    config: &ValidationConfig,
) -> Result<MomentCheck, ValidationError>
where
    P: MomentComputable + QuadPotential + ?Sized,
{
    let closed_form = pot
        .comp_moments_fractional(cmu, crho, eta)?
        .ok_or(ValidationError::MomentFailure { cmu, crho, eta })?;
    let quadrature = quadrature_moments(pot, cmu, crho, eta, config)?;

    let mean_error = (closed_form.mean - quadrature.mean).abs();
    let variance_error = (closed_form.variance - quadrature.variance).abs();
    let log_z_error = (closed_form.log_z - quadrature.log_z).abs();
    let passed = mean_error.max(variance_error).max(log_z_error) <= config.tolerance;

    debug!(
        "Moment check (cmu = {}, crho = {}, eta = {}): mean err {:.3e}, var err {:.3e}, logz err {:.3e}, passed = {}",
        cmu, crho, eta, mean_error, variance_error, log_z_error, passed
    );

    Ok(MomentCheck {
        closed_form,
        quadrature,
        mean_error,
        variance_error,
        log_z_error,
        passed,
    })
}

/// Checks that `proximal(h, rho)` satisfies `(h - s*) / rho ∈ ∂energy(s*)`.
///
/// Away from waypoints the subdifferential is the first derivative. On a waypoint it is
/// the interval between the one-sided derivatives.
#[instrument(level = "trace", skip(pot, config))]
pub fn check_proximal<P>(
    pot: &P,
    h: f64,
    rho: f64,
    config: &ValidationConfig,
) -> Result<bool, ValidationError>
where
    P: QuadPotential + ?Sized,
{
    if !(rho > 0.0 && rho.is_finite()) {
        return Err(ValidationError::InvalidArgument(format!(
            "rho must be positive and finite, got {rho}"
        )));
    }
    if !pot.has_first_derivatives() {
        return Err(ValidationError::Unsupported("first derivatives"));
    }
    let derivative = |s: f64| {
        pot.eval(s)
            .first
            .ok_or(ValidationError::Unsupported("first derivatives"))
    };

    let s_star = pot
        .proximal(h, rho)
        .ok_or(ValidationError::ProximalFailure { h, rho })?;
    let target = (h - s_star) / rho;
    let tol = config.tolerance;

    let kink = pot
        .interval()
        .way_points
        .into_iter()
        .find(|w| (s_star - w).abs() <= tol * (1.0 + w.abs()));

    let passed = match kink {
        Some(w) => {
            let delta = tol * (1.0 + w.abs());
            let left = derivative(w - delta)?;
            let right = derivative(w + delta)?;
            let slack = tol * (1.0 + target.abs());
            left - slack <= target && target <= right + slack
        }
        None => {
            let d = derivative(s_star)?;
            (d - target).abs() <= tol * (1.0 + target.abs())
        }
    };

    debug!(
        "Proximal check (h = {}, rho = {}): s* = {}, on waypoint = {}, passed = {}",
        h,
        rho,
        s_star,
        kink.is_some(),
        passed
    );
    Ok(passed)
}
