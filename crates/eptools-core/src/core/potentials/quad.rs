#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    Finite(f64),
    Infinite,
}

impl Endpoint {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Endpoint::Infinite)
    }

    pub fn finite(&self) -> Option<f64> {
        match *self {
            Endpoint::Finite(x) => Some(x),
            Endpoint::Infinite => None,
        }
    }
}

/// Support `(lower, upper)` of a potential together with its ordered waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub lower: Endpoint,
    pub upper: Endpoint,
    pub way_points: Vec<f64>,
}

/// Energy `-log t(s)` at a point, with the derivatives the potential provides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    pub first: Option<f64>,
    pub second: Option<f64>,
}

/// Quadrature and proximal view of a potential.
///
/// Quadrature code integrates `exp(-eta * value)` against a Gaussian and must split the
/// integration range at every waypoint, since the energy is not differentiable there.
pub trait QuadPotential {
    fn has_first_derivatives(&self) -> bool;

    fn has_second_derivatives(&self) -> bool;

    fn has_way_points(&self) -> bool;

    /// Returns the support endpoints and writes the waypoints into `way_points`, which is
    /// resized to exactly the number of waypoints. Earlier contents are discarded.
    fn support(&self, way_points: &mut Vec<f64>) -> (Endpoint, Endpoint);

    fn eval(&self, s: f64) -> Evaluation;

    /// `argmin_s [ -log t(s) + (s - h)^2 / (2 rho) ]`, or `None` if an iterative solver
    /// did not converge.
    fn proximal(&self, h: f64, rho: f64) -> Option<f64>;

    fn interval(&self) -> Interval {
        let mut way_points = Vec::new();
        let (lower, upper) = self.support(&mut way_points);
        Interval {
            lower,
            upper,
            way_points,
        }
    }
}
