//! Static equilibrium of a rigid body hung from two strap buttons.
//!
//! The strap is modelled as two inextensible segments meeting at a frictionless
//! shoulder point. At equilibrium both segments make the same angle with the
//! horizontal and the centre of mass hangs directly beneath the shoulder.
//! Eliminating the angles from the horizontal closure conditions leaves a
//! quartic in the length `l` of the segment attached to the primary button.

use std::f64::consts::PI;

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::errors::{ParameterError, SolveError};
use crate::quartic::Quartic;

/// Residual tolerance per unit of strap length.
const RELATIVE_TOLERANCE: f64 = 1.0e-8;

/// Geometry of the centre of mass relative to the two strap buttons.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PhysicalParams {
    /// Distance from the centre of mass to the primary button.
    pub g1: f64,
    /// Distance from the centre of mass to the secondary button.
    pub g2: f64,
    /// Angle at the centre of mass between the two button directions, in radians.
    pub theta_com: f64,
}

impl PhysicalParams {
    /// Create parameters, rejecting values outside the solver's domain.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] when a distance is not strictly positive or
    /// `theta_com` is not strictly inside `(0, pi)`.
    ///
    /// # Examples
    /// ```
    /// use strapx::{ParameterError, PhysicalParams};
    ///
    /// assert!(PhysicalParams::new(100.0, 100.0, 1.0).is_ok());
    /// assert_eq!(
    ///     PhysicalParams::new(100.0, 100.0, 0.0),
    ///     Err(ParameterError::AngleOutOfRange(0.0))
    /// );
    /// ```
    pub fn new(g1: f64, g2: f64, theta_com: f64) -> Result<Self, ParameterError> {
        for distance in [g1, g2] {
            if !(distance > 0.0 && distance.is_finite()) {
                return Err(ParameterError::NonPositiveDistance(distance));
            }
        }
        if !(theta_com > 0.0 && theta_com < PI) {
            return Err(ParameterError::AngleOutOfRange(theta_com));
        }
        Ok(Self { g1, g2, theta_com })
    }

    /// Distance between the two buttons, by the law of cosines.
    #[must_use]
    pub fn button_span(&self) -> f64 {
        (self.g1.powi(2) + self.g2.powi(2) - 2.0 * self.g1 * self.g2 * self.theta_com.cos()).sqrt()
    }

    /// Shorthand `A = (g1 / g2) / sin(theta_com)`.
    fn a(&self) -> f64 {
        (self.g1 / self.g2) / self.theta_com.sin()
    }

    /// Shorthand `B = cot(theta_com)`.
    fn b(&self) -> f64 {
        1.0 / self.theta_com.tan()
    }

    /// Coefficients of the equilibrium quartic in the primary segment length.
    #[must_use]
    pub fn quartic(&self, strap_length: f64) -> Quartic {
        let a = self.a();
        let b = self.b();
        let l = strap_length;
        let g1 = self.g1;
        let g3 = self.button_span();

        let k = 1.0 + a * a - 2.0 * a * b + b * b;
        let m = 2.0 * a * b * l - 2.0 * l * a * a;
        let slack = g3 * g3 - l * l;

        Quartic::new([
            -4.0 * k,
            4.0 * l * k - 4.0 * m,
            slack * k + 4.0 * l * m - 4.0 * (a * a * l * l - g1 * g1),
            4.0 * a * a * l.powi(3) + slack * m - 4.0 * g1 * g1 * l,
            slack * a * a * l * l,
        ])
    }

    /// Back-substitute a primary segment length into the two equilibrium angles.
    ///
    /// Principal branches are used: the body angle lies in `[-pi/2, pi/2]` and
    /// the strap angle in `[0, pi]`. The strap angle is NaN when the length
    /// cannot reach the button horizontally.
    fn angles(&self, strap_length: f64, segment: f64) -> (f64, f64) {
        let theta_g = (self.a() * (strap_length / segment - 1.0) + self.b()).atan();
        let theta_s = (self.g1 * theta_g.cos() / segment).acos();
        (theta_g, theta_s)
    }

    /// Mismatch between the shoulder heights reached along either strap path.
    fn residual(&self, strap_length: f64, segment: f64, theta_g: f64, theta_s: f64) -> f64 {
        let left = self.g1 * theta_g.sin() + segment * theta_s.sin();
        let right = (strap_length - segment) * theta_s.sin()
            + self.g2 * (PI - self.theta_com - theta_g).sin();
        (left - right).abs()
    }

    /// Solve for the hanging equilibrium with a strap of the given length.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Infeasible`] when no physical root exists and
    /// [`SolveError::InternalInconsistency`] when roots exist but none satisfies
    /// the vertical balance within `1e-8 * strap_length`.
    pub fn solve(&self, strap_length: f64) -> Result<Equilibrium, SolveError> {
        let quartic = self.quartic(strap_length);
        debug!(params = ?self, strap_length, coefficients = ?quartic.coefficients, "solving equilibrium quartic");

        let candidates: Vec<Candidate> = quartic
            .rescaled(strap_length)
            .real_roots()
            .into_iter()
            .map(|t| t * strap_length)
            .filter(|&segment| segment > 0.0 && segment < strap_length)
            .filter_map(|segment| {
                let (theta_g, theta_s) = self.angles(strap_length, segment);
                let residual = self.residual(strap_length, segment, theta_g, theta_s);
                debug!(segment, theta_g, theta_s, residual, "scored candidate");
                residual.is_finite().then_some(Candidate {
                    segment,
                    theta_g,
                    theta_s,
                    residual,
                })
            })
            .collect();

        let Some(best) = candidates
            .into_iter()
            .min_by(|a, b| a.residual.total_cmp(&b.residual))
        else {
            warn!(params = ?self, strap_length, "no real root describes a hanging configuration");
            return Err(SolveError::Infeasible);
        };

        let tolerance = RELATIVE_TOLERANCE * strap_length;
        if best.residual >= tolerance {
            error!(
                params = ?self,
                strap_length,
                residual = best.residual,
                tolerance,
                "best equilibrium candidate fails the vertical balance check"
            );
            return Err(SolveError::InternalInconsistency {
                residual: best.residual,
                tolerance,
            });
        }

        Ok(Equilibrium {
            guitar_angle: best.theta_g,
            left_strap_seg_len: best.segment,
            strap_angle: best.theta_s,
        })
    }
}

/// A real root of the quartic with its back-substituted angles.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    /// Primary segment length.
    segment: f64,
    /// Body angle.
    theta_g: f64,
    /// Strap angle.
    theta_s: f64,
    /// Vertical balance mismatch.
    residual: f64,
}

/// The accepted hanging configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Equilibrium {
    /// Angle of the line from the centre of mass to the primary button against
    /// the horizontal, in radians.
    pub guitar_angle: f64,
    /// Length of the strap segment attached to the primary button.
    pub left_strap_seg_len: f64,
    /// Common angle both strap segments make with the horizontal, in radians.
    pub strap_angle: f64,
}

impl Equilibrium {
    /// Length of the strap segment attached to the secondary button.
    #[must_use]
    pub fn right_strap_seg_len(&self, strap_length: f64) -> f64 {
        strap_length - self.left_strap_seg_len
    }

    /// Angle enclosed by the strap where it bends over the shoulder.
    #[must_use]
    pub fn shoulder_kink_angle(&self) -> f64 {
        PI - 2.0 * self.strap_angle
    }
}

/// Solve the equilibrium for raw scalar inputs.
///
/// # Errors
///
/// Returns [`SolveError::Infeasible`] for parameters outside the solver's
/// domain as well as for geometries without a physical root, and
/// [`SolveError::InternalInconsistency`] as described on
/// [`PhysicalParams::solve`].
///
/// # Examples
/// ```
/// use strapx::solve;
///
/// let equilibrium = solve(100.0, 100.0, std::f64::consts::FRAC_PI_2, 300.0)
///     .expect("symmetric geometry hangs");
/// assert!((equilibrium.left_strap_seg_len - 150.0).abs() < 1.0e-9);
/// ```
pub fn solve(g1: f64, g2: f64, theta_com: f64, strap_length: f64) -> Result<Equilibrium, SolveError> {
    let params = PhysicalParams::new(g1, g2, theta_com).map_err(|reason| {
        warn!(%reason, "equilibrium requested for degenerate parameters");
        SolveError::Infeasible
    })?;
    if !(strap_length > 0.0 && strap_length.is_finite()) {
        warn!(strap_length, "equilibrium requested for a non-positive strap length");
        return Err(SolveError::Infeasible);
    }
    params.solve(strap_length)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn rejects_parameters_outside_domain() {
        assert_eq!(
            PhysicalParams::new(-1.0, 1.0, 1.0),
            Err(ParameterError::NonPositiveDistance(-1.0))
        );
        assert_eq!(
            PhysicalParams::new(1.0, 0.0, 1.0),
            Err(ParameterError::NonPositiveDistance(0.0))
        );
        assert_eq!(
            PhysicalParams::new(1.0, 1.0, PI),
            Err(ParameterError::AngleOutOfRange(PI))
        );
    }

    #[test]
    fn button_span_follows_law_of_cosines() {
        let params = PhysicalParams::new(100.0, 100.0, FRAC_PI_2).expect("valid");
        assert_relative_eq!(params.button_span(), 100.0 * 2.0_f64.sqrt(), epsilon = 1.0e-12);
    }

    #[test]
    fn leading_coefficient_is_always_negative() {
        for theta in [0.3, 1.0, 2.0, 3.0] {
            let params = PhysicalParams::new(120.0, 80.0, theta).expect("valid");
            assert!(params.quartic(400.0).coefficients[0] < 0.0);
        }
    }

    #[test]
    fn symmetric_geometry_hangs_level() {
        let params = PhysicalParams::new(100.0, 100.0, FRAC_PI_2).expect("valid");
        let equilibrium = params.solve(300.0).expect("stable");
        assert_relative_eq!(equilibrium.guitar_angle, FRAC_PI_4, epsilon = 1.0e-9);
        assert_relative_eq!(equilibrium.left_strap_seg_len, 150.0, epsilon = 1.0e-9);
        let expected_strap = (100.0 * FRAC_PI_4.cos() / 150.0).acos();
        assert_relative_eq!(equilibrium.strap_angle, expected_strap, epsilon = 1.0e-9);
        assert_relative_eq!(equilibrium.right_strap_seg_len(300.0), 150.0, epsilon = 1.0e-9);
    }

    #[test]
    fn accepted_root_satisfies_balance_equation() {
        let params = PhysicalParams::new(150.0, 110.0, 2.2).expect("valid");
        let strap_length = 420.0;
        let equilibrium = params.solve(strap_length).expect("stable");
        let residual = params.residual(
            strap_length,
            equilibrium.left_strap_seg_len,
            equilibrium.guitar_angle,
            equilibrium.strap_angle,
        );
        assert!(residual < RELATIVE_TOLERANCE * strap_length);
        // Centre of mass sits directly beneath the shoulder.
        assert_relative_eq!(
            equilibrium.left_strap_seg_len * equilibrium.strap_angle.cos(),
            params.g1 * equilibrium.guitar_angle.cos(),
            epsilon = 1.0e-8
        );
    }

    #[test]
    fn strap_shorter_than_span_is_infeasible() {
        let params = PhysicalParams::new(100.0, 100.0, FRAC_PI_2).expect("valid");
        assert_eq!(params.solve(100.0), Err(SolveError::Infeasible));
    }

    #[test]
    fn degenerate_scalars_are_infeasible() {
        assert_eq!(solve(0.0, 100.0, 1.0, 300.0), Err(SolveError::Infeasible));
        assert_eq!(solve(100.0, 100.0, 1.0, -3.0), Err(SolveError::Infeasible));
    }

    #[test]
    fn kink_angle_complements_strap_angles() {
        let equilibrium = Equilibrium {
            guitar_angle: 0.0,
            left_strap_seg_len: 1.0,
            strap_angle: 1.0,
        };
        assert_relative_eq!(equilibrium.shoulder_kink_angle(), PI - 2.0);
    }
}
