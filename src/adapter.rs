//! Conversion between landmark pixels and the solver's physical frame.

use nalgebra::Vector2;
use serde::Serialize;
use tracing::debug;

use crate::errors::HangError;
use crate::geometry::{signed_angle, Landmarks};
use crate::solver::{Equilibrium, PhysicalParams};

/// Length calibration shared by every solve request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Calibration {
    /// Calibrated length units per pixel.
    pub distance_ratio: f64,
    /// Total strap length in calibrated units.
    pub strap_length: f64,
}

impl Calibration {
    /// Create a calibration from a units-per-pixel ratio and a strap length.
    #[must_use]
    pub const fn new(distance_ratio: f64, strap_length: f64) -> Self {
        Self {
            distance_ratio,
            strap_length,
        }
    }
}

/// Physical parameters derived from landmarks, with the rotation that carries
/// the solver's reference frame back onto the image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Framing {
    /// Parameters in calibrated units.
    pub params: PhysicalParams,
    /// Signed angle from the leftward horizontal to the primary button
    /// direction in the y-up frame, counter-clockwise positive, in radians.
    pub pre_rotation: f64,
    /// Whether the image's secondary button plays the solver's primary role.
    pub swapped: bool,
}

/// Result of a successful hang computation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HangSolution {
    /// Framing that produced the solver inputs.
    pub framing: Framing,
    /// Solver output in its own frame.
    pub equilibrium: Equilibrium,
    /// Strap length used for the solve.
    pub strap_length: f64,
    /// Rotation of the instrument against the horizontal as drawn on the image,
    /// clockwise positive, in radians.
    pub rotation: f64,
}

/// Derive the solver's parameters from landmark positions.
///
/// The primary role goes to whichever button keeps the angle at the centre of
/// mass non-negative when measured from the other button, so the solver always
/// sees the clockwise-positive labelling its derivation assumes.
///
/// # Errors
///
/// Returns [`HangError::DegenerateGeometry`] when a button coincides with the
/// centre of mass or all three landmarks are collinear.
pub fn frame(landmarks: &Landmarks, distance_ratio: f64) -> Result<Framing, HangError> {
    let v1 = landmarks.button_a.relative_to(landmarks.center_of_mass);
    let v2 = landmarks.button_b.relative_to(landmarks.center_of_mass);
    let reference = Vector2::new(-1.0, 0.0);

    let between = signed_angle(&v2, &v1);
    let (primary, secondary, theta_com, swapped) = if between >= 0.0 {
        (v1, v2, between, false)
    } else {
        (v2, v1, -between, true)
    };
    let pre_rotation = signed_angle(&reference, &primary);

    let params = PhysicalParams::new(
        primary.norm() * distance_ratio,
        secondary.norm() * distance_ratio,
        theta_com,
    )
    .map_err(HangError::DegenerateGeometry)?;
    debug!(?params, pre_rotation, swapped, "framed landmarks");

    Ok(Framing {
        params,
        pre_rotation,
        swapped,
    })
}

/// Compute how the instrument hangs for the given landmarks and calibration.
///
/// # Errors
///
/// Returns [`HangError::PreconditionViolation`] without solving when the strap
/// is shorter than the calibrated distance between the buttons,
/// [`HangError::DegenerateGeometry`] as described on [`frame`], and the
/// solver's [`HangError::Infeasible`] or [`HangError::InternalInconsistency`]
/// otherwise.
///
/// # Examples
/// ```
/// use strapx::{hang, point, Calibration, Landmarks};
///
/// // Buttons level and symmetric about the centre of mass.
/// let landmarks = Landmarks::new(point(100.0, 200.0), point(200.0, 300.0), point(300.0, 200.0));
/// let solution = hang(&landmarks, Calibration::new(1.0, 500.0)).expect("stable");
/// assert!(solution.rotation.abs() < 1.0e-9);
/// ```
pub fn hang(landmarks: &Landmarks, calibration: Calibration) -> Result<HangSolution, HangError> {
    let Calibration {
        distance_ratio,
        strap_length,
    } = calibration;

    let button_span = landmarks.button_span() * distance_ratio;
    if button_span > strap_length {
        return Err(HangError::PreconditionViolation {
            strap_length,
            button_span,
        });
    }

    let framing = frame(landmarks, distance_ratio)?;
    let equilibrium = framing.params.solve(strap_length)?;

    Ok(HangSolution {
        framing,
        equilibrium,
        strap_length,
        rotation: framing.pre_rotation + equilibrium.guitar_angle,
    })
}
