//! Error types produced while solving for a hanging equilibrium.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned by the equilibrium solver.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SolveError {
    /// Returned when the quartic has no acceptable real root, meaning no stable
    /// hanging configuration exists for the supplied geometry.
    #[error("no stable hanging configuration exists for this geometry")]
    Infeasible,
    /// Returned when real roots exist but none reproduces the vertical balance
    /// equation within tolerance.
    #[error("best candidate residual {residual:e} exceeds tolerance {tolerance:e}")]
    InternalInconsistency {
        /// Smallest residual found among the candidates.
        residual: f64,
        /// Acceptance threshold, proportional to the strap length.
        tolerance: f64,
    },
}

/// Error returned when physical parameters are outside the solver's domain.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ParameterError {
    /// Returned when a centre-of-mass to button distance is not strictly positive.
    #[error("button distance must be positive (received {0})")]
    NonPositiveDistance(f64),
    /// Returned when the angle at the centre of mass is not inside `(0, pi)`.
    #[error("angle at the centre of mass must lie strictly between 0 and pi (received {0})")]
    AngleOutOfRange(f64),
}

/// Error returned when turning landmarks into a hanging angle.
///
/// Each failure kind is kept distinct so callers can give actionable feedback.
///
/// # Examples
///
/// ```
/// use strapx::{hang, point, Calibration, HangError, Landmarks};
///
/// let landmarks = Landmarks::new(point(0.0, 0.0), point(100.0, 100.0), point(200.0, 0.0));
/// let error = hang(&landmarks, Calibration::new(1.0, 150.0)).expect_err("strap too short");
/// assert!(matches!(error, HangError::PreconditionViolation { .. }));
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum HangError {
    /// Returned when the strap is shorter than the distance between the buttons.
    #[error(
        "the strap length of {strap_length:.4} is shorter than the distance between the buttons of {button_span:.4}"
    )]
    PreconditionViolation {
        /// Strap length in calibrated units.
        strap_length: f64,
        /// Button-to-button distance in calibrated units.
        button_span: f64,
    },
    /// Returned when the landmarks coincide or the centre of mass sits on the
    /// line through both buttons.
    #[error("landmarks are degenerate: {0}")]
    DegenerateGeometry(ParameterError),
    /// See [`SolveError::Infeasible`].
    #[error("no stable hanging configuration exists for this geometry")]
    Infeasible,
    /// See [`SolveError::InternalInconsistency`].
    #[error("solver residual {residual:e} exceeds tolerance {tolerance:e}")]
    InternalInconsistency {
        /// Smallest residual found among the candidates.
        residual: f64,
        /// Acceptance threshold, proportional to the strap length.
        tolerance: f64,
    },
}

impl From<SolveError> for HangError {
    fn from(value: SolveError) -> Self {
        match value {
            SolveError::Infeasible => Self::Infeasible,
            SolveError::InternalInconsistency {
                residual,
                tolerance,
            } => Self::InternalInconsistency {
                residual,
                tolerance,
            },
        }
    }
}

/// Error returned when a typed calibration value is rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CalibrationError {
    /// Returned when the text buffer does not parse as a number.
    #[error("{0:?} can't be converted to a number")]
    NotANumber(String),
    /// Returned when the value parses but is zero, negative or not finite.
    #[error("value must be a positive, finite number (received {0})")]
    NonPositive(f64),
    /// Returned when the buttons coincide so no length ratio can be derived.
    #[error("the strap buttons coincide; move them apart before calibrating")]
    ZeroButtonSpan,
}

/// Error returned when reading or writing a session file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the file cannot be read or written.
    #[error("could not access {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the file contents are not a valid session description.
    #[error("could not parse {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// Returned when the session cannot be encoded for writing.
    #[error("could not write {path}: {source}")]
    Serialize {
        /// File being written.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// Returned when a field holds a value the solver cannot use.
    #[error("field {field} is invalid: {reason}")]
    Invalid {
        /// Name of the offending JSON key.
        field: &'static str,
        /// Human readable explanation.
        reason: String,
    },
}
