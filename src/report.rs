use std::fmt::Write;

use serde_json::{json, Value};
use strapx::{HangError, HangSolution, Response};
use uom::si::angle::{degree, radian};
use uom::si::f64::Angle;

/// Convert radians to degrees.
fn degrees(value: f64) -> f64 {
    Angle::new::<radian>(value).get::<degree>()
}

/// Render a textual summary of a solved hang.
#[must_use]
pub fn render_solution(solution: &HangSolution) -> String {
    let mut output = String::new();
    let params = &solution.framing.params;
    let equilibrium = &solution.equilibrium;

    writeln!(
        &mut output,
        "Equilibrium angle is {:.2} degrees clockwise vs. the horizontal.",
        degrees(solution.rotation)
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Geometry: g1 = {:.4}, g2 = {:.4}, angle at centre of mass = {:.2} degrees",
        params.g1,
        params.g2,
        degrees(params.theta_com)
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Strap: {:.4} to the primary button, {:.4} to the secondary button, {:.2} degrees above horizontal at each button",
        equilibrium.left_strap_seg_len,
        equilibrium.right_strap_seg_len(solution.strap_length),
        degrees(equilibrium.strap_angle)
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Strap bends through {:.2} degrees at the shoulder.",
        degrees(equilibrium.shoulder_kink_angle())
    )
    .expect("writing to string cannot fail");

    output
}

/// Render a failed solve for the user.
#[must_use]
pub fn render_failure(error: &HangError) -> String {
    match error {
        HangError::PreconditionViolation {
            strap_length,
            button_span,
        } => format!(
            "The strap length of {strap_length:.4} is shorter than the distance between the buttons of {button_span:.4}. Move the buttons and/or increase the strap length and try again.\n"
        ),
        HangError::DegenerateGeometry(reason) => {
            format!("The markers do not describe a usable geometry ({reason}). Move them apart and try again.\n")
        }
        HangError::Infeasible => "Unstable design. Not recommended.\n".to_string(),
        HangError::InternalInconsistency { .. } => format!("Solver failure: {error}\n"),
    }
}

/// Render a solve result as JSON.
#[must_use]
pub fn to_json(result: &Result<HangSolution, HangError>) -> Value {
    match result {
        Ok(solution) => json!({
            "rotation": solution.rotation,
            "rotation_degrees": degrees(solution.rotation),
            "solution": solution,
        }),
        Err(error) => json!({
            "error": error_kind(error),
            "message": error.to_string(),
        }),
    }
}

/// Stable identifier for each failure kind.
fn error_kind(error: &HangError) -> &'static str {
    match error {
        HangError::PreconditionViolation { .. } => "precondition_violation",
        HangError::DegenerateGeometry(_) => "degenerate_geometry",
        HangError::Infeasible => "infeasible",
        HangError::InternalInconsistency { .. } => "internal_inconsistency",
    }
}

/// Render feedback for one interactive input.
#[must_use]
pub fn render_response(response: &Response) -> String {
    match response {
        Response::Ignored | Response::Editing(_) => String::new(),
        Response::EnteredStrapLength => {
            "Enter the strap length in current length units, then Return. Enter 's' again to abort.\n"
                .to_string()
        }
        Response::EnteredButtonDistance => {
            "Enter the real distance between the strap buttons, then Return. Enter 'd' again to abort.\n"
                .to_string()
        }
        Response::StrapLengthAborted { strap_length } => {
            format!("Strap length entry aborted. The strap length remains {strap_length:.4}.\n")
        }
        Response::ButtonDistanceAborted => {
            "Button distance entry aborted. Calibration is unchanged.\n".to_string()
        }
        Response::StrapLengthSet(strap_length) => {
            format!("Strap length is now {strap_length:.4}.\n")
        }
        Response::Calibrated {
            button_distance,
            distance_ratio,
            strap_length,
        } => format!(
            "Buttons are {button_distance} apart; {distance_ratio:.4} units per pixel. Strap length converted to {strap_length:.4}.\n"
        ),
        Response::Rejected(error) => format!("{error}. Try entering another value.\n"),
        Response::Solved(Ok(solution)) => render_solution(solution),
        Response::Solved(Err(error)) => render_failure(error),
        Response::SaveRequested => String::new(),
    }
}
