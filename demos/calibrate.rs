use strapx::{point, Calibration, Input, Landmarks, Response, Session};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let landmarks = Landmarks::new(point(120.0, 610.0), point(260.0, 520.0), point(420.0, 330.0));
    let mut session = Session::new(landmarks, Calibration::new(1.0, 1200.0));

    // The buttons are 41 cm apart on the real instrument
    session.type_text("d41");
    if let Response::Calibrated { distance_ratio, .. } = session.handle(Input::Return) {
        println!("{distance_ratio:.4} cm per pixel");
    }

    // A 120 cm strap
    session.type_text("s120");
    session.handle(Input::Return);

    let solution = session.solve()?;
    println!(
        "hangs at {:.2} degrees clockwise",
        solution.rotation.to_degrees()
    );

    Ok(())
}
