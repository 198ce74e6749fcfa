use std::error::Error;
use std::io::{BufRead, Write};
use std::path::Path;

use strapx::{HangError, Input, Mode, Response, Session, SessionConfig};
use tracing::debug;

use crate::report::render_response;

/// Drive a session from line-oriented input.
///
/// While idle each line is a command key. While entering a value the line is
/// typed into the buffer and committed, unless it is the mode's own key, which
/// aborts the entry.
pub fn run(
    session: &mut Session,
    config: &mut SessionConfig,
    path: &Path,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<(), Box<dyn Error>> {
    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let responses = match session.mode() {
            Mode::Idle => vec![session.handle(Input::Text(text.to_string()))],
            Mode::EnteringStrapLength { .. } | Mode::EnteringButtonDistance { .. } => {
                let typed = session.handle(Input::Text(text.to_string()));
                if matches!(
                    typed,
                    Response::StrapLengthAborted { .. } | Response::ButtonDistanceAborted
                ) {
                    vec![typed]
                } else {
                    vec![typed, session.handle(Input::Return)]
                }
            }
        };

        for response in responses {
            debug!(?response, "handled input");
            if let Response::Solved(Err(error @ HangError::InternalInconsistency { .. })) =
                &response
            {
                return Err(Box::new(*error));
            }
            if response == Response::SaveRequested {
                session.write_config(config);
                config.save(path)?;
                writeln!(
                    output,
                    "Marker locations, strap length and length units in {} have been overwritten with their current values.",
                    path.display()
                )?;
                continue;
            }
            write!(output, "{}", render_response(&response))?;
        }
    }
    Ok(())
}
