//! Interactive session state for a marker-placement front end.
//!
//! The session owns the landmarks, the calibration and the text-entry mode.
//! Every input returns a [`Response`] describing what changed; rendering and
//! file access stay with the caller.

use tracing::{debug, info};

use crate::adapter::{hang, Calibration, HangSolution};
use crate::config::SessionConfig;
use crate::errors::{CalibrationError, HangError};
use crate::geometry::{Landmark, Landmarks, Point};

/// Key that triggers a solve.
pub const SOLVE_KEY: char = 'h';
/// Key that toggles strap length entry.
pub const STRAP_LENGTH_KEY: char = 's';
/// Key that toggles button distance calibration.
pub const BUTTON_DISTANCE_KEY: char = 'd';
/// Key that requests the session be written back to its file.
pub const WRITE_KEY: char = 'w';

/// Text-entry mode of the session. Each entry mode owns its own buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Waiting for a command key.
    #[default]
    Idle,
    /// Typing a new strap length.
    EnteringStrapLength {
        /// Characters typed so far.
        buffer: String,
    },
    /// Typing the real distance between the buttons.
    EnteringButtonDistance {
        /// Characters typed so far.
        buffer: String,
    },
}

/// Keyboard input delivered to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Printable text, usually a single character.
    Text(String),
    /// Remove the last typed character.
    Backspace,
    /// Commit the current buffer.
    Return,
}

/// Outcome of a single input.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    /// Nothing changed.
    Ignored,
    /// The buffer of the active entry mode changed.
    Editing(String),
    /// Strap length entry began.
    EnteredStrapLength,
    /// Button distance entry began.
    EnteredButtonDistance,
    /// Strap length entry was abandoned; the length is unchanged.
    StrapLengthAborted {
        /// Length kept.
        strap_length: f64,
    },
    /// Button distance entry was abandoned; the calibration is unchanged.
    ButtonDistanceAborted,
    /// A new strap length was accepted.
    StrapLengthSet(f64),
    /// Lengths were recalibrated against the typed button distance.
    Calibrated {
        /// Distance between the buttons as typed.
        button_distance: f64,
        /// New calibrated units per pixel.
        distance_ratio: f64,
        /// Strap length converted into the new units.
        strap_length: f64,
    },
    /// Typed text was rejected; the mode and value are unchanged.
    Rejected(CalibrationError),
    /// A solve ran.
    Solved(Result<HangSolution, HangError>),
    /// The caller should persist the session.
    SaveRequested,
}

/// Landmarks, calibration and entry mode of one interactive session.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    /// Marker positions in pixels.
    landmarks: Landmarks,
    /// Length units per pixel and strap length.
    calibration: Calibration,
    /// Active text-entry mode.
    mode: Mode,
}

impl Session {
    /// Start an idle session.
    #[must_use]
    pub fn new(landmarks: Landmarks, calibration: Calibration) -> Self {
        Self {
            landmarks,
            calibration,
            mode: Mode::Idle,
        }
    }

    /// Start an idle session from the initial values of a session file.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.landmarks(), config.calibration())
    }

    /// Copy the current landmarks and calibration into a session file.
    pub fn write_config(&self, config: &mut SessionConfig) {
        config.update(&self.landmarks, self.calibration);
    }

    /// Current landmarks.
    #[must_use]
    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    /// Current calibration.
    #[must_use]
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Current entry mode.
    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Find the landmark whose square marker contains `position`.
    ///
    /// Where markers overlap, the one drawn last in [`Landmark::ALL`] order wins.
    #[must_use]
    pub fn landmark_at(&self, position: Point, marker_size: f64) -> Option<Landmark> {
        let half = marker_size / 2.0;
        Landmark::ALL.into_iter().rev().find(|&landmark| {
            let centre = self.landmarks.get(landmark);
            (position.x - centre.x).abs() <= half && (position.y - centre.y).abs() <= half
        })
    }

    /// Drag a landmark by a pixel offset.
    pub fn move_landmark(&mut self, landmark: Landmark, dx: f64, dy: f64) {
        let target = self.landmarks.get_mut(landmark);
        *target = target.translated(dx, dy);
    }

    /// Run the solver on the current state.
    ///
    /// # Errors
    ///
    /// Propagates every [`HangError`] from [`hang`].
    pub fn solve(&self) -> Result<HangSolution, HangError> {
        hang(&self.landmarks, self.calibration)
    }

    /// Feed one keyboard input through the state machine.
    pub fn handle(&mut self, input: Input) -> Response {
        match input {
            Input::Text(text) => self.handle_text(&text),
            Input::Backspace => match self.buffer_mut() {
                Some(buffer) => {
                    buffer.pop();
                    Response::Editing(buffer.clone())
                }
                None => Response::Ignored,
            },
            Input::Return => self.commit(),
        }
    }

    /// Feed a string one character at a time, returning every response.
    pub fn type_text(&mut self, text: &str) -> Vec<Response> {
        text.chars()
            .map(|character| self.handle(Input::Text(character.to_string())))
            .collect()
    }

    /// Buffer of the active entry mode.
    fn buffer_mut(&mut self) -> Option<&mut String> {
        match &mut self.mode {
            Mode::Idle => None,
            Mode::EnteringStrapLength { buffer } | Mode::EnteringButtonDistance { buffer } => {
                Some(buffer)
            }
        }
    }

    /// Route text to the active buffer, an abort, or an idle command.
    fn handle_text(&mut self, text: &str) -> Response {
        let key = single_char(text);
        match self.mode {
            Mode::EnteringStrapLength { .. } if key == Some(STRAP_LENGTH_KEY) => {
                self.mode = Mode::Idle;
                Response::StrapLengthAborted {
                    strap_length: self.calibration.strap_length,
                }
            }
            Mode::EnteringButtonDistance { .. } if key == Some(BUTTON_DISTANCE_KEY) => {
                self.mode = Mode::Idle;
                Response::ButtonDistanceAborted
            }
            Mode::EnteringStrapLength { ref mut buffer }
            | Mode::EnteringButtonDistance { ref mut buffer } => {
                buffer.push_str(text);
                Response::Editing(buffer.clone())
            }
            Mode::Idle => self.handle_command(key),
        }
    }

    /// Act on a command key pressed while idle.
    fn handle_command(&mut self, key: Option<char>) -> Response {
        match key {
            Some(SOLVE_KEY) => {
                let result = self.solve();
                match &result {
                    Ok(solution) => info!(rotation = solution.rotation, "solved hanging angle"),
                    Err(error) => info!(%error, "solve did not produce an angle"),
                }
                Response::Solved(result)
            }
            Some(STRAP_LENGTH_KEY) => {
                self.mode = Mode::EnteringStrapLength {
                    buffer: String::new(),
                };
                Response::EnteredStrapLength
            }
            Some(BUTTON_DISTANCE_KEY) => {
                self.mode = Mode::EnteringButtonDistance {
                    buffer: String::new(),
                };
                Response::EnteredButtonDistance
            }
            Some(WRITE_KEY) => Response::SaveRequested,
            _ => Response::Ignored,
        }
    }

    /// Apply the active buffer, staying in the mode with a fresh buffer on failure.
    fn commit(&mut self) -> Response {
        let mode = std::mem::take(&mut self.mode);
        let (result, retry) = match mode {
            Mode::Idle => return Response::Ignored,
            Mode::EnteringStrapLength { buffer } => (
                self.set_strap_length(&buffer),
                Mode::EnteringStrapLength {
                    buffer: String::new(),
                },
            ),
            Mode::EnteringButtonDistance { buffer } => (
                self.calibrate(&buffer),
                Mode::EnteringButtonDistance {
                    buffer: String::new(),
                },
            ),
        };
        match result {
            Ok(response) => response,
            Err(error) => {
                debug!(%error, "rejected typed value");
                self.mode = retry;
                Response::Rejected(error)
            }
        }
    }

    /// Accept a typed strap length.
    fn set_strap_length(&mut self, text: &str) -> Result<Response, CalibrationError> {
        let strap_length = parse_positive(text)?;
        self.calibration.strap_length = strap_length;
        Ok(Response::StrapLengthSet(strap_length))
    }

    /// Redefine length units so the buttons are `text` apart, keeping the
    /// strap's pixel-equivalent length unchanged.
    fn calibrate(&mut self, text: &str) -> Result<Response, CalibrationError> {
        let button_distance = parse_positive(text)?;
        let pixel_span = self.landmarks.button_span();
        if pixel_span == 0.0 {
            return Err(CalibrationError::ZeroButtonSpan);
        }
        let strap_pixels = self.calibration.strap_length / self.calibration.distance_ratio;
        let distance_ratio = button_distance / pixel_span;
        let strap_length = strap_pixels * distance_ratio;
        self.calibration = Calibration::new(distance_ratio, strap_length);
        Ok(Response::Calibrated {
            button_distance,
            distance_ratio,
            strap_length,
        })
    }
}

/// The only character in `text`, if it is exactly one character long.
fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(character), None) => Some(character),
        _ => None,
    }
}

/// Parse a strictly positive, finite number.
fn parse_positive(text: &str) -> Result<f64, CalibrationError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| CalibrationError::NotANumber(text.to_string()))?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(CalibrationError::NonPositive(value))
    }
}
