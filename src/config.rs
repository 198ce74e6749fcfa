//! Session files shared with the image-based front end.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::adapter::Calibration;
use crate::errors::ConfigError;
use crate::geometry::{Landmarks, Point};

/// Contents of a JSON session file.
///
/// Only the landmark, ratio and strap length keys matter to the solver. The
/// rendering keys are optional and passed through, and any other key is kept
/// verbatim so a save never drops settings owned by the front end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Longest image side in pixels after scaling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_dim: Option<u32>,
    /// Path of the guitar image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guitar_image_path: Option<String>,
    /// Marker fill colour name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_colour: Option<String>,
    /// Marker label font family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_font: Option<String>,
    /// Marker label colour name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_font_colour: Option<String>,
    /// Marker label size in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_font_size: Option<u32>,
    /// Marker side length in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_size: Option<f64>,
    /// Primary button position.
    #[serde(rename = "B1_init_pixel_coords")]
    pub button_a: Point,
    /// Centre of mass position.
    #[serde(rename = "COM_init_pixel_coords")]
    pub center_of_mass: Point,
    /// Secondary button position.
    #[serde(rename = "B2_init_pixel_coords")]
    pub button_b: Point,
    /// Calibrated length units per pixel.
    #[serde(rename = "init_real_to_pixel_dist_ratio")]
    pub distance_ratio: f64,
    /// Strap length in calibrated units.
    #[serde(rename = "init_strap_length")]
    pub strap_length: f64,
    /// Keys this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionConfig {
    /// Default marker side length when the file does not specify one.
    pub const DEFAULT_MARKER_SIZE: f64 = 20.0;

    /// Read and validate a session file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not a valid session and
    /// [`ConfigError::Invalid`] if the calibration values are unusable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the session as JSON indented by four spaces.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if the session cannot be encoded and
    /// [`ConfigError::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|source| ConfigError::Serialize {
                path: path.to_path_buf(),
                source,
            })?;
        fs::write(path, buffer).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that the calibration values can drive the solver.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first unusable field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("init_real_to_pixel_dist_ratio", self.distance_ratio)?;
        check_positive("init_strap_length", self.strap_length)?;
        if let Some(size) = self.marker_size {
            check_positive("marker_size", size)?;
        }
        Ok(())
    }

    /// Landmark positions stored in the session.
    #[must_use]
    pub fn landmarks(&self) -> Landmarks {
        Landmarks::new(self.button_a, self.center_of_mass, self.button_b)
    }

    /// Calibration stored in the session.
    #[must_use]
    pub fn calibration(&self) -> Calibration {
        Calibration::new(self.distance_ratio, self.strap_length)
    }

    /// Marker side length used for hit testing.
    #[must_use]
    pub fn marker_size(&self) -> f64 {
        self.marker_size.unwrap_or(Self::DEFAULT_MARKER_SIZE)
    }

    /// Overwrite the initial landmark and calibration values.
    pub fn update(&mut self, landmarks: &Landmarks, calibration: Calibration) {
        self.button_a = landmarks.button_a;
        self.center_of_mass = landmarks.center_of_mass;
        self.button_b = landmarks.button_b;
        self.distance_ratio = calibration.distance_ratio;
        self.strap_length = calibration.strap_length;
    }
}

/// Reject zero, negative and non-finite values.
fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a positive number, found {value}"),
        })
    }
}
