#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod adapter;
mod config;
mod errors;
mod geometry;
mod quartic;
pub mod session;
mod solver;

pub use adapter::{frame, hang, Calibration, Framing, HangSolution};
pub use config::SessionConfig;
pub use errors::{CalibrationError, ConfigError, HangError, ParameterError, SolveError};
pub use geometry::{point, signed_angle, Landmark, Landmarks, Point};
pub use quartic::Quartic;
pub use session::{Input, Mode, Response, Session};
pub use solver::{solve, Equilibrium, PhysicalParams};
