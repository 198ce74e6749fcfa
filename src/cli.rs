use std::path::PathBuf;

use clap::Parser;

/// Default location of the session file.
pub const DEFAULT_CONFIG: &str = "config/config.json";

/// Predict the angle a guitar hangs at from marker positions and strap length.
#[derive(Parser, Debug)]
#[command(name = "strapx", version, about)]
pub struct Args {
    /// JSON session file holding marker positions, length ratio and strap length.
    #[arg(default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
    /// Override the strap length stored in the session file.
    #[arg(long, allow_negative_numbers = true)]
    pub strap_length: Option<f64>,
    /// Override the length units per pixel stored in the session file.
    #[arg(long, allow_negative_numbers = true)]
    pub ratio: Option<f64>,
    /// Print the solution as JSON.
    #[arg(long)]
    pub json: bool,
    /// Read commands from stdin: h solves, s and d edit lengths, w saves.
    #[arg(long, short)]
    pub interactive: bool,
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
