mod cli;
mod console;
mod report;

use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use strapx::{hang, HangError, Session, SessionConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Args;
use report::{render_failure, render_solution, to_json};

/// Exit status for a design that cannot hang. Clap reserves 2 for usage errors.
const EXIT_NO_EQUILIBRIUM: u8 = 3;

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let args = Args::parse();

    // Logs go to stderr so stdout only carries the report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), args.log_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Read the marker positions and length calibration, then apply any
    // command-line overrides before validating them together.
    let mut config = SessionConfig::load(&args.config)?;
    if let Some(strap_length) = args.strap_length {
        config.strap_length = strap_length;
    }
    if let Some(ratio) = args.ratio {
        config.distance_ratio = ratio;
    }
    config.validate()?;
    info!(config = %args.config.display(), "loaded session");

    if args.interactive {
        let mut session = Session::from_config(&config);
        console::run(
            &mut session,
            &mut config,
            &args.config,
            io::stdin().lock(),
            io::stdout().lock(),
        )?;
        return Ok(ExitCode::SUCCESS);
    }

    // A one-shot solve. Expected failures are reported and signalled through
    // the exit status; an inconsistent solver result aborts with an error.
    let result = hang(&config.landmarks(), config.calibration());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&to_json(&result))?);
    }
    match result {
        Ok(solution) => {
            if !args.json {
                print!("{}", render_solution(&solution));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error @ HangError::InternalInconsistency { .. }) => Err(Box::new(error)),
        Err(error) => {
            if !args.json {
                print!("{}", render_failure(&error));
            }
            Ok(ExitCode::from(EXIT_NO_EQUILIBRIUM))
        }
    }
}
