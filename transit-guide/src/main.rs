use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use transit_guide::requests;

fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    init_logger();

    // Responses go to stdout, logs to stderr
    let input = BufReader::new(io::stdin().lock());
    let output = BufWriter::new(io::stdout().lock());

    match requests::run(input, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to process requests");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
