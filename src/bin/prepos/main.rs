mod output;

use prepos::{ConfigError, GitHub, OutputFormat, RunResult, parse_args, run};
use tracing::debug;

use output::write_run_result;

/// Help and version are printed as clap renders them. Any other argument
/// error becomes the invalid-arguments document on stdout.
fn handle_clap_error(clap_err: clap::Error) -> Option<RunResult> {
    use clap::error::ErrorKind;
    match clap_err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{clap_err}");
            None
        }
        kind => {
            debug!(?kind, message = %clap_err, "argument parsing failed");
            Some(ConfigError::InvalidArguments.into())
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let (result, format) = match parse_args(std::env::args_os()) {
        Ok((request, format)) => {
            let result = match GitHub::new(request.token.as_deref()) {
                Ok(github) => run(&request, &github).await,
                Err(err) => RunResult::from_error(&err),
            };
            (result, format)
        }
        Err(clap_err) => match handle_clap_error(clap_err) {
            Some(result) => (result, OutputFormat::Compact),
            None => return Ok(()),
        },
    };

    write_run_result(&result, format, &mut std::io::stdout().lock())
}
