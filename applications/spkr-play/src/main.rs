/// spkr-play - send a melody to a spkrd server
use clap::Parser;
use spkr_client::{ClientConfig, SpkrClient};
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PROGRAM: &str = "spkr-play";
const EXAMPLE_URL: &str = "http://192.168.1.100:8080";
const EXAMPLE_MELODY: &str = "cdefgab";

/// Exactly two positionals. Help and version flags are off so that
/// `-h` or `--version` are treated as values rather than changing the
/// argument count.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "spkr-play")]
#[command(about = "Send a melody to a spkrd server", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Base URL of the server, e.g. http://192.168.1.100:8080
    server_url: String,

    /// Melody string, sent to the server unchanged
    melody: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr and stay quiet unless RUST_LOG asks for more
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(usage) => {
            eprintln!("{}", usage);
            return ExitCode::FAILURE;
        }
    };

    if run(cli, &mut io::stdout(), &mut io::stderr()).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Parse `argv` (program name first). On failure returns the usage text.
///
/// The count is checked on the raw arguments, and clap only ever sees them
/// after an end-of-options marker, so `--` or `-x` are ordinary values.
fn parse_args<I, T>(args: I) -> Result<Cli, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

    if args.len() != 3 {
        tracing::debug!(count = args.len().saturating_sub(1), "Wrong argument count");
        return Err(usage(&program));
    }
    args.insert(1, OsString::from("--"));

    Cli::try_parse_from(args).map_err(|e| {
        tracing::debug!(error = %e, "Argument parsing failed");
        usage(&program)
    })
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {} <server_url> <melody>\nExample: {} {} \"{}\"",
        program, program, EXAMPLE_URL, EXAMPLE_MELODY
    )
}

/// Send the melody and report the outcome. Returns whether it was played.
///
/// Progress output is best effort: an unwritable `out` never stops the request.
async fn run<O: Write, E: Write>(cli: Cli, out: &mut O, err: &mut E) -> bool {
    let result = match SpkrClient::new(ClientConfig::new(cli.server_url)) {
        Ok(client) => {
            let progress = writeln!(out, "Playing melody: {}", cli.melody)
                .and_then(|()| writeln!(out, "Server: {}", client.url()))
                .and_then(|()| out.flush());
            if let Err(e) = progress {
                tracing::debug!(error = %e, "Failed to write progress");
            }
            client.play(&cli.melody).await
        }
        Err(e) => Err(e),
    };

    report(result, out, err)
}

/// Print the single outcome line: success to `out`, any failure to `err`.
fn report<O: Write, E: Write>(result: spkr_client::Result<()>, out: &mut O, err: &mut E) -> bool {
    let (played, written) = match result {
        Ok(()) => (true, writeln!(out, "✓ Melody played successfully")),
        Err(e) => (false, writeln!(err, "✗ {}", e)),
    };
    if let Err(e) = written {
        tracing::debug!(error = %e, "Failed to write outcome");
    }
    played
}
