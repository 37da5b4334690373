use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use plain_http::server::{Dispatcher, DispatcherConfig, ServerError, resolve};
use plain_web::logging::{LogLevel, set_up_logging};
use plain_web::{ServerConfig, StaticFiles};
use tracing::{error, info, warn};

/// Serves the files below ROOT over HTTP/1.0 on every address HOSTNAME
/// resolves to.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    hostname: String,

    port: u16,

    root: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Stop accepting while this many connections are being served
    #[arg(long)]
    max_connections: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(exit_code) => return exit_code,
    };

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(error) => {
            error!(?error);
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Parses the command line. Usage errors exit with `1`; `--help` and
/// `--version` exit with `0` unless printing them fails.
fn parse_args<I, T>(argv: I) -> Result<Args, ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(argv).map_err(|e| {
        let printed = e.print();
        if e.use_stderr() || printed.is_err() { ExitCode::FAILURE } else { ExitCode::SUCCESS }
    })
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    set_up_logging(args.log_level)?;

    let config = ServerConfig::new(args.hostname, args.port, args.root)?;
    let addrs = resolve(config.hostname(), config.port()).await?;

    let dispatcher_config = DispatcherConfig { max_connections: args.max_connections, ..DispatcherConfig::default() };
    let dispatcher = match Dispatcher::bind(&addrs, dispatcher_config) {
        Ok(dispatcher) => dispatcher,
        Err(e @ ServerError::NoListeners { .. }) => {
            error!(cause = %e, "no address to listen on");
            std::process::abort();
        }
        Err(e) => return Err(e).context("can't start listening"),
    };

    info!(root = %config.root().display(), "serving files");
    let handler = Arc::new(StaticFiles::new(Arc::new(config)));
    dispatcher.run_until(handler, shutdown_signal()).await;

    Ok(ExitCode::SUCCESS)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(cause = %e, "can't listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
}
