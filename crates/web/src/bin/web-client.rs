use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use plain_web::download;
use plain_web::logging::{LogLevel, set_up_logging};
use tracing::{error, info};

/// Downloads every URL in turn over HTTP/1.0 and stores each body under the
/// last segment of its path.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(required = true)]
    urls: Vec<String>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = set_up_logging(args.log_level) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let mut failed = 0usize;
    for url in &args.urls {
        match download(url, &args.output_dir).await {
            Ok(path) => info!(url, file = %path.display(), "success downloading file"),
            Err(error) => {
                failed += 1;
                error!(url, %error, "download failed");
                eprintln!("{url}: {error}");
            }
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        error!(failed, total = args.urls.len(), "some downloads failed");
        ExitCode::FAILURE
    }
}
