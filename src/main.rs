//! pipeline-complete command-line entry point
//!
//! # Usage
//!
//! ```bash
//! # Interactive shell
//! pipeline-complete
//!
//! # One-shot completion
//! pipeline-complete complete "http --for"
//! ```

use pipeline_complete::cli::CliInterface;
use pipeline_complete::error::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliInterface::new()?;
    initialize_logging(&cli);
    cli.run()
}

/// Initialize logging to stderr
///
/// Verbosity flags win over `RUST_LOG`, which wins over the configured level.
fn initialize_logging(cli: &CliInterface) {
    let configured = LevelFilter::from_level(cli.config().logging.level.to_tracing_level());
    let explicit = cli.args().verbose || cli.args().very_verbose;

    let filter = if explicit {
        EnvFilter::default().add_directive(configured.into())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(configured.into()))
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
