use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("arcadia error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = bootstrap::load_config()?;
    let app = bootstrap::AppContext::init(config)?;

    commands::dispatch(cli.command, &app, &flags).await
}

/// `ARCADIA_LOG` wins over the flags; `--verbose` only raises the arcadia crates.
fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let directives = match (quiet, verbose) {
        (true, _) => "error",
        (false, true) => "warn,arc_discovery=debug,arc_rest=debug,arc_auth=debug,arcadia=debug",
        (false, false) => "warn",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("ARCADIA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}
