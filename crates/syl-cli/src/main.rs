use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod input;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("syl error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(flags.quiet, flags.verbose)?;

    match &cli.command {
        cli::Commands::Schema(args) => commands::schema::handle(args, &flags),
        cli::Commands::Aggregate(args) => {
            let config = bootstrap::load_config()?;
            commands::aggregate::handle(args, &config, &flags)
        }
        cli::Commands::Resolve(args) => {
            let config = bootstrap::load_config()?;
            commands::resolve::handle(args, &config, &flags)
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SYLLABUS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
