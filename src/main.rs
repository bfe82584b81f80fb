//! benchmark-io CLI entry point

use anyhow::{Context, Result};
use benchmark_io::config::{cli::Cli, cli_convert};
use benchmark_io::output::text;
use benchmark_io::{bench, BenchError};
use std::process;

fn main() {
    let cli = Cli::parse_args();
    init_logging(cli.log_level());

    if let Err(err) = run(&cli) {
        // {:#} prints the whole cause chain on one line
        eprintln!("benchmark-io: {:#}", err);
        let code = err
            .downcast_ref::<BenchError>()
            .map(BenchError::exit_code)
            .unwrap_or(1);
        process::exit(code);
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    // RUST_LOG wins over -v when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("benchmark_io={}", level)));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli_convert::load_config(cli)?;
    text::print_banner(&config);

    if cli.dry_run {
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    bench::execute(&config)
        .with_context(|| format!("benchmark in {} did not complete", config.workdir.display()))?;

    Ok(())
}
