use clap::Parser;
use tracing_subscriber::EnvFilter;

use nightfall_cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("NIGHTFALL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = run(&cli)?;
    println!("{}", output);
    Ok(())
}
