use clap::Parser;
use console::Term;
use tracing_subscriber::EnvFilter;

use tincture::cli::{run, Cli};
use tincture::env::RealEnv;
use tincture::{Backends, PlainUi, TerminalProbe};

fn main() -> anyhow::Result<()> {
    // user-facing warnings already reach stderr through the Ui; the
    // tracing copy only shows up when TINCTURE_LOG asks for it
    let filter = EnvFilter::try_from_env("TINCTURE_LOG").unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(Term::stderr().is_term())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let probe = TerminalProbe::detect(&RealEnv, cli.pager);
    run(&cli, PlainUi::stdio(), &probe, Backends::detect())?;
    Ok(())
}
