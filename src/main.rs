use anyhow::Result;
use clap::Parser;
use folio::cli::{self, Cli};
use folio_config::LogLevel;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    // Precedence: --log-level, then RUST_LOG, then the config file
    let cli_level = cli.log_level.map(LogLevel::to_level_filter);
    let file_level = (config.log_level != LogLevel::Off && std::env::var_os("RUST_LOG").is_none())
        .then(|| config.log_level.to_level_filter());
    folio::debug::init_log_bridge(cli_level.or(file_level));

    log::info!("Starting folio {}", folio::VERSION);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = cli::run(&cli, &config, &mut out) {
        eprintln!("folio: error: {e:#}");
        // No session state exists in the CLI, so skipping destructors is harmless
        std::process::exit(1);
    }
    Ok(())
}
