use anyhow::Result;
use tracing::info;

use fleet_auditor::{app, config, logging, output};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    logging::init_logging(&config.logging);

    info!("Starting Fleet Audit v{}", env!("CARGO_PKG_VERSION"));

    let report = app::run(&config).await?;

    if config.report.console {
        let stdout = std::io::stdout();
        output::write_console(&mut stdout.lock(), &report)?;
    }
    if let Some(path) = &config.report.json_path {
        output::write_json(path, &report)?;
    }

    info!(run_id = %report.run_id, "Audit finished");
    Ok(())
}
