use anyhow::Result;
use kronos_dashboard::config::Config;
use kronos_dashboard::logger::Logger;
use kronos_dashboard::ui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--generate-config") {
        let path = Config::get_default_config_path()?;
        Config::generate_default_config(&path)?;
        return Ok(());
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: invalid configuration: {:#}", e);
            eprintln!("\n💡 Run with --generate-config to write a default configuration file.");
            return Ok(());
        }
    };

    let logger = Logger::from_config(config.logging.enabled)?;
    logger.install(log::LevelFilter::Debug)?;
    log::info!("kronos-dashboard {} starting", env!("CARGO_PKG_VERSION"));

    // Run the TUI application
    ui::run_app(config, logger).await?;

    Ok(())
}
