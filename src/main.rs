use crypto_scanner::{config::ScannerConfig, Runner};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("crypto_scanner=info")
        .with_writer(std::io::stderr)
        .init();

    let config = ScannerConfig::default();
    info!(
        "Scanning {} symbol(s) on {:?}, reports in {}",
        config.symbols.len(),
        config.timeframes,
        config.output_dir.display()
    );

    let mut runner = Runner::from_config(config)?;
    let summary = runner.run_once(&mut std::io::stdout().lock())?;

    info!("Done: {} new signal(s)", summary.new_signal_count());
    Ok(())
}
