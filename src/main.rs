use zonecut::{cli, init_logging};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    tracing::debug!("zonecut {} (built {})", zonecut::VERSION, zonecut::BUILD_DATE);
    cli::run_from_env()
}
