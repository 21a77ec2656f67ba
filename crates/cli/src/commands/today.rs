//! `daybook today` — Print today's day log.

use daybook_config::AppConfig;
use daybook_core::format::format_today;
use daybook_core::local_day_key;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = super::open_store(&config).await?;

    let record = store
        .get_or_create(&config.subject, &local_day_key())
        .await?;
    println!("{}", format_today(&record));

    Ok(())
}
