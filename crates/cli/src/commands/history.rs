//! `daybook history` — Print day logs for a date range.

use daybook_config::AppConfig;
use daybook_core::format::format_range;

pub async fn run(start: String, end: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = super::open_store(&config).await?;

    let records = store
        .range_query(&config.subject, &start, end.as_deref())
        .await?;
    println!("{}", format_range(&records));

    Ok(())
}
