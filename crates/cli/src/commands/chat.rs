//! `daybook chat` — Interactive or single-message chat mode.

use daybook_agent::{DayLogAgent, FileGuideSource, GuideCache};
use daybook_config::AppConfig;
use daybook_core::message::{Conversation, Message};
use daybook_core::provider::Provider;
use daybook_providers::OpenAiCompatProvider;
use std::io::{BufRead, Write};
use std::sync::Arc;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let agent = build_agent(&config).await?;

    if let Some(msg) = message {
        // Single message mode
        let mut conv = Conversation::new();
        conv.push(Message::user(&msg));

        let outcome = agent.handle_turn(&mut conv).await;
        println!("{}", outcome.text);
        if let Some(detail) = outcome.error_detail {
            tracing::warn!(detail = %detail, "Turn degraded");
        }
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  daybook — chatting about {}'s day", config.subject);
    println!("  Model: {}", config.model);
    println!("  Type your message and press Enter. Type 'exit' to quit.");
    println!();

    let mut conv = Conversation::new();
    let stdin = std::io::stdin();

    print!("  You > ");
    std::io::stdout().flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        if input.is_empty() {
            print!("  You > ");
            std::io::stdout().flush()?;
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        conv.push(Message::user(input));
        let outcome = agent.handle_turn(&mut conv).await;

        println!();
        for out_line in outcome.text.lines() {
            println!("  daybook > {out_line}");
        }
        println!();
        if let Some(detail) = outcome.error_detail {
            tracing::warn!(detail = %detail, "Turn degraded");
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Goodbye!");
    Ok(())
}

async fn build_agent(config: &AppConfig) -> Result<DayLogAgent, Box<dyn std::error::Error>> {
    let store = super::open_store(config).await?;
    let tools = Arc::new(daybook_tools::default_registry(
        store.clone(),
        config.subject.clone(),
    ));
    let guide = Arc::new(GuideCache::new(Arc::new(FileGuideSource::new(
        config.guide.guide_path(),
    ))));

    // No API key is not fatal here: the agent replies with setup
    // instructions instead of calling a provider.
    let provider: Option<Arc<dyn Provider>> = match &config.api_key {
        Some(key) => Some(Arc::new(OpenAiCompatProvider::new(
            "openai",
            &config.api_url,
            key,
        )?)),
        None => None,
    };

    Ok(DayLogAgent::new(
        provider,
        &config.model,
        tools,
        store,
        &config.subject,
        guide,
    )
    .with_temperature(config.temperature)
    .with_max_tokens(config.max_tokens)
    .with_max_rounds(config.agent.max_rounds))
}
