//! `daybook onboard` — First-time setup.

use daybook_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("daybook — First-Time Setup");
    println!("==========================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("Created data directory: {}", config_dir.display());
    } else {
        println!("Data directory exists: {}", config_dir.display());
    }

    // Seed an empty guide so a missing file does not surprise anyone;
    // users drop their extracted reference text in here.
    let guide_path = config_dir.join("guide.md");
    if !guide_path.exists() {
        std::fs::write(
            &guide_path,
            concat!(
                "# Reference guide\n\n",
                "Replace this file with the reference text the assistant should\n",
                "draw on when answering knowledge questions.\n",
            ),
        )?;
        println!("Created guide.md");
    }

    if config_path.exists() {
        println!("\nConfig already exists at: {}", config_path.display());
        println!("Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("Created config.toml at: {}", config_path.display());
        println!("\nNext steps:");
        println!("  1. Edit {} and add your API key", config_path.display());
        println!("     (or set DAYBOOK_API_KEY / OPENAI_API_KEY)");
        println!("  2. Set `subject` to your child's name");
        println!("  3. Run: daybook chat\n");
    }

    println!("Setup complete. Run `daybook chat` to start.\n");

    Ok(())
}
