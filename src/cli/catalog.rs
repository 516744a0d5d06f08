//! Catalog inspection commands

use scamshield::Config;

pub async fn list(config: &Config) -> anyhow::Result<()> {
    let engine = super::build_engine(config)?;
    let catalog = engine.catalog();

    println!("📜 Pattern Catalog");
    println!("──────────────────");
    for category in &catalog.categories {
        println!(
            "  {} [{}] ({} patterns) - {}",
            category.name,
            category.severity,
            category.patterns.len(),
            category.description
        );
    }
    println!(
        "\n{} categories, {} quick patterns, {} shortener domains, {} scam prefixes",
        catalog.categories.len(),
        catalog.quick_patterns.len(),
        catalog.shortener_domains.len(),
        catalog.scam_prefixes.len()
    );
    Ok(())
}

pub async fn show(config: &Config, name: &str) -> anyhow::Result<()> {
    let engine = super::build_engine(config)?;

    let Some(category) = engine.catalog().category(name) else {
        println!("Category not found: {}", name);
        println!("\nAvailable categories:");
        for category in &engine.catalog().categories {
            println!("  - {}", category.name);
        }
        return Ok(());
    };

    println!("Category: {}", category.name);
    println!("Severity: {}", category.severity);
    println!("Description: {}", category.description);
    println!("Patterns:");
    for pattern in &category.patterns {
        println!("  {}", pattern);
    }
    Ok(())
}
