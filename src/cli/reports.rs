//! Report history and trend commands

use scamshield::db::Database;
use scamshield::Config;

pub async fn tail(config: &Config, limit: usize) -> anyhow::Result<()> {
    let db = Database::open(&config.db_path)?;
    let reports = db.get_recent_reports(limit)?;

    if reports.is_empty() {
        println!("No reports stored yet.");
        return Ok(());
    }

    for report in &reports {
        let action = if report.immediate_action_required {
            " ⛔"
        } else {
            ""
        };
        println!(
            "[{}] {} {} ({}%){} - {}",
            report.timestamp.format("%Y-%m-%d %H:%M"),
            report.channel,
            report.overall_risk,
            report.confidence,
            action,
            truncate(&report.content, 60),
        );
        if !report.matched_categories.is_empty() {
            println!("    matched: {}", report.matched_categories.join(", "));
        }
    }

    Ok(())
}

pub async fn stats(config: &Config, trend_days: u32) -> anyhow::Result<()> {
    let db = Database::open(&config.db_path)?;
    let stats = db.get_stats()?;

    println!("📊 Report Statistics");
    println!("────────────────────");
    println!("Total reports: {}", stats.total_reports);
    println!("  critical: {}", stats.critical);
    println!("  high:     {}", stats.high);
    println!("  medium:   {}", stats.medium);
    println!("  low:      {}", stats.low);

    let trends = db.category_trends(trend_days)?;
    if !trends.is_empty() {
        println!("\nTop categories over the last {} days:", trend_days);
        for (category, count) in trends.iter().take(10) {
            println!("  {:>4}  {}", count, category);
        }
    }

    Ok(())
}

pub async fn cleanup(config: &Config) -> anyhow::Result<()> {
    let db = Database::open(&config.db_path)?;
    let deleted = db.cleanup(config.retention_days)?;
    println!(
        "Deleted {} reports older than {} days",
        deleted, config.retention_days
    );
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}…", head)
    }
}
