//! Assess command - score a message and print the findings

use scamshield::db::Database;
use scamshield::scrub::PiiScrubber;
use scamshield::{Channel, Config, Severity, Submission};
use std::path::PathBuf;

pub struct AssessArgs {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub caller: Option<String>,
    pub channel: Channel,
    pub json: bool,
    pub save: bool,
}

pub async fn run(config: &Config, args: AssessArgs) -> anyhow::Result<()> {
    let text = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => anyhow::bail!("provide message text or --file"),
    };

    let engine = super::build_engine(config)?;
    let assessment = engine.assess(&text, args.caller.as_deref())?;

    if args.save {
        let scrubbed = PiiScrubber::new().scrub(&text);
        let submission = Submission::new(args.channel, scrubbed.text, args.caller.clone());
        let db = Database::open(&config.db_path)?;
        db.store_report(&submission, &assessment)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    let badge = match assessment.overall_risk {
        Severity::Critical => "🚨",
        Severity::High => "⚠️ ",
        Severity::Medium => "🟡",
        Severity::Low => "✅",
    };
    println!("{} Overall risk: {}", badge, assessment.overall_risk);
    println!("Confidence: {}%", assessment.confidence);
    if assessment.immediate_action_required {
        println!("⛔ Immediate action required");
    }
    if assessment.contains_phone_number {
        println!("Note: the message contains a phone number");
    }

    println!("\nIndicators:");
    for indicator in &assessment.indicators {
        let mark = if indicator.matched { "✗" } else { "·" };
        println!(
            "  {} {} [{}] - {}",
            mark, indicator.category, indicator.severity, indicator.description
        );
    }

    println!("\nWhat to do:");
    for (i, rec) in assessment.recommendations.iter().enumerate() {
        println!("  {}. {}", i + 1, rec);
    }

    Ok(())
}

pub async fn quick(config: &Config, text: &str) -> anyhow::Result<()> {
    let engine = super::build_engine(config)?;
    let verdict = engine.quick_check(text)?;
    println!("{}", verdict);
    Ok(())
}
