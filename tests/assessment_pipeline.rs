//! End-to-end pipeline: scrub a submission, assess it, store the report,
//! and aggregate stats, the way the API handler composes the library.

use scamshield::catalog::{default_catalog, Catalog, PatternCategory};
use scamshield::db::Database;
use scamshield::engine::RiskEngine;
use scamshield::scrub::PiiScrubber;
use scamshield::{Channel, Severity, Submission, Verdict};

const SCAM_TEXT: &str = "This is Agent Johnson from the Social Security Administration. \
    Your number has been suspended. We need your social security number immediately \
    or a warrant will be issued. Call 876-555-0134 now.";

#[test]
fn full_pipeline_scrub_assess_store() {
    let engine = RiskEngine::default();
    let scrubber = PiiScrubber::new();
    let db = Database::open_in_memory().unwrap();

    // Assessment runs on the raw text
    let assessment = engine.assess(SCAM_TEXT, Some("876-555-0134")).unwrap();
    assert_eq!(assessment.overall_risk, Severity::Critical);
    assert!(assessment.immediate_action_required);
    assert!(assessment.contains_phone_number);
    assert!(assessment
        .matched_categories()
        .contains(&"suspicious_caller"));

    // Storage only ever sees scrubbed content
    let scrubbed = scrubber.scrub(SCAM_TEXT);
    assert!(scrubbed.text.contains("[PHONE]"));
    assert!(!scrubbed.text.contains("876-555-0134"));

    let submission = Submission::new(
        Channel::PhoneCall,
        scrubbed.text,
        Some("876-555-0134".to_string()),
    );
    db.store_report(&submission, &assessment).unwrap();

    let reports = db.get_recent_reports(10).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].overall_risk, Severity::Critical);
    assert!(reports[0].content.contains("[PHONE]"));

    let stats = db.get_stats().unwrap();
    assert_eq!(stats.total_reports, 1);
    assert_eq!(stats.critical, 1);

    let trends = db.category_trends(7).unwrap();
    assert!(trends.iter().any(|(c, _)| c == "authority"));
}

#[test]
fn quick_check_agrees_with_full_assessment_on_scam_text() {
    let engine = RiskEngine::default();
    assert_eq!(engine.quick_check(SCAM_TEXT).unwrap(), Verdict::Dangerous);
    assert!(engine.assess(SCAM_TEXT, None).unwrap().overall_risk >= Severity::High);
}

#[test]
fn swapped_in_catalog_drives_the_whole_pipeline() {
    let mut catalog = Catalog::new(vec![PatternCategory::new(
        "pet_ransom",
        "demands involving a kidnapped goldfish",
        Severity::High,
        &[r"\bgoldfish\b.{0,30}\bransom\b"],
    )
    .unwrap()]);
    catalog.compile().unwrap();
    let engine = RiskEngine::new(catalog);

    let hit = engine
        .assess("we have your goldfish, pay the ransom", None)
        .unwrap();
    assert_eq!(hit.overall_risk, Severity::High);
    assert_eq!(hit.confidence, 50);

    // The default catalog's categories do not exist in this engine
    let miss = engine.assess(SCAM_TEXT, None).unwrap();
    assert!(miss.matched_categories().is_empty());
    assert_eq!(miss.overall_risk, Severity::Low);

    // An empty quick subset can only ever say safe
    assert_eq!(engine.quick_check(SCAM_TEXT).unwrap(), Verdict::Safe);
}

#[test]
fn default_catalog_loaded_from_yaml_round_trips() {
    let catalog = default_catalog();
    let yaml = serde_yaml::to_string(&catalog).unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), yaml).unwrap();

    let reloaded = scamshield::catalog::load_catalog_from_file(file.path()).unwrap();
    assert_eq!(reloaded.categories.len(), catalog.categories.len());

    let engine = RiskEngine::new(reloaded);
    let assessment = engine.assess(SCAM_TEXT, None).unwrap();
    assert_eq!(assessment.overall_risk, Severity::Critical);
}
