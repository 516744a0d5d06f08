//! Risk scoring engine
//!
//! Single-pass, stateless classification of one block of text against the
//! pattern catalog. Pure over its input: no I/O, no locks, no shared
//! mutable state, so one engine can serve any number of concurrent callers.

pub mod recommend;

use crate::catalog::{default_catalog, Catalog};
use crate::{EngineError, Indicator, RiskAssessment, Severity, Verdict};
use regex::Regex;

/// Input cap. Bounds per-call matching cost on adversarial input; anything
/// larger is rejected rather than scored.
pub const MAX_INPUT_BYTES: usize = 64 * 1024;

/// Confidence floor when nothing matches
const CONFIDENCE_FLOOR: u8 = 30;
/// Confidence is never full certainty
const CONFIDENCE_CAP: u8 = 95;
/// Confidence gained per distinct matched indicator
const CONFIDENCE_PER_MATCH: u8 = 20;

/// The risk scoring engine.
///
/// The catalog is injected at construction and immutable afterwards, so
/// tests can swap in reduced rule sets and runtimes share one artifact.
pub struct RiskEngine {
    catalog: Catalog,
    phone_re: Regex,
}

impl RiskEngine {
    pub fn new(catalog: Catalog) -> Self {
        // US-formatted numbers: optional +1, then 3-3-4 digit groups
        let phone_re =
            Regex::new(r"(\+?1[-.\s]?)?(\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b")
                .expect("phone number pattern is valid");
        Self { catalog, phone_re }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Full assessment of one block of text, with an optional caller number.
    ///
    /// Deterministic and idempotent; errors are surfaced, never folded into
    /// a default-safe result.
    pub fn assess(
        &self,
        text: &str,
        caller_number: Option<&str>,
    ) -> Result<RiskAssessment, EngineError> {
        validate_input(text)?;

        let mut indicators: Vec<Indicator> = self
            .catalog
            .categories
            .iter()
            .map(|category| Indicator {
                category: category.name.clone(),
                severity: category.severity,
                description: category.description.clone(),
                matched: category.matches(text),
            })
            .collect();

        if self.catalog.contains_shortened_link(text) {
            indicators.push(Indicator {
                category: "shortened_link".to_string(),
                severity: Severity::High,
                description: "Shortened or obfuscated link that hides its destination".to_string(),
                matched: true,
            });
        }

        if let Some(number) = caller_number {
            if self.catalog.matches_scam_prefix(number) {
                indicators.push(Indicator {
                    category: "suspicious_caller".to_string(),
                    severity: Severity::Medium,
                    description: "Caller number matches a known scam prefix".to_string(),
                    matched: true,
                });
            }
        }

        // Phone numbers in the body are recorded but never raise severity
        let contains_phone_number = self.phone_re.is_match(text);

        let matched: Vec<&Indicator> = indicators.iter().filter(|i| i.matched).collect();
        let matched_count = matched.len();

        let overall_risk = matched
            .iter()
            .map(|i| i.severity)
            .max()
            .unwrap_or(Severity::Low);

        let confidence = confidence_for(matched_count);
        let immediate_action_required = overall_risk == Severity::Critical || matched_count >= 3;
        let recommendations = recommend::for_matched(&matched);

        Ok(RiskAssessment {
            overall_risk,
            confidence,
            indicators,
            recommendations,
            immediate_action_required,
            contains_phone_number,
        })
    }

    /// Cheap three-bucket pre-filter over the reduced danger subset.
    /// Uses different patterns and thresholds than `assess` and must stay
    /// independently testable.
    pub fn quick_check(&self, text: &str) -> Result<Verdict, EngineError> {
        validate_input(text)?;

        Ok(match self.catalog.quick_hits(text) {
            0 => Verdict::Safe,
            1 => Verdict::Suspicious,
            _ => Verdict::Dangerous,
        })
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

fn validate_input(text: &str) -> Result<(), EngineError> {
    // Embedded NUL means binary data was pasted in, not a message
    if text.contains('\0') {
        return Err(EngineError::InvalidInput);
    }
    if text.len() > MAX_INPUT_BYTES {
        return Err(EngineError::InputTooLarge {
            size: text.len(),
            max: MAX_INPUT_BYTES,
        });
    }
    Ok(())
}

fn confidence_for(matched_count: usize) -> u8 {
    let raw = matched_count
        .saturating_mul(CONFIDENCE_PER_MATCH as usize)
        .saturating_add(CONFIDENCE_FLOOR as usize);
    raw.min(CONFIDENCE_CAP as usize) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOV_IMPERSONATION: &str = "This is Agent Johnson from the Social Security \
        Administration. Your number has been suspended. We need your social security \
        number immediately or a warrant will be issued.";

    const BENIGN: &str = "Hi Mom, just checking in, call me when you get a chance!";

    #[test]
    fn test_empty_input_baseline() {
        let engine = RiskEngine::default();
        let result = engine.assess("", None).unwrap();

        assert_eq!(result.overall_risk, Severity::Low);
        assert_eq!(result.confidence, 30);
        assert!(result.indicators.iter().all(|i| !i.matched));
        assert!(!result.immediate_action_required);
        assert!(!result.contains_phone_number);
    }

    #[test]
    fn test_determinism() {
        let engine = RiskEngine::default();
        let a = engine.assess(GOV_IMPERSONATION, Some("876-555-0134")).unwrap();
        let b = engine.assess(GOV_IMPERSONATION, Some("876-555-0134")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_government_impersonation_scenario() {
        let engine = RiskEngine::default();
        let result = engine.assess(GOV_IMPERSONATION, None).unwrap();

        let matched = result.matched_categories();
        assert!(matched.contains(&"authority"));
        assert!(matched.contains(&"financial"));
        assert!(matched.contains(&"sensitive_info"));
        assert!(matched.contains(&"urgency"));

        assert_eq!(result.overall_risk, Severity::Critical);
        assert!(result.immediate_action_required);
        assert_eq!(result.confidence, 95);
    }

    #[test]
    fn test_benign_text_scenario() {
        let engine = RiskEngine::default();
        let result = engine.assess(BENIGN, None).unwrap();

        assert_eq!(result.overall_risk, Severity::Low);
        assert_eq!(result.confidence, 30);
        assert!(result.matched_categories().is_empty());
        assert!(!result.immediate_action_required);
    }

    #[test]
    fn test_gift_card_scenario() {
        let engine = RiskEngine::default();
        let result = engine
            .assess("You must purchase gift cards to pay the fee today.", None)
            .unwrap();

        assert!(result.matched_categories().contains(&"financial"));
        assert!(
            result
                .recommendations
                .iter()
                .any(|r| r.to_lowercase().contains("gift card")),
            "expected a gift-card warning in {:?}",
            result.recommendations
        );
    }

    #[test]
    fn test_single_category_severity_is_exact() {
        let engine = RiskEngine::default();

        // Urgency only -> medium
        let result = engine.assess("Please respond within 24 hours.", None).unwrap();
        assert_eq!(result.matched_categories(), vec!["urgency"]);
        assert_eq!(result.overall_risk, Severity::Medium);

        // Tech support only -> high
        let result = engine.assess("Our Microsoft support team noticed a problem.", None).unwrap();
        assert_eq!(result.matched_categories(), vec!["tech_support"]);
        assert_eq!(result.overall_risk, Severity::High);
    }

    #[test]
    fn test_confidence_bounds_and_formula() {
        let engine = RiskEngine::default();

        let zero = engine.assess("lovely weather today", None).unwrap();
        assert_eq!(zero.confidence, 30);

        let one = engine.assess("act now", None).unwrap();
        assert_eq!(one.matched_categories().len(), 1);
        assert_eq!(one.confidence, 50);

        let many = engine.assess(GOV_IMPERSONATION, None).unwrap();
        assert_eq!(many.confidence, 95);

        for text in ["", "act now", GOV_IMPERSONATION, BENIGN] {
            let c = engine.assess(text, None).unwrap().confidence;
            assert!((30..=95).contains(&c), "confidence {c} out of bounds");
        }
    }

    #[test]
    fn test_monotonicity_under_appended_matching_text() {
        let engine = RiskEngine::default();

        let base = engine.assess("Please respond within 24 hours.", None).unwrap();
        let extended = engine
            .assess(
                "Please respond within 24 hours. We need your social security number.",
                None,
            )
            .unwrap();

        assert!(extended.overall_risk >= base.overall_risk);
        assert!(extended.confidence >= base.confidence);
    }

    #[test]
    fn test_shortened_link_is_high_indicator() {
        let engine = RiskEngine::default();
        let result = engine.assess("Track your package: https://bit.ly/3xYz", None).unwrap();

        let link = result
            .indicators
            .iter()
            .find(|i| i.category == "shortened_link")
            .expect("shortened_link indicator appended");
        assert!(link.matched);
        assert_eq!(link.severity, Severity::High);
        assert_eq!(result.overall_risk, Severity::High);
    }

    #[test]
    fn test_phone_number_recorded_but_not_scored() {
        let engine = RiskEngine::default();
        let result = engine.assess("Call me back at (212) 555-0123.", None).unwrap();

        assert!(result.contains_phone_number);
        assert_eq!(result.overall_risk, Severity::Low);
        assert_eq!(result.confidence, 30);
    }

    #[test]
    fn test_suspicious_caller_indicator() {
        let engine = RiskEngine::default();
        let result = engine.assess("Missed call.", Some("+1 876 555 0134")).unwrap();

        let caller = result
            .indicators
            .iter()
            .find(|i| i.category == "suspicious_caller")
            .expect("suspicious_caller indicator appended");
        assert!(caller.matched);
        assert_eq!(result.overall_risk, Severity::Medium);

        // A clean caller number adds nothing
        let clean = engine.assess("Missed call.", Some("212-555-0123")).unwrap();
        assert!(clean.indicators.iter().all(|i| i.category != "suspicious_caller"));
    }

    #[test]
    fn test_invalid_input_rejected() {
        let engine = RiskEngine::default();
        assert!(matches!(
            engine.assess("binary\0garbage", None),
            Err(EngineError::InvalidInput)
        ));
        assert!(matches!(
            engine.quick_check("binary\0garbage"),
            Err(EngineError::InvalidInput)
        ));
    }

    #[test]
    fn test_oversized_input_rejected() {
        let engine = RiskEngine::default();
        let huge = "a".repeat(MAX_INPUT_BYTES + 1);
        assert!(matches!(
            engine.assess(&huge, None),
            Err(EngineError::InputTooLarge { .. })
        ));
        assert!(matches!(
            engine.quick_check(&huge),
            Err(EngineError::InputTooLarge { .. })
        ));
    }

    #[test]
    fn test_quick_check_buckets() {
        let engine = RiskEngine::default();

        assert_eq!(engine.quick_check(BENIGN).unwrap(), Verdict::Safe);
        assert_eq!(
            engine.quick_check("purchase gift cards for me").unwrap(),
            Verdict::Suspicious
        );
        assert_eq!(engine.quick_check(GOV_IMPERSONATION).unwrap(), Verdict::Dangerous);
    }

    #[test]
    fn test_quick_check_never_less_alarmed_than_assess() {
        let engine = RiskEngine::default();
        let samples = [
            GOV_IMPERSONATION,
            "Send a wire transfer and remote access to your computer",
            "Your verification code is needed, buy gift cards",
            "claim your prize with guaranteed returns",
            BENIGN,
        ];

        for text in samples {
            if engine.quick_check(text).unwrap() == Verdict::Dangerous {
                let risk = engine.assess(text, None).unwrap().overall_risk;
                assert!(risk >= Severity::High, "assess({text:?}) = {risk}");
            }
        }
    }

    #[test]
    fn test_custom_catalog_injection() {
        use crate::catalog::{Catalog, PatternCategory};

        let mut catalog = Catalog::new(vec![PatternCategory::new(
            "magic_word",
            "test-only category",
            Severity::Critical,
            &[r"\babracadabra\b"],
        )
        .unwrap()]);
        catalog.compile().unwrap();

        let engine = RiskEngine::new(catalog);
        let result = engine.assess("say abracadabra", None).unwrap();
        assert_eq!(result.overall_risk, Severity::Critical);
        assert!(result.immediate_action_required);
    }
}
