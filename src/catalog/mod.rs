//! Pattern catalog definitions and matching logic
//!
//! The catalog is the single versioned artifact every runtime consumes:
//! eight fixed scam categories, a reduced quick-check subset, known
//! link-shortener domains, and known scam caller prefixes. It can be
//! loaded from a YAML file so web, mobile, and backend stay in lock-step.

use crate::Severity;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// A named group of regular expressions sharing one severity label
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PatternCategory {
    /// Category name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Severity carried when any pattern matches
    #[serde(default)]
    pub severity: Severity,
    /// Regex patterns, applied case-insensitively
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Compiled patterns (not serialized)
    #[serde(skip)]
    compiled: Vec<Regex>,
}

impl PatternCategory {
    /// Build a category, compiling its patterns. A bad pattern is an error
    /// here rather than a category that silently never matches.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        patterns: &[&str],
    ) -> anyhow::Result<Self> {
        let mut category = Self {
            name: name.into(),
            description: description.into(),
            severity,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            compiled: vec![],
        };
        category.compile()?;
        Ok(category)
    }

    /// Compile the category's patterns, case-insensitive
    pub fn compile(&mut self) -> anyhow::Result<()> {
        self.compiled = self
            .patterns
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(())
    }

    /// A category matches if any one pattern hits anywhere in the text
    pub fn matches(&self, text: &str) -> bool {
        self.compiled.iter().any(|re| re.is_match(text))
    }
}

fn compile_pattern(pattern: &str) -> anyhow::Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

/// The full rule set the engine runs with
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Catalog {
    /// The eight pattern categories
    pub categories: Vec<PatternCategory>,
    /// Reduced danger subset for the quick pre-filter; every entry must also
    /// appear in a high or critical category so the pre-filter is never less
    /// alarmed than the full assessment
    #[serde(default)]
    pub quick_patterns: Vec<String>,
    /// Known link-shortener domains (substring match, lowercased)
    #[serde(default)]
    pub shortener_domains: Vec<String>,
    /// Known scam caller area-code prefixes (digits, without country code)
    #[serde(default)]
    pub scam_prefixes: Vec<String>,
    /// Compiled quick patterns (not serialized)
    #[serde(skip)]
    compiled_quick: Vec<Regex>,
}

impl Catalog {
    /// A catalog with only the given categories; quick patterns, shortener
    /// domains, and scam prefixes start empty
    pub fn new(categories: Vec<PatternCategory>) -> Self {
        Self {
            categories,
            ..Default::default()
        }
    }

    /// Compile every category and the quick subset
    pub fn compile(&mut self) -> anyhow::Result<()> {
        for category in &mut self.categories {
            category.compile()?;
        }
        self.compiled_quick = self
            .quick_patterns
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(())
    }

    /// Look up a category by name
    pub fn category(&self, name: &str) -> Option<&PatternCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Count how many distinct quick patterns hit the text
    pub fn quick_hits(&self, text: &str) -> usize {
        self.compiled_quick
            .iter()
            .filter(|re| re.is_match(text))
            .count()
    }

    /// Whether the text references a known link-shortener domain
    pub fn contains_shortened_link(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.shortener_domains.iter().any(|d| lower.contains(d))
    }

    /// Whether a caller number starts with a known scam prefix.
    /// Numbers are normalized to digits with any US country code stripped.
    pub fn matches_scam_prefix(&self, number: &str) -> bool {
        let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
        let national = if digits.len() == 11 && digits.starts_with('1') {
            &digits[1..]
        } else {
            digits.as_str()
        };
        if national.is_empty() {
            return false;
        }
        self.scam_prefixes.iter().any(|p| national.starts_with(p))
    }
}

/// The built-in catalog. Its pattern table is fixed at compile time, so a
/// failure here is a programming error, not a runtime condition.
pub fn default_catalog() -> Catalog {
    built_in_catalog().expect("built-in pattern catalog is valid")
}

fn built_in_catalog() -> anyhow::Result<Catalog> {
    let categories = vec![
        PatternCategory::new(
            "urgency",
            "Pressure to act before you can think it over",
            Severity::Medium,
            &[
                r"\b(urgent(ly)?|immediately|right away|act (now|fast))\b",
                r"\bwithin (24|48|72) hours\b",
                r"\b(final|last) (notice|warning|chance)\b",
                r"\bexpires? (today|tonight|soon)\b",
                r"\bdo not (hang up|tell anyone)\b",
                r"\btime.sensitive\b",
            ],
        )?,
        PatternCategory::new(
            "authority",
            "Impersonation of government or law enforcement",
            Severity::High,
            &[
                r"\b(social security administration|internal revenue service|irs|medicare|fbi|dea|u\.?s\.? marshals?)\b",
                r"\bthis is (agent|officer|investigator)\b",
                r"\b(federal|government) (agent|agency|official)\b",
                r"\bbadge (number|id)\b",
                r"\b(warrant|arrest) (will be|has been) issued\b",
                r"\b(lawsuit|legal action) (against|filed)\b",
                r"\b(police|sheriff) (department|office)\b",
            ],
        )?,
        PatternCategory::new(
            "financial",
            "Demands for money or threats against your accounts",
            Severity::High,
            &[
                r"\bgift ?cards?\b",
                r"\b(wire transfer|western union|moneygram|money order)\b",
                r"\b(bitcoin|cryptocurrency|crypto) (atm|payment|wallet)\b",
                r"\b(suspend(ed)?|frozen|seiz(ed|ure)|garnish(ed)?)\b",
                r"\b(pay|send|transfer)\b.{0,40}\b(fee|fine|penalty|taxes?|deposit)\b",
                r"\b(outstanding|unpaid) (balance|debt|taxes?)\b",
                r"\bprocessing fee\b",
            ],
        )?,
        PatternCategory::new(
            "sensitive_info",
            "Requests for identity or account credentials",
            Severity::Critical,
            &[
                r"\bsocial security number\b",
                r"\bssn\b",
                r"\b(verify|confirm|provide|give us|need) your\b.{0,40}\b(identity|account|information|number)\b",
                r"\b(bank account|routing|debit card|credit card) number\b",
                r"\b(password|pin (code|number))\b",
                r"\b(one.time|verification) code\b",
                r"\bmother'?s maiden name\b",
                r"\bmedicare (number|card)\b",
            ],
        )?,
        PatternCategory::new(
            "tech_support",
            "Fake virus warnings and remote-access requests",
            Severity::High,
            &[
                r"\b(virus|malware|trojan|spyware)\b.{0,50}\b(computer|device|pc|account)\b",
                r"\b(computer|device|account)\b.{0,50}\b(infected|hacked|compromised)\b",
                r"\b(microsoft|apple|windows|amazon) (support|security|technician)\b",
                r"\bremote access\b",
                r"\b(anydesk|teamviewer|ultraviewer)\b",
                r"\btech(nical)? support\b",
                r"\brefund department\b",
            ],
        )?,
        PatternCategory::new(
            "romance",
            "Relationship pressure that turns into money requests",
            Severity::Medium,
            &[
                r"\b(my (love|darling|dearest)|soul ?mate)\b",
                r"\b(never|haven'?t) met\b.{0,40}\b(in person|face to face)\b",
                r"\b(stuck|stranded|detained) (overseas|abroad)\b",
                r"\b(deployed|deployment)\b.{0,40}\b(money|funds|leave)\b",
                r"\bmoney for (a )?(ticket|flight|visa|customs)\b",
            ],
        )?,
        PatternCategory::new(
            "prize",
            "Fake winnings that require payment to claim",
            Severity::High,
            &[
                r"\byou('ve| have)? (been selected|won)\b",
                r"\b(prize|lottery|sweepstakes|jackpot)\b",
                r"\bclaim your (prize|winnings|reward)\b",
                r"\bcongratulations\b.{0,60}\b(winner|won|selected)\b",
            ],
        )?,
        PatternCategory::new(
            "investment",
            "Too-good-to-be-true investment offers",
            Severity::High,
            &[
                r"\bguaranteed (returns?|profits?|income)\b",
                r"\b(double|triple) your (money|investment)\b",
                r"\brisk.free (investment|opportunity)\b",
                r"\b(crypto|bitcoin|forex)\b.{0,40}\b(opportunity|platform|trading)\b",
                r"\binsider (tip|information)\b",
                r"\bget rich\b",
            ],
        )?,
    ];

    let mut catalog = Catalog {
        categories,
        // Each entry below is verbatim from a high or critical category above.
        quick_patterns: vec![
            r"\bsocial security number\b".to_string(),
            r"\bgift ?cards?\b".to_string(),
            r"\b(wire transfer|western union|moneygram|money order)\b".to_string(),
            r"\b(warrant|arrest) (will be|has been) issued\b".to_string(),
            r"\bremote access\b".to_string(),
            r"\b(one.time|verification) code\b".to_string(),
            r"\bclaim your (prize|winnings|reward)\b".to_string(),
            r"\bguaranteed (returns?|profits?|income)\b".to_string(),
        ],
        shortener_domains: vec![
            "bit.ly".to_string(),
            "tinyurl.com".to_string(),
            "goo.gl".to_string(),
            "t.co/".to_string(),
            "ow.ly".to_string(),
            "is.gd".to_string(),
            "buff.ly".to_string(),
            "cutt.ly".to_string(),
            "rb.gy".to_string(),
            "shorturl.at".to_string(),
        ],
        // One-ring / premium-rate area codes commonly spoofed in US scams
        scam_prefixes: vec![
            "876".to_string(),
            "809".to_string(),
            "473".to_string(),
            "649".to_string(),
            "284".to_string(),
            "900".to_string(),
        ],
        compiled_quick: vec![],
    };
    catalog.compile()?;
    Ok(catalog)
}

/// Load a catalog from a YAML file.
/// A malformed catalog is an error, never a silent fallback to defaults.
pub fn load_catalog_from_file(path: &std::path::Path) -> anyhow::Result<Catalog> {
    let content = std::fs::read_to_string(path)?;
    let mut catalog: Catalog = serde_yaml::from_str(&content)?;
    catalog.compile()?;
    Ok(catalog)
}
