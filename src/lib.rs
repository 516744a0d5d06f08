//! ScamShield Library
//!
//! Core components for scam risk scoring and report tracking.

pub mod catalog;
pub mod db;
pub mod engine;
pub mod scrub;
pub mod web;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One user-submitted message under analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier
    pub id: String,
    /// Timestamp of the submission
    pub timestamp: DateTime<Utc>,
    /// Where the message came from
    pub channel: Channel,
    /// Raw message text (OCR/transcript output for non-text channels)
    pub content: String,
    /// Phone number the message or call came from, if known
    pub caller_number: Option<String>,
}

impl Submission {
    /// Wrap free text in a submission with a fresh id and current timestamp
    pub fn new(channel: Channel, content: impl Into<String>, caller_number: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            channel,
            content: content.into(),
            caller_number,
        }
    }
}

/// Submission channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Sms,
    Email,
    PhoneCall,
    SocialMedia,
    ScreenshotText,
    #[default]
    Unknown,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Sms => write!(f, "sms"),
            Channel::Email => write!(f, "email"),
            Channel::PhoneCall => write!(f, "phone_call"),
            Channel::SocialMedia => write!(f, "social_media"),
            Channel::ScreenshotText => write!(f, "screenshot_text"),
            Channel::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for Channel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "sms" | "text" => Channel::Sms,
            "email" => Channel::Email,
            "phone_call" | "call" | "phone" => Channel::PhoneCall,
            "social_media" | "social" => Channel::SocialMedia,
            "screenshot_text" | "screenshot" => Channel::ScreenshotText,
            _ => Channel::Unknown,
        })
    }
}

/// Severity scale shared by categories and overall assessments
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Baseline, nothing alarming found
    #[default]
    Low,
    /// Common manipulation tactics present
    Medium,
    /// Strong scam signals present
    High,
    /// Hallmarks of active fraud
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "medium" => Severity::Medium,
            "high" => Severity::High,
            "critical" => Severity::Critical,
            _ => Severity::Low,
        })
    }
}

/// Per-category result of testing the input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    /// Category name (or ad-hoc indicator name like "shortened_link")
    pub category: String,
    /// Severity this indicator carries when matched
    pub severity: Severity,
    /// Human-readable description of the category
    pub description: String,
    /// Whether any of the category's patterns hit the input
    pub matched: bool,
}

/// Result of assessing one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Maximum severity among matched indicators
    pub overall_risk: Severity,
    /// Heuristic 30-95 score derived from the match count, not a probability
    pub confidence: u8,
    /// Every category plus any ad-hoc matched indicators
    pub indicators: Vec<Indicator>,
    /// Remediation guidance, highest-severity findings first
    pub recommendations: Vec<String>,
    /// True when risk is critical or three or more indicators matched
    pub immediate_action_required: bool,
    /// A US-formatted phone number appears in the text (recorded, not scored)
    pub contains_phone_number: bool,
}

impl RiskAssessment {
    /// Names of the indicators that matched
    pub fn matched_categories(&self) -> Vec<&str> {
        self.indicators
            .iter()
            .filter(|i| i.matched)
            .map(|i| i.category.as_str())
            .collect()
    }
}

/// Three-bucket verdict from the quick pre-filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Safe,
    Suspicious,
    Dangerous,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Safe => write!(f, "SAFE"),
            Verdict::Suspicious => write!(f, "SUSPICIOUS"),
            Verdict::Dangerous => write!(f, "DANGEROUS"),
        }
    }
}

/// Errors the risk engine can surface.
///
/// Failures are always reported to the caller; an error never degrades into
/// a default "safe" assessment.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("input is not plain text")]
    InvalidInput,
    #[error("input is {size} bytes, maximum is {max}")]
    InputTooLarge { size: usize, max: usize },
}

/// Configuration for the ScamShield daemon and CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database path
    pub db_path: PathBuf,
    /// Optional pattern catalog override (YAML)
    pub catalog_path: Option<PathBuf>,
    /// Report retention days
    pub retention_days: u32,
    /// API server port
    pub server_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            db_path: home.join(".scamshield").join("scamshield.db"),
            catalog_path: None,
            retention_days: 90,
            server_port: 8480,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}
