//! PII scrubbing for submitted messages
//!
//! Reports are persisted scrubbed: SSNs, card numbers, emails, phone
//! numbers, and bank account numbers are replaced with placeholders before
//! anything touches the database. Kinds run in a fixed priority order so
//! overlapping digit runs resolve the same way every time (a card number
//! must not be left behind for the account pattern to half-redact).

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kinds of PII the scrubber redacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiKind {
    Ssn,
    CreditCard,
    Phone,
    Email,
    BankAccount,
}

impl PiiKind {
    fn placeholder(&self) -> &'static str {
        match self {
            PiiKind::Ssn => "[SSN]",
            PiiKind::CreditCard => "[CARD]",
            PiiKind::Phone => "[PHONE]",
            PiiKind::Email => "[EMAIL]",
            PiiKind::BankAccount => "[ACCOUNT]",
        }
    }
}

impl std::fmt::Display for PiiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PiiKind::Ssn => write!(f, "ssn"),
            PiiKind::CreditCard => write!(f, "credit_card"),
            PiiKind::Phone => write!(f, "phone"),
            PiiKind::Email => write!(f, "email"),
            PiiKind::BankAccount => write!(f, "bank_account"),
        }
    }
}

/// Scrubbed text plus the kinds that were found
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubResult {
    pub text: String,
    pub detected: Vec<PiiKind>,
}

pub struct PiiScrubber {
    // Priority order: structured digit formats before the broad account run
    patterns: Vec<(PiiKind, Regex)>,
}

impl PiiScrubber {
    pub fn new() -> Self {
        let table = [
            (PiiKind::Ssn, r"\b\d{3}[-\s]\d{2}[-\s]\d{4}\b"),
            (PiiKind::CreditCard, r"\b(?:\d{4}[-\s]?){3}\d{4}\b"),
            (
                PiiKind::Phone,
                r"(\+?1[-.\s]?)?(\(\d{3}\)|\b\d{3})[-.\s]\d{3}[-.\s]?\d{4}\b",
            ),
            (
                PiiKind::Email,
                r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
            ),
            (PiiKind::BankAccount, r"\b\d{8,17}\b"),
        ];
        // The table is fixed at compile time; dropping a rule here would
        // mean storing un-redacted content, so a bad pattern is a panic,
        // not a skip
        let patterns = table
            .into_iter()
            .map(|(kind, p)| {
                let re = Regex::new(p).expect("PII pattern is valid");
                (kind, re)
            })
            .collect();
        Self { patterns }
    }

    /// Redact all detected PII, returning the scrubbed text and what was found
    pub fn scrub(&self, text: &str) -> ScrubResult {
        let mut scrubbed = text.to_string();
        let mut detected = Vec::new();

        for (kind, re) in &self.patterns {
            if !re.is_match(&scrubbed) {
                continue;
            }
            // Card-length digit runs that fail the Luhn check are left for
            // the later, lower-priority kinds to classify
            if *kind == PiiKind::CreditCard {
                let mut replaced_any = false;
                let mut out = String::with_capacity(scrubbed.len());
                let mut last = 0;
                for m in re.find_iter(&scrubbed) {
                    out.push_str(&scrubbed[last..m.start()]);
                    if luhn_check(m.as_str()) {
                        out.push_str(kind.placeholder());
                        replaced_any = true;
                    } else {
                        out.push_str(m.as_str());
                    }
                    last = m.end();
                }
                out.push_str(&scrubbed[last..]);
                scrubbed = out;
                if replaced_any {
                    detected.push(*kind);
                }
            } else {
                scrubbed = re.replace_all(&scrubbed, kind.placeholder()).into_owned();
                detected.push(*kind);
            }
        }

        ScrubResult {
            text: scrubbed,
            detected,
        }
    }
}

impl Default for PiiScrubber {
    fn default() -> Self {
        Self::new()
    }
}

/// Luhn checksum over the digits of a candidate card number
fn luhn_check(number: &str) -> bool {
    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }
    let mut sum = 0u32;
    let mut double = false;
    for &digit in digits.iter().rev() {
        let mut d = digit;
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }
    sum % 10 == 0
}
