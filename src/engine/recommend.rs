//! Recommendation generator
//!
//! Maps matched indicators to fixed remediation guidance, highest severity
//! first, always closing with the two generic recommendations.

use crate::Indicator;

const CLOSING: [&str; 2] = [
    "Talk it over with a family member or trusted friend before taking any action.",
    "Report suspected scams to the FTC at reportfraud.ftc.gov.",
];

fn guidance_for(category: &str) -> &'static [&'static str] {
    match category {
        "sensitive_info" => &[
            "Never share your Social Security number, account numbers, or passwords with anyone who contacted you first.",
            "Legitimate organizations never ask for full credentials by phone or text.",
        ],
        "authority" => &[
            "Government agencies contact people by mail, not with threatening calls or texts.",
            "Hang up and call the agency yourself using the number on its official website.",
        ],
        "financial" => &[
            "Do not send money, wire transfers, or cryptocurrency to anyone you have not met.",
            "Never pay a fee with gift cards. No legitimate business or agency accepts gift cards as payment.",
        ],
        "tech_support" => &[
            "Real tech companies do not call you about viruses on your computer.",
            "Never give anyone remote access to your device.",
        ],
        "prize" => &[
            "If you must pay to claim a prize, it is not a prize.",
        ],
        "investment" => &[
            "Guaranteed high returns are a hallmark of investment fraud. Walk away.",
        ],
        "urgency" => &[
            "Scammers create pressure so you act before thinking. Slow down.",
        ],
        "romance" => &[
            "Be cautious with online relationships that quickly turn into requests for money.",
        ],
        "shortened_link" => &[
            "Do not click shortened or unfamiliar links. Type the organization's address yourself.",
        ],
        "suspicious_caller" => &[
            "This number matches known scam calling patterns. Do not call it back.",
        ],
        _ => &[],
    }
}

/// Build the recommendation list for the matched indicators.
pub fn for_matched(matched: &[&Indicator]) -> Vec<String> {
    let mut ordered: Vec<&Indicator> = matched.to_vec();
    // Critical and high findings surface their guidance first; the sort is
    // stable so catalog order breaks ties
    ordered.sort_by(|a, b| b.severity.cmp(&a.severity));

    let mut recommendations: Vec<String> = Vec::new();
    for indicator in ordered {
        for &line in guidance_for(&indicator.category) {
            if !recommendations.iter().any(|r| r.as_str() == line) {
                recommendations.push(line.to_string());
            }
        }
    }

    for line in CLOSING {
        recommendations.push(line.to_string());
    }

    recommendations
}
