//! Contextual trigger tables
//!
//! Each rule pairs a trigger kind with the phrases that fire it. Matching
//! is a lower-cased substring scan, the same cheap test the detector's
//! keyword pass uses. Rules are scanned in table order; the first hit wins.

use honeypot_core::TriggerKind;
use serde::{Deserialize, Serialize};

/// One trigger rule: a kind and the phrases that activate it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRule {
    pub kind: TriggerKind,
    pub phrases: Vec<String>,
}

impl TriggerRule {
    fn new(kind: TriggerKind, phrases: &[&str]) -> Self {
        Self {
            kind,
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Whether any phrase occurs in the (already lower-cased) text
    pub fn matches(&self, text_lower: &str) -> bool {
        self.phrases.iter().any(|p| text_lower.contains(p.as_str()))
    }
}

/// The ordered trigger table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerTable {
    pub rules: Vec<TriggerRule>,
}

impl Default for TriggerTable {
    fn default() -> Self {
        Self {
            rules: vec![
                // Legal threats lead: they are the one rule exempt from the
                // early-turn guard and must win over co-occurring matches.
                TriggerRule::new(
                    TriggerKind::LegalThreat,
                    &[
                        "police", "arrest", "warrant", "legal action", "court", "jail",
                        "lawyer", "cyber cell",
                    ],
                ),
                TriggerRule::new(
                    TriggerKind::OtpRequest,
                    &["otp", "one time password", "verification code", "pin", "cvv", "passcode"],
                ),
                TriggerRule::new(
                    TriggerKind::TechIssue,
                    &[
                        "click", "link", "install", "download", "app", "anydesk",
                        "teamviewer", "screen share", "apk",
                    ],
                ),
                TriggerRule::new(
                    TriggerKind::FinancialWorry,
                    &[
                        "money", "balance", "savings", "deduct", "charge", "fee", "fine",
                        "penalty",
                    ],
                ),
                TriggerRule::new(
                    TriggerKind::UrgencyPressure,
                    &[
                        "hurry", "quickly", "fast", "immediately", "right now",
                        "last warning", "final warning", "time is running out",
                    ],
                ),
                TriggerRule::new(
                    TriggerKind::ComplianceRequest,
                    &[
                        "send me", "share your", "give me", "provide your", "tell me your",
                        "we need your", "submit your",
                    ],
                ),
                TriggerRule::new(
                    TriggerKind::Confusion,
                    &[
                        "are you there", "you there", "hello?", "did you", "have you",
                        "can you hear", "still waiting",
                    ],
                ),
            ],
        }
    }
}

impl TriggerTable {
    /// Trigger kinds matched by this message, in table order
    pub fn scan(&self, text: &str) -> Vec<TriggerKind> {
        let text_lower = text.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.matches(&text_lower))
            .map(|rule| rule.kind)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_threat_scans_first() {
        let table = TriggerTable::default();
        let matched = table.scan("Police will arrest you, click this link now");
        assert_eq!(matched.first(), Some(&TriggerKind::LegalThreat));
        assert!(matched.contains(&TriggerKind::TechIssue));
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        let table = TriggerTable::default();
        let matched = table.scan("SEND ME YOUR details IMMEDIATELY");
        assert!(matched.contains(&TriggerKind::ComplianceRequest));
        assert!(matched.contains(&TriggerKind::UrgencyPressure));
    }

    #[test]
    fn test_no_match_on_plain_text() {
        let table = TriggerTable::default();
        assert!(table.scan("good morning, how is the weather").is_empty());
    }

    #[test]
    fn test_otp_phrases() {
        let table = TriggerTable::default();
        let matched = table.scan("read out the OTP you received");
        assert_eq!(matched, vec![TriggerKind::OtpRequest]);
    }
}
