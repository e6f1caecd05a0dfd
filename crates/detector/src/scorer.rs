//! Risk scoring
//!
//! Additive, not probabilistic: every matched signal contributes a fixed
//! point value and the sum is compared against a constant threshold. The
//! point table is behavioral contract; retuning any value changes which
//! messages cross the verdict line.

use std::collections::BTreeSet;

use honeypot_core::{FindingSet, RiskAssessment, RiskFlag, SignalCategory};

/// Score at or above which a message is judged a scam
pub const SCAM_THRESHOLD: u32 = 40;

/// Points per distinct keyword hit
const KEYWORD_POINTS: u32 = 10;

const URGENCY_WORDS: &[&str] = &["urgent", "immediately", "now", "quickly", "hurry"];
const THREAT_WORDS: &[&str] = &["blocked", "suspended", "frozen", "arrest", "legal action"];
const VERIFY_WORDS: &[&str] = &["verify", "confirm", "update", "click", "link"];

fn contains_any(text_lower: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text_lower.contains(w))
}

/// Converts findings plus combinatorial heuristics into a verdict
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScorer;

impl RiskScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score one message's findings.
    ///
    /// Takes the raw text as well: the combination heuristics test the
    /// message itself, not just the extracted values.
    pub fn score(&self, text: &str, findings: FindingSet) -> RiskAssessment {
        if text.is_empty() {
            return RiskAssessment::none();
        }

        let text_lower = text.to_lowercase();
        let mut risk_score = KEYWORD_POINTS * findings.count(SignalCategory::Keyword) as u32;
        let mut flags = BTreeSet::new();

        let has_urgency = contains_any(&text_lower, URGENCY_WORDS);
        let has_threat = contains_any(&text_lower, THREAT_WORDS);
        let has_verify = contains_any(&text_lower, VERIFY_WORDS);

        if has_urgency && has_threat {
            risk_score += 20;
            flags.insert(RiskFlag::UrgencyWithThreat);
        }
        if has_verify && has_threat {
            risk_score += 15;
            flags.insert(RiskFlag::VerifyWithThreat);
        }

        if findings.has_payment_identifier() {
            risk_score += 30;
            flags.insert(RiskFlag::PaymentRequest);
        }

        if findings.has(SignalCategory::Link) {
            risk_score += 40;
            flags.insert(RiskFlag::PhishingLink);
            if has_urgency {
                risk_score += 10;
            }
        }

        if findings.has(SignalCategory::Phone) {
            risk_score += 10;
            flags.insert(RiskFlag::ContactSharing);
        }

        // Three or more independent indicators at once is high confidence
        let indicator_count = [
            findings.has(SignalCategory::Upi),
            findings.has(SignalCategory::BankAccount),
            findings.has(SignalCategory::Link),
            findings.has(SignalCategory::Keyword),
            has_urgency,
            has_threat,
        ]
        .iter()
        .filter(|present| **present)
        .count();

        if indicator_count >= 3 {
            risk_score += 20;
            flags.insert(RiskFlag::MultipleIndicators);
        }

        RiskAssessment {
            is_scam: risk_score >= SCAM_THRESHOLD,
            risk_score,
            flags,
            extracted: findings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::SignalExtractor;

    fn assess(text: &str) -> RiskAssessment {
        let findings = SignalExtractor::new().extract(text);
        RiskScorer::new().score(text, findings)
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let assessment = assess("");
        assert_eq!(assessment.risk_score, 0);
        assert!(!assessment.is_scam);
        assert!(assessment.flags.is_empty());
    }

    #[test]
    fn test_link_with_urgency_keyword_clears_threshold() {
        let assessment = assess("urgent: complete it at http://phish.example");

        // 10 (keyword "urgent") + 40 (link) + 10 (link with urgency),
        // plus the multiple-indicators bonus
        assert!(assessment.risk_score >= SCAM_THRESHOLD);
        assert!(assessment.is_scam);
        assert!(assessment.has_flag(RiskFlag::PhishingLink));
    }

    #[test]
    fn test_benign_text_scores_zero() {
        let assessment = assess("see you at dinner tonight");
        assert_eq!(assessment.risk_score, 0);
        assert!(!assessment.is_scam);
    }

    #[test]
    fn test_repeated_keyword_scores_once() {
        let assessment = assess("urgent urgent urgent");
        assert_eq!(assessment.risk_score, KEYWORD_POINTS);
        assert!(!assessment.is_scam);
    }

    #[test]
    fn test_urgency_with_threat_combination() {
        let assessment = assess("act immediately, your number is suspended");
        assert!(assessment.has_flag(RiskFlag::UrgencyWithThreat));
    }

    #[test]
    fn test_payment_identifier_raises_flag() {
        let assessment = assess("pay the release fee to scammer@okhdfc");
        assert!(assessment.has_flag(RiskFlag::PaymentRequest));
        assert!(assessment.risk_score >= 30);
    }

    #[test]
    fn test_canonical_blocked_account_message() {
        let assessment =
            assess("Your account is blocked, verify now at http://fake.link or call 9876543210");

        assert!(assessment.is_scam);
        assert!(assessment.risk_score >= 70);
        assert!(assessment.has_flag(RiskFlag::PhishingLink));
        assert!(assessment.has_flag(RiskFlag::ContactSharing));
        assert!(assessment.has_flag(RiskFlag::MultipleIndicators));
        // The bare 10-digit number doubles as a bank-account match, which
        // the payment_request flag faithfully reflects.
        assert!(assessment.has_flag(RiskFlag::PaymentRequest));
        assert!(assessment.extracted.has(SignalCategory::Phone));
        assert!(assessment.extracted.has(SignalCategory::BankAccount));
    }
}
