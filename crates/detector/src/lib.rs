//! Heuristic scam detection
//!
//! Pairs the per-message signal extractor with the additive risk scorer.
//! Detection and intelligence persistence are one pass: every analyzed
//! message folds its findings into the conversation's ledger regardless of
//! that message's individual verdict, because a low-scoring message can
//! still carry a usable account number.

pub mod extractor;
pub mod scorer;

pub use extractor::{SignalExtractor, SUSPICIOUS_KEYWORDS};
pub use scorer::{RiskScorer, SCAM_THRESHOLD};

use honeypot_core::{IntelligenceLedger, RiskAssessment};

/// Extractor + scorer facade
#[derive(Debug, Clone, Copy, Default)]
pub struct ScamDetector {
    extractor: SignalExtractor,
    scorer: RiskScorer,
}

impl ScamDetector {
    pub fn new() -> Self {
        Self {
            extractor: SignalExtractor::new(),
            scorer: RiskScorer::new(),
        }
    }

    /// Analyze one message and merge its findings into the ledger.
    pub fn analyze_message(
        &self,
        text: &str,
        ledger: &mut IntelligenceLedger,
    ) -> RiskAssessment {
        let findings = self.extractor.extract(text);
        let assessment = self.scorer.score(text, findings);
        ledger.absorb(&assessment.extracted);

        tracing::debug!(
            risk_score = assessment.risk_score,
            is_scam = assessment.is_scam,
            flags = assessment.flags.len(),
            "message analyzed"
        );

        assessment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use honeypot_core::SignalCategory;

    #[test]
    fn test_low_scoring_message_still_feeds_ledger() {
        let detector = ScamDetector::new();
        let mut ledger = IntelligenceLedger::new();

        let assessment = detector.analyze_message("my number is 9876543210", &mut ledger);

        assert!(!assessment.is_scam);
        assert!(ledger.has(SignalCategory::Phone));
    }

    #[test]
    fn test_ledger_accumulates_across_messages() {
        let detector = ScamDetector::new();
        let mut ledger = IntelligenceLedger::new();

        detector.analyze_message("pay to first@okbank", &mut ledger);
        detector.analyze_message("or use second@okbank", &mut ledger);

        assert_eq!(ledger.count(SignalCategory::Upi), 2);
    }

    #[test]
    fn test_analyzing_same_message_twice_is_idempotent_for_ledger() {
        let detector = ScamDetector::new();
        let mut ledger = IntelligenceLedger::new();

        detector.analyze_message("reach me at fraud@okaxis", &mut ledger);
        let once = ledger.serialize_category(SignalCategory::Upi);

        detector.analyze_message("reach me at fraud@okaxis", &mut ledger);
        let twice = ledger.serialize_category(SignalCategory::Upi);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_message_is_no_signal_not_a_fault() {
        let detector = ScamDetector::new();
        let mut ledger = IntelligenceLedger::new();

        let assessment = detector.analyze_message("", &mut ledger);

        assert_eq!(assessment.risk_score, 0);
        assert!(!assessment.is_scam);
        assert!(ledger.is_empty());
    }
}
