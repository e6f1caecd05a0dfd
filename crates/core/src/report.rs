//! Final-report payload for the evaluation callback
//!
//! The core exposes the data and the trigger predicate; delivery itself is
//! the reporting collaborator's job.

use serde::{Deserialize, Serialize};

use crate::ledger::IntelligenceLedger;
use crate::session::SessionState;
use crate::signal::SignalCategory;

/// Distinct extracted values per category, as the callback wire format
/// expects them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedIntelligence {
    pub bank_accounts: Vec<String>,
    pub upi_ids: Vec<String>,
    pub phishing_links: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub ifsc_codes: Vec<String>,
    pub suspicious_keywords: Vec<String>,
}

impl ExtractedIntelligence {
    pub fn from_ledger(ledger: &IntelligenceLedger) -> Self {
        Self {
            bank_accounts: ledger.values(SignalCategory::BankAccount),
            upi_ids: ledger.values(SignalCategory::Upi),
            phishing_links: ledger.values(SignalCategory::Link),
            phone_numbers: ledger.values(SignalCategory::Phone),
            ifsc_codes: ledger.values(SignalCategory::Ifsc),
            suspicious_keywords: ledger.values(SignalCategory::Keyword),
        }
    }
}

/// The payload delivered to the evaluation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub session_id: String,
    pub scam_detected: bool,
    pub total_messages_exchanged: u32,
    pub extracted_intelligence: ExtractedIntelligence,
    pub agent_notes: String,
}

impl FinalReport {
    /// Assemble a report from the session and ledger snapshots
    pub fn build(session: &SessionState, ledger: &IntelligenceLedger) -> Self {
        Self {
            session_id: session.id().to_string(),
            scam_detected: session.scam_detected(),
            total_messages_exchanged: session.turn_count(),
            extracted_intelligence: ExtractedIntelligence::from_ledger(ledger),
            agent_notes: "Automated honeypot engagement.".to_string(),
        }
    }
}

/// Whether the reporting collaborator should deliver now.
///
/// Fires once the scam verdict has latched, the conversation has run at
/// least `min_turns`, and the ledger holds anything at all. An explicit
/// end-of-conversation signal from the agent also qualifies (vacuous under
/// the canonical never-terminate policy, but part of the contract).
pub fn report_due(
    session: &SessionState,
    ledger: &IntelligenceLedger,
    min_turns: u32,
    end_conversation: bool,
) -> bool {
    if end_conversation {
        return true;
    }
    session.scam_detected() && session.turn_count() >= min_turns && !ledger.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored_session(turns: u32, scam: bool) -> SessionState {
        let mut session = SessionState::new("s-1");
        for _ in 0..turns {
            session.increment_turn();
        }
        if scam {
            session.mark_scam_detected();
        }
        session
    }

    fn ledger_with_upi() -> IntelligenceLedger {
        let mut ledger = IntelligenceLedger::new();
        ledger.merge(SignalCategory::Upi, ["fraud@okbank"]);
        ledger
    }

    #[test]
    fn test_not_due_below_turn_threshold() {
        let session = scored_session(3, true);
        assert!(!report_due(&session, &ledger_with_upi(), 7, false));
    }

    #[test]
    fn test_not_due_with_empty_ledger() {
        let session = scored_session(10, true);
        assert!(!report_due(&session, &IntelligenceLedger::new(), 7, false));
    }

    #[test]
    fn test_not_due_without_scam_verdict() {
        let session = scored_session(10, false);
        assert!(!report_due(&session, &ledger_with_upi(), 7, false));
    }

    #[test]
    fn test_due_when_all_conditions_hold() {
        let session = scored_session(7, true);
        assert!(report_due(&session, &ledger_with_upi(), 7, false));
    }

    #[test]
    fn test_end_conversation_forces_delivery() {
        let session = scored_session(1, false);
        assert!(report_due(&session, &IntelligenceLedger::new(), 7, true));
    }

    #[test]
    fn test_report_payload_shape() {
        let session = scored_session(8, true);
        let mut ledger = ledger_with_upi();
        ledger.merge(SignalCategory::Phone, ["9876543210"]);

        let report = FinalReport::build(&session, &ledger);
        assert_eq!(report.session_id, "s-1");
        assert!(report.scam_detected);
        assert_eq!(report.total_messages_exchanged, 8);
        assert_eq!(report.extracted_intelligence.upi_ids, vec!["fraud@okbank"]);
        assert_eq!(report.extracted_intelligence.phone_numbers, vec!["9876543210"]);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("sessionId").is_some());
        assert!(json.get("extractedIntelligence").is_some());
        assert!(json["extractedIntelligence"].get("upiIds").is_some());
    }
}
