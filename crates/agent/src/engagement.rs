//! Per-session engagement pipeline
//!
//! One inbound message runs the whole sequential pipeline: transcript
//! append, extraction and scoring with the coupled ledger merge, the
//! monotonic scam-flag update, reply selection, and the turn increment.
//! Pure in-memory computation; the caller owns serialization of access
//! per session.

use honeypot_core::{
    report_due, AgentReply, FinalReport, IntelligenceLedger, RiskAssessment, Sender,
    SessionState,
};
use honeypot_detector::ScamDetector;

use crate::agent::HoneypotAgent;

/// A session's conversation state and its accumulated intelligence
#[derive(Debug, Clone)]
pub struct Engagement {
    session: SessionState,
    ledger: IntelligenceLedger,
}

/// What one processed message produced
#[derive(Debug, Clone)]
pub struct ExchangeOutcome {
    pub reply: AgentReply,
    pub assessment: RiskAssessment,
}

impl Engagement {
    /// Start a fresh engagement for a session id
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session: SessionState::new(session_id),
            ledger: IntelligenceLedger::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn ledger(&self) -> &IntelligenceLedger {
        &self.ledger
    }

    /// Process one inbound scammer message end to end.
    pub fn process_message(
        &mut self,
        detector: &ScamDetector,
        agent: &HoneypotAgent,
        text: &str,
    ) -> ExchangeOutcome {
        self.session.record_message(Sender::Scammer, text);

        let assessment = detector.analyze_message(text, &mut self.ledger);
        if assessment.is_scam {
            self.session.mark_scam_detected();
        }

        // The agent reads the pre-increment turn index: 0 on first contact
        let reply = agent.reply(self.session.turn_count(), text, self.ledger.summary());

        self.session.increment_turn();
        self.session.record_message(Sender::Agent, &reply.text);

        tracing::debug!(
            session_id = %self.session.id(),
            turn = self.session.turn_count(),
            state = %reply.state,
            risk_score = assessment.risk_score,
            "exchange complete"
        );

        ExchangeOutcome { reply, assessment }
    }

    /// Whether the reporting collaborator should deliver now
    pub fn report_due(&self, min_turns: u32, end_conversation: bool) -> bool {
        report_due(&self.session, &self.ledger, min_turns, end_conversation)
    }

    /// Assemble the evaluation-callback payload
    pub fn final_report(&self) -> FinalReport {
        FinalReport::build(&self.session, &self.ledger)
    }
}
