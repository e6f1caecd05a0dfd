//! Narrative states and trigger kinds
//!
//! The agent derives its behavior each turn instead of walking a single
//! enum; the state tag records which policy branch produced a reply. It is
//! observability data, not control data.

use serde::{Deserialize, Serialize, Serializer};

/// Contextual trigger categories scanned against each inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Threats of police, arrest, or legal consequences
    LegalThreat,
    /// Demands for an OTP, PIN, CVV, or verification code
    OtpRequest,
    /// Instructions to click a link or install an app
    TechIssue,
    /// Talk of balances, deductions, fees, or fines
    FinancialWorry,
    /// Time pressure and hurry-up language
    UrgencyPressure,
    /// Demands that the victim hand over details
    ComplianceRequest,
    /// The scammer checking whether the victim is still following
    Confusion,
}

impl TriggerKind {
    pub fn name(&self) -> &'static str {
        match self {
            TriggerKind::LegalThreat => "legal_threat",
            TriggerKind::OtpRequest => "otp_request",
            TriggerKind::TechIssue => "tech_issue",
            TriggerKind::FinancialWorry => "financial_worry",
            TriggerKind::UrgencyPressure => "urgency_pressure",
            TriggerKind::ComplianceRequest => "compliance_request",
            TriggerKind::Confusion => "confusion",
        }
    }

    /// Legal threats bypass the early-turn guard: the persona must react
    /// to them immediately, even on first contact
    pub fn always_fires(&self) -> bool {
        matches!(self, TriggerKind::LegalThreat)
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Modes of the post-arc infinite loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    Stall,
    Confusion,
    Bait,
}

impl LoopMode {
    pub fn name(&self) -> &'static str {
        match self {
            LoopMode::Stall => "stall",
            LoopMode::Confusion => "confusion",
            LoopMode::Bait => "bait",
        }
    }
}

impl std::fmt::Display for LoopMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which policy branch produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeState {
    /// Turns 0-1: immediate panic
    Opening,
    /// Turn 2: fear, asking what to do
    Probing,
    /// Turns 3 and 5: requesting the scammer's own payment details
    Extraction,
    /// Turn 4: compliance signal
    Baiting,
    /// Generic delay inside the narrative arc
    Stalling,
    /// Holding pattern after intelligence has been captured
    StallingForever,
    /// A contextual trigger override fired
    Reacting(TriggerKind),
    /// Post-arc randomized engagement loop
    InfiniteLoop(LoopMode),
}

impl NarrativeState {
    /// The flat string tag recorded with each reply
    pub fn tag(&self) -> String {
        match self {
            NarrativeState::Opening => "opening".to_string(),
            NarrativeState::Probing => "probing".to_string(),
            NarrativeState::Extraction => "extraction".to_string(),
            NarrativeState::Baiting => "baiting".to_string(),
            NarrativeState::Stalling => "stalling".to_string(),
            NarrativeState::StallingForever => "stalling_forever".to_string(),
            NarrativeState::Reacting(kind) => format!("reacting_{}", kind.name()),
            NarrativeState::InfiniteLoop(mode) => format!("infinite_loop_{}", mode.name()),
        }
    }
}

impl std::fmt::Display for NarrativeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl Serialize for NarrativeState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

/// The agent's output for one turn
#[derive(Debug, Clone, Serialize)]
pub struct AgentReply {
    /// Text to send back to the scammer
    pub text: String,
    /// Which branch produced it
    pub state: NarrativeState,
    /// Whether the agent asks the service to end the conversation.
    /// Always false under the canonical engagement policy: the loop runs
    /// until an external cutoff.
    pub end_conversation: bool,
}

impl AgentReply {
    pub fn new(text: impl Into<String>, state: NarrativeState) -> Self {
        Self {
            text: text.into(),
            state,
            end_conversation: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_tags() {
        assert_eq!(NarrativeState::Opening.tag(), "opening");
        assert_eq!(NarrativeState::StallingForever.tag(), "stalling_forever");
        assert_eq!(
            NarrativeState::Reacting(TriggerKind::LegalThreat).tag(),
            "reacting_legal_threat"
        );
        assert_eq!(
            NarrativeState::InfiniteLoop(LoopMode::Bait).tag(),
            "infinite_loop_bait"
        );
    }

    #[test]
    fn test_legal_threat_always_fires() {
        assert!(TriggerKind::LegalThreat.always_fires());
        assert!(!TriggerKind::OtpRequest.always_fires());
        assert!(!TriggerKind::Confusion.always_fires());
    }

    #[test]
    fn test_reply_never_terminates() {
        let reply = AgentReply::new("one second...", NarrativeState::Stalling);
        assert!(!reply.end_conversation);
    }
}
