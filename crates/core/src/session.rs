//! Session state for one scammer conversation
//!
//! Owned by the surrounding service; the detector and agent read it and
//! advance it through the setters here. The scam flag is monotonic and the
//! setters are the only write paths, so the invariants cannot be violated
//! from call sites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The suspected scam actor
    Scammer,
    /// The honeypot persona
    Agent,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Scammer => "scammer",
            Sender::Agent => "agent",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One message in the conversation transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Per-conversation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    id: String,
    turn_count: u32,
    scam_detected: bool,
    transcript: Vec<TranscriptEntry>,
    created_at: DateTime<Utc>,
}

impl SessionState {
    /// Create state for a new conversation
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            turn_count: 0,
            scam_detected: false,
            transcript: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of inbound messages fully processed so far
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn scam_detected(&self) -> bool {
        self.scam_detected
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Latch the scam flag.
    ///
    /// Monotonic: there is no way to clear it, so a later low-risk message
    /// can never un-detect an earlier verdict.
    pub fn mark_scam_detected(&mut self) {
        if !self.scam_detected {
            tracing::debug!(session_id = %self.id, "scam flag latched");
        }
        self.scam_detected = true;
    }

    /// Append a transcript entry
    pub fn record_message(&mut self, sender: Sender, text: impl Into<String>) {
        self.transcript.push(TranscriptEntry::new(sender, text));
    }

    /// Advance the turn counter; called exactly once per inbound message,
    /// after the reply has been produced
    pub fn increment_turn(&mut self) {
        self.turn_count += 1;
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_clean() {
        let session = SessionState::new("s-1");
        assert_eq!(session.id(), "s-1");
        assert_eq!(session.turn_count(), 0);
        assert!(!session.scam_detected());
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_scam_flag_is_monotonic() {
        let mut session = SessionState::new("s-1");
        session.mark_scam_detected();
        assert!(session.scam_detected());

        // A second latch attempt is a no-op either way; the flag has no
        // clear path at all.
        session.mark_scam_detected();
        assert!(session.scam_detected());
    }

    #[test]
    fn test_transcript_preserves_order_and_sender() {
        let mut session = SessionState::new("s-1");
        session.record_message(Sender::Scammer, "your account is blocked");
        session.record_message(Sender::Agent, "oh no, what do I do?");

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].sender, Sender::Scammer);
        assert_eq!(transcript[1].sender, Sender::Agent);
    }

    #[test]
    fn test_turn_counter() {
        let mut session = SessionState::new("s-1");
        session.increment_turn();
        session.increment_turn();
        assert_eq!(session.turn_count(), 2);
    }
}
