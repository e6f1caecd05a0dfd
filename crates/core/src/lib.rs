//! Core types for the scam-engagement honeypot
//!
//! This crate provides the foundational types used across all other crates:
//! - Signal categories, per-message finding sets, and risk assessments
//! - The append-only per-session intelligence ledger
//! - Session state with the monotonic scam flag and transcript
//! - Narrative states, trigger kinds, and agent replies
//! - The final-report payload and its delivery predicate
//!
//! Everything here is pure in-memory data: no I/O, no async, and no
//! operation that can fail for arbitrary text input.

pub mod ledger;
pub mod narrative;
pub mod report;
pub mod session;
pub mod signal;

pub use ledger::{IntelSummary, IntelligenceLedger};
pub use narrative::{AgentReply, LoopMode, NarrativeState, TriggerKind};
pub use report::{report_due, ExtractedIntelligence, FinalReport};
pub use session::{Sender, SessionState, TranscriptEntry};
pub use signal::{FindingSet, RiskAssessment, RiskFlag, SignalCategory};
