//! Honeypot conversation agent
//!
//! Features:
//! - Layered reply policy: contextual overrides, intelligence-satisfied
//!   stalling, a scripted narrative arc, and an infinite engagement loop
//! - Trigger-table scanning with the early-turn guard
//! - The per-session engagement pipeline coupling detection, ledger
//!   merging, and reply selection into one sequential pass
//!
//! All operations are total: any text input, including empty text, yields
//! a best-effort reply rather than an error.

pub mod agent;
pub mod engagement;
pub mod triggers;

pub use agent::{AgentConfig, HoneypotAgent};
pub use engagement::{Engagement, ExchangeOutcome};
pub use triggers::active_trigger;
