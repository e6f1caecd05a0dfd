//! Honeypot conversation agent
//!
//! Selects each reply through a layered policy, in strict priority order:
//! 1. Contextual trigger override (react in-context to the message)
//! 2. Intelligence-satisfied stalling (freeze once payment/contact
//!    intelligence is captured)
//! 3. Scripted narrative arc for the early turns
//! 4. Infinite randomized stalling loop, forever
//!
//! The agent never signals an end of conversation; engagement runs until
//! the surrounding service cuts it off.

use rand::seq::SliceRandom;

use honeypot_config::{ScriptKind, ScriptLibrary, TriggerReplies, TriggerTable};
use honeypot_core::{AgentReply, IntelSummary, LoopMode, NarrativeState};

use crate::triggers::active_trigger;

/// Agent configuration: the immutable text banks and trigger table
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    pub scripts: ScriptLibrary,
    pub trigger_replies: TriggerReplies,
    pub triggers: TriggerTable,
}

/// The panicked-victim persona
#[derive(Debug, Clone, Default)]
pub struct HoneypotAgent {
    config: AgentConfig,
}

impl HoneypotAgent {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    /// Produce the reply for one inbound message.
    ///
    /// `turn_index` is the number of messages fully processed before this
    /// one (0 on first contact).
    pub fn reply(&self, turn_index: u32, text: &str, intel: IntelSummary) -> AgentReply {
        // Layer 1: contextual override
        if let Some(kind) = active_trigger(&self.config.triggers, turn_index, text) {
            tracing::debug!(turn = turn_index, trigger = %kind, "contextual override");
            return AgentReply::new(
                self.pick(self.config.trigger_replies.pool(kind)),
                NarrativeState::Reacting(kind),
            );
        }

        // Layer 2: once intelligence is captured, freeze in a holding
        // pattern; further narrative progression risks tipping the scammer
        if intel.has_intelligence() {
            return AgentReply::new(
                self.pick(self.config.scripts.pool(ScriptKind::Stall)),
                NarrativeState::StallingForever,
            );
        }

        // Layer 3: scripted narrative arc. Panic first; a request for the
        // scammer's own payment details is only credible after it.
        match turn_index {
            0 | 1 => self.scripted(ScriptKind::Opening, NarrativeState::Opening),
            2 => self.scripted(ScriptKind::Probe, NarrativeState::Probing),
            3 => self.scripted(ScriptKind::Extract, NarrativeState::Extraction),
            4 => self.scripted(ScriptKind::Bait, NarrativeState::Baiting),
            5 => self.scripted(ScriptKind::Extract, NarrativeState::Extraction),
            // Layer 4: past the arc, loop forever
            _ => self.infinite_loop(),
        }
    }

    fn scripted(&self, kind: ScriptKind, state: NarrativeState) -> AgentReply {
        AgentReply::new(self.pick(self.config.scripts.pool(kind)), state)
    }

    /// Weighted choice among the loop modes: stall 60%, confusion 20%,
    /// bait 20%, by literal weight list
    fn infinite_loop(&self) -> AgentReply {
        const LOOP_MODES: [LoopMode; 5] = [
            LoopMode::Stall,
            LoopMode::Stall,
            LoopMode::Stall,
            LoopMode::Confusion,
            LoopMode::Bait,
        ];

        let mode = LOOP_MODES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(LoopMode::Stall);

        let kind = match mode {
            LoopMode::Stall => ScriptKind::Stall,
            LoopMode::Confusion => ScriptKind::Confusion,
            LoopMode::Bait => ScriptKind::Bait,
        };

        AgentReply::new(
            self.pick(self.config.scripts.pool(kind)),
            NarrativeState::InfiniteLoop(mode),
        )
    }

    /// Uniform pick from a pool
    fn pick(&self, pool: &[String]) -> String {
        pool.choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> HoneypotAgent {
        HoneypotAgent::default()
    }

    fn no_intel() -> IntelSummary {
        IntelSummary::default()
    }

    fn upi_captured() -> IntelSummary {
        IntelSummary {
            has_upi: true,
            ..IntelSummary::default()
        }
    }

    #[test]
    fn test_opening_on_first_contact() {
        let agent = agent();
        let reply = agent.reply(0, "your sim card will be deactivated", no_intel());

        assert_eq!(reply.state, NarrativeState::Opening);
        assert!(ScriptLibrary::default().opening.contains(&reply.text));
        assert!(!reply.end_conversation);
    }

    #[test]
    fn test_narrative_arc_order() {
        let agent = agent();
        assert_eq!(agent.reply(1, "ok", no_intel()).state, NarrativeState::Opening);
        assert_eq!(agent.reply(2, "ok", no_intel()).state, NarrativeState::Probing);
        assert_eq!(agent.reply(3, "ok", no_intel()).state, NarrativeState::Extraction);
        assert_eq!(agent.reply(4, "ok", no_intel()).state, NarrativeState::Baiting);
        assert_eq!(agent.reply(5, "ok", no_intel()).state, NarrativeState::Extraction);
    }

    #[test]
    fn test_override_beats_scripted_branch() {
        let agent = agent();
        let reply = agent.reply(5, "pay now or the police will come", no_intel());

        assert_eq!(reply.state.tag(), "reacting_legal_threat");
        assert!(TriggerReplies::default().legal_threat.contains(&reply.text));
    }

    #[test]
    fn test_override_guard_holds_on_early_turns() {
        let agent = agent();
        // OTP demand on first contact: guard suppresses the override and
        // the opening panic fires instead.
        let reply = agent.reply(0, "tell us the otp", no_intel());
        assert_eq!(reply.state, NarrativeState::Opening);
    }

    #[test]
    fn test_intelligence_freeze() {
        let agent = agent();
        for turn in [2, 3, 4, 5, 9, 40] {
            let reply = agent.reply(turn, "ok", upi_captured());
            assert_eq!(reply.state, NarrativeState::StallingForever, "turn {}", turn);
            assert!(ScriptLibrary::default().stall.contains(&reply.text));
        }
    }

    #[test]
    fn test_override_still_beats_intelligence_freeze() {
        let agent = agent();
        let reply = agent.reply(7, "we will arrest you today", upi_captured());
        assert_eq!(reply.state.tag(), "reacting_legal_threat");
    }

    #[test]
    fn test_infinite_loop_states_and_pools() {
        let agent = agent();
        let scripts = ScriptLibrary::default();

        for _ in 0..50 {
            let reply = agent.reply(6, "ok", no_intel());
            assert!(reply.state.tag().starts_with("infinite_loop_"));
            assert!(!reply.end_conversation);

            let in_some_pool = scripts.stall.contains(&reply.text)
                || scripts.confusion.contains(&reply.text)
                || scripts.bait.contains(&reply.text);
            assert!(in_some_pool, "reply not from a loop pool: {}", reply.text);
        }
    }

    #[test]
    fn test_loop_never_ends_conversation() {
        let agent = agent();
        for turn in 6..30 {
            assert!(!agent.reply(turn, "ok", no_intel()).end_conversation);
        }
    }
}
