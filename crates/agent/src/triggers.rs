//! Contextual override selection
//!
//! The highest-priority layer of the reply policy: a victim persona must
//! react in-context to direct threats and questions rather than follow a
//! script out of order. The early-turn guard keeps overrides from firing
//! on first contact, with legal threats as the one exemption.

use honeypot_config::TriggerTable;
use honeypot_core::TriggerKind;

/// The trigger that should override this turn, if any.
///
/// Rules are scanned in table order and the first one that both matches
/// the message and passes the turn guard wins. Non-legal triggers require
/// `turn_index > 1`.
pub fn active_trigger(table: &TriggerTable, turn_index: u32, text: &str) -> Option<TriggerKind> {
    table
        .scan(text)
        .into_iter()
        .find(|kind| turn_index > 1 || kind.always_fires())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_threat_fires_on_first_contact() {
        let table = TriggerTable::default();
        assert_eq!(
            active_trigger(&table, 0, "the police are coming for you"),
            Some(TriggerKind::LegalThreat)
        );
    }

    #[test]
    fn test_other_triggers_wait_for_turn_two() {
        let table = TriggerTable::default();
        assert_eq!(active_trigger(&table, 0, "share the otp"), None);
        assert_eq!(active_trigger(&table, 1, "share the otp"), None);
        assert_eq!(
            active_trigger(&table, 2, "share the otp"),
            Some(TriggerKind::OtpRequest)
        );
    }

    #[test]
    fn test_legal_threat_outranks_co_occurring_triggers() {
        let table = TriggerTable::default();
        assert_eq!(
            active_trigger(&table, 0, "send the otp or face arrest"),
            Some(TriggerKind::LegalThreat)
        );
    }

    #[test]
    fn test_no_trigger_on_plain_text() {
        let table = TriggerTable::default();
        assert_eq!(active_trigger(&table, 5, "good evening"), None);
    }
}
