//! Per-session intelligence ledger
//!
//! Accumulates distinct extracted values across a conversation's lifetime.
//! The ledger is append-only: merges are idempotent set unions and a value,
//! once recorded, is never removed.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::signal::{FindingSet, SignalCategory};

/// Append-only accumulator of extracted intelligence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelligenceLedger {
    entries: BTreeMap<SignalCategory, BTreeSet<String>>,
}

impl IntelligenceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `values` into the stored set for `category`.
    ///
    /// Idempotent; blank tokens are filtered before storage. This is the
    /// only write path, so the never-shrinks invariant holds by
    /// construction.
    pub fn merge<I, S>(&mut self, category: SignalCategory, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.entries.entry(category).or_default();
        for value in values {
            let trimmed = value.as_ref().trim();
            if !trimmed.is_empty() {
                entry.insert(trimmed.to_string());
            }
        }
    }

    /// Fold an entire message's findings into the ledger
    pub fn absorb(&mut self, findings: &FindingSet) {
        for (category, values) in findings.iter() {
            self.merge(category, values.iter());
        }
    }

    /// Merge a previously serialized category string back in.
    ///
    /// Splits on commas and drops blank tokens, so a corrupted stored
    /// value degrades to "nothing recorded" instead of failing the merge.
    pub fn merge_serialized(&mut self, category: SignalCategory, stored: &str) {
        self.merge(category, stored.split(','));
    }

    /// Distinct values for a category, sorted
    pub fn values(&self, category: SignalCategory) -> Vec<String> {
        self.entries
            .get(&category)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Serialized form for storage: sorted, comma-joined
    pub fn serialize_category(&self, category: SignalCategory) -> String {
        self.values(category).join(",")
    }

    /// Whether a category holds at least one value
    pub fn has(&self, category: SignalCategory) -> bool {
        self.entries
            .get(&category)
            .map(|set| !set.is_empty())
            .unwrap_or(false)
    }

    /// Number of distinct values in a category
    pub fn count(&self, category: SignalCategory) -> usize {
        self.entries.get(&category).map(BTreeSet::len).unwrap_or(0)
    }

    /// Whether nothing has been recorded in any category
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeSet::is_empty)
    }

    /// The populated-category booleans the agent consumes
    pub fn summary(&self) -> IntelSummary {
        IntelSummary {
            has_bank: self.has(SignalCategory::BankAccount),
            has_upi: self.has(SignalCategory::Upi),
            has_phone: self.has(SignalCategory::Phone),
            has_link: self.has(SignalCategory::Link),
        }
    }
}

/// Snapshot of which actionable categories are populated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelSummary {
    pub has_bank: bool,
    pub has_upi: bool,
    pub has_phone: bool,
    pub has_link: bool,
}

impl IntelSummary {
    /// True once any payment or contact intelligence has been captured
    pub fn has_intelligence(&self) -> bool {
        self.has_bank || self.has_upi || self.has_phone || self.has_link
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_idempotent() {
        let mut ledger = IntelligenceLedger::new();
        ledger.merge(SignalCategory::Upi, ["fraud@okbank", "pay@fakebank"]);
        let first = ledger.serialize_category(SignalCategory::Upi);

        ledger.merge(SignalCategory::Upi, ["fraud@okbank", "pay@fakebank"]);
        let second = ledger.serialize_category(SignalCategory::Upi);

        assert_eq!(first, second);
        assert_eq!(ledger.count(SignalCategory::Upi), 2);
    }

    #[test]
    fn test_merge_never_drops_values() {
        let mut ledger = IntelligenceLedger::new();
        ledger.merge(SignalCategory::BankAccount, ["123456789"]);
        ledger.merge(SignalCategory::BankAccount, ["987654321"]);

        let values = ledger.values(SignalCategory::BankAccount);
        assert!(values.contains(&"123456789".to_string()));
        assert!(values.contains(&"987654321".to_string()));
    }

    #[test]
    fn test_serialized_form_is_sorted() {
        let mut ledger = IntelligenceLedger::new();
        ledger.merge(SignalCategory::Phone, ["9876543210", "6000000001"]);

        assert_eq!(
            ledger.serialize_category(SignalCategory::Phone),
            "6000000001,9876543210"
        );
    }

    #[test]
    fn test_merge_serialized_filters_blank_tokens() {
        let mut ledger = IntelligenceLedger::new();
        ledger.merge_serialized(SignalCategory::Link, "http://a.example,, ,http://b.example,");

        assert_eq!(ledger.count(SignalCategory::Link), 2);
    }

    #[test]
    fn test_corrupt_serialized_degrades_to_empty() {
        let mut ledger = IntelligenceLedger::new();
        ledger.merge_serialized(SignalCategory::Upi, ",,, ,");

        assert!(!ledger.has(SignalCategory::Upi));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_summary_flips_on_actionable_categories() {
        let mut ledger = IntelligenceLedger::new();
        assert!(!ledger.summary().has_intelligence());

        ledger.merge(SignalCategory::Keyword, ["urgent"]);
        assert!(!ledger.summary().has_intelligence());

        ledger.merge(SignalCategory::Upi, ["fraud@okbank"]);
        let summary = ledger.summary();
        assert!(summary.has_upi);
        assert!(summary.has_intelligence());
    }

    #[test]
    fn test_absorb_covers_all_categories() {
        let mut findings = FindingSet::new();
        findings.insert(SignalCategory::Phone, "9876543210");
        findings.insert(SignalCategory::Keyword, "kyc");

        let mut ledger = IntelligenceLedger::new();
        ledger.absorb(&findings);

        assert!(ledger.has(SignalCategory::Phone));
        assert!(ledger.has(SignalCategory::Keyword));
    }
}
