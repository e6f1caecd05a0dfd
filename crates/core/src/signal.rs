//! Signal categories and per-message findings
//!
//! Everything the extractor pulls out of a single scammer message is
//! expressed as a [`FindingSet`]: one deduplicated set of string values
//! per [`SignalCategory`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Categories of intelligence extracted from scammer messages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    /// UPI-style payment handle (`name@provider`)
    Upi,
    /// Indian mobile number (optionally `+91`-prefixed)
    Phone,
    /// Standalone 9-18 digit run resembling an account number
    BankAccount,
    /// HTTP/HTTPS link
    Link,
    /// 11-character bank branch routing code
    Ifsc,
    /// Suspicious vocabulary hit
    Keyword,
}

impl SignalCategory {
    /// All categories, in stable order
    pub const ALL: [SignalCategory; 6] = [
        SignalCategory::Upi,
        SignalCategory::Phone,
        SignalCategory::BankAccount,
        SignalCategory::Link,
        SignalCategory::Ifsc,
        SignalCategory::Keyword,
    ];

    /// Stable snake_case name
    pub fn name(&self) -> &'static str {
        match self {
            SignalCategory::Upi => "upi",
            SignalCategory::Phone => "phone",
            SignalCategory::BankAccount => "bank_account",
            SignalCategory::Link => "link",
            SignalCategory::Ifsc => "ifsc",
            SignalCategory::Keyword => "keyword",
        }
    }

    /// Whether a hit in this category identifies a payment destination
    pub fn is_payment_identifier(&self) -> bool {
        matches!(
            self,
            SignalCategory::Upi | SignalCategory::BankAccount | SignalCategory::Ifsc
        )
    }

    /// Whether this category counts toward the "has intelligence" summary
    /// that flips the agent into its holding pattern
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            SignalCategory::BankAccount
                | SignalCategory::Upi
                | SignalCategory::Phone
                | SignalCategory::Link
        )
    }
}

impl std::fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Distinct values found in one message, keyed by category
///
/// Values are case-normalized by the extractor before insertion; repeated
/// occurrences within a message collapse into a single entry. Empty and
/// whitespace-only values are rejected at the door.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingSet {
    categories: BTreeMap<SignalCategory, BTreeSet<String>>,
}

impl FindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single value; blank values are dropped
    pub fn insert(&mut self, category: SignalCategory, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        self.categories
            .entry(category)
            .or_default()
            .insert(trimmed.to_string());
    }

    /// Record many values for one category
    pub fn extend<I, S>(&mut self, category: SignalCategory, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.insert(category, value);
        }
    }

    /// Values recorded for a category (empty set if none)
    pub fn values(&self, category: SignalCategory) -> impl Iterator<Item = &str> {
        self.categories
            .get(&category)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Whether any value was recorded for a category
    pub fn has(&self, category: SignalCategory) -> bool {
        self.categories
            .get(&category)
            .map(|set| !set.is_empty())
            .unwrap_or(false)
    }

    /// Number of distinct values in a category
    pub fn count(&self, category: SignalCategory) -> usize {
        self.categories.get(&category).map(BTreeSet::len).unwrap_or(0)
    }

    /// Whether the whole set is empty
    pub fn is_empty(&self) -> bool {
        self.categories.values().all(BTreeSet::is_empty)
    }

    /// Iterate over populated categories and their value sets
    pub fn iter(&self) -> impl Iterator<Item = (SignalCategory, &BTreeSet<String>)> {
        self.categories.iter().map(|(c, v)| (*c, v))
    }

    /// Whether any payment-identifier category is populated
    pub fn has_payment_identifier(&self) -> bool {
        SignalCategory::ALL
            .iter()
            .any(|c| c.is_payment_identifier() && self.has(*c))
    }
}

/// Qualitative flags raised by the risk scorer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    /// Urgency vocabulary combined with threat vocabulary
    UrgencyWithThreat,
    /// Verification-demand vocabulary combined with threat vocabulary
    VerifyWithThreat,
    /// A payment destination (UPI, account, IFSC) was offered or demanded
    PaymentRequest,
    /// The message carried a link
    PhishingLink,
    /// The message carried a phone number
    ContactSharing,
    /// Three or more independent indicators present at once
    MultipleIndicators,
}

impl RiskFlag {
    pub fn name(&self) -> &'static str {
        match self {
            RiskFlag::UrgencyWithThreat => "urgency_with_threat",
            RiskFlag::VerifyWithThreat => "verify_with_threat",
            RiskFlag::PaymentRequest => "payment_request",
            RiskFlag::PhishingLink => "phishing_link",
            RiskFlag::ContactSharing => "contact_sharing",
            RiskFlag::MultipleIndicators => "multiple_indicators",
        }
    }
}

impl std::fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One message's verdict: score, flags, and what was extracted
///
/// Ephemeral by design. The findings are folded into the per-session
/// ledger and the verdict into the session's monotonic scam flag; the
/// assessment itself is not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Whether the score cleared the scam threshold
    pub is_scam: bool,
    /// Additive risk score
    pub risk_score: u32,
    /// Qualitative flags raised during scoring
    pub flags: BTreeSet<RiskFlag>,
    /// Everything extracted from the message
    pub extracted: FindingSet,
}

impl RiskAssessment {
    /// The zero-signal assessment returned for empty or absent text
    pub fn none() -> Self {
        Self {
            is_scam: false,
            risk_score: 0,
            flags: BTreeSet::new(),
            extracted: FindingSet::new(),
        }
    }

    pub fn has_flag(&self, flag: RiskFlag) -> bool {
        self.flags.contains(&flag)
    }
}
