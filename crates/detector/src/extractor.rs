//! Signal extraction
//!
//! Scans one inbound message with a fixed keyword vocabulary and a fixed
//! set of compiled patterns, producing deduplicated per-category findings.
//! Pattern evaluation never fails for arbitrary text; characters outside
//! the expected ranges are simply non-matches.

use once_cell::sync::Lazy;
use regex::Regex;

use honeypot_core::{FindingSet, SignalCategory};

/// Suspicious-term vocabulary, matched case-insensitively as substrings.
/// Urgency words, authority and legal terms, KYC/banking terms, and
/// action words. Each term counts once per message.
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "urgent", "immediately", "blocked", "suspended", "kyc",
    "verify", "pan card", "aadhaar", "aadhar", "lottery", "prize",
    "winner", "expire", "expired", "unauthorized", "irs", "police",
    "bank", "rbi", "customer care", "refund", "cashback",
    "wallet", "otp", "pin", "cvv", "atm", "card",
    "account", "payment", "transfer", "freeze", "frozen",
    "legal action", "arrest", "warrant", "customs", "tax",
    "confirm", "update", "link", "click", "reset password",
    "secure", "verify now", "act now", "limited time",
];

// handle@bank payment identifiers
static UPI_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z0-9.\-_]{3,}@[a-zA-Z]{3,}\b").unwrap());

// Indian mobile: optional +91, significant digits start 6-9
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+91[\s\-]?)?[6-9]\d{9}\b").unwrap());

// Any standalone 9-18 digit run. Deliberately broad: a 10-digit mobile
// number matches this too, and that overlap is accepted rather than
// disambiguated.
static BANK_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{9,18}\b").unwrap());

static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://(?:[-\w.]|(?:%[\da-fA-F]{2}))+").unwrap());

// IFSC codes, matched against the upper-cased text
static IFSC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{4}0[A-Z0-9]{6}\b").unwrap());

/// Per-message signal extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalExtractor;

impl SignalExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract all findings from one message.
    ///
    /// Empty text yields an all-empty finding set; nothing here raises.
    pub fn extract(&self, text: &str) -> FindingSet {
        let mut findings = FindingSet::new();
        if text.is_empty() {
            return findings;
        }

        let text_lower = text.to_lowercase();
        for term in SUSPICIOUS_KEYWORDS {
            if text_lower.contains(term) {
                findings.insert(SignalCategory::Keyword, *term);
            }
        }

        for m in UPI_PATTERN.find_iter(text) {
            findings.insert(SignalCategory::Upi, m.as_str());
        }
        for m in PHONE_PATTERN.find_iter(text) {
            findings.insert(SignalCategory::Phone, m.as_str());
        }
        for m in BANK_PATTERN.find_iter(text) {
            findings.insert(SignalCategory::BankAccount, m.as_str());
        }
        for m in LINK_PATTERN.find_iter(text) {
            findings.insert(SignalCategory::Link, m.as_str());
        }

        let text_upper = text.to_uppercase();
        for m in IFSC_PATTERN.find_iter(&text_upper) {
            findings.insert(SignalCategory::Ifsc, m.as_str());
        }

        findings
    }
}
