//! Reply script banks
//!
//! The persona's lines, grouped by the policy branch that uses them. The
//! tables are immutable configuration data: built once at startup, only
//! ever read afterwards. Selection within a pool is a uniform-random pick
//! made by the agent, so no two sessions sound identical.

use honeypot_core::TriggerKind;
use serde::{Deserialize, Serialize};

/// Which narrative pool a reply is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKind {
    Opening,
    Probe,
    Extract,
    Bait,
    Stall,
    Confusion,
    Fallback,
}

/// The narrative reply pools
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptLibrary {
    /// Turns 0-1: immediate panic, never a neutral reply
    pub opening: Vec<String>,
    /// Turn 2: fear, asking what to do
    pub probe: Vec<String>,
    /// Turns 3 and 5: ask for the scammer's own payment details,
    /// framed as an app problem
    pub extract: Vec<String>,
    /// Turn 4: compliance signal
    pub bait: Vec<String>,
    /// Delay tactics
    pub stall: Vec<String>,
    /// Losing the thread (infinite-loop confusion mode)
    pub confusion: Vec<String>,
    /// Shared pool used when a category lookup misses
    pub fallback: Vec<String>,
}

impl Default for ScriptLibrary {
    fn default() -> Self {
        Self {
            opening: vec![
                "Oh my god, really? I didn't do anything wrong. What should I do?".into(),
                "Wait, is this serious? I just got this number. I'm panicked.".into(),
                "Oh no! I haven't done anything illegal. Why is this happening?".into(),
                "This is terrifying. Please tell me this is a mistake.".into(),
                "What?! I'm so scared. Please help me understand what's going on.".into(),
            ],
            probe: vec![
                "I am so scared. Will I lose my money? Please help me fix this.".into(),
                "Is my bank balance safe? I can't afford to have it blocked.".into(),
                "I am really worried about my savings. What exactly do I need to do?".into(),
                "This sounds urgent. I don't want any legal trouble. Please help.".into(),
                "My hands are shaking. What did I do wrong? Can you fix this for me?".into(),
            ],
            extract: vec![
                "I am trying to send the money but the app is asking for details. Can I send it to a bank account or UPI directly? Please share the details.".into(),
                "My app is glitching. Do you have a direct UPI ID or account number I can transfer to instead?".into(),
                "It says 'Server Error'. Is there a specific bank account number I should use for the verification fee?".into(),
                "The payment link isn't opening. Can you just give me your UPI ID? I'll send it from my other app.".into(),
                "Where should I send the payment? Give me your account details or UPI ID and I'll transfer right now.".into(),
                "Should I send it to your bank account? What's the account number? Or do you prefer UPI?".into(),
            ],
            bait: vec![
                "Okay, I will do whatever you say. I just want my account safe.".into(),
                "I understand. Please guide me, I trust you to fix this.".into(),
                "Okay, tell me the steps. I want to resolve this immediately.".into(),
                "I am ready to verify. Just tell me what information you need.".into(),
                "Yes yes, I'll cooperate fully. Just please don't block my account.".into(),
            ],
            stall: vec![
                "Hold on, my internet is slow. Just writing it down now...".into(),
                "One second, the app is loading... it's just spinning.".into(),
                "Wait, I need to find my reading glasses to read the card number. Just a moment.".into(),
                "Hang on, my battery is low, let me plug in the charger quickly.".into(),
                "Sorry, my wife is calling me. Give me 30 seconds...".into(),
                "The screen went black, restarting my phone. Don't disconnect please.".into(),
            ],
            confusion: vec![
                "Sorry, which number did you mean? I have accounts in two banks.".into(),
                "I wrote it down but my pen stopped working. Can you repeat the last part?".into(),
                "My son just called me and I lost my place. Where were we?".into(),
                "This phone keeps hanging. What was the step after opening the app?".into(),
                "I am confused between the first number and the second number you told me.".into(),
            ],
            fallback: vec![
                "Okay, please tell me the next step.".into(),
                "I am listening. Go ahead.".into(),
                "What should I do next?".into(),
                "Okay, understood. Continue please.".into(),
            ],
        }
    }
}

impl ScriptLibrary {
    /// Pool for a script kind; an empty pool falls back to the shared
    /// fallback lines
    pub fn pool(&self, kind: ScriptKind) -> &[String] {
        let pool = match kind {
            ScriptKind::Opening => &self.opening,
            ScriptKind::Probe => &self.probe,
            ScriptKind::Extract => &self.extract,
            ScriptKind::Bait => &self.bait,
            ScriptKind::Stall => &self.stall,
            ScriptKind::Confusion => &self.confusion,
            ScriptKind::Fallback => &self.fallback,
        };
        if pool.is_empty() {
            &self.fallback
        } else {
            pool
        }
    }
}

/// Reaction lines for each contextual trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerReplies {
    pub legal_threat: Vec<String>,
    pub otp_request: Vec<String>,
    pub tech_issue: Vec<String>,
    pub financial_worry: Vec<String>,
    pub urgency_pressure: Vec<String>,
    pub compliance_request: Vec<String>,
    pub confusion: Vec<String>,
}

impl Default for TriggerReplies {
    fn default() -> Self {
        Self {
            legal_threat: vec![
                "Please sir, no police! I am an honest man, I will do whatever you ask.".into(),
                "Arrest?! Oh god, please, I have a family. Tell me how to fix this right now.".into(),
                "Please don't file any case. I am cooperating fully, see, I am replying immediately.".into(),
                "Sir I am begging you, no legal trouble please. My heart is beating so fast.".into(),
            ],
            otp_request: vec![
                "I'm checking my messages but no OTP has come yet. My network is very bad today.".into(),
                "Which code? I got two messages and one is from my recharge. Should I read both?".into(),
                "The message is not coming. Can you send it again? I will tell you the moment it arrives.".into(),
                "Wait, my phone shows 'SIM not provisioned'. Let me restart and check for the code.".into(),
            ],
            tech_issue: vec![
                "The link is just loading and loading. My phone is very old, is there another way?".into(),
                "It says 'page cannot be displayed'. Did you send the right link?".into(),
                "I clicked it but now the screen is white. Should I click again?".into(),
                "My phone says the app is 'not compatible'. Can you send a different one?".into(),
            ],
            financial_worry: vec![
                "Please tell me my savings are safe. That money is for my daughter's wedding.".into(),
                "How much will they deduct? I only have a little in that account.".into(),
                "Will the fine increase if I am late? I am trying my best to be fast.".into(),
                "I checked my balance and now I am so worried. Please help me protect it.".into(),
            ],
            urgency_pressure: vec![
                "I am hurrying, I am hurrying! My hands are shaking, give me one minute.".into(),
                "Please don't cut the call, I am doing it as fast as I can.".into(),
                "Okay okay, I am doing it right now. Please don't close my account.".into(),
                "Yes yes, immediately. I just need to find my glasses, one second.".into(),
            ],
            compliance_request: vec![
                "Yes, I will share everything. Just tell me again slowly what you need.".into(),
                "Okay, I am writing down what you need. Please repeat it once more.".into(),
                "I want to cooperate. Tell me exactly which details and I will get them.".into(),
                "Fine, I will give the details. First tell me again, who is this speaking?".into(),
            ],
            confusion: vec![
                "Yes yes, I am here. My phone hung for a minute.".into(),
                "Sorry, I didn't understand. Can you explain once more in simple words?".into(),
                "I am a little confused. You said account first and now card?".into(),
                "Wait, I think I missed your last message. What did you say?".into(),
            ],
        }
    }
}

impl TriggerReplies {
    /// Reaction pool for a trigger kind
    pub fn pool(&self, kind: TriggerKind) -> &[String] {
        match kind {
            TriggerKind::LegalThreat => &self.legal_threat,
            TriggerKind::OtpRequest => &self.otp_request,
            TriggerKind::TechIssue => &self.tech_issue,
            TriggerKind::FinancialWorry => &self.financial_worry,
            TriggerKind::UrgencyPressure => &self.urgency_pressure,
            TriggerKind::ComplianceRequest => &self.compliance_request,
            TriggerKind::Confusion => &self.confusion,
        }
    }
}
