//! Per-rule diagnostic events.
//!
//! Each rule application produces exactly one [`RuleEvent`]. The sequence is
//! handed back to the caller alongside the transformed document; nothing in
//! the engine reads it back.

use std::fmt;

/// What a single rule application did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule has `enable: false`; its pattern was not even compiled.
    Skipped,
    /// The pattern is not a valid regex. The document passes through this
    /// step unchanged and processing continues with the next rule.
    BadPattern {
        /// Compile error text from the regex engine.
        error: String,
    },
    /// The pattern compiled but matched nowhere in the document.
    NoMatch,
    /// A global substitution was performed.
    Replaced {
        /// Number of non-overlapping matches that were replaced.
        matches: usize,
    },
}

impl RuleOutcome {
    /// True when this step may have produced text differing from its input.
    pub fn changed(&self) -> bool {
        matches!(self, RuleOutcome::Replaced { .. })
    }
}

/// Diagnostic event for one rule, emitted in application order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEvent {
    /// Name of the rule this event belongs to.
    pub rule: String,
    pub outcome: RuleOutcome,
}

impl fmt::Display for RuleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            RuleOutcome::Skipped => write!(f, "[{}] skipped (disabled)", self.rule),
            RuleOutcome::BadPattern { error } => write!(f, "[{}] pattern error: {error}", self.rule),
            RuleOutcome::NoMatch => write!(f, "[{}] no match", self.rule),
            RuleOutcome::Replaced { matches } => write!(f, "[{}] replaced {matches} match(es)", self.rule),
        }
    }
}
