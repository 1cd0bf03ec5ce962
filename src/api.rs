use crate::engine::{self, RuleEvent};
use crate::ruleset::RuleSet;
use std::time::{Duration, Instant};

/// Result from [`apply`].
#[derive(Debug, Clone)]
pub struct ApplyResult {
    /// The transformed document.
    pub output: String,
    /// One diagnostic event per rule, in application order.
    pub events: Vec<RuleEvent>,
    /// Total elapsed time spent applying the rule set.
    pub elapsed: Duration,
}

impl ApplyResult {
    /// True when at least one rule rewrote the document.
    pub fn changed(&self) -> bool {
        self.events.iter().any(|event| event.outcome.changed())
    }
}

/// Apply every rule in `rules` to `document`, in order.
///
/// The document is threaded through the rules as a pure fold: the output of
/// rule `i` becomes the input of rule `i + 1`, so ordering in the rule file
/// is significant. Diagnostics are collected but never alter the result; a
/// disabled or broken rule leaves its step's text untouched.
///
/// # Example
/// ```
/// use dommod::{RuleSet, apply};
///
/// let rules = RuleSet::parse("- name: io\n  enable: true\n  expression: io='native'\n  replace: ''\n").unwrap();
/// let res = apply("<driver name='qemu' io='native'/>", &rules);
/// assert_eq!(res.output, "<driver name='qemu' />");
/// ```
pub fn apply(document: &str, rules: &RuleSet) -> ApplyResult {
    let started = Instant::now();
    let (output, events) = engine::apply_all(document, rules);
    ApplyResult { output, events, elapsed: started.elapsed() }
}
