//! Substitution engine.
//!
//! This module is the operational core of the crate. Applying a rule set to
//! a document is a single, synchronous fold:
//!
//! ```text
//! rule file ── RuleSet::parse          (ruleset.rs)
//!                      │
//! document ────────────┼─ apply_rule per rule, in order   (substitute.rs)
//!                      │    - disabled        -> Skipped, text untouched
//!                      │    - compile failure -> BadPattern, text untouched
//!                      │    - no match        -> NoMatch, text untouched
//!                      │    - match           -> Replaced, global regex
//!                      │                        substitution
//!                      v
//!            (final text, Vec<RuleEvent>)     (events.rs)
//! ```
//!
//! The output of rule `i` is the input of rule `i + 1`; the engine never
//! reorders or parallelizes, because rule authors rely on earlier rules
//! having already rewritten the text. Events are observational only: they
//! report what each step did and never alter the fold.
//!
//! Substitution is purely textual. The engine does not parse the document's
//! grammar; a pattern that matches across structural boundaries is the rule
//! author's responsibility.

#[path = "engine/events.rs"]
mod events;
#[path = "engine/substitute.rs"]
mod substitute;

pub use events::{RuleEvent, RuleOutcome};
pub use substitute::{RuleStep, apply_rule};

pub(crate) use substitute::apply_all;
