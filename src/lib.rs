//! Rule-driven regex rewriting for text documents, built for massaging
//! libvirt domain XML exported from one KVM host so it boots on another.
//!
//! The engine is content-agnostic. It has two halves:
//!
//! - [`RuleSet`]: an ordered list of named, toggleable pattern/replacement
//!   rules, parsed from a YAML list of records.
//! - the substitution engine: a pure fold that applies each enabled rule's
//!   global regex replacement to the evolving document, so later rules see
//!   the text produced by earlier ones.

mod api;
mod engine;
mod ruleset;

pub use api::{ApplyResult, apply};
pub use engine::{RuleEvent, RuleOutcome, RuleStep, apply_rule};
pub use ruleset::{ParseError, Rule, RuleSet};
