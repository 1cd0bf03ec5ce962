//! Rule storage and lookup.
//!
//! A [`RuleSet`] is an ordered sequence of [`Rule`]s deserialized from a YAML
//! list of records. Order is significant: the engine applies rules top to
//! bottom, and each rule sees the text produced by the rules before it. The
//! set is built once per run and never mutated afterwards.

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

/// A named, toggleable pattern/replacement pair.
///
/// The serde renames mirror the on-disk record format
/// (`name` / `enable` / `expression` / `replace`). Every field except `name`
/// may be omitted; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    /// Identifier used for lookup and progress reporting. Must be non-empty.
    pub name: String,
    /// Disabled rules are skipped entirely; their pattern is never compiled.
    #[serde(default, rename = "enable")]
    pub enabled: bool,
    /// Regex source matched against the document.
    #[serde(default, rename = "expression")]
    pub pattern: String,
    /// Replacement template. May reference capture groups from the pattern
    /// with the regex crate's `$1` / `${name}` syntax.
    #[serde(default, rename = "replace")]
    pub replacement: String,
}

/// Error from building a [`RuleSet`]. Fatal: no partial rule set is produced.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input is not a YAML list of rule records.
    #[error("malformed rule set: {0}")]
    Yaml(#[from] serde_yaml_bw::Error),
    /// A record has an empty `name`. An unnamed rule would be
    /// indistinguishable from a failed lookup, so it is rejected up front.
    #[error("rule at index {index} has an empty name")]
    EmptyRuleName { index: usize },
}

/// An ordered set of rules, immutable once built.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Deserialize a YAML list of rule records, preserving their order.
    pub fn parse(raw: &str) -> Result<RuleSet, ParseError> {
        let rules: Vec<Rule> = serde_yaml_bw::from_str(raw)?;
        RuleSet::from_rules(rules)
    }

    /// Build a set from already-constructed rules, enforcing the same
    /// non-empty-name invariant as [`RuleSet::parse`].
    pub fn from_rules(rules: Vec<Rule>) -> Result<RuleSet, ParseError> {
        if let Some(index) = rules.iter().position(|rule| rule.name.is_empty()) {
            return Err(ParseError::EmptyRuleName { index });
        }
        Ok(RuleSet { rules })
    }

    /// First rule whose name equals `name`, scanning in sequence order.
    pub fn find(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Rules in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rule set shipped with the tool: rewrites a domain XML exported
    /// from a CentOS KVM host (machine type, emulator path, graphics block,
    /// disk locations and driver attributes) for a plain qemu/KVM target.
    pub fn builtin() -> &'static RuleSet {
        static BUILTIN: Lazy<RuleSet> = Lazy::new(|| {
            RuleSet::parse(include_str!("builtin_rules.yml")).expect("embedded rule set must parse")
        });
        &BUILTIN
    }
}
