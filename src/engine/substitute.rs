//! The per-rule substitution step and the fold over a rule set.

use super::events::{RuleEvent, RuleOutcome};
use crate::ruleset::{Rule, RuleSet};
use regex::Regex;

/// Result of applying one rule: the (possibly rewritten) document plus the
/// outcome diagnostic for that step.
#[derive(Debug, Clone)]
pub struct RuleStep {
    pub output: String,
    pub outcome: RuleOutcome,
}

/// Apply a single rule to `document`.
///
/// Three outcomes leave the text byte-for-byte untouched: the rule is
/// disabled, its pattern does not compile, or the pattern matches nowhere.
/// A bad pattern is reported through the outcome rather than an error: one
/// broken rule must not abort the rest of the run. On a match every
/// non-overlapping occurrence is replaced, with `$n` / `${name}` in the
/// replacement expanding to the pattern's capture groups.
pub fn apply_rule(document: &str, rule: &Rule) -> RuleStep {
    if !rule.enabled {
        return RuleStep { output: document.to_string(), outcome: RuleOutcome::Skipped };
    }

    let re = match Regex::new(&rule.pattern) {
        Ok(re) => re,
        Err(err) => {
            return RuleStep {
                output: document.to_string(),
                outcome: RuleOutcome::BadPattern { error: err.to_string() },
            };
        }
    };

    let matches = re.find_iter(document).count();
    if matches == 0 {
        return RuleStep { output: document.to_string(), outcome: RuleOutcome::NoMatch };
    }

    let output = re.replace_all(document, rule.replacement.as_str()).into_owned();
    RuleStep { output, outcome: RuleOutcome::Replaced { matches } }
}

/// Fold the whole rule set over `document` in order: the output of rule `i`
/// is the input of rule `i + 1`. Returns the final text plus one event per
/// rule.
pub fn apply_all(document: &str, rules: &RuleSet) -> (String, Vec<RuleEvent>) {
    let mut text = document.to_string();
    let mut events = Vec::with_capacity(rules.len());

    for rule in rules.iter() {
        let step = apply_rule(&text, rule);
        events.push(RuleEvent { rule: rule.name.clone(), outcome: step.outcome });
        text = step.output;
    }

    (text, events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, enabled: bool, pattern: &str, replacement: &str) -> Rule {
        Rule {
            name: name.to_string(),
            enabled,
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn disabled_rule_is_a_no_op() {
        // The pattern is invalid on purpose: a disabled rule must not even
        // try to compile it.
        let step = apply_rule("<domain/>", &rule("off", false, "(", "x"));
        assert_eq!(step.output, "<domain/>");
        assert_eq!(step.outcome, RuleOutcome::Skipped);
    }

    #[test]
    fn no_match_returns_document_unchanged() {
        let step = apply_rule("<domain/>", &rule("miss", true, "cache='none'", ""));
        assert_eq!(step.output, "<domain/>");
        assert_eq!(step.outcome, RuleOutcome::NoMatch);
    }

    #[test]
    fn bad_pattern_is_tolerated() {
        let step = apply_rule("<domain/>", &rule("broken", true, "(unbalanced", "x"));
        assert_eq!(step.output, "<domain/>");
        match step.outcome {
            RuleOutcome::BadPattern { ref error } => assert!(!error.is_empty()),
            ref other => panic!("expected BadPattern, got {other:?}"),
        }
    }

    #[test]
    fn substitution_is_global() {
        let document = "\
<disk type='file' device='disk'>
  <driver name='qemu' type='raw' cache='writethrough' io='native'/>
</disk>
<disk type='file' device='disk'>
  <driver name='qemu' type='raw' cache='writethrough' io='native'/>
</disk>
";
        let step = apply_rule(document, &rule("disk-cache", true, "cache='writethrough'", ""));
        assert_eq!(step.outcome, RuleOutcome::Replaced { matches: 2 });
        assert!(!step.output.contains("cache='writethrough'"));
        assert_eq!(step.output.matches("type='raw'  io='native'").count(), 2);
    }

    #[test]
    fn replacement_expands_capture_groups() {
        let step = apply_rule(
            "<type arch='x86_64' machine='rhel6.6.0'>hvm</type>",
            &rule("machine", true, r"(machine=')rhel[^']*", "${1}pc"),
        );
        assert_eq!(step.output, "<type arch='x86_64' machine='pc'>hvm</type>");
    }

    #[test]
    fn lazy_quantifiers_stop_at_the_first_delimiter() {
        let step = apply_rule(
            "<type arch='x86_64' machine='rhel6.6.0'>hvm</type>",
            &rule("machine", true, r"machine='rhel[\S\s]*?'", "machine='pc'"),
        );
        assert_eq!(step.output, "<type arch='x86_64' machine='pc'>hvm</type>");
    }

    #[test]
    fn rules_apply_in_sequence_order() {
        let forward = RuleSet::from_rules(vec![
            rule("a-to-b", true, "a", "b"),
            rule("b-to-c", true, "b", "c"),
        ])
        .unwrap();
        let reverse = RuleSet::from_rules(vec![
            rule("b-to-c", true, "b", "c"),
            rule("a-to-b", true, "a", "b"),
        ])
        .unwrap();

        // The second rule of `forward` sees the output of the first.
        assert_eq!(apply_all("a", &forward).0, "c");
        assert_eq!(apply_all("a", &reverse).0, "b");
    }

    #[test]
    fn fold_emits_one_event_per_rule_in_order() {
        let rules = RuleSet::from_rules(vec![
            rule("off", false, "(", ""),
            rule("hit", true, "qemu-kvm", "kvm-spice"),
            rule("miss", true, "vnc", "spice"),
        ])
        .unwrap();

        let (output, events) = apply_all("<emulator>/usr/libexec/qemu-kvm</emulator>", &rules);
        assert_eq!(output, "<emulator>/usr/libexec/kvm-spice</emulator>");

        let expected = [
            RuleEvent { rule: "off".to_string(), outcome: RuleOutcome::Skipped },
            RuleEvent { rule: "hit".to_string(), outcome: RuleOutcome::Replaced { matches: 1 } },
            RuleEvent { rule: "miss".to_string(), outcome: RuleOutcome::NoMatch },
        ];
        assert_eq!(events, expected);
    }
}
