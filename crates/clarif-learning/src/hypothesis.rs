//! The learner's prioritized rule set.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use clarif_core::constants::HYPOTHESIS_DELIMITER;
use clarif_core::rules::{Condition, Priority, Rule, State};

/// Rules grouped into priority bands, highest band first.
///
/// Invariant: no two rules share a condition. Within a band, rules are kept
/// newest-first, which is also the tie-break when several rules of the same
/// priority apply to one state.
#[derive(Debug, Clone, Default)]
pub struct Hypothesis {
    bands: BTreeMap<Reverse<Priority>, Vec<Rule>>,
}

impl Hypothesis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an initial rule list through the regular merge path.
    pub fn from_rules(rules: &[Rule]) -> Self {
        let mut hypothesis = Self::new();
        hypothesis.merge(rules);
        hypothesis
    }

    /// Merge feedback rules.
    ///
    /// Rules already present (same condition and action) are skipped. The
    /// rest enter their priority band ahead of the rules already there, then
    /// every condition keeps only its first rule in band order, so a condition
    /// ends up with its highest-priority rule and, on equal priority, with the
    /// newest one. Returns whether the rule set changed.
    pub fn merge(&mut self, feedback: &[Rule]) -> bool {
        let mut added: Vec<Rule> = Vec::new();
        for rule in feedback {
            if !added.contains(rule) && !self.contains(rule) {
                added.push(rule.clone());
            }
        }
        if added.is_empty() {
            return false;
        }

        let mut incoming: BTreeMap<Reverse<Priority>, Vec<Rule>> = BTreeMap::new();
        for rule in &added {
            incoming
                .entry(Reverse(rule.priority))
                .or_default()
                .push(rule.clone());
        }

        for (band, mut rules) in incoming {
            if let Some(existing) = self.bands.remove(&band) {
                rules.extend(existing);
            }
            self.bands.insert(band, rules);
        }

        let mut seen: HashSet<Condition> = HashSet::new();
        for rules in self.bands.values_mut() {
            rules.retain(|rule| seen.insert(rule.condition.clone()));
        }
        self.bands.retain(|_, rules| !rules.is_empty());
        added.iter().any(|rule| self.contains(rule))
    }

    /// The first rule, in priority order, whose condition applies to `state`.
    pub fn find_top_rule(&self, state: &State) -> Option<&Rule> {
        self.bands
            .values()
            .flat_map(|rules| rules.iter())
            .find(|rule| rule.applies(state))
    }

    /// Rule currently held for `condition`, if any.
    pub fn rule_for_condition(&self, condition: &Condition) -> Option<&Rule> {
        self.rules().find(|rule| rule.condition == *condition)
    }

    pub fn contains(&self, rule: &Rule) -> bool {
        self.rules().any(|r| r == rule)
    }

    /// All rules in lookup order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.bands.values().flat_map(|rules| rules.iter())
    }

    pub fn len(&self) -> usize {
        self.bands.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules().enumerate() {
            if i > 0 {
                f.write_str(HYPOTHESIS_DELIMITER)?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}
