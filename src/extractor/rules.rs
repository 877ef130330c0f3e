//! Pattern rules
//!
//! A rule pairs a compiled pattern with what to do with its capture groups:
//! bind them to credential fields, or read them as a secret reference. A
//! [`RuleSet`] scans lines with several independent rules at once; each rule
//! keeps the first line it matches and is not applied again afterwards.

use crate::secret::SecretReference;
use regex::Regex;
use std::ops::ControlFlow;

/// Binds one capture group to one output field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub group: usize,
    pub field: String,
}

impl FieldBinding {
    pub fn new(group: usize, field: impl Into<String>) -> Self {
        Self {
            group,
            field: field.into(),
        }
    }
}

/// Capture groups holding the parts of a secret reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretRefGroups {
    pub namespace: usize,
    pub name: usize,
    pub key: usize,
}

/// What a rule produces from a matching line
#[derive(Debug, Clone)]
pub enum RuleAction {
    Fields(Vec<FieldBinding>),
    SecretRef(SecretRefGroups),
}

/// Output of a rule for the line it matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleHit {
    /// Field values from participating groups, in binding order
    Fields(Vec<(String, String)>),
    /// The matched secret reference, `None` when the name or key group did not participate
    Secret(Option<SecretReference>),
}

/// An immutable text-matching rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: String,
    pattern: Regex,
    action: RuleAction,
    required: bool,
}

impl PatternRule {
    /// Rule binding capture groups to credential fields
    pub fn fields(name: impl Into<String>, pattern: Regex, bindings: Vec<FieldBinding>) -> Self {
        Self {
            name: name.into(),
            pattern,
            action: RuleAction::Fields(bindings),
            required: false,
        }
    }

    /// Rule reading a secret reference out of its capture groups
    pub fn secret_ref(name: impl Into<String>, pattern: Regex, groups: SecretRefGroups) -> Self {
        Self {
            name: name.into(),
            pattern,
            action: RuleAction::SecretRef(groups),
            required: false,
        }
    }

    /// Mark whether a miss fails the extraction
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn action(&self) -> &RuleAction {
        &self.action
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Apply the rule to a single line
    ///
    /// The pattern may match anywhere in the line. Groups that did not
    /// participate in the match produce no field.
    pub fn apply(&self, line: &str) -> Option<RuleHit> {
        let caps = self.pattern.captures(line)?;
        let group = |index: usize| caps.get(index).map(|m| m.as_str().to_string());

        let hit = match &self.action {
            RuleAction::Fields(bindings) => RuleHit::Fields(
                bindings
                    .iter()
                    .filter_map(|b| group(b.group).map(|value| (b.field.clone(), value)))
                    .collect(),
            ),
            RuleAction::SecretRef(groups) => RuleHit::Secret(
                group(groups.name)
                    .zip(group(groups.key))
                    .map(|(name, key)| SecretReference::new(group(groups.namespace), name, key)),
            ),
        };
        Some(hit)
    }
}

/// An ordered set of independent rules scanned together
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<PatternRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Scan lines in order, keeping each rule's first hit
    ///
    /// Missing lines are skipped. Scanning stops as soon as every rule has hit.
    pub fn scan<'a>(&self, lines: impl IntoIterator<Item = Option<&'a str>>) -> ScanOutcome<'_> {
        let initial: Vec<Option<RuleHit>> = self.rules.iter().map(|_| None).collect();

        let flow = lines.into_iter().flatten().try_fold(initial, |mut hits, line| {
            for (rule, hit) in self.rules.iter().zip(hits.iter_mut()) {
                if hit.is_none() {
                    *hit = rule.apply(line);
                }
            }
            if hits.iter().all(Option::is_some) {
                ControlFlow::Break(hits)
            } else {
                ControlFlow::Continue(hits)
            }
        });

        let hits = match flow {
            ControlFlow::Break(hits) | ControlFlow::Continue(hits) => hits,
        };

        ScanOutcome {
            rules: &self.rules,
            hits,
        }
    }
}

/// Per-rule result of a scan
#[derive(Debug)]
pub struct ScanOutcome<'r> {
    rules: &'r [PatternRule],
    hits: Vec<Option<RuleHit>>,
}

impl<'r> ScanOutcome<'r> {
    /// Hit recorded for the rule named `name`
    pub fn hit(&self, name: &str) -> Option<&RuleHit> {
        self.rules
            .iter()
            .position(|rule| rule.name() == name)
            .and_then(|index| self.hits[index].as_ref())
    }

    /// First required rule that matched nothing
    pub fn first_required_miss(&self) -> Option<&'r PatternRule> {
        self.rules
            .iter()
            .zip(&self.hits)
            .find(|(rule, hit)| rule.is_required() && hit.is_none())
            .map(|(rule, _)| rule)
    }

    /// Hits in rule order, skipping rules that matched nothing
    pub fn into_hits(self) -> impl Iterator<Item = (&'r PatternRule, RuleHit)> {
        self.rules
            .iter()
            .zip(self.hits)
            .filter_map(|(rule, hit)| hit.map(|hit| (rule, hit)))
    }
}
