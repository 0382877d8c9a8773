//! Rule compilation, matching and template expansion.

#![allow(missing_docs)]

use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use regex::{Captures, Regex, RegexBuilder};

use crate::error::{ResponderError, Result};
use crate::patterns::{RuleSpec, DEFAULT_RULES};
use crate::reflection::reflect;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\$(\d+)").expect("placeholder regex is valid");
}

/// A compiled (pattern, response templates) pair.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    responses: Vec<String>,
}

impl Rule {
    /// Compiles `pattern` case-insensitively.
    ///
    /// Fails if the pattern does not parse or `responses` is empty.
    pub fn new<S: Into<String>>(pattern: &str, responses: Vec<S>) -> Result<Self> {
        let responses: Vec<String> = responses.into_iter().map(Into::into).collect();
        if responses.is_empty() {
            return Err(ResponderError::EmptyResponses(pattern.to_string()));
        }
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| ResponderError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            pattern: compiled,
            responses,
        })
    }

    /// Builds a rule from a static table entry.
    pub fn from_spec(spec: &RuleSpec) -> Result<Self> {
        Self::new(spec.pattern, spec.responses.to_vec())
    }

    /// The source pattern text.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Candidate response templates.
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// Number of capture groups, not counting the implicit whole-match group.
    pub fn group_count(&self) -> usize {
        self.pattern.captures_len() - 1
    }

    /// Unanchored match anywhere in `input`.
    pub fn captures<'t>(&self, input: &'t str) -> Option<Captures<'t>> {
        self.pattern.captures(input)
    }
}

/// An ordered list of rules; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Compiles a table of rule specs, preserving order.
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self> {
        specs
            .iter()
            .map(Rule::from_spec)
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Linear top-to-bottom scan. Returns the index of the first matching rule
    /// together with its captures.
    pub fn find<'r, 't>(&'r self, input: &'t str) -> Option<(usize, &'r Rule, Captures<'t>)> {
        self.rules
            .iter()
            .enumerate()
            .find_map(|(idx, rule)| rule.captures(input).map(|caps| (idx, rule, caps)))
    }
}

/// The built-in storefront rules.
pub fn default_rule_set() -> RuleSet {
    RuleSet::from_specs(DEFAULT_RULES).expect("built-in rule table compiles")
}

/// Replaces every `$N` in `template` with the reflected, lowercased text of
/// capture group N. Missing or non-participating groups become "".
pub fn expand_template(template: &str, captures: &Captures<'_>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|n| captures.get(n))
                .map(|m| reflect(&m.as_str().to_lowercase()))
                .unwrap_or_default()
        })
        .into_owned()
}

/// Chooses which of `len` candidate templates to use.
pub trait TemplatePicker: Send {
    /// Returns an index in `0..len`. Only called with `len > 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform random choice backed by any `rand` generator.
#[derive(Debug)]
pub struct RngPicker<R> {
    rng: R,
}

impl<R: RngCore + Send> RngPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngPicker<StdRng> {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore + Send> TemplatePicker for RngPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always picks the same slot (wrapped to the candidate count).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl TemplatePicker for FixedPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_new_rejects_bad_pattern() {
        let err = Rule::new("(unclosed", vec!["x"]).unwrap_err();
        assert!(matches!(err, ResponderError::InvalidPattern { .. }));
    }

    #[test]
    fn test_rule_new_rejects_empty_responses() {
        let err = Rule::new("hello", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ResponderError::EmptyResponses(_)));
    }

    #[test]
    fn test_rule_is_case_insensitive_and_unanchored() {
        let rule = Rule::new(r"\bshipping\b", vec!["ok"]).unwrap();
        assert!(rule.captures("what about SHIPPING to Canada?").is_some());
        assert!(rule.captures("shippingcontainer").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let set = RuleSet::new(vec![
            Rule::new(r"\border\b", vec!["early"]).unwrap(),
            Rule::new(r"\bwhy\b", vec!["late"]).unwrap(),
        ]);
        let (idx, rule, _) = set.find("why is my order late").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(rule.responses()[0], "early");
    }

    #[test]
    fn test_find_none() {
        let set = RuleSet::new(vec![Rule::new(r"\bkeycaps\b", vec!["x"]).unwrap()]);
        assert!(set.find("switches").is_none());
        assert!(RuleSet::default().find("anything").is_none());
    }

    #[test]
    fn test_expand_template_reflects_and_lowercases() {
        let rule = Rule::new(r"i am (.*)", vec!["x"]).unwrap();
        let caps = rule.captures("I am tired of My Keyboard").unwrap();
        assert_eq!(
            expand_template("Why are you $1?", &caps),
            "Why are you tired of your keyboard?"
        );
    }

    #[test]
    fn test_expand_template_missing_group_is_empty() {
        let rule = Rule::new(r"(a)|(b)", vec!["x"]).unwrap();
        let caps = rule.captures("a").unwrap();
        assert_eq!(expand_template("[$2][$7]", &caps), "[][]");
        assert_eq!(expand_template("[$1]", &caps), "[a]");
    }

    #[test]
    fn test_default_rule_set_compiles() {
        let set = default_rule_set();
        assert_eq!(set.len(), DEFAULT_RULES.len());
        assert_eq!(set.rules()[2].group_count(), 2);
    }

    #[test]
    fn test_fixed_picker_wraps() {
        let mut picker = FixedPicker(4);
        assert_eq!(picker.pick(3), 1);
        assert_eq!(picker.pick(5), 4);
    }

    #[test]
    fn test_seeded_picker_stays_in_range() {
        let mut picker = RngPicker::seeded(7);
        for _ in 0..100 {
            assert!(picker.pick(3) < 3);
        }
    }
}
