// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declarative input validation.
//!
//! A [`RuleSet`] holds field constraints and whole-input constraints for an
//! input type. Running it yields [`Violations`] in detection order; an empty
//! result means the input is valid.
//!
//! # Example
//!
//! ```rust
//! use command_core::validation::RuleSet;
//!
//! struct CreateProject {
//!     name: Option<String>
//! }
//!
//! let rules = RuleSet::new().constraint(
//!     "name",
//!     |input: &CreateProject| input.name.as_deref(),
//!     |c| c.not_blank().message("Project name is required").max_chars(255)
//! );
//!
//! let violations = rules.validate(&CreateProject { name: Some("  ".into()) });
//! assert_eq!(violations.summary(), "name: Project name is required");
//! ```

pub mod checks;

use std::fmt;

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    name:        String,
    message:     String,
    message_key: String
}

impl Violation {
    /// Create a violation with a generic message key.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name:        name.into(),
            message:     message.into(),
            message_key: "constraint.violated".to_owned()
        }
    }

    /// Replace the message key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = key.into();
        self
    }

    /// Field or constraint name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message key for localisation.
    pub fn message_key(&self) -> &str {
        &self.message_key
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

/// Ordered collection of violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// `true` when nothing was violated.
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Same as [`Violations::is_valid`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in detection order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Violations reported for one field.
    pub fn for_field<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.0.iter().filter(move |v| v.name == name)
    }

    /// Append a violation.
    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// `name: message` pairs joined with `", "`.
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(feature = "validate")]
impl From<&validator::ValidationErrors> for Violations {
    /// Field errors sorted by field name, then in reported order.
    fn from(errors: &validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| (field.to_string(), errs))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map_or_else(|| err.code.to_string(), ToString::to_string);
                    Violation::new(field.clone(), message).with_key(err.code.to_string())
                })
            })
            .collect()
    }
}

type Rule<T> = Box<dyn Fn(&T, &mut Violations) + Send + Sync>;

/// Constraint set for an input type.
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self {
            rules: Vec::new()
        }
    }
}

impl<T> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl<T> RuleSet<T> {
    /// Empty rule set; validates everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// `true` when no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Add string constraints for one field.
    ///
    /// `extract` returns `None` for an absent value. Only `not_blank` rejects
    /// absent values; every other check passes them.
    #[must_use]
    pub fn constraint<X, B>(mut self, name: &'static str, extract: X, build: B) -> Self
    where
        X: Fn(&T) -> Option<&str> + Send + Sync + 'static,
        B: FnOnce(StrConstraints) -> StrConstraints
    {
        let constraints = build(StrConstraints::new(name));
        self.rules.push(Box::new(move |input: &T, out: &mut Violations| {
            constraints.check(extract(input), out);
        }));
        self
    }

    /// Add a whole-input constraint.
    ///
    /// A violation named `name` is reported when `predicate` returns `false`.
    #[must_use]
    pub fn constraint_on_target<P>(
        mut self,
        predicate: P,
        name: &'static str,
        message_key: &'static str,
        message: &'static str
    ) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static
    {
        self.rules.push(Box::new(move |input: &T, out: &mut Violations| {
            if !predicate(input) {
                out.push(Violation::new(name, message).with_key(message_key));
            }
        }));
        self
    }

    /// Run every rule and collect violations in registration order.
    pub fn validate(&self, input: &T) -> Violations {
        let mut out = Violations::default();
        for rule in &self.rules {
            rule(input, &mut out);
        }
        out
    }
}

#[cfg(feature = "validate")]
impl<T: validator::Validate> RuleSet<T> {
    /// Rule set delegating to the input's `validator::Validate` impl.
    pub fn from_validate() -> Self {
        Self::new().validated()
    }

    /// Append the input's `validator::Validate` checks.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.rules.push(Box::new(|input: &T, out: &mut Violations| {
            if let Err(errors) = input.validate() {
                for violation in Violations::from(&errors) {
                    out.push(violation);
                }
            }
        }));
        self
    }
}

enum StrCheck {
    NotBlank,
    MaxChars(usize),
    OneOf(Vec<&'static str>),
    Email,
    Identifier,
    Custom(Box<dyn Fn(&str) -> bool + Send + Sync>)
}

struct Check {
    kind:    StrCheck,
    key:     &'static str,
    message: String
}

/// Constraint builder for one string field.
///
/// Each call appends a check; [`StrConstraints::message`] and
/// [`StrConstraints::key`] adjust the most recent one.
pub struct StrConstraints {
    name:   &'static str,
    checks: Vec<Check>
}

impl StrConstraints {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            checks: Vec::new()
        }
    }

    fn push(mut self, kind: StrCheck, key: &'static str, message: String) -> Self {
        self.checks.push(Check {
            kind,
            key,
            message
        });
        self
    }

    /// Value must be present and contain a non-whitespace character.
    #[must_use]
    pub fn not_blank(self) -> Self {
        let message = format!("\"{}\" must not be blank", self.name);
        self.push(StrCheck::NotBlank, "string.not_blank", message)
    }

    /// Value must have at most `max` characters.
    #[must_use]
    pub fn max_chars(self, max: usize) -> Self {
        let message = format!(
            "The length of \"{}\" must be less than or equal to {max}",
            self.name
        );
        self.push(StrCheck::MaxChars(max), "string.max_chars", message)
    }

    /// Value must equal one of `allowed`.
    #[must_use]
    pub fn one_of(self, allowed: &[&'static str]) -> Self {
        let message = format!("\"{}\" must be one of {}", self.name, allowed.join(", "));
        self.push(StrCheck::OneOf(allowed.to_vec()), "string.one_of", message)
    }

    /// Value must be an email address.
    #[must_use]
    pub fn email(self) -> Self {
        let message = format!("\"{}\" must be a valid email address", self.name);
        self.push(StrCheck::Email, "string.email", message)
    }

    /// Value must contain only letters, digits and underscores.
    #[must_use]
    pub fn identifier(self) -> Self {
        let message = format!(
            "\"{}\" must contain only letters, digits and underscores",
            self.name
        );
        self.push(StrCheck::Identifier, "string.identifier", message)
    }

    /// Value must satisfy `predicate`.
    #[must_use]
    pub fn predicate<P>(self, predicate: P, key: &'static str, message: impl Into<String>) -> Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static
    {
        self.push(StrCheck::Custom(Box::new(predicate)), key, message.into())
    }

    /// Override the message of the most recent check.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.checks.last_mut() {
            last.message = message.into();
        }
        self
    }

    /// Override the message key of the most recent check.
    #[must_use]
    pub fn key(mut self, key: &'static str) -> Self {
        if let Some(last) = self.checks.last_mut() {
            last.key = key;
        }
        self
    }

    fn check(&self, value: Option<&str>, out: &mut Violations) {
        for check in &self.checks {
            let passed = match (value, &check.kind) {
                (None, StrCheck::NotBlank) => false,
                (None, _) => true,
                (Some(v), StrCheck::NotBlank) => !checks::is_blank(v),
                (Some(v), StrCheck::MaxChars(max)) => checks::within_chars(v, *max),
                (Some(v), StrCheck::OneOf(allowed)) => checks::is_one_of(v, allowed),
                (Some(v), StrCheck::Email) => checks::is_email(v),
                (Some(v), StrCheck::Identifier) => checks::is_identifier(v),
                (Some(v), StrCheck::Custom(predicate)) => predicate(v)
            };
            if !passed {
                out.push(Violation::new(self.name, check.message.clone()).with_key(check.key));
            }
        }
    }
}
