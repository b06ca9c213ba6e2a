//! Match extensions and markers
//!
//! A [`Match`] is an extension criterion beyond the built-in address and
//! interface selectors, rendered as `--match <name> [! ]--<option> <value>`.
//! A [`Marker`] is an out-of-band `name:value` tag carried inside a comment
//! match; it is rule metadata and is never serialized on its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::negation_prefix;

/// A name/value annotation embedded into a comment match (e.g. the owning
/// application of a rule).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Marker {
    pub name: String,
    pub value: String,
}

impl Marker {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}

/// An arbitrary match extension with one option/value pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchGeneric {
    pub name: String,
    pub option: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub negated: bool,
}

impl MatchGeneric {
    pub fn new(
        name: impl Into<String>,
        option: impl Into<String>,
        value: impl Into<String>,
        negated: bool,
    ) -> Self {
        Self {
            name: name.into(),
            option: option.into(),
            value: value.into(),
            negated,
        }
    }
}

/// The comment match, carrying free text (possibly an encoded [`Marker`])
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchComment {
    pub comment: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub negated: bool,
}

impl MatchComment {
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            negated: false,
        }
    }
}

/// A match extension on a rule; zero or more per rule, order-preserving.
///
/// The `type` tag is preserved in the interchange format so decoders can
/// dispatch on the variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Match {
    Generic(MatchGeneric),
    Comment(MatchComment),
}

impl Match {
    pub fn name(&self) -> &str {
        match self {
            Match::Generic(m) => &m.name,
            Match::Comment(_) => "comment",
        }
    }

    pub fn option(&self) -> &str {
        match self {
            Match::Generic(m) => &m.option,
            Match::Comment(_) => "comment",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Match::Generic(m) => &m.value,
            Match::Comment(m) => &m.comment,
        }
    }

    pub fn negated(&self) -> bool {
        match self {
            Match::Generic(m) => m.negated,
            Match::Comment(m) => m.negated,
        }
    }

    /// Renders the match as one command-line segment. Comment values are
    /// double-quoted; all other values are emitted verbatim.
    pub fn command_segment(&self) -> String {
        let value = if self.name() == "comment" {
            format!("\"{}\"", self.value())
        } else {
            self.value().to_string()
        };
        format!(
            "--match {} {}--{} {}",
            self.name(),
            negation_prefix(self.negated()),
            self.option(),
            value
        )
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
