//! Structured literal values.
//!
//! A [`Literal`] is the value space shared by the documentation tree
//! (defaults, choices, aliases), the typed validators, and the rendered
//! argument spec. It mirrors the Python literal forms the generated code is
//! written in: `None`, booleans, numbers, strings, lists, tuples, and dicts
//! with ordered entries.
//!
//! Literals carry a total order so they can key sorted maps. The order is
//! None < Bool < numbers < Str < List < Tuple < Dict; ints and floats compare
//! numerically against each other and collections compare lexicographically.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer};

/// A Python-shaped literal value.
#[derive(Debug, Clone)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    /// Dict entries in insertion order.
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    /// Builds a string literal.
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Builds a tuple of string literals.
    pub fn str_tuple<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Tuple(items.into_iter().map(Self::str).collect())
    }

    /// Builds a dict keyed by strings, preserving the given order.
    pub fn str_dict<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Literal)>,
        K: Into<String>,
    {
        Self::Dict(
            entries
                .into_iter()
                .map(|(key, value)| (Self::str(key), value))
                .collect(),
        )
    }

    /// Converts a YAML value. Tags are dropped in favor of the tagged value.
    ///
    /// Module documentation is written against YAML 1.1, so strings spelled
    /// like a 1.1 boolean (`yes`, `No`, `OFF`, ...) resolve to [`Literal::Bool`].
    /// Quoting is not visible at this point; a quoted `"yes"` resolves too.
    pub fn from_yaml(value: &serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => Self::None,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => number_literal(n.as_i64(), n.as_f64()),
            Value::String(s) => yaml11_bool(s).map_or_else(|| Self::Str(s.clone()), Self::Bool),
            Value::Sequence(items) => Self::List(items.iter().map(Self::from_yaml).collect()),
            Value::Mapping(map) => Self::Dict(
                map.iter()
                    .map(|(key, value)| (Self::from_yaml(key), Self::from_yaml(value)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
        }
    }

    /// Converts a JSON value.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::None,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => number_literal(n.as_i64(), n.as_f64()),
            Value::String(s) => Self::Str(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Dict(
                map.iter()
                    .map(|(key, value)| (Self::str(key.as_str()), Self::from_json(value)))
                    .collect(),
            ),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Str(_) => 3,
            Self::List(_) => 4,
            Self::Tuple(_) => 5,
            Self::Dict(_) => 6,
        }
    }
}

// YAML 1.1 `bool` resolver: exactly these spellings, nothing case-folded.
fn yaml11_bool(s: &str) -> Option<bool> {
    match s {
        "yes" | "Yes" | "YES" | "true" | "True" | "TRUE" | "on" | "On" | "ON" => Some(true),
        "no" | "No" | "NO" | "false" | "False" | "FALSE" | "off" | "Off" | "OFF" => Some(false),
        _ => None,
    }
}

fn number_literal(int: Option<i64>, float: Option<f64>) -> Literal {
    match (int, float) {
        (Some(i), _) => Literal::Int(i),
        (None, Some(f)) => Literal::Float(f),
        (None, None) => Literal::None,
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::None, Self::None) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a.cmp(b),
            (Self::Dict(a), Self::Dict(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Literal {}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_yaml::Value::deserialize(deserializer).map(|value| Self::from_yaml(&value))
    }
}
