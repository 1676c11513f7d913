//! Documentation tree type definitions.
//!
//! This module models the option documentation a module declares: each
//! option has a declared [`OptionType`], optional descriptive fields, free
//! text description lines, and optionally a nested set of suboptions with the
//! same shape. The types deserialize directly from the YAML documentation
//! block with [`serde`].

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::Literal;

/// Declared type of a module option.
///
/// The type name selects the validator used to convert raw text into a typed
/// [`Literal`] (see [`OptionType::validator`](crate::OptionType::validator)).
///
/// # Examples
///
/// ```
/// use argspec_core::OptionType;
///
/// assert_eq!(OptionType::default(), OptionType::Str);
/// assert_eq!("bool".parse::<OptionType>().unwrap(), OptionType::Bool);
/// assert_eq!(OptionType::Jsonarg.as_str(), "jsonarg");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Text value (the default when no type is declared).
    #[default]
    Str,
    Int,
    Bool,
    Float,
    List,
    Dict,
    Path,
    Raw,
    Jsonarg,
    Bytes,
    Bits,
}

impl OptionType {
    /// Every supported type, in declaration order.
    pub const ALL: [OptionType; 11] = [
        Self::Str,
        Self::Int,
        Self::Bool,
        Self::Float,
        Self::List,
        Self::Dict,
        Self::Path,
        Self::Raw,
        Self::Jsonarg,
        Self::Bytes,
        Self::Bits,
    ];

    /// Returns the type name as written in documentation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Float => "float",
            Self::List => "list",
            Self::Dict => "dict",
            Self::Path => "path",
            Self::Raw => "raw",
            Self::Jsonarg => "jsonarg",
            Self::Bytes => "bytes",
            Self::Bits => "bits",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a type name is not one of [`OptionType::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown option type: {0}")]
pub struct UnknownOptionType(pub String);

impl FromStr for OptionType {
    type Err = UnknownOptionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| UnknownOptionType(s.to_string()))
    }
}

/// Documentation of a single module option.
///
/// Descriptive fields keep *presence*: a key written as `default: null`
/// deserializes to `Some(Literal::None)`, while an omitted key stays `None`.
///
/// # Examples
///
/// ```
/// use argspec_core::{Literal, OptionDoc, OptionType};
///
/// let doc: OptionDoc = serde_yaml::from_str(
///     "type: int\ndefault: null\ndescription: How many.\n",
/// ).unwrap();
/// assert_eq!(doc.option_type, Some(OptionType::Int));
/// assert_eq!(doc.default, Some(Literal::None));
/// assert!(doc.choices.is_none());
/// assert_eq!(doc.description, vec!["How many.".to_string()]);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionDoc {
    /// Declared type; `None` means the implicit `str`.
    #[serde(default, rename = "type")]
    pub option_type: Option<OptionType>,
    #[serde(default, deserialize_with = "present")]
    pub choices: Option<Literal>,
    #[serde(default, deserialize_with = "present")]
    pub default: Option<Literal>,
    #[serde(default, deserialize_with = "present")]
    pub required: Option<Literal>,
    #[serde(default, deserialize_with = "present")]
    pub aliases: Option<Literal>,
    /// Element type for list options.
    #[serde(default)]
    pub elements: Option<OptionType>,
    /// Environment/lookup fallback declaration. Never copied into the spec,
    /// but it makes the parent apply defaults.
    #[serde(default, deserialize_with = "present")]
    pub fallback: Option<Literal>,
    /// Free text description, one entry per line.
    #[serde(default, deserialize_with = "description_lines")]
    pub description: Vec<String>,
    /// Nested options, in declaration order.
    #[serde(default)]
    pub suboptions: Option<IndexMap<String, OptionDoc>>,
}

impl OptionDoc {
    /// Returns the declared type, falling back to [`OptionType::Str`].
    pub fn declared_type(&self) -> OptionType {
        self.option_type.unwrap_or_default()
    }

    /// Returns `true` when the option declares a default or a fallback.
    pub fn has_default(&self) -> bool {
        self.default.is_some() || self.fallback.is_some()
    }
}

/// Documentation tree of one module.
///
/// Only `options` is consumed; other documentation keys are ignored. The
/// `extends_documentation_fragment` key is recorded so callers can warn that
/// fragments are not resolved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleDoc {
    /// Module name, when documented.
    #[serde(default)]
    pub module: Option<String>,
    /// Top-level options, in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: IndexMap<String, OptionDoc>,
    /// Names of documentation fragments the module extends.
    #[serde(default, deserialize_with = "description_lines")]
    pub extends_documentation_fragment: Vec<String>,
}

impl ModuleDoc {
    /// Looks up a top-level option by name.
    pub fn option(&self, name: &str) -> Option<&OptionDoc> {
        self.options.get(name)
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lines {
    One(String),
    Many(Vec<String>),
}

fn description_lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Lines>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Lines::One(line)) => vec![line],
        Some(Lines::Many(lines)) => lines,
    })
}
