//! Derived argument spec types.
//!
//! A [`ModuleSpec`] is what the generator derives from a [`ModuleDoc`]: the
//! per-option [`ArgumentSpec`], the `required_if` rules, and the
//! `mutually_exclusive` groups. Each part renders to a [`Literal`] through
//! [`ModuleSpec::sections`], which skips empty parts entirely.
//!
//! [`ModuleDoc`]: crate::ModuleDoc

use std::collections::BTreeMap;
use std::fmt;

use crate::{Literal, OptionType};

/// Argument spec keyed by option name. Iteration is alphabetical.
pub type ArgumentSpec = BTreeMap<String, ArgSpecEntry>;

/// Projection of one documented option onto the argument spec fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgSpecEntry {
    pub aliases: Option<Literal>,
    pub choices: Option<Literal>,
    pub default: Option<Literal>,
    pub elements: Option<OptionType>,
    pub required: Option<Literal>,
    pub option_type: Option<OptionType>,
    /// Nested spec built from suboptions.
    pub options: Option<ArgumentSpec>,
    /// Rendered only when `true`.
    pub apply_defaults: bool,
}

impl ArgSpecEntry {
    /// Renders the entry as a dict literal with a fixed key order.
    pub fn to_literal(&self) -> Literal {
        let mut entries: Vec<(&str, Literal)> = Vec::new();

        if let Some(aliases) = &self.aliases {
            entries.push(("aliases", aliases.clone()));
        }
        if let Some(choices) = &self.choices {
            entries.push(("choices", choices.clone()));
        }
        if let Some(default) = &self.default {
            entries.push(("default", default.clone()));
        }
        if let Some(elements) = self.elements {
            entries.push(("elements", Literal::str(elements.as_str())));
        }
        if let Some(required) = &self.required {
            entries.push(("required", required.clone()));
        }
        if let Some(ty) = self.option_type {
            entries.push(("type", Literal::str(ty.as_str())));
        }
        if let Some(options) = &self.options {
            entries.push(("options", argument_spec_literal(options)));
        }
        if self.apply_defaults {
            entries.push(("apply_defaults", Literal::Bool(true)));
        }

        Literal::str_dict(entries)
    }
}

/// Renders an argument spec as a dict literal in key order.
pub fn argument_spec_literal(spec: &ArgumentSpec) -> Literal {
    Literal::str_dict(
        spec.iter()
            .map(|(name, entry)| (name.as_str(), entry.to_literal())),
    )
}

/// Options that become mandatory when `trigger` equals `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredIf {
    pub trigger: String,
    /// Converted with the trigger option's declared type.
    pub value: Literal,
    /// Dependent option names in accumulation order.
    pub dependents: Vec<String>,
}

impl RequiredIf {
    /// Renders as `(trigger, value, (dependents...))`.
    pub fn to_literal(&self) -> Literal {
        Literal::Tuple(vec![
            Literal::str(self.trigger.as_str()),
            self.value.clone(),
            Literal::str_tuple(self.dependents.iter().map(String::as_str)),
        ])
    }
}

/// A sorted group of option names that must not all be supplied together.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MutuallyExclusive(Vec<String>);

impl MutuallyExclusive {
    /// Builds a group, sorting and deduplicating the names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Renders as a tuple of names.
    pub fn to_literal(&self) -> Literal {
        Literal::str_tuple(self.0.iter().map(String::as_str))
    }
}

/// Top-level keys of a generated module spec, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecKey {
    ArgumentSpec,
    RequiredIf,
    MutuallyExclusive,
}

impl SpecKey {
    /// All keys in the order they are written into a module.
    pub const ALL: [SpecKey; 3] = [Self::ArgumentSpec, Self::RequiredIf, Self::MutuallyExclusive];

    /// Variable name used in generated code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArgumentSpec => "argument_spec",
            Self::RequiredIf => "required_if",
            Self::MutuallyExclusive => "mutually_exclusive",
        }
    }
}

impl fmt::Display for SpecKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything derived from one module's documentation.
///
/// # Examples
///
/// ```
/// use argspec_core::{ArgSpecEntry, Literal, ModuleSpec, OptionType, SpecKey};
///
/// let mut spec = ModuleSpec::default();
/// assert!(spec.sections().is_empty());
///
/// spec.argument_spec.insert(
///     "name".to_string(),
///     ArgSpecEntry { option_type: Some(OptionType::Str), ..Default::default() },
/// );
/// let sections = spec.sections();
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].0, SpecKey::ArgumentSpec);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSpec {
    pub argument_spec: ArgumentSpec,
    /// Sorted by `(trigger, value)`.
    pub required_if: Vec<RequiredIf>,
    /// Sorted and deduplicated.
    pub mutually_exclusive: Vec<MutuallyExclusive>,
}

impl ModuleSpec {
    /// Returns the non-empty parts as literals, in [`SpecKey::ALL`] order.
    pub fn sections(&self) -> Vec<(SpecKey, Literal)> {
        SpecKey::ALL
            .into_iter()
            .filter_map(|key| self.section(key).map(|literal| (key, literal)))
            .collect()
    }

    /// Returns one part as a literal, or `None` when it is empty.
    pub fn section(&self, key: SpecKey) -> Option<Literal> {
        match key {
            SpecKey::ArgumentSpec if !self.argument_spec.is_empty() => {
                Some(argument_spec_literal(&self.argument_spec))
            }
            SpecKey::RequiredIf if !self.required_if.is_empty() => Some(Literal::List(
                self.required_if.iter().map(RequiredIf::to_literal).collect(),
            )),
            SpecKey::MutuallyExclusive if !self.mutually_exclusive.is_empty() => {
                Some(Literal::List(
                    self.mutually_exclusive
                        .iter()
                        .map(MutuallyExclusive::to_literal)
                        .collect(),
                ))
            }
            _ => None,
        }
    }
}
