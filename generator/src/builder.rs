//! Argument spec construction from a documentation tree.

use argspec_core::{ArgSpecEntry, ArgumentSpec, ModuleDoc, ModuleSpec, OptionDoc};
use indexmap::IndexMap;
use tracing::debug;

use crate::constraints;
use crate::error::Result;

/// Projects one option onto the argument spec fields.
///
/// Suboptions become a nested, name-sorted spec. `apply_defaults` is set
/// when at least one suboption declares a default or a fallback.
pub fn option_to_spec(option: &OptionDoc) -> ArgSpecEntry {
    let (options, apply_defaults) = match &option.suboptions {
        Some(suboptions) => (
            Some(options_to_spec(suboptions)),
            suboptions.values().any(OptionDoc::has_default),
        ),
        None => (None, false),
    };

    ArgSpecEntry {
        aliases: option.aliases.clone(),
        choices: option.choices.clone(),
        default: option.default.clone(),
        elements: option.elements,
        required: option.required.clone(),
        option_type: option.option_type,
        options,
        apply_defaults,
    }
}

/// Projects every option of a mapping; the result is ordered by name.
pub fn options_to_spec(options: &IndexMap<String, OptionDoc>) -> ArgumentSpec {
    options
        .iter()
        .map(|(name, option)| (name.clone(), option_to_spec(option)))
        .collect()
}

/// Builds the full module spec: argument spec plus derived constraints.
///
/// Empty parts stay empty and are omitted when rendered.
///
/// # Examples
///
/// ```
/// use argspec_core::{ModuleDoc, SpecKey};
/// use argspec_gen::builder::load_parameters;
///
/// let doc: ModuleDoc = serde_yaml::from_str(r#"
/// options:
///   name:
///     description: Resource name.
///     required: true
/// "#).unwrap();
///
/// let spec = load_parameters(&doc).unwrap();
/// let keys: Vec<SpecKey> = spec.sections().into_iter().map(|(key, _)| key).collect();
/// assert_eq!(keys, vec![SpecKey::ArgumentSpec]);
/// ```
pub fn load_parameters(doc: &ModuleDoc) -> Result<ModuleSpec> {
    let spec = ModuleSpec {
        argument_spec: options_to_spec(&doc.options),
        required_if: constraints::required_if(&doc.options)?,
        mutually_exclusive: constraints::mutually_exclusive(&doc.options),
    };
    debug!(
        options = spec.argument_spec.len(),
        required_if = spec.required_if.len(),
        mutually_exclusive = spec.mutually_exclusive.len(),
        "built module spec"
    );
    Ok(spec)
}
