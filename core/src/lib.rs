//! Core types for module argument spec generation.
//!
//! This crate defines the data the generator works on:
//!
//! - [`ModuleDoc`] / [`OptionDoc`]: the documentation tree a module declares,
//!   deserialized from its YAML documentation block.
//! - [`OptionType`]: declared option types, each with a typed validator
//!   ([`OptionType::validator`]) that converts raw text into a [`Literal`].
//! - [`Literal`]: the Python-shaped value space used for defaults, choices,
//!   converted trigger values, and rendered output.
//! - [`ModuleSpec`]: the derived argument spec, `required_if` rules, and
//!   `mutually_exclusive` groups.
//!
//! # Example
//!
//! ```
//! use argspec_core::*;
//!
//! let doc: ModuleDoc = serde_yaml::from_str(r#"
//! options:
//!   state:
//!     description: Desired state.
//!     choices: [present, absent]
//!   count:
//!     description: How many.
//!     type: int
//! "#).unwrap();
//!
//! let count = doc.option("count").unwrap();
//! assert_eq!(count.declared_type(), OptionType::Int);
//! assert_eq!(count.declared_type().convert("3").unwrap(), Literal::Int(3));
//! ```

mod literal;
mod spec;
mod types;
mod validate;

pub use literal::Literal;
pub use spec::{
    ArgSpecEntry, ArgumentSpec, ModuleSpec, MutuallyExclusive, RequiredIf, SpecKey,
    argument_spec_literal,
};
pub use types::{ModuleDoc, OptionDoc, OptionType, UnknownOptionType};
pub use validate::{TypeConversionError, Validator, validator_for};
