//! Error types for argument spec generation.
//!
//! Every variant is fatal to the module being processed and isolated from
//! the rest of a batch.

use argspec_core::TypeConversionError;
use thiserror::Error;

/// Errors that can occur while generating a module's argument spec.
#[derive(Debug, Error)]
pub enum GenError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The documentation block is not valid YAML for a module doc.
    #[error("invalid documentation: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The module source has no `DOCUMENTATION` string.
    #[error("module does not contain a DOCUMENTATION block")]
    MissingDocumentation,

    /// Fewer than two marker lines in the target file.
    #[error("Module does not contain a marker pair.")]
    MissingMarkerPair,

    /// A `required_if` trigger value does not convert to the trigger's type.
    #[error("invalid required_if value for option '{option}': {source}")]
    TypeConversion {
        option: String,
        #[source]
        source: TypeConversionError,
    },

    /// A constraint references an option that is not documented.
    #[error("option '{referenced}' referenced by '{option}' is not documented")]
    UnknownOption { option: String, referenced: String },
}

/// Convenience alias for results with [`GenError`].
pub type Result<T> = std::result::Result<T, GenError>;
