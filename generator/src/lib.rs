//! Module argument spec generation.
//!
//! This crate derives a machine-checkable argument spec from a module's
//! documentation and splices the generated code between a pair of marker
//! lines in the module source.
//!
//! # Pipeline
//!
//! 1. [`docs`] reads the `DOCUMENTATION` YAML block into a
//!    [`ModuleDoc`](argspec_core::ModuleDoc).
//! 2. [`builder`] projects options into an argument spec and asks
//!    [`constraints`] for `required_if` / `mutually_exclusive` rules found in
//!    the description text.
//! 3. [`format`] renders each non-empty part as a wrapped assignment.
//! 4. [`patch`] replaces the region between the first two marker lines.
//! 5. [`process`] runs the above per file, emits diffs, writes changes, and
//!    collects a [`BatchReport`](report::BatchReport).
//!
//! # Example
//!
//! ```
//! use argspec_gen::docs::parse_module_docs;
//! use argspec_gen::process::{GeneratorConfig, update_source};
//!
//! let source = "\
//! DOCUMENTATION = '''
//! options:
//!   name:
//!     description: Widget name.
//!     required: true
//! '''
//! ## AUTOMATIC MODULE ARGUMENTS
//! ## AUTOMATIC MODULE ARGUMENTS
//! ";
//!
//! let doc = parse_module_docs(source).unwrap();
//! let update = update_source(&doc, source, &GeneratorConfig::default()).unwrap();
//! assert!(update.changed());
//! assert!(update.new_lines.concat().contains("argument_spec = {\"name\": {\"required\": True}}\n"));
//! ```

pub mod builder;
pub mod constraints;
pub mod docs;
pub mod error;
pub mod format;
pub mod patch;
pub mod process;
pub mod report;

pub use error::{GenError, Result};
pub use process::{GeneratorConfig, process_module, process_modules};
pub use report::{BatchReport, ModuleReport, ModuleStatus};
