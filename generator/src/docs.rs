//! Documentation tree loading from module sources.
//!
//! Modules declare their documentation as a YAML document held in a
//! top-level `DOCUMENTATION` triple-quoted string. This module finds that
//! string and deserializes it into a [`ModuleDoc`].

use std::sync::LazyLock;

use argspec_core::ModuleDoc;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{GenError, Result};

static DOCUMENTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^DOCUMENTATION\s*=\s*[rRuU]?('''|""")"#).unwrap()
});

/// Returns the body of the `DOCUMENTATION` string in a module source.
///
/// # Examples
///
/// ```
/// use argspec_gen::docs::documentation_block;
///
/// let source = "DOCUMENTATION = r'''\nmodule: demo\n'''\n";
/// assert_eq!(documentation_block(source), Some("\nmodule: demo\n"));
/// assert_eq!(documentation_block("print('hi')\n"), None);
/// ```
pub fn documentation_block(source: &str) -> Option<&str> {
    let captures = DOCUMENTATION_RE.captures(source)?;
    let delimiter = captures.get(1)?;
    let body_start = delimiter.end();
    let body_len = source[body_start..].find(delimiter.as_str())?;
    Some(&source[body_start..body_start + body_len])
}

/// Parses the documentation tree out of module source text.
pub fn parse_module_docs(source: &str) -> Result<ModuleDoc> {
    let block = documentation_block(source).ok_or(GenError::MissingDocumentation)?;
    let doc: ModuleDoc = serde_yaml::from_str(block)?;

    if !doc.extends_documentation_fragment.is_empty() {
        warn!(
            fragments = ?doc.extends_documentation_fragment,
            "documentation fragments are not resolved; only the module's own options are used"
        );
    }
    debug!(
        module = doc.module.as_deref().unwrap_or("<unnamed>"),
        options = doc.options.len(),
        "parsed module documentation"
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_quoted_block() {
        let source = "x = 1\nDOCUMENTATION = \"\"\"\nmodule: demo\n\"\"\"\nEXAMPLES = '''\n'''\n";
        assert_eq!(documentation_block(source), Some("\nmodule: demo\n"));
    }

    #[test]
    fn test_block_stops_at_matching_delimiter() {
        let source = "DOCUMENTATION = '''\ndescription: say \"\"\"hi\"\"\"\n'''\n";
        assert_eq!(
            documentation_block(source),
            Some("\ndescription: say \"\"\"hi\"\"\"\n")
        );
    }

    #[test]
    fn test_indented_assignment_is_ignored() {
        let source = "def f():\n    DOCUMENTATION = '''\nmodule: nested\n'''\n";
        assert_eq!(documentation_block(source), None);
    }

    #[test]
    fn test_parse_module_docs_reads_options() {
        let source = r#"#!/usr/bin/python
DOCUMENTATION = r'''
module: widget
short_description: Manage widgets
options:
  name:
    description: Widget name.
    required: true
    type: str
'''
"#;
        let doc = parse_module_docs(source).unwrap();
        assert_eq!(doc.module.as_deref(), Some("widget"));
        assert!(doc.option("name").is_some());
    }

    #[test]
    fn test_missing_block_is_error() {
        assert!(matches!(
            parse_module_docs("import os\n"),
            Err(GenError::MissingDocumentation)
        ));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let source = "DOCUMENTATION = '''\noptions: [unclosed\n'''\n";
        assert!(matches!(parse_module_docs(source), Err(GenError::Yaml(_))));
    }
}
