//! Module processing: derive, render, patch, diff, and write.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use argspec_core::{ModuleDoc, ModuleSpec};
use similar::TextDiff;
use tracing::{debug, info};

use crate::builder::load_parameters;
use crate::docs::parse_module_docs;
use crate::error::Result;
use crate::format::to_code;
use crate::patch::{Regions, split_lines};
use crate::report::{BatchReport, ModuleReport, ModuleStatus};

/// Marker line used when none is configured.
pub const DEFAULT_MARKER: &str = "# AUTOMATIC MODULE ARGUMENTS";

/// Line length used when none is configured.
pub const DEFAULT_LINE_LENGTH: usize = 79;

/// Generation settings shared by every module in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Marker line delimiting the generated region.
    pub marker: String,
    /// Write a unified diff of each module to the diff stream.
    pub show_diff: bool,
    /// Compute changes without writing files.
    pub dry_run: bool,
    /// Maximum width of generated lines, including the marker indent.
    pub line_length: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            show_diff: false,
            dry_run: false,
            line_length: DEFAULT_LINE_LENGTH,
        }
    }
}

/// Old and new contents of one module, line by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleUpdate {
    pub old_lines: Vec<String>,
    pub new_lines: Vec<String>,
}

impl ModuleUpdate {
    /// Any difference counts, including whitespace and line terminators.
    pub fn changed(&self) -> bool {
        self.old_lines != self.new_lines
    }

    /// Unified diff of the update, labeled `<label>.old` / `<label>.new`.
    ///
    /// Empty when nothing changed.
    pub fn unified_diff(&self, label: &str) -> String {
        let old = self.old_lines.concat();
        let new = self.new_lines.concat();
        let from = format!("{label}.old");
        let to = format!("{label}.new");
        TextDiff::from_lines(&old, &new)
            .unified_diff()
            .header(&from, &to)
            .to_string()
    }
}

/// Renders every present spec section, in fixed key order.
pub fn render_spec(spec: &ModuleSpec, line_length: usize) -> String {
    spec.sections()
        .iter()
        .map(|(key, literal)| to_code(key.as_str(), literal, line_length))
        .collect()
}

/// Replaces the marked region of `old_lines` with the rendered spec.
pub fn update_module(
    old_lines: &[String],
    marker: &str,
    spec: &ModuleSpec,
    line_length: usize,
) -> Result<Vec<String>> {
    let regions = Regions::split(old_lines, marker)?;
    let width = line_length.saturating_sub(regions.indent);
    Ok(regions.assemble(&render_spec(spec, width)))
}

/// Computes the update for module source text and its documentation.
///
/// Pure: nothing is read or written.
pub fn update_source(doc: &ModuleDoc, source: &str, config: &GeneratorConfig) -> Result<ModuleUpdate> {
    let spec = load_parameters(doc)?;
    let old_lines = split_lines(source);
    let new_lines = update_module(&old_lines, &config.marker, &spec, config.line_length)?;
    Ok(ModuleUpdate {
        old_lines,
        new_lines,
    })
}

/// Processes one module file and returns whether it changed.
///
/// When `config.show_diff` is set the diff goes to `diff_out`. The file is
/// rewritten only when it changed and `config.dry_run` is off.
pub fn process_module(path: &Path, config: &GeneratorConfig, diff_out: &mut dyn Write) -> Result<bool> {
    let source = fs::read_to_string(path)?;
    let doc = parse_module_docs(&source)?;
    let update = update_source(&doc, &source, config)?;

    if config.show_diff {
        let label = path.display().to_string();
        diff_out.write_all(update.unified_diff(&label).as_bytes())?;
    }

    let changed = update.changed();
    if !changed {
        debug!(path = %path.display(), "module already up to date");
    } else if config.dry_run {
        info!(path = %path.display(), "module would change (dry run)");
    } else {
        fs::write(path, update.new_lines.concat())?;
        info!(path = %path.display(), "module updated");
    }

    Ok(changed)
}

/// Processes modules in order; one failure never stops the batch.
pub fn process_modules<P: AsRef<Path>>(
    paths: &[P],
    config: &GeneratorConfig,
    diff_out: &mut dyn Write,
) -> BatchReport {
    let modules = paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let status = match process_module(path, config, diff_out) {
                Ok(true) => ModuleStatus::Changed,
                Ok(false) => ModuleStatus::Unchanged,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "module failed");
                    ModuleStatus::Failed(err)
                }
            };
            ModuleReport {
                path: PathBuf::from(path),
                status,
            }
        })
        .collect();

    BatchReport { modules }
}
