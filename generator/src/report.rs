//! Per-module and batch results.

use std::fmt;
use std::path::PathBuf;

use crate::error::GenError;

/// Outcome of processing one module.
#[derive(Debug)]
pub enum ModuleStatus {
    /// Generated region already up to date.
    Unchanged,
    /// Generated region differs (written unless dry-run).
    Changed,
    /// Processing stopped with an error.
    Failed(GenError),
}

/// Result for one module path.
#[derive(Debug)]
pub struct ModuleReport {
    pub path: PathBuf,
    pub status: ModuleStatus,
}

impl ModuleReport {
    pub fn changed(&self) -> bool {
        matches!(self.status, ModuleStatus::Changed)
    }

    pub fn error(&self) -> Option<&GenError> {
        match &self.status {
            ModuleStatus::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ModuleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.status {
            ModuleStatus::Unchanged => write!(f, "{path}: unchanged"),
            ModuleStatus::Changed => write!(f, "{path}: changed"),
            ModuleStatus::Failed(err) => write!(f, "Error processing {path}: {err}"),
        }
    }
}

/// Aggregated results for a batch of modules, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub modules: Vec<ModuleReport>,
}

impl BatchReport {
    /// `true` if any module changed (or would change, in dry-run).
    pub fn changed(&self) -> bool {
        self.modules.iter().any(ModuleReport::changed)
    }

    /// `true` if any module failed, regardless of changes elsewhere.
    pub fn failed(&self) -> bool {
        self.modules.iter().any(|module| module.error().is_some())
    }

    /// Iterates over failed modules.
    pub fn failures(&self) -> impl Iterator<Item = &ModuleReport> {
        self.modules.iter().filter(|module| module.error().is_some())
    }

    /// Process exit status: 2 on any failure, else 1 on any change, else 0.
    pub fn exit_code(&self) -> i32 {
        if self.failed() {
            2
        } else if self.changed() {
            1
        } else {
            0
        }
    }
}
