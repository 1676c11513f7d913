//! Marker-delimited region patching.
//!
//! A target file holds a pair of identical marker lines. Everything between
//! them is generated; everything else is left byte-for-byte untouched. The
//! file is split once into three regions (prefix through the opening marker,
//! generated interior, suffix from the closing marker on) and reassembled
//! with new interior text.

use tracing::debug;

use crate::error::{GenError, Result};

/// Where the marker pair sits in a sequence of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair {
    /// Index of the opening marker line.
    pub open: usize,
    /// Index of the closing marker line.
    pub close: usize,
    /// Column of the comment character on the opening marker line.
    pub indent: usize,
}

impl MarkerPair {
    /// Finds the first two lines whose trimmed content equals `marker`.
    ///
    /// Later marker lines are ignored.
    pub fn locate(lines: &[String], marker: &str) -> Result<Self> {
        let is_marker = |line: &String| line.trim() == marker;

        let open = lines
            .iter()
            .position(is_marker)
            .ok_or(GenError::MissingMarkerPair)?;
        let close = lines[open + 1..]
            .iter()
            .position(is_marker)
            .map(|offset| open + 1 + offset)
            .ok_or(GenError::MissingMarkerPair)?;

        Ok(Self {
            open,
            close,
            indent: comment_column(&lines[open]),
        })
    }
}

/// Column of the first `#` on a line, counted in characters; 0 if absent.
fn comment_column(line: &str) -> usize {
    line.find('#').map_or(0, |byte| line[..byte].chars().count())
}

/// A file split around its marker pair.
#[derive(Debug, Clone, Copy)]
pub struct Regions<'a> {
    /// Lines up to and including the opening marker.
    pub prefix: &'a [String],
    /// Lines strictly between the markers.
    pub generated: &'a [String],
    /// The closing marker and everything after it.
    pub suffix: &'a [String],
    /// Indentation applied to generated lines.
    pub indent: usize,
}

impl<'a> Regions<'a> {
    /// Splits `lines` around the first marker pair.
    pub fn split(lines: &'a [String], marker: &str) -> Result<Self> {
        let pair = MarkerPair::locate(lines, marker)?;
        Ok(Self {
            prefix: &lines[..=pair.open],
            generated: &lines[pair.open + 1..pair.close],
            suffix: &lines[pair.close..],
            indent: pair.indent,
        })
    }

    /// Reassembles the file with `interior` replacing the generated region.
    ///
    /// `interior` is indented to the marker column line by line; blank lines
    /// stay blank.
    pub fn assemble(&self, interior: &str) -> Vec<String> {
        let generated = indent_lines(interior, self.indent);
        debug!(
            replaced = self.generated.len(),
            inserted = generated.len(),
            "assembled marker region"
        );

        let mut lines =
            Vec::with_capacity(self.prefix.len() + generated.len() + self.suffix.len());
        lines.extend_from_slice(self.prefix);
        lines.extend(generated);
        lines.extend_from_slice(self.suffix);
        lines
    }
}

/// Splits text into lines keeping terminators, prefixing non-blank lines.
pub fn indent_lines(text: &str, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    split_lines(text)
        .into_iter()
        .map(|line| {
            if line.trim().is_empty() {
                line
            } else {
                format!("{pad}{line}")
            }
        })
        .collect()
}

/// Splits text into lines, each keeping its `\n` terminator.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Replaces the region between the first two `marker` lines with `interior`.
///
/// # Examples
///
/// ```
/// use argspec_gen::patch::{patch_lines, split_lines};
///
/// let lines = split_lines("def main():\n    # GEN\n    old = 1\n    # GEN\n");
/// let patched = patch_lines(&lines, "# GEN", "new = 2\n").unwrap();
/// assert_eq!(patched.concat(), "def main():\n    # GEN\n    new = 2\n    # GEN\n");
/// ```
pub fn patch_lines(lines: &[String], marker: &str, interior: &str) -> Result<Vec<String>> {
    Ok(Regions::split(lines, marker)?.assemble(interior))
}
