//! Typed value validators.
//!
//! Each [`OptionType`] owns a validator that converts a raw text token into a
//! typed [`Literal`] or fails with a [`TypeConversionError`]. Validators never
//! coerce: text that is not a recognizable value of the target type is an
//! error.
//!
//! # Examples
//!
//! ```
//! use argspec_core::{Literal, OptionType};
//!
//! let convert = OptionType::Bool.validator();
//! assert_eq!(convert("yes").unwrap(), Literal::Bool(true));
//! assert!(convert("maybe").is_err());
//!
//! assert_eq!(OptionType::Bytes.convert("2K").unwrap(), Literal::Int(2048));
//! ```

use std::env;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{Literal, OptionType};

/// Signature shared by all validators.
pub type Validator = fn(&str) -> Result<Literal, TypeConversionError>;

/// Raw text that could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' cannot be converted to {}: {reason}", article(.target))]
pub struct TypeConversionError {
    /// The offending text.
    pub value: String,
    /// Requested type.
    pub target: OptionType,
    /// What went wrong.
    pub reason: String,
}

impl TypeConversionError {
    fn new(value: &str, target: OptionType, reason: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            target,
            reason: reason.into(),
        }
    }
}

fn article(target: &OptionType) -> String {
    match target {
        OptionType::Int => "an int".to_string(),
        other => format!("a {other}"),
    }
}

impl OptionType {
    /// Returns the validator for this type.
    pub fn validator(&self) -> Validator {
        match self {
            Self::Str | Self::Raw => check_str,
            Self::Int => check_int,
            Self::Bool => check_bool,
            Self::Float => check_float,
            Self::List => check_list,
            Self::Dict => check_dict,
            Self::Path => check_path,
            Self::Jsonarg => check_jsonarg,
            Self::Bytes => check_bytes,
            Self::Bits => check_bits,
        }
    }

    /// Converts raw text with this type's validator.
    pub fn convert(&self, raw: &str) -> Result<Literal, TypeConversionError> {
        (self.validator())(raw)
    }
}

/// Resolves a validator from a type name.
///
/// Returns `None` for names outside [`OptionType::ALL`].
pub fn validator_for(type_name: &str) -> Option<Validator> {
    type_name.parse::<OptionType>().ok().map(|ty| ty.validator())
}

const BOOLEANS_TRUE: &[&str] = &["y", "yes", "on", "1", "true", "t"];
const BOOLEANS_FALSE: &[&str] = &["n", "no", "off", "0", "false", "f"];

fn check_str(raw: &str) -> Result<Literal, TypeConversionError> {
    Ok(Literal::str(raw))
}

fn check_jsonarg(raw: &str) -> Result<Literal, TypeConversionError> {
    Ok(Literal::str(raw.trim()))
}

fn check_int(raw: &str) -> Result<Literal, TypeConversionError> {
    let digits = strip_digit_separators(raw.trim())
        .ok_or_else(|| TypeConversionError::new(raw, OptionType::Int, "invalid digit grouping"))?;
    digits
        .parse::<i64>()
        .map(Literal::Int)
        .map_err(|err| TypeConversionError::new(raw, OptionType::Int, err.to_string()))
}

/// Removes `_` between digits; rejects leading, trailing, or doubled ones.
fn strip_digit_separators(text: &str) -> Option<String> {
    if !text.contains('_') {
        return Some(text.to_string());
    }
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (idx, ch) in chars.iter().enumerate() {
        if *ch == '_' {
            let before = idx.checked_sub(1).and_then(|i| chars.get(i));
            let after = chars.get(idx + 1);
            match (before, after) {
                (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => continue,
                _ => return None,
            }
        }
        out.push(*ch);
    }
    Some(out)
}

fn check_float(raw: &str) -> Result<Literal, TypeConversionError> {
    let digits = strip_digit_separators(raw.trim())
        .ok_or_else(|| TypeConversionError::new(raw, OptionType::Float, "invalid digit grouping"))?;
    digits
        .parse::<f64>()
        .map(Literal::Float)
        .map_err(|err| TypeConversionError::new(raw, OptionType::Float, err.to_string()))
}

fn check_bool(raw: &str) -> Result<Literal, TypeConversionError> {
    let lowered = raw.trim().to_lowercase();
    if BOOLEANS_TRUE.contains(&lowered.as_str()) {
        Ok(Literal::Bool(true))
    } else if BOOLEANS_FALSE.contains(&lowered.as_str()) {
        Ok(Literal::Bool(false))
    } else {
        Err(TypeConversionError::new(
            raw,
            OptionType::Bool,
            format!(
                "expected one of {} or {}",
                BOOLEANS_TRUE.join("/"),
                BOOLEANS_FALSE.join("/")
            ),
        ))
    }
}

fn check_list(raw: &str) -> Result<Literal, TypeConversionError> {
    Ok(Literal::List(raw.split(',').map(Literal::str).collect()))
}

fn check_dict(raw: &str) -> Result<Literal, TypeConversionError> {
    if raw.starts_with('{') {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|err| {
            TypeConversionError::new(raw, OptionType::Dict, format!("invalid JSON: {err}"))
        })?;
        return match value {
            serde_json::Value::Object(_) => Ok(Literal::from_json(&value)),
            _ => Err(TypeConversionError::new(
                raw,
                OptionType::Dict,
                "JSON value is not an object",
            )),
        };
    }

    if !raw.contains('=') {
        return Err(TypeConversionError::new(
            raw,
            OptionType::Dict,
            "could not parse JSON or key=value",
        ));
    }

    let mut entries: Vec<(Literal, Literal)> = Vec::new();
    for field in split_key_value_fields(raw.trim()) {
        let Some((key, value)) = field.split_once('=') else {
            return Err(TypeConversionError::new(
                raw,
                OptionType::Dict,
                format!("field '{field}' is not key=value"),
            ));
        };
        let key = Literal::str(key);
        let value = Literal::str(value);
        match entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }
    Ok(Literal::Dict(entries))
}

/// Splits `a=1, b="x y"` style text on unquoted commas and spaces.
fn split_key_value_fields(text: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut buffer = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in text.chars() {
        if escaped {
            buffer.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if quote.is_none() && (ch == '\'' || ch == '"') {
            quote = Some(ch);
        } else if quote == Some(ch) {
            quote = None;
        } else if quote.is_none() && (ch == ',' || ch == ' ') {
            if !buffer.is_empty() {
                fields.push(std::mem::take(&mut buffer));
            }
        } else {
            buffer.push(ch);
        }
    }
    if !buffer.is_empty() {
        fields.push(buffer);
    }
    fields
}

fn check_path(raw: &str) -> Result<Literal, TypeConversionError> {
    Ok(Literal::Str(expand_user(&expand_vars(raw))))
}

fn expand_user(path: &str) -> String {
    let home = || env::var("HOME").ok();
    if path == "~" {
        return home().unwrap_or_else(|| path.to_string());
    }
    match path.strip_prefix("~/") {
        Some(rest) => match home() {
            Some(home) => format!("{}/{rest}", home.trim_end_matches('/')),
            None => path.to_string(),
        },
        None => path.to_string(),
    }
}

/// Expands `$NAME` and `${NAME}`; unknown variables are left untouched.
fn expand_vars(text: &str) -> String {
    static VAR_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\$(?:([A-Za-z0-9_]+)|\{([^}]*)\})").unwrap());

    VAR_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            env::var(name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

fn check_bytes(raw: &str) -> Result<Literal, TypeConversionError> {
    human_to_bytes(raw, false)
        .map(Literal::Int)
        .map_err(|reason| TypeConversionError::new(raw, OptionType::Bytes, reason))
}

fn check_bits(raw: &str) -> Result<Literal, TypeConversionError> {
    human_to_bytes(raw, true)
        .map(Literal::Int)
        .map_err(|reason| TypeConversionError::new(raw, OptionType::Bits, reason))
}

fn unit_multiplier(prefix: char) -> Option<f64> {
    let shift = match prefix {
        'B' => 0,
        'K' => 10,
        'M' => 20,
        'G' => 30,
        'T' => 40,
        'P' => 50,
        'E' => 60,
        'Z' => 70,
        'Y' => 80,
        _ => return None,
    };
    Some(2f64.powi(shift))
}

/// Parses a human-readable size such as `10M`, `1.5KB`, or `8Mb`.
fn human_to_bytes(raw: &str, is_bits: bool) -> Result<i64, String> {
    static SIZE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\s*(\d*\.?\d*)\s*([A-Za-z]+)?").unwrap());

    let caps = SIZE_RE
        .captures(raw)
        .ok_or_else(|| format!("can't interpret '{raw}' as a size"))?;
    let number: f64 = caps[1]
        .parse()
        .map_err(|_| format!("can't interpret '{raw}' as a size"))?;

    let scaled = match caps.get(2).map(|m| m.as_str()) {
        None => number,
        Some(unit) => {
            let mut chars = unit.chars();
            let prefix = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or('B');
            let multiplier = unit_multiplier(prefix)
                .ok_or_else(|| format!("unit '{unit}' must start with one of B K M G T P E Z Y"))?;
            let (class, class_name) = if is_bits { ('b', "bit") } else { ('B', "byte") };
            if unit.chars().count() > 1
                && !unit.to_lowercase().contains(class_name)
                && chars.next() != Some(class)
            {
                return Err(if prefix == 'B' {
                    format!("expect {class} or {class_name}")
                } else {
                    format!("expect {prefix}{class} or {prefix}")
                });
            }
            number * multiplier
        }
    };

    let rounded = scaled.round_ties_even();
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(format!("'{raw}' is out of range"));
    }
    Ok(rounded as i64)
}
