//! Source rendering for generated assignments.
//!
//! [`to_code`] turns a named [`Literal`] into a Python assignment laid out the
//! way `black` lays out literal collections: one line when it fits, otherwise
//! the outermost collection is exploded one element per line, recursing into
//! elements that are still too long. Output is a pure function of its inputs.

use argspec_core::Literal;

const INDENT: usize = 4;

/// Renders `name = <value>` wrapped to `line_length` characters.
///
/// The result always ends with a newline.
///
/// # Examples
///
/// ```
/// use argspec_core::Literal;
/// use argspec_gen::format::to_code;
///
/// let value = Literal::List(vec![Literal::str("a"), Literal::Bool(true)]);
/// assert_eq!(to_code("flags", &value, 79), "flags = [\"a\", True]\n");
/// assert_eq!(to_code("flags", &value, 12), "flags = [\n    \"a\",\n    True,\n]\n");
/// ```
pub fn to_code(name: &str, value: &Literal, line_length: usize) -> String {
    let mut lines = Vec::new();
    emit(&format!("{name} = "), value, "", 0, line_length, &mut lines);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn emit(
    prefix: &str,
    value: &Literal,
    suffix: &str,
    depth: usize,
    line_length: usize,
    lines: &mut Vec<String>,
) {
    let pad = " ".repeat(depth * INDENT);
    let flat = format!("{pad}{prefix}{}{suffix}", repr(value));
    if flat.chars().count() <= line_length {
        lines.push(flat);
        return;
    }

    let (open, close, items) = match value {
        Literal::List(items) if !items.is_empty() => ("[", "]", list_items(items)),
        Literal::Tuple(items) if !items.is_empty() => ("(", ")", list_items(items)),
        Literal::Dict(entries) if !entries.is_empty() => ("{", "}", dict_items(entries)),
        _ => {
            lines.push(flat);
            return;
        }
    };

    // Single-element lists and dicts carry no trailing comma; one-tuples must.
    let needs_comma = items.len() > 1 || matches!(value, Literal::Tuple(_));
    let item_suffix = if needs_comma { "," } else { "" };

    lines.push(format!("{pad}{prefix}{open}"));
    for (item_prefix, item) in items {
        emit(&item_prefix, item, item_suffix, depth + 1, line_length, lines);
    }
    lines.push(format!("{pad}{close}{suffix}"));
}

fn list_items(items: &[Literal]) -> Vec<(String, &Literal)> {
    items.iter().map(|item| (String::new(), item)).collect()
}

fn dict_items(entries: &[(Literal, Literal)]) -> Vec<(String, &Literal)> {
    entries
        .iter()
        .map(|(key, value)| (format!("{}: ", repr(key)), value))
        .collect()
}

/// Renders a literal on a single line as Python source.
pub fn repr(value: &Literal) -> String {
    match value {
        Literal::None => "None".to_string(),
        Literal::Bool(true) => "True".to_string(),
        Literal::Bool(false) => "False".to_string(),
        Literal::Int(i) => i.to_string(),
        Literal::Float(f) => float_repr(*f),
        Literal::Str(s) => quote(s),
        Literal::List(items) => format!("[{}]", join(items)),
        Literal::Tuple(items) if items.len() == 1 => format!("({},)", repr(&items[0])),
        Literal::Tuple(items) => format!("({})", join(items)),
        Literal::Dict(entries) => {
            let body: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{}: {}", repr(key), repr(value)))
                .collect();
            format!("{{{}}}", body.join(", "))
        }
    }
}

fn join(items: &[Literal]) -> String {
    items.iter().map(repr).collect::<Vec<_>>().join(", ")
}

/// Quotes a string with whichever quote needs fewer escapes; ties go to `"`.
fn quote(text: &str) -> String {
    let doubles = text.matches('"').count();
    let singles = text.matches('\'').count();
    let quote = if doubles > singles { '\'' } else { '"' };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Formats a float the way Python's `repr` does.
fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{value:e}");
        let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        return format!("{mantissa}e{sign}{digits:0>2}");
    }

    let formatted = format!("{value:?}");
    if formatted.contains('.') || formatted.contains('e') {
        formatted
    } else {
        format!("{formatted}.0")
    }
}
