// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter introspection over a script's `param(...)` header.
//!
//! Only the declared-parameter header is understood here; the rest of the
//! script text is opaque and belongs to the engine. The header grammar is
//! the PowerShell-style block of comma-separated entries, each carrying
//! optional `[Parameter(...)]`/validation attributes, an optional type
//! annotation, and a `$Name`.

use crate::params::{Parameter, ParameterKind, ParameterList};
use chrono::NaiveDate;
use thiserror::Error;

/// Malformed-header failures. Callers downgrade these to a failed load
/// state rather than propagating them further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unbalanced parentheses in param block")]
    UnbalancedParens,
    #[error("unterminated attribute or type annotation in `{0}`")]
    UnterminatedBracket(String),
    #[error("parameter declaration `{0}` has no $name")]
    MissingName(String),
    #[error("duplicate parameter name: {0}")]
    DuplicateName(String),
}

/// Parse the declared-parameter header of `content` into a typed list with
/// synthesized defaults. A script without a `param(...)` block yields an
/// empty list. `today` seeds the default for date parameters.
pub fn introspect(content: &str, today: NaiveDate) -> Result<ParameterList, ParseError> {
    let Some(block) = param_block(content)? else {
        return Ok(ParameterList::default());
    };

    let mut parameters: Vec<Parameter> = Vec::new();
    for entry in split_top_level(&block) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let parameter = parse_entry(entry, today)?;
        if parameters.iter().any(|p| p.name.eq_ignore_ascii_case(&parameter.name)) {
            return Err(ParseError::DuplicateName(parameter.name));
        }
        parameters.push(parameter);
    }
    Ok(ParameterList::new(parameters))
}

/// Locate the first `param(...)` block outside comments and strings and
/// return its inner text.
fn param_block(content: &str) -> Result<Option<String>, ParseError> {
    let chars: Vec<char> = content.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '#' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '<' if chars.get(i + 1) == Some(&'#') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '#' && chars.get(i + 1) == Some(&'>')) {
                    i += 1;
                }
                i = (i + 2).min(chars.len());
            }
            '\'' | '"' => i = skip_string(&chars, i),
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if word.eq_ignore_ascii_case("param") {
                    let mut j = i;
                    while j < chars.len() && chars[j].is_whitespace() {
                        j += 1;
                    }
                    if chars.get(j) == Some(&'(') {
                        return capture_parens(&chars, j).map(Some);
                    }
                }
            }
            _ => i += 1,
        }
    }
    Ok(None)
}

/// Skip a quoted string starting at `start`, returning the index just past
/// its closing quote. Doubled quotes escape themselves; backticks escape
/// inside double quotes.
fn skip_string(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        if chars[i] == quote {
            if chars.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        if quote == '"' && chars[i] == '`' {
            i += 2;
            continue;
        }
        i += 1;
    }
    chars.len()
}

/// Capture the text between the paren at `open` and its matching close.
fn capture_parens(chars: &[char], open: usize) -> Result<String, ParseError> {
    let mut depth = 0usize;
    let mut i = open;
    let mut inner = String::new();
    while i < chars.len() {
        match chars[i] {
            '\'' | '"' => {
                let end = skip_string(chars, i);
                inner.extend(&chars[i..end]);
                i = end;
                continue;
            }
            '(' => {
                depth += 1;
                if depth > 1 {
                    inner.push('(');
                }
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(inner);
                }
                inner.push(')');
            }
            c => inner.push(c),
        }
        i += 1;
    }
    Err(ParseError::UnbalancedParens)
}

/// Split on commas at bracket depth zero, respecting strings.
fn split_top_level(block: &str) -> Vec<String> {
    let chars: Vec<char> = block.chars().collect();
    let mut entries = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\'' | '"' => {
                let end = skip_string(&chars, i);
                current.extend(&chars[i..end]);
                i = end;
                continue;
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(chars[i]);
            }
            ')' | ']' | '}' => {
                depth -= 1;
                current.push(chars[i]);
            }
            ',' if depth == 0 => {
                entries.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
        i += 1;
    }
    entries.push(current);
    entries
}

/// Parse one `[attributes...] [type]$Name [= default]` entry.
fn parse_entry(entry: &str, today: NaiveDate) -> Result<Parameter, ParseError> {
    let mut rest = entry.trim();
    let mut mandatory = false;
    let mut declared_type: Option<String> = None;

    while rest.starts_with('[') {
        let (attribute, tail) = take_bracketed(rest)
            .ok_or_else(|| ParseError::UnterminatedBracket(entry.to_string()))?;
        let lowered = attribute.trim().to_ascii_lowercase();
        if lowered.starts_with("parameter") {
            mandatory |= mandatory_flag(&lowered);
        } else if !lowered.starts_with("alias") && !lowered.starts_with("validate") {
            // The last non-attribute bracket is the type annotation.
            declared_type = Some(attribute.trim().to_string());
        }
        rest = tail.trim_start();
    }

    if !rest.starts_with('$') {
        return Err(ParseError::MissingName(entry.to_string()));
    }
    let name: String = rest[1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        return Err(ParseError::MissingName(entry.to_string()));
    }

    // Any trailing `= default` expression is ignored; defaults are
    // synthesized from the declared type.
    let kind = declared_type
        .map(|t| kind_of(&t))
        .unwrap_or(ParameterKind::Unsupported);
    Ok(Parameter::new(name, kind, mandatory, today))
}

/// Whether a lowercased `[parameter(...)]` attribute marks its entry
/// mandatory. The flag counts bare (`Mandatory`) or assigned
/// (`Mandatory = $true`); only an assignment of `$false` to the flag itself
/// clears it, not a `$false` bound to some other setting in the attribute.
fn mandatory_flag(lowered: &str) -> bool {
    let Some(at) = lowered.find("mandatory") else {
        return false;
    };
    let tail = lowered[at + "mandatory".len()..].trim_start();
    match tail.strip_prefix('=') {
        Some(assigned) => !assigned.trim_start().starts_with("$false"),
        None => true,
    }
}

/// Return the text inside the leading bracket pair plus the remainder.
fn take_bracketed(text: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&text[1..i], &text[i + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

/// Map a declared type name onto the closed set of supported tags.
fn kind_of(declared: &str) -> ParameterKind {
    let lowered = declared.trim().to_ascii_lowercase();
    let name = lowered.strip_prefix("system.").unwrap_or(&lowered);
    if name.ends_with("[]") || name == "array" {
        return ParameterKind::StringList;
    }
    match name {
        "string" | "char" => ParameterKind::String,
        "int" | "int16" | "int32" | "int64" | "long" | "uint32" | "uint64" | "byte" | "single"
        | "float" | "double" | "decimal" => ParameterKind::Number,
        "bool" | "boolean" | "switch" => ParameterKind::Boolean,
        "datetime" => ParameterKind::DateTime,
        _ => ParameterKind::Unsupported,
    }
}

#[cfg(test)]
#[path = "introspect_tests.rs"]
mod tests;
