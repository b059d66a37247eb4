// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed script parameters and the parameter list built at parse time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared-type tag of a script parameter.
///
/// `switch` declarations normalize to `Boolean` at parse time, and every
/// array declaration normalizes to `StringList` because the invocation
/// boundary only accepts string arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    String,
    Number,
    Boolean,
    DateTime,
    StringList,
    Unsupported,
}

crate::simple_display! {
    ParameterKind {
        String => "string",
        Number => "number",
        Boolean => "boolean",
        DateTime => "datetime",
        StringList => "string[]",
        Unsupported => "unsupported",
    }
}

/// A concrete parameter value, synthesized at parse time and editable until
/// invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(NaiveDate),
    StringList(Vec<String>),
}

impl ParameterValue {
    /// Declared-type tag this value satisfies.
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Text(_) => ParameterKind::String,
            ParameterValue::Number(_) => ParameterKind::Number,
            ParameterValue::Boolean(_) => ParameterKind::Boolean,
            ParameterValue::Date(_) => ParameterKind::DateTime,
            ParameterValue::StringList(_) => ParameterKind::StringList,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Text(s) => f.write_str(s),
            ParameterValue::Number(n) => write!(f, "{}", n),
            ParameterValue::Boolean(b) => write!(f, "{}", b),
            ParameterValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            ParameterValue::StringList(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// A typed, possibly-mandatory input declared in a script's header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
    pub mandatory: bool,
    // Kept private so every write goes through the kind check in
    // `set_value`.
    value: Option<ParameterValue>,
}

impl Parameter {
    /// Create a parameter with its synthesized default value.
    pub fn new(name: impl Into<String>, kind: ParameterKind, mandatory: bool, today: NaiveDate) -> Self {
        Self {
            name: name.into(),
            kind,
            mandatory,
            value: default_value(kind, today),
        }
    }

    /// Present for every supported kind immediately after a successful parse;
    /// absent only when the declared type is unsupported.
    pub fn value(&self) -> Option<&ParameterValue> {
        self.value.as_ref()
    }

    /// Replace the bound value. The new value must match the declared kind;
    /// unsupported parameters cannot be assigned. Returns whether the value
    /// was set.
    pub fn set_value(&mut self, value: ParameterValue) -> bool {
        if self.kind != value.kind() {
            return false;
        }
        self.value = Some(value);
        true
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "[{}, {}]", self.name, value),
            None => write!(f, "[{}, -]", self.name),
        }
    }
}

/// Closed default table: one synthesized value per supported declared type.
///
/// Dates deliberately default to today rather than some minimal epoch date;
/// the value pre-fills an operator-facing form.
fn default_value(kind: ParameterKind, today: NaiveDate) -> Option<ParameterValue> {
    match kind {
        ParameterKind::String => Some(ParameterValue::Text(String::new())),
        ParameterKind::Number => Some(ParameterValue::Number(0.0)),
        ParameterKind::Boolean => Some(ParameterValue::Boolean(false)),
        ParameterKind::DateTime => Some(ParameterValue::Date(today)),
        ParameterKind::StringList => Some(ParameterValue::StringList(Vec::new())),
        ParameterKind::Unsupported => None,
    }
}

/// Ordered parameter sequence built once per successful parse.
///
/// Order is declaration order; names are unique (case-insensitively, as the
/// script language treats them).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterList(Vec<Parameter>);

impl ParameterList {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self(parameters)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Parameter] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.0.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Replace the value of a named parameter before invocation.
    ///
    /// The new value must match the declared kind; unsupported parameters
    /// cannot be assigned. Returns whether a value was set.
    pub fn set_value(&mut self, name: &str, value: ParameterValue) -> bool {
        match self.0.iter_mut().find(|p| p.name.eq_ignore_ascii_case(name)) {
            Some(parameter) => parameter.set_value(value),
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
