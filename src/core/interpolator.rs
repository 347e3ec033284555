// src/core/interpolator.rs

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;
use thiserror::Error;

lazy_static! {
    /// `<%= path %>` (markup-escaped), `<%~ path %>` (string-escaped) or
    /// `<%- path %>` (raw).
    static ref TOKEN_RE: Regex =
        Regex::new(r"<%([=~-])\s*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\s*%>")
            .expect("TOKEN_RE is a valid regex");
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("<%{marker} {path} %> not found.")]
    NotFound { marker: char, path: String },
    #[error("<%{marker} {path} %> is not a scalar value and cannot be rendered.")]
    NotScalar { marker: char, path: String },
}

/// Expands template tokens against a JSON context.
///
/// Only value substitution is supported. Anything else that looks like a tag
/// is left untouched.
///
/// | Token | Rendering |
/// |---|---|
/// | `<%= path %>` | XML/HTML-escaped |
/// | `<%~ path %>` | escaped for the inside of a double-quoted JSON or JavaScript string |
/// | `<%- path %>` | verbatim |
#[derive(Debug, Clone, Copy)]
pub struct Interpolator<'a> {
    context: &'a Value,
}

impl<'a> Interpolator<'a> {
    pub fn new(context: &'a Value) -> Self {
        Self { context }
    }

    /// Replaces every token in `template`. The first unresolved token aborts
    /// the expansion.
    pub fn expand_string(&self, template: &str) -> Result<String, InterpolationError> {
        let mut first_error = None;

        let expanded = TOKEN_RE.replace_all(template, |caps: &Captures<'_>| {
            let marker = caps[1].chars().next().unwrap_or('-');
            let path = &caps[2];
            match self.resolve(path, marker) {
                Ok(value) => value,
                Err(e) => {
                    first_error.get_or_insert(e);
                    String::new()
                }
            }
        });

        match first_error {
            Some(e) => Err(e),
            None => Ok(expanded.into_owned()),
        }
    }

    fn resolve(&self, path: &str, marker: char) -> Result<String, InterpolationError> {
        let value = path
            .split('.')
            .try_fold(self.context, |node, key| node.get(key))
            .ok_or_else(|| InterpolationError::NotFound {
                marker,
                path: path.to_string(),
            })?;

        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            Value::Array(_) | Value::Object(_) => {
                return Err(InterpolationError::NotScalar {
                    marker,
                    path: path.to_string(),
                });
            }
        };

        Ok(match marker {
            '=' => escape_markup(&rendered),
            '~' => escape_string_literal(rendered),
            _ => rendered,
        })
    }
}

/// Escapes the characters that are significant in XML and HTML.
fn escape_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a value for a double-quoted JSON or JavaScript string literal,
/// without the surrounding quotes.
///
/// U+2028 and U+2029 are escaped too: they end a line inside ES3 string
/// literals, and ExtendScript is ES3.
fn escape_string_literal(raw: String) -> String {
    let quoted = Value::String(raw).to_string();
    quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(&quoted)
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
