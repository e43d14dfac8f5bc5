//! Variable substitution engine for template bodies.
//!
//! Rendering is a pure function over an immutable context map, built on
//! a small scanner (find `{{`, read an identifier, find `}}`) instead of
//! regex rewriting. It runs in two passes: the first substitutes every
//! placeholder with a supplied value, the second elides any placeholder
//! that remains. A partial context therefore never leaks `{{` or `}}`
//! to the recipient.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Per-dispatch variable map. Constructed for one send, never persisted.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    values: Map<String, Value>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable. Accepts anything JSON-scalar-ish; coercion to
    /// string happens at substitution time.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set a date variable, formatted before substitution.
    pub fn set_date(self, name: impl Into<String>, date: DateTime<Utc>, format: &str) -> Self {
        let formatted = date.format(format).to_string();
        self.set(name, formatted)
    }

    /// Look up a variable, coerced to its string form.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).map(|value| match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            // Arrays and objects fall back to their JSON representation
            other => other.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Render a template body against a context.
///
/// Placeholders with no supplied value collapse to the empty string,
/// not to literal braces. Malformed brace sequences are left as literal
/// text; only the well-formed `{{name}}` shape is recognized.
pub fn render(body: &str, ctx: &RenderContext) -> String {
    let substituted = rewrite_placeholders(body, |name| ctx.lookup(name));
    rewrite_placeholders(&substituted, |_| Some(String::new()))
}

/// Collect placeholder names in order of appearance, duplicates kept.
pub fn placeholders(body: &str) -> Vec<String> {
    let mut names = Vec::new();
    rewrite_placeholders(body, |name| {
        names.push(name.to_string());
        None
    });
    names
}

/// Scan `input` left to right, invoking `lookup` for every well-formed
/// `{{name}}` token. `Some(value)` replaces the token; `None` keeps it
/// verbatim for a later pass.
fn rewrite_placeholders<F>(input: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("{{") {
        match parse_name(&rest[start + 2..]) {
            Some((name, consumed)) => {
                out.push_str(&rest[..start]);
                let token_end = start + 2 + consumed;
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(&rest[start..token_end]),
                }
                rest = &rest[token_end..];
            }
            None => {
                // Not a placeholder. Emit through the first brace and
                // rescan from the next character.
                out.push_str(&rest[..start + 1]);
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parse an identifier immediately followed by `}}`. Returns the name
/// and the number of bytes consumed (identifier plus closing braces).
fn parse_name(s: &str) -> Option<(&str, usize)> {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());

    if end == 0 || !s[end..].starts_with("}}") {
        return None;
    }

    Some((&s[..end], end + 2))
}
