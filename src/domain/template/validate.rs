//! Authoring-time template checks.
//!
//! Advisory only: these run when the content-management surface saves a
//! template, never on the send path.

use std::collections::HashSet;

use super::render::placeholders;

/// Maximum template body size in bytes.
pub const MAX_BODY_BYTES: usize = 2000;

/// Outcome of an authoring-time check.
#[derive(Debug, Clone)]
pub struct TemplateCheck {
    pub pass: bool,
    pub reasons: Vec<String>,
}

/// Check a template body for authoring mistakes.
///
/// Flags duplicate placeholder names, oversized bodies, and a missing
/// sender-identification prefix.
pub fn validate_body(body: &str, sender_prefix: &str) -> TemplateCheck {
    let mut reasons = Vec::new();

    let names = placeholders(body);
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for name in &names {
        if !seen.insert(name.as_str()) && reported.insert(name.as_str()) {
            reasons.push(format!("Duplicate placeholder: {{{{{}}}}}", name));
        }
    }

    if body.len() > MAX_BODY_BYTES {
        reasons.push(format!(
            "Body is {} bytes, maximum is {}",
            body.len(),
            MAX_BODY_BYTES
        ));
    }

    if !body.starts_with(sender_prefix) {
        reasons.push(format!("Body must start with sender prefix '{}'", sender_prefix));
    }

    TemplateCheck {
        pass: reasons.is_empty(),
        reasons,
    }
}
