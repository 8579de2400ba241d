// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expansion of variable references inside a single scalar.
//!
//! Resolution works inside-out: each pass replaces every innermost `${...}` (one
//! whose content holds no braces) in the whole string at once, so nested
//! references such as `${A:-${B:-final}}` resolve over successive passes. The
//! number of passes is bounded, which caps self-referential defaults like
//! `${R:-${R}}` to bounded work.
//!
//! `$${NAME}` is an escape for the literal text `${NAME}`. Escapes are masked with
//! sentinel characters before the first pass and restored after the last one, so
//! they never take part in resolution.

use crate::domain::{ExpandError, Reference, Result};
use crate::ports::Environment;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Number of resolution passes performed when none is configured.
pub const DEFAULT_BUDGET: usize = 10;

const MASK_OPEN: char = '\u{0}';
const MASK_CLOSE: char = '\u{1}';

/// Innermost reference: `${` followed by brace-free content and `}`.
static REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^{}]+)\}").unwrap());

/// Escaped reference: `$${NAME}`.
static ESCAPED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\$\{([^{}]*)\}").unwrap());

/// Masked escape produced by [`mask`].
static MASKED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x00([^\x00\x01]*)\x01").unwrap());

/// Replaces every variable reference in `text`.
///
/// Performs at most `budget` passes. References still present afterwards are left
/// in place unless `strict` is set, in which case `UnresolvedReference` is returned.
///
/// # Examples
///
/// ```rust
/// use cfgexpand::adapters::MapEnvironment;
/// use cfgexpand::service::resolver::{expand, DEFAULT_BUDGET};
///
/// let mut env = MapEnvironment::new().with_value("HOST", "example.com");
/// let url = expand("${PROTO:http}://${HOST:localhost}", &mut env, DEFAULT_BUDGET, false).unwrap();
/// assert_eq!(url, "http://example.com");
/// ```
pub fn expand<E>(text: &str, env: &mut E, budget: usize, strict: bool) -> Result<String>
where
    E: Environment + ?Sized,
{
    if !text.contains('$') {
        return Ok(text.to_string());
    }

    let mut current = mask(text);
    let mut passes = 0;

    while passes < budget && REFERENCE.is_match(&current) {
        let next = substitute_pass(&current, env)?;
        passes += 1;
        if next == current {
            break;
        }
        current = next;
    }

    if REFERENCE.is_match(&current) {
        tracing::warn!(
            "Variable references left unresolved after {} passes: {}",
            passes,
            current
        );
        if strict {
            return Err(ExpandError::UnresolvedReference {
                text: unmask(&current),
                passes,
            });
        }
    } else {
        tracing::trace!("Resolved scalar in {} passes", passes);
    }

    Ok(unmask(&current))
}

/// Resolves every innermost reference of `text` in a single pass.
fn substitute_pass<E>(text: &str, env: &mut E) -> Result<String>
where
    E: Environment + ?Sized,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in REFERENCE.captures_iter(text) {
        let (whole, content) = match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(content)) => (whole, content),
            _ => continue,
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&Reference::parse(content.as_str()).resolve(env)?);
        last = whole.end();
    }

    out.push_str(&text[last..]);
    Ok(out)
}

fn mask(text: &str) -> String {
    ESCAPED
        .replace_all(text, |caps: &Captures| {
            format!("{}{}{}", MASK_OPEN, &caps[1], MASK_CLOSE)
        })
        .into_owned()
}

fn unmask(text: &str) -> String {
    if !text.contains(MASK_OPEN) {
        return text.to_string();
    }
    MASKED
        .replace_all(text, |caps: &Captures| format!("${{{}}}", &caps[1]))
        .into_owned()
}
