//! `${NAME}` / `${NAME:=default}` substitution over a [`Snapshot`].
//!
//! Independent of the binder: useful for connection strings or command lines
//! assembled from the same variables.
//!
//! ```rust
//! use envbind::template::{expand, TemplateOptions};
//! use envbind::Snapshot;
//!
//! let env: Snapshot = [("PORT", "9090")].into_iter().collect();
//! let out = expand("${ip:=127.0.0.1}:${port:=8080}", &env, &TemplateOptions::default()).unwrap();
//! assert_eq!(out, "127.0.0.1:9090");
//! ```

use crate::error::TemplateError;
use crate::snapshot::Snapshot;
use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern for `${...}` placeholders
static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{.*?\}").unwrap());

/// Marker between a placeholder's name and its inline default.
const DEFAULT_MARKER: &str = ":=";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateOptions {
    /// Fail on placeholders that are unset and have no inline default.
    pub strict: bool,
}

impl TemplateOptions {
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Replace every placeholder in `input`.
///
/// Names are trimmed and upper-cased before lookup. A present variable wins
/// over the inline default; substituted values are trimmed.
pub fn expand(
    input: &str,
    snapshot: &Snapshot,
    options: &TemplateOptions,
) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(input.len());
    let mut last = 0;

    for placeholder in PLACEHOLDER_PATTERN.find_iter(input) {
        let body = &input[placeholder.start() + 2..placeholder.end() - 1];
        output.push_str(&input[last..placeholder.start()]);
        output.push_str(resolve(body, snapshot, options)?.trim());
        last = placeholder.end();
    }

    output.push_str(&input[last..]);
    Ok(output)
}

fn resolve<'a>(
    body: &'a str,
    snapshot: &'a Snapshot,
    options: &TemplateOptions,
) -> Result<&'a str, TemplateError> {
    let (name, default) = match body.split_once(DEFAULT_MARKER) {
        Some((name, default)) => (name, default),
        None => (body, ""),
    };
    let name = name.trim().to_uppercase();

    match snapshot.get(&name) {
        Some(value) => {
            tracing::trace!(key = %name, "placeholder resolved from snapshot");
            Ok(value)
        }
        None if default.is_empty() && options.strict => Err(TemplateError::Unset { name }),
        None => {
            tracing::trace!(key = %name, "placeholder resolved from default");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Snapshot {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_expand_uses_snapshot_then_default() {
        let snapshot = env(&[("PORT", "9090")]);
        let out = expand(
            "Server ip is :${ip:=127.0.0.1},port is ${port:=8080}",
            &snapshot,
            &TemplateOptions::default(),
        )
        .unwrap();
        assert_eq!(out, "Server ip is :127.0.0.1,port is 9090");
    }

    #[test]
    fn test_expand_unset_is_empty_when_lenient() {
        let out = expand("Hello ${test} !", &Snapshot::new(), &TemplateOptions::default()).unwrap();
        assert_eq!(out, "Hello  !");
    }

    #[test]
    fn test_expand_strict_fails_on_unset() {
        let err = expand(
            "Hello ${ test } !",
            &Snapshot::new(),
            &TemplateOptions::default().strict(true),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TemplateError::Unset {
                name: "TEST".to_string()
            }
        );
    }

    #[test]
    fn test_expand_strict_accepts_inline_default() {
        let out = expand(
            "${user:=guest}",
            &Snapshot::new(),
            &TemplateOptions::default().strict(true),
        )
        .unwrap();
        assert_eq!(out, "guest");
    }

    #[test]
    fn test_expand_trims_values_and_repeats() {
        let snapshot = env(&[("NAME", "  svc  ")]);
        let out = expand("${name}/${name}", &snapshot, &TemplateOptions::default()).unwrap();
        assert_eq!(out, "svc/svc");
    }

    #[test]
    fn test_expand_without_placeholders() {
        let out = expand("plain $text {x}", &Snapshot::new(), &TemplateOptions::default()).unwrap();
        assert_eq!(out, "plain $text {x}");
    }
}
