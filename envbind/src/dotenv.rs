//! `.env` file reader producing a [`Snapshot`].
//!
//! Supported line forms:
//!
//! ```text
//! # comment
//! PORT=8080
//! export NAME = svc          # trailing comment
//! GREETING="hello\nworld"    # escapes and $VARS expand
//! RAW='kept ${AS_IS}'        # single quotes are literal
//! URL=http://${HOST:=localhost}:${PORT}
//! level: debug               # YAML-style separator
//! ```
//!
//! Variable references resolve against keys parsed earlier in the same input.
//! Reading never touches the process environment.

use crate::error::DotenvError;
use crate::snapshot::Snapshot;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Pattern for an optional leading `export` keyword
static EXPORT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:export\s+)?(.*?)\s*$").unwrap());

/// Parse dotenv text into ordered `(KEY, value)` pairs.
///
/// Keys are upper-cased. A key may appear more than once; consumers that
/// collect into a [`Snapshot`] keep the last value.
pub fn parse(input: &str) -> Result<Vec<(String, String)>, DotenvError> {
    let mut entries = Vec::new();
    let mut seen: HashMap<String, String> = HashMap::new();

    for (index, line) in input.lines().enumerate() {
        if is_ignored_line(line) {
            continue;
        }

        let (key, value) = parse_line(line, &seen).map_err(|message| DotenvError::Parse {
            line: index + 1,
            message,
        })?;
        tracing::trace!(line = index + 1, key = %key, "parsed dotenv entry");

        seen.insert(key.clone(), value.clone());
        entries.push((key, value));
    }

    Ok(entries)
}

/// Parse dotenv text into a snapshot.
pub fn from_str(input: &str) -> Result<Snapshot, DotenvError> {
    Ok(parse(input)?.into_iter().collect())
}

/// Read and parse a single dotenv file.
pub fn from_path(path: impl AsRef<Path>) -> Result<Snapshot, DotenvError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|e| DotenvError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "read dotenv file");
    from_str(&input)
}

/// Read several dotenv files in order; later files overwrite earlier ones.
pub fn from_paths<I, P>(paths: I) -> Result<Snapshot, DotenvError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut snapshot = Snapshot::new();
    for path in paths {
        snapshot.extend(from_path(path)?.iter());
    }
    Ok(snapshot)
}

fn is_ignored_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn parse_line(line: &str, seen: &HashMap<String, String>) -> Result<(String, String), String> {
    let line = strip_comment(line);

    let equals = line.find('=');
    let colon = line.find(':');
    let split_at = match (equals, colon) {
        (Some(e), Some(c)) => e.min(c),
        (Some(i), None) | (None, Some(i)) => i,
        (None, None) => return Err("can't separate key from value".to_string()),
    };
    let (raw_key, raw_value) = (&line[..split_at], &line[split_at + 1..]);

    let key = EXPORT_PATTERN
        .captures(raw_key)
        .and_then(|caps| caps.get(1))
        .map_or(raw_key, |m| m.as_str())
        .to_uppercase();
    if key.is_empty() {
        return Err("empty key".to_string());
    }

    Ok((key, parse_value(raw_value, seen)))
}

/// Drop everything from the first `#` that is not inside quotes.
fn strip_comment(line: &str) -> &str {
    let mut quote = None;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        match (quote, c) {
            (Some('"'), '\\') if !escaped => {
                escaped = true;
                continue;
            }
            (Some(q), c) if c == q && !escaped => quote = None,
            (None, '"' | '\'') => quote = Some(c),
            (None, '#') => return &line[..i],
            _ => {}
        }
        escaped = false;
    }

    line
}

fn parse_value(raw: &str, seen: &HashMap<String, String>) -> String {
    let value = raw.trim();
    if value.len() < 2 {
        return value.to_string();
    }

    if value.starts_with('\'') && value.ends_with('\'') {
        return value[1..value.len() - 1].to_string();
    }

    if value.starts_with('"') && value.ends_with('"') {
        let unescaped = unescape(&value[1..value.len() - 1]);
        return expand_references(&unescaped, seen);
    }

    expand_references(value, seen)
}

/// Expand `\n` and `\r`, unescape other characters. `\$` is kept for
/// [`expand_references`].
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('$') => out.push_str("\\$"),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// Replace `$NAME`, `${NAME}` and `${NAME:=default}` with earlier values.
fn expand_references(value: &str, seen: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find(['$', '\\']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("\\$") {
            out.push('$');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix('\\') {
            out.push('\\');
            rest = after;
            continue;
        }

        let after = &tail[1..];
        if let Some(braced) = after.strip_prefix('{') {
            if let Some(close) = braced.find('}') {
                let body = &braced[..close];
                let (name, default) = body.split_once(":=").unwrap_or((body, ""));
                let name = name.trim().to_uppercase();
                out.push_str(seen.get(&name).map_or(default, String::as_str));
                rest = &braced[close + 1..];
                continue;
            }
        } else {
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            if len > 0 {
                let name = after[..len].to_uppercase();
                out.push_str(seen.get(&name).map_or("", String::as_str));
                rest = &after[len..];
                continue;
            }
        }

        out.push('$');
        rest = after;
    }

    out.push_str(rest);
    out
}
