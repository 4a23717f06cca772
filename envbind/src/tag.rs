//! Parsing of per-field `#[env("...")]` metadata.

/// Parsed form of a field's tag string.
///
/// A tag is a comma-separated list of tokens. Tokens without `=` are candidate
/// variable names, tried in order. `key=value` tokens set options:
///
/// - `default=<literal>`: value used when no candidate is present, kept exactly
///   as written after the `=` (surrounding spaces included)
/// - `required=true`: fail when no candidate is present
///
/// Unknown keys are ignored so that tags written for newer versions still parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Candidate variable names, never empty after [`Tag::parse`].
    pub names: Vec<String>,
    /// Literal default value.
    pub default: Option<String>,
    /// Whether a missing variable is an error.
    pub required: bool,
}

impl Tag {
    /// Parse `raw` for the field called `field_name`.
    ///
    /// When the tag names no candidate, the field name upper-cased is used.
    pub fn parse(raw: &str, field_name: &str) -> Self {
        let mut tag = Self::default();

        for token in raw.split(',') {
            if token.trim().is_empty() {
                continue;
            }

            match token.split_once('=') {
                Some((key, value)) => match key.trim().to_ascii_lowercase().as_str() {
                    "default" => tag.default = Some(value.to_string()),
                    "required" => tag.required = value.trim().eq_ignore_ascii_case("true"),
                    _ => {}
                },
                None => tag.names.push(token.trim().to_string()),
            }
        }

        if tag.names.is_empty() {
            tag.names.push(field_name.to_uppercase());
        }

        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tag_falls_back_to_field_name() {
        let tag = Tag::parse("", "max_connections");
        assert_eq!(tag.names, vec!["MAX_CONNECTIONS"]);
        assert_eq!(tag.default, None);
        assert!(!tag.required);
    }

    #[test]
    fn test_candidates_keep_declaration_order() {
        let tag = Tag::parse("HTTP_PORT, PORT", "port");
        assert_eq!(tag.names, vec!["HTTP_PORT", "PORT"]);
    }

    #[test]
    fn test_default_and_required() {
        let tag = Tag::parse("PORT,default=8080,required=TRUE", "port");
        assert_eq!(tag.names, vec!["PORT"]);
        assert_eq!(tag.default.as_deref(), Some("8080"));
        assert!(tag.required);
    }

    #[test]
    fn test_required_only_when_true() {
        assert!(!Tag::parse("NAME,required=yes", "name").required);
        assert!(!Tag::parse("NAME,required=false", "name").required);
    }

    #[test]
    fn test_default_is_literal() {
        let tag = Tag::parse("URL,default=a=b", "url");
        assert_eq!(tag.default.as_deref(), Some("a=b"));
    }

    #[test]
    fn test_default_keeps_surrounding_spaces() {
        let tag = Tag::parse("SEP, default= - ,required = true", "sep");
        assert_eq!(tag.names, vec!["SEP"]);
        assert_eq!(tag.default.as_deref(), Some(" - "));
        assert!(tag.required);

        let tag = Tag::parse("NAME,default=a ", "name");
        assert_eq!(tag.default.as_deref(), Some("a "));
    }

    #[test]
    fn test_options_without_names_fall_back() {
        let tag = Tag::parse("default=5", "retries");
        assert_eq!(tag.names, vec!["RETRIES"]);
        assert_eq!(tag.default.as_deref(), Some("5"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let tag = Tag::parse("KEY,secret=true,Default=x", "key");
        assert_eq!(tag.names, vec!["KEY"]);
        assert_eq!(tag.default.as_deref(), Some("x"));
        assert!(!tag.required);
    }
}
