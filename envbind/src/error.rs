//! Error types for binding environment variables

/// Errors that can occur when binding a snapshot onto a struct.
///
/// Binding stops at the first error; the target may be partially populated.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// Required environment variable is not set.
    ///
    /// Occurs when a field tagged `required=true` finds none of its candidate
    /// variables in the snapshot. `name` is the last fully-qualified name tried.
    #[error("Environment variable '{name}' is required but not set")]
    Missing {
        /// Fully-qualified name of the missing environment variable
        name: String,
    },

    /// Failed to coerce the resolved value into the field's type.
    #[error("Failed to parse environment variable '{name}' as {type_name}: {source}")]
    Parse {
        /// Fully-qualified name of the environment variable being parsed
        name: String,
        /// Fully qualified type name that coercion was attempted for
        type_name: String,
        /// Underlying coercion failure
        source: CoerceError,
    },
}

impl BindError {
    /// Create a parse error for target type `T`
    #[doc(hidden)]
    pub fn parse_error<T>(name: impl Into<String>, source: CoerceError) -> Self {
        Self::Parse {
            name: name.into(),
            type_name: std::any::type_name::<T>().to_string(),
            source,
        }
    }

    /// Create a missing environment variable error
    #[doc(hidden)]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    /// Fully-qualified variable name the error refers to.
    pub fn name(&self) -> &str {
        match self {
            Self::Missing { name } | Self::Parse { name, .. } => name,
        }
    }
}

/// Errors produced when a single string cannot be converted to a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoerceError {
    #[error("invalid boolean '{input}'")]
    Bool { input: String },

    #[error("invalid {kind} '{input}': {message}")]
    Int {
        kind: &'static str,
        input: String,
        message: String,
    },

    #[error("invalid {kind} '{input}': {message}")]
    Float {
        kind: &'static str,
        input: String,
        message: String,
    },

    #[error("invalid duration '{input}': {message}")]
    Duration { input: String, message: String },

    /// A mapping entry without a `=` separator.
    #[error("malformed mapping entry '{entry}'")]
    MalformedEntry { entry: String },
}

/// Errors produced while reading `.env` input.
#[derive(Debug, thiserror::Error)]
pub enum DotenvError {
    #[error("Failed to read dotenv file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A line that is neither blank, a comment, nor a `KEY=VALUE` pair.
    #[error("Failed to parse dotenv line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Errors produced by template substitution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// Strict mode found a placeholder with no value and no inline default.
    #[error("Environment variable '{name}' is not set")]
    Unset { name: String },
}
