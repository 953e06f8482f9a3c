//! Style errors.

/// Result type for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a value or selector was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The tokenizer refused the value.
    #[error("{message} (line {line}, column {column})")]
    Parse {
        /// What went wrong.
        message: String,
        /// 1-based line.
        line: u32,
        /// Column within the line.
        column: u32,
    },

    /// The selector cannot be anchored to an instance class.
    #[error("selector '{selector}' cannot be scoped: {message}")]
    InvalidSelector {
        /// The offending selector.
        selector: String,
        /// What went wrong.
        message: String,
    },

    /// The value may not appear in a declaration.
    #[error("rejected value for '{property}': {message}")]
    InvalidValue {
        /// Property or attribute the value was meant for.
        property: String,
        /// What went wrong.
        message: String,
    },
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create a value error.
    pub fn invalid_value(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            message: message.into(),
        }
    }
}
