//! Error types for Lexicalc

use std::fmt;

use thiserror::Error;

/// Lexicalc errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Tokenizer errors
    /// A token state was entered on a character it does not handle
    ///
    /// **Triggered by:** A state table mapping a character to a comment state
    /// whose trigger is a different character, or a state that consumed nothing
    /// **Example:** Mapping `#` to a C-style comment state
    /// **Recovery:** None - fix the state table
    #[error("Incorrect state usage: {state} state cannot start at {found}")]
    IncorrectStateUsage {
        /// Name of the state that was misused
        state: String,
        /// Description of the character found at the cursor
        found: String,
    },

    // Function errors
    /// Function called with an unsupported number of parameters
    ///
    /// **Triggered by:** `Min(1)`, `Sum(1)`, `Choose(5, "a")`
    #[error("Wrong parameter count for {function}: expected {expected}, got {got}")]
    WrongParamCount {
        /// Function name
        function: String,
        /// Accepted parameter counts
        expected: String,
        /// Actual parameter count
        got: usize,
    },

    /// Parameters have the right count but unusable values
    #[error("Invalid arguments for function {function}: {reason}")]
    InvalidArguments {
        /// Function name
        function: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Reference to a function that is not in the collection
    #[error("Undefined function: {name}")]
    UndefinedFunction {
        /// Function name
        name: String,
    },

    // Coercion errors
    /// A value could not be converted to the requested type
    ///
    /// **Triggered by:** `"abc"` to Int64, `1e40` to Int32, an array to DateTime
    #[error("Cannot convert {from} value '{value}' to {to}")]
    InvalidConversion {
        /// Source type name
        from: String,
        /// Target type name
        to: String,
        /// Textual form of the source value
        value: String,
    },

    /// Invalid comparison between incompatible types
    #[error("Invalid comparison between types {left_type} and {right_type}")]
    InvalidComparison {
        /// Left operand type
        left_type: String,
        /// Right operand type
        right_type: String,
    },

    /// Invalid operation for given types
    #[error("Invalid operation: {op} on types {left_type} and {right_type}")]
    InvalidOperation {
        /// Operation name
        op: String,
        /// Left operand type
        left_type: String,
        /// Right operand type
        right_type: String,
    },

    // External errors
    /// Reading an underlying character source failed
    #[error("I/O error: {0}")]
    Io(String),
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Programming error that aborts the current call and must not be retried
    Fatal,
    /// Expression error that is reported to the caller
    Recoverable,
}

/// Stable error category codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// State table misuse
    IncorrectState,
    /// Arity violation
    WrongParamCount,
    /// Unusable argument values
    InvalidArguments,
    /// Function lookup failed
    UndefinedFunction,
    /// Coercion failed
    InvalidConversion,
    /// Comparison of incompatible values
    InvalidComparison,
    /// Arithmetic on incompatible values
    InvalidOperation,
    /// Character source failure
    Io,
}

impl ErrorCode {
    /// Upper snake case code, as reported to expression authors
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::IncorrectState => "INCORRECT_STATE",
            ErrorCode::WrongParamCount => "WRONG_PARAM_COUNT",
            ErrorCode::InvalidArguments => "INVALID_ARGUMENTS",
            ErrorCode::UndefinedFunction => "UNDEFINED_FUNCTION",
            ErrorCode::InvalidConversion => "INVALID_CONVERSION",
            ErrorCode::InvalidComparison => "INVALID_COMPARISON",
            ErrorCode::InvalidOperation => "INVALID_OPERATION",
            ErrorCode::Io => "IO",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Create an incorrect state usage error for the character at the cursor
    pub fn incorrect_state(state: impl Into<String>, found: Option<char>) -> Self {
        Error::IncorrectStateUsage {
            state: state.into(),
            found: match found {
                Some(c) => format!("{:?}", c),
                None => "end of input".to_string(),
            },
        }
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments(function: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidArguments {
            function: function.into(),
            reason: reason.into(),
        }
    }

    /// Category code of this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::IncorrectStateUsage { .. } => ErrorCode::IncorrectState,
            Error::WrongParamCount { .. } => ErrorCode::WrongParamCount,
            Error::InvalidArguments { .. } => ErrorCode::InvalidArguments,
            Error::UndefinedFunction { .. } => ErrorCode::UndefinedFunction,
            Error::InvalidConversion { .. } => ErrorCode::InvalidConversion,
            Error::InvalidComparison { .. } => ErrorCode::InvalidComparison,
            Error::InvalidOperation { .. } => ErrorCode::InvalidOperation,
            Error::Io(_) => ErrorCode::Io,
        }
    }

    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::IncorrectStateUsage { .. } => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Recoverable,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Result type for Lexicalc operations
pub type Result<T> = std::result::Result<T, Error>;
