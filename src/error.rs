//! Error types for Vectorizar operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Vectorizar operations.
///
/// Configuration errors (inconsistent document-frequency bounds, degenerate
/// vocabularies) are raised eagerly at `fit`/`transform` entry and are
/// unrecoverable at the call site. Per-instance anomalies — an
/// out-of-vocabulary feature at transform time, an unknown label — are *not*
/// errors; they take the degrade-gracefully path instead.
///
/// # Examples
///
/// ```
/// use vectorizar::error::VectorizarError;
///
/// let err = VectorizarError::InvalidThreshold {
///     min_count: 3,
///     max_count: 1,
/// };
/// assert!(err.to_string().contains("max_df"));
/// ```
#[derive(Debug)]
pub enum VectorizarError {
    /// A frozen vocabulary would have zero entries.
    ///
    /// Signals a degenerate or misconfigured corpus (no extractable
    /// features, or pruning removed everything).
    EmptyVocabulary,

    /// A frozen label set would contain no label beyond the unknown sentinel.
    EmptyLabelSet,

    /// The resolved `max_df` bound covers fewer documents than `min_df`.
    InvalidThreshold {
        /// Resolved minimum document count
        min_count: usize,
        /// Resolved maximum document count
        max_count: usize,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Requested behaviour is explicitly not implemented.
    UnsupportedFeature {
        /// Feature description
        feature: String,
    },

    /// A collaborator contract was violated (e.g. the instance generator
    /// produced a unit the preprocessor knows nothing about).
    CollaboratorContract {
        /// Description of the violation
        message: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for VectorizarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorizarError::EmptyVocabulary => write!(f, "empty vocabulary"),
            VectorizarError::EmptyLabelSet => write!(f, "empty labelset"),
            VectorizarError::InvalidThreshold {
                min_count,
                max_count,
            } => {
                write!(
                    f,
                    "max_df corresponds to fewer documents than min_df \
                     (max={max_count}, min={min_count})"
                )
            }
            VectorizarError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            VectorizarError::UnsupportedFeature { feature } => {
                write!(f, "Unsupported: {feature}")
            }
            VectorizarError::CollaboratorContract { message } => {
                write!(f, "Collaborator contract violation: {message}")
            }
            VectorizarError::Io(e) => write!(f, "I/O error: {e}"),
            VectorizarError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            VectorizarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for VectorizarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VectorizarError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VectorizarError {
    fn from(err: std::io::Error) -> Self {
        VectorizarError::Io(err)
    }
}

impl From<serde_json::Error> for VectorizarError {
    fn from(err: serde_json::Error) -> Self {
        VectorizarError::Serialization(err.to_string())
    }
}

impl From<&str> for VectorizarError {
    fn from(msg: &str) -> Self {
        VectorizarError::Other(msg.to_string())
    }
}

impl From<String> for VectorizarError {
    fn from(msg: String) -> Self {
        VectorizarError::Other(msg)
    }
}

impl VectorizarError {
    /// Create an invalid hyperparameter error with descriptive context.
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, VectorizarError>;
