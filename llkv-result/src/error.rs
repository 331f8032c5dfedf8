use std::fmt;
use thiserror::Error;

/// Unified error type for the LLKV function catalog.
///
/// Every crate in the workspace returns this enum so failures propagate with
/// `?` across crate boundaries. Variants fall into two phases:
///
/// - **Construction time** ([`Error::ConfigurationError`]): raised while a
///   catalog is being assembled. These are programmer mistakes and the owning
///   process should abort startup instead of running with a partial catalog.
/// - **Query time** ([`Error::FunctionNotFound`], [`Error::InvalidArgumentError`]):
///   raised while compiling or executing a query and reported back to the
///   caller as a diagnostic.
///
/// # Thread Safety
///
/// `Error` implements `Send` and `Sync`, so it can cross query-compilation
/// threads freely.
#[derive(Error, Debug)]
pub enum Error {
    /// Arrow library error during accumulator output construction.
    ///
    /// Aggregate implementations build one-row Arrow arrays for their
    /// intermediate and final values; failures there surface through this
    /// variant.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Invalid catalog configuration detected while building a catalog.
    ///
    /// This error occurs when:
    /// - A scalar module exposes no functions
    /// - A scalar callable is bound to an instance rather than being static
    /// - A scalar callable declares a parameter or return type outside the
    ///   supported native set
    /// - Two descriptors end up with the same handle
    /// - A function is registered under an empty name
    ///
    /// # Recovery
    ///
    /// None. The registration sequence is fixed at compile time, so the fix is
    /// a code change. Callers should abort startup.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// No registered overload accepts the requested argument types.
    ///
    /// `arguments` is the already-rendered argument list, with untyped
    /// literals shown as `NULL`.
    #[error("Function {name}({arguments}) not registered")]
    FunctionNotFound { name: String, arguments: String },

    /// Invalid input passed to a function implementation.
    ///
    /// This error indicates a problem with the values a function receives at
    /// execution time:
    /// - Integer overflow (e.g., `SUM` exceeding the `i64` range)
    /// - Division by zero in `mod`
    /// - Arguments whose runtime representation does not match the declared
    ///   native signature
    ///
    /// # Recovery
    ///
    /// These errors are typically recoverable. Fix the input and retry.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// Internal error indicating a bug or unexpected state.
    ///
    /// This error should never occur during normal operation. If it does, the
    /// message names the invariant that was violated.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error from any displayable message.
    ///
    /// # Examples
    ///
    /// ```
    /// use llkv_result::Error;
    ///
    /// let err = Error::configuration("scalar module `empty` exposes no functions");
    /// assert!(matches!(err, Error::ConfigurationError(msg) if msg.contains("empty")));
    /// ```
    #[inline]
    pub fn configuration<E: fmt::Display>(err: E) -> Self {
        Error::ConfigurationError(err.to_string())
    }

    /// Create a function-not-found error.
    ///
    /// `arguments` is rendered by the caller, usually by joining argument
    /// types with `", "`.
    ///
    /// # Examples
    ///
    /// ```
    /// use llkv_result::Error;
    ///
    /// let err = Error::function_not_found("sum", "int64, int64");
    /// assert_eq!(err.to_string(), "Function sum(int64, int64) not registered");
    /// ```
    #[inline]
    pub fn function_not_found(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Error::FunctionNotFound {
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Returns `true` for errors raised while assembling a catalog.
    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::ConfigurationError(_))
    }
}
