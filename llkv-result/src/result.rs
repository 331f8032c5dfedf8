use crate::error::Error;

/// Result type alias used throughout LLKV.
///
/// Shorthand for `std::result::Result<T, Error>`. Every LLKV operation that can
/// fail returns this type.
pub type Result<T> = std::result::Result<T, Error>;
