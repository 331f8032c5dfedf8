//! Error types and result definitions for the LLKV function catalog.
//!
//! This crate provides the unified error type ([`Error`]) and result type alias
//! ([`Result<T>`]) used by every LLKV crate. All operations that could fail
//! return `Result<T>`.
//!
//! # Error Categories
//!
//! - **Configuration errors** ([`Error::ConfigurationError`]): invalid scalar
//!   modules, unsupported native types, handle collisions
//! - **Resolution failures** ([`Error::FunctionNotFound`]): no overload accepts
//!   the requested argument types
//! - **Execution errors** ([`Error::InvalidArgumentError`]): overflow and bad
//!   inputs inside function implementations
//! - **Data format errors** ([`Error::Arrow`]): Arrow array construction
//! - **Internal errors** ([`Error::Internal`]): bugs or unexpected states

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
