//! Scalar function modules for the LLKV function catalog.
//!
//! A [`ScalarModule`] is an explicit, hand-assembled list of
//! [`ScalarFunctionDef`] entries. Each entry wraps an ordinary Rust callable
//! whose native signature is derived from its parameter and return types at
//! compile time (see [`native`]). The catalog builder validates the signatures
//! and turns every entry into one descriptor per name and alias.

pub mod module;
pub mod native;
pub mod scalar;

pub use module::{CallableBinding, IntoScalarKernel, ScalarFunctionDef, ScalarKernel, ScalarModule};
pub use native::{NativeArgument, NativeReturn};
pub use scalar::{math_functions, string_functions};
