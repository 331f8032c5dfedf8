//! Value types shared across the LLKV function catalog crates.
//!
//! Nothing here has behavior beyond value semantics and display. These types
//! live in their own crate so the aggregate and scalar implementation crates
//! can describe their signatures without depending on the catalog itself.

pub mod catalog_type;
pub mod ids;
pub mod name;
pub mod native;

pub use catalog_type::{ArgumentType, CatalogType};
pub use ids::{CatalogInstanceId, FunctionHandle};
pub use name::QualifiedName;
pub use native::{NativeSignature, NativeType, NativeValue};
