//! Function catalog for the LLKV SQL engine.
//!
//! The catalog registers the built-in scalar and aggregate functions and
//! resolves a call site (name plus ordered argument types) to exactly one
//! [`FunctionDescriptor`]. Later planning stages keep the descriptor's
//! [`FunctionHandle`](llkv_types::FunctionHandle) and retrieve the same
//! descriptor with [`FunctionCatalog::lookup`] instead of resolving by name
//! again.
//!
//! ```rust
//! use llkv_functions::FunctionCatalog;
//! use llkv_types::{CatalogType, QualifiedName};
//!
//! let catalog = FunctionCatalog::builtin().unwrap();
//! let sum = catalog
//!     .resolve_typed(&QualifiedName::new("SUM"), &[CatalogType::Int64])
//!     .unwrap();
//! assert_eq!(sum.return_type(), CatalogType::Int64);
//! assert_eq!(catalog.lookup(sum.handle()), Some(sum));
//! ```
//!
//! Construction goes through [`CatalogBuilder`]; any configuration mistake
//! surfaces as [`Error::ConfigurationError`](llkv_result::Error::ConfigurationError)
//! from [`CatalogBuilder::build`].

pub mod builder;
pub mod builtin;
pub mod catalog;
pub mod descriptor;
pub mod type_mapping;

pub use builder::CatalogBuilder;
pub use builtin::builtin_builder;
pub use catalog::FunctionCatalog;
pub use descriptor::{FunctionDescriptor, FunctionImplementation, FunctionSignature};
pub use type_mapping::{CatalogSignature, catalog_type, map_signature};
