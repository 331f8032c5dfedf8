//! Immutable function catalog and overload resolution.
//!
//! # Resolution
//!
//! [`FunctionCatalog::resolve`] scans the overload set for a name twice, both
//! times in registration order:
//!
//! 1. **Exact**: the first overload whose argument types equal the call-site
//!    types position by position.
//! 2. **Coerced**: the first overload of the same arity where every position
//!    either matches or declares `Double` for an `Int64` argument.
//!
//! That single `Int64 -> Double` widening is the only implicit conversion.
//! Ties are broken by registration order, never by a "closest fit" cost, so a
//! call resolves the same way for as long as the registration sequence stays
//! the same.
//!
//! # Concurrency
//!
//! Nothing changes after [`CatalogBuilder::build`](crate::CatalogBuilder::build)
//! returns, so a catalog can be shared across query-compilation threads
//! without locking.

use llkv_result::{Error, Result};
use llkv_types::{ArgumentType, CatalogInstanceId, CatalogType, FunctionHandle, QualifiedName};
use rustc_hash::FxHashMap;

use crate::descriptor::FunctionDescriptor;

#[derive(Debug)]
pub struct FunctionCatalog {
    instance: CatalogInstanceId,
    /// Every descriptor in handle order.
    functions: Vec<FunctionDescriptor>,
    /// Overload sets; positions into `functions`, ascending.
    by_name: FxHashMap<QualifiedName, Vec<usize>>,
    by_handle: FxHashMap<FunctionHandle, usize>,
}

impl FunctionCatalog {
    /// Build both indices over descriptors already sorted by handle.
    pub(crate) fn from_descriptors(
        instance: CatalogInstanceId,
        functions: Vec<FunctionDescriptor>,
    ) -> Result<Self> {
        let mut by_name: FxHashMap<QualifiedName, Vec<usize>> = FxHashMap::default();
        let mut by_handle =
            FxHashMap::with_capacity_and_hasher(functions.len(), Default::default());

        for (position, function) in functions.iter().enumerate() {
            if let Some(previous) = by_handle.insert(function.handle(), position) {
                return Err(Error::configuration(format!(
                    "Duplicate function handle {}: {} and {}",
                    function.handle(),
                    functions[previous].signature(),
                    function.signature()
                )));
            }
            by_name
                .entry(function.name().clone())
                .or_default()
                .push(position);
        }

        tracing::info!(
            functions = functions.len(),
            names = by_name.len(),
            catalog = instance.get(),
            "function catalog built"
        );

        Ok(Self {
            instance,
            functions,
            by_name,
            by_handle,
        })
    }

    /// Resolve a call site to exactly one descriptor.
    ///
    /// [`ArgumentType::Unknown`] never matches a declared type, so a call with
    /// an untyped `NULL` argument fails with [`Error::FunctionNotFound`].
    pub fn resolve(
        &self,
        name: &QualifiedName,
        argument_types: &[ArgumentType],
    ) -> Result<&FunctionDescriptor> {
        if let Some(function) = self
            .overloads(name)
            .find(|f| is_exact_match(f.argument_types(), argument_types))
        {
            tracing::trace!(signature = %function.signature(), "resolved exact overload");
            return Ok(function);
        }

        if let Some(function) = self
            .overloads(name)
            .find(|f| can_coerce(f.argument_types(), argument_types))
        {
            tracing::trace!(signature = %function.signature(), "resolved coerced overload");
            return Ok(function);
        }

        let arguments = render_arguments(argument_types);
        tracing::debug!(function = %name, %arguments, "no overload matched");
        Err(Error::function_not_found(name.as_str(), arguments))
    }

    /// [`FunctionCatalog::resolve`] for call sites whose arguments are all typed.
    pub fn resolve_typed(
        &self,
        name: &QualifiedName,
        argument_types: &[CatalogType],
    ) -> Result<&FunctionDescriptor> {
        let argument_types: Vec<ArgumentType> =
            argument_types.iter().copied().map(ArgumentType::from).collect();
        self.resolve(name, &argument_types)
    }

    /// Descriptor for a handle issued by this catalog.
    ///
    /// Handles from any other catalog build yield `None`.
    #[inline]
    pub fn lookup(&self, handle: FunctionHandle) -> Option<&FunctionDescriptor> {
        if handle.instance() != self.instance {
            return None;
        }
        self.by_handle
            .get(&handle)
            .map(|position| &self.functions[*position])
    }

    /// Overload set for `name` in registration order; empty for unknown names.
    pub fn overloads<'a>(
        &'a self,
        name: &QualifiedName,
    ) -> impl Iterator<Item = &'a FunctionDescriptor> + Clone + use<'a> {
        self.by_name
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|position| &self.functions[*position])
    }

    #[inline]
    pub fn contains_name(&self, name: &QualifiedName) -> bool {
        self.by_name.contains_key(name)
    }

    /// All descriptors in handle order.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.functions.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    #[inline]
    pub fn instance_id(&self) -> CatalogInstanceId {
        self.instance
    }
}

fn is_exact_match(declared: &[CatalogType], given: &[ArgumentType]) -> bool {
    declared.len() == given.len()
        && declared
            .iter()
            .zip(given)
            .all(|(declared, given)| given.catalog_type() == Some(*declared))
}

fn can_coerce(declared: &[CatalogType], given: &[ArgumentType]) -> bool {
    declared.len() == given.len()
        && declared
            .iter()
            .zip(given)
            .all(|(declared, given)| match given.catalog_type() {
                Some(given) => {
                    given == *declared
                        || (*declared == CatalogType::Double && given == CatalogType::Int64)
                }
                None => false,
            })
}

fn render_arguments(argument_types: &[ArgumentType]) -> String {
    argument_types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
