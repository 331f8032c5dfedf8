//! Catalog construction.
//!
//! Registration methods return the builder so a fixed startup sequence reads
//! as one chain. The first failure is latched: later registrations are
//! skipped and [`CatalogBuilder::build`] returns that failure.

use std::sync::Arc;

use llkv_aggregate::AggregationFunction;
use llkv_compute::{CallableBinding, ScalarFunctionDef, ScalarModule};
use llkv_result::{Error, Result};
use llkv_types::{CatalogInstanceId, CatalogType, FunctionHandle, QualifiedName};

use crate::catalog::FunctionCatalog;
use crate::descriptor::FunctionDescriptor;
use crate::type_mapping::{CatalogSignature, map_signature};

pub struct CatalogBuilder {
    instance: CatalogInstanceId,
    functions: Vec<FunctionDescriptor>,
    error: Option<Error>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            instance: CatalogInstanceId::next(),
            functions: Vec::new(),
            error: None,
        }
    }

    /// Register one aggregate overload.
    ///
    /// The implementation is trusted to match the declared types.
    pub fn register_aggregate(
        self,
        name: &str,
        return_type: CatalogType,
        argument_types: &[CatalogType],
        intermediate_type: CatalogType,
        implementation: impl Into<Arc<AggregationFunction>>,
    ) -> Self {
        let argument_types = argument_types.to_vec();
        let implementation = implementation.into();
        self.latch(|builder| {
            let name = qualified_name(name)?;
            let handle = builder.next_handle()?;
            tracing::debug!(
                function = %name,
                %handle,
                ?argument_types,
                implementation = implementation.name(),
                "registered aggregate function"
            );
            builder.functions.push(FunctionDescriptor::aggregate(
                handle,
                name,
                return_type,
                argument_types,
                intermediate_type,
                implementation,
            ));
            Ok(())
        })
    }

    /// Register every function of a scalar module.
    ///
    /// Each function yields one descriptor for its canonical name and one per
    /// alias; all of them share the derived signature and the implementation.
    pub fn register_scalar_module(self, module: ScalarModule) -> Self {
        self.latch(|builder| {
            if module.functions().is_empty() {
                return Err(Error::configuration(format!(
                    "Expected scalar module `{}` to contain at least one function",
                    module.name()
                )));
            }
            for def in module.functions() {
                let signature = validate_scalar(module.name(), def)?;
                let names = std::iter::once(def.canonical_name())
                    .chain(def.aliases().iter().map(String::as_str));
                for name in names {
                    builder.push_scalar(name, &signature, def)?;
                }
            }
            tracing::debug!(
                module = module.name(),
                functions = module.functions().len(),
                "registered scalar module"
            );
            Ok(())
        })
    }

    /// Finalize into an immutable catalog, or return the first registration
    /// failure.
    pub fn build(self) -> Result<FunctionCatalog> {
        let CatalogBuilder {
            instance,
            mut functions,
            error,
        } = self;
        if let Some(err) = error {
            return Err(err);
        }
        functions.sort_by_key(FunctionDescriptor::handle);
        FunctionCatalog::from_descriptors(instance, functions)
    }

    fn latch(mut self, register: impl FnOnce(&mut Self) -> Result<()>) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Err(err) = register(&mut self) {
            tracing::warn!(error = %err, "function registration failed");
            self.error = Some(err);
        }
        self
    }

    fn next_handle(&self) -> Result<FunctionHandle> {
        let ordinal = u32::try_from(self.functions.len() + 1)
            .map_err(|_| Error::configuration("function catalog exceeds u32::MAX entries"))?;
        Ok(FunctionHandle::new(self.instance, ordinal))
    }

    fn push_scalar(
        &mut self,
        name: &str,
        signature: &CatalogSignature,
        def: &ScalarFunctionDef,
    ) -> Result<()> {
        let name = qualified_name(name)?;
        let handle = self.next_handle()?;
        tracing::debug!(
            function = %name,
            %handle,
            argument_types = ?signature.argument_types,
            callable = def.callable_name(),
            "registered scalar function"
        );
        self.functions.push(FunctionDescriptor::scalar(
            handle,
            name,
            signature.return_type,
            signature.argument_types.clone(),
            def.kernel().clone(),
        ));
        Ok(())
    }
}

fn qualified_name(name: &str) -> Result<QualifiedName> {
    let name = QualifiedName::new(name);
    if name.is_empty() {
        return Err(Error::configuration("function name must not be empty"));
    }
    Ok(name)
}

fn validate_scalar(module: &str, def: &ScalarFunctionDef) -> Result<CatalogSignature> {
    let invalid = |reason: String| {
        Error::configuration(format!(
            "scalar function `{}` ({}) in module `{module}` is not valid: {reason}",
            def.callable_name(),
            def.signature()
        ))
    };
    if def.binding() != CallableBinding::Static {
        return Err(invalid("callable is bound to an instance".into()));
    }
    map_signature(def.signature()).map_err(|err| match err {
        Error::ConfigurationError(reason) => invalid(reason),
        other => other,
    })
}
