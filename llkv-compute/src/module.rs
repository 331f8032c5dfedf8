//! Explicit registration lists for scalar functions.

use std::fmt;
use std::sync::Arc;

use llkv_result::{Error, Result};
use llkv_types::{NativeSignature, NativeValue};

use crate::native::{NativeArgument, NativeReturn};

type KernelFn = dyn Fn(&[NativeValue]) -> Result<NativeValue> + Send + Sync;

/// Shared, type-erased scalar implementation.
///
/// Clones share the same allocation, so aliases registered from one
/// [`ScalarFunctionDef`] keep a single implementation identity.
#[derive(Clone)]
pub struct ScalarKernel(Arc<KernelFn>);

impl ScalarKernel {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[NativeValue]) -> Result<NativeValue> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn invoke(&self, args: &[NativeValue]) -> Result<NativeValue> {
        (self.0)(args)
    }

    /// Returns `true` when both kernels are the same implementation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ScalarKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScalarKernel({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// How a scalar callable is bound.
///
/// Only `Static` callables can be registered. `Instance` marks a callable that
/// closes over receiver state, e.g. a method adapted from an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableBinding {
    Static,
    Instance,
}

/// Adapts a Rust callable into a [`ScalarKernel`] with a derived signature.
///
/// Implemented for `Fn` callables of arity 0 through 3 whose parameters are
/// [`NativeArgument`]s and whose return type is a [`NativeReturn`]. The
/// produced kernel returns `NULL` if any argument is `NULL`.
pub trait IntoScalarKernel<Args>: Send + Sync + 'static {
    fn native_signature() -> NativeSignature;

    fn into_kernel(self) -> ScalarKernel;
}

macro_rules! impl_into_scalar_kernel {
    ($($arg:ident => $value:ident),*) => {
        impl<F, R, $($arg,)*> IntoScalarKernel<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> R + Send + Sync + 'static,
            R: NativeReturn,
            $($arg: NativeArgument,)*
        {
            fn native_signature() -> NativeSignature {
                NativeSignature::new(vec![$($arg::NATIVE_TYPE),*], R::NATIVE_TYPE)
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn into_kernel(self) -> ScalarKernel {
                let arity = <Self as IntoScalarKernel<($($arg,)*)>>::native_signature().arity();
                ScalarKernel::new(move |args: &[NativeValue]| {
                    if args.len() != arity {
                        return Err(Error::InvalidArgumentError(format!(
                            "scalar function expects {arity} argument(s), got {}",
                            args.len()
                        )));
                    }
                    if args.iter().any(NativeValue::is_null) {
                        return Ok(NativeValue::Null);
                    }
                    let mut position = 0;
                    $(
                        let $value = $arg::from_native(&args[position])?;
                        position += 1;
                    )*
                    (self)($($value),*).into_native()
                })
            }
        }
    };
}

impl_into_scalar_kernel!();
impl_into_scalar_kernel!(A => a);
impl_into_scalar_kernel!(A => a, B => b);
impl_into_scalar_kernel!(A => a, B => b, C => c);

/// One tagged callable in a [`ScalarModule`].
///
/// The canonical name is the explicit name given with
/// [`ScalarFunctionDef::named`], falling back to the callable's own name.
#[derive(Debug, Clone)]
pub struct ScalarFunctionDef {
    callable_name: &'static str,
    name: Option<String>,
    aliases: Vec<String>,
    binding: CallableBinding,
    signature: NativeSignature,
    kernel: ScalarKernel,
}

impl ScalarFunctionDef {
    /// Wrap a free function or capture-free closure.
    pub fn stateless<F, Args>(callable_name: &'static str, f: F) -> Self
    where
        F: IntoScalarKernel<Args>,
    {
        Self::from_parts(
            callable_name,
            CallableBinding::Static,
            F::native_signature(),
            f.into_kernel(),
        )
    }

    /// Wrap a callable bound to receiver state. Such entries fail validation;
    /// this exists so adapters over instance methods can be described.
    pub fn bound<F, Args>(callable_name: &'static str, f: F) -> Self
    where
        F: IntoScalarKernel<Args>,
    {
        Self::from_parts(
            callable_name,
            CallableBinding::Instance,
            F::native_signature(),
            f.into_kernel(),
        )
    }

    /// Build an entry from an explicit signature, as emitted by generated
    /// registration lists.
    pub fn from_parts(
        callable_name: &'static str,
        binding: CallableBinding,
        signature: NativeSignature,
        kernel: ScalarKernel,
    ) -> Self {
        Self {
            callable_name,
            name: None,
            aliases: Vec::new(),
            binding,
            signature,
            kernel,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[inline]
    pub fn callable_name(&self) -> &'static str {
        self.callable_name
    }

    /// Explicit name if one was given and is non-empty, else the callable name.
    pub fn canonical_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.callable_name,
        }
    }

    #[inline]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    #[inline]
    pub fn binding(&self) -> CallableBinding {
        self.binding
    }

    #[inline]
    pub fn signature(&self) -> &NativeSignature {
        &self.signature
    }

    #[inline]
    pub fn kernel(&self) -> &ScalarKernel {
        &self.kernel
    }
}

/// Named collection of scalar functions registered together.
#[derive(Debug, Clone)]
pub struct ScalarModule {
    name: &'static str,
    functions: Vec<ScalarFunctionDef>,
}

impl ScalarModule {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            functions: Vec::new(),
        }
    }

    pub fn function(mut self, def: ScalarFunctionDef) -> Self {
        self.functions.push(def);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn functions(&self) -> &[ScalarFunctionDef] {
        &self.functions
    }
}
