//! Identifiers for catalog instances and the functions they hold.
//!
//! Handles are scoped to the catalog build that issued them. Two separate
//! builds of the same registration sequence produce handles with equal
//! ordinals but different instance ids, so they never compare equal.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CATALOG_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Identity of one catalog build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogInstanceId(u64);

impl CatalogInstanceId {
    /// Allocate an id no other catalog in this process has used.
    pub fn next() -> Self {
        Self(NEXT_CATALOG_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Opaque per-catalog token identifying one function descriptor.
///
/// The ordinal is assigned in registration order starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionHandle {
    instance: CatalogInstanceId,
    ordinal: u32,
}

impl FunctionHandle {
    #[inline]
    pub fn new(instance: CatalogInstanceId, ordinal: u32) -> Self {
        Self { instance, ordinal }
    }

    #[inline]
    pub fn instance(self) -> CatalogInstanceId {
        self.instance
    }

    #[inline]
    pub fn ordinal(self) -> u32 {
        self.ordinal
    }
}

impl fmt::Display for FunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn#{}@{}", self.ordinal, self.instance.0)
    }
}
