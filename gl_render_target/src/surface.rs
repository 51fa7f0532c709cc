//! Reference-counted handles to backend-native surfaces
//!
//! A native surface is shared by everything holding a `SurfaceRef` to it:
//! the render target that created or wrapped it, plus every caller that asked
//! the render target for a handle. References are added and released
//! explicitly. The surface itself (and its native memory) is destroyed when
//! the last reference goes away.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// One strong reference to a native surface
///
/// Deliberately not `Clone`: every additional reference is taken with
/// `add_ref()` and given back with `release()` (or by dropping it).
pub struct SurfaceRef<S> {
    inner: Arc<S>,
}

impl<S> SurfaceRef<S> {
    /// Wrap a freshly created surface; the result holds its first reference
    pub fn new(surface: S) -> Self {
        Self {
            inner: Arc::new(surface),
        }
    }

    /// Take an additional strong reference
    pub fn add_ref(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Give this reference back
    pub fn release(self) {
        drop(self);
    }

    /// Number of live references to the surface
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// True if both references point at the same native surface
    pub fn ptr_eq(&self, other: &SurfaceRef<S>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S> Deref for SurfaceRef<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.inner
    }
}

impl<S: fmt::Debug> fmt::Debug for SurfaceRef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceRef")
            .field("surface", &*self.inner)
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "surface_tests.rs"]
mod tests;
