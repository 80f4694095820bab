//! Non-owning object names and the per-kind policy that creates and destroys them.

use std::marker::PhantomData;

use crate::gl::types::GLuint;

/// Policy describing how to create, destroy, and query one kind of GL object.
///
/// Implemented on uninhabited or unit marker types, and used as the type parameter of
/// [`Handle`] and [`crate::ScopedHandle`]. Dispatch is entirely static.
///
/// # Safety
/// * `create` must return either `0` or a freshly created name that nothing else owns.
/// * `destroy` must release a name previously returned by `create`.
/// * All three functions require the same context to be current on the calling thread as
///   when the object was created.
pub unsafe trait ObjectKind {
    /// Arguments forwarded to [`Self::create`].
    type Args;
    /// Human readable kind, used in logs.
    const LABEL: &'static str;

    /// Create one object, returning `0` on failure.
    ///
    /// # Safety
    /// See trait-level docs.
    unsafe fn create(args: Self::Args) -> GLuint;
    /// Destroy one object. Never called with `0` by this crate.
    ///
    /// # Safety
    /// See trait-level docs.
    unsafe fn destroy(name: GLuint);
    /// Ask the driver whether `name` currently names an object of this kind.
    ///
    /// # Safety
    /// See trait-level docs.
    unsafe fn exists(name: GLuint) -> bool;
}

/// The name of a GL object of kind `K`. Does not own the object.
///
/// Copying a handle copies the name only. The zero name, [`Handle::NULL`], means
/// "no object".
#[repr(transparent)]
pub struct Handle<K>(GLuint, PhantomData<fn() -> K>);

impl<K> Handle<K> {
    /// The sentinel handle, naming no object.
    pub const NULL: Self = Self(0, PhantomData);

    /// Wrap a raw name. The returned handle does not own the object.
    #[must_use]
    pub const fn from_name(name: GLuint) -> Self {
        Self(name, PhantomData)
    }
    /// The raw `GLuint` name. Zero for [`Self::NULL`].
    #[must_use]
    pub const fn name(self) -> GLuint {
        self.0
    }
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl<K: ObjectKind> Handle<K> {
    /// Query the driver for whether this names a live object of kind `K`.
    ///
    /// Note that some kinds, such as buffers, only come into existence at first bind for
    /// `glGen*` names. Names from this crate are made with `glCreate*`, and exist immediately.
    #[must_use]
    pub fn exists(self) -> bool {
        // Zero never names a user object; skip the driver round-trip.
        !self.is_null() && unsafe { K::exists(self.0) }
    }
}

// Manual impls: derives would require `K` itself to implement these.
impl<K> Clone for Handle<K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for Handle<K> {}
impl<K> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<K> Eq for Handle<K> {}
impl<K> std::hash::Hash for Handle<K> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
impl<K> Default for Handle<K> {
    fn default() -> Self {
        Self::NULL
    }
}
impl<K> std::fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Handle").field(&self.0).finish()
    }
}
