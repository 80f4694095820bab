//! Exclusive ownership of GL objects.

use std::rc::Rc;

use crate::{handle::ObjectKind, Handle, NotSync};

/// Owns a GL object of kind `K`, destroying it when dropped.
///
/// A scoped handle is either *empty*, holding [`Handle::NULL`], or *owning* a live name.
/// Dropping, [resetting](Self::reset), or overwriting an owning handle destroys its object
/// exactly once; empty handles never call into the driver on drop.
///
/// Ownership moves like any other Rust value. To move the object out while leaving a valid
/// empty handle behind, use [`std::mem::take`]. Assigning with `*a = b` destroys `a`'s object
/// before taking `b`'s.
///
/// There is deliberately no `Clone`. For shared ownership see [`Shared`].
///
/// All per-kind operations are available through `Deref` to [`Handle`].
#[must_use = "dropping a scoped handle destroys the object"]
pub struct ScopedHandle<K: ObjectKind> {
    handle: Handle<K>,
    _not_sync: NotSync,
}

/// A reference-counted [`ScopedHandle`]. The object is destroyed when the last clone drops.
pub type Shared<K> = Rc<ScopedHandle<K>>;

impl<K: ObjectKind> ScopedHandle<K> {
    /// Create a new object of kind `K` and take ownership of it.
    ///
    /// If the driver fails to create the object, the result is empty.
    /// Check with [`Self::is_empty`].
    pub fn new(args: K::Args) -> Self {
        // Safety: the crate-level context requirements.
        let name = unsafe { K::create(args) };
        if name != 0 {
            log::trace!("created {} {}", K::LABEL, name);
        } else if cfg!(debug_assertions) {
            log::warn!("failed to create {}", K::LABEL);
        }
        Self {
            handle: Handle::from_name(name),
            _not_sync: NotSync::default(),
        }
    }
    /// An empty handle, owning nothing.
    pub const fn empty() -> Self {
        Self {
            handle: Handle::NULL,
            _not_sync: std::marker::PhantomData,
        }
    }
    /// Take ownership of an existing object.
    ///
    /// # Safety
    /// `handle` must be [`Handle::NULL`] or name an object of kind `K` that is not owned by
    /// anything else, otherwise it will be destroyed twice.
    pub const unsafe fn adopt(handle: Handle<K>) -> Self {
        Self {
            handle,
            _not_sync: std::marker::PhantomData,
        }
    }
    /// The owned handle, or [`Handle::NULL`] if empty. Ownership is unaffected.
    #[must_use]
    pub fn get(&self) -> Handle<K> {
        self.handle
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handle.is_null()
    }
    /// Give up ownership without destroying the object, leaving `self` empty.
    ///
    /// The caller becomes responsible for destroying the returned name.
    #[must_use = "dropping a released handle leaks the object"]
    pub fn release(&mut self) -> Handle<K> {
        std::mem::take(&mut self.handle)
    }
    /// Consuming [`Self::release`].
    #[must_use = "dropping a released handle leaks the object"]
    pub fn into_handle(mut self) -> Handle<K> {
        self.release()
    }
    /// Destroy the owned object, if any, and take ownership of `handle` instead.
    ///
    /// Resetting to the handle already owned is a no-op.
    ///
    /// # Safety
    /// Same as [`Self::adopt`].
    pub unsafe fn reset(&mut self, handle: Handle<K>) {
        if handle == self.handle {
            return;
        }
        let old = std::mem::replace(&mut self.handle, handle);
        destroy(old);
    }
    /// Destroy the owned object, if any, leaving `self` empty.
    pub fn clear(&mut self) {
        destroy(self.release());
    }
    /// Destroy the owned object, if any, and take over `other`'s.
    pub fn replace(&mut self, mut other: Self) {
        let handle = other.release();
        // Safety: `other` owned `handle` exclusively, and has now given it up.
        unsafe { self.reset(handle) }
    }
    /// Convert into a reference-counted [`Shared`] handle.
    pub fn share(self) -> Shared<K> {
        Rc::new(self)
    }
}

fn destroy<K: ObjectKind>(handle: Handle<K>) {
    if handle.is_null() {
        return;
    }
    log::trace!("destroying {} {}", K::LABEL, handle.name());
    // Safety: the handle was owned, and ownership ends here.
    unsafe { K::destroy(handle.name()) }
}

impl<K: ObjectKind> Drop for ScopedHandle<K> {
    fn drop(&mut self) {
        destroy(self.handle);
    }
}

impl<K: ObjectKind> Default for ScopedHandle<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: ObjectKind> std::ops::Deref for ScopedHandle<K> {
    type Target = Handle<K>;
    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

impl<K: ObjectKind> std::fmt::Debug for ScopedHandle<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedHandle")
            .field("kind", &K::LABEL)
            .field("name", &self.handle.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::types::GLuint;
    use std::cell::{Cell, RefCell};

    thread_local! {
        static NEXT_NAME: Cell<GLuint> = const { Cell::new(1) };
        static CREATES: Cell<usize> = const { Cell::new(0) };
        static DESTROYED: RefCell<Vec<GLuint>> = const { RefCell::new(Vec::new()) };
    }

    /// Hands out increasing names and records every destruction.
    struct Counted;
    unsafe impl ObjectKind for Counted {
        type Args = ();
        const LABEL: &'static str = "counted";
        unsafe fn create((): ()) -> GLuint {
            CREATES.with(|c| c.set(c.get() + 1));
            NEXT_NAME.with(|n| {
                let name = n.get();
                n.set(name + 1);
                name
            })
        }
        unsafe fn destroy(name: GLuint) {
            assert_ne!(name, 0, "destroy called with the sentinel");
            DESTROYED.with(|d| d.borrow_mut().push(name));
        }
        unsafe fn exists(name: GLuint) -> bool {
            name != 0 && !DESTROYED.with(|d| d.borrow().contains(&name))
        }
    }

    /// Creation always fails.
    struct Failing;
    unsafe impl ObjectKind for Failing {
        type Args = ();
        const LABEL: &'static str = "failing";
        unsafe fn create((): ()) -> GLuint {
            0
        }
        unsafe fn destroy(_: GLuint) {
            panic!("nothing was ever created");
        }
        unsafe fn exists(_: GLuint) -> bool {
            false
        }
    }

    /// Creation forwards a chosen name.
    struct Fixed;
    unsafe impl ObjectKind for Fixed {
        type Args = GLuint;
        const LABEL: &'static str = "fixed";
        unsafe fn create(name: GLuint) -> GLuint {
            name
        }
        unsafe fn destroy(name: GLuint) {
            DESTROYED.with(|d| d.borrow_mut().push(name));
        }
        unsafe fn exists(_: GLuint) -> bool {
            true
        }
    }

    fn creates() -> usize {
        CREATES.with(Cell::get)
    }
    fn destroyed() -> Vec<GLuint> {
        DESTROYED.with(|d| d.borrow().clone())
    }

    #[test]
    fn drop_destroys_once() {
        let name = {
            let owner = ScopedHandle::<Counted>::new(());
            assert!(!owner.is_empty());
            assert!(owner.exists());
            owner.get().name()
        };
        assert_eq!(destroyed(), [name]);
        assert_eq!(creates(), 1);
    }

    #[test]
    fn taking_leaves_source_empty() {
        let mut original = ScopedHandle::<Counted>::new(());
        let name = original.get();

        let new_owner = std::mem::take(&mut original);
        assert!(original.is_empty());
        assert_eq!(original.get(), Handle::NULL);
        assert_eq!(new_owner.get(), name);

        drop(original);
        assert!(destroyed().is_empty());
        drop(new_owner);
        assert_eq!(destroyed(), [name.name()]);
    }

    #[test]
    fn moves_through_many_owners_destroy_once() {
        let first = ScopedHandle::<Counted>::new(());
        let name = first.get().name();

        let second = first;
        let mut holder = vec![second];
        let third = holder.pop().unwrap_or_default();
        let mut fourth = ScopedHandle::empty();
        fourth.replace(third);
        let boxed = Box::new(fourth);

        assert!(destroyed().is_empty());
        drop(boxed);
        assert_eq!(destroyed(), [name]);
    }

    #[test]
    fn assignment_destroys_previous_object_first() {
        let mut target = ScopedHandle::<Counted>::new(());
        let old = target.get().name();
        let source = ScopedHandle::<Counted>::new(());
        let new = source.get().name();

        target = source;
        assert_eq!(destroyed(), [old]);
        assert_eq!(target.get().name(), new);

        drop(target);
        assert_eq!(destroyed(), [old, new]);
    }

    #[test]
    fn release_hands_responsibility_to_caller() {
        let mut owner = ScopedHandle::<Counted>::new(());
        let handle = owner.release();
        assert!(owner.is_empty());
        drop(owner);
        assert!(destroyed().is_empty());

        unsafe { Counted::destroy(handle.name()) };
        assert_eq!(destroyed(), [handle.name()]);
    }

    #[test]
    fn into_handle_does_not_destroy() {
        let owner = ScopedHandle::<Counted>::new(());
        let expected = owner.get();
        let handle = owner.into_handle();
        assert_eq!(handle, expected);
        assert!(destroyed().is_empty());
    }

    #[test]
    fn reset_to_self_keeps_object() {
        let mut owner = ScopedHandle::<Counted>::new(());
        let handle = owner.get();
        unsafe { owner.reset(handle) };
        assert!(destroyed().is_empty());
        assert_eq!(owner.get(), handle);

        drop(owner);
        assert_eq!(destroyed(), [handle.name()]);
    }

    #[test]
    fn reset_to_null_destroys_and_empties() {
        let mut owner = ScopedHandle::<Counted>::new(());
        let name = owner.get().name();
        unsafe { owner.reset(Handle::NULL) };
        assert_eq!(destroyed(), [name]);
        assert!(owner.is_empty());

        drop(owner);
        assert_eq!(destroyed(), [name]);
    }

    #[test]
    fn reset_to_second_object() {
        let mut owner = ScopedHandle::<Counted>::new(());
        let first = owner.get().name();
        let second = ScopedHandle::<Counted>::new(()).into_handle();
        assert_eq!(creates(), 2);

        unsafe { owner.reset(second) };
        assert_eq!(destroyed(), [first]);

        drop(owner);
        assert_eq!(destroyed(), [first, second.name()]);
        assert_eq!(creates(), 2);
    }

    #[test]
    fn clear_cycles_between_states() {
        let mut owner = ScopedHandle::<Counted>::new(());
        let first = owner.get().name();
        owner.clear();
        owner.clear();
        assert_eq!(destroyed(), [first]);

        owner.replace(ScopedHandle::new(()));
        assert!(!owner.is_empty());
        let second = owner.get().name();
        drop(owner);
        assert_eq!(destroyed(), [first, second]);
    }

    #[test]
    fn failed_creation_is_empty_and_never_destroyed() {
        let owner = ScopedHandle::<Failing>::new(());
        assert!(owner.is_empty());
        assert!(!owner.exists());
        drop(owner);
    }

    #[test]
    fn adopt_takes_ownership_without_creating() {
        let owner = unsafe { ScopedHandle::<Counted>::adopt(Handle::from_name(40)) };
        assert_eq!(creates(), 0);
        drop(owner);
        assert_eq!(destroyed(), [40]);

        let empty = unsafe { ScopedHandle::<Counted>::adopt(Handle::NULL) };
        assert!(empty.is_empty());
        drop(empty);
        assert_eq!(destroyed(), [40]);
    }

    #[test]
    fn args_are_forwarded_to_create() {
        let owner = ScopedHandle::<Fixed>::new(99);
        assert_eq!(owner.name(), 99);
        drop(owner);
        assert_eq!(destroyed(), [99]);
    }

    #[test]
    fn shared_releases_after_last_holder() {
        let shared = ScopedHandle::<Counted>::new(()).share();
        let name = shared.get().name();
        let other = Rc::clone(&shared);

        drop(shared);
        assert!(destroyed().is_empty());
        assert!(other.exists());

        drop(other);
        assert_eq!(destroyed(), [name]);
    }

    #[test]
    fn debug_names_kind_and_object() {
        let owner = ScopedHandle::<Fixed>::new(5);
        assert_eq!(
            format!("{owner:?}"),
            "ScopedHandle { kind: \"fixed\", name: 5 }"
        );
    }
}
