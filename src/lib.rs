//! # glguard
//!
//! Owning handles for OpenGL 4.5 objects, with typed enums for the constants they use.
//!
//! Every GL object this crate knows about is named by a [`Handle`], a plain copyable
//! `GLuint` tagged with the kind of object it names. Ownership lives in [`ScopedHandle`],
//! which creates the object, destroys it exactly once when dropped, and can hand the name
//! back to the caller with [`ScopedHandle::release`]. With few exceptions, every method on
//! a handle is a transparent wrapper around the relevant direct-state-access GL function.
//!
//! ## Loading
//! The GL bindings are global. Before any handle touches the driver, a GL 4.5 context must be
//! current on the calling thread and the bindings must be loaded:
//! ```no_run
//! # fn get_proc_address(_: &str) -> *const std::ffi::c_void { std::ptr::null() }
//! glguard::gl::load_with(|symbol| get_proc_address(symbol));
//! // Optional: route driver debug messages into `log`.
//! unsafe { glguard::debug::install() };
//!
//! let buffer = glguard::Buffer::new(());
//! assert!(!buffer.is_empty());
//! ```
//!
//! ## Context requirements
//! Creating, querying, or destroying objects is only sound while:
//! * A GL 4.5 context is current on the calling thread.
//! * The `gl` module has been fully initialized with `gl::load_with`.
//! * Every object is used and dropped with the context it was created in current.
//!
//! None of this is checked. [`ScopedHandle`] is `!Sync` and [`Shared`] is `!Send`, but a
//! plain [`Handle`] or an exclusive owner may still be sent to a thread where a different
//! context, or none, is current.
//!
//! ## Doc Aliases
//! Methods are tagged with `#[doc(alias = ...)]` for the GL entry point or `pname` they wrap.
//! For example, searching `glNamedBufferData` finds `allocate` and `GL_BUFFER_SIZE` finds
//! `len`, both on [`BufferHandle`].

#![warn(rustdoc::all)]

use gl::types::{GLenum, GLintptr, GLsizei, GLsizeiptr, GLuint};

pub mod gl {
    #![doc(hidden)]
    #![allow(clippy::all)]
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

/// Declare a `#[repr(u32)]` enum whose every variant is a GL constant, along with
/// [`GLEnum`] and a checked conversion back from a raw `GLenum`.
macro_rules! gl_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:expr,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $value,
            )*
        }

        // Safety: is repr(u32) enum.
        unsafe impl crate::GLEnum for $name {}

        impl TryFrom<crate::GLenum> for $name {
            type Error = crate::error::GlError;
            fn try_from(value: crate::GLenum) -> Result<Self, Self::Error> {
                match value {
                    $(x if x == $value => Ok(Self::$variant),)*
                    other => Err(crate::error::GlError::UnknownEnum {
                        kind: stringify!($name),
                        value: other,
                    }),
                }
            }
        }
    };
}

pub mod buffer;
pub mod debug;
pub mod error;
pub mod handle;
pub mod scoped;
pub mod vertex_array;

pub use buffer::{Buffer, BufferHandle};
pub use error::{GlError, GlResult};
pub use handle::{Handle, ObjectKind};
pub use scoped::{ScopedHandle, Shared};
pub use vertex_array::{VertexArray, VertexArrayHandle};

mod sealed {
    pub trait Sealed {}
}

/// Trait for rusty `GLenum`s.
///
/// # Safety
/// * Must be implemented only on enums.
/// * The enum must be `#[repr(u32)]`
/// * Every variant must be a correct constant of `GLenum`.
pub unsafe trait GLEnum {
    /// Access the raw `GLenum` value of this enum.
    fn as_gl(&self) -> GLenum {
        unsafe { *std::ptr::from_ref(self).cast() }
    }
}

/// # Safety
/// * A GL context must be current on the calling thread, with bindings loaded.
/// * `gl_create` must be the `glCreate*` entry point for the object kind being made.
unsafe fn gl_create_with(gl_create: unsafe fn(GLsizei, *mut GLuint)) -> GLuint {
    let mut name: GLuint = 0;
    gl_create(1, std::ptr::addr_of_mut!(name));
    name
}

/// # Safety
/// * A GL context must be current on the calling thread, with bindings loaded.
/// * `gl_delete` must be the `glDelete*` entry point for the object kind of `name`.
unsafe fn gl_delete_with(gl_delete: unsafe fn(GLsizei, *const GLuint), name: GLuint) {
    gl_delete(1, std::ptr::addr_of!(name));
}

/// Byte offset into a GL object, as `GLintptr`.
fn gl_offset(value: usize) -> GlResult<GLintptr> {
    value
        .try_into()
        .map_err(|_| GlError::OutOfRange { what: "offset", value })
}

/// Byte length of a GL range, as `GLsizeiptr`.
fn gl_size(value: usize) -> GlResult<GLsizeiptr> {
    value
        .try_into()
        .map_err(|_| GlError::OutOfRange { what: "size", value })
}

/// Counts and strides, as `GLsizei`.
fn gl_sizei(what: &'static str, value: usize) -> GlResult<GLsizei> {
    value
        .try_into()
        .map_err(|_| GlError::OutOfRange { what, value })
}

type NotSync = std::marker::PhantomData<std::cell::Cell<()>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_reject_values_past_the_signed_range() {
        assert_eq!(gl_offset(16).unwrap(), 16);
        assert_eq!(gl_size(0).unwrap(), 0);
        assert!(matches!(
            gl_size(usize::MAX),
            Err(GlError::OutOfRange { what: "size", .. })
        ));
        assert!(matches!(
            gl_sizei("stride", usize::MAX),
            Err(GlError::OutOfRange { what: "stride", .. })
        ));
        assert_eq!(gl_sizei("count", 3).unwrap(), 3);
    }
}
