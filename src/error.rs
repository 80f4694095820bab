//! Errors produced while marshalling arguments to and results from the GL.
//!
//! Ownership bookkeeping in [`crate::ScopedHandle`] never fails; a failed creation is
//! represented by the zero name instead.

use thiserror::Error;

use crate::{gl, GLenum};

#[derive(Debug, Error)]
pub enum GlError {
    /// A code reported by `glGetError`.
    #[error("GL error: {0:#06x}")]
    Gl(GLenum),

    #[error("{what} of {value} does not fit the GL's integer type")]
    OutOfRange { what: &'static str, value: usize },

    /// A length or offset query returned a negative value.
    #[error("parameter {pname:#06x} reported negative value {value}")]
    Negative { pname: GLenum, value: i64 },

    #[error("invalid byte range {start}..{end}")]
    InvalidRange { start: usize, end: usize },

    /// The GL reported a value that matches no known constant of `kind`.
    #[error("unrecognised {kind} value {value:#06x}")]
    UnknownEnum { kind: &'static str, value: GLenum },

    #[error("failed to map buffer {0}")]
    MapFailed(gl::types::GLuint),

    #[error("attribute offset {offset} is not aligned to {align} bytes")]
    Misaligned { offset: usize, align: usize },

    #[error("packed attribute requires {required} components")]
    PackedComponents { required: i32 },
}

pub type GlResult<T> = Result<T, GlError>;

/// Pop the oldest error flag from the GL, if any.
///
/// The GL may keep several flags; call repeatedly until `Ok` to clear them all.
#[doc(alias = "glGetError")]
pub fn check() -> GlResult<()> {
    match unsafe { gl::GetError() } {
        gl::NO_ERROR => Ok(()),
        err => Err(GlError::Gl(err)),
    }
}

/// Clear every pending error flag, so that a following [`check`] reports only errors
/// raised after this call. Returns how many flags were discarded.
pub fn drain() -> usize {
    drain_from(|| unsafe { gl::GetError() })
}

/// A lost context may report `GL_CONTEXT_LOST` on every poll.
const MAX_PENDING: usize = 32;

fn drain_from(mut get_error: impl FnMut() -> GLenum) -> usize {
    let mut drained = 0;
    while drained < MAX_PENDING {
        match get_error() {
            gl::NO_ERROR => break,
            err => {
                log::debug!("discarding stale GL error {err:#06x}");
                drained += 1;
            }
        }
    }
    drained
}
