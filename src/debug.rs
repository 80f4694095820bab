//! Forwarding of GL debug output into the [`log`] facade.

use std::ffi::{c_void, CStr};

use crate::gl::{
    self,
    types::{GLchar, GLenum, GLsizei, GLuint},
};

/// Enable synchronous debug output and forward every message to `log`.
///
/// Errors are logged at `error`, high severity at `warn`, medium at `info`, and everything
/// else at `debug`. Notifications are dropped unless the `trace-log` feature is enabled.
///
/// # Safety
/// A GL context created with the debug flag must be current, with bindings loaded.
#[doc(alias = "glDebugMessageCallback")]
pub unsafe fn install() {
    gl::Enable(gl::DEBUG_OUTPUT);
    // Report on the calling thread, so log records line up with the offending call.
    gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
    gl::DebugMessageCallback(Some(on_debug_message), std::ptr::null());
}

/// Stop forwarding debug output.
///
/// # Safety
/// Same as [`install`].
pub unsafe fn uninstall() {
    gl::DebugMessageCallback(None, std::ptr::null());
    gl::Disable(gl::DEBUG_OUTPUT);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Drop,
    Level(log::Level),
}

fn route(gltype: GLenum, severity: GLenum) -> Route {
    if gltype == gl::DEBUG_TYPE_ERROR {
        return Route::Level(log::Level::Error);
    }
    match severity {
        gl::DEBUG_SEVERITY_NOTIFICATION if !cfg!(feature = "trace-log") => Route::Drop,
        gl::DEBUG_SEVERITY_HIGH => Route::Level(log::Level::Warn),
        gl::DEBUG_SEVERITY_MEDIUM => Route::Level(log::Level::Info),
        _ => Route::Level(log::Level::Debug),
    }
}

extern "system" fn on_debug_message(
    source: GLenum,
    gltype: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    let Route::Level(level) = route(gltype, severity) else {
        return;
    };
    // Safety: the GL passes a nul-terminated string, valid for the duration of the callback.
    let message = unsafe { CStr::from_ptr(message) }.to_string_lossy();
    log::log!(
        level,
        "GL message {id} (source {source:#06x}, type {gltype:#06x}): {message}"
    );
}
