//! Buffer objects, and the enums and bit sets for their parameters.
//!
//! All operations use the named (direct state access) entry points, so a buffer never needs
//! to be bound to a target to be allocated, written, read, or mapped.

use std::ops::{Bound, RangeBounds};

use crate::{
    error, gl,
    gl::types::{GLbitfield, GLint, GLint64, GLintptr, GLsizeiptr, GLuint},
    gl_offset, gl_size, gl_sizei, GLEnum, GlError, GlResult, Handle, ObjectKind, ScopedHandle,
};

mod map;

pub use map::{MapAccess, MapGuard, Read, ReadWrite};

/// Marker for buffer objects.
#[derive(Debug)]
pub enum BufferKind {}

// Safety: glCreateBuffers yields fresh names, glDeleteBuffers releases them.
unsafe impl ObjectKind for BufferKind {
    type Args = ();
    const LABEL: &'static str = "buffer";

    unsafe fn create((): ()) -> GLuint {
        crate::gl_create_with(gl::CreateBuffers)
    }
    unsafe fn destroy(name: GLuint) {
        crate::gl_delete_with(gl::DeleteBuffers, name);
    }
    unsafe fn exists(name: GLuint) -> bool {
        gl::IsBuffer(name) == gl::TRUE
    }
}

/// A non-owning buffer name.
pub type BufferHandle = Handle<BufferKind>;
/// An owned buffer, deleted on drop.
pub type Buffer = ScopedHandle<BufferKind>;

gl_enum! {
    /// `pname` values for `glGetNamedBufferParameter*`.
    pub enum Parameter {
        Access = gl::BUFFER_ACCESS,
        AccessFlags = gl::BUFFER_ACCESS_FLAGS,
        Immutable = gl::BUFFER_IMMUTABLE_STORAGE,
        Mapped = gl::BUFFER_MAPPED,
        MapLength = gl::BUFFER_MAP_LENGTH,
        MapOffset = gl::BUFFER_MAP_OFFSET,
        Size = gl::BUFFER_SIZE,
        StorageFlags = gl::BUFFER_STORAGE_FLAGS,
        Usage = gl::BUFFER_USAGE,
    }
}

gl_enum! {
    /// Access policy for `glMapNamedBuffer`.
    pub enum AccessMode {
        ReadOnly = gl::READ_ONLY,
        WriteOnly = gl::WRITE_ONLY,
        ReadWrite = gl::READ_WRITE,
    }
}

gl_enum! {
    /// Targets with an array of binding points, for `glBindBufferBase` and friends.
    pub enum IndexedTarget {
        AtomicCounter = gl::ATOMIC_COUNTER_BUFFER,
        TransformFeedback = gl::TRANSFORM_FEEDBACK_BUFFER,
        Uniform = gl::UNIFORM_BUFFER,
        ShaderStorage = gl::SHADER_STORAGE_BUFFER,
    }
}

gl_enum! {
    /// Hints to the GL as to how often and in what way a buffer will be used.
    ///
    /// *It is very important to get this right* - while it is just a hint (and thus
    /// does not restrict the actual abilities of the buffer) using a buffer in a way
    /// inconsistant with its usage may be several orders of magnitude slower.
    ///
    /// Usually built from [`usage::Frequency`] and [`usage::Access`] with [`Usage::new`].
    pub enum Usage {
        StreamDraw = gl::STREAM_DRAW,
        StreamRead = gl::STREAM_READ,
        StreamCopy = gl::STREAM_COPY,
        StaticDraw = gl::STATIC_DRAW,
        StaticRead = gl::STATIC_READ,
        StaticCopy = gl::STATIC_COPY,
        DynamicDraw = gl::DYNAMIC_DRAW,
        DynamicRead = gl::DYNAMIC_READ,
        DynamicCopy = gl::DYNAMIC_COPY,
    }
}

/// The two halves of a [`Usage`].
///
/// In practice, these determine in what memory space the buffer lives, and whether
/// it is transparently double-buffered by the GL.
pub mod usage {
    /// Describes the relationship between reads and writes
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Frequency {
        /// Contents will be read at most a few times after a write.
        Stream,
        /// Contents will be written once and read many times.
        Static,
        /// Contents will be written many times and read many times.
        Dynamic,
    }
    /// Describes the sources and destinations of reads and writes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Access {
        /// Host writes, GL reads.
        Draw,
        /// Host reads, GL writes.
        Read,
        /// GL writes, GL reads.
        Copy,
    }
}

impl Usage {
    /// Combine a frequency and access into the corresponding `GLenum`.
    #[must_use]
    pub fn new(frequency: usage::Frequency, access: usage::Access) -> Self {
        use usage::{Access as A, Frequency as F};

        match (frequency, access) {
            // This can be done with arithmetic but that sounds evil >w<
            (F::Stream, A::Draw) => Self::StreamDraw,
            (F::Stream, A::Read) => Self::StreamRead,
            (F::Stream, A::Copy) => Self::StreamCopy,

            (F::Static, A::Draw) => Self::StaticDraw,
            (F::Static, A::Read) => Self::StaticRead,
            (F::Static, A::Copy) => Self::StaticCopy,

            (F::Dynamic, A::Draw) => Self::DynamicDraw,
            (F::Dynamic, A::Read) => Self::DynamicRead,
            (F::Dynamic, A::Copy) => Self::DynamicCopy,
        }
    }
    #[must_use]
    pub fn frequency(self) -> usage::Frequency {
        use usage::Frequency as F;
        match self {
            Self::StreamDraw | Self::StreamRead | Self::StreamCopy => F::Stream,
            Self::StaticDraw | Self::StaticRead | Self::StaticCopy => F::Static,
            Self::DynamicDraw | Self::DynamicRead | Self::DynamicCopy => F::Dynamic,
        }
    }
    #[must_use]
    pub fn access(self) -> usage::Access {
        use usage::Access as A;
        match self {
            Self::StreamDraw | Self::StaticDraw | Self::DynamicDraw => A::Draw,
            Self::StreamRead | Self::StaticRead | Self::DynamicRead => A::Read,
            Self::StreamCopy | Self::StaticCopy | Self::DynamicCopy => A::Copy,
        }
    }
}

bitflags::bitflags! {
    /// Access flags for `glMapNamedBufferRange`.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessFlags: GLbitfield {
        /// # Safety
        /// If not set, it is illegal to read from the mapped pointer range.
        const Read = gl::MAP_READ_BIT;
        /// # Safety
        /// If not set, it is illegal to write to the mapped pointer range.
        const Write = gl::MAP_WRITE_BIT;
        /// Discard the data within the range of the mapping.
        ///
        /// Only usable with Write-only access.
        const InvalidateRange = gl::MAP_INVALIDATE_RANGE_BIT;
        /// Discard the data within the entire buffer.
        ///
        /// Only usable with Write-only access.
        const InvalidateBuffer = gl::MAP_INVALIDATE_BUFFER_BIT;
        /// Disable automatic flushing upon `unmap`, see
        /// [`BufferHandle::flush_mapped_range`].
        const FlushExplicit = gl::MAP_FLUSH_EXPLICIT_BIT;
        /// Do not wait for pending GL operations on the buffer before mapping.
        const Unsynchronized = gl::MAP_UNSYNCHRONIZED_BIT;
        /// The mapping may stay alive while the GL uses the buffer.
        const Persistent = gl::MAP_PERSISTENT_BIT;
        /// Persistent mappings are coherent between host and GL.
        const Coherent = gl::MAP_COHERENT_BIT;
    }
}

bitflags::bitflags! {
    /// Flags for immutable storage, `glNamedBufferStorage`.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StorageFlags: GLbitfield {
        const MapRead = gl::MAP_READ_BIT;
        const MapWrite = gl::MAP_WRITE_BIT;
        const MapPersistent = gl::MAP_PERSISTENT_BIT;
        const MapCoherent = gl::MAP_COHERENT_BIT;
        /// Contents may be updated with [`BufferHandle::write`].
        const DynamicStorage = gl::DYNAMIC_STORAGE_BIT;
        /// Prefer host memory for the data store.
        const ClientStorage = gl::CLIENT_STORAGE_BIT;
    }
}

/// Resolve a byte range into `(offset, len)`, asking `len_of_buffer` for the end of an
/// unbounded range.
fn resolve_range(
    range: impl RangeBounds<usize>,
    len_of_buffer: impl FnOnce() -> GlResult<usize>,
) -> GlResult<(usize, usize)> {
    // Min offset, inclusive.
    let start = match range.start_bound().cloned() {
        Bound::Unbounded => 0,
        Bound::Included(x) => x,
        Bound::Excluded(x) => x.checked_add(1).ok_or(GlError::OutOfRange {
            what: "offset",
            value: x,
        })?,
    };
    // Max offset, exclusive.
    let end = match range.end_bound().cloned() {
        Bound::Unbounded => len_of_buffer()?,
        Bound::Included(x) => x.checked_add(1).ok_or(GlError::OutOfRange {
            what: "size",
            value: x,
        })?,
        Bound::Excluded(x) => x,
    };
    let len = end
        .checked_sub(start)
        .ok_or(GlError::InvalidRange { start, end })?;
    Ok((start, len))
}

impl BufferHandle {
    /// Resolve a byte range within this buffer to GL offset and size.
    fn gl_range(self, range: impl RangeBounds<usize>) -> GlResult<(GLintptr, GLsizeiptr)> {
        let (offset, len) = resolve_range(range, || self.len())?;
        Ok((gl_offset(offset)?, gl_size(len)?))
    }

    /// Query a parameter of the buffer.
    #[doc(alias = "glGetNamedBufferParameteriv")]
    #[must_use]
    pub fn parameter(self, pname: Parameter) -> GLint {
        let mut value = 0;
        unsafe {
            gl::GetNamedBufferParameteriv(
                self.name(),
                pname.as_gl(),
                std::ptr::addr_of_mut!(value),
            );
        }
        value
    }
    /// [`Self::parameter`], as a 64 bit integer.
    #[doc(alias = "glGetNamedBufferParameteri64v")]
    #[must_use]
    pub fn parameter64(self, pname: Parameter) -> GLint64 {
        let mut value = 0;
        unsafe {
            gl::GetNamedBufferParameteri64v(
                self.name(),
                pname.as_gl(),
                std::ptr::addr_of_mut!(value),
            );
        }
        value
    }
    fn parameter_usize(self, pname: Parameter) -> GlResult<usize> {
        let value = self.parameter64(pname);
        value
            .try_into()
            .map_err(|_| GlError::Negative { pname: pname.as_gl(), value })
    }

    /// The access policy of the current mapping, translated to `glMapNamedBuffer` terms.
    #[doc(alias = "GL_BUFFER_ACCESS")]
    pub fn access_mode(self) -> GlResult<AccessMode> {
        (self.parameter(Parameter::Access) as crate::GLenum).try_into()
    }
    /// The access policy of the current mapping, translated to `glMapNamedBufferRange` terms.
    /// Empty when unmapped.
    #[doc(alias = "GL_BUFFER_ACCESS_FLAGS")]
    #[must_use]
    pub fn access_flags(self) -> AccessFlags {
        AccessFlags::from_bits_retain(self.parameter(Parameter::AccessFlags) as GLbitfield)
    }
    /// Whether the data store was made with `glNamedBufferStorage`.
    #[doc(alias = "GL_BUFFER_IMMUTABLE_STORAGE")]
    #[must_use]
    pub fn is_immutable(self) -> bool {
        self.parameter(Parameter::Immutable) != GLint::from(gl::FALSE)
    }
    #[doc(alias = "GL_BUFFER_MAPPED")]
    #[must_use]
    pub fn is_mapped(self) -> bool {
        self.parameter(Parameter::Mapped) != GLint::from(gl::FALSE)
    }
    /// Length in bytes of the current mapping, zero when unmapped.
    #[doc(alias = "GL_BUFFER_MAP_LENGTH")]
    pub fn map_len(self) -> GlResult<usize> {
        self.parameter_usize(Parameter::MapLength)
    }
    /// Offset in bytes of the current mapping, zero when unmapped.
    #[doc(alias = "GL_BUFFER_MAP_OFFSET")]
    pub fn map_offset(self) -> GlResult<usize> {
        self.parameter_usize(Parameter::MapOffset)
    }
    /// Size of the data store in bytes.
    #[doc(alias = "GL_BUFFER_SIZE")]
    pub fn len(self) -> GlResult<usize> {
        self.parameter_usize(Parameter::Size)
    }
    #[doc(alias = "GL_BUFFER_USAGE")]
    pub fn usage(self) -> GlResult<Usage> {
        (self.parameter(Parameter::Usage) as crate::GLenum).try_into()
    }
    /// Storage flags. For mutable storage, the GL reports every flag allowed by
    /// `glNamedBufferData`.
    #[doc(alias = "GL_BUFFER_STORAGE_FLAGS")]
    #[must_use]
    pub fn storage_flags(self) -> StorageFlags {
        StorageFlags::from_bits_retain(self.parameter(Parameter::StorageFlags) as GLbitfield)
    }

    /// (Re)allocate the data store and fill it with `data`.
    ///
    /// # Safety
    /// Reallocating unmaps the old data store, so no [`MapGuard`] or raw mapping of this
    /// buffer may be alive:
    /// ```compile_fail,E0133
    /// # use glguard::{buffer::{Read, Usage}, Buffer};
    /// fn stale(buffer: &mut Buffer) -> u8 {
    ///     let copy = buffer.get();
    ///     let guard = buffer.map::<Read>(..).unwrap();
    ///     let _ = copy.allocate(&[0u8; 4], Usage::StaticDraw);
    ///     guard[0]
    /// }
    /// ```
    #[doc(alias = "glNamedBufferData")]
    pub unsafe fn allocate<T: bytemuck::Pod>(self, data: &[T], usage: Usage) -> GlResult<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let len = gl_size(bytes.len())?;
        error::drain();
        gl::NamedBufferData(self.name(), len, bytes.as_ptr().cast(), usage.as_gl());
        // Allocation is where GL_OUT_OF_MEMORY shows up.
        error::check().map(|()| self)
    }
    /// [`Self::allocate`], but does not initialize the data store.
    ///
    /// # Safety
    /// Same as [`Self::allocate`]. Also, host or GL read accesses on uninitialized memory
    /// is undefined behavior, ensure the buffer gets overwritten before any reads can take
    /// place.
    #[doc(alias = "glNamedBufferData")]
    pub unsafe fn allocate_uninit(self, len: usize, usage: Usage) -> GlResult<Self> {
        let len = gl_size(len)?;
        error::drain();
        // Null for uninit
        gl::NamedBufferData(self.name(), len, std::ptr::null(), usage.as_gl());
        error::check().map(|()| self)
    }
    /// Allocate an immutable data store, filled with `data`. It cannot be reallocated.
    ///
    /// # Safety
    /// Same as [`Self::allocate`]: a previous mutable store is unmapped and replaced.
    #[doc(alias = "glNamedBufferStorage")]
    pub unsafe fn allocate_immutable<T: bytemuck::Pod>(
        self,
        data: &[T],
        flags: StorageFlags,
    ) -> GlResult<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let len = gl_size(bytes.len())?;
        error::drain();
        gl::NamedBufferStorage(self.name(), len, bytes.as_ptr().cast(), flags.bits());
        error::check().map(|()| self)
    }
    /// [`Self::allocate_immutable`], but does not initialize the data store.
    ///
    /// # Safety
    /// Same as [`Self::allocate_uninit`].
    #[doc(alias = "glNamedBufferStorage")]
    pub unsafe fn allocate_immutable_uninit(
        self,
        len: usize,
        flags: StorageFlags,
    ) -> GlResult<Self> {
        let len = gl_size(len)?;
        error::drain();
        gl::NamedBufferStorage(self.name(), len, std::ptr::null(), flags.bits());
        error::check().map(|()| self)
    }
    /// Overwrite part of the data store, starting at byte `offset`.
    #[doc(alias = "glNamedBufferSubData")]
    pub fn write<T: bytemuck::Pod>(self, offset: usize, data: &[T]) -> GlResult<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        unsafe {
            gl::NamedBufferSubData(
                self.name(),
                gl_offset(offset)?,
                gl_size(bytes.len())?,
                bytes.as_ptr().cast(),
            );
        }
        Ok(self)
    }
    /// Copy part of the data store, starting at byte `offset`, into `out`.
    #[doc(alias = "glGetNamedBufferSubData")]
    pub fn read<T: bytemuck::Pod>(self, offset: usize, out: &mut [T]) -> GlResult<Self> {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(out);
        unsafe {
            gl::GetNamedBufferSubData(
                self.name(),
                gl_offset(offset)?,
                gl_size(bytes.len())?,
                bytes.as_mut_ptr().cast(),
            );
        }
        Ok(self)
    }

    /// Map the whole buffer. Returns null on failure.
    ///
    /// Prefer [`Buffer::map`], which unmaps automatically.
    ///
    /// # Safety
    /// The pointer is only valid until [`Self::unmap`], and only for accesses permitted
    /// by `access`.
    #[doc(alias = "glMapNamedBuffer")]
    #[must_use]
    pub unsafe fn map_raw(self, access: AccessMode) -> *mut std::ffi::c_void {
        gl::MapNamedBuffer(self.name(), access.as_gl())
    }
    /// Map a byte range of the buffer. Returns null on failure.
    ///
    /// # Safety
    /// Same as [`Self::map_raw`], along with the safety notes on each of [`AccessFlags`].
    #[doc(alias = "glMapNamedBufferRange")]
    pub unsafe fn map_range_raw(
        self,
        range: impl RangeBounds<usize>,
        access: AccessFlags,
    ) -> GlResult<*mut std::ffi::c_void> {
        let (offset, len) = self.gl_range(range)?;
        Ok(gl::MapNamedBufferRange(self.name(), offset, len, access.bits()))
    }
    /// Unmap the buffer, invalidating any mapped pointer.
    ///
    /// Returns `false` if the data store was corrupted while mapped (for example, by a
    /// display mode change) and must be reinitialized.
    ///
    /// # Safety
    /// No [`MapGuard`] of this buffer may be alive. Handles are `Copy`, so the guard's
    /// borrow of the owner does not rule this out:
    /// ```compile_fail,E0133
    /// # use glguard::{buffer::Read, Buffer};
    /// fn stale(buffer: &mut Buffer) -> u8 {
    ///     let copy = buffer.get();
    ///     let guard = buffer.map::<Read>(..).unwrap();
    ///     copy.unmap();
    ///     guard[0]
    /// }
    /// ```
    #[doc(alias = "glUnmapNamedBuffer")]
    pub unsafe fn unmap(self) -> bool {
        gl::UnmapNamedBuffer(self.name()) == gl::TRUE
    }
    /// Flush modifications to a range of a mapping made with [`AccessFlags::FlushExplicit`].
    /// The range is relative to the start of the mapping.
    #[doc(alias = "glFlushMappedNamedBufferRange")]
    pub fn flush_mapped_range(self, range: impl RangeBounds<usize>) -> GlResult<Self> {
        let (offset, len) = resolve_range(range, || self.map_len())?;
        unsafe {
            gl::FlushMappedNamedBufferRange(self.name(), gl_offset(offset)?, gl_size(len)?);
        }
        Ok(self)
    }

    /// Bind the whole buffer to binding point `index` of `target`.
    #[doc(alias = "glBindBufferBase")]
    pub fn bind_base(self, target: IndexedTarget, index: u32) -> Self {
        unsafe {
            gl::BindBufferBase(target.as_gl(), index, self.name());
        }
        self
    }
    /// Bind a byte range of the buffer to binding point `index` of `target`.
    #[doc(alias = "glBindBufferRange")]
    pub fn bind_range(
        self,
        target: IndexedTarget,
        index: u32,
        range: impl RangeBounds<usize>,
    ) -> GlResult<Self> {
        let (offset, len) = self.gl_range(range)?;
        unsafe {
            gl::BindBufferRange(target.as_gl(), index, self.name(), offset, len);
        }
        Ok(self)
    }
    /// Bind whole buffers to consecutive binding points of `target`, starting at `first`.
    #[doc(alias = "glBindBuffersBase")]
    pub fn bind_bases(
        target: IndexedTarget,
        first: u32,
        buffers: impl IntoIterator<Item = Self>,
    ) -> GlResult<()> {
        let names: Vec<GLuint> = buffers.into_iter().map(Handle::name).collect();
        let count = gl_sizei("buffer count", names.len())?;
        unsafe {
            gl::BindBuffersBase(target.as_gl(), first, count, names.as_ptr());
        }
        Ok(())
    }
    /// Bind byte ranges of buffers to consecutive binding points of `target`, starting
    /// at `first`.
    #[doc(alias = "glBindBuffersRange")]
    pub fn bind_ranges(
        target: IndexedTarget,
        first: u32,
        ranges: impl IntoIterator<Item = (Self, std::ops::Range<usize>)>,
    ) -> GlResult<()> {
        let iter = ranges.into_iter();
        let capacity = iter.size_hint().0;
        let mut names = Vec::with_capacity(capacity);
        let mut offsets = Vec::with_capacity(capacity);
        let mut sizes = Vec::with_capacity(capacity);
        for (buffer, range) in iter {
            let (offset, len) = buffer.gl_range(range)?;
            names.push(buffer.name());
            offsets.push(offset);
            sizes.push(len);
        }
        let count = gl_sizei("buffer count", names.len())?;
        unsafe {
            gl::BindBuffersRange(
                target.as_gl(),
                first,
                count,
                names.as_ptr(),
                offsets.as_ptr(),
                sizes.as_ptr(),
            );
        }
        Ok(())
    }
    /// Copy `len` bytes from `src` to `dst`. The two ranges may be in the same buffer, but
    /// must not overlap.
    #[doc(alias = "glCopyNamedBufferSubData")]
    pub fn copy(
        src: Self,
        dst: Self,
        src_offset: usize,
        dst_offset: usize,
        len: usize,
    ) -> GlResult<()> {
        unsafe {
            gl::CopyNamedBufferSubData(
                src.name(),
                dst.name(),
                gl_offset(src_offset)?,
                gl_offset(dst_offset)?,
                gl_size(len)?,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_match_gl_bits() {
        assert_eq!(AccessFlags::Read.bits(), 0x0001);
        assert_eq!(AccessFlags::Write.bits(), 0x0002);
        assert_eq!(AccessFlags::InvalidateRange.bits(), 0x0004);
        assert_eq!(AccessFlags::InvalidateBuffer.bits(), 0x0008);
        assert_eq!(AccessFlags::FlushExplicit.bits(), 0x0010);
        assert_eq!(AccessFlags::Unsynchronized.bits(), 0x0020);
        assert_eq!(AccessFlags::Persistent.bits(), 0x0040);
        assert_eq!(AccessFlags::Coherent.bits(), 0x0080);

        assert_eq!(StorageFlags::DynamicStorage.bits(), 0x0100);
        assert_eq!(StorageFlags::ClientStorage.bits(), 0x0200);
        assert_eq!(
            (StorageFlags::MapRead | StorageFlags::MapWrite).bits(),
            0x0003
        );
    }

    #[test]
    fn flags_combine() {
        let flags = AccessFlags::Read | AccessFlags::Write | AccessFlags::Persistent;
        assert_eq!(flags & AccessFlags::Write, AccessFlags::Write);
        assert!((flags & AccessFlags::Coherent).is_empty());
        assert!(flags.contains(AccessFlags::Read | AccessFlags::Persistent));
        // Unknown driver bits survive a round trip through the query path.
        assert_eq!(AccessFlags::from_bits_retain(0x8000_0001).bits(), 0x8000_0001);
    }

    #[test]
    fn enums_match_gl_constants() {
        assert_eq!(Parameter::Size.as_gl(), 0x8764);
        assert_eq!(Parameter::StorageFlags.as_gl(), 0x8220);
        assert_eq!(Parameter::MapOffset.as_gl(), 0x9121);
        assert_eq!(AccessMode::ReadWrite.as_gl(), 0x88BA);
        assert_eq!(Usage::StaticDraw.as_gl(), 0x88E4);
        assert_eq!(Usage::StreamCopy.as_gl(), 0x88E2);
        assert_eq!(IndexedTarget::ShaderStorage.as_gl(), 0x90D2);
        assert_eq!(IndexedTarget::AtomicCounter.as_gl(), 0x92C0);
    }

    #[test]
    fn queried_enums_are_checked() {
        assert_eq!(Usage::try_from(0x88E9_u32).unwrap(), Usage::DynamicRead);
        assert_eq!(AccessMode::try_from(0x88B8_u32).unwrap(), AccessMode::ReadOnly);
        assert!(matches!(
            Usage::try_from(0_u32),
            Err(GlError::UnknownEnum { kind: "Usage", value: 0 })
        ));
    }

    #[test]
    fn usage_splits_and_joins() {
        use usage::{Access, Frequency};
        for frequency in [Frequency::Stream, Frequency::Static, Frequency::Dynamic] {
            for access in [Access::Draw, Access::Read, Access::Copy] {
                let usage = Usage::new(frequency, access);
                assert_eq!(usage.frequency(), frequency);
                assert_eq!(usage.access(), access);
            }
        }
        assert_eq!(Usage::new(Frequency::Dynamic, Access::Draw), Usage::DynamicDraw);
    }

    #[test]
    fn ranges_resolve_to_offset_and_len() {
        let never = || -> GlResult<usize> { panic!("bounded ranges must not query the size") };
        assert_eq!(resolve_range(4..10, never).unwrap(), (4, 6));
        assert_eq!(resolve_range(4..=10, never).unwrap(), (4, 7));
        assert_eq!(resolve_range(..3, never).unwrap(), (0, 3));
        assert_eq!(resolve_range(5..5, never).unwrap(), (5, 0));
        assert_eq!(resolve_range(16.., || Ok(64)).unwrap(), (16, 48));
        assert_eq!(resolve_range(.., || Ok(64)).unwrap(), (0, 64));
    }

    #[test]
    fn backwards_ranges_are_rejected() {
        assert!(matches!(
            resolve_range(10..4, || Ok(0)),
            Err(GlError::InvalidRange { start: 10, end: 4 })
        ));
        assert!(matches!(
            resolve_range(80.., || Ok(64)),
            Err(GlError::InvalidRange { start: 80, end: 64 })
        ));
        assert!(matches!(
            resolve_range(..=usize::MAX, || Ok(0)),
            Err(GlError::OutOfRange { .. })
        ));
    }

    #[test]
    fn size_query_errors_propagate() {
        let failing = || -> GlResult<usize> { Err(GlError::Gl(gl::INVALID_OPERATION)) };
        assert!(matches!(
            resolve_range(0.., failing),
            Err(GlError::Gl(gl::INVALID_OPERATION))
        ));
    }
}
