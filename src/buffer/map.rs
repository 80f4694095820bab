//! Scoped buffer mappings.

use std::ops::RangeBounds;

use super::{AccessFlags, Buffer};
use crate::{GlError, GlResult};

/// Marker trait for the access modes of a [`MapGuard`].
/// # Safety
/// `FLAGS` must contain `Read` and optionally `Write`, and no others.
pub unsafe trait MapAccess: crate::sealed::Sealed {
    const FLAGS: AccessFlags;
}
/// Marker type for a Read-only mapping.
#[derive(Debug)]
pub struct Read;
impl crate::sealed::Sealed for Read {}
unsafe impl MapAccess for Read {
    const FLAGS: AccessFlags = AccessFlags::Read;
}
/// Marker type for a Read-Write mapping.
#[derive(Debug)]
pub struct ReadWrite;
impl crate::sealed::Sealed for ReadWrite {}
unsafe impl MapAccess for ReadWrite {
    const FLAGS: AccessFlags = AccessFlags::Read.union(AccessFlags::Write);
}

/// A mapped byte range of a buffer, unmapped on drop.
pub struct MapGuard<'buffer, Access: MapAccess> {
    // Held mutably, as the buffer must not be deleted, reset, or mapped again
    // until it is unmapped.
    buffer: &'buffer mut Buffer,
    access: std::marker::PhantomData<Access>,
    ptr: *mut u8,
    len: usize,
}

impl<Access: MapAccess> MapGuard<'_, Access> {
    /// Byte offset of the mapping within the buffer.
    pub fn offset(&self) -> GlResult<usize> {
        self.buffer.map_offset()
    }
}

impl<Access: MapAccess> std::ops::Deref for MapGuard<'_, Access> {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        // Safety: not null (that's an error condition and self wouldn't have been made)
        // Align is one.
        unsafe { std::slice::from_raw_parts(self.ptr.cast_const(), self.len) }
    }
}
impl std::ops::DerefMut for MapGuard<'_, ReadWrite> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // Safety: not null (that's an error condition and self wouldn't have been made)
        // Align is one.
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}
impl<Access: MapAccess> Drop for MapGuard<'_, Access> {
    fn drop(&mut self) {
        // Safety: this guard is the mapping being ended.
        if !unsafe { self.buffer.unmap() } {
            log::warn!(
                "buffer {} data store was corrupted while mapped",
                self.buffer.name()
            );
        }
    }
}

impl Buffer {
    /// Map a byte range. Use the marker types [`Read`] and [`ReadWrite`] to specify access mode.
    ///
    /// If the range is unbounded to the right, a glGet is invoked to map the rest of the buffer size.
    #[doc(alias = "glMapNamedBufferRange")]
    pub fn map<Access: MapAccess>(
        &mut self,
        range: impl RangeBounds<usize>,
    ) -> GlResult<MapGuard<'_, Access>> {
        let handle = self.get();
        let (offset, len) = super::resolve_range(range, || handle.len())?;
        // Safety: the guard only hands out accesses permitted by `Access::FLAGS`, and
        // unmaps before the pointer can dangle.
        let ptr = unsafe { handle.map_range_raw(offset..offset + len, Access::FLAGS)? };
        if ptr.is_null() {
            return Err(GlError::MapFailed(handle.name()));
        }
        Ok(MapGuard {
            buffer: self,
            access: std::marker::PhantomData,
            ptr: ptr.cast(),
            len,
        })
    }
}
