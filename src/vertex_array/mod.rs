//! Vertex array objects and their attribute definitions.
//!
//! A vertex array remembers which buffers feed which binding points, and provides offsets,
//! sizes, and types for the attributes fetched by the vertex shader. Everything here uses
//! the named entry points, so configuring an array does not require binding it.

use crate::{
    gl, gl::types::GLuint, gl_offset, gl_sizei, BufferHandle, GLEnum, GlResult, Handle,
    ObjectKind, ScopedHandle,
};

mod format;

use format::FormatCall;

pub use format::{
    AttribType, Attribute, AttributeType, Components, FloatingAttribute, IntegerAttribute,
    PackedAttribute,
};

/// Marker for vertex array objects.
#[derive(Debug)]
pub enum VertexArrayKind {}

// Safety: glCreateVertexArrays yields fresh names, glDeleteVertexArrays releases them.
unsafe impl ObjectKind for VertexArrayKind {
    type Args = ();
    const LABEL: &'static str = "vertex array";

    unsafe fn create((): ()) -> GLuint {
        crate::gl_create_with(gl::CreateVertexArrays)
    }
    unsafe fn destroy(name: GLuint) {
        crate::gl_delete_with(gl::DeleteVertexArrays, name);
    }
    unsafe fn exists(name: GLuint) -> bool {
        gl::IsVertexArray(name) == gl::TRUE
    }
}

/// A non-owning vertex array name.
pub type VertexArrayHandle = Handle<VertexArrayKind>;
/// An owned vertex array, deleted on drop.
pub type VertexArray = ScopedHandle<VertexArrayKind>;

impl VertexArrayHandle {
    /// Make this the current vertex array, for drawing.
    #[doc(alias = "glBindVertexArray")]
    pub fn bind(self) -> Self {
        unsafe {
            gl::BindVertexArray(self.name());
        }
        self
    }
    /// Unbind the current vertex array.
    #[doc(alias = "glBindVertexArray")]
    pub fn unbind() {
        unsafe {
            gl::BindVertexArray(0);
        }
    }
    /// Attach a buffer to the vertex buffer binding point `binding`. `offset` is the byte
    /// offset of the first vertex, `stride` the distance in bytes between vertices.
    #[doc(alias = "glVertexArrayVertexBuffer")]
    pub fn bind_vertex_buffer(
        self,
        binding: u32,
        buffer: BufferHandle,
        offset: usize,
        stride: usize,
    ) -> GlResult<Self> {
        unsafe {
            gl::VertexArrayVertexBuffer(
                self.name(),
                binding,
                buffer.name(),
                gl_offset(offset)?,
                gl_sizei("stride", stride)?,
            );
        }
        Ok(self)
    }
    /// Attach `(buffer, offset, stride)` triples to consecutive binding points, starting at
    /// `first`.
    #[doc(alias = "glVertexArrayVertexBuffers")]
    pub fn bind_vertex_buffers(
        self,
        first: u32,
        buffers: impl IntoIterator<Item = (BufferHandle, usize, usize)>,
    ) -> GlResult<Self> {
        let iter = buffers.into_iter();
        let capacity = iter.size_hint().0;
        let mut names = Vec::with_capacity(capacity);
        let mut offsets = Vec::with_capacity(capacity);
        let mut strides = Vec::with_capacity(capacity);
        for (buffer, offset, stride) in iter {
            names.push(buffer.name());
            offsets.push(gl_offset(offset)?);
            strides.push(gl_sizei("stride", stride)?);
        }
        let count = gl_sizei("buffer count", names.len())?;
        unsafe {
            gl::VertexArrayVertexBuffers(
                self.name(),
                first,
                count,
                names.as_ptr(),
                offsets.as_ptr(),
                strides.as_ptr(),
            );
        }
        Ok(self)
    }
    /// Set the buffer indices are fetched from. [`Handle::NULL`] detaches it.
    #[doc(alias = "glVertexArrayElementBuffer")]
    pub fn bind_element_buffer(self, buffer: BufferHandle) -> Self {
        unsafe {
            gl::VertexArrayElementBuffer(self.name(), buffer.name());
        }
        self
    }
    /// Fetch attribute `attribute` from vertex buffer binding point `binding`.
    #[doc(alias = "glVertexArrayAttribBinding")]
    pub fn bind_attribute(self, attribute: u32, binding: u32) -> Self {
        unsafe {
            gl::VertexArrayAttribBinding(self.name(), attribute, binding);
        }
        self
    }
    /// Enable the attribute at `index`. By default, all attributes are disabled.
    #[doc(alias = "glEnableVertexArrayAttrib")]
    pub fn enable_attribute(self, index: u32) -> Self {
        unsafe {
            gl::EnableVertexArrayAttrib(self.name(), index);
        }
        self
    }
    #[doc(alias = "glDisableVertexArrayAttrib")]
    pub fn disable_attribute(self, index: u32) -> Self {
        unsafe {
            gl::DisableVertexArrayAttrib(self.name(), index);
        }
        self
    }
    pub fn set_attribute_enabled(self, index: u32, enabled: bool) -> Self {
        if enabled {
            self.enable_attribute(index)
        } else {
            self.disable_attribute(index)
        }
    }
    /// Advance attributes fed by `binding` once every `divisor` instances, instead of once
    /// per vertex. Zero restores per-vertex fetching.
    #[doc(alias = "glVertexArrayBindingDivisor")]
    pub fn set_binding_divisor(self, binding: u32, divisor: u32) -> Self {
        unsafe {
            gl::VertexArrayBindingDivisor(self.name(), binding, divisor);
        }
        self
    }
    /// Describe a float-valued attribute. With `normalized`, integer types are mapped to
    /// `[0, 1]` or `[-1, 1]`, otherwise they are converted directly.
    /// Ignored for [`AttribType::Fixed16_16`].
    #[doc(alias = "glVertexArrayAttribFormat")]
    pub fn attrib_format(
        self,
        index: u32,
        components: Components,
        ty: AttribType,
        normalized: bool,
        relative_offset: u32,
    ) -> Self {
        let normalized = if normalized { gl::TRUE } else { gl::FALSE };
        unsafe {
            gl::VertexArrayAttribFormat(
                self.name(),
                index,
                components.into(),
                ty.as_gl(),
                normalized,
                relative_offset,
            );
        }
        self
    }
    /// Describe an integer-valued attribute.
    #[doc(alias = "glVertexArrayAttribIFormat")]
    pub fn attrib_i_format(
        self,
        index: u32,
        components: Components,
        ty: AttribType,
        relative_offset: u32,
    ) -> Self {
        unsafe {
            gl::VertexArrayAttribIFormat(
                self.name(),
                index,
                components.into(),
                ty.as_gl(),
                relative_offset,
            );
        }
        self
    }
    /// Describe a 64 bit attribute.
    #[doc(alias = "glVertexArrayAttribLFormat")]
    pub fn attrib_l_format(
        self,
        index: u32,
        components: Components,
        ty: AttribType,
        relative_offset: u32,
    ) -> Self {
        unsafe {
            gl::VertexArrayAttribLFormat(
                self.name(),
                index,
                components.into(),
                ty.as_gl(),
                relative_offset,
            );
        }
        self
    }
    /// Set the format and source binding of attribute `index`, using whichever of
    /// [`Self::attrib_format`], [`Self::attrib_i_format`], and [`Self::attrib_l_format`]
    /// matches the attribute type.
    ///
    /// `enable` is provided as a convinience - if set to Some, will enable or disable
    /// the attribute after setting properties. If set to none, no action is taken,
    /// effectively inheriting the previous state. By default, attributes are disabled.
    pub fn attribute(
        self,
        index: u32,
        attribute: Attribute,
        enable: Option<bool>,
    ) -> GlResult<Self> {
        attribute.validate()?;
        let Attribute {
            ty,
            components,
            relative_offset,
            binding,
        } = attribute;
        let raw = ty.attrib_type();

        match ty.format_call() {
            FormatCall::Integer => self.attrib_i_format(index, components, raw, relative_offset),
            FormatCall::Long => self.attrib_l_format(index, components, raw, relative_offset),
            FormatCall::Float { normalized } => {
                self.attrib_format(index, components, raw, normalized, relative_offset)
            }
        };
        self.bind_attribute(index, binding);

        if let Some(enable) = enable {
            self.set_attribute_enabled(index, enable);
        }
        Ok(self)
    }
}
