use crate::{gl, GlError, GlResult};

/// Determines the number of components to load, generally this should match the
/// dimensionality of the vertex shader input.
///
/// For non-packed formats, this determines the number of `ty` typed items to read.
/// For [packed](PackedAttribute) formats, this must match
/// [`PackedAttribute::components`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Components {
    Scalar = 1,
    Vec2 = 2,
    Vec3 = 3,
    Vec4 = 4,
}
impl From<Components> for i32 {
    fn from(value: Components) -> Self {
        value as _
    }
}

gl_enum! {
    /// Every `type` accepted by `glVertexArrayAttrib*Format`.
    ///
    /// Which of the three entry points accepts which type is encoded by [`AttributeType`].
    pub enum AttribType {
        I8 = gl::BYTE,
        U8 = gl::UNSIGNED_BYTE,
        I16 = gl::SHORT,
        U16 = gl::UNSIGNED_SHORT,
        I32 = gl::INT,
        U32 = gl::UNSIGNED_INT,
        /// Fixed point `16.16` format.
        Fixed16_16 = gl::FIXED,
        F16 = gl::HALF_FLOAT,
        F32 = gl::FLOAT,
        F64 = gl::DOUBLE,
        IReverse2_10_10_10 = gl::INT_2_10_10_10_REV,
        UReverse2_10_10_10 = gl::UNSIGNED_INT_2_10_10_10_REV,
        UFloatReverse10_11_11 = gl::UNSIGNED_INT_10F_11F_11F_REV,
    }
}

/// One integer per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerAttribute {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
}
impl IntegerAttribute {
    /// Get the align requirements for fetching this attribute.
    pub fn align_of(&self) -> usize {
        match self {
            Self::U8 => std::mem::align_of::<u8>(),
            Self::I8 => std::mem::align_of::<i8>(),
            Self::U16 => std::mem::align_of::<u16>(),
            Self::I16 => std::mem::align_of::<i16>(),
            Self::U32 => std::mem::align_of::<u32>(),
            Self::I32 => std::mem::align_of::<i32>(),
        }
    }
}
impl From<IntegerAttribute> for AttribType {
    fn from(value: IntegerAttribute) -> Self {
        match value {
            IntegerAttribute::U8 => Self::U8,
            IntegerAttribute::I8 => Self::I8,
            IntegerAttribute::U16 => Self::U16,
            IntegerAttribute::I16 => Self::I16,
            IntegerAttribute::U32 => Self::U32,
            IntegerAttribute::I32 => Self::I32,
        }
    }
}

/// One float per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatingAttribute {
    F16,
    F32,
    /// Fixed point `16.16` format.
    Fixed16_16,
}
impl FloatingAttribute {
    /// Get the align requirements for fetching this attribute.
    pub fn align_of(&self) -> usize {
        match self {
            Self::F16 => std::mem::align_of::<u16>(),
            Self::F32 => std::mem::align_of::<f32>(),
            Self::Fixed16_16 => std::mem::align_of::<u32>(),
        }
    }
}
impl From<FloatingAttribute> for AttribType {
    fn from(value: FloatingAttribute) -> Self {
        match value {
            FloatingAttribute::F16 => Self::F16,
            FloatingAttribute::F32 => Self::F32,
            FloatingAttribute::Fixed16_16 => Self::Fixed16_16,
        }
    }
}

/// A single 32 bit element holding several packed components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedAttribute {
    /// LSB -> MSB, `[i10, i10, i10, i2]` packed signed integers.
    /// The fourth component, `w`, is 2 bits.
    IReverse2_10_10_10,
    /// LSB -> MSB, `[u10, u10, u10, u2]` packed unsigned integers.
    /// The fourth component, `w`, is 2 bits.
    UReverse2_10_10_10,
    /// LSB -> MSB, `[f11, f11, f10]` packed unsigned floats.
    UFloatReverse10_11_11,
}
impl PackedAttribute {
    /// Get the align requirements for fetching this attribute.
    pub fn align_of(&self) -> usize {
        std::mem::align_of::<u32>()
    }
    /// The component count this format must be fetched with.
    pub fn components(&self) -> Components {
        match self {
            Self::IReverse2_10_10_10 | Self::UReverse2_10_10_10 => Components::Vec4,
            Self::UFloatReverse10_11_11 => Components::Vec3,
        }
    }
}
impl From<PackedAttribute> for AttribType {
    fn from(value: PackedAttribute) -> Self {
        match value {
            PackedAttribute::IReverse2_10_10_10 => Self::IReverse2_10_10_10,
            PackedAttribute::UReverse2_10_10_10 => Self::UReverse2_10_10_10,
            PackedAttribute::UFloatReverse10_11_11 => Self::UFloatReverse10_11_11,
        }
    }
}

/// Specifies the type and interpretation of component data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    /// Fetch as integers, access in shader as integers.
    Integer(IntegerAttribute),
    /// Fetch as integers, access in shader directly casted to floats.
    /// E.g. `3` becomes `3.0`.
    Scaled(IntegerAttribute),
    /// Fetch as packed integers, access in shader directly casted to floats.
    /// E.g. `3` becomes `3.0`.
    PackedScaled(PackedAttribute),
    /// Fetch as integers, access in shader as normalized floats.
    /// `[0, 1]` for unsigned integer formats and `[-1, 1]` for signed integer formats.
    Normalized(IntegerAttribute),
    /// Fetch as packed integers, access in shader as normalized floats.
    /// `[0, 1]` for unsigned integer formats and `[-1, 1]` for signed integer formats.
    PackedNormalized(PackedAttribute),
    /// Fetch as floats, access in shader as floats.
    Float(FloatingAttribute),
    /// Fetch as doubles, access in shader as `double`/`dvec*`.
    Double,
}
impl AttributeType {
    /// Get the align requirements for fetching this attribute.
    pub fn align_of(&self) -> usize {
        match self {
            AttributeType::Float(ty) => ty.align_of(),

            AttributeType::Scaled(ty)
            | AttributeType::Integer(ty)
            | AttributeType::Normalized(ty) => ty.align_of(),

            AttributeType::PackedScaled(ty) | AttributeType::PackedNormalized(ty) => ty.align_of(),

            AttributeType::Double => std::mem::align_of::<f64>(),
        }
    }
    /// The raw `type` argument.
    pub fn attrib_type(&self) -> AttribType {
        match *self {
            AttributeType::Float(ty) => ty.into(),
            AttributeType::Scaled(ty)
            | AttributeType::Integer(ty)
            | AttributeType::Normalized(ty) => ty.into(),
            AttributeType::PackedScaled(ty) | AttributeType::PackedNormalized(ty) => ty.into(),
            AttributeType::Double => AttribType::F64,
        }
    }
    /// Which `glVertexArrayAttrib*Format` entry point describes this type.
    pub(super) fn format_call(&self) -> FormatCall {
        match self {
            AttributeType::Integer(_) => FormatCall::Integer,
            AttributeType::Double => FormatCall::Long,
            AttributeType::Float(_) | AttributeType::Scaled(_) | AttributeType::PackedScaled(_) => {
                FormatCall::Float { normalized: false }
            }
            AttributeType::Normalized(_) | AttributeType::PackedNormalized(_) => {
                FormatCall::Float { normalized: true }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FormatCall {
    /// `glVertexArrayAttribFormat`
    Float { normalized: bool },
    /// `glVertexArrayAttribIFormat`
    Integer,
    /// `glVertexArrayAttribLFormat`
    Long,
}

/// A full vertex attribute description, for [`super::VertexArrayHandle::attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    /// The type of data to fetch from the array, as well as it's interpretation
    /// within the shader interface.
    pub ty: AttributeType,
    /// The number of components of the scalar/vector.
    pub components: Components,
    /// Offset, in bytes, from the start of each vertex in the bound buffer.
    ///
    /// This must be aligned with [`AttributeType::align_of`].
    pub relative_offset: u32,
    /// The vertex buffer binding point to fetch from.
    pub binding: u32,
}
impl Attribute {
    /// Check the description against the GL's format rules.
    pub fn validate(&self) -> GlResult<()> {
        let align = self.ty.align_of();
        let offset = self.relative_offset as usize;
        if offset % align != 0 {
            return Err(GlError::Misaligned { offset, align });
        }
        if let AttributeType::PackedScaled(ty) | AttributeType::PackedNormalized(ty) = self.ty {
            let required = ty.components();
            if self.components != required {
                return Err(GlError::PackedComponents {
                    required: required.into(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GLEnum;

    fn attribute(ty: AttributeType, components: Components, relative_offset: u32) -> Attribute {
        Attribute {
            ty,
            components,
            relative_offset,
            binding: 0,
        }
    }

    #[test]
    fn attrib_types_match_gl_constants() {
        assert_eq!(AttribType::I8.as_gl(), 0x1400);
        assert_eq!(AttribType::F32.as_gl(), 0x1406);
        assert_eq!(AttribType::F64.as_gl(), 0x140A);
        assert_eq!(AttribType::Fixed16_16.as_gl(), 0x140C);
        assert_eq!(AttribType::UFloatReverse10_11_11.as_gl(), 0x8C3B);
        assert_eq!(i32::from(Components::Vec3), 3);
    }

    #[test]
    fn structured_types_lower_to_raw_types() {
        assert_eq!(
            AttributeType::Normalized(IntegerAttribute::U8).attrib_type(),
            AttribType::U8
        );
        assert_eq!(
            AttributeType::PackedNormalized(PackedAttribute::IReverse2_10_10_10).attrib_type(),
            AttribType::IReverse2_10_10_10
        );
        assert_eq!(AttributeType::Double.attrib_type(), AttribType::F64);
        assert_eq!(
            AttribType::try_from(gl::HALF_FLOAT).unwrap(),
            AttribType::F16
        );
    }

    #[test]
    fn each_type_picks_its_format_call() {
        let float = FormatCall::Float { normalized: false };
        let normalized = FormatCall::Float { normalized: true };
        let cases = [
            (AttributeType::Integer(IntegerAttribute::I32), FormatCall::Integer),
            (AttributeType::Double, FormatCall::Long),
            (AttributeType::Float(FloatingAttribute::F16), float),
            (AttributeType::Scaled(IntegerAttribute::U16), float),
            (
                AttributeType::PackedScaled(PackedAttribute::UReverse2_10_10_10),
                float,
            ),
            (AttributeType::Normalized(IntegerAttribute::U8), normalized),
            (
                AttributeType::PackedNormalized(PackedAttribute::IReverse2_10_10_10),
                normalized,
            ),
        ];
        for (ty, expected) in cases {
            assert_eq!(ty.format_call(), expected, "{ty:?}");
        }
    }

    #[test]
    fn offsets_must_be_aligned() {
        let float = AttributeType::Float(FloatingAttribute::F32);
        assert!(attribute(float, Components::Vec3, 12).validate().is_ok());
        assert!(matches!(
            attribute(float, Components::Vec3, 6).validate(),
            Err(GlError::Misaligned { offset: 6, align: 4 })
        ));
        let bytes = AttributeType::Integer(IntegerAttribute::U8);
        assert!(attribute(bytes, Components::Vec2, 3).validate().is_ok());
        assert!(matches!(
            attribute(AttributeType::Double, Components::Scalar, 4).validate(),
            Err(GlError::Misaligned { align: 8, .. })
        ));
    }

    #[test]
    fn packed_types_fix_their_component_count() {
        let packed = AttributeType::PackedScaled(PackedAttribute::UReverse2_10_10_10);
        assert!(attribute(packed, Components::Vec4, 0).validate().is_ok());
        assert!(matches!(
            attribute(packed, Components::Vec3, 0).validate(),
            Err(GlError::PackedComponents { required: 4 })
        ));

        let floats = AttributeType::PackedNormalized(PackedAttribute::UFloatReverse10_11_11);
        assert!(attribute(floats, Components::Vec3, 4).validate().is_ok());
        assert!(matches!(
            attribute(floats, Components::Vec4, 4).validate(),
            Err(GlError::PackedComponents { required: 3 })
        ));
    }
}
