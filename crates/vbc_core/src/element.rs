//! Element type catalog: built-in tags, sizes, and conversion dispatch.

use std::collections::HashMap;

use crate::dec3n::Dec3N;
use crate::error::{CodecError, CodecResult, ElementError};
use crate::scalar::{self, NumericFormat, ScalarKind};
use crate::tokenizer::LineCursor;

/// Parses one element's tokens from the cursor into its packed bytes.
///
/// `out` is exactly the element's registered size.
pub type ParseFn = fn(cursor: &mut LineCursor<'_>, out: &mut [u8]) -> Result<(), ElementError>;

/// Formats one element's packed bytes, components joined by single spaces.
pub type FormatFn = fn(bytes: &[u8], format: NumericFormat, out: &mut String);

/// How an element's components move between tokens and bytes.
#[derive(Debug, Clone, Copy)]
pub enum ElementCodec {
    /// Consecutive scalars of one kind.
    Scalar(ScalarKind),
    /// Three floats packed into one 10:10:10:2 word.
    Dec3N,
    /// Caller-registered conversion routines.
    Custom { parse: ParseFn, format: FormatFn },
}

impl ElementCodec {
    /// Read `components` tokens from the cursor and pack them into `out`.
    pub fn parse(
        self,
        components: usize,
        cursor: &mut LineCursor<'_>,
        out: &mut [u8],
    ) -> Result<(), ElementError> {
        match self {
            ElementCodec::Scalar(kind) => {
                let width = kind.size();
                for i in 0..components {
                    let token = cursor.next_token().ok_or(ElementError::InsufficientTokens {
                        requested: components,
                        found: i,
                        column: cursor.position(),
                    })?;
                    kind.parse(token, &mut out[i * width..(i + 1) * width])?;
                }
                Ok(())
            }
            ElementCodec::Dec3N => {
                // Stage three floats, then pack; w is reserved and stays 0.
                let [x, y, z] = cursor.take::<3>()?;
                let packed = Dec3N::new(
                    scalar::parse_f32(x)?,
                    scalar::parse_f32(y)?,
                    scalar::parse_f32(z)?,
                    0.0,
                );
                out.copy_from_slice(&packed.to_bits().to_ne_bytes());
                Ok(())
            }
            ElementCodec::Custom { parse, .. } => parse(cursor, out),
        }
    }

    /// Format the element's packed bytes, components separated by spaces.
    pub fn format(self, bytes: &[u8], format: NumericFormat, out: &mut String) {
        match self {
            ElementCodec::Scalar(kind) => {
                for (i, chunk) in bytes.chunks_exact(kind.size()).enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    kind.format(chunk, format, out);
                }
            }
            ElementCodec::Dec3N => {
                let bits = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                let packed = Dec3N::from_bits(bits);
                for (i, component) in packed.to_array().into_iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    scalar::write_float(component, format, out);
                }
            }
            ElementCodec::Custom { format: format_fn, .. } => format_fn(bytes, format, out),
        }
    }
}

/// Resolved description of one element type.
#[derive(Debug, Clone, Copy)]
pub struct ElementInfo {
    /// Packed byte size of the whole element.
    pub size: usize,
    /// Number of text tokens one element consumes.
    pub components: usize,
    /// Conversion dispatch.
    pub codec: ElementCodec,
}

/// The built-in element types.
///
/// Tags are case-sensitive with exactly one canonical spelling each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Float,
    Float2,
    Float3,
    Float4,
    Half2,
    Half4,
    Color,
    UShort,
    UInt,
    Dec3N,
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        ElementType::Float,
        ElementType::Float2,
        ElementType::Float3,
        ElementType::Float4,
        ElementType::Half2,
        ElementType::Half4,
        ElementType::Color,
        ElementType::UShort,
        ElementType::UInt,
        ElementType::Dec3N,
    ];

    /// The canonical tag spelling.
    pub const fn tag(self) -> &'static str {
        match self {
            ElementType::Float => "Float",
            ElementType::Float2 => "Float2",
            ElementType::Float3 => "Float3",
            ElementType::Float4 => "Float4",
            ElementType::Half2 => "Half2",
            ElementType::Half4 => "Half4",
            ElementType::Color => "Color",
            ElementType::UShort => "UShort",
            ElementType::UInt => "UInt",
            ElementType::Dec3N => "Dec3N",
        }
    }

    /// Size, component count, and codec for this type.
    pub const fn info(self) -> ElementInfo {
        match self {
            ElementType::Float => scalar_info(ScalarKind::F32, 1),
            ElementType::Float2 => scalar_info(ScalarKind::F32, 2),
            ElementType::Float3 => scalar_info(ScalarKind::F32, 3),
            ElementType::Float4 => scalar_info(ScalarKind::F32, 4),
            ElementType::Half2 => scalar_info(ScalarKind::F16, 2),
            ElementType::Half4 => scalar_info(ScalarKind::F16, 4),
            ElementType::Color => scalar_info(ScalarKind::U8, 4),
            ElementType::UShort => scalar_info(ScalarKind::U16, 1),
            ElementType::UInt => scalar_info(ScalarKind::U32, 1),
            ElementType::Dec3N => ElementInfo {
                size: 4,
                components: 3,
                codec: ElementCodec::Dec3N,
            },
        }
    }

    /// Resolve a canonical tag spelling.
    pub fn from_tag(tag: &str) -> Option<ElementType> {
        ElementType::ALL.iter().copied().find(|ty| ty.tag() == tag)
    }
}

const fn scalar_info(kind: ScalarKind, components: usize) -> ElementInfo {
    ElementInfo {
        size: kind.size() * components,
        components,
        codec: ElementCodec::Scalar(kind),
    }
}

/// Registry mapping type tags to element descriptions.
///
/// Starts with the built-in table and is open for extension; lookups of
/// unregistered tags fail with [`CodecError::UnknownElementType`].
#[derive(Debug, Clone)]
pub struct ElementCatalog {
    entries: HashMap<String, ElementInfo>,
}

impl Default for ElementCatalog {
    fn default() -> Self {
        let mut entries = HashMap::with_capacity(ElementType::ALL.len());
        for ty in ElementType::ALL {
            entries.insert(ty.tag().to_string(), ty.info());
        }
        Self { entries }
    }
}

impl ElementCatalog {
    /// Register (or replace) an element type.
    ///
    /// For `Scalar` entries, `size` must equal `components` times the
    /// scalar width.
    pub fn register(&mut self, tag: impl Into<String>, info: ElementInfo) {
        self.entries.insert(tag.into(), info);
    }

    /// Resolve a tag to its element description.
    pub fn resolve(&self, tag: &str) -> CodecResult<ElementInfo> {
        self.entries
            .get(tag)
            .copied()
            .ok_or_else(|| CodecError::UnknownElementType(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sizes() {
        let catalog = ElementCatalog::default();
        for (tag, size, components) in [
            ("Float", 4, 1),
            ("Float2", 8, 2),
            ("Float3", 12, 3),
            ("Float4", 16, 4),
            ("Half2", 4, 2),
            ("Half4", 8, 4),
            ("Color", 4, 4),
            ("UShort", 2, 1),
            ("UInt", 4, 1),
            ("Dec3N", 4, 3),
        ] {
            let info = catalog.resolve(tag).unwrap();
            assert_eq!(info.size, size, "{}", tag);
            assert_eq!(info.components, components, "{}", tag);
        }
    }

    #[test]
    fn test_unknown_tag() {
        let catalog = ElementCatalog::default();
        let err = catalog.resolve("Colour").unwrap_err();
        assert_eq!(err, CodecError::UnknownElementType("Colour".to_string()));
    }

    #[test]
    fn test_tag_roundtrip() {
        for ty in ElementType::ALL {
            assert_eq!(ElementType::from_tag(ty.tag()), Some(ty));
        }
        assert_eq!(ElementType::from_tag("float3"), None);
    }

    #[test]
    fn test_scalar_element_parse_and_format() {
        let info = ElementType::Float2.info();
        let mut bytes = [0u8; 8];
        let mut cursor = LineCursor::new("0.5 -2.25");
        info.codec.parse(info.components, &mut cursor, &mut bytes).unwrap();

        let mut text = String::new();
        info.codec.format(&bytes, NumericFormat::RoundTrip, &mut text);
        assert_eq!(text, "0.5 -2.25");
    }

    #[test]
    fn test_dec3n_element_roundtrip() {
        let info = ElementType::Dec3N.info();
        let mut bytes = [0u8; 4];
        let mut cursor = LineCursor::new("1 -1 0");
        info.codec.parse(info.components, &mut cursor, &mut bytes).unwrap();

        let packed = Dec3N::from_bits(u32::from_ne_bytes(bytes));
        assert!((packed.x() - 1.0).abs() <= 1.0 / 511.0);
        assert!((packed.y() + 1.0).abs() <= 1.0 / 511.0);
        assert_eq!(packed.z(), 0.0);
        assert_eq!(packed.w(), 0.0);
    }

    #[test]
    fn test_register_custom_type() {
        fn parse_byte2(cursor: &mut LineCursor<'_>, out: &mut [u8]) -> Result<(), ElementError> {
            ElementCodec::Scalar(ScalarKind::U8).parse(2, cursor, out)
        }
        fn format_byte2(bytes: &[u8], format: NumericFormat, out: &mut String) {
            ElementCodec::Scalar(ScalarKind::U8).format(bytes, format, out)
        }

        let mut catalog = ElementCatalog::default();
        catalog.register(
            "UByte2",
            ElementInfo {
                size: 2,
                components: 2,
                codec: ElementCodec::Custom {
                    parse: parse_byte2,
                    format: format_byte2,
                },
            },
        );

        let info = catalog.resolve("UByte2").unwrap();
        let mut bytes = [0u8; 2];
        let mut cursor = LineCursor::new("7 200");
        info.codec.parse(info.components, &mut cursor, &mut bytes).unwrap();
        assert_eq!(bytes, [7, 200]);

        let mut text = String::new();
        info.codec.format(&bytes, NumericFormat::default(), &mut text);
        assert_eq!(text, "7 200");
    }
}
