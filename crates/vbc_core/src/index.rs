//! Index stream parsing and writing.
//!
//! Parsing treats the whole text as one flat whitespace-delimited token
//! stream: line breaks are ordinary separators, not record boundaries.
//! Writing imposes line structure, wrapping a fixed number of indices per
//! line. The asymmetry is deliberate — hand-edited input wraps wherever it
//! likes, output stays diffable.

use crate::element::{ElementCatalog, ElementCodec};
use crate::error::{CodecError, CodecResult};
use crate::layout::ElementDescriptor;
use crate::scalar::{NumericFormat, ScalarKind};
use crate::tokenizer::LineCursor;

pub(crate) fn resolve_index_kind(
    descriptor: &ElementDescriptor,
    catalog: &ElementCatalog,
) -> CodecResult<ScalarKind> {
    let info = catalog.resolve(&descriptor.type_tag)?;
    match info.codec {
        ElementCodec::Scalar(kind) if info.components == 1 => Ok(kind),
        _ => Err(CodecError::UnsupportedIndexType(descriptor.type_tag.clone())),
    }
}

/// 1-based line of the byte at `pos`, for error reporting.
fn line_of(text: &str, pos: usize) -> usize {
    text[..pos].bytes().filter(|&b| b == b'\n').count() + 1
}

/// Parses a flat index token stream into a packed binary buffer.
#[derive(Debug, Clone)]
pub struct IndexParser {
    name: String,
    kind: ScalarKind,
}

impl IndexParser {
    /// The descriptor's tag must resolve to a single-component scalar type.
    pub fn new(descriptor: &ElementDescriptor, catalog: &ElementCatalog) -> CodecResult<Self> {
        Ok(Self {
            name: descriptor.name.clone(),
            kind: resolve_index_kind(descriptor, catalog)?,
        })
    }

    /// Parse `text` into `buffer`.
    ///
    /// The text must hold exactly `buffer.len() / size` tokens; line breaks
    /// carry no meaning on input.
    pub fn parse(&self, buffer: &mut [u8], text: &str) -> CodecResult<()> {
        let size = self.kind.size();
        if buffer.len() % size != 0 {
            return Err(CodecError::UnalignedBuffer {
                len: buffer.len(),
                unit: size,
            });
        }

        let expected = buffer.len() / size;
        let mut cursor = LineCursor::new(text);

        for i in 0..expected {
            let token = match cursor.next_token() {
                Some(token) => token,
                None => {
                    return Err(CodecError::BufferSizeMismatch { expected, found: i });
                }
            };
            self.kind
                .parse(token, &mut buffer[i * size..(i + 1) * size])
                .map_err(|source| CodecError::Element {
                    line: line_of(text, cursor.position()),
                    element: self.name.clone(),
                    source,
                })?;
        }

        let mut found = expected;
        while cursor.next_token().is_some() {
            found += 1;
        }
        if found != expected {
            return Err(CodecError::BufferSizeMismatch { expected, found });
        }
        Ok(())
    }
}

/// Formatting options for [`IndexWriter`].
#[derive(Debug, Clone)]
pub struct IndexWriteOptions {
    /// Indices per output line. Default: 10.
    pub per_line: usize,
    /// Separator between indices within a line. Default: one space.
    pub separator: String,
    /// Line break between full groups. Default: CRLF.
    pub line_separator: String,
}

impl Default for IndexWriteOptions {
    fn default() -> Self {
        Self {
            per_line: 10,
            separator: " ".to_string(),
            line_separator: "\r\n".to_string(),
        }
    }
}

/// Writes a packed index buffer as text wrapped at a fixed group size.
#[derive(Debug, Clone)]
pub struct IndexWriter {
    kind: ScalarKind,
    options: IndexWriteOptions,
}

impl IndexWriter {
    pub fn new(descriptor: &ElementDescriptor, catalog: &ElementCatalog) -> CodecResult<Self> {
        Ok(Self {
            kind: resolve_index_kind(descriptor, catalog)?,
            options: IndexWriteOptions::default(),
        })
    }

    pub fn with_options(
        descriptor: &ElementDescriptor,
        catalog: &ElementCatalog,
        options: IndexWriteOptions,
    ) -> CodecResult<Self> {
        Ok(Self {
            kind: resolve_index_kind(descriptor, catalog)?,
            options,
        })
    }

    /// Append the text form of `buffer` to `out`.
    pub fn write(&self, buffer: &[u8], out: &mut String) -> CodecResult<()> {
        let size = self.kind.size();
        if buffer.len() % size != 0 {
            return Err(CodecError::UnalignedBuffer {
                len: buffer.len(),
                unit: size,
            });
        }

        let per_line = self.options.per_line.max(1);
        for (i, chunk) in buffer.chunks_exact(size).enumerate() {
            if i > 0 {
                if i % per_line == 0 {
                    out.push_str(&self.options.line_separator);
                } else {
                    out.push_str(&self.options.separator);
                }
            }
            self.kind.format(chunk, NumericFormat::RoundTrip, out);
        }
        Ok(())
    }

    /// Write into a fresh `String`.
    pub fn write_to_string(&self, buffer: &[u8]) -> CodecResult<String> {
        let mut out = String::new();
        self.write(buffer, &mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ElementError;

    fn ushort_index() -> ElementDescriptor {
        ElementDescriptor::new("Index", "UShort")
    }

    fn parse_ushorts(text: &str, count: usize) -> CodecResult<Vec<u16>> {
        let catalog = ElementCatalog::default();
        let mut buffer = vec![0u8; 2 * count];
        IndexParser::new(&ushort_index(), &catalog)?.parse(&mut buffer, text)?;
        Ok(buffer
            .chunks_exact(2)
            .map(|chunk| u16::from_ne_bytes([chunk[0], chunk[1]]))
            .collect())
    }

    #[test]
    fn test_parse_ignores_line_structure() {
        // 2 + 3 + 1 tokens over three lines is one stream of six
        let values = parse_ushorts("0 2\n1 1 2\r\n3\n", 6).unwrap();
        assert_eq!(values, vec![0, 2, 1, 1, 2, 3]);
    }

    #[test]
    fn test_parse_too_few_tokens() {
        let err = parse_ushorts("0 1 2", 6).unwrap_err();
        assert_eq!(err, CodecError::BufferSizeMismatch { expected: 6, found: 3 });
    }

    #[test]
    fn test_parse_too_many_tokens() {
        let err = parse_ushorts("0 1 2 3", 3).unwrap_err();
        assert_eq!(err, CodecError::BufferSizeMismatch { expected: 3, found: 4 });
    }

    #[test]
    fn test_parse_reports_line_of_bad_token() {
        let err = parse_ushorts("0 1 2\n3 oops 5\n", 6).unwrap_err();
        assert_eq!(
            err,
            CodecError::Element {
                line: 2,
                element: "Index".to_string(),
                source: ElementError::NumberFormat {
                    token: "oops".to_string(),
                    target: "u16",
                },
            }
        );
    }

    #[test]
    fn test_compound_types_rejected() {
        let catalog = ElementCatalog::default();
        for tag in ["Float3", "Color", "Dec3N", "Half2"] {
            let descriptor = ElementDescriptor::new("Index", tag);
            let err = IndexParser::new(&descriptor, &catalog).unwrap_err();
            assert_eq!(err, CodecError::UnsupportedIndexType(tag.to_string()));
        }
    }

    #[test]
    fn test_write_wraps_at_ten() {
        let catalog = ElementCatalog::default();
        let values: Vec<u16> = (0..23).collect();
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();

        let text = IndexWriter::new(&ushort_index(), &catalog)
            .unwrap()
            .write_to_string(&bytes)
            .unwrap();

        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "0 1 2 3 4 5 6 7 8 9");
        assert_eq!(lines[1], "10 11 12 13 14 15 16 17 18 19");
        assert_eq!(lines[2], "20 21 22");
    }

    #[test]
    fn test_write_custom_wrap() {
        let catalog = ElementCatalog::default();
        let values: Vec<u16> = (0..5).collect();
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();

        let options = IndexWriteOptions {
            per_line: 2,
            separator: ", ".to_string(),
            line_separator: "\n".to_string(),
        };
        let text = IndexWriter::with_options(&ushort_index(), &catalog, options)
            .unwrap()
            .write_to_string(&bytes)
            .unwrap();
        assert_eq!(text, "0, 1\n2, 3\n4");
    }

    #[test]
    fn test_roundtrip() {
        let catalog = ElementCatalog::default();
        let descriptor = ElementDescriptor::new("Index", "UInt");
        let values: Vec<u32> = (0..36).map(|i| i * 7).collect();
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();

        let text = IndexWriter::new(&descriptor, &catalog)
            .unwrap()
            .write_to_string(&bytes)
            .unwrap();

        let mut reparsed = vec![0u8; bytes.len()];
        IndexParser::new(&descriptor, &catalog)
            .unwrap()
            .parse(&mut reparsed, &text)
            .unwrap();
        assert_eq!(bytes, reparsed);
    }
}
