//! Line-oriented vertex record parsing and writing.

use crate::error::{CodecError, CodecResult};
use crate::layout::VertexLayout;
use crate::scalar::NumericFormat;
use crate::tokenizer::LineCursor;

/// Parses whitespace-delimited vertex text into a packed binary buffer.
///
/// One non-blank line holds one record; within a line, tokens appear in
/// schema order, grouped per element, separated by any run of whitespace.
/// Blank lines anywhere in the text are skipped. The destination buffer is
/// filled in place and never reallocated.
///
/// A finalized parser is immutable and can be shared across threads
/// working on disjoint buffers.
#[derive(Debug, Clone)]
pub struct VertexParser<'a> {
    layout: &'a VertexLayout,
}

impl<'a> VertexParser<'a> {
    pub fn new(layout: &'a VertexLayout) -> Self {
        Self { layout }
    }

    /// Parse `text` into `buffer`.
    ///
    /// `buffer.len()` must be a multiple of the layout stride, and the
    /// number of non-blank lines must equal `buffer.len() / stride`. On
    /// failure the record being parsed may be left partially written;
    /// earlier records are intact.
    pub fn parse(&self, buffer: &mut [u8], text: &str) -> CodecResult<()> {
        let stride = self.layout.stride();
        if stride == 0 {
            // Degenerate empty schema: only blank text fits an empty buffer.
            let found = data_line_count(text);
            if !buffer.is_empty() {
                return Err(CodecError::UnalignedBuffer {
                    len: buffer.len(),
                    unit: 0,
                });
            }
            if found != 0 {
                return Err(CodecError::BufferSizeMismatch { expected: 0, found });
            }
            return Ok(());
        }
        if buffer.len() % stride != 0 {
            return Err(CodecError::UnalignedBuffer {
                len: buffer.len(),
                unit: stride,
            });
        }

        let expected = buffer.len() / stride;
        let mut records = 0;
        let mut extra = 0;

        for (line_index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if records == expected {
                // Keep counting so the mismatch report names the full total.
                extra += 1;
                continue;
            }

            let slot = &mut buffer[records * stride..(records + 1) * stride];
            self.parse_record(slot, line, line_index + 1)?;
            records += 1;
        }

        if records != expected || extra > 0 {
            return Err(CodecError::BufferSizeMismatch {
                expected,
                found: records + extra,
            });
        }
        Ok(())
    }

    fn parse_record(&self, record: &mut [u8], line: &str, line_number: usize) -> CodecResult<()> {
        let mut cursor = LineCursor::new(line);

        for element in self.layout.elements() {
            let out = &mut record[element.offset..element.offset + element.info.size];
            element
                .info
                .codec
                .parse(element.info.components, &mut cursor, out)
                .map_err(|source| CodecError::Element {
                    line: line_number,
                    element: element.name.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}

fn data_line_count(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Formatting options for [`VertexWriter`].
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Separator between elements on one line. Default: four spaces.
    pub element_separator: String,
    /// Separator between records. Default: CRLF.
    pub record_separator: String,
    /// Floating-point rendering. Default: one decimal digit.
    pub numeric_format: NumericFormat,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            element_separator: "    ".to_string(),
            record_separator: "\r\n".to_string(),
            numeric_format: NumericFormat::default(),
        }
    }
}

/// Writes a packed vertex buffer back to whitespace-delimited text.
///
/// Components within an element are joined by one space, elements by the
/// element separator, records by the record separator; no leading or
/// trailing separators are emitted.
#[derive(Debug, Clone)]
pub struct VertexWriter<'a> {
    layout: &'a VertexLayout,
    options: WriteOptions,
}

impl<'a> VertexWriter<'a> {
    pub fn new(layout: &'a VertexLayout) -> Self {
        Self {
            layout,
            options: WriteOptions::default(),
        }
    }

    pub fn with_options(layout: &'a VertexLayout, options: WriteOptions) -> Self {
        Self { layout, options }
    }

    /// Append the text form of `buffer` to `out`.
    pub fn write(&self, buffer: &[u8], out: &mut String) -> CodecResult<()> {
        let stride = self.layout.stride();
        if stride == 0 {
            if buffer.is_empty() {
                return Ok(());
            }
            return Err(CodecError::UnalignedBuffer {
                len: buffer.len(),
                unit: 0,
            });
        }
        if buffer.len() % stride != 0 {
            return Err(CodecError::UnalignedBuffer {
                len: buffer.len(),
                unit: stride,
            });
        }

        for (i, record) in buffer.chunks_exact(stride).enumerate() {
            if i > 0 {
                out.push_str(&self.options.record_separator);
            }
            self.write_record(record, out);
        }
        Ok(())
    }

    /// Write into a fresh `String`.
    pub fn write_to_string(&self, buffer: &[u8]) -> CodecResult<String> {
        let mut out = String::new();
        self.write(buffer, &mut out)?;
        Ok(out)
    }

    fn write_record(&self, record: &[u8], out: &mut String) {
        for (i, element) in self.layout.elements().iter().enumerate() {
            if i > 0 {
                out.push_str(&self.options.element_separator);
            }
            let bytes = &record[element.offset..element.offset + element.info.size];
            element
                .info
                .codec
                .format(bytes, self.options.numeric_format, out);
        }
    }
}
