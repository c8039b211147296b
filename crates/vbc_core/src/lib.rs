//! VBC Core - schema-driven vertex/index buffer codec.
//!
//! This crate converts geometry vertex and index data between a
//! human-readable, whitespace-delimited decimal text form and tightly
//! packed, GPU-ready binary buffers. An ordered element schema (position,
//! normal, color, ...) drives both directions:
//!
//! - **Catalog**: [`ElementCatalog`] maps type tags (`Float3`, `Color`,
//!   `Dec3N`, ...) to sizes, component counts, and codecs, and accepts
//!   custom registrations.
//! - **Layout**: [`VertexLayout`] resolves a schema into per-element byte
//!   offsets and the record stride.
//! - **Codecs**: [`VertexParser`]/[`VertexWriter`] move whole records
//!   line by line; [`IndexParser`]/[`IndexWriter`] handle flat index
//!   streams.
//! - **Views**: [`ElementView`]/[`ElementViewMut`] give strided, typed
//!   access to one element across all records for in-place edits.
//!
//! # Example
//!
//! ```
//! use vbc_core::{ElementCatalog, ElementDescriptor, VertexLayout, VertexParser, VertexWriter};
//!
//! let catalog = ElementCatalog::default();
//! let schema = [
//!     ElementDescriptor::new("Position", "Float3"),
//!     ElementDescriptor::new("Color0", "Color"),
//! ];
//! let layout = VertexLayout::compute(&schema, &catalog)?;
//!
//! let mut buffer = vec![0u8; layout.stride() * 2];
//! VertexParser::new(&layout).parse(
//!     &mut buffer,
//!     "0 0 0    255 0 0 255\n\
//!      1 0 0    0 255 0 255\n",
//! )?;
//!
//! let text = VertexWriter::new(&layout).write_to_string(&buffer)?;
//! assert!(text.starts_with("0.0 0.0 0.0    255 0 0 255"));
//! # Ok::<(), vbc_core::CodecError>(())
//! ```

pub mod buffer;
pub mod dec3n;
pub mod element;
pub mod error;
pub mod index;
pub mod layout;
pub mod scalar;
pub mod tokenizer;
pub mod vertex;
pub mod view;

// Re-export commonly used types
pub use buffer::{IndexBuffer, VertexBuffer};
pub use dec3n::Dec3N;
pub use element::{ElementCatalog, ElementCodec, ElementInfo, ElementType, FormatFn, ParseFn};
pub use error::{CodecError, CodecResult, ElementError};
pub use index::{IndexParser, IndexWriteOptions, IndexWriter};
pub use layout::{ElementDescriptor, LayoutElement, VertexLayout};
pub use scalar::{NumericFormat, ScalarKind};
pub use tokenizer::LineCursor;
pub use vertex::{VertexParser, VertexWriter, WriteOptions};
pub use view::{ElementView, ElementViewMut};
