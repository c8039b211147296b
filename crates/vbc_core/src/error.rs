//! Error types for codec operations.
//!
//! Failures come in two granularities: [`ElementError`] is produced while
//! converting a single element between tokens and bytes and knows nothing
//! about its surroundings; [`CodecError`] is what parse/write/view calls
//! return, wrapping element failures with the line and element they occurred
//! in. All errors are fail-fast: a parse that errors mid-record may leave
//! that record partially written, and callers decide whether to retry the
//! whole call or discard the buffer.

use thiserror::Error;

/// A failure converting one element between text tokens and packed bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElementError {
    /// The token stream ended before the element's components were read.
    #[error("expected {requested} tokens, found {found} (column {column})")]
    InsufficientTokens {
        requested: usize,
        found: usize,
        /// Byte position where scanning stopped.
        column: usize,
    },

    /// A token is not a valid literal for the target type. Malformed
    /// numbers are reported, never coerced to zero.
    #[error("cannot parse '{token}' as {target}")]
    NumberFormat { token: String, target: &'static str },
}

/// Errors reported by parse, write, and view calls.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// A type tag with no catalog entry.
    #[error("unknown element type tag '{0}'")]
    UnknownElementType(String),

    /// An element-level failure, tagged with the 1-based text line and the
    /// name of the element being converted when it happened.
    #[error("line {line}, element '{element}': {source}")]
    Element {
        line: usize,
        element: String,
        #[source]
        source: ElementError,
    },

    /// The record count implied by the buffer does not match the text.
    #[error("buffer is sized for {expected} records, text contains {found}")]
    BufferSizeMismatch { expected: usize, found: usize },

    /// The buffer length is not a whole number of records/elements.
    #[error("buffer length {len} is not a multiple of {unit} bytes")]
    UnalignedBuffer { len: usize, unit: usize },

    /// No element with the requested name exists in the layout.
    #[error("element '{0}' not found in layout")]
    ElementNotFound(String),

    /// The requested value type's size disagrees with the stored element.
    #[error("element '{element}' stores {stored} bytes, requested type is {requested} bytes")]
    TypeSizeMismatch {
        element: String,
        requested: usize,
        stored: usize,
    },

    /// A record index past the end of the view.
    #[error("record index {index} out of bounds for {count} records")]
    OutOfBounds { index: usize, count: usize },

    /// An element type that cannot carry index data (must be a
    /// single-component scalar).
    #[error("type '{0}' cannot be used for index data")]
    UnsupportedIndexType(String),
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
