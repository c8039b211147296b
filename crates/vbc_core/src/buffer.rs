//! Owning containers pairing raw bytes with their layout.
//!
//! The containers own the allocations and enforce the sizing invariants
//! (`bytes.len() == stride * count` for vertices, `size * count` for
//! indices); codec calls only fill or read the bytes in place.

use bytemuck::Pod;

use crate::element::ElementCatalog;
use crate::error::{CodecError, CodecResult};
use crate::layout::{ElementDescriptor, VertexLayout};
use crate::view::{ElementView, ElementViewMut};

/// A vertex buffer: finalized layout, packed bytes, record count.
#[derive(Debug, Clone)]
pub struct VertexBuffer {
    layout: VertexLayout,
    data: Vec<u8>,
    count: usize,
}

impl VertexBuffer {
    /// Allocate a zeroed buffer for `count` records.
    pub fn new(layout: VertexLayout, count: usize) -> Self {
        let data = vec![0u8; layout.stride() * count];
        Self { layout, data, count }
    }

    /// Wrap existing bytes; the length must be a whole number of records.
    pub fn from_bytes(layout: VertexLayout, data: Vec<u8>) -> CodecResult<Self> {
        let stride = layout.stride();
        if stride == 0 {
            if data.is_empty() {
                return Ok(Self { layout, data, count: 0 });
            }
            return Err(CodecError::UnalignedBuffer {
                len: data.len(),
                unit: 0,
            });
        }
        if data.len() % stride != 0 {
            return Err(CodecError::UnalignedBuffer {
                len: data.len(),
                unit: stride,
            });
        }
        let count = data.len() / stride;
        Ok(Self { layout, data, count })
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Number of records.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Typed read-only view of one element across all records.
    pub fn element_view<T: Pod>(&self, name: &str) -> CodecResult<ElementView<'_, T>> {
        ElementView::new(&self.layout, name, &self.data)
    }

    /// Typed mutable view of one element across all records.
    pub fn element_view_mut<T: Pod>(&mut self, name: &str) -> CodecResult<ElementViewMut<'_, T>> {
        ElementViewMut::new(&self.layout, name, &mut self.data)
    }
}

/// An index buffer: one scalar element type, packed bytes, index count.
#[derive(Debug, Clone)]
pub struct IndexBuffer {
    descriptor: ElementDescriptor,
    element_size: usize,
    data: Vec<u8>,
    count: usize,
}

impl IndexBuffer {
    /// Allocate a zeroed buffer for `count` indices.
    ///
    /// The descriptor's tag must resolve to a single-component scalar type.
    pub fn new(
        descriptor: &ElementDescriptor,
        catalog: &ElementCatalog,
        count: usize,
    ) -> CodecResult<Self> {
        let kind = crate::index::resolve_index_kind(descriptor, catalog)?;
        Ok(Self {
            descriptor: descriptor.clone(),
            element_size: kind.size(),
            data: vec![0u8; kind.size() * count],
            count,
        })
    }

    pub fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    /// Byte size of one index.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Number of indices.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Decode all indices into a `Vec<T>`.
    pub fn values<T: Pod>(&self) -> CodecResult<Vec<T>> {
        if std::mem::size_of::<T>() != self.element_size {
            return Err(CodecError::TypeSizeMismatch {
                element: self.descriptor.name.clone(),
                requested: std::mem::size_of::<T>(),
                stored: self.element_size,
            });
        }
        Ok(self
            .data
            .chunks_exact(self.element_size)
            .map(bytemuck::pod_read_unaligned)
            .collect())
    }
}
