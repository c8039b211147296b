//! Strided, typed access to one element across all records.
//!
//! Views address element bytes as `offset + index * stride` with
//! bounds-checked indexing; values are copied in and out through unaligned
//! plain-old-data reads, never as references into the byte buffer, so the
//! buffer's allocation alignment does not matter.

use std::marker::PhantomData;
use std::mem;

use bytemuck::Pod;

use crate::error::{CodecError, CodecResult};
use crate::layout::VertexLayout;

fn locate<T: Pod>(layout: &VertexLayout, name: &str, len: usize) -> CodecResult<(usize, usize, usize)> {
    let element = layout.require(name)?;

    if mem::size_of::<T>() != element.info.size {
        return Err(CodecError::TypeSizeMismatch {
            element: name.to_string(),
            requested: mem::size_of::<T>(),
            stored: element.info.size,
        });
    }

    let stride = layout.stride();
    if stride == 0 || len % stride != 0 {
        return Err(CodecError::UnalignedBuffer { len, unit: stride });
    }
    Ok((element.offset, stride, len / stride))
}

/// Read-only strided view of one element across all records.
#[derive(Debug)]
pub struct ElementView<'a, T: Pod> {
    bytes: &'a [u8],
    offset: usize,
    stride: usize,
    count: usize,
    _marker: PhantomData<T>,
}

impl<'a, T: Pod> ElementView<'a, T> {
    /// Build a view over `bytes` for the named element.
    ///
    /// `T`'s size must equal the element's stored size, and `bytes` must be
    /// a whole number of records.
    pub fn new(layout: &VertexLayout, name: &str, bytes: &'a [u8]) -> CodecResult<Self> {
        let (offset, stride, count) = locate::<T>(layout, name, bytes.len())?;
        Ok(Self {
            bytes,
            offset,
            stride,
            count,
            _marker: PhantomData,
        })
    }

    /// Number of records visible through the view.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Decode the element value of record `index`.
    pub fn get(&self, index: usize) -> CodecResult<T> {
        let start = self.slot(index)?;
        Ok(bytemuck::pod_read_unaligned(
            &self.bytes[start..start + mem::size_of::<T>()],
        ))
    }

    /// All record values in order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.count).map(move |index| {
            let start = self.offset + index * self.stride;
            bytemuck::pod_read_unaligned(&self.bytes[start..start + mem::size_of::<T>()])
        })
    }

    fn slot(&self, index: usize) -> CodecResult<usize> {
        if index >= self.count {
            return Err(CodecError::OutOfBounds {
                index,
                count: self.count,
            });
        }
        Ok(self.offset + index * self.stride)
    }
}

/// Mutable strided view of one element across all records.
pub struct ElementViewMut<'a, T: Pod> {
    bytes: &'a mut [u8],
    offset: usize,
    stride: usize,
    count: usize,
    _marker: PhantomData<T>,
}

impl<'a, T: Pod> ElementViewMut<'a, T> {
    pub fn new(layout: &VertexLayout, name: &str, bytes: &'a mut [u8]) -> CodecResult<Self> {
        let (offset, stride, count) = locate::<T>(layout, name, bytes.len())?;
        Ok(Self {
            bytes,
            offset,
            stride,
            count,
            _marker: PhantomData,
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Decode the element value of record `index`.
    pub fn get(&self, index: usize) -> CodecResult<T> {
        let start = self.slot(index)?;
        Ok(bytemuck::pod_read_unaligned(
            &self.bytes[start..start + mem::size_of::<T>()],
        ))
    }

    /// Overwrite the element value of record `index`.
    pub fn set(&mut self, index: usize, value: T) -> CodecResult<()> {
        let start = self.slot(index)?;
        self.bytes[start..start + mem::size_of::<T>()].copy_from_slice(bytemuck::bytes_of(&value));
        Ok(())
    }

    /// Apply `f` to every record's value in place.
    pub fn update_all(&mut self, mut f: impl FnMut(T) -> T) {
        let size = mem::size_of::<T>();
        for index in 0..self.count {
            let start = self.offset + index * self.stride;
            let value: T = bytemuck::pod_read_unaligned(&self.bytes[start..start + size]);
            let value = f(value);
            self.bytes[start..start + size].copy_from_slice(bytemuck::bytes_of(&value));
        }
    }

    fn slot(&self, index: usize) -> CodecResult<usize> {
        if index >= self.count {
            return Err(CodecError::OutOfBounds {
                index,
                count: self.count,
            });
        }
        Ok(self.offset + index * self.stride)
    }
}
