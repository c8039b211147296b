//! Schema descriptors and record byte-layout planning.

use serde::{Deserialize, Serialize};

use crate::element::{ElementCatalog, ElementInfo};
use crate::error::{CodecError, CodecResult};

/// One schema entry: a semantic name plus an element type tag.
///
/// Schemas come from an external loader, typically deserialized from a
/// form like `{ "name": "Position", "type": "Float3" }`. Byte offsets and
/// sizes are not stored here; they are computed into a [`VertexLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    /// Semantic identifier (e.g. `Position`, `Normals`, `Color0`).
    pub name: String,
    /// Element type tag, resolved through the catalog.
    #[serde(rename = "type")]
    pub type_tag: String,
}

impl ElementDescriptor {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
        }
    }
}

/// One element of a finalized layout.
#[derive(Debug, Clone)]
pub struct LayoutElement {
    pub name: String,
    pub type_tag: String,
    pub info: ElementInfo,
    /// Byte offset of this element within one record.
    pub offset: usize,
}

impl LayoutElement {
    /// Packed byte size of this element.
    pub fn size(&self) -> usize {
        self.info.size
    }
}

/// Finalized byte layout of one vertex record.
///
/// Offsets run contiguously in schema order with no gaps or overlaps, and
/// the stride is the sum of all element sizes. A layout is immutable once
/// computed, so its offsets cannot go stale against the schema that
/// produced it; recomputing from a changed schema yields a new layout.
#[derive(Debug, Clone)]
pub struct VertexLayout {
    elements: Vec<LayoutElement>,
    stride: usize,
}

impl VertexLayout {
    /// Resolve a schema against the catalog, assigning each element its
    /// byte offset and the record its stride.
    pub fn compute(schema: &[ElementDescriptor], catalog: &ElementCatalog) -> CodecResult<Self> {
        let mut elements = Vec::with_capacity(schema.len());
        let mut offset = 0;

        for descriptor in schema {
            let info = catalog.resolve(&descriptor.type_tag)?;
            elements.push(LayoutElement {
                name: descriptor.name.clone(),
                type_tag: descriptor.type_tag.clone(),
                info,
                offset,
            });
            offset += info.size;
        }

        log::debug!(
            "planned vertex layout: {} elements, stride {} bytes",
            elements.len(),
            offset
        );

        Ok(Self {
            elements,
            stride: offset,
        })
    }

    /// Total byte size of one record.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The planned elements in schema order.
    pub fn elements(&self) -> &[LayoutElement] {
        &self.elements
    }

    /// Look up an element by semantic name.
    pub fn find(&self, name: &str) -> Option<&LayoutElement> {
        self.elements.iter().find(|element| element.name == name)
    }

    pub(crate) fn require(&self, name: &str) -> CodecResult<&LayoutElement> {
        self.find(name)
            .ok_or_else(|| CodecError::ElementNotFound(name.to_string()))
    }
}
