//! Example: Parse the classic textured cube, nudge it, write it back.
//!
//! Run with: cargo run --example cube_roundtrip

use anyhow::Result;
use glam::Vec3;
use vbc_core::{
    ElementCatalog, ElementDescriptor, IndexBuffer, IndexParser, IndexWriter, VertexBuffer,
    VertexLayout, VertexParser, VertexWriter,
};

const VERTICES: &str = "
    -1.5 -1 -0.5    0 0 -1    255 255 255 255    0 0    1 0 0
    1.5 -1 -0.5    0 0 -1    255 255 255 255    1 0    1 0 0
    -1.5 1 -0.5    0 0 -1    255 255 255 255    0 1    1 0 0
    1.5 1 -0.5    0 0 -1    255 255 255 255    1 1    1 0 0
    -1.5 -1 0.5    0 0 1    255 255 255 255    1 0    1 0 0
    1.5 -1 0.5    0 0 1    255 255 255 255    0 0    1 0 0
    -1.5 1 0.5    0 0 1    255 255 255 255    1 1    1 0 0
    1.5 1 0.5    0 0 1    255 255 255 255    0 1    1 0 0
    -1.5 -1 -0.5    0 -1 0    255 255 255 255    0 1    1 0 0
    1.5 -1 -0.5    0 -1 0    255 255 255 255    1 1    1 0 0
    -1.5 -1 0.5    0 -1 0    255 255 255 255    0 0    1 0 0
    1.5 -1 0.5    0 -1 0    255 255 255 255    1 0    1 0 0
    -1.5 1 -0.5    0 1 0    255 255 255 255    1 1    1 0 0
    1.5 1 -0.5    0 1 0    255 255 255 255    0 1    1 0 0
    -1.5 1 0.5    0 1 0    255 255 255 255    1 0    1 0 0
    1.5 1 0.5    0 1 0    255 255 255 255    0 0    1 0 0
    -1.5 -1 -0.5    -1 0 0    255 255 255 255    0 0    0 1 0
    -1.5 1 -0.5    -1 0 0    255 255 255 255    1 0    0 1 0
    -1.5 -1 0.5    -1 0 0    255 255 255 255    0 1    0 1 0
    -1.5 1 0.5    -1 0 0    255 255 255 255    1 1    0 1 0
    1.5 -1 -0.5    1 0 0    255 255 255 255    0 1    0 1 0
    1.5 1 -0.5    1 0 0    255 255 255 255    1 1    0 1 0
    1.5 -1 0.5    1 0 0    255 255 255 255    0 0    0 1 0
    1.5 1 0.5    1 0 0    255 255 255 255    1 0    0 1 0
";

const INDICES: &str = "
    0 2 1 1 2 3 4 5 6 5
    7 6 8 9 10 9 11 10 12 14
    13 13 14 15 16 18 17 17 18 19
    20 21 22 21 23 22
";

fn main() -> Result<()> {
    env_logger::init();

    let catalog = ElementCatalog::default();
    let schema = [
        ElementDescriptor::new("Position", "Float3"),
        ElementDescriptor::new("Normals", "Float3"),
        ElementDescriptor::new("Color0", "Color"),
        ElementDescriptor::new("Texcoords0", "Float2"),
        ElementDescriptor::new("Tangents", "Float3"),
    ];
    let layout = VertexLayout::compute(&schema, &catalog)?;
    println!("Vertex stride: {} bytes", layout.stride());

    // Parse the cube
    let mut vertices = VertexBuffer::new(layout.clone(), 24);
    VertexParser::new(&layout).parse(vertices.bytes_mut(), VERTICES)?;

    let index_descriptor = ElementDescriptor::new("Index", "UShort");
    let mut indices = IndexBuffer::new(&index_descriptor, &catalog, 36)?;
    IndexParser::new(&index_descriptor, &catalog)?.parse(indices.bytes_mut(), INDICES)?;
    println!(
        "Parsed {} vertices, {} indices ({} triangles)",
        vertices.count(),
        indices.count(),
        indices.count() / 3
    );

    // Nudge the cube +10 on X and repaint it through strided views
    {
        let mut positions = vertices.element_view_mut::<Vec3>("Position")?;
        positions.update_all(|p| p + Vec3::new(10.0, 0.0, 0.0));

        let mut colors = vertices.element_view_mut::<[u8; 4]>("Color0")?;
        colors.update_all(|_| [33, 66, 99, 127]);
    }

    println!("\n--- Positions after translate ---");
    for (i, position) in vertices.element_view::<Vec3>("Position")?.iter().enumerate() {
        println!("  {:2}: ({:.1}, {:.1}, {:.1})", i, position.x, position.y, position.z);
    }

    // Write both buffers back to text
    let vertex_text = VertexWriter::new(&layout).write_to_string(vertices.bytes())?;
    let index_text = IndexWriter::new(&index_descriptor, &catalog)?.write_to_string(indices.bytes())?;

    println!("\n--- Vertices ---\n{}", vertex_text);
    println!("\n--- Indices ---\n{}", index_text);

    Ok(())
}
