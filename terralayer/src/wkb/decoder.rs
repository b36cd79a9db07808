//! WKB geometry decoder
//!
//! Decodes the OGC Well-Known Binary representation into [`Geometry`]
//! values. Every geometry, nested children included, leads with its own
//! byte-order flag; the decoder threads a single cursor through the whole
//! buffer in one forward pass and never backtracks.
//!
//! Only the seven two-dimensional core types are supported. EWKB type
//! codes (SRID, Z and M flag bits) fall outside the core 1-7 range and
//! are rejected as unrecognized, which keeps the extension formats out of
//! scope without a separate detection pass.

use super::cursor::{ByteCursor, ByteOrder};
use super::error::WkbError;
use super::types::{Geometry, Polygon, Ring, Vertex};

/// Wire size of one 2D vertex (two IEEE doubles).
const VERTEX_WIRE_SIZE: usize = 16;

/// Minimum wire size of a nested geometry (flag byte plus type code).
const CHILD_HEADER_SIZE: usize = 5;

/// Decodes one WKB geometry from the front of `buffer`.
///
/// Trailing bytes after the encoded geometry are ignored. Any structural
/// problem aborts the whole decode with a [`WkbError`]; no partial
/// geometry is ever returned.
pub fn decode(buffer: &[u8]) -> Result<Geometry, WkbError> {
    let mut cursor = ByteCursor::new(buffer);
    decode_geometry(&mut cursor)
}

fn decode_geometry(cursor: &mut ByteCursor<'_>) -> Result<Geometry, WkbError> {
    let order = ByteOrder::from_flag(cursor.read_u8()?)?;
    let code = cursor.read_u32(order)?;

    // OGC 2D core type codes
    match code {
        1 => Ok(Geometry::Point(decode_point(cursor, order)?)),
        2 => Ok(Geometry::LineString(decode_ring(cursor, order)?)),
        3 => Ok(Geometry::Polygon(decode_polygon(cursor, order)?)),
        4 => Ok(Geometry::MultiPoint(decode_multi(
            cursor,
            order,
            "Point",
            |child| match child {
                Geometry::Point(ring) => Ok(ring),
                other => Err(other.kind_name()),
            },
        )?)),
        5 => Ok(Geometry::MultiLineString(decode_multi(
            cursor,
            order,
            "LineString",
            |child| match child {
                Geometry::LineString(ring) => Ok(ring),
                other => Err(other.kind_name()),
            },
        )?)),
        6 => Ok(Geometry::MultiPolygon(decode_multi(
            cursor,
            order,
            "Polygon",
            |child| match child {
                Geometry::Polygon(polygon) => Ok(polygon),
                other => Err(other.kind_name()),
            },
        )?)),
        7 => Ok(Geometry::Collection(decode_collection(cursor, order)?)),
        code => Err(WkbError::UnrecognizedType { code }),
    }
}

fn decode_vertex(cursor: &mut ByteCursor<'_>, order: ByteOrder) -> Result<Vertex, WkbError> {
    let x = cursor.read_f64(order)?;
    let y = cursor.read_f64(order)?;
    Ok(Vertex { x, y })
}

fn decode_point(cursor: &mut ByteCursor<'_>, order: ByteOrder) -> Result<Ring, WkbError> {
    Ok(Ring::new(vec![decode_vertex(cursor, order)?]))
}

fn decode_ring(cursor: &mut ByteCursor<'_>, order: ByteOrder) -> Result<Ring, WkbError> {
    let count = cursor.read_u32(order)? as usize;
    // Clamp preallocation; a corrupt count hits Truncated on the first
    // missing vertex rather than ballooning the allocation up front.
    let mut vertices = Vec::with_capacity(count.min(cursor.remaining() / VERTEX_WIRE_SIZE));
    for _ in 0..count {
        vertices.push(decode_vertex(cursor, order)?);
    }
    Ok(Ring::new(vertices))
}

fn decode_polygon(cursor: &mut ByteCursor<'_>, order: ByteOrder) -> Result<Polygon, WkbError> {
    let offset = cursor.offset();
    let ring_count = cursor.read_u32(order)? as usize;
    if ring_count == 0 {
        return Err(WkbError::EmptyPolygon { offset });
    }

    // First ring is the outer boundary, the rest are holes. Interior
    // rings reuse the polygon's byte order; they carry no header.
    let outer = decode_ring(cursor, order)?;
    let mut holes = Vec::with_capacity((ring_count - 1).min(cursor.remaining() / 4));
    for _ in 1..ring_count {
        holes.push(decode_ring(cursor, order)?);
    }
    Ok(Polygon { outer, holes })
}

fn decode_multi<T>(
    cursor: &mut ByteCursor<'_>,
    order: ByteOrder,
    expected: &'static str,
    extract: impl Fn(Geometry) -> Result<T, &'static str>,
) -> Result<Vec<T>, WkbError> {
    let count = cursor.read_u32(order)? as usize;
    let mut children = Vec::with_capacity(count.min(cursor.remaining() / CHILD_HEADER_SIZE));
    for _ in 0..count {
        // Children are complete geometries with their own byte-order flag
        let child = decode_geometry(cursor)?;
        match extract(child) {
            Ok(child) => children.push(child),
            Err(found) => return Err(WkbError::UnexpectedChild { expected, found }),
        }
    }
    Ok(children)
}

fn decode_collection(
    cursor: &mut ByteCursor<'_>,
    order: ByteOrder,
) -> Result<Vec<Geometry>, WkbError> {
    let count = cursor.read_u32(order)? as usize;
    let mut children = Vec::with_capacity(count.min(cursor.remaining() / CHILD_HEADER_SIZE));
    for _ in 0..count {
        children.push(decode_geometry(cursor)?);
    }
    Ok(children)
}
