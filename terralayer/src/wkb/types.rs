//! Decoded geometry model
//!
//! The WKB type-code hierarchy maps onto a single tagged union,
//! [`Geometry`], matched at decode time. Coordinates are carried through
//! untouched; the decoder does not know or care whether they are degrees
//! or projected meters.

/// A single 2D coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Vertex { x, y }
    }
}

/// An ordered vertex sequence: a linestring, or one boundary of a polygon.
///
/// Construction removes immediately adjacent duplicate vertices. A closed
/// ring's final vertex equals its first, but those are not adjacent, so
/// closure survives. Rings with fewer than two distinct vertices are kept
/// as-is; callers that cannot use degenerate geometry reject it themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    vertices: Vec<Vertex>,
}

impl Ring {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        let mut kept: Vec<Vertex> = Vec::with_capacity(vertices.len());
        for vertex in vertices {
            if kept.last() != Some(&vertex) {
                kept.push(vertex);
            }
        }
        Ring { vertices: kept }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

/// A filled area: one outer boundary plus zero or more holes.
///
/// The outer ring is a required field, so a polygon with no rings cannot
/// be represented.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(outer: Ring, holes: Vec<Ring>) -> Self {
        Polygon { outer, holes }
    }

    /// Total ring count, outer boundary included.
    pub fn ring_count(&self) -> usize {
        1 + self.holes.len()
    }
}

/// A decoded WKB geometry.
///
/// `Point` carries a one-vertex ring; `MultiPoint` one ring per child
/// point, which keeps equal coordinates in separate children distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Ring),
    LineString(Ring),
    Polygon(Polygon),
    MultiPoint(Vec<Ring>),
    MultiLineString(Vec<Ring>),
    MultiPolygon(Vec<Polygon>),
    Collection(Vec<Geometry>),
}

impl Geometry {
    /// Name of the geometry kind, as it appears in error reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::Collection(_) => "GeometryCollection",
        }
    }
}
