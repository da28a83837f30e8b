use crate::core::geometry::Vertex;
use crate::scene::mesh::{Mesh, Triangle};
use log::debug;
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;

/// Unit normal of a triangle: normalize(cross(b - a, c - a)).
///
/// A degenerate (zero-area) triangle yields the zero vector sentinel instead
/// of NaN; accumulating the sentinel into vertex normals is harmless.
pub fn face_normal(tri: &Triangle) -> Vector3<f32> {
    let u = tri.b - tri.a;
    let v = tri.c - tri.a;
    u.cross(&v).try_normalize(1e-12).unwrap_or_else(Vector3::zeros)
}

/// Hashable key for exact-position vertex deduplication.
///
/// Keyed on the raw f32 bit patterns: two positions merge only when they are
/// bit-identical, matching the exact-equality semantics of the SMF format
/// (no tolerance-based welding).
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
struct PositionKey([u32; 3]);

impl PositionKey {
    fn of(p: &Point3<f32>) -> Self {
        Self([p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
    }
}

/// Deduplicated vertex table with averaged (smooth) normals.
///
/// Each distinct position holds its renormalized accumulated face normal and
/// the list of faces referencing it. `corners` maps every face corner back
/// into the table, in face order.
pub struct VertexTable {
    pub positions: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    /// Face indices referencing each table entry.
    pub faces: Vec<Vec<usize>>,
    /// Per face, the table indices of its three corners.
    pub corners: Vec<[usize; 3]>,
}

impl VertexTable {
    /// Builds the table in two passes: deduplicate corners into entries, then
    /// accumulate each face normal into its three corner slots and normalize.
    /// Accumulators that sum to exactly zero stay zero.
    pub fn build(mesh: &Mesh) -> Self {
        let mut index_of: HashMap<PositionKey, usize> = HashMap::new();
        let mut positions: Vec<Point3<f32>> = Vec::new();
        let mut faces: Vec<Vec<usize>> = Vec::new();
        let mut corners: Vec<[usize; 3]> = Vec::with_capacity(mesh.triangles.len());

        for (face, tri) in mesh.triangles.iter().enumerate() {
            let mut ids = [0usize; 3];
            for (k, p) in [tri.a, tri.b, tri.c].iter().enumerate() {
                let id = *index_of.entry(PositionKey::of(p)).or_insert_with(|| {
                    positions.push(*p);
                    faces.push(Vec::new());
                    positions.len() - 1
                });
                faces[id].push(face);
                ids[k] = id;
            }
            corners.push(ids);
        }

        let mut accum = vec![Vector3::zeros(); positions.len()];
        for (face, ids) in corners.iter().enumerate() {
            let n = face_normal(&mesh.triangles[face]);
            for &id in ids {
                accum[id] += n;
            }
        }

        let normals: Vec<Vector3<f32>> = accum
            .into_iter()
            .map(|n| n.try_normalize(1e-12).unwrap_or_else(Vector3::zeros))
            .collect();

        debug!(
            "Vertex table: {} unique positions for {} faces",
            positions.len(),
            corners.len()
        );

        Self {
            positions,
            normals,
            faces,
            corners,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Vertex stream for flat shading: the face normal replicated on all three
/// corners of each triangle, producing a faceted appearance.
pub fn flat_vertices(mesh: &Mesh) -> Vec<Vertex> {
    let mut verts = Vec::with_capacity(mesh.triangles.len() * 3);
    for tri in &mesh.triangles {
        let n = face_normal(tri);
        verts.push(Vertex::new(tri.a, n));
        verts.push(Vertex::new(tri.b, n));
        verts.push(Vertex::new(tri.c, n));
    }
    verts
}

/// Vertex stream for smooth (Gouraud/Phong) shading: each corner carries its
/// averaged per-vertex normal so normals interpolate across faces.
pub fn smooth_vertices(table: &VertexTable) -> Vec<Vertex> {
    let mut verts = Vec::with_capacity(table.corners.len() * 3);
    for ids in &table.corners {
        for &id in ids {
            verts.push(Vertex::new(table.positions[id], table.normals[id]));
        }
    }
    verts
}
