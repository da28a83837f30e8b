use nalgebra::{Point3, Vector3};

/// A single render vertex: position plus the normal used for lighting.
///
/// The same type is emitted by both stream builders; the flat stream repeats
/// the face normal on all three corners of a triangle, the smooth stream
/// carries the averaged per-vertex normal.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Position in world space.
    pub position: Point3<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}
