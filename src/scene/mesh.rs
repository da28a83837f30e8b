use nalgebra::Point3;

/// A triangle stored by value; immutable once loaded.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub a: Point3<f32>,
    pub b: Point3<f32>,
    pub c: Point3<f32>,
}

impl Triangle {
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self { a, b, c }
    }

    pub fn centroid(&self) -> Point3<f32> {
        Point3::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }
}

/// An ordered triangle soup loaded from an SMF file.
/// Built once at load time and read-only thereafter.
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Mean of the per-triangle centroids; the pivot for the camera and
    /// light orbits. Origin for an empty mesh.
    pub fn centroid(&self) -> Point3<f32> {
        if self.triangles.is_empty() {
            return Point3::origin();
        }
        let mut sum = Point3::origin().coords;
        for tri in &self.triangles {
            sum += tri.centroid().coords;
        }
        Point3::from(sum / self.triangles.len() as f32)
    }

    /// Max distance from `centroid` to any vertex; scales the default
    /// camera and light orbit radii.
    pub fn bounding_radius(&self, centroid: Point3<f32>) -> f32 {
        let mut max_dist: f32 = 0.0;
        for tri in &self.triangles {
            for p in [tri.a, tri.b, tri.c] {
                max_dist = max_dist.max((p - centroid).norm());
            }
        }
        max_dist
    }

    /// A single CCW triangle in the z=0 plane, used as the fallback when no
    /// mesh file can be loaded.
    pub fn create_test_triangle() -> Self {
        Self::new(vec![Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mesh_centroid_is_origin() {
        let mesh = Mesh::new(vec![]);
        assert_eq!(mesh.centroid(), Point3::origin());
        assert_eq!(mesh.bounding_radius(Point3::origin()), 0.0);
    }

    #[test]
    fn centroid_and_radius_of_unit_triangle() {
        let mesh = Mesh::create_test_triangle();
        let c = mesh.centroid();
        assert!((c.x - 1.0 / 3.0).abs() < 1e-6);
        assert!((c.y - 1.0 / 3.0).abs() < 1e-6);
        assert!(c.z.abs() < 1e-6);

        // Farthest vertices are (1,0,0) and (0,1,0).
        let r = mesh.bounding_radius(c);
        let expected = (Point3::new(1.0f32, 0.0, 0.0) - c).norm();
        assert!((r - expected).abs() < 1e-6);
    }
}
