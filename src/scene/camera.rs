use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

/// Smallest orbit radius the controller may shrink the camera to.
const MIN_RADIUS: f32 = 1e-3;

/// Camera on a cylindrical orbit around a fixed pivot (the mesh centroid).
///
/// The eye sits at `pivot + (radius*cos(angle), radius*sin(angle), height)`
/// with a Z-up convention, so the horizontal distance from the pivot is
/// always exactly `radius` regardless of height.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub pivot: Point3<f32>,
    pub angle: f32,
    pub radius: f32,
    pub height: f32,

    pub fov_y_rad: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    /// Frames a mesh: orbit radius defaults to `radius_factor` times the
    /// bounding radius (3.0 gives comfortable margin for typical meshes).
    pub fn framing(
        pivot: Point3<f32>,
        bounding_radius: f32,
        radius_factor: f32,
        fov_y_rad: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            pivot,
            angle: 0.0,
            radius: (bounding_radius * radius_factor).max(MIN_RADIUS),
            height: 0.0,
            fov_y_rad,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Cylindrical-to-Cartesian eye position.
    pub fn eye(&self) -> Point3<f32> {
        self.pivot
            + Vector3::new(
                self.radius * self.angle.cos(),
                self.radius * self.angle.sin(),
                self.height,
            )
    }

    /// Advances the orbit radius, clamped to stay positive.
    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius + delta).max(MIN_RADIUS);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        TransformFactory::view(&self.eye(), &self.pivot, &Vector3::new(0.0, 0.0, 1.0))
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        TransformFactory::perspective(self.aspect_ratio, self.fov_y_rad, self.near, self.far)
    }
}
