use nalgebra::{Point3, Vector3};

/// Shared ambient/diffuse/specular intensities for both scene lights.
#[derive(Debug, Clone, Copy)]
pub struct LightProps {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl Default for LightProps {
    fn default() -> Self {
        Self {
            ambient: Vector3::new(0.2, 0.2, 0.2),
            diffuse: Vector3::new(0.6, 0.6, 0.6),
            specular: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Object-space light on a cylindrical orbit around the mesh centroid,
/// steered by the user each frame.
#[derive(Debug, Clone)]
pub struct OrbitLight {
    pub angle: f32,
    pub radius: f32,
    pub height: f32,
}

impl OrbitLight {
    /// Default orbit radius is `radius_factor` times the bounding radius
    /// (1.5 keeps the light just outside the model).
    pub fn framing(bounding_radius: f32, radius_factor: f32) -> Self {
        Self {
            angle: 0.0,
            radius: bounding_radius * radius_factor,
            height: 0.0,
        }
    }

    pub fn position(&self, pivot: Point3<f32>) -> Point3<f32> {
        pivot
            + Vector3::new(
                self.radius * self.angle.cos(),
                self.radius * self.angle.sin(),
                self.height,
            )
    }
}

/// View-space light that tracks the camera: placed from the eye a little
/// toward the pivot so the model is always lit from the viewer's side.
pub fn headlight_position(
    eye: Point3<f32>,
    pivot: Point3<f32>,
    bounding_radius: f32,
) -> Point3<f32> {
    let toward = (pivot - eye)
        .try_normalize(1e-6)
        .unwrap_or_else(Vector3::zeros);
    eye + toward * 0.5 * bounding_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_light_circles_the_pivot() {
        let pivot = Point3::new(1.0, 1.0, 0.0);
        let mut light = OrbitLight::framing(2.0, 1.5);
        for i in 0..8 {
            light.angle = i as f32 * std::f32::consts::FRAC_PI_4;
            let p = light.position(pivot);
            let dx = p.x - pivot.x;
            let dy = p.y - pivot.y;
            assert!(((dx * dx + dy * dy).sqrt() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn headlight_sits_between_eye_and_pivot() {
        let eye = Point3::new(6.0, 0.0, 0.0);
        let pivot = Point3::origin();
        let p = headlight_position(eye, pivot, 2.0);
        assert!((p.x - 5.0).abs() < 1e-5);
        assert!(p.y.abs() < 1e-5 && p.z.abs() < 1e-5);
    }

    #[test]
    fn headlight_degenerate_eye_at_pivot() {
        let p = headlight_position(Point3::origin(), Point3::origin(), 2.0);
        assert_eq!(p, Point3::origin());
    }
}
