use crate::core::geometry::Vertex;
use crate::io::config::Config;
use crate::scene::camera::OrbitCamera;
use crate::scene::light::{LightProps, OrbitLight, headlight_position};
use crate::scene::material::{MaterialPreset, presets};
use crate::scene::mesh::Mesh;
use crate::scene::normals::{VertexTable, flat_vertices, smooth_vertices};
use log::info;
use nalgebra::{Point3, Vector3};

/// Which shading path the frame renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    Flat,
    Gouraud,
    Phong,
}

/// All mutable viewer state, owned by the frame loop and passed by reference
/// to the controller and the renderer. Single-threaded: mutated in place
/// every frame, no locking.
pub struct SceneState {
    // Derived geometry facts, fixed after load.
    pub centroid: Point3<f32>,
    pub bounding_radius: f32,
    /// Face normal replicated per corner (flat shading).
    pub flat_stream: Vec<Vertex>,
    /// Averaged vertex normals per corner (Gouraud/Phong shading).
    pub smooth_stream: Vec<Vertex>,

    // Per-frame mutable state.
    pub camera: OrbitCamera,
    pub light: OrbitLight,
    pub light_props: LightProps,
    pub materials: Vec<MaterialPreset>,
    pub material_index: usize,
    pub mode: ShadingMode,
}

impl SceneState {
    pub fn from_mesh(mesh: &Mesh, config: &Config) -> Self {
        let centroid = mesh.centroid();
        let bounding_radius = mesh.bounding_radius(centroid);

        let table = VertexTable::build(mesh);
        let flat_stream = flat_vertices(mesh);
        let smooth_stream = smooth_vertices(&table);

        info!(
            "Scene: {} triangles, {} unique vertices, centroid ({:.3}, {:.3}, {:.3}), radius {:.3}",
            mesh.triangles.len(),
            table.len(),
            centroid.x,
            centroid.y,
            centroid.z,
            bounding_radius
        );

        let camera = OrbitCamera::framing(
            centroid,
            bounding_radius,
            config.camera.radius_factor,
            config.camera.fov.to_radians(),
            config.render.width as f32 / config.render.height as f32,
            config.camera.near,
            config.camera.far,
        );

        let light = OrbitLight::framing(bounding_radius, config.scene.light_radius_factor);
        let light_props = LightProps {
            ambient: Vector3::from(config.scene.light_ambient),
            diffuse: Vector3::from(config.scene.light_diffuse),
            specular: Vector3::from(config.scene.light_specular),
        };

        Self {
            centroid,
            bounding_radius,
            flat_stream,
            smooth_stream,
            camera,
            light,
            light_props,
            materials: presets(),
            material_index: 0,
            mode: ShadingMode::Gouraud,
        }
    }

    /// Both light positions for this frame: the user-steered orbit light and
    /// the camera-tracking headlight.
    pub fn light_positions(&self) -> [Point3<f32>; 2] {
        [
            self.light.position(self.centroid),
            headlight_position(self.camera.eye(), self.centroid, self.bounding_radius),
        ]
    }

    pub fn active_material(&self) -> &MaterialPreset {
        &self.materials[self.material_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_from_test_triangle() {
        let mesh = Mesh::create_test_triangle();
        let state = SceneState::from_mesh(&mesh, &Config::default());
        assert_eq!(state.flat_stream.len(), 3);
        assert_eq!(state.smooth_stream.len(), 3);
        assert_eq!(state.mode, ShadingMode::Gouraud);
        assert_eq!(state.material_index, 0);

        // Camera radius follows the mesh scale.
        assert!((state.camera.radius - 3.0 * state.bounding_radius).abs() < 1e-5);
        assert!((state.light.radius - 1.5 * state.bounding_radius).abs() < 1e-5);
    }

    #[test]
    fn both_lights_are_positioned() {
        let mesh = Mesh::create_test_triangle();
        let state = SceneState::from_mesh(&mesh, &Config::default());
        let [orbit, head] = state.light_positions();
        // Orbit light sits at light radius in the horizontal plane.
        let d = orbit - state.centroid;
        assert!(((d.x * d.x + d.y * d.y).sqrt() - state.light.radius).abs() < 1e-4);
        // Headlight sits between the eye and the centroid.
        let eye = state.camera.eye();
        assert!((head - eye).norm() < (state.centroid - eye).norm());
    }
}
