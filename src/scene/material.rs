use nalgebra::Vector3;

/// Phong material parameters. Presets are immutable; only the active
/// selection index is runtime state.
#[derive(Debug, Clone, Copy)]
pub struct MaterialPreset {
    pub name: &'static str,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

/// The fixed palette, selectable at runtime from the material menu.
pub fn presets() -> Vec<MaterialPreset> {
    vec![
        MaterialPreset {
            name: "ruby",
            ambient: Vector3::new(0.6, 0.2, 0.2),
            diffuse: Vector3::new(0.9, 0.1, 0.1),
            specular: Vector3::new(0.8, 0.8, 0.8),
            shininess: 80.0,
        },
        MaterialPreset {
            name: "moss",
            ambient: Vector3::new(0.1, 0.3, 0.1),
            diffuse: Vector3::new(0.2, 0.7, 0.2),
            specular: Vector3::new(0.2, 0.2, 0.2),
            shininess: 8.0,
        },
        MaterialPreset {
            name: "blue plastic",
            ambient: Vector3::new(0.05, 0.05, 0.2),
            diffuse: Vector3::new(0.1, 0.3, 0.8),
            specular: Vector3::new(0.9, 0.9, 1.0),
            shininess: 120.0,
        },
    ]
}
