use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Viewer configuration, loaded from TOML. Every field has a default so a
/// missing or partial file still produces a working setup.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub controls: ControlConfig,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Supersampling factor per axis (1 = off).
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// "none", "back" or "front".
    #[serde(default = "default_cull_mode")]
    pub cull_mode: String,
    #[serde(default = "default_output")]
    pub output: String,
    pub background_color: Option<[f32; 3]>,
    pub background_gradient_top: Option<[f32; 3]>,
    pub background_gradient_bottom: Option<[f32; 3]>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            samples: default_samples(),
            cull_mode: default_cull_mode(),
            output: default_output(),
            background_color: Some([0.12, 0.12, 0.12]),
            background_gradient_top: None,
            background_gradient_bottom: None,
        }
    }
}

fn default_width() -> usize {
    1024
}
fn default_height() -> usize {
    768
}
fn default_samples() -> usize {
    1
}
fn default_cull_mode() -> String {
    "none".to_string()
}
fn default_output() -> String {
    "render.png".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view, degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    /// Initial orbit radius as a multiple of the mesh bounding radius.
    #[serde(default = "default_camera_radius_factor")]
    pub radius_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            radius_factor: default_camera_radius_factor(),
        }
    }
}

fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.01
}
fn default_far() -> f32 {
    1000.0
}
fn default_camera_radius_factor() -> f32 {
    3.0
}

#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_mesh")]
    pub mesh: String,
    /// Light orbit radius as a multiple of the mesh bounding radius.
    #[serde(default = "default_light_radius_factor")]
    pub light_radius_factor: f32,
    #[serde(default = "default_light_ambient")]
    pub light_ambient: [f32; 3],
    #[serde(default = "default_light_diffuse")]
    pub light_diffuse: [f32; 3],
    #[serde(default = "default_light_specular")]
    pub light_specular: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            mesh: default_mesh(),
            light_radius_factor: default_light_radius_factor(),
            light_ambient: default_light_ambient(),
            light_diffuse: default_light_diffuse(),
            light_specular: default_light_specular(),
        }
    }
}

fn default_mesh() -> String {
    "models/octahedron.smf".to_string()
}
fn default_light_radius_factor() -> f32 {
    1.5
}
fn default_light_ambient() -> [f32; 3] {
    [0.2, 0.2, 0.2]
}
fn default_light_diffuse() -> [f32; 3] {
    [0.6, 0.6, 0.6]
}
fn default_light_specular() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Rates for the continuous (held-key) controls, per second.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ControlConfig {
    #[serde(default = "default_angle_rate")]
    pub camera_angle_rate: f32,
    #[serde(default = "default_camera_radius_rate")]
    pub camera_radius_rate: f32,
    #[serde(default = "default_height_rate")]
    pub camera_height_rate: f32,
    #[serde(default = "default_angle_rate")]
    pub light_angle_rate: f32,
    #[serde(default = "default_light_rate")]
    pub light_radius_rate: f32,
    #[serde(default = "default_light_rate")]
    pub light_height_rate: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            camera_angle_rate: default_angle_rate(),
            camera_radius_rate: default_camera_radius_rate(),
            camera_height_rate: default_height_rate(),
            light_angle_rate: default_angle_rate(),
            light_radius_rate: default_light_rate(),
            light_height_rate: default_light_rate(),
        }
    }
}

fn default_angle_rate() -> f32 {
    1.5 // rad/s
}
fn default_camera_radius_rate() -> f32 {
    2.0 // units/s
}
fn default_height_rate() -> f32 {
    1.0
}
fn default_light_rate() -> f32 {
    1.0
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.width, 1024);
        assert_eq!(config.render.height, 768);
        assert_eq!(config.camera.radius_factor, 3.0);
        assert_eq!(config.scene.light_radius_factor, 1.5);
        assert_eq!(config.controls.camera_angle_rate, 1.5);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            "[render]\nwidth = 640\nheight = 480\n\n[scene]\nmesh = \"models/frog.smf\"\n",
        )
        .unwrap();
        assert_eq!(config.render.width, 640);
        assert_eq!(config.render.samples, 1);
        assert_eq!(config.scene.mesh, "models/frog.smf");
        assert_eq!(config.scene.light_ambient, [0.2, 0.2, 0.2]);
    }
}
