pub mod gouraud;
pub mod phong;

use crate::scene::light::LightProps;
use crate::scene::material::MaterialPreset;
use nalgebra::{Point3, Vector3};

/// Two-light Phong reflection at a surface point.
///
/// Ambient is applied once; each light contributes diffuse and specular
/// (reflect-vector model, shininess power). A zero-length normal (the
/// degenerate-triangle sentinel) degrades to the ambient term only instead
/// of producing NaN. The result is clamped to [0, 1].
pub fn shade_surface(
    position: Point3<f32>,
    normal: Vector3<f32>,
    view_pos: Point3<f32>,
    lights: &[Point3<f32>; 2],
    props: &LightProps,
    material: &MaterialPreset,
) -> Vector3<f32> {
    let ambient = props.ambient.component_mul(&material.ambient);

    let Some(n) = normal.try_normalize(1e-6) else {
        return clamp01(ambient);
    };

    let view_dir = match (view_pos - position).try_normalize(1e-6) {
        Some(v) => v,
        None => return clamp01(ambient),
    };

    let mut result = ambient;
    for light_pos in lights {
        let Some(light_dir) = (light_pos - position).try_normalize(1e-6) else {
            continue;
        };

        let diff = n.dot(&light_dir).max(0.0);
        result += props.diffuse.component_mul(&material.diffuse) * diff;

        if diff > 0.0 {
            let reflect_dir = n * (2.0 * n.dot(&light_dir)) - light_dir;
            let spec = view_dir.dot(&reflect_dir).max(0.0).powf(material.shininess);
            result += props.specular.component_mul(&material.specular) * spec;
        }
    }

    clamp01(result)
}

#[inline]
fn clamp01(c: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(
        c.x.clamp(0.0, 1.0),
        c.y.clamp(0.0, 1.0),
        c.z.clamp(0.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::material::presets;

    fn setup() -> (LightProps, MaterialPreset) {
        (LightProps::default(), presets()[0])
    }

    #[test]
    fn zero_normal_degrades_to_ambient() {
        let (props, mat) = setup();
        let color = shade_surface(
            Point3::origin(),
            Vector3::zeros(),
            Point3::new(0.0, 0.0, 5.0),
            &[Point3::new(0.0, 0.0, 3.0), Point3::new(3.0, 0.0, 0.0)],
            &props,
            &mat,
        );
        let expected = props.ambient.component_mul(&mat.ambient);
        assert!((color - expected).norm() < 1e-6);
        assert!(!color.x.is_nan());
    }

    #[test]
    fn light_behind_surface_adds_no_diffuse() {
        let (props, mat) = setup();
        let lit = shade_surface(
            Point3::origin(),
            Vector3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 5.0),
            &[Point3::new(0.0, 0.0, 3.0), Point3::new(0.0, 0.0, 3.0)],
            &props,
            &mat,
        );
        let unlit = shade_surface(
            Point3::origin(),
            Vector3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 5.0),
            &[Point3::new(0.0, 0.0, -3.0), Point3::new(0.0, 0.0, -3.0)],
            &props,
            &mat,
        );
        let ambient = props.ambient.component_mul(&mat.ambient);
        assert!((unlit - ambient).norm() < 1e-6);
        assert!(lit.norm() > unlit.norm());
    }

    #[test]
    fn result_is_clamped() {
        let (props, mat) = setup();
        let color = shade_surface(
            Point3::origin(),
            Vector3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 5.0),
            &[Point3::new(0.0, 0.0, 1.0), Point3::new(0.0, 0.0, 1.0)],
            &props,
            &mat,
        );
        assert!(color.x <= 1.0 && color.y <= 1.0 && color.z <= 1.0);
        assert!(color.x >= 0.0 && color.y >= 0.0 && color.z >= 0.0);
    }
}
