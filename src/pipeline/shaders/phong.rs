use crate::core::geometry::Vertex;
use crate::core::pipeline::{Interpolatable, Shader};
use crate::pipeline::shaders::shade_surface;
use crate::scene::light::LightProps;
use crate::scene::material::MaterialPreset;
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use std::ops::{Add, Mul};

/// Normal and position are interpolated; lighting runs per fragment.
#[derive(Clone, Copy, Debug)]
pub struct PhongVarying {
    pub normal: Vector3<f32>,
    pub world_pos: Point3<f32>,
}

// nalgebra's Point3 has no Add for points, so go through the coordinates.
impl Add for PhongVarying {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            normal: self.normal + other.normal,
            world_pos: Point3::from(self.world_pos.coords + other.world_pos.coords),
        }
    }
}

impl Mul<f32> for PhongVarying {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            normal: self.normal * scalar,
            world_pos: Point3::from(self.world_pos.coords * scalar),
        }
    }
}

impl Interpolatable for PhongVarying {}

pub struct PhongShader {
    pub mvp: Matrix4<f32>,
    pub view_pos: Point3<f32>,
    pub lights: [Point3<f32>; 2],
    pub light_props: LightProps,
    pub material: MaterialPreset,
}

impl PhongShader {
    pub fn new(
        mvp: Matrix4<f32>,
        view_pos: Point3<f32>,
        lights: [Point3<f32>; 2],
        light_props: LightProps,
        material: MaterialPreset,
    ) -> Self {
        Self {
            mvp,
            view_pos,
            lights,
            light_props,
            material,
        }
    }
}

impl Shader for PhongShader {
    type Varying = PhongVarying;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let clip_pos = self.mvp * vertex.position.to_homogeneous();

        let varying = PhongVarying {
            normal: vertex.normal,
            world_pos: vertex.position,
        };

        (clip_pos, varying)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        // shade_surface renormalizes the interpolated normal and handles the
        // zero sentinel.
        shade_surface(
            varying.world_pos,
            varying.normal,
            self.view_pos,
            &self.lights,
            &self.light_props,
            &self.material,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::material::presets;

    #[test]
    fn varying_interpolates_linearly() {
        let a = PhongVarying {
            normal: Vector3::new(0.0, 0.0, 1.0),
            world_pos: Point3::new(0.0, 0.0, 0.0),
        };
        let b = PhongVarying {
            normal: Vector3::new(1.0, 0.0, 0.0),
            world_pos: Point3::new(2.0, 0.0, 0.0),
        };
        let mid = a * 0.5 + b * 0.5;
        assert!((mid.normal - Vector3::new(0.5, 0.0, 0.5)).norm() < 1e-6);
        assert!((mid.world_pos.coords - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn fragment_survives_degenerate_normal() {
        let shader = PhongShader::new(
            Matrix4::identity(),
            Point3::new(0.0, 0.0, 5.0),
            [Point3::new(0.0, 0.0, 3.0), Point3::new(3.0, 0.0, 0.0)],
            LightProps::default(),
            presets()[2],
        );
        let color = shader.fragment(PhongVarying {
            normal: Vector3::zeros(),
            world_pos: Point3::origin(),
        });
        assert!(!color.x.is_nan() && !color.y.is_nan() && !color.z.is_nan());
    }
}
