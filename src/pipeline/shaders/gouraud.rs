use crate::core::geometry::Vertex;
use crate::core::pipeline::{Interpolatable, Shader};
use crate::pipeline::shaders::shade_surface;
use crate::scene::light::LightProps;
use crate::scene::material::MaterialPreset;
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use std::ops::{Add, Mul};

/// Lighting is evaluated at the vertices; only the resulting color is
/// interpolated. Over the flat vertex stream every corner of a face shares
/// one normal, so this same shader renders flat shading as a constant facet
/// color.
#[derive(Clone, Copy, Debug)]
pub struct GouraudVarying {
    pub color: Vector3<f32>,
}

impl Add for GouraudVarying {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            color: self.color + other.color,
        }
    }
}

impl Mul<f32> for GouraudVarying {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            color: self.color * scalar,
        }
    }
}

impl Interpolatable for GouraudVarying {}

pub struct GouraudShader {
    pub mvp: Matrix4<f32>,
    pub view_pos: Point3<f32>,
    pub lights: [Point3<f32>; 2],
    pub light_props: LightProps,
    pub material: MaterialPreset,
}

impl GouraudShader {
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

impl Shader for GouraudShader {
    type Varying = GouraudVarying;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let clip_pos = self.mvp * vertex.position.to_homogeneous();

        let color = shade_surface(
            vertex.position,
            vertex.normal,
            self.view_pos,
            &self.lights,
            &self.light_props,
            &self.material,
        );

        (clip_pos, GouraudVarying { color })
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        varying.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::material::presets;

    #[test]
    fn flat_stream_corners_shade_identically() {
        // All three corners of a flat-stream face carry the same normal, so
        // Gouraud interpolation degenerates to one constant facet color.
        // Lights and eye far away relative to the face size, so corner
        // positions contribute no visible variation and the facet color is
        // driven by the shared normal alone.
        let shader = GouraudShader::new(
            Matrix4::identity(),
            Point3::new(0.0, 0.0, 100.0),
            [Point3::new(0.0, 0.0, 100.0), Point3::new(10.0, 0.0, 100.0)],
            LightProps::default(),
            presets()[0],
        );
        let n = Vector3::new(0.0, 0.0, 1.0);
        let corners = [
            Vertex::new(Point3::new(0.0, 0.0, 0.0), n),
            Vertex::new(Point3::new(0.01, 0.0, 0.0), n),
            Vertex::new(Point3::new(0.0, 0.01, 0.0), n),
        ];
        let colors: Vec<_> = corners.iter().map(|v| shader.vertex(v).1.color).collect();
        assert!((colors[0] - colors[1]).norm() < 1e-3);
        assert!((colors[0] - colors[2]).norm() < 1e-3);
    }
}
