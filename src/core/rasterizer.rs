use crate::core::framebuffer::FrameBuffer;
use crate::core::math::interpolation::{
    barycentric_coordinates, is_inside_triangle, perspective_correct_barycentric,
};
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::core::pipeline::Shader;
use nalgebra::{Point2, Vector4};
use rayon::prelude::*;

/// Draws shaded triangles into the FrameBuffer.
pub struct Rasterizer {
    pub cull_mode: CullMode,
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub enum CullMode {
    Back,
    Front,
    /// Course meshes come with mixed winding, so culling is off by default.
    None,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            cull_mode: CullMode::None,
        }
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    /// Rasterizes one triangle given clip-space positions and per-vertex varyings.
    ///
    /// Performs Sutherland-Hodgman clipping against the six frustum planes in
    /// homogeneous clip space before triangulating the surviving polygon.
    /// The two vertex lists are double-buffered to avoid per-plane allocation.
    pub fn rasterize_triangle<S: Shader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        clip_coords: &[Vector4<f32>; 3],
        varyings: &[S::Varying; 3],
    ) {
        // A triangle clipped by a box has at most 9 vertices; 16 leaves slack.
        let mut current_poly: Vec<(Vector4<f32>, S::Varying)> = Vec::with_capacity(16);
        let mut clip_buffer: Vec<(Vector4<f32>, S::Varying)> = Vec::with_capacity(16);

        for i in 0..3 {
            current_poly.push((clip_coords[i], varyings[i]));
        }

        // (axis index, sign): a point is inside when sign * p[axis] <= p.w.
        let planes = [
            (0, 1.0),  // +X <= W
            (0, -1.0), // -X <= W
            (1, 1.0),  // +Y <= W
            (1, -1.0), // -Y <= W
            (2, 1.0),  // +Z <= W
            (2, -1.0), // -Z <= W
        ];

        for &(axis, sign) in &planes {
            if current_poly.is_empty() {
                return;
            }
            self.clip_polygon_against_plane::<S>(&current_poly, &mut clip_buffer, axis, sign);
            std::mem::swap(&mut current_poly, &mut clip_buffer);
        }

        if current_poly.len() < 3 {
            return;
        }

        // The clipped polygon is convex: triangulate as a fan around vertex 0.
        let v0 = current_poly[0];
        for i in 1..(current_poly.len() - 1) {
            let v1 = current_poly[i];
            let v2 = current_poly[i + 1];

            self.rasterize_triangle_clipped(
                framebuffer,
                shader,
                &[v0.0, v1.0, v2.0],
                &[v0.1, v1.1, v2.1],
            );
        }
    }

    fn clip_polygon_against_plane<S: Shader>(
        &self,
        input: &[(Vector4<f32>, S::Varying)],
        output: &mut Vec<(Vector4<f32>, S::Varying)>,
        axis: usize,
        sign: f32,
    ) {
        output.clear();

        if input.is_empty() {
            return;
        }

        let mut prev = input[input.len() - 1];
        let is_inside = |p: &Vector4<f32>| sign * p[axis] <= p.w + 1e-6;
        let mut prev_inside = is_inside(&prev.0);

        for curr in input {
            let curr_inside = is_inside(&curr.0);

            if curr_inside {
                if !prev_inside {
                    // OUT -> IN: emit the intersection, then the current point.
                    if let Some(inter) = Self::intersect_edge_plane::<S>(prev, *curr, axis, sign) {
                        output.push(inter);
                    }
                }
                output.push(*curr);
            } else if prev_inside {
                // IN -> OUT: emit the intersection only.
                if let Some(inter) = Self::intersect_edge_plane::<S>(prev, *curr, axis, sign) {
                    output.push(inter);
                }
            }

            prev = *curr;
            prev_inside = curr_inside;
        }
    }

    /// Intersection of an edge with a clip plane; interpolates both the
    /// homogeneous position and the varying.
    #[inline(always)]
    fn intersect_edge_plane<S: Shader>(
        a: (Vector4<f32>, S::Varying),
        b: (Vector4<f32>, S::Varying),
        axis: usize,
        sign: f32,
    ) -> Option<(Vector4<f32>, S::Varying)> {
        let ac = a.0[axis];
        let bc = b.0[axis];
        let aw = a.0.w;
        let bw = b.0.w;

        let denom = sign * (bc - ac) - (bw - aw);
        if denom.abs() < 1e-9 {
            return None;
        }

        let t = (aw - sign * ac) / denom;
        if !t.is_finite() {
            return None;
        }

        let pos = a.0 + (b.0 - a.0) * t;
        let vary = a.1 * (1.0 - t) + b.1 * t;

        Some((pos, vary))
    }

    /// Rasterizes a triangle already inside the frustum: perspective division,
    /// viewport transform, culling, then the shaded pixel loop.
    fn rasterize_triangle_clipped<S: Shader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        clip_coords: &[Vector4<f32>; 3],
        varyings: &[S::Varying; 3],
    ) {
        let width = framebuffer.buffer_width as f32;
        let height = framebuffer.buffer_height as f32;

        let mut screen_coords = [Point2::origin(); 3];
        let mut w_values = [0.0; 3];

        for i in 0..3 {
            // Clipping keeps w away from zero; this guards the residual case.
            if clip_coords[i].w.abs() < 1e-6 {
                return;
            }

            let ndc = apply_perspective_division(&clip_coords[i]);
            w_values[i] = clip_coords[i].w;
            screen_coords[i] = ndc_to_screen(ndc.x, ndc.y, width, height);
        }

        let v0 = screen_coords[0];
        let v1 = screen_coords[1];
        let v2 = screen_coords[2];
        let edge1 = v1 - v0;
        let edge2 = v2 - v1;
        let signed_area = edge1.x * edge2.y - edge1.y * edge2.x;

        match self.cull_mode {
            CullMode::Back if signed_area >= 0.0 => return,
            CullMode::Front if signed_area <= 0.0 => return,
            _ => {}
        }

        let (min_x, min_y, max_x, max_y) = self.compute_bounding_box(&screen_coords);

        // Scissor against the buffer.
        if max_x < 0
            || max_y < 0
            || min_x >= framebuffer.buffer_width as i32
            || min_y >= framebuffer.buffer_height as i32
        {
            return;
        }

        let start_x = min_x.max(0) as usize;
        let end_x = (max_x.min(framebuffer.buffer_width as i32 - 1)) as usize;
        let start_y = min_y.max(0) as usize;
        let end_y = (max_y.min(framebuffer.buffer_height as i32 - 1)) as usize;

        // Row-parallel pixel loop; work stealing absorbs the uneven row costs.
        (start_y..=end_y).into_par_iter().for_each(|y| {
            for x in start_x..=end_x {
                let pixel_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);

                let Some(bary) = barycentric_coordinates(
                    pixel_center,
                    screen_coords[0],
                    screen_coords[1],
                    screen_coords[2],
                ) else {
                    continue;
                };

                if !is_inside_triangle(bary) {
                    continue;
                }

                // One set of perspective-correct weights drives both the depth
                // and the varying interpolation.
                let Some(corrected_bary) =
                    perspective_correct_barycentric(bary, w_values[0], w_values[1], w_values[2])
                else {
                    continue;
                };

                let z_ndc = corrected_bary.x * clip_coords[0].z
                    + corrected_bary.y * clip_coords[1].z
                    + corrected_bary.z * clip_coords[2].z;
                let depth = z_ndc * 0.5 + 0.5;

                if framebuffer.depth_test_and_update(x, y, depth) {
                    let interpolated_varying = varyings[0] * corrected_bary.x
                        + varyings[1] * corrected_bary.y
                        + varyings[2] * corrected_bary.z;

                    let color = shader.fragment(interpolated_varying);
                    framebuffer.set_pixel_safe(x, y, color);
                }
            }
        });
    }

    fn compute_bounding_box(&self, points: &[Point2<f32>; 3]) -> (i32, i32, i32, i32) {
        let min_x = points[0].x.min(points[1].x).min(points[2].x).floor() as i32;
        let min_y = points[0].y.min(points[1].y).min(points[2].y).floor() as i32;
        let max_x = points[0].x.max(points[1].x).max(points[2].x).ceil() as i32;
        let max_y = points[0].y.max(points[1].y).max(points[2].y).ceil() as i32;
        (min_x, min_y, max_x, max_y)
    }
}
