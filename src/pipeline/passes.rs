use crate::core::color::pack_srgb;
use crate::core::framebuffer::FrameBuffer;
use crate::io::config::RenderConfig;
use crate::pipeline::renderer::{Background, Renderer};
use crate::pipeline::shaders::gouraud::GouraudShader;
use crate::pipeline::shaders::phong::PhongShader;
use crate::scene::context::{SceneState, ShadingMode};
use nalgebra::Vector3;
use rayon::prelude::*;

/// Resolves the configured background; a solid color wins over a gradient.
pub fn background_from_config(render: &RenderConfig) -> Background {
    if let Some(color) = render.background_color {
        Background::Solid(Vector3::from(color))
    } else if let (Some(top), Some(bottom)) = (
        render.background_gradient_top,
        render.background_gradient_bottom,
    ) {
        Background::Gradient(Vector3::from(top), Vector3::from(bottom))
    } else {
        Background::Solid(Vector3::new(0.12, 0.12, 0.12))
    }
}

/// Renders one frame of the scene: rebuilds the matrices and light positions
/// from the current state, then draws the vertex stream matching the active
/// shading mode.
pub fn render_frame(scene: &SceneState, renderer: &mut Renderer, background: Background) {
    renderer.clear(background);

    let eye = scene.camera.eye();
    let mvp = scene.camera.projection_matrix() * scene.camera.view_matrix();
    let lights = scene.light_positions();
    let material = *scene.active_material();

    match scene.mode {
        // Flat: face normal replicated per corner, lit at the vertices;
        // every corner of a face produces the same color.
        ShadingMode::Flat => {
            let shader = GouraudShader::new(mvp, eye, lights, scene.light_props, material);
            renderer.draw_triangles(&scene.flat_stream, &shader);
        }
        ShadingMode::Gouraud => {
            let shader = GouraudShader::new(mvp, eye, lights, scene.light_props, material);
            renderer.draw_triangles(&scene.smooth_stream, &shader);
        }
        ShadingMode::Phong => {
            let shader = PhongShader::new(mvp, eye, lights, scene.light_props, material);
            renderer.draw_triangles(&scene.smooth_stream, &shader);
        }
    }
}

/// Resolves the linear framebuffer into a gamma-corrected u32 display buffer.
pub fn post_process_to_buffer(framebuffer: &FrameBuffer, buffer: &mut [u32]) {
    buffer
        .par_chunks_mut(framebuffer.width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                if let Some(color) = framebuffer.get_pixel(x, y) {
                    *pixel = pack_srgb(color);
                } else {
                    *pixel = 0;
                }
            }
        });
}
