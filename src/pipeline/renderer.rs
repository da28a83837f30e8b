use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::Vertex;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::Rasterizer;
use nalgebra::Vector3;

/// What the framebuffer is cleared to before drawing.
#[derive(Debug, Clone, Copy)]
pub enum Background {
    Solid(Vector3<f32>),
    /// Vertical gradient, top color first.
    Gradient(Vector3<f32>, Vector3<f32>),
}

/// High-level renderer tying the rasterizer to a framebuffer.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    /// `sample_count`: 1 for no AA, 2 for 2x2 SSAA, etc.
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height, sample_count),
        }
    }

    pub fn clear(&mut self, background: Background) {
        match background {
            Background::Solid(color) => self.framebuffer.clear(color, f32::INFINITY),
            Background::Gradient(top, bottom) => {
                self.framebuffer.clear_gradient(top, bottom, f32::INFINITY)
            }
        }
    }

    /// Draws a triangle-list vertex stream (three vertices per triangle).
    /// A trailing partial chunk is ignored.
    pub fn draw_triangles<S: Shader>(&mut self, vertices: &[Vertex], shader: &S) {
        for chunk in vertices.chunks(3) {
            if chunk.len() < 3 {
                break;
            }

            let (pos0, var0) = shader.vertex(&chunk[0]);
            let (pos1, var1) = shader.vertex(&chunk[1]);
            let (pos2, var2) = shader.vertex(&chunk[2]);

            self.rasterizer.rasterize_triangle(
                &self.framebuffer,
                shader,
                &[pos0, pos1, pos2],
                &[var0, var1, var2],
            );
        }
    }
}
