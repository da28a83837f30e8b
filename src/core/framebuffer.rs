use nalgebra::Vector3;
use std::cell::UnsafeCell;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// A 2D buffer holding linear color and depth.
/// Thread-safe for parallel rasterization: depth lives in atomics, color
/// writes go through a pool of striped locks.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub sample_count: usize,
    pub buffer_width: usize,
    pub buffer_height: usize,

    /// Color buffer behind UnsafeCell for interior mutability.
    /// Writes are serialized by `locks` and gated by the depth test.
    color_buffer: UnsafeCell<Vec<Vector3<f32>>>,

    /// Depth buffer stored as the bit patterns of f32 values.
    depth_buffer: Vec<AtomicU32>,

    /// Striped locks protecting color writes; pixel index maps to a stripe.
    locks: Vec<Mutex<()>>,
}

// Thread safety is managed manually via the atomics and lock stripes.
unsafe impl Sync for FrameBuffer {}

impl FrameBuffer {
    /// `sample_count` is the supersampling factor per axis (1 = no SSAA).
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        let sample_count = sample_count.max(1);
        let buffer_width = width * sample_count;
        let buffer_height = height * sample_count;
        let size = buffer_width * buffer_height;

        let inf_bits = f32::INFINITY.to_bits();
        let mut depth_buffer = Vec::with_capacity(size);
        for _ in 0..size {
            depth_buffer.push(AtomicU32::new(inf_bits));
        }

        let lock_count = 1024;
        let mut locks = Vec::with_capacity(lock_count);
        for _ in 0..lock_count {
            locks.push(Mutex::new(()));
        }

        Self {
            width,
            height,
            sample_count,
            buffer_width,
            buffer_height,
            color_buffer: UnsafeCell::new(vec![Vector3::zeros(); size]),
            depth_buffer,
            locks,
        }
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.buffer_width && y < self.buffer_height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.buffer_width + x
    }

    /// Resets every sample to a single color and resets depth.
    pub fn clear(&mut self, color: Vector3<f32>, depth: f32) {
        let buffer = self.color_buffer.get_mut();
        for pixel in buffer.iter_mut() {
            *pixel = color;
        }
        let bits = depth.to_bits();
        for d in &self.depth_buffer {
            d.store(bits, Ordering::Relaxed);
        }
    }

    /// Clears with a vertical gradient (top color at row 0) and resets depth.
    pub fn clear_gradient(&mut self, top: Vector3<f32>, bottom: Vector3<f32>, depth: f32) {
        let rows = self.buffer_height;
        let cols = self.buffer_width;
        let buffer = self.color_buffer.get_mut();
        for y in 0..rows {
            let t = if rows > 1 {
                y as f32 / (rows - 1) as f32
            } else {
                0.0
            };
            let color = top * (1.0 - t) + bottom * t;
            for x in 0..cols {
                buffer[y * cols + x] = color;
            }
        }
        let bits = depth.to_bits();
        for d in &self.depth_buffer {
            d.store(bits, Ordering::Relaxed);
        }
    }

    /// Thread-safe depth test and update. Returns true if `new_depth` is
    /// closer than the stored value; on success the depth is swapped in
    /// atomically via a CAS loop.
    #[inline]
    pub fn depth_test_and_update(&self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        let new_bits = new_depth.to_bits();
        let depth_atomic = &self.depth_buffer[idx];

        let mut current_bits = depth_atomic.load(Ordering::Relaxed);
        loop {
            let current_depth = f32::from_bits(current_bits);
            if new_depth >= current_depth {
                return false;
            }

            match depth_atomic.compare_exchange_weak(
                current_bits,
                new_bits,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(updated_bits) => current_bits = updated_bits,
            }
        }
    }

    /// Thread-safe pixel write. Call only after `depth_test_and_update`
    /// returned true for the same sample.
    #[inline]
    pub fn set_pixel_safe(&self, x: usize, y: usize, color: Vector3<f32>) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);

            let lock_idx = idx % self.locks.len();
            let _guard = self.locks[lock_idx].lock().unwrap();

            // Safe: the stripe lock serializes writers of this index.
            unsafe {
                let buffer = &mut *self.color_buffer.get();
                buffer[idx] = color;
            }
        }
    }

    /// Resolved read at display resolution, averaging the SSAA samples.
    /// Only safe to call once rasterization of the frame has finished.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let buffer = unsafe { &*self.color_buffer.get() };

        if self.sample_count == 1 {
            return Some(buffer[self.index(x, y)]);
        }

        let mut sum_color = Vector3::zeros();
        let start_x = x * self.sample_count;
        let start_y = y * self.sample_count;

        for dy in 0..self.sample_count {
            for dx in 0..self.sample_count {
                let idx = self.index(start_x + dx, start_y + dy);
                sum_color += buffer[idx];
            }
        }

        let samples = (self.sample_count * self.sample_count) as f32;
        Some(sum_color / samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_accepts_closer_rejects_farther() {
        let fb = FrameBuffer::new(4, 4, 1);
        assert!(fb.depth_test_and_update(1, 1, 0.5));
        assert!(!fb.depth_test_and_update(1, 1, 0.7));
        assert!(fb.depth_test_and_update(1, 1, 0.2));
    }

    #[test]
    fn clear_resets_color_and_depth() {
        let mut fb = FrameBuffer::new(2, 2, 1);
        fb.depth_test_and_update(0, 0, 0.1);
        fb.set_pixel_safe(0, 0, Vector3::new(1.0, 0.0, 0.0));
        fb.clear(Vector3::new(0.2, 0.2, 0.2), f32::INFINITY);
        assert_eq!(fb.get_pixel(0, 0), Some(Vector3::new(0.2, 0.2, 0.2)));
        // Depth was reset, so a far write passes again.
        assert!(fb.depth_test_and_update(0, 0, 100.0));
    }

    #[test]
    fn ssaa_resolve_averages_samples() {
        let mut fb = FrameBuffer::new(1, 1, 2);
        fb.clear(Vector3::zeros(), f32::INFINITY);
        fb.set_pixel_safe(0, 0, Vector3::new(1.0, 1.0, 1.0));
        fb.set_pixel_safe(1, 0, Vector3::new(1.0, 1.0, 1.0));
        let resolved = fb.get_pixel(0, 0).unwrap();
        assert!((resolved.x - 0.5).abs() < 1e-6);
    }
}
