use nalgebra::Vector3;

/// Converts linear RGB to sRGB (gamma correction), applied just before
/// packing the display buffer.
pub fn linear_to_srgb(color: Vector3<f32>) -> Vector3<f32> {
    let gamma = 1.0 / 2.2;
    Vector3::new(
        color.x.powf(gamma),
        color.y.powf(gamma),
        color.z.powf(gamma),
    )
}

/// Packs a linear color into a 0RGB u32 pixel, gamma-corrected and clamped.
pub fn pack_srgb(color: Vector3<f32>) -> u32 {
    let srgb = linear_to_srgb(color);
    let r = (srgb.x.clamp(0.0, 1.0) * 255.0) as u32;
    let g = (srgb.y.clamp(0.0, 1.0) * 255.0) as u32;
    let b = (srgb.z.clamp(0.0, 1.0) * 255.0) as u32;
    (255 << 24) | (r << 16) | (g << 8) | b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_black_and_white() {
        assert_eq!(pack_srgb(Vector3::zeros()) & 0x00FF_FFFF, 0);
        assert_eq!(pack_srgb(Vector3::new(1.0, 1.0, 1.0)) & 0x00FF_FFFF, 0x00FF_FFFF);
    }

    #[test]
    fn pack_clamps_out_of_range() {
        assert_eq!(
            pack_srgb(Vector3::new(2.0, -1.0, 1.0)) & 0x00FF_FFFF,
            0x00FF_00FF
        );
    }
}
