use crate::core::color::pack_srgb;
use crate::scene::material::MaterialPreset;

/// Fixed geometry of the material menu block, anchored top-right.
pub const MENU_WIDTH: usize = 180;
pub const MENU_HEIGHT: usize = 120;
pub const MENU_MARGIN: usize = 20;

/// Menu visibility plus the index currently under the cursor.
/// Recomputed from polled cursor state every frame while visible.
#[derive(Debug, Default)]
pub struct MenuState {
    pub visible: bool,
    pub hovered: Option<usize>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Screen rectangle (x, y, w, h) of one menu item.
pub fn item_rect(index: usize, count: usize, win_w: usize) -> (i32, i32, i32, i32) {
    let item_h = (MENU_HEIGHT / count.max(1)) as i32;
    let x = win_w as i32 - MENU_WIDTH as i32 - MENU_MARGIN as i32;
    let y = MENU_MARGIN as i32 + index as i32 * item_h;
    (x, y, MENU_WIDTH as i32, item_h)
}

/// Hit-tests the cursor against the item rectangles.
pub fn hit_test(cursor_x: f32, cursor_y: f32, win_w: usize, count: usize) -> Option<usize> {
    for i in 0..count {
        let (x, y, w, h) = item_rect(i, count, win_w);
        if cursor_x >= x as f32
            && cursor_x <= (x + w) as f32
            && cursor_y >= y as f32
            && cursor_y <= (y + h) as f32
        {
            return Some(i);
        }
    }
    None
}

/// Paints the menu straight into the display buffer: one swatch per material
/// (its diffuse color), with a light border around the hovered item.
pub fn draw_overlay(
    buffer: &mut [u32],
    win_w: usize,
    win_h: usize,
    materials: &[MaterialPreset],
    hovered: Option<usize>,
) {
    let highlight = pack_srgb(nalgebra::Vector3::new(0.9, 0.9, 0.9));

    for (i, material) in materials.iter().enumerate() {
        let (x, y, w, h) = item_rect(i, materials.len(), win_w);

        if hovered == Some(i) {
            fill_rect(buffer, win_w, win_h, x - 2, y - 2, w + 4, h + 4, highlight);
        }
        fill_rect(
            buffer,
            win_w,
            win_h,
            x,
            y,
            w,
            h,
            pack_srgb(material.diffuse),
        );
    }
}

fn fill_rect(
    buffer: &mut [u32],
    win_w: usize,
    win_h: usize,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    color: u32,
) {
    let x0 = x.max(0) as usize;
    let y0 = y.max(0) as usize;
    let x1 = ((x + w).max(0) as usize).min(win_w);
    let y1 = ((y + h).max(0) as usize).min(win_h);

    for row in y0..y1 {
        for col in x0..x1 {
            buffer[row * win_w + col] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::material::presets;

    #[test]
    fn items_stack_inside_the_menu_block() {
        let (x0, y0, w, h) = item_rect(0, 3, 1024);
        assert_eq!(x0, 1024 - 180 - 20);
        assert_eq!(y0, 20);
        assert_eq!((w, h), (180, 40));

        let (_, y2, _, _) = item_rect(2, 3, 1024);
        assert_eq!(y2, 20 + 2 * 40);
    }

    #[test]
    fn hit_test_finds_each_item_center() {
        for i in 0..3 {
            let (x, y, w, h) = item_rect(i, 3, 1024);
            let cx = (x + w / 2) as f32;
            let cy = (y + h / 2) as f32;
            assert_eq!(hit_test(cx, cy, 1024, 3), Some(i));
        }
    }

    #[test]
    fn hit_test_misses_outside_the_block() {
        assert_eq!(hit_test(0.0, 0.0, 1024, 3), None);
        assert_eq!(hit_test(512.0, 700.0, 1024, 3), None);
        // Just below the last item.
        let (x, y, w, h) = item_rect(2, 3, 1024);
        assert_eq!(hit_test((x + w / 2) as f32, (y + h + 5) as f32, 1024, 3), None);
    }

    #[test]
    fn overlay_paints_swatches() {
        let mats = presets();
        let mut buffer = vec![0u32; 1024 * 768];
        draw_overlay(&mut buffer, 1024, 768, &mats, Some(1));
        let (x, y, w, h) = item_rect(0, 3, 1024);
        let center = (y + h / 2) as usize * 1024 + (x + w / 2) as usize;
        assert_ne!(buffer[center], 0);
    }
}
