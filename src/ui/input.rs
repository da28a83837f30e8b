use crate::io::config::ControlConfig;
use crate::scene::context::{SceneState, ShadingMode};
use crate::ui::menu::{MenuState, hit_test};
use log::info;
use minifb::{Key, MouseButton, MouseMode, Window};

/// One frame's worth of polled input. Derived from current key/button/cursor
/// state only; taps shorter than a frame can be missed, which is accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputState {
    // Continuous camera controls.
    pub cam_orbit_left: bool,
    pub cam_orbit_right: bool,
    pub cam_up: bool,
    pub cam_down: bool,
    pub cam_in: bool,
    pub cam_out: bool,

    // Continuous light controls.
    pub light_orbit_left: bool,
    pub light_orbit_right: bool,
    pub light_in: bool,
    pub light_out: bool,
    pub light_down: bool,
    pub light_up: bool,

    // Discrete mode keys.
    pub key_flat: bool,
    pub key_gouraud: bool,
    pub key_phong: bool,

    // Mouse.
    pub left_button: bool,
    pub right_button: bool,
    pub cursor: (f32, f32),
}

impl InputState {
    pub fn poll(window: &Window) -> Self {
        Self {
            cam_orbit_left: window.is_key_down(Key::Left),
            cam_orbit_right: window.is_key_down(Key::Right),
            cam_up: window.is_key_down(Key::Up),
            cam_down: window.is_key_down(Key::Down),
            cam_in: window.is_key_down(Key::W),
            cam_out: window.is_key_down(Key::S),

            light_orbit_left: window.is_key_down(Key::A),
            light_orbit_right: window.is_key_down(Key::D),
            light_in: window.is_key_down(Key::Q),
            light_out: window.is_key_down(Key::E),
            light_down: window.is_key_down(Key::Z),
            light_up: window.is_key_down(Key::X),

            key_flat: window.is_key_down(Key::F),
            key_gouraud: window.is_key_down(Key::G),
            key_phong: window.is_key_down(Key::P),

            left_button: window.get_mouse_down(MouseButton::Left),
            right_button: window.get_mouse_down(MouseButton::Right),
            cursor: window.get_mouse_pos(MouseMode::Pass).unwrap_or((0.0, 0.0)),
        }
    }
}

/// Two-state machine for a discrete binding: fires exactly once per physical
/// press, on the released -> pressed transition.
#[derive(Debug, Default)]
pub struct EdgeTrigger {
    was_down: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current level; returns true only on the press transition.
    pub fn fired(&mut self, down: bool) -> bool {
        let fired = down && !self.was_down;
        self.was_down = down;
        fired
    }
}

/// Maps polled input to scene-state updates each frame: continuous bindings
/// advance orbit parameters by `rate * dt`, discrete bindings go through
/// per-binding edge triggers.
pub struct Controller {
    rates: ControlConfig,
    flat: EdgeTrigger,
    gouraud: EdgeTrigger,
    phong: EdgeTrigger,
    menu_toggle: EdgeTrigger,
    select: EdgeTrigger,
}

impl Controller {
    pub fn new(rates: ControlConfig) -> Self {
        Self {
            rates,
            flat: EdgeTrigger::new(),
            gouraud: EdgeTrigger::new(),
            phong: EdgeTrigger::new(),
            menu_toggle: EdgeTrigger::new(),
            select: EdgeTrigger::new(),
        }
    }

    pub fn apply(
        &mut self,
        input: &InputState,
        scene: &mut SceneState,
        menu: &mut MenuState,
        win_w: usize,
        dt: f32,
    ) {
        // --- Continuous camera orbit ---
        if input.cam_orbit_left {
            scene.camera.angle -= self.rates.camera_angle_rate * dt;
        }
        if input.cam_orbit_right {
            scene.camera.angle += self.rates.camera_angle_rate * dt;
        }
        if input.cam_up {
            scene.camera.height += self.rates.camera_height_rate * dt;
        }
        if input.cam_down {
            scene.camera.height -= self.rates.camera_height_rate * dt;
        }
        if input.cam_in {
            scene.camera.zoom(-self.rates.camera_radius_rate * dt);
        }
        if input.cam_out {
            scene.camera.zoom(self.rates.camera_radius_rate * dt);
        }

        // --- Continuous light orbit ---
        if input.light_orbit_left {
            scene.light.angle -= self.rates.light_angle_rate * dt;
        }
        if input.light_orbit_right {
            scene.light.angle += self.rates.light_angle_rate * dt;
        }
        if input.light_in {
            scene.light.radius =
                (scene.light.radius - self.rates.light_radius_rate * dt).max(0.0);
        }
        if input.light_out {
            scene.light.radius += self.rates.light_radius_rate * dt;
        }
        if input.light_down {
            scene.light.height -= self.rates.light_height_rate * dt;
        }
        if input.light_up {
            scene.light.height += self.rates.light_height_rate * dt;
        }

        // --- Shading mode (edge-triggered) ---
        if self.flat.fired(input.key_flat) {
            scene.mode = ShadingMode::Flat;
            info!("Shading mode: Flat");
        }
        if self.gouraud.fired(input.key_gouraud) {
            scene.mode = ShadingMode::Gouraud;
            info!("Shading mode: Gouraud");
        }
        if self.phong.fired(input.key_phong) {
            scene.mode = ShadingMode::Phong;
            info!("Shading mode: Phong");
        }

        // --- Material menu ---
        if self.menu_toggle.fired(input.right_button) {
            menu.visible = !menu.visible;
            if !menu.visible {
                menu.hovered = None;
            }
        }

        // Advance the click trigger every frame so a press started outside
        // the menu does not fire later.
        let clicked = self.select.fired(input.left_button);

        if menu.visible {
            menu.hovered = hit_test(input.cursor.0, input.cursor.1, win_w, scene.materials.len());
            if clicked && let Some(i) = menu.hovered {
                scene.material_index = i;
                info!("Material selected: {}", scene.materials[i].name);
                menu.visible = false;
                menu.hovered = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::Config;
    use crate::scene::mesh::Mesh;
    use crate::ui::menu::item_rect;

    fn scene() -> SceneState {
        SceneState::from_mesh(&Mesh::create_test_triangle(), &Config::default())
    }

    #[test]
    fn edge_trigger_fires_once_per_press() {
        let mut trigger = EdgeTrigger::new();
        let mut fires = 0;
        for _ in 0..10 {
            if trigger.fired(true) {
                fires += 1;
            }
        }
        assert_eq!(fires, 1);
        assert!(!trigger.fired(false));
        assert!(trigger.fired(true));
    }

    #[test]
    fn held_mode_key_switches_once() {
        let mut scene = scene();
        let mut menu = MenuState::new();
        let mut controller = Controller::new(ControlConfig::default());
        assert_eq!(scene.mode, ShadingMode::Gouraud);

        let input = InputState {
            key_phong: true,
            ..InputState::default()
        };
        for _ in 0..5 {
            controller.apply(&input, &mut scene, &mut menu, 1024, 0.016);
        }
        assert_eq!(scene.mode, ShadingMode::Phong);

        // Flip to flat, then hold phong again: exactly one more switch.
        let flat = InputState {
            key_flat: true,
            ..InputState::default()
        };
        controller.apply(&flat, &mut scene, &mut menu, 1024, 0.016);
        assert_eq!(scene.mode, ShadingMode::Flat);
    }

    #[test]
    fn continuous_motion_scales_with_elapsed_time() {
        let mut scene = scene();
        let mut menu = MenuState::new();
        let mut controller = Controller::new(ControlConfig::default());
        let start = scene.camera.angle;

        let input = InputState {
            cam_orbit_right: true,
            ..InputState::default()
        };
        // Two half-second frames must advance as far as one full second.
        controller.apply(&input, &mut scene, &mut menu, 1024, 0.5);
        controller.apply(&input, &mut scene, &mut menu, 1024, 0.5);
        let rate = ControlConfig::default().camera_angle_rate;
        assert!((scene.camera.angle - start - rate).abs() < 1e-5);
    }

    #[test]
    fn camera_orbit_invariant_under_input() {
        let mut scene = scene();
        let mut menu = MenuState::new();
        let mut controller = Controller::new(ControlConfig::default());

        let inputs = [
            InputState { cam_orbit_left: true, cam_up: true, ..InputState::default() },
            InputState { cam_in: true, ..InputState::default() },
            InputState { cam_orbit_right: true, cam_down: true, cam_out: true, ..InputState::default() },
        ];
        for input in &inputs {
            for _ in 0..30 {
                controller.apply(input, &mut scene, &mut menu, 1024, 0.033);
                let eye = scene.camera.eye();
                let dx = eye.x - scene.centroid.x;
                let dy = eye.y - scene.centroid.y;
                assert!(((dx * dx + dy * dy).sqrt() - scene.camera.radius).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn menu_toggle_hover_and_select() {
        let mut scene = scene();
        let mut menu = MenuState::new();
        let mut controller = Controller::new(ControlConfig::default());

        // Right press opens the menu; holding it does not close it again.
        let right_down = InputState {
            right_button: true,
            ..InputState::default()
        };
        controller.apply(&right_down, &mut scene, &mut menu, 1024, 0.016);
        controller.apply(&right_down, &mut scene, &mut menu, 1024, 0.016);
        assert!(menu.visible);

        // Hover the second item and click.
        let (x, y, w, h) = item_rect(1, scene.materials.len(), 1024);
        let click = InputState {
            left_button: true,
            cursor: ((x + w / 2) as f32, (y + h / 2) as f32),
            ..InputState::default()
        };
        controller.apply(&click, &mut scene, &mut menu, 1024, 0.016);
        assert_eq!(scene.material_index, 1);
        assert!(!menu.visible);
    }

    #[test]
    fn click_outside_menu_selects_nothing() {
        let mut scene = scene();
        let mut menu = MenuState::new();
        let mut controller = Controller::new(ControlConfig::default());
        menu.visible = true;

        let click = InputState {
            left_button: true,
            cursor: (5.0, 700.0),
            ..InputState::default()
        };
        controller.apply(&click, &mut scene, &mut menu, 1024, 0.016);
        assert_eq!(scene.material_index, 0);
        assert!(menu.visible);
    }
}
