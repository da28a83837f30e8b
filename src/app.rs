use crate::core::rasterizer::CullMode;
use crate::io::config::Config;
use crate::io::image::save_buffer_to_image;
use crate::io::smf::load_smf;
use crate::pipeline::passes::{background_from_config, post_process_to_buffer, render_frame};
use crate::pipeline::renderer::Renderer;
use crate::scene::context::SceneState;
use crate::scene::mesh::Mesh;
use crate::ui::input::{Controller, InputState};
use crate::ui::menu::{MenuState, draw_overlay};
use log::{info, warn};
use minifb::{Key, Window, WindowOptions};
use std::time::Instant;

fn cull_mode_from_config(config: &Config) -> CullMode {
    match config.render.cull_mode.as_str() {
        "back" => CullMode::Back,
        "front" => CullMode::Front,
        _ => CullMode::None,
    }
}

/// Loads the configured mesh, falling back to the built-in triangle when the
/// file is unopenable or contains no valid faces.
fn load_scene_mesh(config: &Config) -> Mesh {
    match load_smf(&config.scene.mesh) {
        Ok(mesh) if !mesh.is_empty() => mesh,
        Ok(_) => {
            warn!(
                "Mesh '{}' has no valid faces, using fallback triangle",
                config.scene.mesh
            );
            Mesh::create_test_triangle()
        }
        Err(e) => {
            warn!("{} - using fallback triangle", e);
            Mesh::create_test_triangle()
        }
    }
}

/// Interactive viewer: polls input, mutates the scene state and redraws,
/// once per displayed frame until the window closes.
pub fn run_gui(config: Config) -> Result<(), String> {
    let width = config.render.width;
    let height = config.render.height;

    info!("Starting viewer ({}x{})...", width, height);
    info!(
        "Controls: Arrows/W/S=camera, A/D/Q/E/Z/X=light, F/G/P=shading, RightClick=material menu"
    );

    let mesh = load_scene_mesh(&config);
    let mut scene = SceneState::from_mesh(&mesh, &config);

    let mut window = Window::new(
        "SMF Viewer - Lights & Shading",
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| format!("Failed to create window: {}", e))?;

    window.set_target_fps(60);

    let mut renderer = Renderer::new(width, height, config.render.samples);
    renderer.rasterizer.set_cull_mode(cull_mode_from_config(&config));
    let background = background_from_config(&config.render);

    let mut controller = Controller::new(config.controls);
    let mut menu = MenuState::new();

    let mut buffer = vec![0u32; width * height];
    let mut last_frame_time = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        let input = InputState::poll(&window);
        controller.apply(&input, &mut scene, &mut menu, width, dt);

        render_frame(&scene, &mut renderer, background);
        post_process_to_buffer(&renderer.framebuffer, &mut buffer);

        if menu.visible {
            draw_overlay(&mut buffer, width, height, &scene.materials, menu.hovered);
        }

        window
            .update_with_buffer(&buffer, width, height)
            .map_err(|e| format!("Failed to present frame: {}", e))?;

        window.set_title(&format!(
            "SMF Viewer - {:.1} FPS - {:?} - {}",
            1.0 / dt.max(1e-6),
            scene.mode,
            scene.active_material().name
        ));
    }

    Ok(())
}

/// Headless mode: renders a single frame with the initial state and saves it.
pub fn run_cli(config: Config) -> Result<(), String> {
    info!("Starting headless render...");

    let mesh = load_smf(&config.scene.mesh)?;
    if mesh.is_empty() {
        return Err(format!(
            "Mesh '{}' contains no valid faces",
            config.scene.mesh
        ));
    }

    let scene = SceneState::from_mesh(&mesh, &config);

    let width = config.render.width;
    let height = config.render.height;
    let mut renderer = Renderer::new(width, height, config.render.samples);
    renderer.rasterizer.set_cull_mode(cull_mode_from_config(&config));

    let start_time = Instant::now();
    render_frame(&scene, &mut renderer, background_from_config(&config.render));
    info!("Render completed in {:.2?}", start_time.elapsed());

    let mut buffer = vec![0u32; width * height];
    post_process_to_buffer(&renderer.framebuffer, &mut buffer);

    info!("Saving output to '{}'...", config.render.output);
    save_buffer_to_image(&buffer, width, height, &config.render.output);

    Ok(())
}
