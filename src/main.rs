//! Ridgeline - a spinning procedural terrain under three directional lights.
//!
//! The heightfield is a truncated 2D cosine sum with analytic normals,
//! tessellated once into a triangle-strip mesh and Phong-Blinn shaded.

mod camera;
mod cli;
mod params;
mod rendering;
mod scene;
mod terrain;
mod texture;

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use cli::Args;
use params::{AnimationParams, RecordingConfig, RenderConfig};
use rendering::{RenderSystem, Uniforms};
use scene::Scene;
use terrain::{HeightField, TerrainMesh};
use texture::Texture;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Scene state
    scene: Scene,
    geometry: Arc<TerrainMesh>,
    texture: Arc<Texture>,

    // Configuration
    render_config: RenderConfig,
    recording: Option<RecordingConfig>,

    // Time tracking
    start_time: Instant,
    last_time_s: f32,
    frame_num: usize,
}

impl App {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let render_config = RenderConfig::default();
        let recording = args.create_recording_config()?;

        let field = HeightField::new(args.terrain_params());
        let mesh_params = args.mesh_params();

        let build_start = Instant::now();
        let geometry = Arc::new(TerrainMesh::build(&field, &mesh_params));
        log::info!(
            "terrain mesh: {} vertices ({} strips of {}), built in {:.1?}",
            geometry.vertices.len(),
            geometry.strips(),
            geometry.vertices_per_strip(),
            build_start.elapsed()
        );

        let texture = Arc::new(Texture::checkerboard(20, 20));
        let scene = Scene::build(
            Arc::clone(&geometry),
            Arc::clone(&texture),
            &render_config,
            AnimationParams::default(),
        );

        Ok(Self {
            window: None,
            render_system: None,
            scene,
            geometry,
            texture,
            render_config,
            recording,
            start_time: Instant::now(),
            last_time_s: 0.0,
            frame_num: 0,
        })
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Ridgeline - Procedural Terrain")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.geometry,
            &self.texture,
            self.scene.objects.len() as u32,
            self.recording.clone(),
        ));
        let render_system = match render_system {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("failed to initialize rendering: {e:#}");
                event_loop.exit();
                return;
            }
        };

        log::info!("ridgeline is running, press ESC to quit");

        // Animation time starts once the window is up
        self.start_time = Instant::now();
        self.last_time_s = 0.0;

        self.window = Some(window);
        self.render_system = Some(render_system);
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
                self.scene.camera.aspect = size.width as f32 / size.height.max(1) as f32;
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
                if let Some(recording) = &self.recording {
                    if self.frame_num >= recording.total_frames() {
                        log::info!(
                            "recording complete: {} frames in {}",
                            self.frame_num,
                            recording.frames_dir()
                        );
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }
}

impl App {
    /// Render a single frame
    fn render_frame(&mut self) {
        let Some(render_system) = &mut self.render_system else {
            return;
        };

        // Advance animation by the wall-clock delta in fixed sub-steps
        let time_s = self.start_time.elapsed().as_secs_f32();
        self.scene.advance(self.last_time_s, time_s);
        self.last_time_s = time_s;

        let draws: Vec<Uniforms> = self
            .scene
            .frame_states()
            .iter()
            .map(Uniforms::from_state)
            .collect();

        match render_system.render(&draws, self.frame_num) {
            Ok(()) => self.frame_num += 1,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    render_system.resize(size.width, size.height);
                }
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut app = App::new(&args)?;

    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
