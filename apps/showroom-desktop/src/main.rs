use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec3;
use showroom_common::{ShowroomConfig, Viewport, WallSide, WallsConfig};
use showroom_input::{CursorAffordance, PointerEvent};
use showroom_kernel::{AutoRotationSpeeds, Session};
use showroom_render::Renderer;
use showroom_render_wgpu::{SceneFlattener, WgpuRenderer};
use showroom_scene::placeholder_model;
use showroom_tools::{FrameStats, SessionInspector};
use std::f32::consts::TAU;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorIcon, Window, WindowId};

const CLEAR_COLOR: [f32; 3] = [0.02, 0.02, 0.03];

#[derive(Parser)]
#[command(name = "showroom-desktop", about = "Interactive 3D showroom")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the auto-rotation speeds; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start with an empty model slot
    #[arg(long)]
    no_model: bool,
}

fn cursor_icon(cursor: CursorAffordance) -> CursorIcon {
    match cursor {
        CursorAffordance::Default => CursorIcon::Default,
        CursorAffordance::Grab => CursorIcon::Grab,
        CursorAffordance::Grabbing => CursorIcon::Grabbing,
    }
}

/// Session plus the host-side state around it.
struct AppState {
    session: Session,
    stats: FrameStats,
    last_frame: Instant,
    cursor_pos: Option<PhysicalPosition<f64>>,
    walls: WallsConfig,
    show_panel: bool,
}

impl AppState {
    fn new(config: ShowroomConfig, seed: Option<u64>, with_model: bool) -> Result<Self> {
        let base = config.rotation.base_speed;
        let auto = match seed {
            Some(seed) => AutoRotationSpeeds::from_seed(base, seed),
            None => AutoRotationSpeeds::from_entropy(base),
        };
        let walls = config.walls;
        let model = placeholder_model(&config.model);
        // Real size arrives with the first resize.
        let viewport = Viewport::new(1280.0, 720.0)?;
        let mut session = Session::new(config, viewport, auto)?;
        if with_model {
            session.attach_model(model);
        }
        Ok(Self {
            session,
            stats: FrameStats::default(),
            last_frame: Instant::now(),
            cursor_pos: None,
            walls,
            show_panel: true,
        })
    }

    /// Forward one pointer event; the returned cursor is applied by the caller.
    fn dispatch(&mut self, event: PointerEvent) -> CursorAffordance {
        match self.session.handle_pointer(event) {
            Ok(cursor) => cursor,
            Err(e) => {
                tracing::warn!("dropped {} event: {e}", event.as_str());
                self.session.cursor()
            }
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_panel {
            return;
        }

        egui::SidePanel::right("tuning")
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.heading("Tuning");
                ui.label(format!(
                    "{:.0} fps  {:.2} ms  (worst {:.2} ms)",
                    self.stats.fps(),
                    self.stats.frame_ms(),
                    self.stats.worst_ms()
                ));
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.camera_section(ui);
                    self.lights_section(ui);
                    self.walls_section(ui);
                    self.model_section(ui);
                    self.interaction_section(ui);
                });

                ui.separator();
                ui.small("F1: toggle panel | drag: spin model");
            });
    }

    fn camera_section(&mut self, ui: &mut egui::Ui) {
        let camera = &mut self.session.scene_mut().camera;
        egui::CollapsingHeader::new("Camera").show(ui, |ui| {
            let mut fov = camera.fov.to_degrees();
            if ui
                .add(egui::Slider::new(&mut fov, 10.0..=120.0).text("fov"))
                .changed()
            {
                camera.fov = fov.to_radians();
            }
            let (mut near, mut far) = (camera.near, camera.far);
            let near_changed = ui
                .add(egui::Slider::new(&mut near, 0.01..=10.0).text("near"))
                .changed();
            let far_changed = ui
                .add(egui::Slider::new(&mut far, 0.1..=200.0).text("far"))
                .changed();
            if near_changed || far_changed {
                camera.set_clip_planes(near, far);
            }
        });
    }

    fn lights_section(&mut self, ui: &mut egui::Ui) {
        let scene = self.session.scene_mut();
        egui::CollapsingHeader::new("Lights").show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("ambient");
                ui.color_edit_button_rgb(&mut scene.ambient.color);
            });
            ui.add(egui::Slider::new(&mut scene.ambient.intensity, 0.0..=10.0).text("intensity"));
            ui.horizontal(|ui| {
                ui.label("point");
                ui.color_edit_button_rgb(&mut scene.point_light.color);
            });
            ui.add(
                egui::Slider::new(&mut scene.point_light.intensity, 0.0..=300.0).text("intensity"),
            );
        });
    }

    fn walls_section(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;
        egui::CollapsingHeader::new("Walls").show(ui, |ui| {
            for side in WallSide::ALL {
                let material = self.walls.get_mut(side);
                egui::CollapsingHeader::new(side.as_str()).show(ui, |ui| {
                    changed |= ui.color_edit_button_rgb(&mut material.color).changed();
                    changed |= ui
                        .add(egui::Slider::new(&mut material.metalness, 0.0..=1.0).text("metalness"))
                        .changed();
                    changed |= ui
                        .add(egui::Slider::new(&mut material.roughness, 0.0..=1.0).text("roughness"))
                        .changed();
                });
            }
        });
        if changed {
            self.session.scene_mut().apply_wall_materials(&self.walls);
        }
    }

    fn model_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Model").show(ui, |ui| {
            let has_model = self.session.scene().model().is_some();
            if has_model {
                if ui.button("Detach model").clicked() {
                    self.session.detach_model();
                }
            } else if ui.button("Attach placeholder").clicked() {
                let model = placeholder_model(&self.session.config().model);
                self.session.attach_model(model);
            }

            let Some(model) = self.session.scene_mut().model_mut() else {
                ui.label("no model");
                return;
            };
            let t = &mut model.transform;

            ui.label("position");
            ui.add(egui::Slider::new(&mut t.position.x, -10.0..=10.0).text("x"));
            ui.add(egui::Slider::new(&mut t.position.y, -10.0..=10.0).text("y"));
            ui.add(egui::Slider::new(&mut t.position.z, -10.0..=10.0).text("z"));

            ui.label("rotation");
            // Angles keep growing under auto-rotation; show them wrapped.
            let mut rot = t.rotation().to_array().map(|a| a.rem_euclid(TAU));
            let mut rot_changed = false;
            for (angle, axis) in rot.iter_mut().zip(["x", "y", "z"]) {
                rot_changed |= ui
                    .add(egui::Slider::new(angle, 0.0..=TAU).text(axis))
                    .changed();
            }
            if rot_changed {
                t.set_rotation(Vec3::from_array(rot));
            }

            let mut scale = t.scale.x;
            if ui
                .add(egui::Slider::new(&mut scale, 0.1..=10.0).text("scale"))
                .changed()
            {
                t.scale = Vec3::splat(scale);
            }
        });
    }

    fn interaction_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Interaction")
            .default_open(true)
            .show(ui, |ui| {
                let mut rotation = self.session.config().rotation;
                let mut changed = false;
                changed |= ui
                    .add(egui::Slider::new(&mut rotation.damping, 0.5..=0.999).text("damping"))
                    .changed();
                changed |= ui
                    .add(
                        egui::Slider::new(&mut rotation.sensitivity, 0.0..=0.02)
                            .text("sensitivity"),
                    )
                    .changed();
                changed |= ui
                    .checkbox(&mut rotation.require_hover_to_drag, "require hover to drag")
                    .changed();
                if changed {
                    if let Err(e) = self.session.set_rotation_config(rotation) {
                        tracing::warn!("rejected rotation settings: {e}");
                    }
                }

                let mut parallax = self.session.config().parallax;
                let strength = ui
                    .add(egui::Slider::new(&mut parallax.strength, 0.0..=3.0).text("parallax"))
                    .changed();
                let smoothing = ui
                    .add(egui::Slider::new(&mut parallax.smoothing, 0.01..=1.0).text("smoothing"))
                    .changed();
                if strength || smoothing {
                    self.session.set_parallax(parallax);
                }

                ui.separator();
                let summary = SessionInspector::summary(&self.session);
                ui.label(format!("state: {}  cursor: {}", summary.state, summary.cursor));
                ui.label(format!("hovered: {}", summary.hovered));
                ui.label(format!("velocity: {:.4} rad/frame", summary.velocity));
                ui.label(format!(
                    "pointer: ({:.2}, {:.2})",
                    summary.pointer.x, summary.pointer.y
                ));
                if let Some(info) = SessionInspector::inspect_model(&self.session) {
                    ui.small(info.to_string());
                }
            });
    }
}

/// Window, GPU and egui resources, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext, pixel_ratio_cap: f32) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Showroom")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("showroom_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut renderer = WgpuRenderer::new(&device, format, config.width, config.height);
        renderer.set_clear_color(CLEAR_COLOR);

        let pixels_per_point = (window.scale_factor() as f32).min(pixel_ratio_cap);
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(pixels_per_point),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }
}

struct ShowroomApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl ShowroomApp {
    fn apply_cursor(&self, cursor: CursorAffordance) {
        if let Some(gpu) = &self.gpu {
            gpu.window.set_cursor(cursor_icon(cursor));
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        self.state.stats.record(now - self.state.last_frame);
        self.state.last_frame = now;
        self.state.session.tick();

        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let frame = SceneFlattener.render(&self.state.session);
        gpu.renderer.render(&gpu.device, &gpu.queue, &view, &frame);

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| self.state.draw_ui(ctx));
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer.render(&mut pass, &paint_jobs, &screen);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for ShowroomApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        let cap = self.state.session.config().max_pixel_ratio;
        match Gpu::new(event_loop, &self.egui_ctx, cap) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.gpu = Some(gpu);
                if let Ok(cursor) = self
                    .state
                    .session
                    .resize(size.width as f32, size.height as f32)
                {
                    self.apply_cursor(cursor);
                }
            }
            Err(e) => {
                tracing::error!("failed to initialise graphics: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            // Releases always reach the session so a drag cannot get stuck under the panel.
            let is_release = matches!(
                event,
                WindowEvent::MouseInput {
                    state: ElementState::Released,
                    ..
                }
            );
            if response.consumed && !is_release {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                }
                match self
                    .state
                    .session
                    .resize(size.width as f32, size.height as f32)
                {
                    Ok(cursor) => self.apply_cursor(cursor),
                    Err(e) => tracing::debug!("skipping resize: {e}"),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.cursor_pos = Some(position);
                let cursor = self.state.dispatch(PointerEvent::Move {
                    x: position.x as f32,
                    y: position.y as f32,
                });
                self.apply_cursor(cursor);
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.cursor_pos = None;
                let cursor = self.state.dispatch(PointerEvent::Leave);
                self.apply_cursor(cursor);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let Some(pos) = self.state.cursor_pos else {
                    return;
                };
                let (x, y) = (pos.x as f32, pos.y as f32);
                let event = match state {
                    ElementState::Pressed => PointerEvent::Down { x, y },
                    ElementState::Released => PointerEvent::Up { x, y },
                };
                let cursor = self.state.dispatch(event);
                self.apply_cursor(cursor);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::F1),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.state.show_panel = !self.state.show_panel;
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        tracing::info!(
            "exiting after {} frames",
            self.state.session.frame()
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("showroom-desktop starting");

    let config = match &cli.config {
        Some(path) => ShowroomConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ShowroomConfig::default(),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ShowroomApp {
        state: AppState::new(config, cli.seed, !cli.no_model)?,
        gpu: None,
        egui_ctx: EguiContext::default(),
    };
    event_loop.run_app(&mut app)?;

    let report = app.state.session.finish();
    tracing::info!(
        "session report: {} frames, {} drags, {} rejected events",
        report.frames,
        report.drags,
        report.rejected_events
    );

    Ok(())
}
