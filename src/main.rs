use anyhow::Context as _;
use creature_ik::creature::CreatureKind;
use creature_ik::render::{Camera, GpuContext, ShapeRenderer};
use creature_ik::scene::Scene;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

struct Gpu {
    window: Arc<Window>,
    context: GpuContext,
    renderer: ShapeRenderer,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct App {
    gpu: Option<Gpu>,
    scene: Scene,
    camera: Camera,
    gui_hovered: bool,
    last_frame: Option<Instant>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new() -> anyhow::Result<Self> {
        let camera = Camera::default();
        let scene = Scene::new(CreatureKind::Fish, camera.center_world())?;
        Ok(Self {
            gpu: None,
            scene,
            camera,
            gui_hovered: false,
            last_frame: None,
            error: None,
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title("Procedural Creatures")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let context: GpuContext = pollster::block_on(GpuContext::new(window.clone()))?;
        let renderer = ShapeRenderer::new(&context);

        self.camera = Camera::new(
            context.size.width,
            context.size.height,
            window.scale_factor() as f32,
        );
        self.scene.set_spawn_point(self.camera.center_world());
        self.scene.respawn()?;
        self.scene.set_pointer(self.camera.center_world());

        let egui_state = egui_winit::State::new(
            egui::Context::default(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&context.device, context.config.format, None, 1, false);

        self.gpu = Some(Gpu {
            window,
            context,
            renderer,
            egui_state,
            egui_renderer,
        });
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f64());
        self.last_frame = Some(now);
        self.scene.advance(dt);
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let Some(gpu) = self.gpu.as_mut() else {
            return Ok(());
        };

        let output = match gpu.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.context.reconfigure();
                return Ok(());
            }
            Err(e) => {
                log::warn!("Surface error: {e:?}");
                return Ok(());
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = gpu.egui_state.take_egui_input(&gpu.window);
        let egui_ctx = gpu.egui_state.egui_ctx().clone();

        let mut selected = self.scene.kind();
        let mut show_skeleton = self.scene.show_skeleton;
        let full_output = egui_ctx.run(raw_input, |ctx| {
            egui::SidePanel::left("creatures")
                .resizable(false)
                .show(ctx, |ui| {
                    ui.heading("Creatures");
                    for kind in CreatureKind::ALL {
                        if ui.selectable_label(selected == kind, kind.name()).clicked() {
                            selected = kind;
                        }
                    }
                    ui.separator();
                    ui.checkbox(&mut show_skeleton, "Show skeleton");
                    ui.separator();
                    ui.label("Controls:");
                    ui.small("Move: steer the creature");
                    ui.small("Click: next creature");
                    ui.small("1 / 2 / 3: pick a creature");
                    ui.small("D: toggle skeleton");
                    ui.small("Scroll: zoom");
                });
        });
        self.gui_hovered = egui_ctx.is_pointer_over_area();

        self.scene.show_skeleton = show_skeleton;
        if selected != self.scene.kind() {
            self.scene.select(selected)?;
        }

        gpu.egui_state
            .handle_platform_output(&gpu.window, full_output.platform_output);
        let clipped_primitives = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.context.device, &gpu.context.queue, *id, delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.context.size.width, gpu.context.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let shapes = self.scene.shapes();
        gpu.renderer.render(&gpu.context, &view, &self.camera, &shapes);
        render_egui(gpu, &view, &clipped_primitives, &screen_descriptor);

        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        Ok(())
    }
}

fn render_egui(
    gpu: &mut Gpu,
    view: &wgpu::TextureView,
    clipped_primitives: &[egui::ClippedPrimitive],
    screen_descriptor: &egui_wgpu::ScreenDescriptor,
) {
    let context = &gpu.context;
    let mut encoder = context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Egui Encoder"),
    });

    gpu.egui_renderer.update_buffers(
        &context.device,
        &context.queue,
        &mut encoder,
        clipped_primitives,
        screen_descriptor,
    );

    {
        let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Egui Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let mut render_pass = render_pass.forget_lifetime();
        gpu.egui_renderer
            .render(&mut render_pass, clipped_primitives, screen_descriptor);
    }

    context.queue.submit(std::iter::once(encoder.finish()));
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_state.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        if let Err(e) = self.handle_event(event_loop, event) {
            self.fail(event_loop, e);
        }
    }
}

impl App {
    fn handle_event(&mut self, event_loop: &ActiveEventLoop, event: WindowEvent) -> anyhow::Result<()> {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.context.resize(size);
                    self.camera.fit(size.width, size.height);
                    self.scene.set_spawn_point(self.camera.center_world());
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.camera.set_scale_factor(scale_factor as f32);
                if let Some(gpu) = &self.gpu {
                    self.camera.fit(gpu.context.size.width, gpu.context.size.height);
                }
                self.scene.set_spawn_point(self.camera.center_world());
            }

            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match code {
                        KeyCode::Escape => event_loop.exit(),
                        KeyCode::Digit1 => self.scene.select(CreatureKind::Fish)?,
                        KeyCode::Digit2 => self.scene.select(CreatureKind::Snake)?,
                        KeyCode::Digit3 => self.scene.select(CreatureKind::Lizard)?,
                        KeyCode::KeyD => self.scene.show_skeleton = !self.scene.show_skeleton,
                        _ => {}
                    }
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } if !self.gui_hovered => self.scene.cycle()?,

            WindowEvent::CursorMoved { position, .. } => {
                let pointer = self.camera.screen_to_world(position.x, position.y);
                self.scene.set_pointer(pointer);
            }

            WindowEvent::MouseWheel { delta, .. } if !self.gui_hovered => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.camera.zoom_by(1.1_f32.powf(scroll));
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render()?;
                if let Some(gpu) = &self.gpu {
                    gpu.window.request_redraw();
                }
            }

            _ => {}
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new()?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
