//! WASM entry point - the creature scene on a `<canvas id="canvas">`

use crate::creature::CreatureKind;
use crate::render::{Camera, GpuContext, ShapeRenderer};
use crate::scene::Scene;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::web::EventLoopExtWebSys;
use winit::platform::web::WindowAttributesExtWebSys;
use winit::window::{Window, WindowId};

struct AppState {
    context: Option<GpuContext>,
    renderer: Option<ShapeRenderer>,
}

struct App {
    window: Option<Arc<Window>>,
    state: Rc<RefCell<AppState>>,
    scene: Scene,
    camera: Camera,
    last_time: f64,
    init_pending: bool,
}

impl App {
    fn new(scene: Scene) -> Self {
        Self {
            window: None,
            state: Rc::new(RefCell::new(AppState {
                context: None,
                renderer: None,
            })),
            scene,
            camera: Camera::default(),
            last_time: 0.0,
            init_pending: false,
        }
    }

    fn render(&mut self) {
        let mut state = self.state.borrow_mut();
        let AppState {
            context: Some(context),
            renderer: Some(renderer),
        } = &mut *state
        else {
            return;
        };

        let output = match context.surface.get_current_texture() {
            Ok(o) => o,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                context.reconfigure();
                return;
            }
            Err(e) => {
                log::warn!("Surface error: {e:?}");
                return;
            }
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        renderer.render(context, &view, &self.camera, &self.scene.shapes());
        output.present();
    }
}

fn find_canvas() -> Option<HtmlCanvasElement> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("canvas"))
        .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_pending {
            return;
        }

        let Some(canvas) = find_canvas() else {
            log::error!("no <canvas id=\"canvas\"> element on the page");
            event_loop.exit();
            return;
        };
        self.init_pending = true;

        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let window_attrs = Window::default_attributes()
            .with_canvas(Some(canvas))
            .with_inner_size(PhysicalSize::new(width, height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        self.camera = Camera::new(width, height, window.scale_factor() as f32);
        self.scene.set_spawn_point(self.camera.center_world());
        self.scene.set_pointer(self.camera.center_world());
        if let Err(e) = self.scene.respawn() {
            log::error!("failed to spawn creature: {e}");
        }

        let state = self.state.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let context = match GpuContext::new(window.clone()).await {
                Ok(context) => context,
                Err(e) => {
                    log::error!("failed to initialise WebGPU: {e}");
                    return;
                }
            };
            let renderer = ShapeRenderer::new(&context);

            let mut state = state.borrow_mut();
            state.context = Some(context);
            state.renderer = Some(renderer);

            window.request_redraw();
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                let mut state = self.state.borrow_mut();
                if let Some(context) = &mut state.context {
                    context.resize(size);
                }
                self.camera.fit(size.width, size.height);
                self.scene.set_spawn_point(self.camera.center_world());
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Err(e) = self.scene.cycle() {
                    log::error!("failed to switch creature: {e}");
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let pointer = self.camera.screen_to_world(position.x, position.y);
                self.scene.set_pointer(pointer);
            }

            WindowEvent::RedrawRequested => {
                let now = web_sys::window()
                    .and_then(|w| w.performance())
                    .map(|p| p.now())
                    .unwrap_or(0.0);

                let dt = if self.last_time > 0.0 {
                    (now - self.last_time) / 1000.0
                } else {
                    0.0
                };
                self.last_time = now;

                self.scene.advance(dt);
                self.render();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Warn) {
        web_sys::console::error_1(&format!("failed to init logger: {e}").into());
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("failed to create event loop: {e}");
            return;
        }
    };

    match Scene::new(CreatureKind::Fish, Camera::default().center_world()) {
        Ok(scene) => event_loop.spawn_app(App::new(scene)),
        Err(e) => log::error!("failed to build scene: {e}"),
    }
}
