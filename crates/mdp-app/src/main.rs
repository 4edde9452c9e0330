// ABOUTME: Main application entry point.
// ABOUTME: Sets up the window and event loop, feeding resize, mouse and touch input to the split view.

mod scene;

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{CursorIcon, Window, WindowAttributes, WindowId};

use mdp_core::Config;
use mdp_layout::{Handle, SplitView, TouchPoint};
use mdp_renderer::Renderer;
use scene::DividerFocus;

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    split: SplitView,
    config: Config,
    /// Last cursor position in logical pixels
    cursor: (f32, f32),
    hovered: Option<Handle>,
    cursor_icon: CursorIcon,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            window: None,
            renderer: None,
            split: SplitView::new(config.layout.clone()),
            config,
            cursor: (0.0, 0.0),
            hovered: None,
            cursor_icon: CursorIcon::Default,
        }
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, |w| w.scale_factor())
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> (f32, f32) {
        let logical = position.to_logical::<f64>(self.scale_factor());
        (logical.x as f32, logical.y as f32)
    }

    fn logical_size(&self, size: PhysicalSize<u32>) -> (f32, f32) {
        let logical = size.to_logical::<f64>(self.scale_factor());
        (logical.width as f32, logical.height as f32)
    }

    /// Divider under a logical position; the header bar has none
    fn divider_at(&self, x: f32, y: f32) -> Option<Handle> {
        if y < self.config.window.header_height {
            return None;
        }
        self.split.hit_test(x)
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn update_cursor_icon(&mut self) {
        let icon = if self.split.is_dragging() || self.hovered.is_some() {
            CursorIcon::ColResize
        } else {
            CursorIcon::Default
        };
        if icon != self.cursor_icon {
            self.cursor_icon = icon;
            if let Some(window) = &self.window {
                window.set_cursor(icon);
            }
        }
    }

    fn start_drag(&mut self, handle: Handle, started: Result<bool, mdp_layout::ListenerError>) {
        match started {
            Ok(true) => {
                tracing::debug!(?handle, "Divider grabbed");
                self.update_cursor_icon();
                self.request_redraw();
            }
            Ok(false) => {}
            Err(e) => tracing::warn!("Could not start divider drag: {}", e),
        }
    }

    fn finish_drag(&mut self) {
        self.hovered = self.divider_at(self.cursor.0, self.cursor.1);
        self.update_cursor_icon();
        self.request_redraw();
    }

    fn handle_touch(&mut self, touch: Touch) {
        let (x, y) = self.to_logical(touch.location);
        let changed = [TouchPoint { x }];
        match touch.phase {
            TouchPhase::Started => {
                if let Some(handle) = self.divider_at(x, y) {
                    let started = self.split.touch_start(handle, &changed);
                    self.start_drag(handle, started);
                }
            }
            TouchPhase::Moved => {
                if self.split.touch_move(&changed) {
                    self.request_redraw();
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.split.touch_end().is_some() {
                    self.finish_drag();
                }
            }
        }
    }

    fn render(&mut self) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor()) as f32;
        let (width, height) = renderer.window_size();
        let logical_height = height as f32 / scale;
        let header = self.config.window.header_height;

        let geometry = self
            .split
            .geometry(header, (logical_height - header).max(0.0));
        let focus = DividerFocus {
            hovered: self.hovered,
            active: self.split.active_handle(),
        };
        let rects = scene::build(
            &geometry,
            width as f32 / scale,
            header,
            &self.config.colors,
            focus,
            scale,
        );

        if let Err(e) = renderer.render(&rects) {
            tracing::error!("Render error: {}", e);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let clear = self.config.colors.background.to_array();
        let renderer = match pollster::block_on(Renderer::new(Arc::clone(&window), clear)) {
            Ok(renderer) => renderer,
            Err(e) => {
                tracing::error!("Failed to create renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let physical_size = window.inner_size();
        tracing::info!(
            "Window created: {}x{} physical pixels, scale factor: {}",
            physical_size.width,
            physical_size.height,
            window.scale_factor()
        );

        self.window = Some(window);
        self.renderer = Some(renderer);

        let (logical_width, _) = self.logical_size(physical_size);
        if let Err(e) = self.split.mount(logical_width) {
            tracing::error!("Failed to mount split view: {}", e);
        }
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, exiting");
                self.split.unmount();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size.width, new_size.height);
                }
                let (logical_width, _) = self.logical_size(new_size);
                self.split.on_resize(logical_width);
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = self.to_logical(position);
                let (x, y) = self.cursor;
                if self.split.is_dragging() {
                    if self.split.pointer_move(x) {
                        self.request_redraw();
                    }
                } else {
                    let hovered = self.divider_at(x, y);
                    if hovered != self.hovered {
                        self.hovered = hovered;
                        self.update_cursor_icon();
                        self.request_redraw();
                    }
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if self.hovered.take().is_some() {
                    self.update_cursor_icon();
                    self.request_redraw();
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    let (x, y) = self.cursor;
                    if let Some(handle) = self.divider_at(x, y) {
                        let started = self.split.pointer_down(handle, x);
                        self.start_drag(handle, started);
                    }
                }
                ElementState::Released => {
                    if self.split.pointer_up().is_some() {
                        self.finish_drag();
                    }
                }
            },
            WindowEvent::Touch(touch) => self.handle_touch(touch),
            _ => {}
        }
    }
}

/// Load the user's config. On first launch the defaults are written out as a template.
fn load_config() -> Config {
    let first_run = Config::default_path().is_some_and(|path| !path.exists());
    let config = Config::load_or_default();
    if first_run {
        if let Err(e) = config.save_to_default() {
            tracing::warn!("Failed to write default config: {}", e);
        }
    }
    config
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting md2pdf");

    let config = load_config();
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);

    event_loop.run_app(&mut app)?;

    Ok(())
}
