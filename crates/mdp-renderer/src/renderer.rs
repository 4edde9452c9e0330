// ABOUTME: Main GPU renderer using wgpu.
// ABOUTME: Paints the split view as solid rectangles in a single pass.

use std::sync::Arc;
use winit::window::Window;

use crate::gpu::GpuState;
use crate::rect_pipeline::RectPipeline;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("No suitable GPU adapter found")]
    NoAdapter,

    #[error("Surface reports no supported formats")]
    NoSurfaceFormat,
}

/// A filled rectangle in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 4],
}

pub struct Renderer {
    gpu: GpuState,
    clear_color: wgpu::Color,
    rect_pipeline: RectPipeline,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, clear_color: [f32; 4]) -> Result<Self, RenderError> {
        let gpu = GpuState::new(window).await?;

        let rect_pipeline = RectPipeline::new(&gpu.device, gpu.config.format, gpu.size);

        Ok(Self {
            gpu,
            clear_color: wgpu::Color {
                r: clear_color[0] as f64,
                g: clear_color[1] as f64,
                b: clear_color[2] as f64,
                a: clear_color[3] as f64,
            },
            rect_pipeline,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.rect_pipeline.resize(&self.gpu.queue, width, height);
    }

    /// Get window size in pixels
    pub fn window_size(&self) -> (u32, u32) {
        self.gpu.size
    }

    /// Draw one frame. Rectangles are painted in order, later ones on top.
    pub fn render(&mut self, rects: &[FillRect]) -> Result<(), RenderError> {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("Surface lost or outdated, reconfiguring");
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.rect_pipeline.prepare(&self.gpu.queue, rects);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Split View Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.rect_pipeline.render(&mut render_pass);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
