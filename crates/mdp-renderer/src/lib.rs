// ABOUTME: GPU rendering for the md2pdf split view.
// ABOUTME: Uses wgpu to paint panes, dividers and the header as solid rectangles.

mod gpu;
mod rect_pipeline;
pub mod renderer;

pub use renderer::{FillRect, RenderError, Renderer};
