// ABOUTME: Converts split view geometry into colored rectangles for the renderer.
// ABOUTME: Works in logical pixels and scales to physical pixels at the end.

use mdp_core::{Color, PaneColors};
use mdp_layout::{Handle, PaneId, Rect, SplitGeometry};
use mdp_renderer::FillRect;

/// Divider the pointer is over or dragging, for highlighting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DividerFocus {
    pub hovered: Option<Handle>,
    pub active: Option<Handle>,
}

impl DividerFocus {
    fn color(&self, handle: Handle, colors: &PaneColors) -> Color {
        if self.active == Some(handle) {
            colors.divider_active
        } else if self.active.is_none() && self.hovered == Some(handle) {
            colors.divider_hover
        } else {
            colors.divider
        }
    }
}

fn fill(rect: Rect, scale: f32, color: [f32; 4]) -> FillRect {
    FillRect {
        x: rect.x * scale,
        y: rect.y * scale,
        width: rect.width * scale,
        height: rect.height * scale,
        color,
    }
}

/// Build the frame: header bar, panes, then dividers on top
pub fn build(
    geometry: &SplitGeometry,
    viewport_width: f32,
    header_height: f32,
    colors: &PaneColors,
    focus: DividerFocus,
    scale: f32,
) -> Vec<FillRect> {
    let mut rects = Vec::with_capacity(1 + geometry.panes.len() + geometry.dividers.len());

    rects.push(fill(
        Rect {
            x: 0.0,
            y: 0.0,
            width: viewport_width,
            height: header_height,
        },
        scale,
        colors.header.to_array(),
    ));

    for (pane, rect) in &geometry.panes {
        let color = match pane {
            PaneId::Editor => colors.editor,
            PaneId::Set => colors.set,
            PaneId::Preview => colors.preview,
        };
        rects.push(fill(*rect, scale, color.to_array()));
    }

    for (handle, rect) in &geometry.dividers {
        let color = focus.color(*handle, colors);
        rects.push(fill(*rect, scale, color.to_array()));
    }

    rects
}
