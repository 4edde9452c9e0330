// ABOUTME: Pixel rectangles for visible panes and dividers.
// ABOUTME: Lays panes out left to right; the last visible pane takes the remaining width.

use crate::drag::Handle;
use crate::store::PaneWidths;
use crate::viewport::ExpandLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneId {
    Editor,
    Set,
    Preview,
}

/// Rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x && x < self.right()
    }
}

/// Everything the host needs to draw one frame of the split view
#[derive(Debug, Clone, PartialEq)]
pub struct SplitGeometry {
    pub panes: Vec<(PaneId, Rect)>,
    pub dividers: Vec<(Handle, Rect)>,
}

impl SplitGeometry {
    pub fn pane(&self, id: PaneId) -> Option<Rect> {
        self.panes.iter().find(|(p, _)| *p == id).map(|(_, r)| *r)
    }

    pub fn divider(&self, handle: Handle) -> Option<Rect> {
        self.dividers.iter().find(|(h, _)| *h == handle).map(|(_, r)| *r)
    }

    /// Divider under a horizontal position
    pub fn divider_at(&self, x: f32) -> Option<Handle> {
        self.dividers
            .iter()
            .find(|(_, rect)| rect.contains_x(x))
            .map(|(handle, _)| *handle)
    }
}

/// Lay out the visible panes of `level` inside a strip of `viewport_width`.
pub fn layout(
    level: ExpandLevel,
    widths: PaneWidths,
    viewport_width: f32,
    top: f32,
    height: f32,
    divider_width: f32,
) -> SplitGeometry {
    let slots: &[(PaneId, Option<Handle>)] = match level {
        ExpandLevel::Single => &[(PaneId::Editor, None)],
        ExpandLevel::Double => &[(PaneId::Editor, Some(Handle::EditorSet)), (PaneId::Set, None)],
        ExpandLevel::Triple => &[
            (PaneId::Editor, Some(Handle::EditorSet)),
            (PaneId::Set, Some(Handle::SetPreview)),
            (PaneId::Preview, None),
        ],
    };

    let mut geometry = SplitGeometry {
        panes: Vec::with_capacity(slots.len()),
        dividers: Vec::with_capacity(slots.len() - 1),
    };
    let mut x = 0.0_f32;

    for (i, &(pane, divider)) in slots.iter().enumerate() {
        let is_last = i + 1 == slots.len();
        let width = if is_last {
            (viewport_width - x).max(0.0)
        } else {
            let requested = match pane {
                PaneId::Editor => widths.editor,
                PaneId::Set => widths.set,
                PaneId::Preview => 0.0,
            };
            requested.max(0.0)
        };

        geometry.panes.push((
            pane,
            Rect {
                x,
                y: top,
                width,
                height,
            },
        ));
        x += width;

        if let Some(handle) = divider {
            geometry.dividers.push((
                handle,
                Rect {
                    x,
                    y: top,
                    width: divider_width,
                    height,
                },
            ));
            x += divider_width;
        }
    }

    geometry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widths(editor: f32, set: f32) -> PaneWidths {
        PaneWidths { editor, set }
    }

    #[test]
    fn three_panes_with_two_dividers() {
        let g = layout(ExpandLevel::Triple, widths(350.0, 300.0), 1200.0, 40.0, 760.0, 8.0);

        assert_eq!(g.panes.len(), 3);
        assert_eq!(g.dividers.len(), 2);
        assert_eq!(g.pane(PaneId::Editor).unwrap().width, 350.0);
        assert_eq!(g.divider(Handle::EditorSet).unwrap().x, 350.0);
        assert_eq!(g.pane(PaneId::Set).unwrap().x, 358.0);
        assert_eq!(g.divider(Handle::SetPreview).unwrap().x, 658.0);

        let preview = g.pane(PaneId::Preview).unwrap();
        assert_eq!(preview.x, 666.0);
        assert_eq!(preview.width, 534.0);
        assert_eq!(preview.y, 40.0);
    }

    #[test]
    fn set_pane_absorbs_preview_in_two_pane_mode() {
        let g = layout(ExpandLevel::Double, widths(350.0, 350.0), 800.0, 0.0, 600.0, 8.0);

        assert!(g.pane(PaneId::Preview).is_none());
        assert!(g.divider(Handle::SetPreview).is_none());
        let set = g.pane(PaneId::Set).unwrap();
        assert_eq!(set.x, 358.0);
        assert_eq!(set.width, 442.0);
    }

    #[test]
    fn single_pane_fills_viewport() {
        let g = layout(ExpandLevel::Single, widths(500.0, 500.0), 500.0, 0.0, 600.0, 8.0);
        assert_eq!(g.panes, vec![(PaneId::Editor, Rect { x: 0.0, y: 0.0, width: 500.0, height: 600.0 })]);
        assert!(g.dividers.is_empty());
    }

    #[test]
    fn flexible_pane_never_goes_negative() {
        let g = layout(ExpandLevel::Triple, widths(900.0, 300.0), 1024.0, 0.0, 600.0, 8.0);
        assert_eq!(g.pane(PaneId::Preview).unwrap().width, 0.0);
    }

    #[test]
    fn divider_hit_testing() {
        let g = layout(ExpandLevel::Triple, widths(350.0, 300.0), 1200.0, 0.0, 600.0, 8.0);
        assert_eq!(g.divider_at(349.0), None);
        assert_eq!(g.divider_at(350.0), Some(Handle::EditorSet));
        assert_eq!(g.divider_at(357.5), Some(Handle::EditorSet));
        assert_eq!(g.divider_at(660.0), Some(Handle::SetPreview));
        assert_eq!(g.divider_at(666.0), None);
    }
}
