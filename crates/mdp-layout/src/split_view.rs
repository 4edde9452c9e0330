// ABOUTME: The split view: owned layout state for the editor, set and preview panes.
// ABOUTME: Routes viewport and pointer/touch events through the tracker, drag controller and resolver.

use std::cell::RefCell;
use std::rc::Rc;

use mdp_core::LayoutSettings;

use crate::drag::{DragController, DragOrigin, Handle};
use crate::geometry::{self, SplitGeometry};
use crate::input::{first_changed_touch, InputSource, TouchPoint};
use crate::listeners::{ListenerError, ListenerKind, ListenerRegistry, Subscription};
use crate::resolver::{self, Constraints};
use crate::store::{PaneWidthStore, PaneWidths};
use crate::viewport::{ExpandLevel, Viewport, ViewportTracker};

/// Layout state for one split view.
///
/// The stored widths are only changed by drags and by the repair pass that
/// follows every viewport or width change.
#[derive(Debug)]
pub struct SplitView {
    settings: LayoutSettings,
    tracker: ViewportTracker,
    viewport: Viewport,
    store: PaneWidthStore,
    drag: DragController,
    listeners: Rc<RefCell<ListenerRegistry>>,
    resize_listener: Option<Subscription>,
}

impl SplitView {
    pub fn new(settings: LayoutSettings) -> Self {
        let store = PaneWidthStore::new(settings.initial_pane_a_width, settings.initial_pane_ab_width);
        Self {
            tracker: ViewportTracker::new(settings.breakpoints),
            viewport: Viewport {
                max_width: 0.0,
                level: ExpandLevel::Single,
            },
            store,
            drag: DragController::new(),
            listeners: ListenerRegistry::shared(),
            resize_listener: None,
            settings,
        }
    }

    /// Start listening for viewport changes and take the first reading.
    pub fn mount(&mut self, viewport_width: f32) -> Result<(), ListenerError> {
        if self.resize_listener.is_some() {
            return Ok(());
        }
        self.resize_listener = Some(Subscription::acquire(&self.listeners, &[ListenerKind::Resize])?);
        tracing::info!(viewport_width, "Split view mounted");
        self.apply_viewport(viewport_width);
        Ok(())
    }

    /// Release every listener, cancelling any gesture in progress.
    pub fn unmount(&mut self) {
        if self.drag.end(&self.store).is_some() {
            tracing::debug!("Drag cancelled by unmount");
        }
        if self.resize_listener.take().is_some() {
            tracing::info!("Split view unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.resize_listener.is_some()
    }

    /// Viewport resize notification. Ignored while unmounted.
    pub fn on_resize(&mut self, viewport_width: f32) {
        if !self.is_listening(ListenerKind::Resize) {
            return;
        }
        self.apply_viewport(viewport_width);
    }

    fn apply_viewport(&mut self, viewport_width: f32) {
        let (viewport, level_changed) = self.tracker.observe(viewport_width);
        self.viewport = viewport;
        if level_changed {
            tracing::info!(
                level = viewport.level.index(),
                max_width = viewport.max_width,
                "Expand level changed"
            );
        }

        if let Some(handle) = self.drag.active_handle() {
            if !handle.is_visible(viewport.level) && self.drag.end(&self.store).is_some() {
                tracing::debug!(?handle, "Drag cancelled, divider hidden");
            }
        }

        if viewport.level == ExpandLevel::Single {
            self.store.set_pane_a_width(viewport.max_width);
            self.store.set_pane_ab_width(viewport.max_width);
        }
        self.repair();
    }

    fn repair(&mut self) {
        let constraints = self.constraints();
        resolver::resolve(&mut self.store, &constraints);
    }

    pub fn constraints(&self) -> Constraints {
        Constraints {
            min_pane_width: self.settings.min_pane_width,
            min_combined_pane_width: self.settings.min_combined_pane_width,
            max_width: self.viewport.max_width,
            level: self.viewport.level,
        }
    }

    /// Mouse button pressed on a divider
    pub fn pointer_down(&mut self, handle: Handle, x: f32) -> Result<bool, ListenerError> {
        self.begin_drag(handle, x, InputSource::Mouse)
    }

    /// Touch started on a divider
    pub fn touch_start(&mut self, handle: Handle, changed: &[TouchPoint]) -> Result<bool, ListenerError> {
        match first_changed_touch(changed) {
            Some(x) => self.begin_drag(handle, x, InputSource::Touch),
            None => Ok(false),
        }
    }

    fn begin_drag(&mut self, handle: Handle, x: f32, source: InputSource) -> Result<bool, ListenerError> {
        if !self.is_mounted() || !handle.is_visible(self.viewport.level) {
            return Ok(false);
        }
        self.drag.begin(handle, x, source, &self.store, &self.listeners)
    }

    /// Window-level mouse move. Returns whether the widths changed.
    pub fn pointer_move(&mut self, x: f32) -> bool {
        if !self.is_listening(ListenerKind::MouseMove) {
            return false;
        }
        self.drag_to(x)
    }

    /// Window-level touch move. Returns whether the widths changed.
    pub fn touch_move(&mut self, changed: &[TouchPoint]) -> bool {
        if !self.is_listening(ListenerKind::TouchMove) {
            return false;
        }
        match first_changed_touch(changed) {
            Some(x) => self.drag_to(x),
            None => false,
        }
    }

    fn drag_to(&mut self, x: f32) -> bool {
        let before = self.store;
        let constraints = self.constraints();
        if !self.drag.update(x, &mut self.store, &constraints) {
            return false;
        }
        self.repair();
        self.store != before
    }

    /// Window-level mouse release. Returns the settled widths if a drag ended.
    pub fn pointer_up(&mut self) -> Option<DragOrigin> {
        if !self.is_listening(ListenerKind::MouseUp) {
            return None;
        }
        self.drag.end(&self.store)
    }

    /// Window-level touch end. Returns the settled widths if a drag ended.
    pub fn touch_end(&mut self) -> Option<DragOrigin> {
        if !self.is_listening(ListenerKind::TouchEnd) {
            return None;
        }
        self.drag.end(&self.store)
    }

    fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.borrow().is_attached(kind)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn active_handle(&self) -> Option<Handle> {
        self.drag.active_handle()
    }

    /// Snapshot of the gesture in progress
    pub fn drag_origin(&self) -> Option<DragOrigin> {
        self.drag.origin()
    }

    pub fn expand_level(&self) -> ExpandLevel {
        self.viewport.level
    }

    pub fn max_width(&self) -> f32 {
        self.viewport.max_width
    }

    pub fn pane_a_width(&self) -> f32 {
        self.store.pane_a()
    }

    pub fn pane_ab_width(&self) -> f32 {
        self.store.pane_ab()
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Widths handed to the editor and set panes
    pub fn pane_widths(&self) -> PaneWidths {
        self.store.derive(self.viewport.level)
    }

    pub fn handle_visible(&self, handle: Handle) -> bool {
        handle.is_visible(self.viewport.level)
    }

    /// Pane and divider rectangles for a strip starting at `top`
    pub fn geometry(&self, top: f32, height: f32) -> SplitGeometry {
        geometry::layout(
            self.viewport.level,
            self.pane_widths(),
            self.viewport.max_width,
            top,
            height,
            self.settings.divider_width,
        )
    }

    /// Divider under a horizontal position, if any
    pub fn hit_test(&self, x: f32) -> Option<Handle> {
        self.geometry(0.0, 0.0).divider_at(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(width: f32) -> SplitView {
        let mut view = SplitView::new(LayoutSettings::default());
        view.mount(width).unwrap();
        view
    }

    fn mouse_drag(view: &mut SplitView, handle: Handle, from: f32, to: f32) {
        assert!(view.pointer_down(handle, from).unwrap());
        view.pointer_move(to);
        view.pointer_up();
    }

    #[test]
    fn mount_applies_initial_viewport() {
        let view = mounted(1200.0);
        assert!(view.is_mounted());
        assert_eq!(view.expand_level(), ExpandLevel::Triple);
        assert_eq!(view.max_width(), 1200.0);
        assert_eq!(view.pane_a_width(), 350.0);
        assert_eq!(view.pane_ab_width(), 650.0);
        assert_eq!(view.pane_widths().set, 300.0);
    }

    #[test]
    fn dragging_first_divider_far_right() {
        let mut view = mounted(1200.0);
        mouse_drag(&mut view, Handle::EditorSet, 100.0, 600.0);

        assert_eq!(view.pane_a_width(), 816.0);
        assert_eq!(view.pane_ab_width(), 1008.0);
    }

    #[test]
    fn dragging_second_divider_below_double_floor_is_ignored() {
        let mut view = mounted(1200.0);
        assert!(view.pointer_down(Handle::SetPreview, 800.0).unwrap());
        assert!(!view.pointer_move(100.0));
        view.pointer_up();

        assert_eq!(view.pane_ab_width(), 650.0);
        assert_eq!(view.pane_a_width(), 350.0);
    }

    #[test]
    fn shrinking_below_two_pane_breakpoint_collapses() {
        let mut view = mounted(1200.0);
        view.on_resize(500.0);

        assert_eq!(view.expand_level(), ExpandLevel::Single);
        assert_eq!(view.pane_a_width(), 500.0);
        assert_eq!(view.pane_ab_width(), 500.0);
        assert!(!view.handle_visible(Handle::EditorSet));
    }

    #[test]
    fn shrinking_to_two_panes_keeps_valid_widths() {
        let mut view = mounted(1200.0);
        view.on_resize(800.0);

        assert_eq!(view.expand_level(), ExpandLevel::Double);
        assert_eq!(view.pane_a_width(), 350.0);
        // 650 would leave less than the floor to the right of the set pane
        assert_eq!(view.pane_ab_width(), 608.0);
        assert_eq!(view.pane_widths().set, 350.0);
        assert!(view.handle_visible(Handle::EditorSet));
        assert!(!view.handle_visible(Handle::SetPreview));
    }

    #[test]
    fn next_drag_starts_from_settled_widths() {
        let mut view = mounted(1200.0);
        assert!(view.pointer_down(Handle::EditorSet, 350.0).unwrap());
        view.pointer_move(420.0);
        let settled = view.pointer_up().unwrap();
        assert!(!view.is_dragging());
        assert!(view.drag_origin().is_none());

        assert!(view.pointer_down(Handle::SetPreview, 700.0).unwrap());
        let origin = view.drag_origin().unwrap();
        assert_eq!(origin.pane_a, settled.pane_a);
        assert_eq!(origin.pane_ab, settled.pane_ab);
        assert_eq!(origin.pane_a, 420.0);
        assert_eq!(origin.pointer_x, 700.0);
    }

    #[test]
    fn touch_and_mouse_share_one_gesture() {
        let mut view = mounted(1200.0);
        let touch = |x| [TouchPoint { x }];

        assert!(view.touch_start(Handle::EditorSet, &touch(350.0)).unwrap());
        assert!(view.touch_move(&touch(400.0)));
        assert_eq!(view.pane_a_width(), 400.0);

        // Mouse listeners are attached too; either end event finishes the drag.
        assert!(view.pointer_move(450.0));
        assert_eq!(view.pane_a_width(), 450.0);
        assert!(view.pointer_up().is_some());

        assert!(!view.touch_move(&touch(600.0)));
        assert!(view.touch_end().is_none());
        assert_eq!(view.pane_a_width(), 450.0);
    }

    #[test]
    fn empty_touch_list_starts_nothing() {
        let mut view = mounted(1200.0);
        assert!(!view.touch_start(Handle::EditorSet, &[]).unwrap());
        assert!(!view.is_dragging());
    }

    #[test]
    fn moves_without_a_gesture_do_nothing() {
        let mut view = mounted(1200.0);
        assert!(!view.pointer_move(900.0));
        assert!(view.pointer_up().is_none());
        assert_eq!(view.pane_a_width(), 350.0);
    }

    #[test]
    fn hidden_handles_cannot_be_grabbed() {
        let mut view = mounted(800.0);
        assert!(!view.pointer_down(Handle::SetPreview, 650.0).unwrap());
        assert!(!view.is_dragging());

        view.on_resize(500.0);
        assert!(!view.pointer_down(Handle::EditorSet, 200.0).unwrap());
    }

    #[test]
    fn unmount_releases_everything() {
        let mut view = mounted(1200.0);
        assert!(view.pointer_down(Handle::EditorSet, 350.0).unwrap());
        view.unmount();

        assert!(!view.is_mounted());
        assert!(!view.is_dragging());
        assert!(view.listeners.borrow().is_empty());

        view.on_resize(500.0);
        assert_eq!(view.expand_level(), ExpandLevel::Triple);
        assert!(!view.pointer_down(Handle::EditorSet, 350.0).unwrap());
    }

    #[test]
    fn resize_during_drag_reclamps() {
        let mut view = mounted(1200.0);
        assert!(view.pointer_down(Handle::EditorSet, 350.0).unwrap());
        view.pointer_move(1100.0);
        assert_eq!(view.pane_a_width(), 816.0);

        view.on_resize(1100.0);
        assert_eq!(view.pane_a_width(), 716.0);
        assert_eq!(view.pane_ab_width(), 908.0);

        view.pointer_move(1100.0);
        assert_eq!(view.pane_a_width(), 716.0);
        view.pointer_up();
    }

    #[test]
    fn collapsing_to_one_pane_cancels_drag() {
        let mut view = mounted(1200.0);
        assert!(view.pointer_down(Handle::EditorSet, 350.0).unwrap());
        view.on_resize(500.0);

        assert!(!view.is_dragging());
        assert!(!view.is_listening(ListenerKind::MouseMove));
        assert!(!view.pointer_move(200.0));
        assert!(view.pointer_up().is_none());
        assert_eq!(view.pane_a_width(), 500.0);
        assert_eq!(view.pane_ab_width(), 500.0);

        // The gesture does not resume when the divider reappears
        view.on_resize(1200.0);
        assert!(!view.pointer_move(600.0));
        assert_eq!(view.pane_a_width(), 500.0);
    }

    #[test]
    fn dropping_to_two_panes_cancels_second_divider_drag() {
        let mut view = mounted(1200.0);
        assert!(view.pointer_down(Handle::SetPreview, 650.0).unwrap());
        view.pointer_move(700.0);
        assert_eq!(view.pane_ab_width(), 700.0);

        view.on_resize(800.0);
        assert!(!view.is_dragging());
        assert!(!view.pointer_move(400.0));
        assert_eq!(view.pane_a_width(), 350.0);
        assert_eq!(view.pane_ab_width(), 608.0);
    }

    #[test]
    fn first_divider_drag_survives_drop_to_two_panes() {
        let mut view = mounted(1200.0);
        assert!(view.pointer_down(Handle::EditorSet, 350.0).unwrap());
        view.on_resize(800.0);

        assert_eq!(view.active_handle(), Some(Handle::EditorSet));
        assert!(view.pointer_move(1000.0));
        // Double leaves one floor to the right of the editor
        assert_eq!(view.pane_a_width(), 608.0);
        assert!(view.pointer_up().is_some());
    }

    #[test]
    fn drag_continues_when_widening_to_three_panes() {
        let mut view = mounted(800.0);
        assert!(view.pointer_down(Handle::EditorSet, 350.0).unwrap());
        view.on_resize(1200.0);

        assert_eq!(view.expand_level(), ExpandLevel::Triple);
        assert!(view.is_dragging());
        assert!(view.pointer_move(400.0));
        assert_eq!(view.pane_a_width(), 400.0);
        assert!(view.pane_ab_width() >= 400.0 + 192.0);
        view.pointer_up();
    }

    #[test]
    fn hit_test_follows_geometry() {
        let view = mounted(1200.0);
        assert_eq!(view.hit_test(352.0), Some(Handle::EditorSet));
        assert_eq!(view.hit_test(660.0), Some(Handle::SetPreview));
        assert_eq!(view.hit_test(500.0), None);

        let g = view.geometry(40.0, 760.0);
        assert_eq!(g.panes.len(), 3);
    }

    #[test]
    fn widening_after_collapse_restores_floors() {
        let mut view = mounted(1200.0);
        view.on_resize(300.0);
        view.on_resize(1200.0);

        assert_eq!(view.expand_level(), ExpandLevel::Triple);
        assert_eq!(view.pane_a_width(), 300.0);
        assert_eq!(view.pane_ab_width(), 492.0);
    }
}
